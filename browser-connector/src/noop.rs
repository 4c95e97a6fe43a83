//! Stand-ins for optional host services the host did not provide

use crate::traits::*;
use embedded_browser_core::*;
use async_trait::async_trait;
use std::sync::Arc;

/// Drops every call; used for every optional provider the host lacks
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProvider;

impl TabUpdateProvider for NoopProvider {
    fn update_title(&self, _title: &str) {}

    fn update_url(&self, _url: &str) {}

    fn update_favicon(&self, _favicon_url: &str) {}
}

impl TabUpdateProviderFactory for NoopProvider {
    fn create_provider(&self, _tab_id: &TabId, _type_id: &TabTypeId) -> Option<Arc<dyn TabUpdateProvider>> {
        None
    }
}

#[async_trait]
impl UrlHistoryProvider for NoopProvider {
    fn suggestions(&self, _prefix: &str, _limit: usize) -> Vec<UrlHistoryEntry> {
        Vec::new()
    }

    fn add_url(&self, _url: &str, _title: &str) {}

    async fn save_history(&self) -> Result<()> {
        Ok(())
    }
}

#[async_trait]
impl ZoomSettingsProvider for NoopProvider {
    fn extract_domain(&self, _url: &str) -> Option<String> {
        None
    }

    fn zoom_for_domain(&self, _domain: &str) -> Option<f64> {
        None
    }

    fn set_zoom_for_domain(&self, _domain: &str, _zoom: f64) {}

    async fn save_settings(&self) -> Result<()> {
        Ok(())
    }
}

impl BookmarkDataProvider for NoopProvider {
    fn is_bookmarked(&self, _record: &BookmarkRecord) -> bool {
        false
    }

    fn add_bookmark(&self, _collection: &str, _bookmark: Bookmark) {}

    fn remove_bookmark(&self, _collection_id: &str, _bookmark_id: &str) {}

    fn find_bookmark(&self, _record: &BookmarkRecord) -> Option<BookmarkLocation> {
        None
    }
}

#[async_trait]
impl SecretDataProvider for NoopProvider {
    async fn list_secrets(&self, _limit: usize) -> Result<Vec<SecretEntry>> {
        Ok(Vec::new())
    }

    async fn create_secret(&self, _request: CreateSecretRequest) -> Result<SecretEntry> {
        Err(ProviderError::Unavailable {
            provider: "secrets".to_string(),
        }
        .into())
    }
}

impl ClipboardProvider for NoopProvider {
    fn set_text(&self, _text: &str) {}
}

impl SplitViewOperations for NoopProvider {
    fn open_url_in_active_panel(&self, _url: &str, _title: &str, _force_new_tab: bool) {}
}

impl ActiveTabsProvider for NoopProvider {
    fn close_tab(&self, _tab_id: &TabId) {}
}

//! Host capability traits
//!
//! Everything the browser tab needs from the host application goes through
//! one of these interfaces. Implementations live in the host.

use crate::events::EventSink;
use embedded_browser_core::*;
use async_trait::async_trait;
use std::sync::Arc;

/// Factory for host-owned browser instances
#[async_trait]
pub trait BrowserService: Send + Sync {
    /// Whether the browser engine is usable in this host
    fn is_available(&self) -> bool;

    /// Create a browser instance; `Ok(None)` when the host declined
    async fn create_browser(&self, config: BrowserConfig) -> Result<Option<Arc<dyn BrowserHandle>>>;
}

/// Live reference to one host browser instance
#[async_trait]
pub trait BrowserHandle: Send + Sync {
    /// Navigate to a URL
    async fn load_url(&self, url: &str) -> Result<()>;

    fn go_back(&self);

    fn go_forward(&self);

    fn can_go_back(&self) -> bool;

    fn can_go_forward(&self) -> bool;

    fn reload(&self);

    /// Stop the current page load
    fn stop(&self);

    fn zoom_level(&self) -> f64;

    fn set_zoom_level(&self, level: f64);

    fn reset_zoom(&self);

    fn zoom_in(&self);

    fn zoom_out(&self);

    /// False once the engine has torn the instance down
    fn is_valid(&self) -> bool;

    /// Fill the focused login form
    async fn fill_credentials(&self, username: &str, password: &str, fill_both: bool) -> Result<()>;

    /// Copy the page selection to the clipboard
    fn copy_selection(&self);

    /// Paste the clipboard into the focused field
    fn paste(&self);

    fn request_picture_in_picture(&self);

    fn request_exit_fullscreen(&self);

    /// Register every listener of this instance; called once per handle
    fn attach_listeners(&self, sink: EventSink);

    /// Release the instance
    fn dispose(&self);
}

/// Pushes tab metadata to the host tab bar
pub trait TabUpdateProvider: Send + Sync {
    fn update_title(&self, title: &str);

    fn update_url(&self, url: &str);

    fn update_favicon(&self, favicon_url: &str);
}

/// Creates tab update providers once the tab is registered with the host
pub trait TabUpdateProviderFactory: Send + Sync {
    fn create_provider(&self, tab_id: &TabId, type_id: &TabTypeId) -> Option<Arc<dyn TabUpdateProvider>>;
}

/// Host URL history store
#[async_trait]
pub trait UrlHistoryProvider: Send + Sync {
    /// Ranked suggestions for a typed prefix
    fn suggestions(&self, prefix: &str, limit: usize) -> Vec<UrlHistoryEntry>;

    /// Record a visit
    fn add_url(&self, url: &str, title: &str);

    /// Flush to persistent storage
    async fn save_history(&self) -> Result<()>;
}

/// Host per-domain zoom store
#[async_trait]
pub trait ZoomSettingsProvider: Send + Sync {
    fn extract_domain(&self, url: &str) -> Option<String>;

    fn zoom_for_domain(&self, domain: &str) -> Option<f64>;

    fn set_zoom_for_domain(&self, domain: &str, zoom: f64);

    async fn save_settings(&self) -> Result<()>;
}

/// Host bookmark store
pub trait BookmarkDataProvider: Send + Sync {
    fn is_bookmarked(&self, record: &BookmarkRecord) -> bool;

    fn add_bookmark(&self, collection: &str, bookmark: Bookmark);

    fn remove_bookmark(&self, collection_id: &str, bookmark_id: &str);

    fn find_bookmark(&self, record: &BookmarkRecord) -> Option<BookmarkLocation>;
}

/// Host secret store
#[async_trait]
pub trait SecretDataProvider: Send + Sync {
    /// List at most `limit` secrets
    async fn list_secrets(&self, limit: usize) -> Result<Vec<SecretEntry>>;

    async fn create_secret(&self, request: CreateSecretRequest) -> Result<SecretEntry>;
}

/// Host new-tab dashboard, shown for blank pages
pub trait DashboardContentProvider: Send + Sync {
    fn shortcuts(&self) -> Vec<DashboardShortcut>;
}

/// System clipboard owned by the host
pub trait ClipboardProvider: Send + Sync {
    fn set_text(&self, text: &str);
}

/// Opens URLs in other host tabs
pub trait SplitViewOperations: Send + Sync {
    fn open_url_in_active_panel(&self, url: &str, title: &str, force_new_tab: bool);
}

/// Host tab list
pub trait ActiveTabsProvider: Send + Sync {
    fn close_tab(&self, tab_id: &TabId);
}

/// Host registry of tab types
pub trait TabRegistry: Send + Sync {
    fn register_tab_type(&self, registration: TabTypeRegistration);

    fn unregister_tab_type(&self, type_id: &TabTypeId);
}

/// Tab configuration handed to a tab factory by the host
pub trait TabInfo: Send + Sync {
    fn id(&self) -> &TabId;

    fn type_id(&self) -> TabTypeId;

    fn title(&self) -> &str;

    /// Tab configs that carry a start URL expose it here
    fn as_initial_url(&self) -> Option<&dyn HasInitialUrl> {
        None
    }
}

/// Declared contract for tab configs that know which URL to open
pub trait HasInitialUrl {
    fn initial_url(&self) -> &str;
}

impl TabInfo for TabData {
    fn id(&self) -> &TabId {
        &self.id
    }

    fn type_id(&self) -> TabTypeId {
        TabTypeId::browser()
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn as_initial_url(&self) -> Option<&dyn HasInitialUrl> {
        Some(self)
    }
}

impl HasInitialUrl for TabData {
    fn initial_url(&self) -> &str {
        &self.initial_url
    }
}

/// Start URL for a tab config, `fallback` when it declares none
pub fn initial_url_of(info: &dyn TabInfo, fallback: &str) -> String {
    info.as_initial_url()
        .map(|has_url| has_url.initial_url().trim())
        .filter(|url| !url.is_empty())
        .unwrap_or(fallback)
        .to_string()
}

//! Resolution of optional host capabilities
//!
//! The host may leave out any service. Presence is checked once here, so the
//! tab logic works against a complete [`TabServices`] set or falls back to the
//! stub view.

use crate::noop::NoopProvider;
use crate::traits::*;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// Services offered by the host, each optional
#[derive(Clone, Default)]
pub struct HostCapabilities {
    pub browser_service: Option<Arc<dyn BrowserService>>,
    pub tab_updates: Option<Arc<dyn TabUpdateProviderFactory>>,
    pub url_history: Option<Arc<dyn UrlHistoryProvider>>,
    pub zoom_settings: Option<Arc<dyn ZoomSettingsProvider>>,
    pub bookmarks: Option<Arc<dyn BookmarkDataProvider>>,
    pub secrets: Option<Arc<dyn SecretDataProvider>>,
    pub dashboard: Option<Arc<dyn DashboardContentProvider>>,
    pub clipboard: Option<Arc<dyn ClipboardProvider>>,
    pub split_view: Option<Arc<dyn SplitViewOperations>>,
    pub active_tabs: Option<Arc<dyn ActiveTabsProvider>>,
}

impl HostCapabilities {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_browser_service(mut self, service: Arc<dyn BrowserService>) -> Self {
        self.browser_service = Some(service);
        self
    }

    pub fn with_tab_updates(mut self, factory: Arc<dyn TabUpdateProviderFactory>) -> Self {
        self.tab_updates = Some(factory);
        self
    }

    pub fn with_url_history(mut self, provider: Arc<dyn UrlHistoryProvider>) -> Self {
        self.url_history = Some(provider);
        self
    }

    pub fn with_zoom_settings(mut self, provider: Arc<dyn ZoomSettingsProvider>) -> Self {
        self.zoom_settings = Some(provider);
        self
    }

    pub fn with_bookmarks(mut self, provider: Arc<dyn BookmarkDataProvider>) -> Self {
        self.bookmarks = Some(provider);
        self
    }

    pub fn with_secrets(mut self, provider: Arc<dyn SecretDataProvider>) -> Self {
        self.secrets = Some(provider);
        self
    }

    pub fn with_dashboard(mut self, provider: Arc<dyn DashboardContentProvider>) -> Self {
        self.dashboard = Some(provider);
        self
    }

    pub fn with_clipboard(mut self, provider: Arc<dyn ClipboardProvider>) -> Self {
        self.clipboard = Some(provider);
        self
    }

    pub fn with_split_view(mut self, operations: Arc<dyn SplitViewOperations>) -> Self {
        self.split_view = Some(operations);
        self
    }

    pub fn with_active_tabs(mut self, provider: Arc<dyn ActiveTabsProvider>) -> Self {
        self.active_tabs = Some(provider);
        self
    }

    /// Pick the full or stub variant and fill gaps with no-op providers
    pub fn resolve(&self) -> TabBackend {
        let browser = match &self.browser_service {
            Some(service) if service.is_available() => service.clone(),
            Some(_) => {
                info!("Browser service present but unavailable, using stub content");
                return TabBackend::Stub;
            }
            None => {
                info!("No browser service provided, using stub content");
                return TabBackend::Stub;
            }
        };

        let noop = Arc::new(NoopProvider);
        if self.secrets.is_none() {
            debug!("Secret provider missing, credential actions will be empty");
        }

        TabBackend::Full(TabServices {
            browser,
            tab_updates: self.tab_updates.clone().unwrap_or_else(|| noop.clone()),
            url_history: self.url_history.clone().unwrap_or_else(|| noop.clone()),
            zoom_settings: self.zoom_settings.clone().unwrap_or_else(|| noop.clone()),
            bookmarks: self.bookmarks.clone().unwrap_or_else(|| noop.clone()),
            secrets: self.secrets.clone().unwrap_or_else(|| noop.clone()),
            dashboard: self.dashboard.clone(),
            clipboard: self.clipboard.clone().unwrap_or_else(|| noop.clone()),
            split_view: self.split_view.clone().unwrap_or_else(|| noop.clone()),
            active_tabs: self.active_tabs.clone().unwrap_or(noop),
        })
    }
}

/// Complete service set for a live browser tab
#[derive(Clone)]
pub struct TabServices {
    pub browser: Arc<dyn BrowserService>,
    pub tab_updates: Arc<dyn TabUpdateProviderFactory>,
    pub url_history: Arc<dyn UrlHistoryProvider>,
    pub zoom_settings: Arc<dyn ZoomSettingsProvider>,
    pub bookmarks: Arc<dyn BookmarkDataProvider>,
    pub secrets: Arc<dyn SecretDataProvider>,
    /// Kept optional: without a dashboard blank pages show the browser view
    pub dashboard: Option<Arc<dyn DashboardContentProvider>>,
    pub clipboard: Arc<dyn ClipboardProvider>,
    pub split_view: Arc<dyn SplitViewOperations>,
    pub active_tabs: Arc<dyn ActiveTabsProvider>,
}

/// Outcome of capability resolution
#[derive(Clone)]
pub enum TabBackend {
    /// Browser service available
    Full(TabServices),
    /// No usable browser service; the host renders placeholder content
    Stub,
}

impl TabBackend {
    pub fn is_stub(&self) -> bool {
        matches!(self, TabBackend::Stub)
    }
}

impl fmt::Debug for TabBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TabBackend::Full(services) => f
                .debug_struct("Full")
                .field("dashboard", &services.dashboard.is_some())
                .finish_non_exhaustive(),
            TabBackend::Stub => f.write_str("Stub"),
        }
    }
}

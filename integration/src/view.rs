//! Headless view model published by a browser tab
//!
//! The host draws whatever the latest [`TabView`] describes; it never reads
//! tab state directly.

use embedded_browser_core::*;
use page_manager::{ContextMenuItem, CreateSecretForm, LifecycleState};
use std::sync::Arc;

/// Main area of the tab, in priority order
#[derive(Debug, Clone, PartialEq)]
pub enum ContentView {
    /// Creating or re-creating the browser instance
    Initializing {
        status: String,
        /// Whether a retry counter is part of `status`
        is_retrying: bool,
    },
    /// Terminal failure with a retry button
    Error { message: String },
    /// Page content is fullscreen in its own window
    Fullscreen,
    /// Blank page with host shortcuts
    Dashboard { shortcuts: Vec<DashboardShortcut> },
    /// Live browser content
    Browser,
    /// No usable browser service in this host
    Stub,
}

/// URL bar and navigation controls
#[derive(Debug, Clone, PartialEq)]
pub struct ToolbarView {
    pub address_text: String,
    /// Grey inline completion drawn after the typed text
    pub completion_suffix: Option<String>,
    pub suggestions: Vec<UrlHistoryEntry>,
    pub dropdown_visible: bool,
    /// -1 when no dropdown row is highlighted
    pub selected_suggestion: isize,
    pub can_go_back: bool,
    pub can_go_forward: bool,
    pub is_loading: bool,
    pub is_secure: bool,
    pub is_bookmarked: bool,
    /// Set only when the page is zoomed
    pub zoom_percent: Option<u32>,
}

impl ToolbarView {
    pub fn empty() -> Self {
        Self {
            address_text: String::new(),
            completion_suffix: None,
            suggestions: Vec::new(),
            dropdown_visible: false,
            selected_suggestion: -1,
            can_go_back: false,
            can_go_forward: false,
            is_loading: false,
            is_secure: false,
            is_bookmarked: false,
            zoom_percent: None,
        }
    }
}

/// Row of the "Show All Secrets" dialog
#[derive(Debug, Clone, PartialEq)]
pub struct SecretListItem {
    pub secret: SecretEntry,
    /// Website matches the current page's domain
    pub is_match: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SecretDialogView {
    pub query: String,
    pub current_domain: Option<String>,
    pub items: Vec<SecretListItem>,
    pub is_loaded: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateSecretDialogView {
    pub form: CreateSecretForm,
    pub error: Option<String>,
    pub is_submitting: bool,
}

impl CreateSecretDialogView {
    /// Save is enabled once every field is filled in
    pub fn can_submit(&self) -> bool {
        !self.is_submitting && self.form.validate().is_ok()
    }
}

/// Everything the host needs to draw one browser tab
#[derive(Debug, Clone, PartialEq)]
pub struct TabView {
    /// `None` for stub tabs
    pub lifecycle: Option<LifecycleState>,
    pub content: ContentView,
    pub toolbar: ToolbarView,
    pub title: String,
    pub current_url: String,
    pub favicon_url: Option<String>,
    pub context_menu: Option<Vec<ContextMenuItem>>,
    pub secret_dialog: Option<SecretDialogView>,
    pub create_secret_dialog: Option<CreateSecretDialogView>,
    /// Visited pages, shared with the tab until its next navigation
    pub history: Arc<Vec<NavigationEntry>>,
    pub history_index: isize,
}

impl TabView {
    /// View of a tab whose host has no browser service
    pub fn stub(title: &str) -> Self {
        Self {
            lifecycle: None,
            content: ContentView::Stub,
            toolbar: ToolbarView::empty(),
            title: title.to_string(),
            current_url: String::new(),
            favicon_url: None,
            context_menu: None,
            secret_dialog: None,
            create_secret_dialog: None,
            history: Arc::new(Vec::new()),
            history_index: -1,
        }
    }

    pub fn is_stub(&self) -> bool {
        self.content == ContentView::Stub
    }
}

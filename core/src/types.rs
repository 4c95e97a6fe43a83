//! Core data types shared by the browser tab crates

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Blank page sentinel; the dashboard is shown instead of page content
pub const BLANK_PAGE_URL: &str = "about:blank";

/// URL loaded by a freshly opened browser tab
pub const DEFAULT_TAB_URL: &str = "https://www.risalabs.ai";

/// URL loaded by the side panel browser
pub const DEFAULT_PANEL_URL: &str = "https://www.google.com";

/// Title shown before the page reports one
pub const DEFAULT_TAB_TITLE: &str = "New Tab";

/// Maximum length for browser tab titles
pub const MAX_TITLE_LENGTH: usize = 64;

/// Tab type id registered with the host tab registry
pub const BROWSER_TAB_TYPE_ID: &str = "fluck";

/// Plugin id reported to the host plugin loader
pub const PLUGIN_ID: &str = "ai.rever.boss.plugin.dynamic.fluckbrowser";

/// Side panel id
pub const BROWSER_PANEL_ID: &str = "fluck-browser";

/// Position of the side panel among the host's panels
pub const BROWSER_PANEL_ORDER: u32 = 25;

/// Bookmark collection new bookmarks are added to
pub const DEFAULT_BOOKMARK_COLLECTION: &str = "Favorites";

/// Workspace name attached to new bookmarks
pub const DEFAULT_BOOKMARK_WORKSPACE: &str = "Default";

/// Host-assigned tab identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TabId(pub String);

impl TabId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for TabId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for TabId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Tab type identifier used by the host to pick a tab factory
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TabTypeId(pub String);

impl TabTypeId {
    pub fn browser() -> Self {
        Self(BROWSER_TAB_TYPE_ID.to_string())
    }
}

/// Configuration passed to the host browser factory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrowserConfig {
    pub url: String,
}

impl BrowserConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// Persisted tab data for a browser tab
///
/// Immutable: every update returns a modified copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabData {
    pub id: TabId,
    pub title: String,
    pub initial_url: String,
    pub favicon_cache_key: Option<String>,
}

impl TabData {
    pub fn new(id: TabId) -> Self {
        Self {
            id,
            title: DEFAULT_TAB_TITLE.to_string(),
            initial_url: DEFAULT_TAB_URL.to_string(),
            favicon_cache_key: None,
        }
    }

    pub fn with_initial_url(id: TabId, initial_url: impl Into<String>) -> Self {
        Self {
            initial_url: initial_url.into(),
            ..Self::new(id)
        }
    }

    /// Copy with a new title, truncated to [`MAX_TITLE_LENGTH`] characters
    pub fn update_title(&self, new_title: &str) -> Self {
        Self {
            title: new_title.chars().take(MAX_TITLE_LENGTH).collect(),
            ..self.clone()
        }
    }
}

/// One visited page in a tab's navigation history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationEntry {
    pub title: String,
    pub url: String,
}

impl NavigationEntry {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }
}

/// Transient per-tab page state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabState {
    pub current_url: String,
    pub title: String,
    pub is_loading: bool,
    pub zoom_level: f64,
    pub is_bookmarked: bool,
    pub is_fullscreen: bool,
    pub favicon_url: Option<String>,
    pub error: Option<String>,
}

impl TabState {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            current_url: url.into(),
            title: DEFAULT_TAB_TITLE.to_string(),
            is_loading: false,
            zoom_level: 1.0,
            is_bookmarked: false,
            is_fullscreen: false,
            favicon_url: None,
            error: None,
        }
    }

    /// Security indicator, derived from the URL scheme
    pub fn is_secure(&self) -> bool {
        self.current_url.starts_with("https://")
    }

    /// Whether the zoom indicator should be shown
    pub fn is_zoomed(&self) -> bool {
        (self.zoom_level - 1.0).abs() > 0.001
    }

    /// Zoom as a whole percentage, e.g. `125`
    pub fn zoom_percent(&self) -> u32 {
        (self.zoom_level * 100.0) as u32
    }
}

/// Form field under the cursor when a context menu was requested
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormFieldInfo {
    pub input_type: String,
    pub name: Option<String>,
}

/// Point-in-time page state at a right click
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ContextMenuSnapshot {
    pub selected_text: Option<String>,
    pub link_url: Option<String>,
    pub is_editable: bool,
    pub form_field: Option<FormFieldInfo>,
    pub page_url: String,
    pub has_video: bool,
}

/// Credential record owned by the host secret store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretEntry {
    pub id: String,
    pub website: String,
    pub username: String,
    pub password: String,
    pub notes: Option<String>,
    pub tags: Vec<String>,
}

/// Request to create a secret in the host store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSecretRequest {
    pub website: String,
    pub username: String,
    pub password: String,
}

/// Ranked URL history suggestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlHistoryEntry {
    pub url: String,
    pub title: String,
    pub domain: String,
    pub visit_count: u32,
}

impl UrlHistoryEntry {
    /// Label for the dropdown row, falls back to the domain
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            &self.domain
        } else {
            &self.title
        }
    }

    /// Whether the entry came from a search rather than a site visit
    pub fn is_search(&self) -> bool {
        self.title.to_lowercase().contains("google search")
    }
}

/// Key the host bookmark store uses to identify a tab
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkRecord {
    pub tab_type: String,
    pub title: String,
    pub url: String,
}

impl BookmarkRecord {
    pub fn browser_tab(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            tab_type: BROWSER_TAB_TYPE_ID.to_string(),
            title: title.into(),
            url: url.into(),
        }
    }
}

/// Bookmark to add to a host collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub record: BookmarkRecord,
    pub workspace_name: String,
}

/// Location of an existing bookmark in the host store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkLocation {
    pub collection_id: String,
    pub bookmark_id: String,
}

/// Link offered by the host dashboard on blank pages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardShortcut {
    pub title: String,
    pub url: String,
}

/// Tab type entry installed in the host tab registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabTypeRegistration {
    pub type_id: TabTypeId,
    pub display_name: String,
    pub icon: String,
}

/// Side panel entry installed in the host panel registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelRegistration {
    pub panel_id: String,
    pub display_name: String,
    pub order: u32,
}

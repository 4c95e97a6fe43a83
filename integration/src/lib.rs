/// Integration module for the embedded browser plugin
///
/// Wires the host capabilities, the per-tab page logic and the ambient
/// stack together: one actor task per browser tab, the side panel, plugin
/// registration, configuration, logging and error handling.

use anyhow::Context;
use embedded_browser_core::*;
use page_manager::{RetryPolicy, ToolbarConfig, DIALOG_SECRET_LIMIT, MENU_SECRET_LIMIT};
use std::path::Path;

pub mod error_handler;
pub mod input;
pub mod logger;
pub mod panel;
pub mod plugin;
pub mod tab;
pub mod view;

pub use error_handler::{ErrorEntry, ErrorHandler, ErrorKind, ErrorSeverity, ErrorStatistics};
pub use input::{MouseAction, Shortcut};
pub use logger::{LoggerConfig, TabLogger};
pub use panel::{BrowserPanel, PanelCommand, PanelContent, PanelView};
pub use plugin::BrowserPlugin;
pub use tab::{BrowserTab, TabCommand};
pub use view::*;

/// Plugin configuration
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PluginConfig {
    /// URL opened by tabs whose config declares none
    pub default_url: String,

    /// URL opened by the side panel
    pub panel_url: String,

    /// Browser creation retry and recovery limits
    pub retry: RetryPolicy,

    /// Address bar timing and suggestion limits
    pub toolbar: ToolbarConfig,

    /// Secrets loaded for the "Show All Secrets" dialog
    pub dialog_secret_limit: usize,

    /// Secrets loaded when an editable field is right-clicked
    pub menu_secret_limit: usize,

    /// Log level
    pub log_level: String,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            default_url: DEFAULT_TAB_URL.to_string(),
            panel_url: DEFAULT_PANEL_URL.to_string(),
            retry: RetryPolicy::default(),
            toolbar: ToolbarConfig::default(),
            dialog_secret_limit: DIALOG_SECRET_LIMIT,
            menu_secret_limit: MENU_SECRET_LIMIT,
            log_level: "info".to_string(),
        }
    }
}

impl PluginConfig {
    /// Parse a JSON config; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config = serde_json::from_str(json).map_err(SystemError::from)?;
        Ok(config)
    }

    /// Load a JSON config file
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read plugin config {}", path.display()))?;
        let config = Self::from_json(&contents)
            .with_context(|| format!("invalid plugin config {}", path.display()))?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        let json = serde_json::to_string_pretty(self).map_err(SystemError::from)?;
        Ok(json)
    }

    pub fn logger_config(&self) -> LoggerConfig {
        LoggerConfig::with_level(self.log_level.clone())
    }
}

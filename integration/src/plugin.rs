/// Plugin entry point
///
/// The host loads the plugin, calls [`BrowserPlugin::register`] with its tab
/// registry and asks it for tabs of the registered type.

use crate::error_handler::ErrorHandler;
use crate::panel::BrowserPanel;
use crate::tab::BrowserTab;
use crate::PluginConfig;
use browser_connector::*;
use embedded_browser_core::*;
use std::sync::Arc;
use tracing::info;

pub struct BrowserPlugin {
    config: PluginConfig,
    capabilities: HostCapabilities,
    errors: Arc<ErrorHandler>,
    registry: Option<Arc<dyn TabRegistry>>,
}

impl BrowserPlugin {
    pub const DISPLAY_NAME: &'static str = "Fluck Browser";
    pub const VERSION: &'static str = "1.0.0";
    pub const DESCRIPTION: &'static str =
        "Full-featured embedded web browser tab with zoom, downloads, and secret integration";

    pub fn new(config: PluginConfig, capabilities: HostCapabilities) -> Self {
        Self {
            config,
            capabilities,
            errors: Arc::new(ErrorHandler::new()),
            registry: None,
        }
    }

    pub fn plugin_id(&self) -> &'static str {
        PLUGIN_ID
    }

    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    pub fn error_handler(&self) -> Arc<ErrorHandler> {
        self.errors.clone()
    }

    /// Tab type installed in the host registry
    pub fn tab_type() -> TabTypeRegistration {
        TabTypeRegistration {
            type_id: TabTypeId::browser(),
            display_name: "Browser".to_string(),
            icon: "language".to_string(),
        }
    }

    /// Side panel description offered to hosts with a panel area
    pub fn panel_info() -> PanelRegistration {
        PanelRegistration {
            panel_id: BROWSER_PANEL_ID.to_string(),
            display_name: "Browser".to_string(),
            order: BROWSER_PANEL_ORDER,
        }
    }

    pub fn is_registered(&self) -> bool {
        self.registry.is_some()
    }

    pub fn register(&mut self, registry: Arc<dyn TabRegistry>) {
        registry.register_tab_type(Self::tab_type());
        self.registry = Some(registry);
        info!("Registered {} {} as tab type {}", Self::DISPLAY_NAME, Self::VERSION, BROWSER_TAB_TYPE_ID);
    }

    /// Unregister the tab type; safe to call more than once
    pub fn dispose(&mut self) {
        if let Some(registry) = self.registry.take() {
            registry.unregister_tab_type(&TabTypeId::browser());
            info!("Unregistered tab type {}", BROWSER_TAB_TYPE_ID);
        }
    }

    /// Tab factory used by the host for the registered type
    pub fn create_tab(&self, info: &dyn TabInfo) -> Result<BrowserTab> {
        if !self.is_registered() {
            return Err(SystemError::Configuration {
                details: "plugin is not registered".to_string(),
            }
            .into());
        }
        Ok(BrowserTab::spawn(info, &self.capabilities, &self.config, self.errors.clone()))
    }

    pub fn create_panel(&self) -> BrowserPanel {
        BrowserPanel::spawn(&self.capabilities, &self.config.panel_url)
    }
}

impl Drop for BrowserPlugin {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Logger setup for the browser plugin
///
/// The plugin runs inside a host process, so a bare level only applies to
/// the plugin's own crates; everything else stays at `warn`.

use anyhow::Context;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Crates whose output the configured level controls
const PLUGIN_TARGETS: [&str; 4] = ["integration", "page_manager", "browser_connector", "embedded_browser_core"];

/// Logger configuration
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Log level (trace, debug, info, warn, error) or a full filter directive
    pub level: String,

    /// Include thread IDs
    pub include_thread_ids: bool,

    /// Include target module paths
    pub include_targets: bool,

    /// Colored output
    pub ansi: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            include_thread_ids: false,
            include_targets: true,
            ansi: true,
        }
    }
}

impl LoggerConfig {
    /// Default layout with the given level
    pub fn with_level(level: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            ..Self::default()
        }
    }

    /// Filter directive for [`EnvFilter`]
    ///
    /// Strings that already contain a directive are used unchanged.
    pub fn directive(&self) -> String {
        let level = self.level.trim();
        if level.contains('=') || level.contains(',') {
            return level.to_string();
        }

        let mut directive = String::from("warn");
        for target in PLUGIN_TARGETS {
            directive.push_str(&format!(",{}={}", target, level));
        }
        directive
    }
}

/// Global tracing subscriber for the plugin
pub struct TabLogger;

impl TabLogger {
    /// Install the global subscriber
    ///
    /// `RUST_LOG` wins over the configured level when set. Returns `false`
    /// when the host already installed a subscriber; plugin events then go
    /// to the host's.
    pub fn init(config: LoggerConfig) -> anyhow::Result<bool> {
        if tracing::dispatcher::has_been_set() {
            tracing::debug!("Host tracing subscriber already installed, keeping it");
            return Ok(false);
        }

        let directive = config.directive();
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&directive))
            .with_context(|| format!("invalid log level: {}", config.level))?;

        let console_layer = fmt::layer()
            .with_target(config.include_targets)
            .with_thread_ids(config.include_thread_ids)
            .with_ansi(config.ansi);

        tracing_subscriber::registry()
            .with(filter)
            .with(console_layer)
            .try_init()
            .context("failed to install tracing subscriber")?;

        tracing::info!("Logging initialized with filter: {}", directive);
        Ok(true)
    }

    pub fn init_default() -> anyhow::Result<bool> {
        Self::init(LoggerConfig::default())
    }
}

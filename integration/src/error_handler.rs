/// Error handler for the browser plugin
///
/// Every caught failure that is not surfaced to the user passes through
/// here: it is logged at a severity picked from its kind and kept in a
/// bounded list for diagnostics.

use embedded_browser_core::*;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

/// Default number of entries kept
const MAX_RECENT_ERRORS: usize = 100;

/// Error severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ErrorSeverity {
    /// The tab is unusable until the user acts
    Critical,
    /// A user-visible operation failed
    Error,
    /// Degraded behavior, e.g. a host provider call failed
    Warning,
    /// Expected outcome such as a validation message
    Info,
}

impl ErrorSeverity {
    pub fn of(error: &BrowserTabError) -> Self {
        match error {
            BrowserTabError::Browser { source } => match source {
                BrowserError::CreationExhausted { .. } | BrowserError::RecoveryExhausted { .. } => Self::Critical,
                BrowserError::NavigationFailed { .. } => Self::Error,
                BrowserError::NoInstance { .. }
                | BrowserError::CreationFailed { .. }
                | BrowserError::InvalidHandle => Self::Warning,
            },
            BrowserTabError::Provider { .. } => Self::Warning,
            BrowserTabError::Secret {
                source: SecretError::MissingField { .. },
            } => Self::Info,
            BrowserTabError::Secret { .. } => Self::Error,
            BrowserTabError::System {
                source: SystemError::TabClosed,
            } => Self::Info,
            BrowserTabError::System { .. } => Self::Error,
        }
    }
}

/// Broad origin of a recorded error
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    Browser,
    Provider,
    Secret,
    System,
}

impl From<&BrowserTabError> for ErrorKind {
    fn from(error: &BrowserTabError) -> Self {
        match error {
            BrowserTabError::Browser { .. } => Self::Browser,
            BrowserTabError::Provider { .. } => Self::Provider,
            BrowserTabError::Secret { .. } => Self::Secret,
            BrowserTabError::System { .. } => Self::System,
        }
    }
}

/// One recorded failure
#[derive(Debug, Clone)]
pub struct ErrorEntry {
    pub message: String,
    pub kind: ErrorKind,
    pub severity: ErrorSeverity,
    /// Operation that failed, e.g. "browser creation"
    pub context: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Shared error handler, one per plugin instance
pub struct ErrorHandler {
    recent: Arc<RwLock<VecDeque<ErrorEntry>>>,
    capacity: usize,
}

impl ErrorHandler {
    pub fn new() -> Self {
        Self::with_capacity(MAX_RECENT_ERRORS)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            recent: Arc::new(RwLock::new(VecDeque::with_capacity(capacity))),
            capacity: capacity.max(1),
        }
    }

    /// Log and record an error
    pub async fn handle_error(&self, error: &BrowserTabError, context: &str) {
        let severity = ErrorSeverity::of(error);
        match severity {
            ErrorSeverity::Critical => error!(context, %error, "browser tab unusable"),
            ErrorSeverity::Error => error!(context, %error, "operation failed"),
            ErrorSeverity::Warning => warn!(context, %error, "operation degraded"),
            ErrorSeverity::Info => info!(context, %error, "operation rejected"),
        }

        let entry = ErrorEntry {
            message: error.to_string(),
            kind: ErrorKind::from(error),
            severity,
            context: context.to_string(),
            timestamp: chrono::Utc::now(),
        };

        let mut recent = self.recent.write().await;
        if recent.len() == self.capacity {
            recent.pop_front();
        }
        recent.push_back(entry);
    }

    /// Oldest first
    pub async fn get_recent_errors(&self) -> Vec<ErrorEntry> {
        self.recent.read().await.iter().cloned().collect()
    }

    pub async fn get_error_stats(&self) -> ErrorStatistics {
        let recent = self.recent.read().await;
        recent.iter().fold(ErrorStatistics::default(), |mut stats, entry| {
            stats.total += 1;
            match entry.severity {
                ErrorSeverity::Critical => {
                    stats.critical += 1;
                    stats.last_critical = Some(entry.message.clone());
                }
                ErrorSeverity::Error => stats.errors += 1,
                ErrorSeverity::Warning => stats.warnings += 1,
                ErrorSeverity::Info => stats.info += 1,
            }
            stats
        })
    }

    pub async fn clear_errors(&self) {
        self.recent.write().await.clear();
    }
}

impl Default for ErrorHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Error counts by severity
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ErrorStatistics {
    pub total: usize,
    pub critical: usize,
    pub errors: usize,
    pub warnings: usize,
    pub info: usize,
    /// Message of the most recent critical failure
    pub last_critical: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_records_provider_failure() {
        let handler = ErrorHandler::new();
        assert_eq!(handler.get_error_stats().await, ErrorStatistics::default());

        let error = BrowserTabError::provider("save_history", "disk full");
        handler.handle_error(&error, "url history").await;

        let errors = handler.get_recent_errors().await;
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].context, "url history");
        assert_eq!(errors[0].kind, ErrorKind::Provider);
        assert_eq!(errors[0].severity, ErrorSeverity::Warning);
    }

    #[test]
    fn test_severity_by_kind() {
        let error: BrowserTabError = BrowserError::RecoveryExhausted { attempts: 5 }.into();
        assert_eq!(ErrorSeverity::of(&error), ErrorSeverity::Critical);

        let error: BrowserTabError = SecretError::MissingField { field: "password".to_string() }.into();
        assert_eq!(ErrorSeverity::of(&error), ErrorSeverity::Info);

        let error: BrowserTabError = SecretError::FillFailed { reason: "no form".to_string() }.into();
        assert_eq!(ErrorSeverity::of(&error), ErrorSeverity::Error);
    }

    #[tokio::test]
    async fn test_oldest_entries_are_evicted() {
        let handler = ErrorHandler::with_capacity(10);
        for i in 0..15 {
            let error: BrowserTabError = BrowserError::CreationFailed { reason: format!("attempt {}", i) }.into();
            handler.handle_error(&error, "browser creation").await;
        }
        let error: BrowserTabError = BrowserError::CreationExhausted { attempts: 3 }.into();
        handler.handle_error(&error, "browser lifecycle").await;

        let errors = handler.get_recent_errors().await;
        assert_eq!(errors.len(), 10);
        assert!(errors[0].message.ends_with("attempt 6"));

        let stats = handler.get_error_stats().await;
        assert_eq!(stats.critical, 1);
        assert_eq!(stats.warnings, 9);
        assert_eq!(stats.last_critical.as_deref(), Some("Browser error: Failed to create browser instance after 3 attempts"));

        handler.clear_errors().await;
        assert_eq!(handler.get_error_stats().await.total, 0);
    }
}

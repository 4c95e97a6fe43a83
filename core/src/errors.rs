use thiserror::Error;

/// Browser creation and runtime errors
#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("Browser factory returned no instance for {url}")]
    NoInstance { url: String },

    #[error("Browser creation failed: {reason}")]
    CreationFailed { reason: String },

    #[error("Failed to create browser instance after {attempts} attempts")]
    CreationExhausted { attempts: u32 },

    #[error("Browser recovery failed after {attempts} attempts. Please close and reopen this tab.")]
    RecoveryExhausted { attempts: u32 },

    #[error("Browser instance is no longer valid")]
    InvalidHandle,

    #[error("Navigation failed: {url}")]
    NavigationFailed { url: String },
}

/// Errors reported by host-provided services
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Provider not available: {provider}")]
    Unavailable { provider: String },

    #[error("Provider call failed: {operation}: {reason}")]
    CallFailed { operation: String, reason: String },
}

/// Secret store related errors
#[derive(Debug, Error)]
pub enum SecretError {
    #[error("Failed to load secrets: {reason}")]
    LoadFailed { reason: String },

    #[error("Failed to create secret")]
    CreateFailed { reason: Option<String> },

    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Credential fill failed: {reason}")]
    FillFailed { reason: String },
}

impl SecretError {
    /// Text shown inline in the secret dialog
    pub fn user_message(&self) -> String {
        match self {
            SecretError::CreateFailed { reason: Some(reason) } => reason.clone(),
            other => other.to_string(),
        }
    }
}

/// General system errors
#[derive(Debug, Error)]
pub enum SystemError {
    #[error("Configuration error: {details}")]
    Configuration { details: String },

    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },

    #[error("Tab closed")]
    TabClosed,
}

/// Main error type for the browser tab
#[derive(Debug, Error)]
pub enum BrowserTabError {
    #[error("Browser error: {source}")]
    Browser {
        #[from]
        source: BrowserError,
    },

    #[error("Provider error: {source}")]
    Provider {
        #[from]
        source: ProviderError,
    },

    #[error("Secret error: {source}")]
    Secret {
        #[from]
        source: SecretError,
    },

    #[error("System error: {source}")]
    System {
        #[from]
        source: SystemError,
    },
}

impl BrowserTabError {
    /// Shorthand for a failed host provider call
    pub fn provider(operation: &str, reason: impl ToString) -> Self {
        ProviderError::CallFailed {
            operation: operation.to_string(),
            reason: reason.to_string(),
        }
        .into()
    }

    /// Message of the wrapped error without the category prefix
    pub fn source_message(&self) -> String {
        match self {
            BrowserTabError::Browser { source } => source.to_string(),
            BrowserTabError::Provider { source } => source.to_string(),
            BrowserTabError::Secret { source } => source.to_string(),
            BrowserTabError::System { source } => source.to_string(),
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, BrowserTabError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_messages_name_attempts() {
        let err = BrowserError::CreationExhausted { attempts: 3 };
        assert_eq!(err.to_string(), "Failed to create browser instance after 3 attempts");

        let err = BrowserError::RecoveryExhausted { attempts: 5 };
        assert!(err.to_string().contains("after 5 attempts"));
    }

    #[test]
    fn test_secret_user_message() {
        let err = SecretError::CreateFailed { reason: None };
        assert_eq!(err.user_message(), "Failed to create secret");

        let err = SecretError::CreateFailed { reason: Some("Duplicate entry".to_string()) };
        assert_eq!(err.user_message(), "Duplicate entry");
    }

    #[test]
    fn test_source_message_drops_category() {
        let err: BrowserTabError = BrowserError::CreationFailed { reason: "gpu lost".to_string() }.into();
        assert_eq!(err.to_string(), "Browser error: Browser creation failed: gpu lost");
        assert_eq!(err.source_message(), "Browser creation failed: gpu lost");

        let err: BrowserTabError = SystemError::TabClosed.into();
        assert_eq!(err.source_message(), "Tab closed");
    }
}

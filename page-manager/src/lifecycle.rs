//! Browser lifecycle state machine
//!
//! Tracks one tab's browser instance through creation, retry with
//! exponential backoff, periodic health checks, bounded automatic recovery
//! and terminal failure. The machine is synchronous; the owning tab feeds it
//! creation results and health-check observations and schedules whatever
//! delay it hands back.
//!
//! ```text
//!   Initializing --created--> Active --invalid--> Recovering --created--> Active
//!        |  ^                                        |  ^
//!        |  +--failed, retries left                  |  +--failed, attempts left
//!        +--failed, exhausted--> Failed <--exhausted-+
//!                                  |
//!                                  +--manual retry--> Initializing
//! ```

use embedded_browser_core::{BrowserError, BLANK_PAGE_URL};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, warn};

/// Lifecycle states of a tab's browser instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifecycleState {
    /// Creating the first instance, possibly after failed attempts
    Initializing,
    /// Instance live and listeners attached
    Active,
    /// Re-creating an instance that became invalid
    Recovering,
    /// Gave up; only a manual retry leaves this state
    Failed,
}

/// Retry and recovery limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Retries after the first failed creation
    pub max_creation_retries: u32,
    /// Re-creation attempts per invalidation
    pub max_recovery_attempts: u32,
    /// First backoff delay, doubled on every further attempt
    pub backoff_base_ms: u64,
    /// Interval between validity checks of a live instance
    pub health_check_interval_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_creation_retries: 3,
            max_recovery_attempts: 5,
            backoff_base_ms: 100,
            health_check_interval_ms: 2000,
        }
    }
}

impl RetryPolicy {
    /// Delay before attempt `attempt` (1-based): base × 2^(attempt-1)
    pub fn backoff(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }
        let factor = 1u64.checked_shl(attempt - 1).unwrap_or(u64::MAX);
        Duration::from_millis(self.backoff_base_ms.saturating_mul(factor))
    }

    pub fn health_check_interval(&self) -> Duration {
        Duration::from_millis(self.health_check_interval_ms)
    }
}

/// What the tab should do after a failed creation
#[derive(Debug, Clone, PartialEq)]
pub enum CreationOutcome {
    /// Try again after `delay`
    Retry { attempt: u32, delay: Duration },
    /// Terminal; show `message` with a retry button
    Failed { message: String },
    /// No creation was in progress
    Ignored,
}

/// How an instance became active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    Fresh,
    Recovered { attempts: u32 },
}

/// Result of one health-check tick
#[derive(Debug, Clone, PartialEq)]
pub enum HealthOutcome {
    Healthy,
    /// Discard the handle and re-create it at `target_url`
    Recover { attempt: u32, target_url: String },
    /// Terminal; the tab must be closed and reopened
    Failed { message: String },
    /// Not active, nothing to check
    Idle,
}

/// Lifecycle of the browser instance behind one tab
#[derive(Debug, Clone)]
pub struct BrowserLifecycle {
    policy: RetryPolicy,
    state: LifecycleState,
    creation_attempts: u32,
    recovery_attempts: u32,
    target_url: String,
    pending_delay: Option<Duration>,
    error: Option<String>,
}

impl BrowserLifecycle {
    pub fn new(policy: RetryPolicy, initial_url: impl Into<String>) -> Self {
        Self {
            policy,
            state: LifecycleState::Initializing,
            creation_attempts: 0,
            recovery_attempts: 0,
            target_url: initial_url.into(),
            pending_delay: Some(Duration::ZERO),
            error: None,
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub fn creation_attempts(&self) -> u32 {
        self.creation_attempts
    }

    pub fn recovery_attempts(&self) -> u32 {
        self.recovery_attempts
    }

    /// URL the next created instance should open
    pub fn target_url(&self) -> &str {
        &self.target_url
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Health checks only run against a live instance
    pub fn should_check_health(&self) -> bool {
        self.state == LifecycleState::Active
    }

    /// Delay before the next creation attempt, consumed by the caller
    pub fn take_pending_delay(&mut self) -> Option<Duration> {
        self.pending_delay.take()
    }

    /// A creation attempt produced a handle
    pub fn on_creation_succeeded(&mut self) -> Activation {
        let activation = match self.state {
            LifecycleState::Recovering => {
                let attempts = self.recovery_attempts;
                info!("Browser recovered successfully after {} attempt(s), resetting recovery counter", attempts);
                self.recovery_attempts = 0;
                Activation::Recovered { attempts }
            }
            _ => Activation::Fresh,
        };

        self.state = LifecycleState::Active;
        self.creation_attempts = 0;
        self.pending_delay = None;
        self.error = None;
        activation
    }

    /// A creation attempt returned an error or no handle
    pub fn on_creation_failed(&mut self, reason: &str) -> CreationOutcome {
        match self.state {
            LifecycleState::Initializing => {
                if self.creation_attempts < self.policy.max_creation_retries {
                    self.creation_attempts += 1;
                    let delay = self.policy.backoff(self.creation_attempts);
                    warn!(
                        "Browser creation failed ({}), retrying ({}/{}) in {:?}",
                        reason, self.creation_attempts, self.policy.max_creation_retries, delay
                    );
                    self.pending_delay = Some(delay);
                    CreationOutcome::Retry {
                        attempt: self.creation_attempts,
                        delay,
                    }
                } else {
                    let error = BrowserError::CreationExhausted {
                        attempts: self.policy.max_creation_retries,
                    };
                    self.fail(error, reason)
                }
            }
            LifecycleState::Recovering => {
                if self.recovery_attempts < self.policy.max_recovery_attempts {
                    self.recovery_attempts += 1;
                    let delay = self.policy.backoff(self.recovery_attempts - 1);
                    warn!(
                        "Browser re-creation failed ({}), recovery attempt {}/{} in {:?}",
                        reason, self.recovery_attempts, self.policy.max_recovery_attempts, delay
                    );
                    self.pending_delay = Some(delay);
                    CreationOutcome::Retry {
                        attempt: self.recovery_attempts,
                        delay,
                    }
                } else {
                    let error = BrowserError::RecoveryExhausted {
                        attempts: self.policy.max_recovery_attempts,
                    };
                    self.fail(error, reason)
                }
            }
            LifecycleState::Active | LifecycleState::Failed => CreationOutcome::Ignored,
        }
    }

    /// One health-check observation of the live handle
    ///
    /// `last_known_url` is preserved as the recovery target unless it is
    /// blank or the blank-page sentinel.
    pub fn on_health_check(&mut self, handle_valid: bool, last_known_url: &str) -> HealthOutcome {
        if self.state != LifecycleState::Active {
            return HealthOutcome::Idle;
        }
        if handle_valid {
            return HealthOutcome::Healthy;
        }

        let url = last_known_url.trim();
        if !url.is_empty() && url != BLANK_PAGE_URL {
            self.target_url = url.to_string();
        }

        if self.recovery_attempts >= self.policy.max_recovery_attempts {
            let error = BrowserError::RecoveryExhausted {
                attempts: self.policy.max_recovery_attempts,
            };
            return match self.fail(error, "instance invalid") {
                CreationOutcome::Failed { message } => HealthOutcome::Failed { message },
                _ => HealthOutcome::Idle,
            };
        }

        self.recovery_attempts += 1;
        self.state = LifecycleState::Recovering;
        self.pending_delay = Some(Duration::ZERO);
        warn!(
            "Browser invalid, triggering recovery (attempt {}/{})",
            self.recovery_attempts, self.policy.max_recovery_attempts
        );
        HealthOutcome::Recover {
            attempt: self.recovery_attempts,
            target_url: self.target_url.clone(),
        }
    }

    /// Manual retry from the error view; resets both counters
    pub fn retry(&mut self) -> bool {
        if self.state != LifecycleState::Failed {
            return false;
        }
        info!("Manual browser retry requested");
        self.state = LifecycleState::Initializing;
        self.creation_attempts = 0;
        self.recovery_attempts = 0;
        self.error = None;
        self.pending_delay = Some(Duration::ZERO);
        true
    }

    /// Progress text while no instance is live
    pub fn status_text(&self) -> Option<String> {
        match self.state {
            LifecycleState::Initializing if self.creation_attempts > 0 => Some(format!(
                "Retrying... ({}/{})",
                self.creation_attempts, self.policy.max_creation_retries
            )),
            LifecycleState::Initializing => Some("Initializing browser...".to_string()),
            LifecycleState::Recovering => Some(format!(
                "Recovering browser... ({}/{})",
                self.recovery_attempts, self.policy.max_recovery_attempts
            )),
            LifecycleState::Active | LifecycleState::Failed => None,
        }
    }

    /// Whether a retry counter is currently shown
    pub fn is_retrying(&self) -> bool {
        matches!(self.state, LifecycleState::Initializing if self.creation_attempts > 0)
            || self.state == LifecycleState::Recovering
    }

    fn fail(&mut self, error: BrowserError, reason: &str) -> CreationOutcome {
        let message = error.to_string();
        tracing::error!("Browser lifecycle failed: {} (last reason: {})", message, reason);
        self.state = LifecycleState::Failed;
        self.pending_delay = None;
        self.error = Some(message.clone());
        CreationOutcome::Failed { message }
    }
}

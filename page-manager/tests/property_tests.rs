//! Property-based tests for the per-tab page logic
//!
//! Navigation history keeps its index in bounds and drops forward entries
//! on append; the browser lifecycle never exceeds its retry limits.

use page_manager::*;
use proptest::prelude::*;

// ============================================================================
// Test Data Generators
// ============================================================================

/// Generate a URL from a small pool so consecutive duplicates happen
fn arb_url() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "https://example.com",
        "https://example.com/page",
        "https://rust-lang.org",
        "https://github.com",
        "https://docs.rs",
        "https://crates.io",
    ])
    .prop_map(|s| s.to_string())
}

#[derive(Debug, Clone)]
enum HistoryOp {
    Append(String),
    Back,
    Forward,
}

fn arb_history_op() -> impl Strategy<Value = HistoryOp> {
    prop_oneof![
        3 => arb_url().prop_map(HistoryOp::Append),
        1 => Just(HistoryOp::Back),
        1 => Just(HistoryOp::Forward),
    ]
}

#[derive(Debug, Clone)]
enum LifecycleEvent {
    Created,
    CreationFailed,
    HealthCheck(bool),
    ManualRetry,
}

fn arb_lifecycle_event() -> impl Strategy<Value = LifecycleEvent> {
    prop_oneof![
        1 => Just(LifecycleEvent::Created),
        3 => Just(LifecycleEvent::CreationFailed),
        1 => any::<bool>().prop_map(LifecycleEvent::HealthCheck),
        1 => Just(LifecycleEvent::ManualRetry),
    ]
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// The index always points at an entry, or is -1 for an empty history
    #[test]
    fn prop_history_index_stays_in_bounds(ops in prop::collection::vec(arb_history_op(), 0..40)) {
        let mut history = NavigationHistory::new();
        for op in ops {
            match op {
                HistoryOp::Append(url) => { history.append("title", &url); }
                HistoryOp::Back => { history.back(); }
                HistoryOp::Forward => { history.forward(); }
            }

            if history.is_empty() {
                prop_assert_eq!(history.index(), -1);
            } else {
                prop_assert!(history.index() >= 0);
                prop_assert!((history.index() as usize) < history.len());
            }
            prop_assert_eq!(history.can_go_back(), history.index() > 0);
        }
    }

    /// An accepted append leaves the new entry as the last and current one
    #[test]
    fn prop_append_truncates_forward_entries(
        urls in prop::collection::vec(arb_url(), 1..10),
        back_steps in 0usize..10,
        next in arb_url(),
    ) {
        let mut history = NavigationHistory::new();
        for url in &urls {
            history.append("title", url);
        }
        for _ in 0..back_steps {
            history.back();
        }

        let index_before = history.index();
        if history.append("next", &next) {
            prop_assert_eq!(history.len() as isize, index_before + 2);
            prop_assert_eq!(history.index() as usize, history.len() - 1);
            prop_assert!(!history.can_go_forward());
            prop_assert_eq!(history.current().map(|e| e.url.clone()), Some(next));
        }
    }

    /// No two consecutive entries share a URL when appending at the tail
    #[test]
    fn prop_no_consecutive_duplicates(urls in prop::collection::vec(arb_url(), 0..30)) {
        let mut history = NavigationHistory::new();
        for url in &urls {
            history.append("title", url);
        }
        for pair in history.entries().windows(2) {
            prop_assert_ne!(&pair[0].url, &pair[1].url);
        }
    }

    /// Retry counters never exceed the policy limits, and every failure
    /// message names the configured limit
    #[test]
    fn prop_lifecycle_respects_limits(events in prop::collection::vec(arb_lifecycle_event(), 0..60)) {
        let policy = RetryPolicy::default();
        let mut lifecycle = BrowserLifecycle::new(policy.clone(), "https://example.com");

        for event in events {
            match event {
                LifecycleEvent::Created => {
                    if matches!(lifecycle.state(), LifecycleState::Initializing | LifecycleState::Recovering) {
                        lifecycle.on_creation_succeeded();
                    }
                }
                LifecycleEvent::CreationFailed => {
                    if let CreationOutcome::Retry { delay, attempt } = lifecycle.on_creation_failed("boom") {
                        prop_assert!(delay <= policy.backoff(attempt));
                    }
                }
                LifecycleEvent::HealthCheck(valid) => {
                    lifecycle.on_health_check(valid, "https://example.com/current");
                }
                LifecycleEvent::ManualRetry => {
                    lifecycle.retry();
                }
            }

            prop_assert!(lifecycle.creation_attempts() <= policy.max_creation_retries);
            prop_assert!(lifecycle.recovery_attempts() <= policy.max_recovery_attempts);
            prop_assert_eq!(lifecycle.should_check_health(), lifecycle.state() == LifecycleState::Active);
            if lifecycle.state() == LifecycleState::Failed {
                prop_assert!(lifecycle.error().is_some());
            }
        }
    }
}

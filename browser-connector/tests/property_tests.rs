//! Property-based tests for the host capability layer
//!
//! Event sinks deliver every event in emission order until the receiver is
//! dropped, and a tab's start URL is always non-blank.

use browser_connector::*;
use embedded_browser_core::*;
use proptest::prelude::*;

// ============================================================================
// Test Data Generators
// ============================================================================

fn arb_event() -> impl Strategy<Value = BrowserEvent> {
    prop_oneof![
        "https://[a-z]{3,10}\\.[a-z]{2,4}(/[a-z0-9]{0,10})?".prop_map(|url| BrowserEvent::Navigated { url }),
        "[A-Za-z ]{0,20}".prop_map(|title| BrowserEvent::TitleChanged { title }),
        any::<bool>().prop_map(|is_loading| BrowserEvent::LoadingChanged { is_loading }),
        (0.25f64..5.0).prop_map(|level| BrowserEvent::ZoomChanged { level }),
        Just(BrowserEvent::FullscreenEntered),
        Just(BrowserEvent::FullscreenExited),
    ]
}

/// Initial URLs as hosts persist them, blanks included
fn arb_initial_url() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        " {1,4}",
        "https://[a-z]{3,10}\\.[a-z]{2,4}",
        " ?https://[a-z]{3,10}\\.com ?",
    ]
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Every emitted event arrives once, in order
    #[test]
    fn prop_sink_preserves_order(events in prop::collection::vec(arb_event(), 0..30)) {
        let (sink, mut receiver) = EventSink::channel();
        for event in &events {
            prop_assert!(sink.emit(event.clone()));
        }

        let mut received = Vec::new();
        while let Ok(event) = receiver.try_recv() {
            received.push(event);
        }
        prop_assert_eq!(received, events);
    }

    /// Once the receiver is gone nothing is accepted
    #[test]
    fn prop_sink_rejects_after_drop(events in prop::collection::vec(arb_event(), 1..10)) {
        let (sink, receiver) = EventSink::channel();
        drop(receiver);
        for event in events {
            prop_assert!(!sink.emit(event));
        }
    }

    /// The start URL is the trimmed declared URL, or the fallback when blank
    #[test]
    fn prop_initial_url_never_blank(url in arb_initial_url()) {
        let data = TabData::with_initial_url(TabId::from("tab"), url.clone());
        let resolved = initial_url_of(&data, DEFAULT_TAB_URL);

        prop_assert!(!resolved.trim().is_empty());
        if url.trim().is_empty() {
            prop_assert_eq!(resolved, DEFAULT_TAB_URL);
        } else {
            prop_assert_eq!(resolved, url.trim());
        }
    }
}

// Property: address-bar interpretation always yields something loadable and
// is stable when applied to its own output; registrable-domain extraction
// ignores any number of subdomain labels.

use proptest::prelude::*;
use embedded_browser_core::*;

// Strategy for generating host labels
fn arb_label() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{1,10}"
}

// Strategy for generating free-form address-bar text
fn arb_input() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9 ]{1,30}",
        "[a-z]{2,10}\\.[a-z]{2,4}(/[a-z0-9]{0,10})?",
        "https?://[a-z]{2,10}\\.[a-z]{2,4}",
        "localhost(:[0-9]{2,5})?",
    ]
    .prop_filter("non-blank input", |s| !s.trim().is_empty())
}

proptest! {
    #[test]
    fn prop_interpretation_is_stable(input in arb_input()) {
        let once = interpret_url_input(&input);
        let twice = interpret_url_input(&once);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_interpretation_has_scheme(input in arb_input()) {
        let url = interpret_url_input(&input);
        prop_assert!(url.starts_with("http://") || url.starts_with("https://"));
    }

    #[test]
    fn prop_text_with_whitespace_is_searched(a in "[a-z]{1,8}", b in "[a-z]{1,8}") {
        let url = interpret_url_input(&format!("{} {}", a, b));
        prop_assert!(url.starts_with(url_input::SEARCH_URL_PREFIX));
        let expected = format!("{}%20{}", a, b);
        prop_assert!(url.ends_with(&expected));
    }

    #[test]
    fn prop_subdomains_do_not_change_registrable_domain(
        subdomains in prop::collection::vec(arb_label(), 0..4),
        name in arb_label(),
    ) {
        let mut host = subdomains.join(".");
        if !host.is_empty() {
            host.push('.');
        }
        host.push_str(&name);
        host.push_str(".com");

        let domain = registrable_domain(&format!("https://{}/path", host));
        prop_assert_eq!(domain, Some(format!("{}.com", name)));
    }
}

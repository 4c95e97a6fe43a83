//! Address-bar input interpretation
//!
//! Turns free-form text typed into the URL bar into something the browser
//! can load. Classification is purely syntactic, nothing is resolved over
//! the network, so a dotted word such as `report.v2` is treated as a host.

use crate::types::BLANK_PAGE_URL;
use regex::Regex;
use std::sync::LazyLock;

/// Query URL used for anything that does not look like an address
pub const SEARCH_URL_PREFIX: &str = "https://www.google.com/search?q=";

const KNOWN_SCHEMES: [&str; 5] = ["http://", "https://", "file://", "javascript:", "chrome://"];

static DOMAIN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([a-zA-Z0-9-]+\.)+[a-zA-Z]{2,}(/.*)?$").expect("valid domain pattern"));

static LOCALHOST_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^localhost(:\d+)?(/.*)?$").expect("valid localhost pattern"));

static LOOPBACK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^127\.0\.0\.1(:\d+)?(/.*)?$").expect("valid loopback pattern"));

/// Interpret address-bar text as a loadable URL
///
/// Rules, first match wins:
/// 1. a recognised scheme is returned unchanged
/// 2. `localhost` / `127.0.0.1` (optional port and path) gets `http://`
/// 3. dotted text without whitespace, or a `label.tld` shape, gets `https://`
/// 4. anything else becomes a search query
pub fn interpret_url_input(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return BLANK_PAGE_URL.to_string();
    }

    let lower = trimmed.to_lowercase();
    if KNOWN_SCHEMES.iter().any(|scheme| lower.starts_with(scheme)) {
        return trimmed.to_string();
    }

    if LOCALHOST_PATTERN.is_match(trimmed) || LOOPBACK_PATTERN.is_match(trimmed) {
        return format!("http://{}", trimmed);
    }

    let looks_like_url = trimmed.contains('.') && !trimmed.chars().any(char::is_whitespace);
    if looks_like_url || DOMAIN_PATTERN.is_match(trimmed) {
        return format!("https://{}", trimmed);
    }

    search_url(trimmed)
}

/// Search-engine URL for a query
pub fn search_url(query: &str) -> String {
    format!("{}{}", SEARCH_URL_PREFIX, urlencoding::encode(query))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_urls_unchanged() {
        assert_eq!(interpret_url_input("http://x"), "http://x");
        assert_eq!(interpret_url_input("HTTPS://Example.com"), "HTTPS://Example.com");
        assert_eq!(interpret_url_input("file:///tmp/a.html"), "file:///tmp/a.html");
        assert_eq!(interpret_url_input("javascript:void(0)"), "javascript:void(0)");
        assert_eq!(interpret_url_input("chrome://settings"), "chrome://settings");
    }

    #[test]
    fn test_domains_get_https() {
        assert_eq!(interpret_url_input("github.com"), "https://github.com");
        assert_eq!(interpret_url_input("  docs.rs/tokio  "), "https://docs.rs/tokio");
        // documented misclassification
        assert_eq!(interpret_url_input("report.v2"), "https://report.v2");
    }

    #[test]
    fn test_localhost_gets_http() {
        assert_eq!(interpret_url_input("localhost:3000"), "http://localhost:3000");
        assert_eq!(interpret_url_input("localhost"), "http://localhost");
        assert_eq!(interpret_url_input("127.0.0.1:8080/api"), "http://127.0.0.1:8080/api");
    }

    #[test]
    fn test_search_queries() {
        assert_eq!(
            interpret_url_input("hello world"),
            "https://www.google.com/search?q=hello%20world"
        );
        assert_eq!(interpret_url_input("rust"), "https://www.google.com/search?q=rust");
        assert_eq!(
            interpret_url_input("what is a.b"),
            "https://www.google.com/search?q=what%20is%20a.b"
        );
    }

    #[test]
    fn test_blank_input() {
        assert_eq!(interpret_url_input("   "), BLANK_PAGE_URL);
    }
}

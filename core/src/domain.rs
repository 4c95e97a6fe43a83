//! Registrable-domain extraction used for credential matching

use url::Url;

/// Public suffixes made of two labels that must not be treated as a domain
const MULTI_LABEL_SUFFIXES: [&str; 6] = ["co.uk", "com.au", "co.jp", "co.nz", "com.br", "co.in"];

/// Extract the registrable domain from a URL
///
/// `https://mail.google.com/inbox` -> `google.com`,
/// `https://www.bbc.co.uk` -> `bbc.co.uk`. Loopback hosts are returned as is.
/// Returns `None` when the input has no host, which includes bare domains
/// without a scheme.
pub fn registrable_domain(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?;

    if host == "localhost" || host.starts_with("127.") {
        return Some(host.to_string());
    }

    let parts: Vec<&str> = host.split('.').collect();
    if parts.len() < 2 {
        return Some(host.to_string());
    }

    let last_two = format!("{}.{}", parts[parts.len() - 2], parts[parts.len() - 1]);
    if MULTI_LABEL_SUFFIXES.contains(&last_two.as_str()) && parts.len() >= 3 {
        Some(format!("{}.{}", parts[parts.len() - 3], last_two))
    } else {
        Some(last_two)
    }
}

/// Human-readable site name, e.g. `Github.com` for `https://github.com/login`
pub fn display_name(website: &str) -> String {
    let domain = registrable_domain(website).unwrap_or_else(|| website.to_string());
    let mut chars = domain.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => domain,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subdomains_are_stripped() {
        assert_eq!(registrable_domain("https://mail.google.com/inbox").as_deref(), Some("google.com"));
        assert_eq!(registrable_domain("https://example.com").as_deref(), Some("example.com"));
    }

    #[test]
    fn test_multi_label_suffixes() {
        assert_eq!(registrable_domain("https://www.bbc.co.uk/news").as_deref(), Some("bbc.co.uk"));
        assert_eq!(registrable_domain("https://shop.example.com.au").as_deref(), Some("example.com.au"));
        // too short to have a label in front of the suffix
        assert_eq!(registrable_domain("https://co.uk").as_deref(), Some("co.uk"));
    }

    #[test]
    fn test_loopback_and_missing_hosts() {
        assert_eq!(registrable_domain("http://localhost:3000").as_deref(), Some("localhost"));
        assert_eq!(registrable_domain("http://127.0.0.1:8080").as_deref(), Some("127.0.0.1"));
        assert_eq!(registrable_domain("github.com"), None);
        assert_eq!(registrable_domain("about:blank"), None);
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("https://github.com/login"), "Github.com");
        assert_eq!(display_name("intranet"), "Intranet");
        assert_eq!(display_name(""), "");
    }
}

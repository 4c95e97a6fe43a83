//! Credential matching and the local secret cache
//!
//! Secrets belong to the host store. The tab keeps a bounded copy for the
//! secret dialog and matches entries against the current page's registrable
//! domain for the context menu.

use embedded_browser_core::*;

/// Secrets fetched for the dialog cache, at tab open and after creation
pub const DIALOG_SECRET_LIMIT: usize = 1000;

/// Secrets fetched when building an editable-field context menu
pub const MENU_SECRET_LIMIT: usize = 100;

/// Matched secrets offered in the context menu
pub const MAX_MENU_MATCHES: usize = 5;

/// Secrets whose website matches `domain`
///
/// Containment is checked both ways against the secret's registrable domain
/// (or its raw website when that has no scheme), plus the raw website
/// containing the domain.
pub fn match_secrets_for_domain<'a>(
    domain: &str,
    secrets: &'a [SecretEntry],
    max_results: usize,
) -> Vec<&'a SecretEntry> {
    let domain = domain.to_lowercase();

    secrets
        .iter()
        .filter(|secret| {
            let website = secret.website.to_lowercase();
            let secret_domain = registrable_domain(&secret.website)
                .map(|d| d.to_lowercase())
                .unwrap_or_else(|| website.clone());

            if secret_domain.is_empty() {
                return false;
            }
            secret_domain.contains(&domain) || domain.contains(&secret_domain) || website.contains(&domain)
        })
        .take(max_results)
        .collect()
}

/// Case-insensitive dialog search over website, username, notes and tags
pub fn filter_secrets<'a>(query: &str, secrets: &'a [SecretEntry]) -> Vec<&'a SecretEntry> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return secrets.iter().collect();
    }

    secrets
        .iter()
        .filter(|secret| {
            secret.website.to_lowercase().contains(&query)
                || secret.username.to_lowercase().contains(&query)
                || secret
                    .notes
                    .as_ref()
                    .is_some_and(|notes| notes.to_lowercase().contains(&query))
                || secret.tags.iter().any(|tag| tag.to_lowercase().contains(&query))
        })
        .collect()
}

/// Username as shown in the context menu, long names are shortened
pub fn username_preview(username: &str) -> String {
    if username.chars().count() > 25 {
        let head: String = username.chars().take(22).collect();
        format!("{}...", head)
    } else {
        username.to_string()
    }
}

/// Dialog copy of the host's secrets
#[derive(Debug, Clone, Default)]
pub struct SecretCache {
    secrets: Vec<SecretEntry>,
    loaded: bool,
}

impl SecretCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&mut self, secrets: Vec<SecretEntry>) {
        self.secrets = secrets;
        self.loaded = true;
    }

    pub fn all(&self) -> &[SecretEntry] {
        &self.secrets
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn find(&self, id: &str) -> Option<&SecretEntry> {
        self.secrets.iter().find(|secret| secret.id == id)
    }

    /// Filtered entries, each flagged when it matches the page's domain
    pub fn search(&self, query: &str, page_url: &str) -> Vec<(SecretEntry, bool)> {
        let current_domain = registrable_domain(page_url);
        let matching: Vec<&SecretEntry> = match &current_domain {
            Some(domain) => match_secrets_for_domain(domain, &self.secrets, usize::MAX),
            None => Vec::new(),
        };

        filter_secrets(query, &self.secrets)
            .into_iter()
            .map(|secret| {
                let is_match = matching.iter().any(|m| m.id == secret.id);
                (secret.clone(), is_match)
            })
            .collect()
    }
}

/// Fields of the quick "Save Credentials" form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateSecretForm {
    pub website: String,
    pub username: String,
    pub password: String,
}

impl CreateSecretForm {
    pub fn with_website(website: impl Into<String>) -> Self {
        Self {
            website: website.into(),
            ..Self::default()
        }
    }

    /// All three fields must be non-blank
    pub fn validate(&self) -> std::result::Result<CreateSecretRequest, SecretError> {
        for (field, value) in [
            ("website", &self.website),
            ("username", &self.username),
            ("password", &self.password),
        ] {
            if value.trim().is_empty() {
                return Err(SecretError::MissingField {
                    field: field.to_string(),
                });
            }
        }

        Ok(CreateSecretRequest {
            website: self.website.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret(id: &str, website: &str, username: &str) -> SecretEntry {
        SecretEntry {
            id: id.to_string(),
            website: website.to_string(),
            username: username.to_string(),
            password: "pw".to_string(),
            notes: None,
            tags: vec![],
        }
    }

    #[test]
    fn test_match_by_registrable_domain() {
        let secrets = vec![
            secret("1", "https://accounts.google.com", "me@gmail.com"),
            secret("2", "github.com", "octocat"),
            secret("3", "https://example.org", "someone"),
        ];

        let matched = match_secrets_for_domain("google.com", &secrets, MAX_MENU_MATCHES);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].id, "1");

        // bare websites fall back to the raw string
        let matched = match_secrets_for_domain("github.com", &secrets, MAX_MENU_MATCHES);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].id, "2");
    }

    #[test]
    fn test_match_is_capped() {
        let secrets: Vec<SecretEntry> = (0..8)
            .map(|i| secret(&i.to_string(), "https://github.com", &format!("user{}", i)))
            .collect();
        assert_eq!(match_secrets_for_domain("github.com", &secrets, MAX_MENU_MATCHES).len(), 5);
    }

    #[test]
    fn test_filter_over_all_fields() {
        let mut tagged = secret("1", "https://intranet.local", "alice");
        tagged.tags = vec!["Work".to_string()];
        tagged.notes = Some("VPN required".to_string());
        let secrets = vec![tagged, secret("2", "https://github.com", "bob")];

        assert_eq!(filter_secrets("work", &secrets).len(), 1);
        assert_eq!(filter_secrets("vpn", &secrets).len(), 1);
        assert_eq!(filter_secrets("BOB", &secrets).len(), 1);
        assert_eq!(filter_secrets("  ", &secrets).len(), 2);
    }

    #[test]
    fn test_username_preview() {
        assert_eq!(username_preview("short"), "short");
        let long = "a".repeat(30);
        assert_eq!(username_preview(&long), format!("{}...", "a".repeat(22)));
    }

    #[test]
    fn test_cache_search_flags_current_domain() {
        let mut cache = SecretCache::new();
        assert!(!cache.is_loaded());
        cache.replace(vec![
            secret("1", "https://github.com", "octocat"),
            secret("2", "https://gitlab.com", "tanuki"),
        ]);

        let results = cache.search("", "https://github.com/rust-lang");
        assert_eq!(results.len(), 2);
        assert!(results[0].1);
        assert!(!results[1].1);
        assert_eq!(cache.find("2").map(|s| s.username.as_str()), Some("tanuki"));
    }

    #[test]
    fn test_create_form_validation() {
        let mut form = CreateSecretForm::with_website("github.com");
        form.username = "octocat".to_string();
        assert!(matches!(
            form.validate(),
            Err(SecretError::MissingField { field }) if field == "password"
        ));

        form.password = "hunter2".to_string();
        let request = form.validate().unwrap();
        assert_eq!(request.website, "github.com");
    }
}

//! Address bar controller
//!
//! Holds the URL bar text separately from the page URL the browser reports.
//! Navigation events arrive asynchronously, so host updates are ignored from
//! the first keystroke until the user submits, picks a suggestion or leaves
//! the field, and for a quiet period after the last keystroke.

use embedded_browser_core::{interpret_url_input, UrlHistoryEntry};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::Instant;

/// Address bar timing and suggestion limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolbarConfig {
    /// Keystroke-free time before host navigations may overwrite the text,
    /// even after editing ended
    pub edit_quiet_period_ms: u64,
    /// Delay before hiding suggestions on focus loss, lets a click land first
    pub focus_loss_delay_ms: u64,
    /// Maximum number of history suggestions per keystroke
    pub suggestion_limit: usize,
}

impl Default for ToolbarConfig {
    fn default() -> Self {
        Self {
            edit_quiet_period_ms: 300,
            focus_loss_delay_ms: 200,
            suggestion_limit: 10,
        }
    }
}

impl ToolbarConfig {
    pub fn edit_quiet_period(&self) -> Duration {
        Duration::from_millis(self.edit_quiet_period_ms)
    }

    pub fn focus_loss_delay(&self) -> Duration {
        Duration::from_millis(self.focus_loss_delay_ms)
    }
}

/// Caret/selection in character offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TextSelection {
    pub start: usize,
    pub end: usize,
}

impl TextSelection {
    pub fn caret(at: usize) -> Self {
        Self { start: at, end: at }
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }
}

/// Keys the address bar reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToolbarKey {
    Enter,
    Tab,
    Up,
    Down,
    Right,
    Escape,
}

/// Result of a key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Load this URL
    Navigate(String),
    /// Key consumed
    Handled,
    /// Let the text field handle the key
    NotHandled,
}

/// State of the URL bar and its suggestion dropdown
#[derive(Debug, Clone)]
pub struct AddressBar {
    config: ToolbarConfig,
    text: String,
    selection: TextSelection,
    editing: bool,
    editing_until: Option<Instant>,
    suggestions: Vec<UrlHistoryEntry>,
    dropdown_visible: bool,
    inline_completion: Option<String>,
    selected_index: isize,
}

impl AddressBar {
    pub fn new(initial_text: &str, config: ToolbarConfig) -> Self {
        Self {
            config,
            text: initial_text.to_string(),
            selection: TextSelection::caret(initial_text.chars().count()),
            editing: false,
            editing_until: None,
            suggestions: Vec::new(),
            dropdown_visible: false,
            inline_completion: None,
            selected_index: -1,
        }
    }

    pub fn config(&self) -> &ToolbarConfig {
        &self.config
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn selection(&self) -> TextSelection {
        self.selection
    }

    pub fn suggestions(&self) -> &[UrlHistoryEntry] {
        &self.suggestions
    }

    pub fn is_dropdown_visible(&self) -> bool {
        self.dropdown_visible && !self.suggestions.is_empty()
    }

    pub fn inline_completion(&self) -> Option<&str> {
        self.inline_completion.as_deref()
    }

    /// Grey suffix drawn after the typed text
    pub fn completion_suffix(&self) -> Option<&str> {
        let completion = self.inline_completion.as_deref()?;
        let typed = self.text.chars().count();
        completion.char_indices().nth(typed).map(|(i, _)| &completion[i..])
    }

    pub fn selected_index(&self) -> isize {
        self.selected_index
    }

    /// Whether host navigations must leave the text alone
    pub fn is_editing(&self, now: Instant) -> bool {
        self.editing || self.editing_until.is_some_and(|until| now < until)
    }

    /// User typed or moved the caret
    ///
    /// `lookup` queries ranked URL history; it runs only for non-empty text
    /// with a collapsed caret.
    pub fn on_text_changed<F>(&mut self, text: &str, selection: TextSelection, now: Instant, lookup: F)
    where
        F: FnOnce(&str, usize) -> Vec<UrlHistoryEntry>,
    {
        self.editing = true;
        self.editing_until = Some(now + self.config.edit_quiet_period());
        self.text = text.to_string();
        self.selection = selection;
        self.selected_index = -1;

        if text.is_empty() || !selection.is_collapsed() {
            self.clear_suggestions();
            return;
        }

        let suggestions = lookup(text, self.config.suggestion_limit);
        // Search result URLs never complete typed text
        self.inline_completion = suggestions
            .iter()
            .find(|entry| !entry.is_search())
            .and_then(|entry| inline_completion_for(text, &entry.url));
        self.dropdown_visible = !suggestions.is_empty();
        self.suggestions = suggestions;
    }

    /// Browser navigated; returns true when the bar text was replaced
    pub fn on_host_navigation(&mut self, url: &str, now: Instant) -> bool {
        if self.is_editing(now) {
            return false;
        }
        self.set_text(url);
        true
    }

    pub fn handle_key(&mut self, key: ToolbarKey) -> KeyOutcome {
        match key {
            ToolbarKey::Enter => {
                let url = match self.selected_suggestion() {
                    Some(entry) => entry.url.clone(),
                    None => interpret_url_input(self.text.trim()),
                };
                self.finish_editing();
                KeyOutcome::Navigate(url)
            }
            ToolbarKey::Tab => {
                if self.accept_completion() {
                    KeyOutcome::Handled
                } else {
                    KeyOutcome::NotHandled
                }
            }
            ToolbarKey::Down => {
                if self.is_dropdown_visible() {
                    let last = self.suggestions.len() as isize - 1;
                    self.selected_index = (self.selected_index + 1).min(last);
                }
                KeyOutcome::Handled
            }
            ToolbarKey::Up => {
                if self.is_dropdown_visible() {
                    self.selected_index = (self.selected_index - 1).max(-1);
                }
                KeyOutcome::Handled
            }
            ToolbarKey::Right => {
                let caret_at_end = self.selection.is_collapsed()
                    && self.selection.start == self.text.chars().count();
                if self.inline_completion.is_some() && caret_at_end {
                    self.accept_completion();
                    self.dismiss_suggestions();
                    KeyOutcome::Handled
                } else {
                    KeyOutcome::NotHandled
                }
            }
            ToolbarKey::Escape => {
                self.dismiss_suggestions();
                KeyOutcome::Handled
            }
        }
    }

    /// Replace the text with the inline completion
    pub fn accept_completion(&mut self) -> bool {
        match self.inline_completion.take() {
            Some(completion) => {
                self.set_text(&completion);
                true
            }
            None => false,
        }
    }

    /// Click on a dropdown row
    pub fn select_suggestion(&mut self, index: usize) -> Option<String> {
        let url = self.suggestions.get(index)?.url.clone();
        self.set_text(&url);
        self.finish_editing();
        Some(url)
    }

    /// URL loaded by the refresh button when the page is idle
    pub fn refresh_target(&self) -> String {
        if let Some(completion) = self.inline_completion.as_deref() {
            let prefix: String = completion.chars().take(self.text.chars().count()).collect();
            if prefix == self.text {
                return interpret_url_input(completion);
            }
        }
        interpret_url_input(self.text.trim())
    }

    pub fn dismiss_suggestions(&mut self) {
        self.dropdown_visible = false;
        self.inline_completion = None;
        self.selected_index = -1;
    }

    /// Field lost focus; returns when [`Self::on_focus_loss_elapsed`] should run
    pub fn on_focus_lost(&self, now: Instant) -> Instant {
        now + self.config.focus_loss_delay()
    }

    pub fn on_focus_loss_elapsed(&mut self) {
        self.dropdown_visible = false;
        self.editing = false;
        self.editing_until = None;
    }

    /// Submission ends editing so the next navigation event shows the real URL
    pub fn finish_editing(&mut self) {
        self.editing = false;
        self.editing_until = None;
        self.dismiss_suggestions();
    }

    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.selection = TextSelection::caret(self.text.chars().count());
    }

    fn selected_suggestion(&self) -> Option<&UrlHistoryEntry> {
        usize::try_from(self.selected_index)
            .ok()
            .and_then(|i| self.suggestions.get(i))
    }

    fn clear_suggestions(&mut self) {
        self.inline_completion = None;
        self.suggestions.clear();
        self.dropdown_visible = false;
    }
}

/// Inline completion for typed text from a suggested URL
///
/// The URL is stripped of `https://`, `http://` and `www.`; it only counts
/// when it case-insensitively extends what was typed.
pub fn inline_completion_for(typed: &str, suggestion_url: &str) -> Option<String> {
    let stripped = suggestion_url
        .strip_prefix("https://")
        .unwrap_or(suggestion_url);
    let stripped = stripped.strip_prefix("http://").unwrap_or(stripped);
    let stripped = stripped.strip_prefix("www.").unwrap_or(stripped);

    let extends = stripped.to_lowercase().starts_with(&typed.to_lowercase())
        && stripped.chars().count() > typed.chars().count();
    extends.then(|| stripped.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(url: &str) -> UrlHistoryEntry {
        UrlHistoryEntry {
            url: url.to_string(),
            title: String::new(),
            domain: String::new(),
            visit_count: 1,
        }
    }

    fn history(_prefix: &str, _limit: usize) -> Vec<UrlHistoryEntry> {
        vec![entry("https://www.github.com/rust-lang"), entry("https://gitlab.com")]
    }

    fn type_text(bar: &mut AddressBar, text: &str, now: Instant) {
        bar.on_text_changed(text, TextSelection::caret(text.chars().count()), now, history);
    }

    #[test]
    fn test_inline_completion_rules() {
        assert_eq!(inline_completion_for("git", "https://www.github.com").as_deref(), Some("github.com"));
        assert_eq!(inline_completion_for("GIT", "http://github.com").as_deref(), Some("github.com"));
        assert_eq!(inline_completion_for("github.com", "https://github.com"), None);
        assert_eq!(inline_completion_for("docs", "https://github.com"), None);
    }

    #[test]
    fn test_typing_builds_suggestions() {
        let mut bar = AddressBar::new("", ToolbarConfig::default());
        type_text(&mut bar, "git", Instant::now());

        assert_eq!(bar.inline_completion(), Some("github.com/rust-lang"));
        assert_eq!(bar.completion_suffix(), Some("hub.com/rust-lang"));
        assert!(bar.is_dropdown_visible());
        assert_eq!(bar.suggestions().len(), 2);
    }

    #[test]
    fn test_selection_skips_lookup() {
        let mut bar = AddressBar::new("", ToolbarConfig::default());
        bar.on_text_changed("git", TextSelection { start: 0, end: 3 }, Instant::now(), |_, _| {
            panic!("lookup must not run with a selection")
        });
        assert!(!bar.is_dropdown_visible());
        assert!(bar.inline_completion().is_none());
    }

    #[test]
    fn test_host_navigation_suppressed_while_typing() {
        let mut bar = AddressBar::new("https://a.com", ToolbarConfig::default());
        let start = Instant::now();
        assert!(!bar.is_editing(start));
        type_text(&mut bar, "rust", start);

        assert!(!bar.on_host_navigation("https://b.com", start + Duration::from_millis(100)));
        assert_eq!(bar.text(), "rust");

        // A pause in typing keeps the field in editing mode
        assert!(!bar.on_host_navigation("https://b.com", start + Duration::from_secs(5)));
        assert_eq!(bar.text(), "rust");
    }

    #[test]
    fn test_editing_ends_on_submit_or_focus_loss() {
        let mut bar = AddressBar::new("https://a.com", ToolbarConfig::default());
        let start = Instant::now();

        type_text(&mut bar, "rust", start);
        bar.on_focus_loss_elapsed();
        assert!(bar.on_host_navigation("https://b.com", start + Duration::from_millis(200)));
        assert_eq!(bar.text(), "https://b.com");

        type_text(&mut bar, "docs", start);
        bar.finish_editing();
        assert!(bar.on_host_navigation("https://c.com", start));
        assert_eq!(bar.text(), "https://c.com");

        type_text(&mut bar, "git", start);
        assert!(bar.select_suggestion(1).is_some());
        assert!(!bar.is_editing(start));
    }

    #[test]
    fn test_search_results_do_not_complete() {
        let mut bar = AddressBar::new("", ToolbarConfig::default());
        let mut search = entry("https://www.google.com/search?q=rust");
        search.title = "rust - Google Search".to_string();
        let site = entry("https://go.dev");

        bar.on_text_changed("go", TextSelection::caret(2), Instant::now(), |_, _| vec![search.clone(), site.clone()]);
        assert_eq!(bar.inline_completion(), Some("go.dev"));
        assert_eq!(bar.suggestions().len(), 2);
    }

    #[test]
    fn test_arrow_keys_clamp_without_wrapping() {
        let mut bar = AddressBar::new("", ToolbarConfig::default());
        type_text(&mut bar, "git", Instant::now());

        bar.handle_key(ToolbarKey::Up);
        assert_eq!(bar.selected_index(), -1);
        bar.handle_key(ToolbarKey::Down);
        bar.handle_key(ToolbarKey::Down);
        bar.handle_key(ToolbarKey::Down);
        assert_eq!(bar.selected_index(), 1);

        assert_eq!(
            bar.handle_key(ToolbarKey::Enter),
            KeyOutcome::Navigate("https://gitlab.com".to_string())
        );
        assert!(!bar.is_dropdown_visible());
    }

    #[test]
    fn test_enter_interprets_typed_text() {
        let mut bar = AddressBar::new("", ToolbarConfig::default());
        bar.on_text_changed("hello world", TextSelection::caret(11), Instant::now(), |_, _| Vec::new());
        assert_eq!(
            bar.handle_key(ToolbarKey::Enter),
            KeyOutcome::Navigate("https://www.google.com/search?q=hello%20world".to_string())
        );
        assert!(!bar.is_editing(Instant::now()));
    }

    #[test]
    fn test_tab_and_right_accept_completion() {
        let mut bar = AddressBar::new("", ToolbarConfig::default());
        type_text(&mut bar, "git", Instant::now());
        assert_eq!(bar.handle_key(ToolbarKey::Tab), KeyOutcome::Handled);
        assert_eq!(bar.text(), "github.com/rust-lang");
        assert_eq!(bar.handle_key(ToolbarKey::Tab), KeyOutcome::NotHandled);

        type_text(&mut bar, "git", Instant::now());
        bar.on_text_changed("git", TextSelection::caret(1), Instant::now(), history);
        assert_eq!(bar.handle_key(ToolbarKey::Right), KeyOutcome::NotHandled);

        type_text(&mut bar, "git", Instant::now());
        assert_eq!(bar.handle_key(ToolbarKey::Right), KeyOutcome::Handled);
        assert_eq!(bar.text(), "github.com/rust-lang");
        assert!(!bar.is_dropdown_visible());
    }

    #[test]
    fn test_refresh_target_prefers_completion() {
        let mut bar = AddressBar::new("", ToolbarConfig::default());
        type_text(&mut bar, "git", Instant::now());
        assert_eq!(bar.refresh_target(), "https://github.com/rust-lang");

        bar.handle_key(ToolbarKey::Escape);
        assert_eq!(bar.refresh_target(), "https://www.google.com/search?q=git");
    }

    #[test]
    fn test_focus_loss_hides_dropdown_after_delay() {
        let mut bar = AddressBar::new("", ToolbarConfig::default());
        let now = Instant::now();
        type_text(&mut bar, "git", now);

        let deadline = bar.on_focus_lost(now);
        assert_eq!(deadline, now + Duration::from_millis(200));
        assert!(bar.is_dropdown_visible());

        bar.on_focus_loss_elapsed();
        assert!(!bar.is_dropdown_visible());
        assert!(!bar.is_editing(now));
    }
}

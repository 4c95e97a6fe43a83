//! Context menu construction
//!
//! Builds the ordered item list for one right click. Items carry a typed
//! [`MenuAction`]; the owning tab executes the action when an item is picked.

use crate::secrets::{match_secrets_for_domain, username_preview, MAX_MENU_MATCHES};
use embedded_browser_core::*;
use serde::{Deserialize, Serialize};

/// What picking a menu item does
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MenuAction {
    /// Headers, informational lines and dividers
    None,
    /// Copy the page selection through the browser
    CopySelection,
    Paste,
    FillCredential { username: String, password: String },
    ShowAllSecrets,
    AddNewSecret { website_prefill: String },
    Reload,
    Back,
    Forward,
    PictureInPicture,
    /// Put text on the clipboard
    CopyText(String),
    /// Load a URL in this tab
    Navigate(String),
    OpenInNewTab(String),
    ToggleBookmark,
    InspectElement,
}

/// One context menu row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextMenuItem {
    pub label: String,
    pub action: MenuAction,
    pub is_divider: bool,
}

impl ContextMenuItem {
    pub fn new(label: impl Into<String>, action: MenuAction) -> Self {
        Self {
            label: label.into(),
            action,
            is_divider: false,
        }
    }

    /// Non-clickable line
    pub fn info(label: impl Into<String>) -> Self {
        Self::new(label, MenuAction::None)
    }

    pub fn divider() -> Self {
        Self {
            label: String::new(),
            action: MenuAction::None,
            is_divider: true,
        }
    }

    pub fn is_clickable(&self) -> bool {
        !self.is_divider && self.action != MenuAction::None
    }
}

/// Tab state the menu depends on
#[derive(Debug, Clone, Copy)]
pub struct MenuContext<'a> {
    pub can_go_back: bool,
    pub can_go_forward: bool,
    pub is_bookmarked: bool,
    /// Secrets fetched for this menu; empty when none are available
    pub secrets: &'a [SecretEntry],
}

/// Build the menu for a right click
pub fn build_context_menu(snapshot: &ContextMenuSnapshot, context: &MenuContext<'_>) -> Vec<ContextMenuItem> {
    if snapshot.is_editable {
        editable_field_menu(snapshot, context)
    } else {
        page_menu(snapshot, context)
    }
}

fn editable_field_menu(snapshot: &ContextMenuSnapshot, context: &MenuContext<'_>) -> Vec<ContextMenuItem> {
    let mut items = vec![
        ContextMenuItem::new("Copy", MenuAction::CopySelection),
        ContextMenuItem::new("Paste", MenuAction::Paste),
        ContextMenuItem::divider(),
    ];

    let domain = registrable_domain(&snapshot.page_url);
    items.push(ContextMenuItem::info("🔑 Fill Credential"));

    let matched = match &domain {
        Some(domain) => match_secrets_for_domain(domain, context.secrets, MAX_MENU_MATCHES),
        None => Vec::new(),
    };

    if matched.is_empty() {
        let line = match &domain {
            Some(domain) => format!("No matching secrets for {}", domain),
            None => "No matching secrets for this page".to_string(),
        };
        items.push(ContextMenuItem::info(line));
    } else {
        items.push(ContextMenuItem::divider());
        for secret in matched {
            let label = format!("{} ({})", display_name(&secret.website), username_preview(&secret.username));
            items.push(ContextMenuItem::new(
                label,
                MenuAction::FillCredential {
                    username: secret.username.clone(),
                    password: secret.password.clone(),
                },
            ));
        }
    }

    items.push(ContextMenuItem::divider());
    items.push(ContextMenuItem::new("Show All Secrets...", MenuAction::ShowAllSecrets));
    items.push(ContextMenuItem::new(
        "Add New Secret",
        MenuAction::AddNewSecret {
            website_prefill: domain.unwrap_or_default(),
        },
    ));
    items.push(ContextMenuItem::divider());

    items.push(ContextMenuItem::new("Reload", MenuAction::Reload));
    items.push(ContextMenuItem::new(
        "Copy Page URL",
        MenuAction::CopyText(snapshot.page_url.clone()),
    ));
    items.push(ContextMenuItem::new("Inspect Element", MenuAction::InspectElement));
    items
}

fn page_menu(snapshot: &ContextMenuSnapshot, context: &MenuContext<'_>) -> Vec<ContextMenuItem> {
    let mut items = Vec::new();

    if context.can_go_back {
        items.push(ContextMenuItem::new("Back", MenuAction::Back));
    }
    if context.can_go_forward {
        items.push(ContextMenuItem::new("Forward", MenuAction::Forward));
    }
    items.push(ContextMenuItem::new("Reload", MenuAction::Reload));
    items.push(ContextMenuItem::divider());

    if snapshot.has_video {
        items.push(ContextMenuItem::new("Picture in Picture", MenuAction::PictureInPicture));
        items.push(ContextMenuItem::divider());
    }

    if let Some(selected) = snapshot.selected_text.as_deref().filter(|s| !s.is_empty()) {
        items.push(ContextMenuItem::new("Copy", MenuAction::CopyText(selected.to_string())));
        items.push(ContextMenuItem::new("Search with Google", MenuAction::Navigate(search_url(selected))));
    }

    match snapshot.link_url.as_deref().filter(|s| !s.is_empty()) {
        Some(link) => {
            items.push(ContextMenuItem::new("Copy Link URL", MenuAction::CopyText(link.to_string())));
            items.push(ContextMenuItem::new("Open Link in New Tab", MenuAction::OpenInNewTab(link.to_string())));
        }
        None => {
            items.push(ContextMenuItem::new(
                "Copy Page URL",
                MenuAction::CopyText(snapshot.page_url.clone()),
            ));
        }
    }

    items.push(ContextMenuItem::divider());
    let bookmark_label = if context.is_bookmarked { "Remove Bookmark" } else { "Add Bookmark" };
    items.push(ContextMenuItem::new(bookmark_label, MenuAction::ToggleBookmark));
    items.push(ContextMenuItem::new("Inspect Element", MenuAction::InspectElement));
    items
}

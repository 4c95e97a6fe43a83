//! Keyboard shortcuts and extra mouse buttons over the browser content

use serde::{Deserialize, Serialize};

/// Browser shortcuts bound to the primary modifier (Cmd on macOS, Ctrl elsewhere)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shortcut {
    Reload,
    ResetZoom,
    ZoomIn,
    ZoomOut,
}

impl Shortcut {
    /// Map a key press to a shortcut; `key` is the produced character
    pub fn from_key(primary_modifier: bool, key: &str) -> Option<Self> {
        if !primary_modifier {
            return None;
        }
        match key {
            "r" | "R" => Some(Shortcut::Reload),
            "0" => Some(Shortcut::ResetZoom),
            "=" | "+" => Some(Shortcut::ZoomIn),
            "-" => Some(Shortcut::ZoomOut),
            _ => None,
        }
    }
}

/// Action bound to a mouse button pressed over the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MouseAction {
    CloseTab,
    Back,
    Forward,
}

impl MouseAction {
    /// Button numbers as reported by the host windowing toolkit
    ///
    /// Back and forward side buttons report 4/5 on Windows and macOS but
    /// 6/7 or 8/9 on Linux depending on the mouse.
    pub fn from_button(button: u16) -> Option<Self> {
        match button {
            2 => Some(MouseAction::CloseTab),
            4 | 6 | 8 => Some(MouseAction::Back),
            5 | 7 | 9 => Some(MouseAction::Forward),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shortcuts_need_modifier() {
        assert_eq!(Shortcut::from_key(true, "r"), Some(Shortcut::Reload));
        assert_eq!(Shortcut::from_key(true, "+"), Some(Shortcut::ZoomIn));
        assert_eq!(Shortcut::from_key(true, "x"), None);
        assert_eq!(Shortcut::from_key(false, "r"), None);
    }

    #[test]
    fn test_mouse_buttons() {
        assert_eq!(MouseAction::from_button(2), Some(MouseAction::CloseTab));
        assert_eq!(MouseAction::from_button(8), Some(MouseAction::Back));
        assert_eq!(MouseAction::from_button(7), Some(MouseAction::Forward));
        assert_eq!(MouseAction::from_button(1), None);
    }
}

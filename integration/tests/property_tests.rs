//! Property-based tests for input mapping and plugin configuration
//!
//! Only the documented mouse buttons and modifier shortcuts trigger browser
//! actions, and a partial JSON config keeps defaults for every omitted field.

use integration::*;
use page_manager::{RetryPolicy, ToolbarConfig};
use proptest::prelude::*;
use tracing_subscriber::EnvFilter;

// ============================================================================
// Test Data Generators
// ============================================================================

fn arb_level() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("trace".to_string()),
        Just("debug".to_string()),
        Just("info".to_string()),
        Just("warn".to_string()),
        Just("error".to_string()),
    ]
}

/// Keys as produced by the host keyboard layer
fn arb_key() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9]",
        Just("+".to_string()),
        Just("-".to_string()),
        Just("=".to_string()),
        "[a-z]{2,8}",
    ]
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_only_known_buttons_map(button in any::<u16>()) {
        let expected = match button {
            2 => Some(MouseAction::CloseTab),
            4 | 6 | 8 => Some(MouseAction::Back),
            5 | 7 | 9 => Some(MouseAction::Forward),
            _ => None,
        };
        prop_assert_eq!(MouseAction::from_button(button), expected);
    }

    #[test]
    fn prop_shortcuts_need_primary_modifier(key in arb_key()) {
        prop_assert_eq!(Shortcut::from_key(false, &key), None);
        if key.chars().count() > 1 {
            prop_assert_eq!(Shortcut::from_key(true, &key), None);
        }
    }

    #[test]
    fn prop_partial_config_keeps_defaults(
        dialog_limit in 1usize..5000,
        menu_limit in 1usize..500,
        level in arb_level(),
    ) {
        let json = serde_json::json!({
            "dialog_secret_limit": dialog_limit,
            "menu_secret_limit": menu_limit,
            "log_level": level,
        });
        let config = PluginConfig::from_json(&json.to_string()).unwrap();

        prop_assert_eq!(config.dialog_secret_limit, dialog_limit);
        prop_assert_eq!(config.menu_secret_limit, menu_limit);
        prop_assert_eq!(&config.retry, &RetryPolicy::default());
        prop_assert_eq!(&config.toolbar, &ToolbarConfig::default());
        prop_assert_eq!(&config.default_url, &PluginConfig::default().default_url);
    }

    #[test]
    fn prop_bare_level_yields_valid_plugin_filter(level in arb_level()) {
        let directive = PluginConfig { log_level: level.clone(), ..PluginConfig::default() }
            .logger_config()
            .directive();

        prop_assert!(directive.starts_with("warn,"));
        let scoped = format!("integration={}", level);
        prop_assert!(directive.contains(&scoped));
        prop_assert!(EnvFilter::try_new(&directive).is_ok());
    }
}

//! Per-tab page logic for the embedded browser
//!
//! This module holds the synchronous state behind one browser tab. The
//! owning tab actor feeds it browser events and user input and acts on what
//! it returns.
//!
//! # Features
//! - Navigation history with back/forward and branch truncation
//! - Browser lifecycle state machine with creation retries, health checks
//!   and bounded recovery
//! - Address bar controller with history suggestions and inline completion
//! - Context menu construction for pages, links, selections and form fields
//! - Credential matching and the secret dialog cache

pub mod history;
pub mod lifecycle;
pub mod toolbar;
pub mod context_menu;
pub mod secrets;

pub use history::*;
pub use lifecycle::*;
pub use toolbar::*;
pub use context_menu::*;
pub use secrets::*;

// Re-export commonly used types
pub use embedded_browser_core::*;

//! Browser Connector module for the embedded browser tab
//!
//! This module defines how the tab talks to its host application. The host
//! owns the browser engine and every persistent store; the tab only sees the
//! narrow capability traits declared here.
//!
//! # Features
//! - Browser factory and handle interfaces
//! - Host service interfaces (tab metadata, URL history, zoom, bookmarks, secrets)
//! - Per-handle event channel for navigation, title, loading and menu events
//! - One-time capability resolution into a full or stub backend

pub mod traits;
pub mod events;
pub mod capabilities;
pub mod noop;

pub use traits::*;
pub use events::{BrowserEvent, EventSink};
pub use capabilities::{HostCapabilities, TabBackend, TabServices};
pub use noop::NoopProvider;

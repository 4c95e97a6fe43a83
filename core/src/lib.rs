pub mod types;
pub mod errors;
pub mod url_input;
pub mod domain;

pub use types::*;
pub use errors::*;
pub use url_input::{interpret_url_input, search_url};
pub use domain::{display_name, registrable_domain};

// Re-export commonly used types
pub use uuid::Uuid;
pub use serde::{Deserialize, Serialize};

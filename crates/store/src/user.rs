//! The user record the whole harness revolves around.

use serde::{Deserialize, Serialize};

/// A single user row from the backing store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub display_name: String,
    pub location: String,
    pub reputation: u32,
}

impl User {
    /// Convenience constructor, mostly for tests and dataset generation.
    pub fn new(id: u64, display_name: impl Into<String>, location: impl Into<String>, reputation: u32) -> Self {
        Self { id, display_name: display_name.into(), location: location.into(), reputation }
    }
}

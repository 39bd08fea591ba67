//! Substring search criteria over user records.

use serde::{Deserialize, Serialize};

use crate::user::User;

/// Hard cap on the number of records a search returns.
pub const MAX_RESULTS: usize = 100;

/// Filter for user searches.
///
/// Name and location match by case-insensitive substring; reputation is a
/// minimum threshold. Criteria with no fields set match every user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchCriteria {
    pub name: Option<String>,
    pub location: Option<String>,
    pub min_reputation: Option<u32>,
}

impl SearchCriteria {
    /// Criteria that match every user.
    #[must_use]
    pub fn any() -> Self {
        Self::default()
    }

    /// Require `needle` to appear in the display name.
    #[must_use]
    pub fn name(mut self, needle: impl Into<String>) -> Self {
        self.name = Some(needle.into());
        self
    }

    /// Require `needle` to appear in the location.
    #[must_use]
    pub fn location(mut self, needle: impl Into<String>) -> Self {
        self.location = Some(needle.into());
        self
    }

    /// Require at least this much reputation.
    #[must_use]
    pub const fn min_reputation(mut self, reputation: u32) -> Self {
        self.min_reputation = Some(reputation);
        self
    }

    /// Whether `user` satisfies every set field.
    pub fn matches(&self, user: &User) -> bool {
        if let Some(needle) = &self.name {
            if !contains_ignore_case(&user.display_name, needle) {
                return false;
            }
        }
        if let Some(needle) = &self.location {
            if !contains_ignore_case(&user.location, needle) {
                return false;
            }
        }
        if let Some(min) = self.min_reputation {
            if user.reputation < min {
                return false;
            }
        }
        true
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

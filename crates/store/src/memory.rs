//! In-memory user source.

use std::{
    sync::{Mutex, PoisonError},
    time::Duration,
};

use crate::{
    source::{SourceError, UserSource},
    user::User,
};

/// A [`UserSource`] backed by a plain in-memory vector.
///
/// Stands in for the blob/table/relational backends of the original harness
/// in tests and benchmarks. An optional artificial latency makes the cost of
/// a bulk load visible when benchmarking the cache.
pub struct MemoryUserSource {
    name: String,
    users: Mutex<Vec<User>>,
    latency: Duration,
}

impl MemoryUserSource {
    /// Create a source named `name` holding `users`.
    pub fn new(name: impl Into<String>, users: Vec<User>) -> Self {
        Self { name: name.into(), users: Mutex::new(users), latency: Duration::ZERO }
    }

    /// Add an artificial delay to every `load_all` call.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Replace the dataset wholesale.
    ///
    /// Callers reading through a cache keep seeing the previous dataset until
    /// their snapshot expires.
    pub fn seed(&self, users: Vec<User>) {
        let mut guard = self.users.lock().unwrap_or_else(PoisonError::into_inner);
        *guard = users;
    }

    /// Number of records currently held.
    pub fn len(&self) -> usize {
        self.users.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Whether the source holds no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for MemoryUserSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryUserSource")
            .field("name", &self.name)
            .field("users", &self.len())
            .field("latency", &self.latency)
            .finish()
    }
}

impl UserSource for MemoryUserSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn load_all(&self) -> Result<Vec<User>, SourceError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        let users = self.users.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(users.clone())
    }
}

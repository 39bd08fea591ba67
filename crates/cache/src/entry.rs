//! A single published cache entry: an immutable snapshot plus its freshness window.

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

/// An immutable point-in-time snapshot with the TTL it was published under.
///
/// The snapshot value is never mutated in place; refreshing a key replaces the
/// whole entry. Freshness is evaluated lazily on access, there is no
/// background sweep.
pub struct CacheEntry<T> {
    snapshot: Arc<T>,
    created_at: Instant,
    ttl: Duration,
}

impl<T> CacheEntry<T> {
    /// Create an entry holding `value`, fresh for `ttl` from now.
    pub fn new(value: T, ttl: Duration) -> Self {
        Self { snapshot: Arc::new(value), created_at: Instant::now(), ttl }
    }

    /// A shared handle to the snapshot value.
    pub fn snapshot(&self) -> Arc<T> {
        Arc::clone(&self.snapshot)
    }

    /// Whether the entry is still within its TTL.
    pub fn is_fresh(&self) -> bool {
        self.created_at.elapsed() < self.ttl
    }

    /// Time elapsed since the entry was published.
    pub fn age(&self) -> Duration {
        self.created_at.elapsed()
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for CacheEntry<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheEntry")
            .field("snapshot", &self.snapshot)
            .field("age", &self.age())
            .field("ttl", &self.ttl)
            .finish()
    }
}

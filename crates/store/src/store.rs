//! The cached user store: every search and count runs against a TTL-bounded
//! dataset snapshot loaded through the read-through cache.

use std::{sync::Arc, time::Duration};

use scour_cache::SnapshotCache;
use tracing::debug;

use crate::{
    config::StoreConfig,
    criteria::{SearchCriteria, MAX_RESULTS},
    source::{SourceError, UserSource},
    user::User,
};

/// A user store that reads the full dataset through a snapshot cache and
/// scans it linearly per query.
///
/// The cache is owned by the store and keyed by the source name, so two
/// stores over differently-named sources never contend on a fetch.
pub struct UserStore<S> {
    source: S,
    cache: SnapshotCache<Vec<User>>,
    ttl: Duration,
}

impl<S: UserSource> UserStore<S> {
    /// Create a store over `source`, caching the dataset for `cache_ttl`.
    pub fn new(source: S, cache_ttl: Duration) -> Self {
        Self { source, cache: SnapshotCache::new(), ttl: cache_ttl }
    }

    /// Create a store with the TTL taken from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured TTL does not parse.
    pub fn from_config(source: S, config: &StoreConfig) -> anyhow::Result<Self> {
        let ttl = config.parse_cache_ttl()?;
        Ok(Self::new(source, ttl))
    }

    /// The backing source.
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// The current dataset snapshot, fetched through the cache.
    pub async fn snapshot(&self) -> Result<Arc<Vec<User>>, SourceError> {
        self.cache.get(self.source.name(), self.ttl, || self.source.load_all()).await
    }

    /// Search the dataset, returning at most [`MAX_RESULTS`] matching users.
    pub async fn search(&self, criteria: &SearchCriteria) -> Result<Vec<User>, SourceError> {
        let users = self.snapshot().await?;
        let matches: Vec<User> =
            users.iter().filter(|user| criteria.matches(user)).take(MAX_RESULTS).cloned().collect();
        debug!(
            source = self.source.name(),
            scanned = users.len(),
            matched = matches.len(),
            "search complete"
        );
        Ok(matches)
    }

    /// Count every matching user. Unlike [`search`](Self::search), the count
    /// is not capped.
    pub async fn count(&self, criteria: &SearchCriteria) -> Result<usize, SourceError> {
        let users = self.snapshot().await?;
        let matched = users.iter().filter(|user| criteria.matches(user)).count();
        debug!(source = self.source.name(), scanned = users.len(), matched, "count complete");
        Ok(matched)
    }
}

impl<S: std::fmt::Debug> std::fmt::Debug for UserStore<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserStore")
            .field("source", &self.source)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

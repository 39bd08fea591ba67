//! Read-through snapshot cache with single-flight fetch deduplication.

use std::{
    collections::HashMap,
    future::Future,
    sync::{Arc, PoisonError, RwLock},
    time::{Duration, Instant},
};

use tokio::sync::Mutex;
use tracing::{debug, trace};

use crate::entry::CacheEntry;

/// A per-key, time-bounded cache around an expensive bulk fetch.
///
/// [`get`](Self::get) serves a fresh snapshot without blocking; on a miss or
/// after expiry, exactly one caller per key runs the caller-supplied fetch
/// while concurrent callers for that key wait and then pick up the published
/// result. Fetches for different keys never serialize with each other.
///
/// Waiter policy (fixed): callers that arrive while a fetch is in flight
/// block until it completes. If the fetch fails, nothing is cached, the
/// fetching caller receives the error unchanged, and each waiter retries its
/// own fetch in turn, still serialized by the per-key lock.
///
/// The cache is a plain owned value with no ambient global state; share it
/// behind an [`Arc`] and pass it to whatever needs it.
pub struct SnapshotCache<T> {
    /// Published snapshots. Only brief read/write locks are taken; never held
    /// across an await point.
    entries: RwLock<HashMap<String, CacheEntry<T>>>,
    /// One fetch lock per key. Holding a key's lock is the exclusive right to
    /// run the fetch for that key.
    flights: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl<T> SnapshotCache<T> {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self { entries: RwLock::new(HashMap::new()), flights: Mutex::new(HashMap::new()) }
    }

    /// Return the snapshot for `key`, fetching it if absent or expired.
    ///
    /// `ttl` bounds the freshness of whatever this call publishes; an entry
    /// published earlier keeps the TTL it was published with. The fetch
    /// function's error is propagated verbatim and nothing is cached on
    /// failure.
    pub async fn get<F, Fut, E>(&self, key: &str, ttl: Duration, fetch: F) -> Result<Arc<T>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        // Fast path: a fresh entry is served off a brief read lock.
        if let Some(snapshot) = self.lookup(key) {
            trace!(key, "cache hit");
            return Ok(snapshot);
        }

        // Acquire the exclusive right to fetch this key. Callers for other
        // keys are unaffected: the flights map lock is released before we
        // await the per-key lock.
        let flight = self.flight_lock(key).await;
        let _guard = flight.lock().await;

        // Another caller may have published while we waited for the lock.
        if let Some(snapshot) = self.lookup(key) {
            debug!(key, "cache populated while waiting for fetch");
            return Ok(snapshot);
        }

        debug!(key, ttl_ms = ttl.as_millis() as u64, "cache miss, fetching");
        let started = Instant::now();
        let value = fetch().await?;
        debug!(
            key,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "fetch complete, publishing snapshot"
        );

        Ok(self.publish(key, value, ttl))
    }

    /// Whether a fresh entry currently exists for `key`. Never fetches.
    pub fn contains(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }

    fn lookup(&self, key: &str) -> Option<Arc<T>> {
        // A poisoned lock only means a writer panicked between map updates;
        // entries are inserted whole, so the map itself is still consistent.
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(key).filter(|entry| entry.is_fresh()).map(CacheEntry::snapshot)
    }

    async fn flight_lock(&self, key: &str) -> Arc<Mutex<()>> {
        let mut flights = self.flights.lock().await;
        match flights.get(key) {
            Some(lock) => Arc::clone(lock),
            None => {
                let lock = Arc::new(Mutex::new(()));
                flights.insert(key.to_string(), Arc::clone(&lock));
                lock
            }
        }
    }

    fn publish(&self, key: &str, value: T, ttl: Duration) -> Arc<T> {
        let entry = CacheEntry::new(value, ttl);
        let snapshot = entry.snapshot();
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), entry);
        snapshot
    }
}

impl<T> Default for SnapshotCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for SnapshotCache<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("SnapshotCache").field("keys", &entries.len()).finish_non_exhaustive()
    }
}

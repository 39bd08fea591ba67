//! Integration tests for the cached user store.
//!
//! These verify the end-to-end read-through behavior: one bulk load per TTL
//! window, stale reads until expiry, and single-flight loads under
//! concurrent queries.

use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use scour_store::{
    MemoryUserSource, SearchCriteria, SourceError, StoreConfig, User, UserSource, UserStore,
};
use tokio::sync::Barrier;

/// Source wrapper that counts bulk loads.
struct CountingSource {
    inner: MemoryUserSource,
    loads: AtomicUsize,
}

impl CountingSource {
    fn new(inner: MemoryUserSource) -> Self {
        Self { inner, loads: AtomicUsize::new(0) }
    }

    fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

impl UserSource for CountingSource {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn load_all(&self) -> Result<Vec<User>, SourceError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        self.inner.load_all().await
    }
}

fn dataset(tag: &str, count: u64) -> Vec<User> {
    (0..count).map(|i| User::new(i, format!("{tag} user {i}"), "Springfield", i as u32)).collect()
}

/// Seed D0, query within the TTL, reseed D1, and verify D1 only shows up
/// after expiry, with exactly two bulk loads overall.
#[tokio::test]
async fn test_reseed_is_visible_only_after_ttl() {
    let source = CountingSource::new(MemoryUserSource::new("users", dataset("d0", 10)));
    let store = UserStore::new(source, Duration::from_millis(60));

    let d0 = store.search(&SearchCriteria::any().name("d0")).await.unwrap();
    assert_eq!(d0.len(), 10);
    assert_eq!(store.source().loads(), 1);

    // Replace the backing dataset; the cached snapshot still serves D0.
    store.source().inner.seed(dataset("d1", 10));
    let still_d0 = store.search(&SearchCriteria::any().name("d0")).await.unwrap();
    assert_eq!(still_d0.len(), 10);
    assert_eq!(store.source().loads(), 1, "no load within the TTL");

    tokio::time::sleep(Duration::from_millis(70)).await;

    let d1 = store.search(&SearchCriteria::any().name("d1")).await.unwrap();
    assert_eq!(d1.len(), 10);
    assert_eq!(store.search(&SearchCriteria::any().name("d0")).await.unwrap().len(), 0);
    assert_eq!(store.source().loads(), 2, "exactly one refresh after expiry");
}

/// Concurrent queries on a cold store trigger a single bulk load.
#[tokio::test]
async fn test_concurrent_queries_load_once() {
    const CALLERS: usize = 12;

    let source = CountingSource::new(
        MemoryUserSource::new("users", dataset("d0", 500))
            .with_latency(Duration::from_millis(40)),
    );
    let store = Arc::new(UserStore::new(source, Duration::from_secs(60)));
    let barrier = Arc::new(Barrier::new(CALLERS));

    let mut handles = Vec::new();
    for i in 0..CALLERS {
        let store = Arc::clone(&store);
        let barrier = Arc::clone(&barrier);
        handles.push(tokio::spawn(async move {
            barrier.wait().await;
            if i % 2 == 0 {
                store.count(&SearchCriteria::any()).await.unwrap()
            } else {
                store.search(&SearchCriteria::any().min_reputation(250)).await.unwrap().len()
            }
        }));
    }

    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(store.source().loads(), 1, "concurrent cold queries must share one load");
}

/// A store built from config honors the configured TTL.
#[tokio::test]
async fn test_store_from_config() {
    let config = StoreConfig { cache_ttl: "50ms".to_string() };
    let source = CountingSource::new(MemoryUserSource::new("users", dataset("d0", 5)));
    let store = UserStore::from_config(source, &config).unwrap();

    store.count(&SearchCriteria::any()).await.unwrap();
    store.count(&SearchCriteria::any()).await.unwrap();
    assert_eq!(store.source().loads(), 1);

    tokio::time::sleep(Duration::from_millis(60)).await;
    store.count(&SearchCriteria::any()).await.unwrap();
    assert_eq!(store.source().loads(), 2);
}

/// Two stores over differently-named sources load independently.
#[tokio::test]
async fn test_distinct_sources_do_not_share_cache() {
    let blob = UserStore::new(MemoryUserSource::new("blob", dataset("blob", 3)), Duration::from_secs(60));
    let table =
        UserStore::new(MemoryUserSource::new("table", dataset("table", 7)), Duration::from_secs(60));

    assert_eq!(blob.count(&SearchCriteria::any()).await.unwrap(), 3);
    assert_eq!(table.count(&SearchCriteria::any()).await.unwrap(), 7);
}

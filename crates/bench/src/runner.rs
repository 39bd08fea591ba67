use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Instant,
};

use anyhow::Result;
use scour_store::{
    MemoryUserSource, SearchCriteria, SourceError, User, UserSource, UserStore, MAX_RESULTS,
};
use tracing::info;

use crate::{cli::Args, dataset::generate_users, stats::BenchReport};

/// Source wrapper that counts bulk loads, so the report can show how well the
/// cache deduplicated them.
struct InstrumentedSource<S> {
    inner: S,
    loads: AtomicUsize,
}

impl<S> InstrumentedSource<S> {
    fn new(inner: S) -> Self {
        Self { inner, loads: AtomicUsize::new(0) }
    }

    fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

impl<S: UserSource> UserSource for InstrumentedSource<S> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn load_all(&self) -> Result<Vec<User>, SourceError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        self.inner.load_all().await
    }
}

/// The rotating set of queries the workers issue.
fn workload_criteria() -> Vec<SearchCriteria> {
    vec![
        SearchCriteria::any(),
        SearchCriteria::any().name("ada"),
        SearchCriteria::any().name("son"),
        SearchCriteria::any().location("o"),
        SearchCriteria::any().location("berlin"),
        SearchCriteria::any().min_reputation(5_000),
        SearchCriteria::any().name("gr").min_reputation(2_500),
        SearchCriteria::any().location("to").min_reputation(7_500),
    ]
}

/// Main entry point for the benchmark.
pub async fn run_benchmark(args: Args) -> Result<()> {
    anyhow::ensure!(args.concurrency > 0, "--concurrency must be at least 1");
    let ttl = args.parse_cache_ttl()?;

    info!(
        users = args.users,
        requests = args.requests,
        concurrency = args.concurrency,
        source_latency_ms = args.source_latency_ms,
        cache_ttl = ?ttl,
        cached = !args.no_cache,
        "Starting scour benchmark"
    );

    let dataset = generate_users(args.users, args.seed);
    let source = InstrumentedSource::new(
        MemoryUserSource::new("users", dataset).with_latency(args.source_latency()),
    );
    let store = Arc::new(UserStore::new(source, ttl));
    let criteria = Arc::new(workload_criteria());

    let started = Instant::now();
    let mut handles = Vec::new();

    // Worker w handles requests w, w+concurrency, w+2*concurrency, ...
    for worker in 0..args.concurrency {
        let store = Arc::clone(&store);
        let criteria = Arc::clone(&criteria);
        let no_cache = args.no_cache;
        let requests = args.requests;
        let stride = args.concurrency as u64;

        handles.push(tokio::spawn(async move {
            let mut latencies = Vec::new();
            let mut request = worker as u64;
            while request < requests {
                let query = &criteria[request as usize % criteria.len()];
                let request_started = Instant::now();
                if no_cache {
                    let users = store.source().load_all().await?;
                    let _hits =
                        users.iter().filter(|user| query.matches(user)).take(MAX_RESULTS).count();
                } else {
                    store.search(query).await?;
                }
                latencies.push(request_started.elapsed().as_micros() as u64);
                request += stride;
            }
            Ok::<_, SourceError>(latencies)
        }));
    }

    let mut latencies = Vec::with_capacity(args.requests as usize);
    for handle in handles {
        latencies.extend(handle.await??);
    }

    let report = BenchReport::new(latencies, started.elapsed(), store.source().loads());
    report.log();
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn test_workload_criteria_is_non_empty() {
        assert!(!workload_criteria().is_empty());
    }

    #[tokio::test]
    async fn test_instrumented_source_counts_loads() {
        let source = InstrumentedSource::new(MemoryUserSource::new("users", Vec::new()));
        assert_eq!(source.loads(), 0);
        source.load_all().await.unwrap();
        source.load_all().await.unwrap();
        assert_eq!(source.loads(), 2);
    }

    #[tokio::test]
    async fn test_small_cached_run_completes() {
        let args = Args::try_parse_from([
            "scour-bench",
            "--users",
            "50",
            "--requests",
            "20",
            "--concurrency",
            "4",
            "--source-latency-ms",
            "0",
        ])
        .unwrap();
        run_benchmark(args).await.unwrap();
    }

    #[tokio::test]
    async fn test_small_uncached_run_completes() {
        let args = Args::try_parse_from([
            "scour-bench",
            "--users",
            "50",
            "--requests",
            "20",
            "--concurrency",
            "4",
            "--source-latency-ms",
            "0",
            "--no-cache",
        ])
        .unwrap();
        run_benchmark(args).await.unwrap();
    }

    #[tokio::test]
    async fn test_zero_concurrency_is_rejected() {
        let args = Args::try_parse_from(["scour-bench", "--concurrency", "0"]).unwrap();
        assert!(run_benchmark(args).await.is_err());
    }
}

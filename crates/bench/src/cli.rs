use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use scour_store::StoreConfig;

#[derive(Debug, Parser)]
#[command(name = "scour-bench")]
#[command(
    about = "Substring-search benchmark - seeds a synthetic users dataset behind a simulated slow source and runs concurrent searches through the snapshot cache"
)]
pub struct Args {
    // ========== Dataset Configuration ==========

    /// Number of synthetic users to generate
    #[arg(long, default_value = "10000")]
    pub users: u64,

    /// RNG seed for dataset generation (same seed, same dataset)
    #[arg(long, default_value = "42")]
    pub seed: u64,

    /// Simulated latency of one bulk load from the backing source, in milliseconds
    #[arg(long, default_value = "25")]
    pub source_latency_ms: u64,

    // ========== Workload Configuration ==========

    /// Total number of search requests to issue
    #[arg(long, default_value = "1000")]
    pub requests: u64,

    /// Number of concurrent workers
    #[arg(long, default_value = "16")]
    pub concurrency: usize,

    // ========== Cache Configuration ==========

    /// Snapshot TTL (e.g. "30s", "5m")
    #[arg(long, default_value = "5m")]
    pub cache_ttl: String,

    /// Bypass the cache entirely: every request performs its own bulk load
    #[arg(long)]
    pub no_cache: bool,

    /// Optional store config file; its cache_ttl takes precedence over --cache-ttl
    #[arg(long)]
    pub config: Option<String>,
}

impl Args {
    /// Effective snapshot TTL: the config file wins over the flag.
    pub fn parse_cache_ttl(&self) -> Result<Duration> {
        if let Some(path) = &self.config {
            return StoreConfig::load(path)?.parse_cache_ttl();
        }
        humantime::parse_duration(self.cache_ttl.trim())
            .with_context(|| format!("invalid --cache-ttl: {}", self.cache_ttl))
    }

    /// Simulated bulk-load latency.
    pub const fn source_latency(&self) -> Duration {
        Duration::from_millis(self.source_latency_ms)
    }
}

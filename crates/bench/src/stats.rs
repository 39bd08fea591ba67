//! Latency aggregation and the final benchmark report.

use std::time::Duration;

use tracing::info;

/// Aggregated results of one benchmark run.
#[derive(Debug)]
pub struct BenchReport {
    /// Per-request latencies in microseconds, sorted ascending.
    latencies_us: Vec<u64>,
    elapsed: Duration,
    source_loads: usize,
}

impl BenchReport {
    /// Build a report from raw per-request latencies.
    pub fn new(mut latencies_us: Vec<u64>, elapsed: Duration, source_loads: usize) -> Self {
        latencies_us.sort_unstable();
        Self { latencies_us, elapsed, source_loads }
    }

    /// Number of completed requests.
    pub fn requests(&self) -> usize {
        self.latencies_us.len()
    }

    /// Number of bulk loads the backing source served.
    pub const fn source_loads(&self) -> usize {
        self.source_loads
    }

    /// Wall-clock duration of the run.
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Requests per second over the whole run.
    pub fn throughput_rps(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs == 0.0 { 0.0 } else { self.requests() as f64 / secs }
    }

    /// Smallest observed latency in microseconds.
    pub fn min_us(&self) -> u64 {
        self.latencies_us.first().copied().unwrap_or(0)
    }

    /// Largest observed latency in microseconds.
    pub fn max_us(&self) -> u64 {
        self.latencies_us.last().copied().unwrap_or(0)
    }

    /// Mean latency in microseconds.
    pub fn avg_us(&self) -> f64 {
        if self.latencies_us.is_empty() {
            0.0
        } else {
            self.latencies_us.iter().sum::<u64>() as f64 / self.latencies_us.len() as f64
        }
    }

    /// Latency percentile (nearest-rank on the sorted samples).
    pub fn percentile(&self, p: f64) -> u64 {
        if self.latencies_us.is_empty() {
            return 0;
        }
        let rank = (p / 100.0 * (self.latencies_us.len() - 1) as f64).round() as usize;
        self.latencies_us[rank.min(self.latencies_us.len() - 1)]
    }

    /// Log the final report.
    pub fn log(&self) {
        info!(
            requests = self.requests(),
            elapsed_secs = format!("{:.2}", self.elapsed.as_secs_f64()),
            rps = format!("{:.1}", self.throughput_rps()),
            min_us = self.min_us(),
            avg_us = format!("{:.1}", self.avg_us()),
            p50_us = self.percentile(50.0),
            p99_us = self.percentile(99.0),
            max_us = self.max_us(),
            source_loads = self.source_loads,
            "Benchmark complete"
        );
    }
}

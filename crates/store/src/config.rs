//! File-based store configuration.

use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

fn default_cache_ttl() -> String {
    "5m".to_string()
}

/// Store settings loaded from a YAML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// How long a dataset snapshot stays fresh, as a humantime string
    /// ("30s", "5m", "1h").
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { cache_ttl: default_cache_ttl() }
    }
}

impl StoreConfig {
    /// Load the configuration from a YAML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {path}"))?;
        serde_yaml::from_str(&contents).context("failed to parse config YAML")
    }

    /// Parse the configured TTL.
    pub fn parse_cache_ttl(&self) -> Result<Duration> {
        humantime::parse_duration(self.cache_ttl.trim())
            .with_context(|| format!("invalid cache_ttl: {}", self.cache_ttl))
    }
}

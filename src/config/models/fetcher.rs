//! Upstream fetcher configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Which fetcher implementation to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FetcherMode {
    /// In-process fetcher with configurable latency, no real upstream
    #[default]
    Simulated,
    /// HTTP fetcher issuing one GET per item against the configured URL
    Http,
}

/// Upstream fetcher configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetcherConfig {
    /// Fetcher implementation selector
    #[serde(default)]
    pub mode: FetcherMode,
    /// Upstream URL template; `{id}` is replaced with the item identifier
    pub url: Option<String>,
    /// Per-request timeout in milliseconds (http mode)
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Base simulated latency in milliseconds (simulated mode)
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,
    /// Additional uniform jitter in milliseconds (simulated mode)
    #[serde(default)]
    pub jitter_ms: u64,
    /// Probability in [0, 1] that a simulated fetch fails
    #[serde(default)]
    pub failure_rate: f64,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            mode: FetcherMode::Simulated,
            url: None,
            timeout_ms: default_timeout_ms(),
            latency_ms: default_latency_ms(),
            jitter_ms: 0,
            failure_rate: 0.0,
        }
    }
}

impl FetcherConfig {
    /// Get the per-request timeout as a [`Duration`]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Get the base simulated latency as a [`Duration`]
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }

    /// Validate fetcher configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.mode == FetcherMode::Http {
            match &self.url {
                None => return Err("HTTP fetcher requires a url".to_string()),
                Some(url) if !url.contains("{id}") => {
                    return Err("Fetcher url must contain an {id} placeholder".to_string());
                }
                _ => {}
            }
            if self.timeout_ms == 0 {
                return Err("Fetcher timeout cannot be 0".to_string());
            }
        }

        if !(0.0..=1.0).contains(&self.failure_rate) {
            return Err("failure_rate must be within [0, 1]".to_string());
        }

        Ok(())
    }
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_latency_ms() -> u64 {
    250
}

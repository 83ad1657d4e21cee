//! Batch scheduler configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Batch scheduler configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Maximum number of item identifiers per batch
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Fixed cooldown between consecutive batch dispatches, in milliseconds
    #[serde(default = "default_cooldown_ms")]
    pub cooldown_ms: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            cooldown_ms: default_cooldown_ms(),
        }
    }
}

impl SchedulerConfig {
    /// Get the cooldown as a [`Duration`]
    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }

    /// Validate scheduler configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.batch_size == 0 {
            return Err("Batch size cannot be 0".to_string());
        }
        Ok(())
    }
}

fn default_batch_size() -> usize {
    3
}

fn default_cooldown_ms() -> u64 {
    1000
}

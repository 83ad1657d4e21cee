//! Application state shared across HTTP handlers
//!
//! This module provides the AppState struct and its implementations.

use crate::config::Config;
use crate::core::scheduler::BatchScheduler;
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// All fields are wrapped in Arc for efficient sharing across worker
/// threads; the scheduler is the single owner of queue and store state.
#[derive(Clone)]
pub struct AppState {
    /// Gateway configuration (shared read-only)
    pub config: Arc<Config>,
    /// Batch scheduler
    pub scheduler: Arc<BatchScheduler>,
}

impl AppState {
    /// Create a new AppState with shared resources
    pub fn new(config: Config, scheduler: BatchScheduler) -> Self {
        Self {
            config: Arc::new(config),
            scheduler: Arc::new(scheduler),
        }
    }

    /// Get gateway configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}

//! Configuration model types

pub mod fetcher;
pub mod scheduler;
pub mod server;

pub use fetcher::*;
pub use scheduler::*;
pub use server::*;

use serde::{Deserialize, Serialize};

/// Top-level gateway configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GatewayConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Batch scheduler configuration
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    /// Upstream fetcher configuration
    #[serde(default)]
    pub fetcher: FetcherConfig,
}

//! # fetchgate
//!
//! A batching fetch gateway written in Rust. Clients submit batches of item
//! identifiers over HTTP; the gateway groups them into fixed-size batches,
//! schedules them by priority, and fetches each batch against an upstream
//! resource under a global rate limit while exposing queryable status for
//! every submission.
//!
//! ## Features
//!
//! - **Priority scheduling**: HIGH / MEDIUM / LOW submissions, dispatched in
//!   priority order with FIFO ties
//! - **Fixed-size batching**: identifiers are chunked into batches (3 by
//!   default) that are fetched as one unit
//! - **Rate limiting**: a fixed cooldown between consecutive batch
//!   dispatches bounds upstream throughput
//! - **Single-flight draining**: one sequential worker, at most one batch in
//!   flight at any instant
//! - **Queryable status**: per-submission and per-batch lifecycle state over
//!   a JSON API
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fetchgate::{Config, Gateway};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/gateway.yaml").await?;
//!     let gateway = Gateway::new(config)?;
//!     gateway.run().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Embedded scheduler
//!
//! The scheduler can be driven without the HTTP layer:
//!
//! ```rust,no_run
//! use fetchgate::config::{FetcherConfig, SchedulerConfig};
//! use fetchgate::core::fetcher::build_fetcher;
//! use fetchgate::core::scheduler::{BatchScheduler, Priority};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let fetcher = build_fetcher(&FetcherConfig::default())?;
//! let scheduler = BatchScheduler::new(&SchedulerConfig::default(), fetcher);
//! let submission_id = scheduler.submit(vec!["item-1".into()], Priority::High)?;
//! let view = scheduler.submission(submission_id)?;
//! # Ok(())
//! # }
//! ```

#![warn(clippy::all)]

// Public module exports
pub mod config;
pub mod core;
pub mod server;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use utils::error::{GatewayError, Result};

// Export scheduler functionality
pub use core::fetcher::{HttpFetcher, ItemFetcher, SimulatedFetcher, build_fetcher};
pub use core::scheduler::{
    Batch, BatchScheduler, BatchStatus, Priority, SchedulerStats, Submission, SubmissionStatus,
    SubmissionView,
};

use tracing::info;

/// A minimal gateway implementation
pub struct Gateway {
    config: Config,
    server: server::HttpServer,
}

impl Gateway {
    /// Create a new gateway instance
    pub fn new(config: Config) -> Result<Self> {
        info!("Creating new gateway instance");

        // Create HTTP server
        let server = server::HttpServer::new(&config)?;

        Ok(Self { config, server })
    }

    /// Run the gateway server
    pub async fn run(self) -> Result<()> {
        info!("Starting fetchgate gateway");
        info!("Configuration: {:#?}", self.config);

        // Start HTTP server
        self.server.start().await?;

        Ok(())
    }
}

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(VERSION, env!("CARGO_PKG_VERSION"));
        assert_eq!(NAME, "fetchgate");
        assert!(!DESCRIPTION.is_empty());
    }
}

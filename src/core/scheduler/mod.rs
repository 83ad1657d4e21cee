//! Batch scheduling system
//!
//! This module groups submitted item identifiers into fixed-size batches,
//! keeps pending batches in priority order, and drains them one at a time
//! against the upstream fetcher under a fixed cooldown.

mod queue;
mod splitter;
mod store;
mod types;
mod worker;


// Re-export all public types
pub use queue::{PendingQueue, QueueEntry};
pub use splitter::split_ids;
pub use store::StatusStore;
pub use types::{Batch, BatchStatus, Priority, Submission, SubmissionStatus, SubmissionView};
pub use worker::{BatchScheduler, SchedulerStats};

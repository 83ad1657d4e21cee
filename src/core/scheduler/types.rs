//! Scheduler types and data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Scheduling priority, inherited by every batch of a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    /// Served before all other pending work
    High,
    /// Default priority
    #[default]
    Medium,
    /// Served only when nothing more urgent is pending
    Low,
}

impl Priority {
    /// Ordering rank; lower ranks are dispatched first
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }
}

/// Batch lifecycle status
///
/// Advances NOT_STARTED -> TRIGGERED -> DONE (or FAILED when any fetch in
/// the batch fails). Never regresses, never skips a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BatchStatus {
    /// Waiting in the pending queue
    NotStarted,
    /// Dispatched; item fetches are in flight
    Triggered,
    /// All item fetches completed successfully
    Done,
    /// At least one item fetch failed
    Failed,
}

impl BatchStatus {
    /// Whether the batch has reached a terminal status
    pub fn is_settled(self) -> bool {
        matches!(self, BatchStatus::Done | BatchStatus::Failed)
    }
}

/// Aggregate submission status, always derived from the batch statuses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubmissionStatus {
    /// No batch has been dispatched yet
    NotStarted,
    /// At least one batch was dispatched and not all have settled
    InProgress,
    /// Every batch completed successfully
    Done,
    /// Every batch settled and at least one failed
    Failed,
}

/// A fixed-size chunk of item identifiers processed as one scheduling unit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Batch {
    /// Unique batch ID
    pub batch_id: Uuid,
    /// Ordered item identifiers, immutable after creation
    pub ids: Vec<String>,
    /// Current lifecycle status
    pub status: BatchStatus,
    /// Priority inherited from the owning submission
    pub priority: Priority,
    /// Creation timestamp, shared by all batches of one submission
    pub created_at: DateTime<Utc>,
    /// Monotonic ingestion sequence number, the scheduling tie-break
    #[serde(skip)]
    pub submit_seq: u64,
}

/// One client request grouping many item identifiers, tracked as a unit
#[derive(Debug, Clone)]
pub struct Submission {
    /// Unique submission ID
    pub submission_id: Uuid,
    /// Batches in splitting order
    pub batches: Vec<Batch>,
}

impl Submission {
    /// Derive the aggregate status from the batch statuses.
    pub fn status(&self) -> SubmissionStatus {
        let all_settled = self.batches.iter().all(|b| b.status.is_settled());
        if all_settled {
            if self.batches.iter().any(|b| b.status == BatchStatus::Failed) {
                return SubmissionStatus::Failed;
            }
            return SubmissionStatus::Done;
        }

        // A batch past NOT_STARTED keeps the submission in progress even
        // while no fetch is currently in flight (e.g. during a cooldown),
        // so the aggregate status never moves backwards.
        if self
            .batches
            .iter()
            .any(|b| b.status != BatchStatus::NotStarted)
        {
            SubmissionStatus::InProgress
        } else {
            SubmissionStatus::NotStarted
        }
    }

    /// Build the serializable view returned by the query interface.
    pub fn view(&self) -> SubmissionView {
        SubmissionView {
            submission_id: self.submission_id,
            status: self.status(),
            batches: self.batches.clone(),
        }
    }
}

/// Wire view of a submission, returned by the query endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionView {
    /// Submission ID
    pub submission_id: Uuid,
    /// Derived aggregate status
    pub status: SubmissionStatus,
    /// Batches in splitting order
    pub batches: Vec<Batch>,
}

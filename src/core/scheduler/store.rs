//! In-memory status store

use super::types::{BatchStatus, Submission};
use std::collections::HashMap;
use uuid::Uuid;

/// Process-lifetime store of submissions and their batch statuses
///
/// Batch updates are routed through a batch-id index to the owning
/// submission, so a status transition costs one hash lookup instead of a
/// scan over every submission.
#[derive(Debug, Default)]
pub struct StatusStore {
    submissions: HashMap<Uuid, Submission>,
    batch_owner: HashMap<Uuid, Uuid>,
}

impl StatusStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new submission together with its full batch set
    pub fn insert(&mut self, submission: Submission) {
        for batch in &submission.batches {
            self.batch_owner
                .insert(batch.batch_id, submission.submission_id);
        }
        self.submissions
            .insert(submission.submission_id, submission);
    }

    /// Replace the stored status of one batch
    ///
    /// Returns false when the batch id is unknown; callers treat that as a
    /// broken-invariant signal, not a fatal error.
    pub fn apply_batch_status(&mut self, batch_id: Uuid, status: BatchStatus) -> bool {
        let Some(owner) = self.batch_owner.get(&batch_id) else {
            return false;
        };
        let Some(submission) = self.submissions.get_mut(owner) else {
            return false;
        };
        match submission
            .batches
            .iter_mut()
            .find(|b| b.batch_id == batch_id)
        {
            Some(batch) => {
                batch.status = status;
                true
            }
            None => false,
        }
    }

    /// Look up a submission by id
    pub fn get(&self, submission_id: &Uuid) -> Option<&Submission> {
        self.submissions.get(submission_id)
    }

    /// Number of tracked submissions
    pub fn len(&self) -> usize {
        self.submissions.len()
    }

    /// Whether the store holds no submissions
    pub fn is_empty(&self) -> bool {
        self.submissions.is_empty()
    }
}

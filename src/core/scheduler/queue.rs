//! Priority-ordered pending queue

use super::types::{Batch, Priority};
use uuid::Uuid;

/// Scheduling handle for one pending batch
///
/// The queue holds only what dispatching needs: the batch id, the immutable
/// item identifiers, and the ordering keys. All status mutation flows back
/// through the owning submission in the status store.
#[derive(Debug, Clone)]
pub struct QueueEntry {
    /// Batch ID, the key back into the status store
    pub batch_id: Uuid,
    /// Item identifiers to fetch when this batch is dispatched
    pub ids: Vec<String>,
    /// Scheduling priority
    pub priority: Priority,
    /// Ingestion sequence number, the tie-break within a priority class
    pub submit_seq: u64,
}

impl From<&Batch> for QueueEntry {
    fn from(batch: &Batch) -> Self {
        Self {
            batch_id: batch.batch_id,
            ids: batch.ids.clone(),
            priority: batch.priority,
            submit_seq: batch.submit_seq,
        }
    }
}

/// Pending batches, kept sorted by (priority rank, ingestion order)
///
/// The queue is fully re-sorted after every bulk insert, so the front is
/// always the most urgent batch before the next dequeue. The sort is stable:
/// batches of one submission keep their splitting order.
#[derive(Debug, Default)]
pub struct PendingQueue {
    entries: Vec<QueueEntry>,
}

impl PendingQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one ingestion's batches and restore scheduling order
    pub fn extend<I: IntoIterator<Item = QueueEntry>>(&mut self, batches: I) {
        self.entries.extend(batches);
        self.entries
            .sort_by_key(|entry| (entry.priority.rank(), entry.submit_seq));
    }

    /// Remove and return the front-most batch by scheduling order
    pub fn pop_front(&mut self) -> Option<QueueEntry> {
        if self.entries.is_empty() {
            None
        } else {
            Some(self.entries.remove(0))
        }
    }

    /// Whether no batches are pending
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of pending batches
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

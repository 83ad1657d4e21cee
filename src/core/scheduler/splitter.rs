//! Batch splitting

use super::types::{Batch, BatchStatus, Priority};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Split an ordered identifier list into contiguous batches of at most
/// `batch_size` elements.
///
/// Item order is preserved both across and within batches; 7 identifiers
/// with a batch size of 3 yield groups of 3, 3 and 1. All batches share the
/// submission's `created_at` and `submit_seq` so pending-queue ties break by
/// ingestion order rather than by per-batch timing skew.
///
/// Callers validate that `ids` is non-empty before splitting.
pub fn split_ids(
    ids: Vec<String>,
    batch_size: usize,
    priority: Priority,
    created_at: DateTime<Utc>,
    submit_seq: u64,
) -> Vec<Batch> {
    ids.chunks(batch_size.max(1))
        .map(|chunk| Batch {
            batch_id: Uuid::new_v4(),
            ids: chunk.to_vec(),
            status: BatchStatus::NotStarted,
            priority,
            created_at,
            submit_seq,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("item-{}", i)).collect()
    }

    #[test]
    fn test_split_sizes() {
        let batches = split_ids(ids(7), 3, Priority::Medium, Utc::now(), 1);
        assert_eq!(batches.len(), 3);
        assert_eq!(batches[0].ids.len(), 3);
        assert_eq!(batches[1].ids.len(), 3);
        assert_eq!(batches[2].ids.len(), 1);
    }

    #[test]
    fn test_split_yields_ceil_batches() {
        for n in 1..=10 {
            let batches = split_ids(ids(n), 3, Priority::Low, Utc::now(), 1);
            assert_eq!(batches.len(), n.div_ceil(3));
            assert!(batches.iter().all(|b| b.ids.len() <= 3));
        }
    }

    #[test]
    fn test_split_preserves_order() {
        let batches = split_ids(ids(8), 3, Priority::High, Utc::now(), 1);
        let flattened: Vec<String> = batches.iter().flat_map(|b| b.ids.clone()).collect();
        assert_eq!(flattened, ids(8));
    }

    #[test]
    fn test_split_initial_state() {
        let created_at = Utc::now();
        let batches = split_ids(ids(5), 3, Priority::High, created_at, 42);
        for batch in &batches {
            assert_eq!(batch.status, BatchStatus::NotStarted);
            assert_eq!(batch.priority, Priority::High);
            assert_eq!(batch.created_at, created_at);
            assert_eq!(batch.submit_seq, 42);
        }
        // Fresh unique ids per batch
        assert_ne!(batches[0].batch_id, batches[1].batch_id);
    }
}

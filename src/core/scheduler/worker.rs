//! Batch scheduler entry points and drain loop

use super::queue::{PendingQueue, QueueEntry};
use super::splitter::split_ids;
use super::store::StatusStore;
use super::types::{BatchStatus, Priority, Submission, SubmissionView};
use crate::config::SchedulerConfig;
use crate::core::fetcher::ItemFetcher;
use crate::utils::error::{GatewayError, Result};
use chrono::Utc;
use futures::future::join_all;
use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Snapshot of scheduler state, served by the status endpoint
#[derive(Debug, Clone, Serialize)]
pub struct SchedulerStats {
    /// Batches waiting in the pending queue
    pub queued_batches: usize,
    /// Tracked submissions since startup
    pub submissions: usize,
    /// Whether the drain loop is currently running
    pub draining: bool,
}

/// The batch scheduler
///
/// Owns the pending queue and the status store behind explicit entry points
/// ([`submit`](Self::submit), [`submission`](Self::submission),
/// [`stats`](Self::stats)); no shared mutable collection leaks to callers.
/// A single drain task dispatches one batch at a time, separated by a fixed
/// cooldown.
#[derive(Clone)]
pub struct BatchScheduler {
    inner: Arc<SchedulerInner>,
}

struct SchedulerInner {
    queue: Mutex<PendingQueue>,
    store: RwLock<StatusStore>,
    fetcher: Arc<dyn ItemFetcher>,
    batch_size: usize,
    cooldown: Duration,
    /// Drain guard: true while the single drain task is alive
    draining: AtomicBool,
    next_seq: AtomicU64,
}

impl BatchScheduler {
    /// Create a scheduler over the given fetcher
    pub fn new(config: &SchedulerConfig, fetcher: Arc<dyn ItemFetcher>) -> Self {
        Self {
            inner: Arc::new(SchedulerInner {
                queue: Mutex::new(PendingQueue::new()),
                store: RwLock::new(StatusStore::new()),
                fetcher,
                batch_size: config.batch_size,
                cooldown: config.cooldown(),
                draining: AtomicBool::new(false),
                next_seq: AtomicU64::new(0),
            }),
        }
    }

    /// Accept a new submission: split, record, enqueue, wake the drain loop.
    ///
    /// Fails with [`GatewayError::InvalidRequest`] when `ids` is empty; a
    /// submission that could never progress is a client error, not an
    /// instantly completed no-op.
    pub fn submit(&self, ids: Vec<String>, priority: Priority) -> Result<Uuid> {
        if ids.is_empty() {
            return Err(GatewayError::InvalidRequest(
                "ids must be a non-empty list".to_string(),
            ));
        }

        let submission_id = Uuid::new_v4();
        let submit_seq = self.inner.next_seq.fetch_add(1, Ordering::Relaxed);
        let batches = split_ids(ids, self.inner.batch_size, priority, Utc::now(), submit_seq);
        let entries: Vec<QueueEntry> = batches.iter().map(QueueEntry::from).collect();

        info!(
            %submission_id,
            batches = batches.len(),
            ?priority,
            "accepted submission"
        );

        self.inner.store.write().insert(Submission {
            submission_id,
            batches,
        });
        self.inner.queue.lock().extend(entries);

        self.ensure_draining();
        Ok(submission_id)
    }

    /// Query a submission by id
    pub fn submission(&self, submission_id: Uuid) -> Result<SubmissionView> {
        self.inner
            .store
            .read()
            .get(&submission_id)
            .map(Submission::view)
            .ok_or_else(|| GatewayError::NotFound(format!("Unknown submission: {}", submission_id)))
    }

    /// Snapshot queue depth and store size
    pub fn stats(&self) -> SchedulerStats {
        SchedulerStats {
            queued_batches: self.inner.queue.lock().len(),
            submissions: self.inner.store.read().len(),
            draining: self.inner.draining.load(Ordering::Acquire),
        }
    }

    /// Spawn the drain task unless one is already running
    fn ensure_draining(&self) {
        if self
            .inner
            .draining
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            let inner = Arc::clone(&self.inner);
            tokio::spawn(async move {
                SchedulerInner::run(inner).await;
            });
        }
    }
}

impl SchedulerInner {
    /// Drive the drain loop until the queue stays empty.
    async fn run(inner: Arc<SchedulerInner>) {
        loop {
            inner.drain().await;
            inner.draining.store(false, Ordering::Release);

            // A submission may have raced in between the final empty check
            // and the flag clear; re-acquire the guard and keep draining so
            // no batch is stranded.
            if inner.queue.lock().is_empty() {
                break;
            }
            if inner
                .draining
                .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
                .is_err()
            {
                break;
            }
        }
    }

    /// Dispatch pending batches one at a time with a cooldown in between.
    async fn drain(&self) {
        debug!("drain loop started");

        loop {
            let entry = self.queue.lock().pop_front();
            let Some(entry) = entry else {
                break;
            };

            // Publish the in-flight transition before any fetch starts so
            // polling clients observe it.
            self.apply_status(entry.batch_id, BatchStatus::Triggered);

            let results = join_all(entry.ids.iter().map(|id| self.fetcher.fetch(id))).await;
            let failures = results.iter().filter(|r| r.is_err()).count();

            let status = if failures == 0 {
                BatchStatus::Done
            } else {
                warn!(
                    batch_id = %entry.batch_id,
                    failures,
                    items = entry.ids.len(),
                    "batch settled with failed fetches"
                );
                BatchStatus::Failed
            };
            self.apply_status(entry.batch_id, status);

            // No trailing pause when the queue just went empty.
            if self.queue.lock().is_empty() {
                break;
            }
            tokio::time::sleep(self.cooldown).await;
        }

        debug!("drain loop idle");
    }

    fn apply_status(&self, batch_id: Uuid, status: BatchStatus) {
        let found = self.store.write().apply_batch_status(batch_id, status);
        if !found {
            warn!(%batch_id, ?status, "batch missing from status store");
        }
    }
}

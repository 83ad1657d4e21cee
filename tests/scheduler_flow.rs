//! End-to-end scheduler flow tests against the public crate surface

use async_trait::async_trait;
use fetchgate::config::{FetcherConfig, SchedulerConfig};
use fetchgate::core::fetcher::build_fetcher;
use fetchgate::{
    BatchScheduler, BatchStatus, GatewayError, ItemFetcher, Priority, Result, SubmissionStatus,
};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Fetcher that records dispatch order and sleeps a fixed latency
struct TracingFetcher {
    latency: Duration,
    calls: Mutex<Vec<(String, Instant)>>,
}

impl TracingFetcher {
    fn new(latency: Duration) -> Arc<Self> {
        Arc::new(Self {
            latency,
            calls: Mutex::new(Vec::new()),
        })
    }

    fn call_order(&self) -> Vec<String> {
        self.calls.lock().iter().map(|(id, _)| id.clone()).collect()
    }

    fn stamp(&self, item_id: &str) -> Instant {
        self.calls
            .lock()
            .iter()
            .find(|(id, _)| id == item_id)
            .map(|(_, at)| *at)
            .expect("item was never fetched")
    }
}

#[async_trait]
impl ItemFetcher for TracingFetcher {
    async fn fetch(&self, item_id: &str) -> Result<()> {
        self.calls
            .lock()
            .push((item_id.to_string(), Instant::now()));
        tokio::time::sleep(self.latency).await;
        Ok(())
    }
}

fn make_scheduler(fetcher: Arc<dyn ItemFetcher>, cooldown_ms: u64) -> BatchScheduler {
    BatchScheduler::new(
        &SchedulerConfig {
            batch_size: 3,
            cooldown_ms,
        },
        fetcher,
    )
}

fn ids(prefix: &str, n: usize) -> Vec<String> {
    (0..n).map(|i| format!("{}-{}", prefix, i)).collect()
}

async fn wait_until_done(scheduler: &BatchScheduler, submission_id: Uuid) {
    wait_for(scheduler, submission_id, SubmissionStatus::Done).await;
}

async fn wait_for(scheduler: &BatchScheduler, submission_id: Uuid, expected: SubmissionStatus) {
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        let view = scheduler.submission(submission_id).unwrap();
        if view.status == expected {
            return;
        }
        assert!(
            Instant::now() < deadline,
            "timed out waiting for {:?}, last status {:?}",
            expected,
            view.status
        );
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}

#[tokio::test]
async fn seven_ids_default_priority_drain() {
    let fetcher = TracingFetcher::new(Duration::from_millis(20));
    let scheduler = make_scheduler(fetcher.clone(), 10);

    // MEDIUM is the default priority, and it outranks a concurrently
    // submitted LOW submission.
    let medium = scheduler
        .submit(ids("med", 7), Priority::default())
        .unwrap();
    let low = scheduler.submit(ids("low", 1), Priority::Low).unwrap();

    let view = scheduler.submission(medium).unwrap();
    assert_eq!(view.status, SubmissionStatus::NotStarted);
    let sizes: Vec<usize> = view.batches.iter().map(|b| b.ids.len()).collect();
    assert_eq!(sizes, vec![3, 3, 1]);

    wait_until_done(&scheduler, medium).await;
    wait_until_done(&scheduler, low).await;

    // Every MEDIUM batch dispatched before the LOW batch.
    let calls = fetcher.call_order();
    let low_pos = calls.iter().position(|id| id == "low-0").unwrap();
    for i in 0..7 {
        let med_pos = calls.iter().position(|id| id == &format!("med-{}", i)).unwrap();
        assert!(med_pos < low_pos, "LOW dispatched before MEDIUM: {:?}", calls);
    }
}

#[tokio::test]
async fn cooldown_separates_consecutive_dispatches() {
    let cooldown = Duration::from_millis(100);
    let fetcher = TracingFetcher::new(Duration::from_millis(1));
    let scheduler = make_scheduler(fetcher.clone(), cooldown.as_millis() as u64);

    let submission_id = scheduler.submit(ids("item", 6), Priority::Medium).unwrap();
    wait_until_done(&scheduler, submission_id).await;

    let first = fetcher.stamp("item-0");
    let second = fetcher.stamp("item-3");
    assert!(
        second.duration_since(first) >= cooldown,
        "batches dispatched {:?} apart",
        second.duration_since(first)
    );
}

#[tokio::test]
async fn triggered_state_is_observable_mid_flight() {
    let fetcher = TracingFetcher::new(Duration::from_millis(200));
    let scheduler = make_scheduler(fetcher, 10);

    let submission_id = scheduler.submit(ids("item", 2), Priority::High).unwrap();

    // Poll until the batch reports in-flight, well before the fetch settles.
    let deadline = Instant::now() + Duration::from_secs(2);
    loop {
        let view = scheduler.submission(submission_id).unwrap();
        if view.batches[0].status == BatchStatus::Triggered {
            assert_eq!(view.status, SubmissionStatus::InProgress);
            break;
        }
        assert!(Instant::now() < deadline, "batch never reported TRIGGERED");
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    wait_until_done(&scheduler, submission_id).await;
}

#[tokio::test]
async fn simulated_failures_fail_the_submission() {
    let fetcher = build_fetcher(&FetcherConfig {
        latency_ms: 1,
        failure_rate: 1.0,
        ..FetcherConfig::default()
    })
    .unwrap();
    let scheduler = make_scheduler(fetcher, 10);

    let submission_id = scheduler.submit(ids("item", 4), Priority::Medium).unwrap();
    wait_for(&scheduler, submission_id, SubmissionStatus::Failed).await;

    let view = scheduler.submission(submission_id).unwrap();
    assert!(view.batches.iter().all(|b| b.status == BatchStatus::Failed));
}

#[tokio::test]
async fn unknown_submission_query_fails() {
    let fetcher = TracingFetcher::new(Duration::from_millis(1));
    let scheduler = make_scheduler(fetcher, 10);

    let err = scheduler.submission(Uuid::new_v4()).unwrap_err();
    assert!(matches!(err, GatewayError::NotFound(_)));
}

#[tokio::test]
async fn empty_submission_is_invalid() {
    let fetcher = TracingFetcher::new(Duration::from_millis(1));
    let scheduler = make_scheduler(fetcher, 10);

    let err = scheduler.submit(Vec::new(), Priority::High).unwrap_err();
    assert!(matches!(err, GatewayError::InvalidRequest(_)));
}

#[tokio::test]
async fn late_submission_reuses_running_drain() {
    let fetcher = TracingFetcher::new(Duration::from_millis(30));
    let scheduler = make_scheduler(fetcher, 10);

    let first = scheduler.submit(ids("first", 1), Priority::Medium).unwrap();
    // Let the drain start, then feed it more work while it is busy.
    tokio::time::sleep(Duration::from_millis(5)).await;
    let second = scheduler.submit(ids("second", 1), Priority::Medium).unwrap();

    wait_until_done(&scheduler, first).await;
    wait_until_done(&scheduler, second).await;
}

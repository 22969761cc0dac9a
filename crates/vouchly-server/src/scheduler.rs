//! Background scrape scheduling.
//!
//! Initialises a [`JobScheduler`] at server startup and registers the
//! recurring scrape cycle on the configured cron expression.

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

use vouchly_scraper::VoucherSource;
use vouchly_store::{DiskStore, SnapshotHandle};

use crate::cycle::run_cycle;

/// Owns everything one scrape cycle needs, plus the in-flight guard that
/// keeps cycles non-reentrant.
pub struct CycleRunner {
    sources: Vec<Arc<dyn VoucherSource>>,
    store: Arc<DiskStore>,
    snapshot: SnapshotHandle,
    in_flight: Mutex<()>,
}

impl CycleRunner {
    pub fn new(
        sources: Vec<Arc<dyn VoucherSource>>,
        store: Arc<DiskStore>,
        snapshot: SnapshotHandle,
    ) -> Self {
        Self {
            sources,
            store,
            snapshot,
            in_flight: Mutex::new(()),
        }
    }

    /// Runs one scrape cycle, unless a cycle is already in flight; an
    /// overlapping trigger is skipped with a warning rather than queued.
    pub async fn run_guarded(&self) {
        let Ok(_guard) = self.in_flight.try_lock() else {
            tracing::warn!("scheduler: scrape cycle already in flight; skipping this trigger");
            return;
        };
        run_cycle(&self.sources, &self.store, &self.snapshot).await;
    }
}

/// Builds and starts the background job scheduler.
///
/// Returns the running [`JobScheduler`] handle, which must be kept alive
/// for the lifetime of the process; dropping it stops all jobs.
///
/// # Errors
///
/// Returns [`JobSchedulerError`] if the scheduler cannot be initialised,
/// the cron expression is invalid, or the scheduler fails to start.
pub async fn build_scheduler(
    runner: Arc<CycleRunner>,
    cron: &str,
) -> Result<JobScheduler, JobSchedulerError> {
    let scheduler = JobScheduler::new().await?;

    let job = Job::new_async(cron, move |_uuid, _lock| {
        let runner = Arc::clone(&runner);
        Box::pin(async move {
            tracing::info!("scheduler: starting scheduled scrape cycle");
            runner.run_guarded().await;
            tracing::info!("scheduler: scheduled scrape cycle complete");
        })
    })?;
    scheduler.add(job).await?;

    scheduler.start().await?;
    Ok(scheduler)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;

    use vouchly_core::SourceId;
    use vouchly_scraper::RawListing;
    use vouchly_store::Snapshot;

    struct SlowSource {
        calls: Arc<AtomicU32>,
        hold: Duration,
    }

    #[async_trait]
    impl VoucherSource for SlowSource {
        fn id(&self) -> SourceId {
            SourceId::Amazon
        }

        async fn fetch_all(&self) -> Vec<RawListing> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.hold).await;
            Vec::new()
        }
    }

    fn runner_with(calls: Arc<AtomicU32>, hold: Duration, dir: &std::path::Path) -> CycleRunner {
        CycleRunner::new(
            vec![Arc::new(SlowSource { calls, hold })],
            Arc::new(DiskStore::new(dir)),
            SnapshotHandle::new(Snapshot::empty()),
        )
    }

    #[tokio::test]
    async fn overlapping_cycle_is_skipped() {
        let calls = Arc::new(AtomicU32::new(0));
        let dir = tempfile::tempdir().unwrap();
        let runner = Arc::new(runner_with(
            Arc::clone(&calls),
            Duration::from_millis(200),
            dir.path(),
        ));

        let first = tokio::spawn({
            let runner = Arc::clone(&runner);
            async move { runner.run_guarded().await }
        });
        tokio::time::sleep(Duration::from_millis(50)).await;
        // The first cycle is still inside fetch_all; this one must bail.
        runner.run_guarded().await;
        first.await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn sequential_cycles_both_run() {
        let calls = Arc::new(AtomicU32::new(0));
        let dir = tempfile::tempdir().unwrap();
        let runner = runner_with(Arc::clone(&calls), Duration::ZERO, dir.path());

        runner.run_guarded().await;
        runner.run_guarded().await;

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}

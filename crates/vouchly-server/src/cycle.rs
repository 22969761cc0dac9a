//! One scrape-normalize-persist-publish pass over every configured source.

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future;
use tracing::{info, warn};

use vouchly_core::{SourceId, VoucherRecord};
use vouchly_scraper::{normalize_listing, VoucherSource};
use vouchly_store::{DiskStore, Snapshot, SnapshotHandle};

/// Per-source outcome of one cycle.
#[derive(Debug)]
pub struct SourceSummary {
    pub source: SourceId,
    pub raw: usize,
    pub kept: usize,
    pub elapsed: Duration,
}

/// Fetches every source concurrently, normalizes and persists each source's
/// records, then publishes the merged corpus in one snapshot swap.
///
/// A source that fails entirely contributes an empty vector (the adapter
/// contract), and a cycle that yields nothing overall still publishes: an
/// empty snapshot is truthful. A failed document write keeps the previous
/// document on disk while the fresh records still count toward this
/// cycle's snapshot.
pub async fn run_cycle(
    sources: &[Arc<dyn VoucherSource>],
    store: &DiskStore,
    snapshot: &SnapshotHandle,
) -> Vec<SourceSummary> {
    let started = Instant::now();

    let fetches = sources.iter().map(|source| {
        let source = Arc::clone(source);
        async move {
            let began = Instant::now();
            let listings = source.fetch_all().await;
            (source.id(), listings, began.elapsed())
        }
    });
    let outcomes = future::join_all(fetches).await;

    let mut merged: Vec<VoucherRecord> = Vec::new();
    let mut summaries = Vec::with_capacity(outcomes.len());
    for (source, listings, elapsed) in outcomes {
        let raw = listings.len();
        let records: Vec<VoucherRecord> = listings
            .into_iter()
            .filter_map(|listing| normalize_listing(listing, source))
            .collect();

        if let Err(error) = store.write_source(source, &records) {
            warn!(source = %source, error = %error, "failed to persist voucher document");
        }

        info!(
            source = %source,
            raw,
            kept = records.len(),
            elapsed = ?elapsed,
            "source collected"
        );
        summaries.push(SourceSummary {
            source,
            raw,
            kept: records.len(),
            elapsed,
        });
        merged.extend(records);
    }

    let total = merged.len();
    snapshot.publish(Snapshot::new(merged)).await;
    info!(records = total, elapsed = ?started.elapsed(), "cycle published");

    summaries
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use vouchly_scraper::RawListing;

    struct StubSource {
        id: SourceId,
        listings: Vec<RawListing>,
    }

    #[async_trait]
    impl VoucherSource for StubSource {
        fn id(&self) -> SourceId {
            self.id
        }

        async fn fetch_all(&self) -> Vec<RawListing> {
            self.listings.clone()
        }
    }

    fn listing(title: &str) -> RawListing {
        RawListing {
            title: title.to_string(),
            url: Some(format!("https://example.com/{title}")),
            ..RawListing::default()
        }
    }

    fn stub(id: SourceId, titles: &[&str]) -> Arc<dyn VoucherSource> {
        Arc::new(StubSource {
            id,
            listings: titles.iter().map(|t| listing(t)).collect(),
        })
    }

    #[tokio::test]
    async fn cycle_persists_and_publishes_merged_records() {
        let dir = tempfile::tempdir().unwrap();
        let store = DiskStore::new(dir.path());
        let snapshot = SnapshotHandle::new(Snapshot::empty());
        let sources = vec![
            stub(SourceId::Amazon, &["Amazon Pay Gift Card"]),
            stub(SourceId::MaxMoney, &["Swiggy Voucher", "Zomato Voucher"]),
        ];

        let summaries = run_cycle(&sources, &store, &snapshot).await;

        let current = snapshot.current().await;
        assert_eq!(current.records.len(), 3);
        assert_eq!(current.records[0].name, "Amazon Pay Gift Card");
        assert_eq!(current.records[0].site_name, SourceId::Amazon);
        assert_eq!(current.records[2].site_name, SourceId::MaxMoney);

        assert!(store.document_path(SourceId::Amazon).exists());
        assert!(store.document_path(SourceId::MaxMoney).exists());

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].raw, 1);
        assert_eq!(summaries[1].kept, 2);
    }

    #[tokio::test]
    async fn empty_cycle_still_publishes() {
        let dir = tempfile::tempdir().unwrap();
        let store = DiskStore::new(dir.path());
        let snapshot = SnapshotHandle::new(Snapshot::new(vec![vouchly_core::VoucherRecord {
            name: "Stale".to_string(),
            discount_pct: 5,
            url: "https://example.com/stale".to_string(),
            image_url: None,
            site_name: SourceId::Amazon,
            in_stock: true,
        }]));
        let sources = vec![stub(SourceId::Amazon, &[])];

        run_cycle(&sources, &store, &snapshot).await;

        assert!(
            snapshot.current().await.records.is_empty(),
            "an empty cycle must replace the stale snapshot"
        );
    }

    #[tokio::test]
    async fn persistence_failure_keeps_the_in_memory_contribution() {
        let dir = tempfile::tempdir().unwrap();
        // Pointing the store at a file makes create_dir_all fail.
        let blocker = dir.path().join("occupied");
        std::fs::write(&blocker, b"x").unwrap();
        let store = DiskStore::new(&blocker);
        let snapshot = SnapshotHandle::new(Snapshot::empty());
        let sources = vec![stub(SourceId::Amazon, &["Amazon Pay Gift Card"])];

        run_cycle(&sources, &store, &snapshot).await;

        assert_eq!(snapshot.current().await.records.len(), 1);
    }
}

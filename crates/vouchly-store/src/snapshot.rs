//! Shared in-memory snapshot of the merged voucher corpus.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use vouchly_core::VoucherRecord;

/// One immutable view of the corpus, stamped when it was built.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub records: Vec<VoucherRecord>,
    pub refreshed_at: DateTime<Utc>,
}

impl Snapshot {
    #[must_use]
    pub fn new(records: Vec<VoucherRecord>) -> Self {
        Self {
            records,
            refreshed_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }
}

/// Handle shared between the refresh cycle (writer) and request handlers
/// (readers).
///
/// Readers clone out the current `Arc`, so a publish mid-request never
/// mutates a corpus a handler is already ranking over; the old snapshot
/// is dropped when its last reader finishes.
#[derive(Clone)]
pub struct SnapshotHandle {
    inner: Arc<RwLock<Arc<Snapshot>>>,
}

impl SnapshotHandle {
    #[must_use]
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(snapshot))),
        }
    }

    /// The currently published snapshot.
    pub async fn current(&self) -> Arc<Snapshot> {
        Arc::clone(&*self.inner.read().await)
    }

    /// Atomically replaces the published snapshot.
    pub async fn publish(&self, snapshot: Snapshot) {
        *self.inner.write().await = Arc::new(snapshot);
    }
}

//! Persistence for voucher corpora: per-source JSON documents on disk and
//! the in-memory snapshot served to request handlers.

pub mod disk;
pub mod error;
pub mod snapshot;

pub use disk::DiskStore;
pub use error::StoreError;
pub use snapshot::{Snapshot, SnapshotHandle};

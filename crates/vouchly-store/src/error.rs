use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced by the write side of the store.
///
/// Reads deliberately do not return this type; an unreadable document is
/// logged and skipped so one bad file never empties the whole corpus.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io failure on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("voucher records could not be encoded: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("malformed voucher document {}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

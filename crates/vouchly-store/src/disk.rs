//! Per-source voucher documents on disk.
//!
//! Each source owns one `<source>.json` document under the data directory.
//! Writes land in a sibling `.json.tmp` file first and are renamed into
//! place, so a crash mid-write never leaves a truncated document behind.
//! Reads are lenient: a missing directory or an unreadable document
//! degrades to an empty contribution instead of failing the caller.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use vouchly_core::{SourceId, VoucherRecord};

use crate::error::StoreError;

pub struct DiskStore {
    dir: PathBuf,
}

impl DiskStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the document a source persists to.
    #[must_use]
    pub fn document_path(&self, source: SourceId) -> PathBuf {
        self.dir.join(format!("{}.json", source.as_str()))
    }

    /// Replaces the persisted document for `source` with `records`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Encode`] if the records cannot be serialized,
    /// or [`StoreError::Io`] if the directory, temp file, or rename fails.
    pub fn write_source(
        &self,
        source: SourceId,
        records: &[VoucherRecord],
    ) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).map_err(|err| StoreError::Io {
            path: self.dir.clone(),
            source: err,
        })?;

        let body = serde_json::to_vec_pretty(records).map_err(StoreError::Encode)?;
        let path = self.document_path(source);
        let tmp = path.with_extension("json.tmp");

        fs::write(&tmp, &body).map_err(|err| StoreError::Io {
            path: tmp.clone(),
            source: err,
        })?;
        fs::rename(&tmp, &path).map_err(|err| StoreError::Io {
            path: path.clone(),
            source: err,
        })?;

        debug!(
            source = %source,
            records = records.len(),
            path = %path.display(),
            "persisted voucher document"
        );
        Ok(())
    }

    /// All persisted records, merged across documents.
    ///
    /// Documents are read in file-name order so the merge, and therefore
    /// first-encounter tie-breaks downstream, is stable across platforms.
    #[must_use]
    pub fn read_merged(&self) -> Vec<VoucherRecord> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(err) => {
                debug!(
                    dir = %self.dir.display(),
                    error = %err,
                    "no voucher documents to read"
                );
                return Vec::new();
            }
        };

        let mut paths: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .collect();
        paths.sort();

        let mut records = Vec::new();
        for path in paths {
            match read_document(&path) {
                Ok(mut chunk) => records.append(&mut chunk),
                Err(err) => {
                    warn!(error = %err, "skipping unreadable voucher document");
                }
            }
        }
        records
    }
}

fn read_document(path: &Path) -> Result<Vec<VoucherRecord>, StoreError> {
    let body = fs::read(path).map_err(|err| StoreError::Io {
        path: path.to_path_buf(),
        source: err,
    })?;
    serde_json::from_slice(&body).map_err(|err| StoreError::Malformed {
        path: path.to_path_buf(),
        source: err,
    })
}

//! JSON snapshot store for history records.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use echo_engine_core::{CoreResult, HistoryRecord, HistoryStore};

use crate::error::StorageError;

/// Persists the history as one ordered JSON document on disk.
///
/// A missing file loads as an empty record list; unreadable or corrupt
/// content is an error the caller decides how to handle. Saving replaces
/// the whole document.
#[derive(Debug, Clone)]
pub struct JsonHistoryStore {
    path: PathBuf,
}

impl JsonHistoryStore {
    /// Store backed by `path`. Parent directories are created on the
    /// first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the snapshot document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_records(&self) -> Result<Vec<HistoryRecord>, StorageError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)
            .map_err(|e| StorageError::io("opening history snapshot", e))?;
        let records = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| StorageError::serialization("decoding history snapshot", e))?;
        Ok(records)
    }

    fn write_records(&self, records: &[HistoryRecord]) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| StorageError::io("creating history directory", e))?;
            }
        }

        let file = File::create(&self.path)
            .map_err(|e| StorageError::io("creating history snapshot", e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, records)
            .map_err(|e| StorageError::serialization("encoding history snapshot", e))?;
        writer
            .flush()
            .map_err(|e| StorageError::io("flushing history snapshot", e))?;

        debug!(count = records.len(), path = %self.path.display(), "wrote history snapshot");
        Ok(())
    }
}

impl HistoryStore for JsonHistoryStore {
    fn load(&self) -> CoreResult<Vec<HistoryRecord>> {
        self.read_records().map_err(Into::into)
    }

    fn save(&self, records: &[HistoryRecord]) -> CoreResult<()> {
        self.write_records(records).map_err(Into::into)
    }
}

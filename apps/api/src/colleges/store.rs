//! Record store: a single JSON array on disk, rewritten in full on every append.
//!
//! Reads fail soft: a missing or corrupt file reads as an empty collection.
//! Appends are read-modify-write with no locking; concurrent writers can lose
//! updates (last full write wins).

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs;
use tracing::{debug, info, warn};

use crate::models::college::CollegeRecord;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("JSON encode error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    /// Opens the store at `path`, creating an empty collection if none exists.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let store = Self { path: path.into() };
        store.initialize().await?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the parent directory and an empty `[]` file when absent. Idempotent.
    pub async fn initialize(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_error(e))?;
        }
        let exists = fs::try_exists(&self.path)
            .await
            .map_err(|e| self.io_error(e))?;
        if !exists {
            self.write_all(&[]).await?;
            info!("Initialized empty college store at {}", self.path.display());
        }
        Ok(())
    }

    /// Returns every record in persisted order, or an empty collection on any failure.
    pub async fn read_all(&self) -> Vec<CollegeRecord> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Failed to read {}: {e}", self.path.display());
                return Vec::new();
            }
        };
        match serde_json::from_str::<Vec<CollegeRecord>>(&raw) {
            Ok(records) => records,
            Err(e) => {
                warn!("Corrupt college store {}: {e}", self.path.display());
                Vec::new()
            }
        }
    }

    /// Loads the collection, appends `record` and overwrites the file.
    pub async fn append(&self, record: CollegeRecord) -> Result<(), StoreError> {
        let mut records = self.read_all().await;
        records.push(record);
        self.write_all(&records).await?;
        debug!("College store now holds {} records", records.len());
        Ok(())
    }

    async fn write_all(&self, records: &[CollegeRecord]) -> Result<(), StoreError> {
        let body = serde_json::to_string_pretty(records)?;
        fs::write(&self.path, body)
            .await
            .map_err(|e| self.io_error(e))
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

//! Delivery log: incremental CSV log of every dispatch attempt plus a
//! one-time manifest describing how downstream consumers should load it.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

/// File name of the delivery log under `out/tables/`.
pub const LOG_FILE: &str = "log.csv";
/// File name of the sidecar manifest.
pub const MANIFEST_FILE: &str = "log.csv.manifest";

#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("could not write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not write {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Outcome of one dispatch attempt.
///
/// Entries are append-only; the pair `(phone, datetime)` identifies a row
/// for downstream incremental loads.
pub struct DeliveryLogEntry {
    pub datetime: String,
    pub phone: String,
    pub message: String,
    pub sent: bool,
}

#[derive(Debug, Clone)]
/// Append-only writer for the delivery log.
///
/// The log file is created with a header row on first write and appended to
/// afterwards, so each processed chunk lands durably as soon as it is
/// flushed.
pub struct DeliveryLog {
    log_path: PathBuf,
    manifest_path: PathBuf,
}

impl DeliveryLog {
    /// Create a writer targeting `out_dir/log.csv`.
    pub fn new(out_dir: &Path) -> Self {
        Self {
            log_path: out_dir.join(LOG_FILE),
            manifest_path: out_dir.join(MANIFEST_FILE),
        }
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    pub fn manifest_path(&self) -> &Path {
        &self.manifest_path
    }

    /// Append a batch of entries.
    ///
    /// No-op for an empty batch. On first creation the header row is written
    /// and the manifest is produced once; a manifest failure is logged as a
    /// warning and never fails the batch.
    pub fn write_batch(&self, entries: &[DeliveryLogEntry]) -> Result<(), LogError> {
        if entries.is_empty() {
            return Ok(());
        }

        let fresh = !self.log_path.exists();
        if fresh {
            if let Some(parent) = self.log_path.parent() {
                std::fs::create_dir_all(parent).map_err(|source| LogError::Io {
                    path: parent.display().to_string(),
                    source,
                })?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|source| LogError::Io {
                path: self.log_path.display().to_string(),
                source,
            })?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(fresh)
            .from_writer(file);
        for entry in entries {
            writer.serialize(entry).map_err(|source| LogError::Csv {
                path: self.log_path.display().to_string(),
                source,
            })?;
        }
        writer.flush().map_err(|source| LogError::Io {
            path: self.log_path.display().to_string(),
            source,
        })?;

        if fresh {
            if let Err(err) = self.write_manifest() {
                warn!("could not produce output manifest: {err}");
            }
        }

        Ok(())
    }

    fn write_manifest(&self) -> std::io::Result<()> {
        let manifest = serde_json::json!({
            "incremental": true,
            "primary_key": ["phone", "datetime"],
        });
        std::fs::write(&self.manifest_path, manifest.to_string())?;
        info!("output manifest file produced");
        Ok(())
    }
}

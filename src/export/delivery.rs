//! Artifact delivery
//!
//! Exporters produce an [`Artifact`] (bytes + filename + MIME type) and hand it
//! to an [`ArtifactSink`]. The sink owns the platform side effect; the
//! formatting and layout code never touches the filesystem directly.

use std::path::PathBuf;
use std::sync::Mutex;

use chrono::NaiveDate;
use tracing::info;

use crate::error::{CashPilotError, CashPilotResult};
use crate::file_io::write_atomic;

pub const CSV_MIME_TYPE: &str = "text/csv";
pub const PDF_MIME_TYPE: &str = "application/pdf";

/// A finished export ready to be saved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub filename: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

impl Artifact {
    pub fn csv(date: NaiveDate, bytes: Vec<u8>) -> Self {
        Self {
            filename: artifact_filename(date, "csv"),
            mime_type: CSV_MIME_TYPE,
            bytes,
        }
    }

    pub fn pdf(date: NaiveDate, bytes: Vec<u8>) -> Self {
        Self {
            filename: artifact_filename(date, "pdf"),
            mime_type: PDF_MIME_TYPE,
            bytes,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// `Report-<YYYY-MM-DD>.<extension>`
pub fn artifact_filename(date: NaiveDate, extension: &str) -> String {
    format!("Report-{}.{}", date.format("%Y-%m-%d"), extension)
}

/// Where and how an artifact ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub filename: String,
    /// Filesystem location, when the sink wrote one
    pub location: Option<PathBuf>,
    pub bytes_written: usize,
}

/// Platform-specific save/download capability
pub trait ArtifactSink {
    fn deliver(&self, artifact: Artifact) -> CashPilotResult<Delivery>;
}

/// Saves artifacts into a directory, atomically
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ArtifactSink for DirectorySink {
    fn deliver(&self, artifact: Artifact) -> CashPilotResult<Delivery> {
        let path = self.dir.join(&artifact.filename);

        write_atomic(&path, &artifact.bytes).map_err(|e| {
            CashPilotError::Export(format!("Failed to save {}: {}", artifact.filename, e))
        })?;

        info!(
            path = %path.display(),
            mime = artifact.mime_type,
            bytes = artifact.len(),
            "artifact saved"
        );

        Ok(Delivery {
            filename: artifact.filename,
            location: Some(path),
            bytes_written: artifact.bytes.len(),
        })
    }
}

/// Keeps artifacts in memory; for embedding callers and tests
#[derive(Debug, Default)]
pub struct MemorySink {
    artifacts: Mutex<Vec<Artifact>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything delivered so far, oldest first
    pub fn artifacts(&self) -> Vec<Artifact> {
        self.artifacts
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl ArtifactSink for MemorySink {
    fn deliver(&self, artifact: Artifact) -> CashPilotResult<Delivery> {
        let delivery = Delivery {
            filename: artifact.filename.clone(),
            location: None,
            bytes_written: artifact.len(),
        };

        self.artifacts
            .lock()
            .map_err(|_| CashPilotError::Export("memory sink lock poisoned".into()))?
            .push(artifact);

        Ok(delivery)
    }
}

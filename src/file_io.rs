//! File I/O utilities with atomic writes
//!
//! Provides safe file operations that won't leave half-written artifacts
//! behind on failure.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::error::CashPilotError;

/// Structured input formats accepted for datasets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Yaml,
}

impl InputFormat {
    /// Pick the format from a file extension; anything unknown is JSON
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// Read a JSON or YAML document, returning an error if the file doesn't exist
pub fn read_structured<T, P>(path: P) -> Result<T, CashPilotError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Err(CashPilotError::Io(format!(
            "File not found: {}",
            path.display()
        )));
    }

    let file = File::open(path)
        .map_err(|e| CashPilotError::Io(format!("Failed to open {}: {}", path.display(), e)))?;
    let reader = BufReader::new(file);

    match InputFormat::from_path(path) {
        InputFormat::Json => serde_json::from_reader(reader).map_err(|e| {
            CashPilotError::Json(format!("Failed to parse {}: {}", path.display(), e))
        }),
        InputFormat::Yaml => serde_yaml::from_reader(reader).map_err(|e| {
            CashPilotError::Yaml(format!("Failed to parse {}: {}", path.display(), e))
        }),
    }
}

/// Write bytes to a file atomically (write to temp, then rename)
///
/// The destination either receives the complete contents or is left untouched.
pub fn write_atomic<P: AsRef<Path>>(path: P, bytes: &[u8]) -> Result<(), CashPilotError> {
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            CashPilotError::Io(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Temp file must share the directory for the rename to be atomic
    let temp_path = temp_path_for(path);

    let file = File::create(&temp_path)
        .map_err(|e| CashPilotError::Io(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    let written = writer
        .write_all(bytes)
        .and_then(|_| writer.flush())
        .and_then(|_| writer.get_ref().sync_all());

    if let Err(e) = written {
        let _ = fs::remove_file(&temp_path);
        return Err(CashPilotError::Io(format!(
            "Failed to write {}: {}",
            path.display(),
            e
        )));
    }

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        CashPilotError::Io(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

//! Path management for CashPilot
//!
//! ## Path Resolution Order
//!
//! 1. `CASHPILOT_CONFIG_DIR` environment variable (if set)
//! 2. The platform configuration directory reported by `directories`
//!    (`~/.config/cashpilot` on Linux, `%APPDATA%\cashpilot` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::CashPilotError;

/// Environment variable overriding the configuration directory
pub const CONFIG_DIR_ENV: &str = "CASHPILOT_CONFIG_DIR";

/// Manages all paths used by CashPilot
#[derive(Debug, Clone)]
pub struct CashPilotPaths {
    base_dir: PathBuf,
}

impl CashPilotPaths {
    /// Resolve the configuration directory
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined and no
    /// override is set.
    pub fn new() -> Result<Self, CashPilotError> {
        let base_dir = match std::env::var(CONFIG_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create CashPilotPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Where artifacts land when neither the CLI nor the settings name a directory
    pub fn default_output_dir(&self) -> PathBuf {
        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    }

    /// Ensure the configuration directory exists
    pub fn ensure_directories(&self) -> Result<(), CashPilotError> {
        std::fs::create_dir_all(&self.base_dir).map_err(|e| {
            CashPilotError::Io(format!("Failed to create config directory: {}", e))
        })
    }

    /// Check if a settings file has been written
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, CashPilotError> {
    ProjectDirs::from("", "", "cashpilot")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| {
            CashPilotError::Config(format!(
                "Could not determine a configuration directory; set {}",
                CONFIG_DIR_ENV
            ))
        })
}

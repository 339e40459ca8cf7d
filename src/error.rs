//! Custom error types for CashPilot
//!
//! This module defines the error hierarchy for the exporter using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for CashPilot operations
#[derive(Error, Debug)]
pub enum CashPilotError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// YAML serialization/deserialization errors
    #[error("YAML error: {0}")]
    Yaml(String),

    /// Validation errors for input data
    #[error("Validation error: {0}")]
    Validation(String),

    /// CSV writer errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// Drawing or rasterization failed while assembling a document
    #[error("Render error: {0}")]
    Render(String),

    /// A logo or chart could not be loaded or rasterized
    #[error("Asset '{name}' unavailable: {reason}")]
    Asset { name: String, reason: String },

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Export was invoked without any transactions
    #[error("No transactions to export")]
    NoTransactions,
}

impl CashPilotError {
    /// Create an asset error for a named logo or chart
    pub fn asset(name: impl Into<String>, reason: impl ToString) -> Self {
        Self::Asset {
            name: name.into(),
            reason: reason.to_string(),
        }
    }

    /// Asset failures degrade the document; everything else aborts it
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Asset { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for CashPilotError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CashPilotError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<serde_yaml::Error> for CashPilotError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Yaml(err.to_string())
    }
}

impl From<csv::Error> for CashPilotError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

impl From<printpdf::Error> for CashPilotError {
    fn from(err: printpdf::Error) -> Self {
        Self::Render(err.to_string())
    }
}

/// Result type alias for CashPilot operations
pub type CashPilotResult<T> = Result<T, CashPilotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CashPilotError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_asset_error() {
        let err = CashPilotError::asset("logo.png", "file not found");
        assert_eq!(
            err.to_string(),
            "Asset 'logo.png' unavailable: file not found"
        );
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_structural_errors_are_not_recoverable() {
        assert!(!CashPilotError::Render("boom".into()).is_recoverable());
        assert!(!CashPilotError::NoTransactions.is_recoverable());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: CashPilotError = io_err.into();
        assert!(matches!(err, CashPilotError::Io(_)));
    }
}

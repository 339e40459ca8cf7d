//! User settings for CashPilot
//!
//! Holds the regional conventions (currency symbol, digit grouping, datetime
//! rendering) and report presentation options. Every field has a default so a
//! partial `config.json` is always accepted.

use std::path::PathBuf;

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use super::paths::CashPilotPaths;
use crate::error::CashPilotError;
use crate::file_io::write_atomic;

/// Currency rendering conventions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencySettings {
    /// Symbol placed before the amount
    #[serde(default = "default_currency_symbol")]
    pub symbol: String,

    /// Separator between groups of three integer digits
    #[serde(default = "default_thousands_separator")]
    pub thousands_separator: String,

    /// Separator between integer and fractional digits
    #[serde(default = "default_decimal_separator")]
    pub decimal_separator: String,
}

impl Default for CurrencySettings {
    fn default() -> Self {
        Self {
            symbol: default_currency_symbol(),
            thousands_separator: default_thousands_separator(),
            decimal_separator: default_decimal_separator(),
        }
    }
}

/// Datetime rendering conventions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateTimeSettings {
    /// strftime pattern for human-readable timestamps
    #[serde(default = "default_datetime_format")]
    pub format: String,

    /// Offset from UTC used for every rendered timestamp
    #[serde(default = "default_utc_offset_minutes")]
    pub utc_offset_minutes: i32,
}

impl Default for DateTimeSettings {
    fn default() -> Self {
        Self {
            format: default_datetime_format(),
            utc_offset_minutes: default_utc_offset_minutes(),
        }
    }
}

/// PDF report presentation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSettings {
    /// Title line under the logo
    #[serde(default = "default_report_title")]
    pub title: String,

    /// PNG or JPEG drawn centered at the top of page one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_path: Option<PathBuf>,

    /// TrueType font for full Unicode coverage; built-in Helvetica otherwise
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_path: Option<PathBuf>,

    /// Pixel multiplier applied when rasterizing charts
    #[serde(default = "default_chart_scale")]
    pub chart_scale: u32,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            title: default_report_title(),
            logo_path: None,
            font_path: None,
            chart_scale: default_chart_scale(),
        }
    }
}

/// User settings for CashPilot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    #[serde(default)]
    pub currency: CurrencySettings,

    #[serde(default)]
    pub datetime: DateTimeSettings,

    #[serde(default)]
    pub report: ReportSettings,

    /// Directory receiving exported artifacts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency_symbol() -> String {
    "₦".to_string()
}

fn default_thousands_separator() -> String {
    ",".to_string()
}

fn default_decimal_separator() -> String {
    ".".to_string()
}

fn default_datetime_format() -> String {
    "%d/%m/%Y, %H:%M:%S".to_string()
}

fn default_utc_offset_minutes() -> i32 {
    60 // West Africa Time
}

fn default_report_title() -> String {
    "CashPilot Financial Report".to_string()
}

fn default_chart_scale() -> u32 {
    2
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency: CurrencySettings::default(),
            datetime: DateTimeSettings::default(),
            report: ReportSettings::default(),
            output_dir: None,
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &CashPilotPaths) -> Result<Self, CashPilotError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                CashPilotError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                CashPilotError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            settings.validate()?;
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &CashPilotPaths) -> Result<(), CashPilotError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            CashPilotError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        write_atomic(paths.settings_file(), contents.as_bytes())
    }

    /// Reject settings that would produce unreadable output
    pub fn validate(&self) -> Result<(), CashPilotError> {
        if self.report.chart_scale == 0 || self.report.chart_scale > 8 {
            return Err(CashPilotError::Config(format!(
                "report.chart_scale must be between 1 and 8, got {}",
                self.report.chart_scale
            )));
        }

        if self.datetime.utc_offset_minutes.abs() >= 24 * 60 {
            return Err(CashPilotError::Config(format!(
                "datetime.utc_offset_minutes out of range: {}",
                self.datetime.utc_offset_minutes
            )));
        }

        if StrftimeItems::new(&self.datetime.format).any(|item| matches!(item, Item::Error)) {
            return Err(CashPilotError::Config(format!(
                "datetime.format is not a valid strftime pattern: {}",
                self.datetime.format
            )));
        }

        if self.currency.decimal_separator.is_empty() {
            return Err(CashPilotError::Config(
                "currency.decimal_separator must not be empty".into(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.currency.symbol, "₦");
        assert_eq!(settings.currency.thousands_separator, ",");
        assert_eq!(settings.datetime.utc_offset_minutes, 60);
        assert_eq!(settings.report.chart_scale, 2);
        assert!(settings.report.logo_path.is_none());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CashPilotPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.currency.symbol = "$".into();
        settings.report.chart_scale = 3;

        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.currency.symbol, "$");
        assert_eq!(loaded.report.chart_scale, 3);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CashPilotPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"currency": {"symbol": "€"}}"#).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.currency.symbol, "€");
        assert_eq!(loaded.currency.decimal_separator, ".");
        assert_eq!(loaded.report.title, "CashPilot Financial Report");
    }

    #[test]
    fn test_invalid_chart_scale_rejected() {
        let mut settings = Settings::default();
        settings.report.chart_scale = 0;
        assert!(matches!(settings.validate(), Err(CashPilotError::Config(_))));
    }

    #[test]
    fn test_invalid_datetime_format_rejected() {
        let mut settings = Settings::default();
        settings.datetime.format = "%Y %!".into();
        assert!(matches!(settings.validate(), Err(CashPilotError::Config(_))));
        assert!(Settings::default().validate().is_ok());
    }
}

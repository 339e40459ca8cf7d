//! Configuration module for CashPilot
//!
//! - Platform-aware path resolution
//! - User settings persistence (currency, datetime and report options)

pub mod paths;
pub mod settings;

pub use paths::CashPilotPaths;
pub use settings::{CurrencySettings, DateTimeSettings, ReportSettings, Settings};

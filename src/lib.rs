//! CashPilot - personal finance exports
//!
//! This library turns an in-memory snapshot of a user's finances
//! (transactions, caller-computed totals, monthly income and budget) into two
//! durable artifacts: a CSV file and a paginated PDF report with charts.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: The export input contract
//! - `display`: Currency, timestamp and terminal formatting
//! - `export`: CSV export and artifact delivery
//! - `reports`: PDF layout, charts and report generation
//! - `cli`: Command handlers for the `cashpilot` binary
//! - `logging`: tracing subscriber setup
//!
//! # Example
//!
//! ```rust,ignore
//! use cashpilot::config::{paths::CashPilotPaths, settings::Settings};
//! use cashpilot::export::DirectorySink;
//! use cashpilot::models::ExportDataset;
//! use cashpilot::reports::{export_report, ChartSlots, ReportGenerator, ReportRequest};
//!
//! let paths = CashPilotPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let dataset = ExportDataset::load("snapshot.json")?;
//!
//! let generator = ReportGenerator::new(&settings);
//! let request = ReportRequest::new(&dataset, ChartSlots::from_dataset(&dataset));
//! export_report(&generator, &request, &DirectorySink::new(".")).await?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod file_io;
pub mod logging;
pub mod models;
pub mod reports;

pub use error::{CashPilotError, CashPilotResult};

//! Export module for CashPilot
//!
//! - CSV: one quoted row per transaction (spreadsheet-compatible)
//! - Delivery: artifact sinks that save finished exports
//!
//! The PDF report lives in [`crate::reports`].

pub mod csv;
pub mod delivery;

pub use self::csv::{export_csv, render_csv, CSV_COLUMNS, CSV_SCHEMA_VERSION};
pub use delivery::{Artifact, ArtifactSink, Delivery, DirectorySink, MemorySink};

//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the exporters.

pub mod export;
pub mod summary;

pub use export::{handle_export_command, ExportCommands, NO_TRANSACTIONS_NOTICE};
pub use summary::handle_summary_command;

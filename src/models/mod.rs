//! Core data models for CashPilot
//!
//! The exporter's input contract: transaction records, caller-computed
//! totals, and the monthly income / budget snapshots.

pub mod dataset;
pub mod ids;
pub mod money;
pub mod totals;
pub mod transaction;

pub use dataset::ExportDataset;
pub use ids::TransactionId;
pub use money::{Money, MoneyParseError};
pub use totals::TotalsSummary;
pub use transaction::{CreatedAt, TransactionRecord, TransactionType};

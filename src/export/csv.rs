//! CSV export of transaction records
//!
//! The column layout below is a compatibility surface for spreadsheet users
//! and downstream scripts. Changing it means bumping [`CSV_SCHEMA_VERSION`].

use chrono::NaiveDate;
use tracing::{debug, info};

use super::delivery::{Artifact, ArtifactSink, Delivery};
use crate::display::Formats;
use crate::error::{CashPilotError, CashPilotResult};
use crate::models::TransactionRecord;

/// Version of the column contract in [`CSV_COLUMNS`]
pub const CSV_SCHEMA_VERSION: u32 = 1;

/// Header row, in output order
pub const CSV_COLUMNS: [&str; 6] = ["Label", "Type", "Category", "Amount", "Note", "Created At"];

/// Serialize transactions to CSV bytes
///
/// Every field is quoted and embedded quotes are doubled. Amounts are raw
/// two-decimal numbers without grouping; a missing category, note or
/// timestamp becomes an empty field.
pub fn render_csv(
    transactions: &[TransactionRecord],
    formats: &Formats,
) -> CashPilotResult<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(CSV_COLUMNS)?;

    for txn in transactions {
        let created_at = formats.datetime.format(txn.created_at).unwrap_or_default();
        let amount = txn.amount.to_plain_string();

        writer.write_record([
            txn.label.as_str(),
            txn.kind.as_str(),
            txn.category.as_deref().unwrap_or(""),
            amount.as_str(),
            txn.note.as_deref().unwrap_or(""),
            created_at.as_str(),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|e| CashPilotError::Csv(format!("Failed to finish CSV output: {}", e)))
}

/// Export transactions as `Report-<date>.csv` through the given sink
///
/// An empty transaction list is a no-op and returns `Ok(None)`.
pub fn export_csv<S: ArtifactSink + ?Sized>(
    transactions: &[TransactionRecord],
    formats: &Formats,
    date: NaiveDate,
    sink: &S,
) -> CashPilotResult<Option<Delivery>> {
    if transactions.is_empty() {
        debug!("no transactions, skipping CSV export");
        return Ok(None);
    }

    let bytes = render_csv(transactions, formats)?;
    let delivery = sink.deliver(Artifact::csv(date, bytes))?;

    info!(
        rows = transactions.len(),
        filename = %delivery.filename,
        "CSV export complete"
    );

    Ok(Some(delivery))
}

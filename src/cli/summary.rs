//! CLI command for the totals and budget summary

use std::path::Path;

use crate::config::Settings;
use crate::display::{render_summary_table, BudgetSummary, Formats};
use crate::error::CashPilotResult;
use crate::models::{ExportDataset, TotalsSummary};

/// Print totals, budget and income usage for a dataset file
pub fn handle_summary_command(settings: &Settings, input: &Path) -> CashPilotResult<()> {
    let dataset = ExportDataset::load(input)?;
    let formats = Formats::from_settings(settings);
    let summary = BudgetSummary::from_dataset(&dataset);

    println!("Transactions: {}", dataset.transactions.len());
    println!("{}", render_summary_table(&summary, &formats.currency));

    if summary.is_over_budget() {
        println!(
            "Over budget by {}",
            formats.currency.format(-summary.budget_remaining)
        );
    }

    let recomputed = TotalsSummary::from_transactions(&dataset.transactions);
    if !dataset.transactions.is_empty() && recomputed != dataset.totals {
        println!(
            "Note: supplied totals differ from the transactions (income {}, expenses {})",
            formats.currency.format(recomputed.income),
            formats.currency.format(recomputed.expense)
        );
    }

    Ok(())
}

//! Terminal summary of totals, income and budget usage

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::currency::CurrencyFormat;
use super::text::format_percentage;
use crate::models::{ExportDataset, Money};

/// Budget and income readouts derived from a dataset snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetSummary {
    pub total_income: Money,
    pub total_expense: Money,
    pub balance: Money,
    pub monthly_income: Money,
    pub budget: Money,
    /// Budget minus total expenses; negative when overspent
    pub budget_remaining: Money,
    /// Monthly income minus total expenses
    pub income_remaining: Money,
}

impl BudgetSummary {
    pub fn from_dataset(dataset: &ExportDataset) -> Self {
        let totals = dataset.totals;
        Self {
            total_income: totals.income,
            total_expense: totals.expense,
            balance: totals.balance,
            monthly_income: dataset.monthly_income,
            budget: dataset.budget,
            budget_remaining: dataset.budget - totals.expense,
            income_remaining: dataset.monthly_income - totals.expense,
        }
    }

    /// Share of the budget already spent, `None` when no budget is set
    pub fn budget_used_percent(&self) -> Option<f64> {
        if self.budget.is_positive() {
            Some(self.total_expense.as_f64() / self.budget.as_f64() * 100.0)
        } else {
            None
        }
    }

    pub fn is_over_budget(&self) -> bool {
        self.budget.is_positive() && self.budget_remaining.is_negative()
    }
}

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Metric")]
    metric: &'static str,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Render the summary as a rounded terminal table
pub fn render_summary_table(summary: &BudgetSummary, currency: &CurrencyFormat) -> String {
    let mut rows = vec![
        SummaryRow {
            metric: "Total Income",
            amount: currency.format(summary.total_income),
        },
        SummaryRow {
            metric: "Total Expenses",
            amount: currency.format(summary.total_expense),
        },
        SummaryRow {
            metric: "Balance",
            amount: currency.format(summary.balance),
        },
        SummaryRow {
            metric: "Monthly Income",
            amount: currency.format(summary.monthly_income),
        },
        SummaryRow {
            metric: "Budget",
            amount: currency.format(summary.budget),
        },
        SummaryRow {
            metric: "Budget Remaining",
            amount: currency.format(summary.budget_remaining),
        },
        SummaryRow {
            metric: "Income Remaining",
            amount: currency.format(summary.income_remaining),
        },
    ];

    if let Some(pct) = summary.budget_used_percent() {
        rows.push(SummaryRow {
            metric: "Budget Used",
            amount: format_percentage(pct),
        });
    }

    Table::new(rows).with(Style::rounded()).to_string()
}

//! Export input contract
//!
//! `ExportDataset` is the plain data structure the UI layer hands over:
//! transactions, caller-computed totals, and the current monthly income and
//! budget snapshots. Defaults are applied here, at the boundary, so the
//! exporters never have to guess.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::money::Money;
use super::totals::TotalsSummary;
use super::transaction::TransactionRecord;
use crate::error::{CashPilotError, CashPilotResult};
use crate::file_io::read_structured;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDataset {
    /// Defaults to an empty list
    #[serde(default)]
    pub transactions: Vec<TransactionRecord>,

    /// Required; never invented from the transactions
    pub totals: TotalsSummary,

    /// Defaults to zero
    #[serde(default, alias = "monthly_income")]
    pub monthly_income: Money,

    /// Defaults to zero
    #[serde(default)]
    pub budget: Money,
}

impl ExportDataset {
    pub fn new(transactions: Vec<TransactionRecord>, totals: TotalsSummary) -> Self {
        Self {
            transactions,
            totals,
            monthly_income: Money::zero(),
            budget: Money::zero(),
        }
    }

    pub fn with_monthly_income(mut self, monthly_income: Money) -> Self {
        self.monthly_income = monthly_income;
        self
    }

    pub fn with_budget(mut self, budget: Money) -> Self {
        self.budget = budget;
        self
    }

    /// Load and validate a dataset from a JSON or YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> CashPilotResult<Self> {
        let dataset: ExportDataset = read_structured(path)?;
        dataset.validate()?;
        Ok(dataset)
    }

    /// Check every record's invariants and the snapshot values
    ///
    /// Amounts must be summable in minor units: any sum or difference taken
    /// from a validated dataset fits in an `i64`.
    pub fn validate(&self) -> CashPilotResult<()> {
        let mut running = Money::zero();
        for transaction in &self.transactions {
            transaction.validate()?;
            running = running
                .checked_add(transaction.amount)
                .ok_or_else(|| out_of_range("transaction amounts"))?;
        }

        let totals = self.totals;
        totals
            .income
            .checked_sub(totals.expense)
            .ok_or_else(|| out_of_range("totals"))?;

        if self.monthly_income.is_negative() {
            return Err(CashPilotError::Validation(
                "monthly income must not be negative".into(),
            ));
        }
        if self.budget.is_negative() {
            return Err(CashPilotError::Validation(
                "budget must not be negative".into(),
            ));
        }
        self.budget
            .checked_sub(totals.expense)
            .ok_or_else(|| out_of_range("budget"))?;
        self.monthly_income
            .checked_sub(totals.expense)
            .ok_or_else(|| out_of_range("monthly income"))?;

        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

fn out_of_range(what: &str) -> CashPilotError {
    CashPilotError::Validation(format!("{} out of the supported amount range", what))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn rent(units: i64) -> String {
        format!(
            r#"{{"amount": {}, "type": "expense", "category": "Rent", "label": "Rent"}}"#,
            units
        )
    }

    #[test]
    fn test_defaults_applied() {
        let json = r#"{"totals": {"income": 0, "expense": 0, "balance": 0}}"#;
        let dataset: ExportDataset = serde_json::from_str(json).unwrap();

        assert!(dataset.is_empty());
        assert!(dataset.monthly_income.is_zero());
        assert!(dataset.budget.is_zero());
    }

    #[test]
    fn test_totals_required() {
        let json = r#"{"transactions": [], "budget": 500}"#;
        assert!(serde_json::from_str::<ExportDataset>(json).is_err());
    }

    #[test]
    fn test_load_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data.yaml");
        std::fs::write(
            &path,
            "transactions:\n  - amount: 25.5\n    type: expense\n    label: Lunch\n\
             totals:\n  income: 0\n  expense: 25.5\n  balance: -25.5\n\
             monthlyIncome: 1000\n",
        )
        .unwrap();

        let dataset = ExportDataset::load(&path).unwrap();

        assert_eq!(dataset.transactions.len(), 1);
        assert_eq!(dataset.transactions[0].amount.cents(), 2550);
        assert_eq!(dataset.totals.balance.cents(), -2550);
        assert_eq!(dataset.monthly_income.cents(), 100000);
    }

    #[test]
    fn test_validate_rejects_negative_budget() {
        let dataset = ExportDataset::new(Vec::new(), TotalsSummary::default())
            .with_budget(Money::from_cents(-1));
        assert!(dataset.validate().unwrap_err().is_validation());
    }

    #[test]
    fn test_validate_rejects_amounts_that_cannot_be_summed() {
        let json = format!(
            r#"{{"transactions": [{}, {}], "totals": {{"income": 0, "expense": 0, "balance": 0}}}}"#,
            rent(50_000_000_000_000_000),
            rent(50_000_000_000_000_000)
        );
        let dataset: ExportDataset = serde_json::from_str(&json).unwrap();

        assert!(dataset.validate().unwrap_err().is_validation());
    }

    #[test]
    fn test_validate_rejects_budget_difference_out_of_range() {
        let totals = TotalsSummary {
            income: Money::zero(),
            expense: Money::from_cents(-5_000_000_000_000_000_000),
            balance: Money::zero(),
        };
        let dataset = ExportDataset::new(Vec::new(), totals)
            .with_budget(Money::from_cents(5_000_000_000_000_000_000));

        assert!(dataset.validate().unwrap_err().is_validation());
    }

    #[test]
    fn test_large_valid_amounts_sum_without_overflow() {
        let json = format!(
            r#"{{"transactions": [{}, {}], "totals": {{"income": 0, "expense": 0, "balance": 0}}}}"#,
            rent(40_000_000_000_000_000),
            rent(40_000_000_000_000_000)
        );
        let dataset: ExportDataset = serde_json::from_str(&json).unwrap();
        dataset.validate().unwrap();

        let totals = TotalsSummary::from_transactions(&dataset.transactions);
        assert_eq!(totals.expense.cents(), 8_000_000_000_000_000_000);
        assert_eq!(totals.balance.cents(), -8_000_000_000_000_000_000);
    }
}

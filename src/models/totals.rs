//! Aggregate totals supplied alongside the transaction list

use serde::{Deserialize, Serialize};

use super::money::Money;
use super::transaction::TransactionRecord;

/// Income, expense and balance for the exported period
///
/// Callers recompute this before every export. The exporters render it as
/// given and never re-derive or check it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalsSummary {
    pub income: Money,
    pub expense: Money,
    pub balance: Money,
}

impl TotalsSummary {
    pub fn new(income: Money, expense: Money) -> Self {
        Self {
            income,
            expense,
            balance: income - expense,
        }
    }

    /// Sum incomes and expenses the way the dashboard does
    pub fn from_transactions(transactions: &[TransactionRecord]) -> Self {
        let income = transactions
            .iter()
            .filter(|t| t.is_income())
            .map(|t| t.amount)
            .sum();
        let expense = transactions
            .iter()
            .filter(|t| t.is_expense())
            .map(|t| t.amount)
            .sum();

        Self::new(income, expense)
    }

    /// Whether `balance == income - expense`
    pub fn is_consistent(&self) -> bool {
        self.balance == self.income - self.expense
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_transactions() {
        let transactions = vec![
            TransactionRecord::income(Money::from_cents(100000), "Salary"),
            TransactionRecord::expense(Money::from_cents(123450), "Rent"),
            TransactionRecord::income(Money::from_cents(500), "Refund"),
        ];

        let totals = TotalsSummary::from_transactions(&transactions);

        assert_eq!(totals.income.cents(), 100500);
        assert_eq!(totals.expense.cents(), 123450);
        assert_eq!(totals.balance.cents(), -22950);
        assert!(totals.is_consistent());
    }

    #[test]
    fn test_inconsistent_totals_detected() {
        let totals = TotalsSummary {
            income: Money::from_cents(100),
            expense: Money::from_cents(50),
            balance: Money::from_cents(10),
        };
        assert!(!totals.is_consistent());
    }
}

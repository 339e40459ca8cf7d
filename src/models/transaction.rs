//! Transaction record model
//!
//! A `TransactionRecord` is the exporter's view of one income or expense
//! entry. The amount is always a non-negative magnitude; the sign lives in
//! [`TransactionType`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use super::ids::TransactionId;
use super::money::Money;
use crate::error::{CashPilotError, CashPilotResult};

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Creation timestamp with whole-second granularity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CreatedAt(i64);

impl CreatedAt {
    pub const fn from_seconds(seconds: i64) -> Self {
        Self(seconds)
    }

    pub const fn seconds(&self) -> i64 {
        self.0
    }

    /// The instant in UTC, or `None` when the seconds fall outside chrono's range
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.0, 0)
    }
}

impl From<DateTime<Utc>> for CreatedAt {
    fn from(value: DateTime<Utc>) -> Self {
        Self(value.timestamp())
    }
}

impl Serialize for CreatedAt {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.0)
    }
}

/// Either bare epoch seconds or the document-store `{seconds, nanoseconds}` shape
#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Seconds(i64),
    Document {
        #[serde(alias = "_seconds")]
        seconds: i64,
    },
}

impl<'de> Deserialize<'de> for CreatedAt {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawTimestamp::deserialize(deserializer)? {
            RawTimestamp::Seconds(seconds) => Self(seconds),
            RawTimestamp::Document { seconds } => Self(seconds),
        })
    }
}

/// One income or expense entry handed to the exporters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    #[serde(default)]
    pub id: TransactionId,

    /// Non-negative magnitude; direction comes from `kind`
    pub amount: Money,

    #[serde(rename = "type")]
    pub kind: TransactionType,

    #[serde(default, deserialize_with = "blank_as_none")]
    pub category: Option<String>,

    #[serde(default)]
    pub label: String,

    #[serde(default, deserialize_with = "blank_as_none")]
    pub note: Option<String>,

    #[serde(default, alias = "created_at", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<CreatedAt>,
}

fn blank_as_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

impl TransactionRecord {
    /// Create a record with a fresh identifier and no optional fields
    pub fn new(kind: TransactionType, amount: Money, label: impl Into<String>) -> Self {
        Self {
            id: TransactionId::new(),
            amount,
            kind,
            category: None,
            label: label.into(),
            note: None,
            created_at: None,
        }
    }

    pub fn income(amount: Money, label: impl Into<String>) -> Self {
        Self::new(TransactionType::Income, amount, label)
    }

    pub fn expense(amount: Money, label: impl Into<String>) -> Self {
        Self::new(TransactionType::Expense, amount, label)
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn with_created_at(mut self, created_at: CreatedAt) -> Self {
        self.created_at = Some(created_at);
        self
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    /// Check the magnitude invariant
    pub fn validate(&self) -> CashPilotResult<()> {
        if self.amount.is_negative() {
            return Err(CashPilotError::Validation(format!(
                "transaction {} has a negative amount ({}); use type 'expense' instead",
                self.id, self.amount
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_record() {
        let json = r#"{
            "id": "t1",
            "amount": 1234.5,
            "type": "expense",
            "category": "Food",
            "label": "Groceries",
            "note": "weekly, big shop",
            "createdAt": {"seconds": 1736899200, "nanoseconds": 0}
        }"#;

        let record: TransactionRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.id.as_str(), "t1");
        assert_eq!(record.amount.cents(), 123450);
        assert!(record.is_expense());
        assert_eq!(record.category.as_deref(), Some("Food"));
        assert_eq!(record.note.as_deref(), Some("weekly, big shop"));
        assert_eq!(record.created_at, Some(CreatedAt::from_seconds(1736899200)));
    }

    #[test]
    fn test_deserialize_minimal_record() {
        let json = r#"{"amount": 10, "type": "income", "note": "", "createdAt": null}"#;

        let record: TransactionRecord = serde_json::from_str(json).unwrap();

        assert!(record.is_income());
        assert!(!record.id.as_str().is_empty());
        assert_eq!(record.label, "");
        assert!(record.category.is_none());
        assert!(record.note.is_none());
        assert!(record.created_at.is_none());
    }

    #[test]
    fn test_created_at_accepts_bare_seconds() {
        let json = r#"{"amount": 1, "type": "income", "created_at": 1700000000}"#;
        let record: TransactionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.created_at.unwrap().seconds(), 1700000000);
    }

    #[test]
    fn test_unknown_type_rejected() {
        let json = r#"{"amount": 1, "type": "transfer"}"#;
        assert!(serde_json::from_str::<TransactionRecord>(json).is_err());
    }

    #[test]
    fn test_validate_rejects_negative_amount() {
        let record = TransactionRecord::expense(Money::from_cents(-100), "Oops");
        assert!(record.validate().unwrap_err().is_validation());
        assert!(TransactionRecord::expense(Money::zero(), "Free")
            .validate()
            .is_ok());
    }
}

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::category::CategoryCatalog;
use crate::errors::{Result, StatsError};

/// Direction of money movement, derived from the sign of an amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Flow {
    /// Negative amounts.
    Expense,
    /// Positive amounts.
    Income,
}

impl Flow {
    pub fn from_positive_only(positive_only: bool) -> Self {
        if positive_only {
            Flow::Income
        } else {
            Flow::Expense
        }
    }

    /// Zero amounts belong to neither flow.
    pub fn matches(self, amount: Decimal) -> bool {
        match self {
            Flow::Expense => amount.is_sign_negative() && !amount.is_zero(),
            Flow::Income => amount.is_sign_positive() && !amount.is_zero(),
        }
    }
}

/// A single money movement. Negative amounts are expenses, positive are income.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub amount: Decimal,
    pub category: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Transaction {
    pub fn new(amount: Decimal, category: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            amount,
            category: category.into(),
            timestamp,
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn flow(&self) -> Option<Flow> {
        [Flow::Expense, Flow::Income]
            .into_iter()
            .find(|flow| flow.matches(self.amount))
    }

    pub fn is_expense(&self) -> bool {
        Flow::Expense.matches(self.amount)
    }

    pub fn is_income(&self) -> bool {
        Flow::Income.matches(self.amount)
    }

    /// Unsigned size of the movement.
    pub fn magnitude(&self) -> Decimal {
        self.amount.abs()
    }
}

/// Transaction as persisted, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub amount: String,
    pub category: String,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

impl TryFrom<TransactionRecord> for Transaction {
    type Error = StatsError;

    fn try_from(record: TransactionRecord) -> Result<Self> {
        let amount = Decimal::from_str(record.amount.trim()).map_err(|err| {
            tracing::error!(amount = %record.amount, %err, "rejecting transaction amount");
            StatsError::MalformedAmount(record.amount.clone())
        })?;
        let raw = record.timestamp.ok_or_else(|| {
            tracing::error!(category = %record.category, "transaction has no timestamp");
            StatsError::MalformedTimestamp("missing".into())
        })?;
        let timestamp = DateTime::parse_from_rfc3339(raw.trim())
            .map_err(|err| {
                tracing::error!(timestamp = %raw, %err, "rejecting transaction timestamp");
                StatsError::MalformedTimestamp(raw.clone())
            })?
            .with_timezone(&Utc);
        Ok(Self {
            amount,
            category: record.category,
            timestamp,
            note: record.note,
        })
    }
}

/// Ordered, append-only collection of transactions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TransactionLog {
    transactions: Vec<Transaction>,
}

impl TransactionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates every record; the first malformed one aborts the import.
    pub fn from_records(records: impl IntoIterator<Item = TransactionRecord>) -> Result<Self> {
        let transactions = records
            .into_iter()
            .map(Transaction::try_from)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { transactions })
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let records: Vec<TransactionRecord> = serde_json::from_str(json)?;
        Self::from_records(records)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn append(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Fails on the first transaction whose category is not in the catalog.
    pub fn validate_categories(&self, catalog: &CategoryCatalog) -> Result<()> {
        for transaction in &self.transactions {
            catalog.require(&transaction.category)?;
        }
        Ok(())
    }
}

impl FromIterator<Transaction> for TransactionLog {
    fn from_iter<I: IntoIterator<Item = Transaction>>(iter: I) -> Self {
        Self {
            transactions: iter.into_iter().collect(),
        }
    }
}

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use super::accumulate;
use crate::errors::Result;
use crate::ledger::Transaction;
use crate::time::TimeWindow;

/// Expense magnitude per category name. Categories without expenses are absent.
pub type ExpenseTotals = BTreeMap<String, Decimal>;

/// One slice of a distribution chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryAmount {
    pub category: String,
    pub amount: Decimal,
}

/// Sums absolute amounts per category, largest first, ties by name.
///
/// Categories that net to zero are left out so charts never draw empty slices.
/// A category sum past `Decimal::MAX` is an error.
pub fn grouped_cats<'a, I>(transactions: I) -> Result<Vec<CategoryAmount>>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut sums: BTreeMap<&str, Decimal> = BTreeMap::new();
    for transaction in transactions {
        let category = transaction.category.as_str();
        accumulate(sums.entry(category).or_default(), transaction.magnitude(), category)?;
    }

    let mut grouped: Vec<CategoryAmount> = sums
        .into_iter()
        .filter(|(_, amount)| !amount.is_zero())
        .map(|(category, amount)| CategoryAmount {
            category: category.to_string(),
            amount,
        })
        .collect();
    grouped.sort_by(|a, b| {
        b.amount
            .cmp(&a.amount)
            .then_with(|| a.category.cmp(&b.category))
    });
    Ok(grouped)
}

/// Expense magnitudes per category for transactions inside `window`.
pub fn store_past_expenses<'a, I, W>(transactions: I, window: &W) -> Result<ExpenseTotals>
where
    I: IntoIterator<Item = &'a Transaction>,
    W: TimeWindow,
{
    let mut totals = ExpenseTotals::new();
    for transaction in transactions {
        if transaction.is_expense() && window.contains(transaction.timestamp) {
            let slot = totals.entry(transaction.category.clone()).or_default();
            accumulate(slot, transaction.magnitude(), &transaction.category)?;
        }
    }
    Ok(totals)
}

/// Expense and income magnitudes of one category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FlowSplit {
    pub expenses: Decimal,
    pub income: Decimal,
}

impl FlowSplit {
    /// Income minus expenses.
    pub fn net(&self) -> Decimal {
        self.income - self.expenses
    }
}

/// Signed split per category for transactions inside `window`.
pub fn flow_split<'a, I, W>(transactions: I, window: &W) -> Result<BTreeMap<String, FlowSplit>>
where
    I: IntoIterator<Item = &'a Transaction>,
    W: TimeWindow,
{
    let mut splits: BTreeMap<String, FlowSplit> = BTreeMap::new();
    for transaction in transactions {
        if !window.contains(transaction.timestamp) || transaction.amount.is_zero() {
            continue;
        }
        let split = splits.entry(transaction.category.clone()).or_default();
        let slot = if transaction.is_expense() {
            &mut split.expenses
        } else {
            &mut split.income
        };
        accumulate(slot, transaction.magnitude(), &transaction.category)?;
    }
    Ok(splits)
}

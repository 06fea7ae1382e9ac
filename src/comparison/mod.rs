//! Period-over-period expense comparison.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::aggregation::{store_past_expenses, ExpenseTotals};
use crate::calendar::{ClampedMonth, MonthBoundaries};
use crate::errors::{Result, StatsError};
use crate::ledger::Transaction;

/// What a comparison row describes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RowLabel {
    Category(String),
    Total,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonRow {
    pub label: RowLabel,
    /// Expenses in the current period.
    pub current: Decimal,
    /// Current minus prior.
    pub delta: Decimal,
}

impl ComparisonRow {
    pub fn category(&self) -> Option<&str> {
        match &self.label {
            RowLabel::Category(name) => Some(name),
            RowLabel::Total => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodComparison {
    /// Per-category rows, ascending by current amount.
    pub rows: Vec<ComparisonRow>,
    pub total: ComparisonRow,
}

impl PeriodComparison {
    /// Category rows followed by the total row.
    pub fn table_rows(&self) -> impl Iterator<Item = &ComparisonRow> {
        self.rows.iter().chain(std::iter::once(&self.total))
    }

    pub fn row(&self, category: &str) -> Option<&ComparisonRow> {
        self.rows.iter().find(|row| row.category() == Some(category))
    }
}

/// Compares two expense totals over the union of their categories.
///
/// A category missing on one side counts as zero there: current-only rows carry
/// `delta = current`, prior-only rows carry `current = 0, delta = -prior`. The
/// total row is computed from the two grand sums, not from the row deltas.
/// Totals are expected to be non-negative magnitudes; a grand sum past
/// `Decimal::MAX` is an error.
pub fn compare_periods(
    current: &ExpenseTotals,
    prior: &ExpenseTotals,
) -> Result<PeriodComparison> {
    let categories: BTreeSet<&String> = current.keys().chain(prior.keys()).collect();

    let mut rows: Vec<ComparisonRow> = categories
        .into_iter()
        .map(|category| {
            let (current_amount, delta) = match (current.get(category), prior.get(category)) {
                (Some(now), Some(before)) => (*now, *now - *before),
                (Some(now), None) => (*now, *now),
                (None, Some(before)) => (Decimal::ZERO, -*before),
                (None, None) => (Decimal::ZERO, Decimal::ZERO),
            };
            ComparisonRow {
                label: RowLabel::Category(category.clone()),
                current: current_amount,
                delta,
            }
        })
        .collect();
    // Stable sort over name-ordered input keeps ties alphabetical.
    rows.sort_by(|a, b| a.current.cmp(&b.current));

    let current_sum = grand_sum(current)?;
    let prior_sum = grand_sum(prior)?;
    Ok(PeriodComparison {
        rows,
        total: ComparisonRow {
            label: RowLabel::Total,
            current: current_sum,
            delta: current_sum - prior_sum,
        },
    })
}

fn grand_sum(totals: &ExpenseTotals) -> Result<Decimal> {
    totals
        .values()
        .try_fold(Decimal::ZERO, |sum, amount| sum.checked_add(*amount))
        .ok_or_else(|| {
            tracing::error!(categories = totals.len(), "decimal overflow in period total");
            StatsError::AmountOverflow("total".to_string())
        })
}

/// A clamped month compared against the month before it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyComparison {
    pub month: ClampedMonth,
    pub boundaries: MonthBoundaries,
    pub prior_boundaries: MonthBoundaries,
    pub current: ExpenseTotals,
    pub prior: ExpenseTotals,
    pub comparison: PeriodComparison,
}

pub fn monthly_comparison<'a, I>(
    transactions: I,
    month: ClampedMonth,
    now: DateTime<Utc>,
) -> Result<MonthlyComparison>
where
    I: IntoIterator<Item = &'a Transaction> + Clone,
{
    let boundaries = month.boundaries(now);
    let prior_boundaries = month.prior().boundaries(now);
    let current = store_past_expenses(transactions.clone(), &boundaries)?;
    let prior = store_past_expenses(transactions, &prior_boundaries)?;
    let comparison = compare_periods(&current, &prior)?;
    tracing::debug!(
        %month,
        categories = comparison.rows.len(),
        "compared month with prior"
    );
    Ok(MonthlyComparison {
        month,
        boundaries,
        prior_boundaries,
        current,
        prior,
        comparison,
    })
}

//! Rolling windows, category grouping and per-period expense totals.
//!
//! All sums are exact decimal additions. Expense figures are magnitudes; callers
//! decide how to render their sign.

pub mod grouping;
pub mod window;

use rust_decimal::Decimal;

use crate::errors::{Result, StatsError};

pub use grouping::{
    flow_split, grouped_cats, store_past_expenses, CategoryAmount, ExpenseTotals, FlowSplit,
};
pub use window::{
    filter_last_days, last_n_days, DailySeries, DayBucket, RollingWindow, WindowPreset,
    MAX_SERIES_DAYS,
};

/// Adds `amount` into `slot`, failing instead of overflowing.
pub(crate) fn accumulate(slot: &mut Decimal, amount: Decimal, category: &str) -> Result<()> {
    match slot.checked_add(amount) {
        Some(sum) => {
            *slot = sum;
            Ok(())
        }
        None => {
            tracing::error!(category, "decimal overflow while summing amounts");
            Err(StatsError::AmountOverflow(category.to_string()))
        }
    }
}

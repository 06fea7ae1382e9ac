use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::accumulate;
use crate::errors::{Result, StatsError};
use crate::ledger::{CategoryCatalog, Flow, Transaction};
use crate::time::TimeWindow;

/// Preset lengths offered for the rolling-window charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WindowPreset {
    #[default]
    Week,
    Month,
    Year,
}

impl WindowPreset {
    /// Choices for the daily series charts.
    pub const DAILY: [WindowPreset; 2] = [WindowPreset::Week, WindowPreset::Month];
    /// Choices for the distribution chart.
    pub const DISTRIBUTION: [WindowPreset; 3] =
        [WindowPreset::Week, WindowPreset::Month, WindowPreset::Year];

    pub fn days(self) -> u32 {
        match self {
            WindowPreset::Week => 7,
            WindowPreset::Month => 30,
            WindowPreset::Year => 365,
        }
    }

    /// Maps a button index to a preset; anything past `Month` is `Year`.
    pub fn from_index(index: usize) -> Self {
        match index {
            0 => WindowPreset::Week,
            1 => WindowPreset::Month,
            _ => WindowPreset::Year,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WindowPreset::Week => "Week",
            WindowPreset::Month => "Month",
            WindowPreset::Year => "Year",
        }
    }
}

/// Longest series [`last_n_days`] will build, a decade of daily buckets.
pub const MAX_SERIES_DAYS: u32 = 3_660;

/// The last `days` days up to `now`, closed on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollingWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub days: u32,
}

impl RollingWindow {
    /// The start saturates at the earliest representable instant.
    pub fn last_days(days: u32, now: DateTime<Utc>) -> Self {
        Self {
            start: now
                .checked_sub_signed(Duration::days(i64::from(days)))
                .unwrap_or(DateTime::<Utc>::MIN_UTC),
            end: now,
            days,
        }
    }

    /// Index of the 24h bucket holding `instant`, oldest bucket first.
    fn bucket_index(&self, instant: DateTime<Utc>) -> Option<usize> {
        if self.days == 0 || !self.contains(instant) {
            return None;
        }
        let offset = (instant - self.start).num_days();
        let last = self.days as usize - 1;
        Some((offset as usize).min(last))
    }
}

impl TimeWindow for RollingWindow {
    fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.days > 0 && self.start <= instant && instant <= self.end
    }
}

/// Transactions of the given flow inside the last `days` days.
pub fn filter_last_days<'a, I>(
    transactions: I,
    days: u32,
    flow: Flow,
    now: DateTime<Utc>,
) -> Vec<&'a Transaction>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let window = RollingWindow::last_days(days, now);
    transactions
        .into_iter()
        .filter(|transaction| {
            flow.matches(transaction.amount) && window.contains(transaction.timestamp)
        })
        .collect()
}

/// One 24h slice of a [`DailySeries`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayBucket {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Magnitudes aligned with [`DailySeries::categories`].
    pub amounts: Vec<Decimal>,
}

impl DayBucket {
    pub fn total(&self) -> Decimal {
        self.amounts.iter().copied().sum()
    }
}

/// Per-day, per-category sums for a stacked chart. Every cell is present, zero when idle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailySeries {
    pub flow: Flow,
    pub window: RollingWindow,
    pub categories: Vec<String>,
    pub buckets: Vec<DayBucket>,
}

impl DailySeries {
    pub fn amount(&self, bucket: usize, category: &str) -> Option<Decimal> {
        let column = self.categories.iter().position(|name| name == category)?;
        self.buckets.get(bucket).map(|day| day.amounts[column])
    }

    /// Largest stacked bar, for sizing an axis.
    pub fn max_bucket_total(&self) -> Decimal {
        self.buckets
            .iter()
            .map(DayBucket::total)
            .max()
            .unwrap_or(Decimal::ZERO)
    }

    pub fn total(&self) -> Decimal {
        self.buckets.iter().map(DayBucket::total).sum()
    }
}

/// Day-bucketed series of the given flow over the last `days` days.
///
/// Columns follow catalog order. A transaction whose category is not in the
/// catalog is an error, not a silently dropped row. Windows longer than
/// [`MAX_SERIES_DAYS`] are rejected before any bucket is allocated.
pub fn last_n_days<'a, I>(
    transactions: I,
    catalog: &CategoryCatalog,
    days: u32,
    flow: Flow,
    now: DateTime<Utc>,
) -> Result<DailySeries>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    if days > MAX_SERIES_DAYS {
        return Err(StatsError::WindowTooLarge {
            days,
            max: MAX_SERIES_DAYS,
        });
    }
    let window = RollingWindow::last_days(days, now);
    let categories: Vec<String> = catalog.names().map(str::to_string).collect();
    let mut buckets: Vec<DayBucket> = (0..days)
        .map(|index| {
            let start = window.start + Duration::days(i64::from(index));
            let end = if index + 1 == days {
                window.end
            } else {
                start + Duration::days(1)
            };
            DayBucket {
                start,
                end,
                amounts: vec![Decimal::ZERO; categories.len()],
            }
        })
        .collect();

    // Cells are non-negative, so a checked grand total bounds every bucket total.
    let mut grand_total = Decimal::ZERO;
    let mut matched = 0usize;
    for transaction in transactions {
        if !flow.matches(transaction.amount) {
            continue;
        }
        let Some(index) = window.bucket_index(transaction.timestamp) else {
            continue;
        };
        let column = catalog.require_position(&transaction.category)?;
        accumulate(&mut grand_total, transaction.magnitude(), &transaction.category)?;
        buckets[index].amounts[column] += transaction.magnitude();
        matched += 1;
    }

    tracing::debug!(days, ?flow, matched, "built daily series");
    Ok(DailySeries {
        flow,
        window,
        categories,
        buckets,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 20, 12, 0, 0).unwrap()
    }

    fn spent(amount: Decimal, category: &str, ago: Duration) -> Transaction {
        Transaction::new(amount, category, now() - ago)
    }

    #[test]
    fn window_includes_both_ends() {
        let window = RollingWindow::last_days(7, now());
        assert!(window.contains(now() - Duration::days(7)));
        assert!(window.contains(now()));
        assert!(!window.contains(now() - Duration::days(7) - Duration::seconds(1)));
        assert!(!window.contains(now() + Duration::seconds(1)));
    }

    #[test]
    fn filter_respects_flow_and_age() {
        let ts = vec![
            spent(dec!(-5), "Food", Duration::days(1)),
            spent(dec!(-9), "Food", Duration::days(8)),
            spent(dec!(100), "Salary", Duration::days(2)),
            spent(dec!(-1), "Food", Duration::days(7)),
        ];
        let expenses = filter_last_days(&ts, 7, Flow::Expense, now());
        assert_eq!(expenses.len(), 2);
        assert!(expenses.iter().all(|t| t.is_expense()));
        let income = filter_last_days(&ts, 7, Flow::Income, now());
        assert_eq!(income.len(), 1);
        assert!(filter_last_days(&ts, 0, Flow::Expense, now()).is_empty());
    }

    #[test]
    fn series_is_zero_filled_per_category() {
        let catalog = CategoryCatalog::builtin();
        let ts = vec![
            spent(dec!(-5.25), "Food", Duration::hours(1)),
            spent(dec!(-4.75), "Food", Duration::hours(2)),
            spent(dec!(-30), "Transport", Duration::days(6) + Duration::hours(1)),
        ];
        let series = last_n_days(&ts, catalog, 7, Flow::Expense, now()).unwrap();
        assert_eq!(series.buckets.len(), 7);
        assert_eq!(series.categories.len(), catalog.len());
        assert!(series.buckets.iter().all(|b| b.amounts.len() == catalog.len()));
        assert_eq!(series.amount(6, "Food"), Some(dec!(10.00)));
        assert_eq!(series.amount(0, "Transport"), Some(dec!(30)));
        assert_eq!(series.amount(3, "Rent"), Some(Decimal::ZERO));
        assert_eq!(series.total(), dec!(40));
        assert_eq!(series.max_bucket_total(), dec!(30));
    }

    #[test]
    fn boundary_transactions_land_in_edge_buckets() {
        let catalog = CategoryCatalog::builtin();
        let ts = vec![
            spent(dec!(-1), "Food", Duration::days(7)),
            spent(dec!(-2), "Food", Duration::zero()),
            spent(dec!(-4), "Food", Duration::days(8)),
        ];
        let series = last_n_days(&ts, catalog, 7, Flow::Expense, now()).unwrap();
        assert_eq!(series.amount(0, "Food"), Some(dec!(1)));
        assert_eq!(series.amount(6, "Food"), Some(dec!(2)));
        assert_eq!(series.total(), dec!(3));
        let again = last_n_days(&ts, catalog, 7, Flow::Expense, now()).unwrap();
        assert_eq!(series, again);
    }

    #[test]
    fn unknown_category_inside_window_is_an_error() {
        let catalog = CategoryCatalog::builtin();
        let ts = vec![spent(dec!(-1), "Moon base", Duration::days(1))];
        assert!(last_n_days(&ts, catalog, 7, Flow::Expense, now()).is_err());
        assert!(last_n_days(&ts, catalog, 7, Flow::Income, now()).is_ok());
    }

    #[test]
    fn zero_days_yield_empty_window_and_series() {
        let catalog = CategoryCatalog::builtin();
        let ts = vec![
            spent(dec!(-5), "Food", Duration::zero()),
            spent(dec!(-1), "Food", Duration::hours(1)),
        ];
        let window = RollingWindow::last_days(0, now());
        assert!(!window.contains(now()));
        assert_eq!(window.bucket_index(now()), None);

        let series = last_n_days(&ts, catalog, 0, Flow::Expense, now()).unwrap();
        assert!(series.buckets.is_empty());
        assert_eq!(series.categories.len(), catalog.len());
        assert_eq!(series.total(), Decimal::ZERO);
        assert_eq!(series.max_bucket_total(), Decimal::ZERO);
        assert_eq!(series.amount(0, "Food"), None);
    }

    #[test]
    fn huge_day_counts_saturate_or_are_rejected() {
        let catalog = CategoryCatalog::builtin();
        let ts = vec![
            spent(dec!(-5), "Food", Duration::days(1)),
            spent(dec!(-7), "Food", Duration::days(40_000)),
        ];
        let window = RollingWindow::last_days(u32::MAX, now());
        assert_eq!(window.start, DateTime::<Utc>::MIN_UTC);
        assert_eq!(filter_last_days(&ts, 200_000_000, Flow::Expense, now()).len(), 2);

        assert!(matches!(
            last_n_days(&ts, catalog, MAX_SERIES_DAYS + 1, Flow::Expense, now()),
            Err(StatsError::WindowTooLarge { max: MAX_SERIES_DAYS, .. })
        ));
        let longest = last_n_days(&ts, catalog, MAX_SERIES_DAYS, Flow::Expense, now()).unwrap();
        assert_eq!(longest.buckets.len(), MAX_SERIES_DAYS as usize);
        assert_eq!(longest.total(), dec!(5));
    }

    #[test]
    fn overflowing_series_is_an_error() {
        let catalog = CategoryCatalog::builtin();
        let ts = vec![
            spent(-Decimal::MAX, "Food", Duration::hours(1)),
            spent(-Decimal::MAX, "Rent", Duration::hours(2)),
        ];
        assert!(matches!(
            last_n_days(&ts, catalog, 7, Flow::Expense, now()),
            Err(StatsError::AmountOverflow(_))
        ));
    }

    #[test]
    fn presets_map_to_days() {
        assert_eq!(WindowPreset::from_index(0).days(), 7);
        assert_eq!(WindowPreset::from_index(1).days(), 30);
        assert_eq!(WindowPreset::from_index(2).days(), 365);
        assert_eq!(WindowPreset::DAILY.len(), 2);
    }
}

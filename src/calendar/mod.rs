//! Clamped month navigation and boundaries.
//!
//! Every function takes "now" explicitly; [`crate::services::StatsService`] wraps
//! them with a real clock.

pub mod clamped_month;

use chrono::{DateTime, Utc};

pub use clamped_month::{ClampedMonth, MonthBoundaries};

pub fn current_clamped_month(now: DateTime<Utc>) -> ClampedMonth {
    ClampedMonth::containing(now)
}

pub fn prior_clamped_month(month: ClampedMonth) -> ClampedMonth {
    month.prior()
}

pub fn next_clamped_month(month: ClampedMonth) -> ClampedMonth {
    month.next()
}

pub fn is_current(month: ClampedMonth, now: DateTime<Utc>) -> bool {
    month.is_current(now)
}

pub fn clamped_month_boundaries(month: ClampedMonth, now: DateTime<Utc>) -> MonthBoundaries {
    month.boundaries(now)
}

pub fn localize_clamped(month: ClampedMonth, locale: &str) -> String {
    month.localize(locale)
}

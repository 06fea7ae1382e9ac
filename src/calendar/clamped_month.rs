use std::fmt;

use chrono::{DateTime, Datelike, Duration, Locale, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{Result, StatsError};
use crate::time::TimeWindow;

const LABEL_FORMAT: &str = "%B %Y";

/// A calendar month whose upper bound is clamped to "now" while it is the present month.
///
/// Months are 1-based (January = 1) and evaluated in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ClampedMonth {
    year: i32,
    month: u32,
}

impl ClampedMonth {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        Self::representable(year, month).ok_or(StatsError::InvalidMonth { year, month })
    }

    /// The month containing `now`.
    pub fn containing(now: DateTime<Utc>) -> Self {
        Self {
            year: now.year(),
            month: now.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// The calendar month immediately before this one.
    ///
    /// Saturates at the earliest month chrono can represent.
    pub fn prior(&self) -> Self {
        let (year, month) = if self.month == 1 {
            (self.year - 1, 12)
        } else {
            (self.year, self.month - 1)
        };
        Self::representable(year, month).unwrap_or(*self)
    }

    /// The calendar month immediately after this one. Future months are allowed.
    ///
    /// Saturates at the latest month chrono can represent.
    pub fn next(&self) -> Self {
        let (year, month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        Self::representable(year, month).unwrap_or(*self)
    }

    pub fn is_current(&self, now: DateTime<Utc>) -> bool {
        *self == Self::containing(now)
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .expect("every constructor checks the first day exists")
    }

    pub fn days_in_month(&self) -> u32 {
        match self.next_first_day() {
            Some(next) => (next - Duration::days(1)).day(),
            // Only the last representable month, a December, has no successor.
            None => 31,
        }
    }

    /// Start of the month at 00:00 UTC.
    pub fn start(&self) -> DateTime<Utc> {
        midnight(self.first_day())
    }

    /// `[start, next month start)`, or `[start, now)` when this is the current month.
    ///
    /// The last representable month ends at the latest representable instant.
    pub fn boundaries(&self, now: DateTime<Utc>) -> MonthBoundaries {
        let end = if self.is_current(now) {
            now
        } else {
            self.next_first_day()
                .map(midnight)
                .unwrap_or(DateTime::<Utc>::MAX_UTC)
        };
        MonthBoundaries {
            start: self.start(),
            end,
        }
    }

    /// Month name and year, e.g. `March 2024`. Unknown locales fall back to `en_US`.
    pub fn localize(&self, locale: &str) -> String {
        self.start()
            .format_localized(LABEL_FORMAT, resolve_locale(locale))
            .to_string()
    }

    fn representable(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    fn next_first_day(&self) -> Option<NaiveDate> {
        let (year, month) = if self.month == 12 {
            (self.year.checked_add(1)?, 1)
        } else {
            (self.year, self.month + 1)
        };
        NaiveDate::from_ymd_opt(year, month, 1)
    }
}

impl fmt::Display for ClampedMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Closed-open range `[start, end)` of a clamped month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthBoundaries {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl MonthBoundaries {
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

impl TimeWindow for MonthBoundaries {
    fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }
}

fn midnight(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(chrono::NaiveTime::MIN))
}

/// Accepts both `en-US` and `en_US` spellings.
fn resolve_locale(tag: &str) -> Locale {
    let normalized = tag.trim().replace('-', "_");
    Locale::try_from(normalized.as_str()).unwrap_or_else(|_| {
        tracing::warn!(locale = tag, "unknown locale, using en_US for month labels");
        Locale::en_US
    })
}

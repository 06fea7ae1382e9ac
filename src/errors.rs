use std::result::Result as StdResult;

use thiserror::Error;

/// Error type for the stats core: data-integrity faults plus config I/O.
#[derive(Debug, Error)]
pub enum StatsError {
    #[error("Unknown category: {0}")]
    UnknownCategory(String),
    #[error("Duplicate category: {0}")]
    DuplicateCategory(String),
    #[error("Unknown icon source: {0}")]
    UnknownIconSource(String),
    #[error("Malformed timestamp: {0}")]
    MalformedTimestamp(String),
    #[error("Malformed amount: {0}")]
    MalformedAmount(String),
    #[error("Invalid month: {year}-{month}")]
    InvalidMonth { year: i32, month: u32 },
    #[error("Window of {days} days exceeds the {max} day limit")]
    WindowTooLarge { days: u32, max: u32 },
    #[error("Amount overflow while summing category: {0}")]
    AmountOverflow(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = StdResult<T, StatsError>;

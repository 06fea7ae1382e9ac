#![doc(test(attr(deny(warnings))))]

//! Budget Stats turns an unordered stream of transactions into time-windowed,
//! category-grouped summaries with exact decimal arithmetic and clamped-month
//! calendar semantics.

pub mod aggregation;
pub mod calendar;
pub mod comparison;
pub mod config;
pub mod errors;
pub mod ledger;
pub mod services;
pub mod time;
pub mod utils;

pub use errors::{Result, StatsError};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Budget Stats tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}

#![allow(dead_code)]

use budget_stats::ledger::{Transaction, TransactionLog};
use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;

/// Thursday, mid-March 2024, early evening.
pub fn reference_now() -> DateTime<Utc> {
    utc(2024, 3, 14, 18, 0, 0)
}

pub fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, s)
        .single()
        .expect("valid test timestamp")
}

pub fn txn(amount: Decimal, category: &str, at: DateTime<Utc>) -> Transaction {
    Transaction::new(amount, category, at)
}

pub fn log_of(transactions: Vec<Transaction>) -> TransactionLog {
    let mut log = TransactionLog::new();
    for transaction in transactions {
        log.append(transaction);
    }
    log
}

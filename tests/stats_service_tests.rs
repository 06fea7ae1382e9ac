mod common;

use std::sync::Arc;

use budget_stats::config::Config;
use budget_stats::ledger::{
    CategoryAssociations, CategoryCatalog, CategoryData, Flow, IconSource, TransactionLog,
};
use budget_stats::services::{StatsSelection, StatsService};
use budget_stats::time::FixedClock;
use budget_stats::StatsError;
use chrono::Duration;
use common::{log_of, reference_now, txn, utc};
use rust_decimal_macros::dec;

fn service() -> StatsService {
    StatsService::new(
        CategoryCatalog::builtin().clone(),
        Arc::new(FixedClock::new(reference_now())),
    )
}

#[test]
fn report_for_previous_month_allows_next() {
    let service = service();
    let log = log_of(vec![
        txn(dec!(-60), "Utilities", utc(2024, 2, 10, 0, 0, 0)),
        txn(dec!(-30), "Utilities", utc(2024, 1, 10, 0, 0, 0)),
    ]);
    let selection =
        StatsSelection::from_config(&Config::default(), service.now()).previous_month();
    let report = service.report(&log, &selection, "en-US").unwrap();

    assert!(report.can_go_next);
    assert_eq!(report.month_label, "February 2024");
    assert_eq!(report.monthly.comparison.row("Utilities").unwrap().delta, dec!(30));
    assert!(report.distribution.is_empty());
}

#[test]
fn service_wrappers_use_injected_clock() {
    let service = service();
    let march = service.current_month();
    assert!(service.is_current(march));
    assert_eq!(service.boundaries(march).end, reference_now());

    let ts = vec![txn(dec!(-2), "Food", reference_now() - Duration::days(3))];
    assert_eq!(service.filter_last_days(&ts, 7, Flow::Expense).len(), 1);
}

#[test]
fn imported_log_with_bad_timestamp_is_rejected() {
    let json = r#"[
        { "amount": "-4.50", "category": "Food", "timestamp": "2024-03-01T10:00:00Z" },
        { "amount": "-1.00", "category": "Food", "timestamp": "last tuesday" }
    ]"#;
    assert!(matches!(
        TransactionLog::from_json(json),
        Err(StatsError::MalformedTimestamp(_))
    ));
}

#[test]
fn associations_resolve_rows_for_display() {
    let service = service();
    let mut assocs = CategoryAssociations::new();
    assocs.set("Food", CategoryData::new(IconSource::Feather, "coffee", "222222"));
    let food = assocs.resolve_name(service.catalog(), "Food").unwrap();
    assert_eq!(food.css_color(), "#222222");
    let rent = assocs.resolve_name(service.catalog(), "Rent").unwrap();
    assert_eq!(rent, &service.catalog().find("Rent").unwrap().data);
}

use budget_stats::aggregation::{filter_last_days, grouped_cats, last_n_days, store_past_expenses};
use budget_stats::calendar::ClampedMonth;
use budget_stats::comparison::monthly_comparison;
use budget_stats::ledger::{CategoryCatalog, Flow, Transaction};
use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rust_decimal::Decimal;

fn build_sample_transactions(count: usize) -> Vec<Transaction> {
    let catalog = CategoryCatalog::builtin();
    let names: Vec<&str> = catalog.names().collect();
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    (0..count)
        .map(|idx| {
            let cents = 100 + (idx % 5000) as i64;
            let amount = if idx % 7 == 0 {
                Decimal::new(cents * 10, 2)
            } else {
                Decimal::new(-cents, 2)
            };
            let at = start + Duration::minutes((idx as i64 * 37) % (365 * 24 * 60));
            Transaction::new(amount, names[idx % names.len()], at)
        })
        .collect()
}

fn aggregation_benchmarks(c: &mut Criterion) {
    let transactions = build_sample_transactions(50_000);
    let catalog = CategoryCatalog::builtin();
    let now = Utc.with_ymd_and_hms(2024, 12, 20, 12, 0, 0).unwrap();
    let month = ClampedMonth::containing(now);

    c.bench_function("last_n_days_month", |b| {
        b.iter(|| last_n_days(black_box(&transactions), catalog, 30, Flow::Expense, now))
    });
    c.bench_function("grouped_cats_year", |b| {
        b.iter(|| grouped_cats(filter_last_days(black_box(&transactions), 365, Flow::Expense, now)))
    });
    c.bench_function("store_past_expenses", |b| {
        let bounds = month.boundaries(now);
        b.iter(|| store_past_expenses(black_box(&transactions), &bounds))
    });
    c.bench_function("monthly_comparison", |b| {
        b.iter(|| monthly_comparison(black_box(&transactions), month, now))
    });
}

criterion_group!(benches, aggregation_benchmarks);
criterion_main!(benches);

// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{TimeZone, Utc};
use money_manager::metrics;
use money_manager::models::{Source, Transaction, default_sources};
use rust_decimal::Decimal;

fn txn(id: i64, amount: i64, source: &str, y: i32, m: u32, d: u32) -> Transaction {
    let date = Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap();
    Transaction {
        id,
        kind: None,
        amount: Decimal::from(amount),
        source: source.to_string(),
        description: None,
        date,
        timestamp: date,
    }
}

// Newest first, spanning two months and two sources.
fn log() -> Vec<Transaction> {
    vec![
        txn(5, -40, "bank", 2025, 2, 20),
        txn(4, 300, "cash", 2025, 2, 3),
        txn(3, -25, "cash", 2025, 1, 28),
        txn(2, -100, "bank", 2025, 1, 10),
        txn(1, 1000, "bank", 2025, 1, 1),
    ]
}

#[test]
fn total_balance_sums_everything() {
    let mut sources = default_sources();
    sources[0].balance = Decimal::from(500);
    sources[1].balance = Decimal::from(-120);
    assert_eq!(metrics::total_balance(&sources), Decimal::from(380));
}

#[test]
fn large_totals_saturate_instead_of_overflowing() {
    let mut sources = default_sources();
    sources[0].balance = Decimal::MAX;
    sources[1].balance = Decimal::MAX;
    assert_eq!(metrics::total_balance(&sources), Decimal::MAX);

    let mut big = txn(2, 0, "cash", 2025, 3, 1);
    big.amount = Decimal::MAX;
    let log = vec![big.clone(), big];
    let m = metrics::source_metrics(&log, "cash");
    assert_eq!(m.total_income, Decimal::MAX);
    assert_eq!(m.net_flow, Decimal::MAX);
    assert_eq!(m.total_transactions, 2);
}

#[test]
fn distribution_skips_non_positive_balances() {
    let sources = vec![
        Source::new("a", "A", Decimal::from(300), "#111111"),
        Source::new("b", "B", Decimal::ZERO, "#222222"),
        Source::new("c", "C", Decimal::from(-50), "#333333"),
        Source::new("d", "D", Decimal::from(200), "#444444"),
    ];
    let slices = metrics::distribution(&sources);
    let names: Vec<&str> = slices.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["A", "D"]);
    assert!(slices.iter().all(|s| s.value > Decimal::ZERO));
    let sum: Decimal = slices.iter().map(|s| s.value).sum();
    assert_eq!(sum, Decimal::from(500));
    assert_eq!(slices[1].color, "#444444");
}

#[test]
fn source_metrics_only_counts_its_own_transactions() {
    let log = log();
    let bank = metrics::source_metrics(&log, "bank");
    assert_eq!(bank.total_income, Decimal::from(1000));
    assert_eq!(bank.total_expense, Decimal::from(140));
    assert_eq!(bank.net_flow, Decimal::from(860));
    assert_eq!(bank.total_transactions, 3);

    let cash = metrics::source_metrics(&log, "cash");
    assert_eq!(cash.net_flow, cash.total_income - cash.total_expense);
    assert_eq!(cash.total_transactions, 2);

    let none = metrics::source_metrics(&log, "digitalWallets");
    assert_eq!(none.total_transactions, 0);
    assert_eq!(none.net_flow, Decimal::ZERO);
}

#[test]
fn group_by_month_keeps_encounter_order() {
    let log = log();
    let buckets = metrics::group_by_month(&log);
    let labels: Vec<&str> = buckets.iter().map(|b| b.label.as_str()).collect();
    assert_eq!(labels, ["February 2025", "January 2025"]);
    let feb_ids: Vec<i64> = buckets[0].transactions.iter().map(|t| t.id).collect();
    assert_eq!(feb_ids, [5, 4]);
    let jan_ids: Vec<i64> = buckets[1].transactions.iter().map(|t| t.id).collect();
    assert_eq!(jan_ids, [3, 2, 1]);
}

#[test]
fn group_by_month_handles_interleaved_months() {
    let log = vec![
        txn(3, 1, "cash", 2025, 3, 1),
        txn(2, 1, "cash", 2024, 3, 1),
        txn(1, 1, "cash", 2025, 3, 2),
    ];
    let buckets = metrics::group_by_month(&log);
    assert_eq!(buckets.len(), 2);
    assert_eq!(buckets[0].label, "March 2025");
    assert_eq!(buckets[0].transactions.len(), 2);
    assert_eq!(buckets[1].label, "March 2024");
}

#[test]
fn monthly_trend_splits_income_and_expense() {
    let trend = metrics::monthly_trend(&log());
    assert_eq!(trend.len(), 2);
    assert_eq!(trend[0].month, "February 2025");
    assert_eq!(trend[0].income, Decimal::from(300));
    assert_eq!(trend[0].expense, Decimal::from(40));
    assert_eq!(trend[1].income, Decimal::from(1000));
    assert_eq!(trend[1].expense, Decimal::from(125));
}

#[test]
fn source_comparison_follows_source_order() {
    let sources = vec![
        Source::new("cash", "Cash", Decimal::ZERO, "#0088FE"),
        Source::new("bank", "Bank", Decimal::ZERO, "#00C49F"),
    ];
    let rows = metrics::source_comparison(&sources, &log());
    assert_eq!(rows[0].name, "Cash");
    assert_eq!(rows[0].income, Decimal::from(300));
    assert_eq!(rows[0].expense, Decimal::from(25));
    assert_eq!(rows[1].name, "Bank");
    assert_eq!(rows[1].expense, Decimal::from(140));
}

#[test]
fn recent_takes_the_newest_entries() {
    let log = log();
    let ids: Vec<i64> = metrics::recent(&log, 2).iter().map(|t| t.id).collect();
    assert_eq!(ids, [5, 4]);
    assert_eq!(metrics::recent(&log, 50).len(), 5);
    assert!(metrics::recent(&[], 5).is_empty());
}

#[test]
fn metrics_leave_input_untouched() {
    let log = log();
    let copy = log.clone();
    let _ = metrics::monthly_trend(&log);
    let _ = metrics::source_metrics(&log, "cash");
    assert_eq!(log, copy);
}

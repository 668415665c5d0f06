// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Derived views over the ledger. Every function here is pure.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::models::{
    DistributionSlice, MonthBucket, MonthlyTrend, Source, SourceComparison, SourceMetrics,
    Transaction,
};

/// Saturates at `Decimal::MAX`/`Decimal::MIN` instead of overflowing.
pub fn total_balance(sources: &[Source]) -> Decimal {
    sources
        .iter()
        .fold(Decimal::ZERO, |acc, s| acc.saturating_add(s.balance))
}

/// Sources with a positive balance, for proportional charts.
pub fn distribution(sources: &[Source]) -> Vec<DistributionSlice> {
    sources
        .iter()
        .filter(|s| s.balance > Decimal::ZERO)
        .map(|s| DistributionSlice {
            name: s.name.clone(),
            value: s.balance,
            color: s.color.clone(),
        })
        .collect()
}

/// Sums positive amounts as income and the magnitude of negative amounts as
/// expense. Both sums saturate.
fn flows<'a>(txns: impl IntoIterator<Item = &'a Transaction>) -> (Decimal, Decimal, usize) {
    let mut income = Decimal::ZERO;
    let mut outflow = Decimal::ZERO;
    let mut count = 0;
    for t in txns {
        if t.amount > Decimal::ZERO {
            income = income.saturating_add(t.amount);
        } else if t.amount < Decimal::ZERO {
            outflow = outflow.saturating_add(t.amount);
        }
        count += 1;
    }
    (income, outflow.abs(), count)
}

pub fn source_metrics(transactions: &[Transaction], source_id: &str) -> SourceMetrics {
    let (total_income, total_expense, total_transactions) =
        flows(transactions.iter().filter(|t| t.source == source_id));
    SourceMetrics {
        total_income,
        total_expense,
        net_flow: total_income - total_expense,
        total_transactions,
    }
}

/// "January 2025" style label for the UTC month of `date`.
pub fn month_label(date: &DateTime<Utc>) -> String {
    date.format("%B %Y").to_string()
}

/// Buckets transactions by month label. Buckets appear in the order their
/// first transaction is encountered; each keeps its transactions in input order.
pub fn group_by_month(transactions: &[Transaction]) -> Vec<MonthBucket<'_>> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut buckets: Vec<MonthBucket<'_>> = Vec::new();
    for t in transactions {
        let label = month_label(&t.date);
        let slot = match index.get(&label) {
            Some(&i) => i,
            None => {
                index.insert(label.clone(), buckets.len());
                buckets.push(MonthBucket {
                    label,
                    transactions: Vec::new(),
                });
                buckets.len() - 1
            }
        };
        buckets[slot].transactions.push(t);
    }
    buckets
}

pub fn monthly_trend(transactions: &[Transaction]) -> Vec<MonthlyTrend> {
    group_by_month(transactions)
        .into_iter()
        .map(|bucket| {
            let (income, expense, _) = flows(bucket.transactions.iter().copied());
            MonthlyTrend {
                month: bucket.label,
                income,
                expense,
            }
        })
        .collect()
}

pub fn source_comparison(sources: &[Source], transactions: &[Transaction]) -> Vec<SourceComparison> {
    sources
        .iter()
        .map(|s| {
            let m = source_metrics(transactions, &s.id);
            SourceComparison {
                name: s.name.clone(),
                income: m.total_income,
                expense: m.total_expense,
            }
        })
        .collect()
}

/// The `n` newest entries of a newest-first log.
pub fn recent(transactions: &[Transaction], n: usize) -> &[Transaction] {
    &transactions[..n.min(transactions.len())]
}

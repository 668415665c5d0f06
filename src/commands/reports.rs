// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::LedgerError;
use crate::metrics;
use crate::storage::{KeyValueStore, Repository};
use crate::utils::{format_inr, format_signed_inr, maybe_print_json, pretty_table};
use anyhow::Result;
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle<S: KeyValueStore>(repo: &Repository<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("total", sub)) => total(repo, sub)?,
        Some(("distribution", sub)) => distribution(repo, sub)?,
        Some(("source", sub)) => source(repo, sub)?,
        Some(("monthly", sub)) => monthly(repo, sub)?,
        Some(("compare", sub)) => compare(repo, sub)?,
        _ => {}
    }
    Ok(())
}

#[derive(Serialize)]
struct TotalBalance {
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    total: Decimal,
}

fn total<S: KeyValueStore>(repo: &Repository<S>, sub: &clap::ArgMatches) -> Result<()> {
    let ledger = repo.load();
    let total = metrics::total_balance(ledger.sources());
    let out = TotalBalance { total };
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &out)? {
        let sign = if total < Decimal::ZERO { "-" } else { "" };
        println!("Total balance: {}{}", sign, format_inr(total));
    }
    Ok(())
}

fn distribution<S: KeyValueStore>(repo: &Repository<S>, sub: &clap::ArgMatches) -> Result<()> {
    let ledger = repo.load();
    let slices = metrics::distribution(ledger.sources());
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &slices)? {
        return Ok(());
    }
    let positive = slices
        .iter()
        .fold(Decimal::ZERO, |acc, s| acc.saturating_add(s.value));
    let data = slices
        .iter()
        .map(|s| {
            let share = if positive.is_zero() {
                Decimal::ZERO
            } else {
                (s.value / positive * Decimal::ONE_HUNDRED).round_dp(1)
            };
            vec![
                s.name.clone(),
                format_inr(s.value),
                format!("{}%", share),
                s.color.clone(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Source", "Balance", "Share", "Color"], data)
    );
    Ok(())
}

fn source<S: KeyValueStore>(repo: &Repository<S>, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").map(|s| s.trim()).unwrap_or_default();
    let ledger = repo.load();
    let src = ledger
        .source(id)
        .ok_or_else(|| LedgerError::SourceNotFound(id.to_string()))?;
    let m = metrics::source_metrics(ledger.transactions(), id);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &m)? {
        return Ok(());
    }
    println!("{} analytics", src.name);
    println!(
        "{}",
        pretty_table(
            &["Total Income", "Total Expense", "Net Flow", "Transactions"],
            vec![vec![
                format_inr(m.total_income),
                format_inr(m.total_expense),
                format_signed_inr(m.net_flow),
                m.total_transactions.to_string(),
            ]],
        )
    );
    Ok(())
}

fn monthly<S: KeyValueStore>(repo: &Repository<S>, sub: &clap::ArgMatches) -> Result<()> {
    let ledger = repo.load();
    let trend = metrics::monthly_trend(ledger.transactions());
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &trend)? {
        return Ok(());
    }
    let data = trend
        .into_iter()
        .map(|t| vec![t.month, format!("{:.2}", t.income), format!("{:.2}", t.expense)])
        .collect();
    println!("{}", pretty_table(&["Month", "Income", "Expense"], data));
    Ok(())
}

fn compare<S: KeyValueStore>(repo: &Repository<S>, sub: &clap::ArgMatches) -> Result<()> {
    let ledger = repo.load();
    let rows = metrics::source_comparison(ledger.sources(), ledger.transactions());
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &rows)? {
        return Ok(());
    }
    let data = rows
        .into_iter()
        .map(|r| vec![r.name, format!("{:.2}", r.income), format!("{:.2}", r.expense)])
        .collect();
    println!("{}", pretty_table(&["Source", "Income", "Expense"], data));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn total_serializes_as_a_number() {
        let out = TotalBalance {
            total: Decimal::from_str("-1234567890123.456789").unwrap(),
        };
        assert_eq!(
            serde_json::to_string(&out).unwrap(),
            r#"{"total":-1234567890123.456789}"#
        );
    }
}

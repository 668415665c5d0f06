// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::Ledger;
use crate::metrics::month_label;
use crate::models::{NewTransaction, TxnType};
use crate::storage::{KeyValueStore, Repository};
use crate::utils::{
    format_date, format_inr, format_signed_inr, maybe_print_json, parse_amount, parse_date,
    pretty_table,
};
use anyhow::{Result, anyhow};
use serde::Serialize;

pub fn handle<S: KeyValueStore>(repo: &mut Repository<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(repo, sub)?,
        Some(("list", sub)) => list(repo, sub)?,
        _ => {}
    }
    Ok(())
}

fn add<S: KeyValueStore>(repo: &mut Repository<S>, sub: &clap::ArgMatches) -> Result<()> {
    let kind = sub
        .get_one::<String>("type")
        .map(|s| s.parse::<TxnType>())
        .transpose()
        .map_err(|e| anyhow!(e))?
        .unwrap_or(TxnType::Expense);
    let amount = parse_amount(sub.get_one::<String>("amount").map(String::as_str).unwrap_or(""))?;
    let source = sub
        .get_one::<String>("source")
        .map(|s| s.trim().to_string())
        .unwrap_or_default();
    let description = sub.get_one::<String>("description").cloned();
    let date = match sub.get_one::<String>("date") {
        Some(d) => Some(parse_date(d)?),
        None => None,
    };

    let mut ledger = repo.load();
    let txn = ledger
        .record_transaction(NewTransaction {
            kind,
            amount,
            source,
            description,
            date,
        })?
        .clone();
    repo.save_or_log(&ledger);
    let balance = ledger.source(&txn.source).map(|s| s.balance).unwrap_or_default();
    println!(
        "Recorded {} {} on {} (source: {}, balance now {})",
        txn.kind().as_str(),
        format_inr(txn.amount),
        format_date(&txn.date),
        txn.source,
        format_inr(balance)
    );
    Ok(())
}

fn list<S: KeyValueStore>(repo: &Repository<S>, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let ledger = repo.load();
    let data = query_rows(&ledger, sub);
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.date.clone(),
                    r.source.clone(),
                    r.kind.clone(),
                    r.display_amount.clone(),
                    r.description.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Source", "Type", "Amount", "Description"], rows)
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub source: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: String,
    #[serde(skip)]
    pub display_amount: String,
    pub description: String,
}

/// Newest-first rows matching the `source`, `month` and `limit` filters.
/// Source names are resolved through the ledger; unknown ids show as-is.
pub fn query_rows(ledger: &Ledger, sub: &clap::ArgMatches) -> Vec<TransactionRow> {
    let source = sub.get_one::<String>("source").map(|s| s.trim());
    let month = sub.get_one::<String>("month").map(|s| s.trim().to_lowercase());
    let limit = sub.get_one::<usize>("limit").copied().unwrap_or(usize::MAX);

    ledger
        .transactions()
        .iter()
        .filter(|t| source.is_none_or(|s| t.source == s))
        .filter(|t| {
            month
                .as_deref()
                .is_none_or(|m| month_label(&t.date).to_lowercase() == m)
        })
        .take(limit)
        .map(|t| TransactionRow {
            id: t.id,
            date: t.date.format("%Y-%m-%d").to_string(),
            source: ledger
                .source(&t.source)
                .map(|s| s.name.clone())
                .unwrap_or_else(|| t.source.clone()),
            kind: t.kind().as_str().to_string(),
            amount: t.amount.to_string(),
            display_amount: format_signed_inr(t.amount),
            description: t.description.clone().unwrap_or_default(),
        })
        .collect()
}

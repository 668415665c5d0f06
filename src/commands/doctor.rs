// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashSet;

use crate::ledger::Ledger;
use crate::storage::{KeyValueStore, Repository};
use crate::utils::pretty_table;
use anyhow::Result;

pub fn handle<S: KeyValueStore>(repo: &Repository<S>) -> Result<()> {
    let ledger = repo.load();
    let rows = find_issues(&ledger);
    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}

/// Each issue is a `[code, detail]` pair.
pub fn find_issues(ledger: &Ledger) -> Vec<Vec<String>> {
    let mut rows = Vec::new();

    // 1) Sources left half-written by older versions
    for s in ledger.sources() {
        if s.name.trim().is_empty() {
            rows.push(vec!["source_without_name".into(), s.id.clone()]);
        }
        if s.color.trim().is_empty() {
            rows.push(vec!["source_without_color".into(), s.id.clone()]);
        }
    }

    // 2) Transactions pointing at sources that no longer exist
    let known: HashSet<&str> = ledger.sources().iter().map(|s| s.id.as_str()).collect();
    for t in ledger.transactions() {
        if !known.contains(t.source.as_str()) {
            rows.push(vec![
                "dangling_source".into(),
                format!("txn {} -> {}", t.id, t.source),
            ]);
        }
        if t.amount.is_zero() {
            rows.push(vec!["zero_amount".into(), format!("txn {}", t.id)]);
        }
    }

    // 3) Id uniqueness and newest-first ordering
    let mut seen = HashSet::new();
    for t in ledger.transactions() {
        if !seen.insert(t.id) {
            rows.push(vec!["duplicate_txn_id".into(), t.id.to_string()]);
        }
    }
    for pair in ledger.transactions().windows(2) {
        if pair[0].id < pair[1].id {
            rows.push(vec![
                "out_of_order".into(),
                format!("{} before {}", pair[0].id, pair[1].id),
            ]);
        }
    }

    rows
}

// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::metrics;
use crate::storage::{KeyValueStore, Repository};
use crate::utils::{format_date, format_inr, format_signed_inr, pretty_table};
use anyhow::Result;

pub fn handle<S: KeyValueStore>(repo: &Repository<S>, m: &clap::ArgMatches) -> Result<()> {
    let n = m.get_one::<usize>("recent").copied().unwrap_or(5);
    let ledger = repo.load();

    println!(
        "Total Balance: {}",
        format_inr(metrics::total_balance(ledger.sources()))
    );

    let balances = ledger
        .sources()
        .iter()
        .map(|s| vec![s.name.clone(), format_inr(s.balance)])
        .collect();
    println!("{}", pretty_table(&["Source", "Balance"], balances));

    let recent = metrics::recent(ledger.transactions(), n);
    if recent.is_empty() {
        println!("No transactions yet");
        return Ok(());
    }
    let rows = recent
        .iter()
        .map(|t| {
            let source = ledger
                .source(&t.source)
                .map(|s| s.name.clone())
                .unwrap_or_default();
            vec![
                t.description.clone().unwrap_or_default(),
                source,
                format_date(&t.date),
                format_signed_inr(t.amount),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Description", "Source", "Date", "Amount"], rows)
    );
    Ok(())
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{NewSource, SourcePatch};
use crate::storage::{KeyValueStore, Repository};
use crate::utils::{format_inr, maybe_print_json, parse_balance, parse_decimal, pretty_table};
use anyhow::Result;

pub fn handle<S: KeyValueStore>(repo: &mut Repository<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(repo, sub)?,
        Some(("list", sub)) => list(repo, sub)?,
        Some(("edit", sub)) => edit(repo, sub)?,
        Some(("rm", sub)) => remove(repo, sub)?,
        _ => {}
    }
    Ok(())
}

fn add<S: KeyValueStore>(repo: &mut Repository<S>, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").cloned().unwrap_or_default();
    let balance = sub
        .get_one::<String>("balance")
        .map(|s| parse_balance(s))
        .unwrap_or_default();
    let icon_name = sub
        .get_one::<String>("icon")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    let mut ledger = repo.load();
    let source = ledger
        .add_source(NewSource {
            name,
            initial_balance: balance,
            icon_name,
        })?
        .clone();
    repo.save_or_log(&ledger);
    println!(
        "Added source '{}' ({}) with balance {}",
        source.name,
        source.id,
        format_inr(source.balance)
    );
    Ok(())
}

fn list<S: KeyValueStore>(repo: &Repository<S>, sub: &clap::ArgMatches) -> Result<()> {
    let ledger = repo.load();
    if maybe_print_json(
        sub.get_flag("json"),
        sub.get_flag("jsonl"),
        &ledger.sources(),
    )? {
        return Ok(());
    }
    let data = ledger
        .sources()
        .iter()
        .map(|s| {
            vec![
                s.id.clone(),
                s.name.clone(),
                format!("{:.2}", s.balance),
                s.color.clone(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["ID", "Name", "Balance", "Color"], data)
    );
    Ok(())
}

fn edit<S: KeyValueStore>(repo: &mut Repository<S>, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").map(|s| s.trim()).unwrap_or_default();
    let balance = match sub.get_one::<String>("balance") {
        Some(b) => Some(parse_decimal(b)?),
        None => None,
    };
    let patch = SourcePatch {
        name: sub.get_one::<String>("name").cloned(),
        balance,
        color: sub.get_one::<String>("color").map(|s| s.trim().to_string()),
        icon_name: sub.get_one::<String>("icon").map(|s| s.trim().to_string()),
    };

    let mut ledger = repo.load();
    let source = ledger.update_source(id, patch)?.clone();
    repo.save_or_log(&ledger);
    println!(
        "Updated source '{}' ({}): balance {}",
        source.name,
        source.id,
        format_inr(source.balance)
    );
    Ok(())
}

fn remove<S: KeyValueStore>(repo: &mut Repository<S>, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").map(|s| s.trim()).unwrap_or_default();
    let mut ledger = repo.load();
    let removed = ledger.delete_source(id)?;
    repo.save_or_log(&ledger);
    println!("Removed source '{}' ({})", removed.name, removed.id);
    Ok(())
}

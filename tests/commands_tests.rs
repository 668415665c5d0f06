// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use money_manager::commands::{doctor, reports, sources, transactions};
use money_manager::storage::{KeyValueStore, MemoryStore, Repository, SOURCES_KEY, TRANSACTIONS_KEY};
use money_manager::{cli, metrics};
use rust_decimal::Decimal;

/// Parses `args` and returns the matches below the top-level subcommand.
fn sub(args: &[&str]) -> clap::ArgMatches {
    let mut full = vec!["money-manager"];
    full.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(full);
    match matches.subcommand() {
        Some((_, m)) => m.clone(),
        None => panic!("no subcommand parsed from {:?}", args),
    }
}

fn run_tx(repo: &mut Repository<MemoryStore>, args: &[&str]) -> anyhow::Result<()> {
    let mut full = vec!["tx"];
    full.extend_from_slice(args);
    transactions::handle(repo, &sub(&full))
}

fn run_source(repo: &mut Repository<MemoryStore>, args: &[&str]) -> anyhow::Result<()> {
    let mut full = vec!["source"];
    full.extend_from_slice(args);
    sources::handle(repo, &sub(&full))
}

#[test]
fn tx_add_persists_and_updates_balance() {
    let mut repo = Repository::new(MemoryStore::new());
    run_tx(&mut repo, &["add", "--type", "income", "--amount", "500", "--source", "cash"]).unwrap();
    run_tx(
        &mut repo,
        &["add", "--type", "expense", "--amount", "200", "--source", "cash", "--description", "Groceries"],
    )
    .unwrap();

    let l = repo.load();
    assert_eq!(l.source("cash").unwrap().balance, Decimal::from(300));
    assert_eq!(l.transactions().len(), 2);
    assert_eq!(l.transactions()[0].description.as_deref(), Some("Groceries"));
    assert_eq!(metrics::total_balance(l.sources()), Decimal::from(300));
}

#[test]
fn tx_add_rejects_bad_amount_before_writing() {
    let mut repo = Repository::new(MemoryStore::new());
    for bad in ["abc", "0", "-10"] {
        let err = run_tx(&mut repo, &["add", "--amount", bad, "--source", "cash"]).unwrap_err();
        assert!(err.to_string().contains("Invalid amount"), "{}", err);
    }
    assert!(repo.store().raw(TRANSACTIONS_KEY).is_none());
    assert!(repo.store().raw(SOURCES_KEY).is_none());
}

#[test]
fn tx_add_accepts_backdated_entries() {
    let mut repo = Repository::new(MemoryStore::new());
    run_tx(
        &mut repo,
        &["add", "--type", "income", "--amount", "50", "--source", "bankAccounts", "--date", "2024-12-25"],
    )
    .unwrap();
    let l = repo.load();
    assert_eq!(metrics::month_label(&l.transactions()[0].date), "December 2024");
}

#[test]
fn source_rm_refuses_referenced_source() {
    let mut repo = Repository::new(MemoryStore::new());
    run_tx(&mut repo, &["add", "--amount", "20", "--source", "cash"]).unwrap();
    let before = repo.store().raw(SOURCES_KEY).map(str::to_string);

    let err = run_source(&mut repo, &["rm", "--id", "cash"]).unwrap_err();
    assert!(err.to_string().contains("existing transactions"));
    assert_eq!(repo.store().raw(SOURCES_KEY).map(str::to_string), before);

    run_source(&mut repo, &["rm", "--id", " digitalWallets "]).unwrap();
    assert!(repo.load().source("digitalWallets").is_none());
}

#[test]
fn source_add_treats_junk_balance_as_zero() {
    let mut repo = Repository::new(MemoryStore::new());
    run_source(&mut repo, &["add", "--name", "Savings", "--balance", "1000"]).unwrap();
    run_source(&mut repo, &["add", "--name", "Jar", "--balance", "plenty", "--icon", "jar"]).unwrap();

    let l = repo.load();
    assert_eq!(l.sources().len(), 5);
    let savings = l.sources().iter().find(|s| s.name == "Savings").unwrap();
    assert_eq!(savings.balance, Decimal::from(1000));
    assert!(savings.id.starts_with("source-"));
    let jar = l.sources().iter().find(|s| s.name == "Jar").unwrap();
    assert_eq!(jar.balance, Decimal::ZERO);
    assert_eq!(jar.icon_name.as_deref(), Some("jar"));
    assert_ne!(savings.id, jar.id);
}

#[test]
fn source_edit_rejects_unknown_id() {
    let mut repo = Repository::new(MemoryStore::new());
    let err = run_source(&mut repo, &["edit", "--id", "ghost", "--name", "Boo"]).unwrap_err();
    assert!(err.to_string().contains("not found"));
    assert!(repo.store().raw(SOURCES_KEY).is_none());

    run_source(&mut repo, &["edit", "--id", "cash", "--balance", "75.25"]).unwrap();
    let l = repo.load();
    assert_eq!(l.source("cash").unwrap().balance.to_string(), "75.25");
    assert_eq!(l.source("cash").unwrap().name, "Cash");
}

#[test]
fn write_failure_is_not_fatal() {
    let mut repo = Repository::new(MemoryStore::new());
    repo.store_mut().set_fail_writes(true);
    run_tx(&mut repo, &["add", "--type", "income", "--amount", "5", "--source", "cash"]).unwrap();
    repo.store_mut().set_fail_writes(false);
    assert!(repo.load().transactions().is_empty());
}

#[test]
fn tx_list_filters_and_limits() {
    let mut repo = Repository::new(MemoryStore::new());
    run_tx(&mut repo, &["add", "--amount", "1", "--source", "cash", "--date", "2025-01-05"]).unwrap();
    run_tx(&mut repo, &["add", "--amount", "2", "--source", "bankAccounts", "--date", "2025-02-05"]).unwrap();
    run_tx(&mut repo, &["add", "--amount", "3", "--source", "cash", "--date", "2025-02-06"]).unwrap();
    let ledger = repo.load();

    let list = sub(&["tx", "list"]);
    let rows = transactions::query_rows(&ledger, list.subcommand_matches("list").unwrap());
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].amount, "-3");
    assert_eq!(rows[0].source, "Cash");

    let list = sub(&["tx", "list", "--source", "cash", "--limit", "1"]);
    let rows = transactions::query_rows(&ledger, list.subcommand_matches("list").unwrap());
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].date, "2025-02-06");

    let list = sub(&["tx", "list", "--month", "february 2025"]);
    let rows = transactions::query_rows(&ledger, list.subcommand_matches("list").unwrap());
    let amounts: Vec<&str> = rows.iter().map(|r| r.amount.as_str()).collect();
    assert_eq!(amounts, ["-3", "-2"]);
}

#[test]
fn reports_accept_json_output() {
    let mut repo = Repository::new(MemoryStore::new());
    run_tx(&mut repo, &["add", "--type", "income", "--amount", "10", "--source", "cash"]).unwrap();
    let cases: [&[&str]; 5] = [
        &["report", "total", "--json"],
        &["report", "distribution"],
        &["report", "monthly", "--jsonl"],
        &["report", "compare"],
        &["report", "source", "--id", "cash"],
    ];
    for args in cases {
        reports::handle(&repo, &sub(args)).unwrap();
    }
    assert!(reports::handle(&repo, &sub(&["report", "source", "--id", "nope"])).is_err());
}

#[test]
fn report_json_carries_exact_numbers() {
    let mut repo = Repository::new(MemoryStore::new());
    run_tx(&mut repo, &["add", "--type", "income", "--amount", "10.25", "--source", "cash"]).unwrap();
    let ledger = repo.load();

    let m = serde_json::to_value(metrics::source_metrics(ledger.transactions(), "cash")).unwrap();
    assert!(m["total_income"].is_number());
    assert_eq!(m["total_income"].to_string(), "10.25");

    let slices = serde_json::to_value(metrics::distribution(ledger.sources())).unwrap();
    assert_eq!(slices[0]["value"].to_string(), "10.25");
}

#[test]
fn doctor_flags_dangling_and_malformed_records() {
    let mut store = MemoryStore::new();
    store
        .put(
            SOURCES_KEY,
            r##"{"cash":{"id":"cash","name":"Cash","balance":0,"color":"#0088FE"},"source-9":{"balance":3}}"##,
        )
        .unwrap();
    store
        .put(
            TRANSACTIONS_KEY,
            r#"[
                {"id":2,"type":"expense","amount":-4,"source":"gone","date":"2025-01-02T00:00:00Z","timestamp":"2025-01-02T00:00:00Z"},
                {"id":2,"type":"income","amount":4,"source":"cash","date":"2025-01-01T00:00:00Z","timestamp":"2025-01-01T00:00:00Z"}
            ]"#,
        )
        .unwrap();
    let repo = Repository::new(store);
    let issues = doctor::find_issues(&repo.load());
    let codes: Vec<&str> = issues.iter().map(|r| r[0].as_str()).collect();
    assert!(codes.contains(&"source_without_name"));
    assert!(codes.contains(&"source_without_color"));
    assert!(codes.contains(&"dangling_source"));
    assert!(codes.contains(&"duplicate_txn_id"));
    doctor::handle(&repo).unwrap();

    let clean = Repository::new(MemoryStore::new());
    assert!(doctor::find_issues(&clean.load()).is_empty());
}

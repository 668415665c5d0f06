// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use money_manager::{cli, commands, db, storage::Repository};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let path = db::db_path(matches.get_one::<PathBuf>("db").map(PathBuf::as_path))?;
    let store = db::SqliteStore::open(&path)?;
    tracing::debug!(path = %path.display(), "opened ledger database");
    let mut repo = Repository::new(store);

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", path.display());
        }
        Some(("source", sub)) => commands::sources::handle(&mut repo, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&mut repo, sub)?,
        Some(("report", sub)) => commands::reports::handle(&repo, sub)?,
        Some(("dashboard", sub)) => commands::dashboard::handle(&repo, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&repo)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}

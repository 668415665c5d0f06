// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};
use std::path::PathBuf;

use crate::db::DB_ENV;

fn json_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON object per line"),
    )
}

pub fn build_cli() -> Command {
    Command::new("money-manager")
        .version(clap::crate_version!())
        .about("Track balances across cash, bank and wallet sources")
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .env(DB_ENV)
                .value_parser(value_parser!(PathBuf))
                .help("Path to the SQLite database file"),
        )
        .subcommand(Command::new("init").about("Create the database if missing"))
        .subcommand(
            Command::new("source")
                .about("Manage money sources")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(
                            Arg::new("balance")
                                .long("balance")
                                .default_value("0")
                                .allow_negative_numbers(true)
                                .help("Opening balance; unparseable values count as 0"),
                        )
                        .arg(Arg::new("icon").long("icon")),
                )
                .subcommand(json_args(Command::new("list")))
                .subcommand(
                    Command::new("edit")
                        .arg(Arg::new("id").long("id").required(true))
                        .arg(Arg::new("name").long("name"))
                        .arg(
                            Arg::new("balance")
                                .long("balance")
                                .allow_negative_numbers(true),
                        )
                        .arg(Arg::new("color").long("color"))
                        .arg(Arg::new("icon").long("icon")),
                )
                .subcommand(Command::new("rm").arg(Arg::new("id").long("id").required(true))),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and list transactions")
                .subcommand(
                    Command::new("add")
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .default_value("expense")
                                .value_parser(["income", "expense"]),
                        )
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .required(true)
                                .allow_negative_numbers(true),
                        )
                        .arg(Arg::new("source").long("source").required(true))
                        .arg(Arg::new("description").long("description"))
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .help("Effective date YYYY-MM-DD (default: now)"),
                        ),
                )
                .subcommand(json_args(
                    Command::new("list")
                        .arg(Arg::new("source").long("source"))
                        .arg(
                            Arg::new("month")
                                .long("month")
                                .help("Month label, e.g. \"January 2025\""),
                        )
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                )),
        )
        .subcommand(
            Command::new("report")
                .about("Balances and income/expense analytics")
                .subcommand(json_args(Command::new("total")))
                .subcommand(json_args(Command::new("distribution")))
                .subcommand(json_args(
                    Command::new("source").arg(Arg::new("id").long("id").required(true)),
                ))
                .subcommand(json_args(Command::new("monthly")))
                .subcommand(json_args(Command::new("compare"))),
        )
        .subcommand(
            Command::new("dashboard")
                .about("Total balance, sources and recent transactions")
                .arg(
                    Arg::new("recent")
                        .long("recent")
                        .default_value("5")
                        .value_parser(value_parser!(usize)),
                ),
        )
        .subcommand(Command::new("doctor").about("Check stored data for inconsistencies"))
}

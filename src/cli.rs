// Copyright (c) 2025 Spendlog Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

pub fn build_cli() -> Command {
    Command::new("spendlog")
        .about("Expense ledger with remote sync and local fallback")
        .version(clap::crate_version!())
        .subcommand(
            Command::new("expense")
                .about("Record and manage expenses")
                .subcommand(
                    Command::new("add")
                        .about("Record a new expense")
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("description").long("description").required(true))
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .default_value("Food"),
                        ),
                )
                .subcommand(
                    Command::new("list")
                        .about("List expenses, newest first")
                        .arg(Arg::new("category").long("category"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        )
                        .arg(Arg::new("json").long("json").action(ArgAction::SetTrue))
                        .arg(Arg::new("jsonl").long("jsonl").action(ArgAction::SetTrue)),
                )
                .subcommand(
                    Command::new("update")
                        .about("Edit an expense (requires a signed-in account)")
                        .arg(Arg::new("id").long("id").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("description").long("description").required(true))
                        .arg(Arg::new("category").long("category").required(true)),
                )
                .subcommand(
                    Command::new("delete")
                        .about("Delete an expense by id")
                        .arg(Arg::new("id").required(true)),
                )
                .subcommand(
                    Command::new("total")
                        .about("Show the running total")
                        .arg(
                            Arg::new("by-category")
                                .long("by-category")
                                .action(ArgAction::SetTrue),
                        )
                        .arg(Arg::new("json").long("json").action(ArgAction::SetTrue)),
                ),
        )
        .subcommand(
            Command::new("export").about("Export the ledger").subcommand(
                Command::new("ledger")
                    .about("Write all expenses to a file")
                    .arg(Arg::new("format").long("format").required(true))
                    .arg(Arg::new("out").long("out").required(true)),
            ),
        )
        .subcommand(
            Command::new("auth")
                .about("Manage the stored identity")
                .subcommand(
                    Command::new("login")
                        .about("Store an identity obtained from the authentication flow")
                        .arg(Arg::new("user-id").long("user-id").required(true))
                        .arg(Arg::new("token").long("token").required(true))
                        .arg(Arg::new("database-url").long("database-url").required(true)),
                )
                .subcommand(Command::new("logout").about("Forget the stored identity"))
                .subcommand(Command::new("status").about("Show the stored identity")),
        )
}

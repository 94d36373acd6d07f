// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version, value_parser};

fn json_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn index_arg() -> Arg {
    Arg::new("index")
        .long("index")
        .required(true)
        .value_parser(value_parser!(usize))
        .help("Position shown in the list output")
}

fn amount_arg(id: &'static str) -> Arg {
    Arg::new(id).long(id).allow_negative_numbers(true)
}

fn expense_bucket_args(cmd: Command) -> Command {
    cmd.arg(amount_arg("fuel"))
        .arg(amount_arg("food"))
        .arg(amount_arg("car-wash"))
        .arg(amount_arg("other"))
}

pub fn build_cli() -> Command {
    Command::new("daybook")
        .about("Debts, daily income and expenses, and monthly reports")
        .version(crate_version!())
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .help("Path to the SQLite store (defaults to the platform data dir)"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("More log output on stderr (-v info, -vv debug)"),
        )
        .subcommand(Command::new("init").about("Create the store if missing"))
        .subcommand(
            Command::new("debt")
                .about("Loans and credits")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(amount_arg("amount").required(true))
                        .arg(Arg::new("start").long("start").required(true).help("YYYY-MM-DD"))
                        .arg(
                            Arg::new("term")
                                .long("term")
                                .value_parser(value_parser!(u32))
                                .help("Loan term, in --unit"),
                        )
                        .arg(
                            Arg::new("unit")
                                .long("unit")
                                .value_parser(["years", "months"])
                                .default_value("years"),
                        )
                        .arg(Arg::new("due").long("due").help("Explicit due date, YYYY-MM-DD"))
                        .arg(Arg::new("payment").long("payment").help("Monthly payment"))
                        .arg(
                            Arg::new("kind")
                                .long("kind")
                                .value_parser(["credit", "other"])
                                .default_value("credit"),
                        ),
                )
                .subcommand(json_args(Command::new("list")))
                .subcommand(
                    Command::new("edit")
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(Arg::new("name").long("name"))
                        .arg(
                            Arg::new("kind")
                                .long("kind")
                                .value_parser(["credit", "other"]),
                        )
                        .arg(amount_arg("amount"))
                        .arg(amount_arg("payment"))
                        .arg(Arg::new("due").long("due"))
                        .arg(amount_arg("remaining")),
                )
                .subcommand(
                    Command::new("rm").arg(
                        Arg::new("id")
                            .long("id")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                ),
        )
        .subcommand(
            Command::new("income")
                .about("Daily income entries")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("date").long("date").required(true))
                        .arg(amount_arg("amount").required(true))
                        .arg(
                            Arg::new("day-off")
                                .long("day-off")
                                .action(ArgAction::SetTrue)
                                .help("Mark the day as a non-working day"),
                        ),
                )
                .subcommand(json_args(
                    Command::new("list").arg(Arg::new("month").long("month").help("YYYY-MM")),
                ))
                .subcommand(
                    Command::new("edit")
                        .arg(index_arg())
                        .arg(Arg::new("date").long("date"))
                        .arg(amount_arg("amount"))
                        .arg(
                            Arg::new("working")
                                .long("working")
                                .value_parser(value_parser!(bool)),
                        ),
                )
                .subcommand(Command::new("rm").arg(index_arg())),
        )
        .subcommand(
            Command::new("expense")
                .about("Daily expense records")
                .subcommand(expense_bucket_args(
                    Command::new("add").arg(Arg::new("date").long("date").required(true)),
                ))
                .subcommand(json_args(
                    Command::new("list").arg(Arg::new("month").long("month").help("YYYY-MM")),
                ))
                .subcommand(expense_bucket_args(
                    Command::new("edit")
                        .arg(index_arg())
                        .arg(Arg::new("date").long("date")),
                ))
                .subcommand(Command::new("rm").arg(index_arg())),
        )
        .subcommand(
            Command::new("baseline")
                .about("Expected daily spend per bucket")
                .subcommand(json_args(Command::new("show")))
                .subcommand(expense_bucket_args(Command::new("set"))),
        )
        .subcommand(json_args(
            Command::new("stats").about("Totals, required daily income and debt overpayments"),
        ))
        .subcommand(
            Command::new("report")
                .about("Monthly and period reports")
                .subcommand(json_args(
                    Command::new("monthly").arg(Arg::new("month").long("month").help("YYYY-MM")),
                ))
                .subcommand(json_args(
                    Command::new("period")
                        .arg(Arg::new("from").long("from").required(true))
                        .arg(Arg::new("to").long("to").required(true)),
                )),
        )
        .subcommand(
            Command::new("config")
                .about("Settings")
                .subcommand(json_args(Command::new("show")))
                .subcommand(
                    Command::new("set")
                        .arg(
                            Arg::new("working-days")
                                .long("working-days")
                                .value_parser(value_parser!(u32)),
                        )
                        .arg(Arg::new("income-target").long("income-target"))
                        .arg(Arg::new("currency").long("currency")),
                ),
        )
}

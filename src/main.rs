// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::path::PathBuf;

use daybook::{cli, commands, db, utils};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    utils::init_tracing(matches.get_count("verbose"));

    let db_arg = matches.get_one::<String>("db").map(PathBuf::from);
    let mut store = db::open_or_init(db_arg.as_deref())?;

    match matches.subcommand() {
        Some(("init", _)) => {
            let path = match db_arg {
                Some(p) => p,
                None => db::db_path()?,
            };
            println!("Store initialized at {}", path.display());
            let keys = store.keys()?;
            if keys.is_empty() {
                println!("No data stored yet");
            } else {
                println!("Stored keys: {}", keys.join(", "));
            }
        }
        Some(("debt", sub)) => commands::debts::handle(&mut store, sub)?,
        Some(("income", sub)) => commands::income::handle(&mut store, sub)?,
        Some(("expense", sub)) => commands::expenses::handle(&mut store, sub)?,
        Some(("baseline", sub)) => commands::baseline::handle(&mut store, sub)?,
        Some(("stats", sub)) => commands::stats::handle(&mut store, sub)?,
        Some(("report", sub)) => commands::reports::handle(&mut store, sub)?,
        Some(("config", sub)) => commands::settings::handle(&mut store, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}

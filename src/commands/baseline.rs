// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::config::Settings;
use crate::ledger::Ledger;
use crate::models::DailyExpenses;
use crate::store::KvStore;
use crate::utils::{fmt_money, maybe_print_json, opt_decimal, pretty_table};

pub fn handle(store: &mut dyn KvStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => show(store, sub)?,
        Some(("set", sub)) => set(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn show(store: &mut dyn KvStore, sub: &clap::ArgMatches) -> Result<()> {
    let ledger = Ledger::load(store)?;
    let b = ledger.baseline();
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), b)? {
        return Ok(());
    }
    let ccy = Settings::load(store)?.currency;
    let rows = vec![
        vec!["Fuel".to_string(), fmt_money(&b.fuel, &ccy)],
        vec!["Food".to_string(), fmt_money(&b.food, &ccy)],
        vec!["Car wash".to_string(), fmt_money(&b.car_wash, &ccy)],
        vec!["Other".to_string(), fmt_money(&b.other_expenses, &ccy)],
        vec!["Total per day".to_string(), fmt_money(&b.total(), &ccy)],
    ];
    println!("{}", pretty_table(&["Bucket", "Daily"], rows));
    Ok(())
}

fn set(store: &mut dyn KvStore, sub: &clap::ArgMatches) -> Result<()> {
    let mut ledger = Ledger::load(store)?;
    let current = ledger.baseline().clone();
    let updated = DailyExpenses {
        fuel: opt_decimal(sub, "fuel")?.unwrap_or(current.fuel),
        food: opt_decimal(sub, "food")?.unwrap_or(current.food),
        car_wash: opt_decimal(sub, "car-wash")?.unwrap_or(current.car_wash),
        other_expenses: opt_decimal(sub, "other")?.unwrap_or(current.other_expenses),
    };
    if ledger.set_baseline(updated) {
        ledger.save(store)?;
        println!("Baseline set to {} per day", ledger.baseline().total());
    } else {
        println!("No change: baseline buckets cannot be negative");
    }
    Ok(())
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rust_decimal::Decimal;

use crate::config::Settings;
use crate::ledger::Ledger;
use crate::models::{DailyExpenseRecord, MAX_AMOUNT};
use crate::store::KvStore;
use crate::utils::{
    fmt_money, maybe_print_json, opt_date, opt_decimal, parse_date, parse_month, pretty_table,
};

pub fn handle(store: &mut dyn KvStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("edit", sub)) => edit(store, sub)?,
        Some(("rm", sub)) => remove(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(store: &mut dyn KvStore, sub: &clap::ArgMatches) -> Result<()> {
    let record = DailyExpenseRecord {
        date: parse_date(sub.get_one::<String>("date").unwrap())?,
        fuel: opt_decimal(sub, "fuel")?.unwrap_or(Decimal::ZERO),
        food: opt_decimal(sub, "food")?.unwrap_or(Decimal::ZERO),
        car_wash: opt_decimal(sub, "car-wash")?.unwrap_or(Decimal::ZERO),
        other_expenses: opt_decimal(sub, "other")?.unwrap_or(Decimal::ZERO),
    };
    let (date, total) = (record.date, record.total());
    let mut ledger = Ledger::load(store)?;
    if !ledger.add_expenses(record) {
        println!("Skipped: give at least one positive bucket, none negative or above {}", MAX_AMOUNT);
        return Ok(());
    }
    ledger.save(store)?;
    println!("Recorded expenses {} on {}", total, date);
    Ok(())
}

#[derive(serde::Serialize)]
pub struct ExpenseRow {
    pub index: usize,
    #[serde(flatten)]
    pub record: DailyExpenseRecord,
}

pub fn query_rows(ledger: &Ledger, month: Option<&str>) -> Vec<ExpenseRow> {
    ledger
        .expense_records()
        .iter()
        .enumerate()
        .filter(|(_, r)| month.is_none_or(|m| r.date.format("%Y-%m").to_string() == m))
        .map(|(index, r)| ExpenseRow {
            index,
            record: r.clone(),
        })
        .collect()
}

fn list(store: &mut dyn KvStore, sub: &clap::ArgMatches) -> Result<()> {
    let month = sub.get_one::<String>("month").map(|s| parse_month(s)).transpose()?;
    let ledger = Ledger::load(store)?;
    let data = query_rows(&ledger, month.as_deref());
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    let ccy = Settings::load(store)?.currency;
    let rows = data
        .iter()
        .map(|r| {
            let rec = &r.record;
            vec![
                r.index.to_string(),
                rec.date.to_string(),
                fmt_money(&rec.fuel, &ccy),
                fmt_money(&rec.food, &ccy),
                fmt_money(&rec.car_wash, &ccy),
                fmt_money(&rec.other_expenses, &ccy),
                fmt_money(&rec.total(), &ccy),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["#", "Date", "Fuel", "Food", "Car wash", "Other", "Total"],
            rows
        )
    );
    Ok(())
}

fn edit(store: &mut dyn KvStore, sub: &clap::ArgMatches) -> Result<()> {
    let index = *sub.get_one::<usize>("index").unwrap();
    let mut ledger = Ledger::load(store)?;
    let Some(current) = ledger.expense_records().get(index).cloned() else {
        println!("No expense record at {}", index);
        return Ok(());
    };
    let updated = DailyExpenseRecord {
        date: opt_date(sub, "date")?.unwrap_or(current.date),
        fuel: opt_decimal(sub, "fuel")?.unwrap_or(current.fuel),
        food: opt_decimal(sub, "food")?.unwrap_or(current.food),
        car_wash: opt_decimal(sub, "car-wash")?.unwrap_or(current.car_wash),
        other_expenses: opt_decimal(sub, "other")?.unwrap_or(current.other_expenses),
    };
    if ledger.edit_expense(index, updated) {
        ledger.save(store)?;
        println!("Updated expense record {}", index);
    } else {
        println!("No change: a record needs one positive bucket and no negative ones");
    }
    Ok(())
}

fn remove(store: &mut dyn KvStore, sub: &clap::ArgMatches) -> Result<()> {
    let index = *sub.get_one::<usize>("index").unwrap();
    let mut ledger = Ledger::load(store)?;
    match ledger.delete_expense(index) {
        Some(removed) => {
            ledger.save(store)?;
            println!("Removed expenses {} on {}", removed.total(), removed.date);
        }
        None => println!("No expense record at {}", index),
    }
    Ok(())
}

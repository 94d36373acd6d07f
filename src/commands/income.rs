// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::config::Settings;
use crate::ledger::Ledger;
use crate::models::{DailyIncome, MAX_AMOUNT};
use crate::store::KvStore;
use crate::utils::{
    fmt_money, maybe_print_json, opt_date, opt_decimal, parse_date, parse_decimal, parse_month,
    pretty_table,
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
    let income = DailyIncome {
        date: parse_date(sub.get_one::<String>("date").unwrap())?,
        amount: parse_decimal(sub.get_one::<String>("amount").unwrap())?,
        is_working_day: !sub.get_flag("day-off"),
    };
    let mut ledger = Ledger::load(store)?;
    let (date, amount) = (income.date, income.amount);
    let Some(allocation) = ledger.add_income(income) else {
        println!("Skipped: income must be positive and at most {}", MAX_AMOUNT);
        return Ok(());
    };
    ledger.save(store)?;
    println!("Recorded income {} on {}", amount, date);
    for p in &allocation.payments {
        let name = ledger.debt(p.debt_id).map(|d| d.name.as_str()).unwrap_or("?");
        println!("  paid {} towards '{}'", p.amount, name);
    }
    if !allocation.unallocated.is_zero() && !allocation.payments.is_empty() {
        println!("  {} left after all debts", allocation.unallocated);
    }
    Ok(())
}

#[derive(serde::Serialize)]
pub struct IncomeRow {
    pub index: usize,
    #[serde(flatten)]
    pub income: DailyIncome,
}

/// Entries with their positional index, optionally limited to one `YYYY-MM` month.
pub fn query_rows(ledger: &Ledger, month: Option<&str>) -> Vec<IncomeRow> {
    ledger
        .incomes()
        .iter()
        .enumerate()
        .filter(|(_, i)| month.is_none_or(|m| i.date.format("%Y-%m").to_string() == m))
        .map(|(index, i)| IncomeRow {
            index,
            income: i.clone(),
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
            vec![
                r.index.to_string(),
                r.income.date.to_string(),
                fmt_money(&r.income.amount, &ccy),
                if r.income.is_working_day { "yes" } else { "no" }.to_string(),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["#", "Date", "Amount", "Working day"], rows));
    Ok(())
}

fn edit(store: &mut dyn KvStore, sub: &clap::ArgMatches) -> Result<()> {
    let index = *sub.get_one::<usize>("index").unwrap();
    let mut ledger = Ledger::load(store)?;
    let Some(current) = ledger.incomes().get(index).cloned() else {
        println!("No income entry at {}", index);
        return Ok(());
    };
    let updated = DailyIncome {
        date: opt_date(sub, "date")?.unwrap_or(current.date),
        amount: opt_decimal(sub, "amount")?.unwrap_or(current.amount),
        is_working_day: sub
            .get_one::<bool>("working")
            .copied()
            .unwrap_or(current.is_working_day),
    };
    if ledger.edit_income(index, updated) {
        ledger.save(store)?;
        println!("Updated income entry {}", index);
    } else {
        println!("No change: income must be positive");
    }
    Ok(())
}

fn remove(store: &mut dyn KvStore, sub: &clap::ArgMatches) -> Result<()> {
    let index = *sub.get_one::<usize>("index").unwrap();
    let mut ledger = Ledger::load(store)?;
    match ledger.delete_income(index) {
        Some(removed) => {
            ledger.save(store)?;
            println!("Removed income {} on {}", removed.amount, removed.date);
        }
        None => println!("No income entry at {}", index),
    }
    Ok(())
}

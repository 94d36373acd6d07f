// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::config::Settings;
use crate::ledger::{DebtUpdate, Ledger};
use crate::models::{DebtDraft, DebtKind, MAX_AMOUNT, TermUnit};
use crate::stats;
use crate::store::KvStore;
use crate::utils::{
    fmt_money, maybe_print_json, opt_date, opt_decimal, parse_date, parse_decimal, pretty_table,
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

pub fn draft_from_args(sub: &clap::ArgMatches) -> Result<DebtDraft> {
    let kind = sub
        .get_one::<String>("kind")
        .map(|s| s.parse::<DebtKind>())
        .transpose()
        .map_err(anyhow::Error::msg)?
        .unwrap_or_default();
    let term_type = sub
        .get_one::<String>("unit")
        .map(|s| s.parse::<TermUnit>())
        .transpose()
        .map_err(anyhow::Error::msg)?
        .unwrap_or_default();
    Ok(DebtDraft {
        name: sub.get_one::<String>("name").cloned().unwrap_or_default(),
        kind,
        amount: sub.get_one::<String>("amount").map(|s| parse_decimal(s)).transpose()?,
        monthly_payment: opt_decimal(sub, "payment")?,
        loan_term: sub.get_one::<u32>("term").copied(),
        term_type,
        start_date: sub.get_one::<String>("start").map(|s| parse_date(s)).transpose()?,
        due_date: opt_date(sub, "due")?,
    })
}

fn add(store: &mut dyn KvStore, sub: &clap::ArgMatches) -> Result<()> {
    let draft = draft_from_args(sub)?;
    let mut ledger = Ledger::load(store)?;
    let Some(id) = ledger.add_debt(&draft) else {
        println!(
            "Skipped: a debt needs a name, an amount up to {}, a start date and a term (due date after start)",
            MAX_AMOUNT
        );
        return Ok(());
    };
    ledger.save(store)?;
    if let Some(debt) = ledger.debt(id) {
        println!(
            "Added debt '{}' (id {}): {} per month until {}",
            debt.name, debt.id, debt.monthly_payment, debt.due_date
        );
    }
    Ok(())
}

fn list(store: &mut dyn KvStore, sub: &clap::ArgMatches) -> Result<()> {
    let ledger = Ledger::load(store)?;
    let settings = Settings::load(store)?;
    let overview = stats::overview(&ledger, &settings);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &overview.debts)? {
        return Ok(());
    }
    let ccy = &settings.currency;
    let rows = overview
        .debts
        .iter()
        .map(|o| {
            let d = &o.debt;
            vec![
                d.id.to_string(),
                d.name.clone(),
                d.kind.to_string(),
                fmt_money(&d.amount, ccy),
                fmt_money(&d.remaining_amount, ccy),
                fmt_money(&d.monthly_payment, ccy),
                d.start_date.to_string(),
                d.due_date.to_string(),
                format!("{} {}", d.loan_term, d.term_type),
                fmt_money(&o.overpayment, ccy),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &[
                "Id", "Name", "Type", "Amount", "Remaining", "Monthly", "Start", "Due", "Term",
                "Overpayment",
            ],
            rows,
        )
    );
    Ok(())
}

fn edit(store: &mut dyn KvStore, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let update = DebtUpdate {
        name: sub.get_one::<String>("name").cloned(),
        kind: sub
            .get_one::<String>("kind")
            .map(|s| s.parse::<DebtKind>())
            .transpose()
            .map_err(anyhow::Error::msg)?,
        amount: opt_decimal(sub, "amount")?,
        monthly_payment: opt_decimal(sub, "payment")?,
        due_date: opt_date(sub, "due")?,
        remaining_amount: opt_decimal(sub, "remaining")?,
    };
    let mut ledger = Ledger::load(store)?;
    if ledger.edit_debt(id, &update) {
        ledger.save(store)?;
        println!("Updated debt {}", id);
    } else {
        println!("No change: debt {} not found or edit rejected", id);
    }
    Ok(())
}

fn remove(store: &mut dyn KvStore, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let mut ledger = Ledger::load(store)?;
    match ledger.delete_debt(id) {
        Some(debt) => {
            ledger.save(store)?;
            println!("Removed debt '{}' ({})", debt.name, id);
        }
        None => println!("No debt with id {}", id),
    }
    Ok(())
}

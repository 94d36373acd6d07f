// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Settings;
use crate::ledger::Ledger;
use crate::stats;
use crate::store::KvStore;
use crate::utils::{fmt_money, maybe_print_json, parse_date, parse_month, pretty_table};
use anyhow::Result;

pub fn handle(store: &mut dyn KvStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("monthly", sub)) => monthly(store, sub)?,
        Some(("period", sub)) => period(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn monthly(store: &mut dyn KvStore, sub: &clap::ArgMatches) -> Result<()> {
    let month = sub.get_one::<String>("month").map(|s| parse_month(s)).transpose()?;
    let ledger = Ledger::load(store)?;
    let mut reports = stats::monthly_reports(&ledger);
    if let Some(month) = month {
        reports.retain(|r| r.month == month);
    }
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &reports)? {
        return Ok(());
    }
    let ccy = Settings::load(store)?.currency;
    let data = reports
        .iter()
        .map(|r| {
            vec![
                r.label.clone(),
                fmt_money(&r.total_income, &ccy),
                fmt_money(&r.total_expenses, &ccy),
                r.working_days.to_string(),
                r.non_working_days.to_string(),
                fmt_money(&r.average_daily_income, &ccy),
                fmt_money(&r.remaining_amount, &ccy),
                fmt_money(&r.expected_remaining_amount, &ccy),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &[
                "Month",
                "Income",
                "Expenses",
                "Working",
                "Days off",
                "Avg/day",
                "Remaining",
                "Expected",
            ],
            data
        )
    );
    Ok(())
}

fn period(store: &mut dyn KvStore, sub: &clap::ArgMatches) -> Result<()> {
    let from = parse_date(sub.get_one::<String>("from").unwrap())?;
    let to = parse_date(sub.get_one::<String>("to").unwrap())?;
    let ledger = Ledger::load(store)?;
    let settings = Settings::load(store)?;
    let report = stats::period_report(&ledger, &settings, from, to);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &report)? {
        return Ok(());
    }
    let ccy = &settings.currency;
    let rows = vec![
        vec!["Income".into(), fmt_money(&report.total_income, ccy)],
        vec!["Expenses".into(), fmt_money(&report.total_expenses, ccy)],
        vec!["Remaining".into(), fmt_money(&report.remaining_amount, ccy)],
        vec!["Working days".into(), report.working_days.to_string()],
        vec!["Average per working day".into(), fmt_money(&report.average_daily_income, ccy)],
        vec![
            format!("Progress to {}", fmt_money(&settings.period_income_target, ccy)),
            format!("{:.1}%", report.progress),
        ],
    ];
    println!("Period {} .. {}", report.start, report.end);
    println!("{}", pretty_table(&["", "Value"], rows));
    Ok(())
}

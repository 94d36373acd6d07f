// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::config::Settings;
use crate::ledger::Ledger;
use crate::stats::overview;
use crate::store::KvStore;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};

pub fn handle(store: &mut dyn KvStore, m: &clap::ArgMatches) -> Result<()> {
    let ledger = Ledger::load(store)?;
    let settings = Settings::load(store)?;
    let o = overview(&ledger, &settings);
    if maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &o)? {
        return Ok(());
    }
    let ccy = &settings.currency;
    let rows = vec![
        vec!["Total debt".into(), fmt_money(&o.total_debt, ccy)],
        vec!["Monthly payments".into(), fmt_money(&o.total_monthly_payments, ccy)],
        vec!["Total income".into(), fmt_money(&o.total_income, ccy)],
        vec!["Total expenses".into(), fmt_money(&o.total_expenses, ccy)],
        vec!["Baseline daily spend".into(), fmt_money(&o.baseline.total(), ccy)],
        vec!["Working days per month".into(), o.working_days_in_month.to_string()],
        vec!["Required daily income".into(), fmt_money(&o.required_daily_income, ccy)],
    ];
    println!("{}", pretty_table(&["Statistic", "Value"], rows));
    Ok(())
}

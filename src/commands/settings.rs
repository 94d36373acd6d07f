// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};

use crate::config::Settings;
use crate::store::KvStore;
use crate::utils::{maybe_print_json, opt_decimal, pretty_table};

pub fn handle(store: &mut dyn KvStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => {
            let s = Settings::load(store)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
                let rows = vec![
                    vec!["working-days".into(), s.working_days_in_month.to_string()],
                    vec!["income-target".into(), s.period_income_target.to_string()],
                    vec!["currency".into(), s.currency.clone()],
                ];
                println!("{}", pretty_table(&["Setting", "Value"], rows));
            }
        }
        Some(("set", sub)) => {
            let mut s = Settings::load(store)?;
            if let Some(days) = sub.get_one::<u32>("working-days") {
                s.working_days_in_month = *days;
            }
            if let Some(target) = opt_decimal(sub, "income-target")? {
                s.period_income_target = target;
            }
            if let Some(ccy) = sub.get_one::<String>("currency") {
                s.currency = ccy.trim().to_uppercase();
            }
            s.save(store).context("Settings not saved")?;
            println!(
                "Settings: {} working days, target {} {}",
                s.working_days_in_month, s.period_income_target, s.currency
            );
        }
        _ => {}
    }
    Ok(())
}

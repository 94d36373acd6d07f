// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Read-side projections over a ledger snapshot. Everything here is pure and
//! recomputed on demand.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeSet;

use crate::config::Settings;
use crate::ledger::Ledger;
use crate::models::{
    DailyExpenseRecord, DailyExpenses, DailyIncome, Debt, MonthlyReport, PeriodReport,
    saturating_sum,
};
use crate::schedule::calculate_overpayment;

// Totals clamp at the `Decimal` bounds; stored data is not range-checked on load.

pub fn total_income(incomes: &[DailyIncome]) -> Decimal {
    saturating_sum(incomes.iter().map(|i| i.amount))
}

pub fn total_debt(debts: &[Debt]) -> Decimal {
    saturating_sum(debts.iter().map(|d| d.remaining_amount))
}

pub fn total_monthly_payments(debts: &[Debt]) -> Decimal {
    saturating_sum(debts.iter().map(|d| d.monthly_payment))
}

pub fn total_expenses(records: &[DailyExpenseRecord]) -> Decimal {
    saturating_sum(records.iter().map(DailyExpenseRecord::total))
}

/// Monthly payments spread over a fixed number of working days, plus the
/// baseline daily spend.
pub fn required_daily_income(
    debts: &[Debt],
    baseline: &DailyExpenses,
    working_days_in_month: u32,
) -> Decimal {
    let days = Decimal::from(working_days_in_month.max(1));
    (total_monthly_payments(debts) / days).saturating_add(baseline.total())
}

fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

fn average_daily(total: Decimal, working_days: usize) -> Decimal {
    if working_days > 0 {
        total / Decimal::from(working_days)
    } else {
        Decimal::ZERO
    }
}

/// One report per month that has at least one income or expense entry,
/// most recent month first.
pub fn generate_monthly_reports(
    incomes: &[DailyIncome],
    records: &[DailyExpenseRecord],
) -> Vec<MonthlyReport> {
    let months: BTreeSet<String> = incomes
        .iter()
        .map(|i| month_key(i.date))
        .chain(records.iter().map(|r| month_key(r.date)))
        .collect();

    months
        .into_iter()
        .rev()
        .map(|month| {
            let month_incomes: Vec<&DailyIncome> =
                incomes.iter().filter(|i| month_key(i.date) == month).collect();
            let total_expenses = saturating_sum(
                records
                    .iter()
                    .filter(|r| month_key(r.date) == month)
                    .map(DailyExpenseRecord::total),
            );

            let working_days = month_incomes.iter().filter(|i| i.is_working_day).count();
            let non_working_days = month_incomes.len() - working_days;
            let total_income = saturating_sum(month_incomes.iter().map(|i| i.amount));
            let average_daily_income = average_daily(total_income, working_days);

            MonthlyReport {
                label: month_label(&month),
                total_income,
                total_expenses,
                working_days,
                non_working_days,
                average_daily_income,
                remaining_amount: total_income.saturating_sub(total_expenses),
                // Kept as its own formula; it only matches `remaining_amount`
                // while there is at least one working day.
                expected_remaining_amount: average_daily_income
                    .saturating_mul(Decimal::from(working_days))
                    .saturating_sub(total_expenses),
                month,
            }
        })
        .collect()
}

fn month_label(month: &str) -> String {
    NaiveDate::parse_from_str(&format!("{}-01", month), "%Y-%m-%d")
        .map(|d| d.format("%B %Y").to_string())
        .unwrap_or_else(|_| month.to_string())
}

/// Aggregates entries dated within `start..=end`. An inverted range yields
/// an all-zero report.
///
/// Period expense totals count fuel, food and car wash only; `other_expenses`
/// is left out here while monthly reports include it.
pub fn generate_period_report(
    incomes: &[DailyIncome],
    records: &[DailyExpenseRecord],
    start: NaiveDate,
    end: NaiveDate,
    income_target: Decimal,
) -> PeriodReport {
    let in_range = |d: NaiveDate| d >= start && d <= end;

    let period_incomes: Vec<&DailyIncome> = incomes.iter().filter(|i| in_range(i.date)).collect();
    let total_income = saturating_sum(period_incomes.iter().map(|i| i.amount));
    let total_expenses = saturating_sum(
        records
            .iter()
            .filter(|r| in_range(r.date))
            .flat_map(|r| [r.fuel, r.food, r.car_wash]),
    );

    let working_days = period_incomes.iter().filter(|i| i.is_working_day).count();
    let average_daily_income = average_daily(total_income, working_days);
    let progress = if income_target > Decimal::ZERO {
        // A ratio too large to represent is far past the cap anyway.
        average_daily_income
            .checked_div(income_target)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .map_or(Decimal::ONE_HUNDRED, |pct| pct.min(Decimal::ONE_HUNDRED))
    } else {
        Decimal::ZERO
    };

    PeriodReport {
        start,
        end,
        total_income,
        total_expenses,
        remaining_amount: total_income.saturating_sub(total_expenses),
        working_days,
        average_daily_income,
        progress,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtOverview {
    #[serde(flatten)]
    pub debt: Debt,
    pub overpayment: Decimal,
}

/// Everything the dashboard shows at once.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub total_debt: Decimal,
    pub total_monthly_payments: Decimal,
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub required_daily_income: Decimal,
    pub working_days_in_month: u32,
    pub baseline: DailyExpenses,
    pub debts: Vec<DebtOverview>,
}

pub fn overview(ledger: &Ledger, settings: &Settings) -> Overview {
    let debts = ledger.debts();
    Overview {
        total_debt: total_debt(debts),
        total_monthly_payments: total_monthly_payments(debts),
        total_income: total_income(ledger.incomes()),
        total_expenses: total_expenses(ledger.expense_records()),
        required_daily_income: required_daily_income(
            debts,
            ledger.baseline(),
            settings.working_days_in_month,
        ),
        working_days_in_month: settings.working_days_in_month,
        baseline: ledger.baseline().clone(),
        debts: debts
            .iter()
            .map(|d| DebtOverview {
                overpayment: calculate_overpayment(d),
                debt: d.clone(),
            })
            .collect(),
    }
}

pub fn monthly_reports(ledger: &Ledger) -> Vec<MonthlyReport> {
    generate_monthly_reports(ledger.incomes(), ledger.expense_records())
}

pub fn period_report(
    ledger: &Ledger,
    settings: &Settings,
    start: NaiveDate,
    end: NaiveDate,
) -> PeriodReport {
    generate_period_report(
        ledger.incomes(),
        ledger.expense_records(),
        start,
        end,
        settings.period_income_target,
    )
}

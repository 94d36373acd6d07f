// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use daybook::{
    config::Settings,
    ledger::{DEBTS_KEY, INCOMES_KEY, Ledger},
    models::{DailyExpenseRecord, DailyExpenses, DailyIncome, DebtDraft, TermUnit},
    stats,
    store::{KvStore, MemoryStore},
};
use rust_decimal::Decimal;

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn income(date: &str, amount: i64, working: bool) -> DailyIncome {
    DailyIncome {
        date: day(date),
        amount: Decimal::from(amount),
        is_working_day: working,
    }
}

fn expense(date: &str, fuel: i64, food: i64, car_wash: i64, other: i64) -> DailyExpenseRecord {
    DailyExpenseRecord {
        date: day(date),
        fuel: Decimal::from(fuel),
        food: Decimal::from(food),
        car_wash: Decimal::from(car_wash),
        other_expenses: Decimal::from(other),
    }
}

fn setup() -> Ledger {
    let mut ledger = Ledger::new();
    ledger.add_income(income("2024-01-05", 3000, true));
    ledger.add_income(income("2024-01-06", 2000, false));
    ledger.add_income(income("2024-02-01", 4000, true));
    ledger.add_income(income("2024-02-02", 6000, true));
    ledger.add_expenses(expense("2024-02-01", 500, 300, 100, 100));
    ledger.add_expenses(expense("2024-03-15", 0, 0, 0, 250));
    ledger
}

#[test]
fn january_scenario() {
    let mut ledger = Ledger::new();
    ledger.add_income(income("2024-01-05", 3000, true));
    ledger.add_income(income("2024-01-06", 2000, false));
    let reports = stats::monthly_reports(&ledger);
    assert_eq!(reports.len(), 1);
    let r = &reports[0];
    assert_eq!(r.month, "2024-01");
    assert_eq!(r.label, "January 2024");
    assert_eq!(r.total_income, Decimal::from(5000));
    assert_eq!(r.working_days, 1);
    assert_eq!(r.non_working_days, 1);
    assert_eq!(r.average_daily_income, Decimal::from(3000));
    assert_eq!(r.remaining_amount, Decimal::from(5000));
    assert_eq!(r.expected_remaining_amount, Decimal::from(5000));
}

#[test]
fn one_report_per_touched_month_newest_first() {
    let ledger = setup();
    let reports = stats::monthly_reports(&ledger);
    let months: Vec<&str> = reports.iter().map(|r| r.month.as_str()).collect();
    assert_eq!(months, ["2024-03", "2024-02", "2024-01"]);

    let feb = &reports[1];
    assert_eq!(feb.total_income, Decimal::from(10000));
    assert_eq!(feb.total_expenses, Decimal::from(1000));
    assert_eq!(feb.average_daily_income, Decimal::from(5000));
    assert_eq!(feb.remaining_amount, Decimal::from(9000));
    assert_eq!(feb.expected_remaining_amount, Decimal::from(9000));
}

#[test]
fn expense_only_month_has_negative_expected_remaining() {
    let ledger = setup();
    let march = &stats::monthly_reports(&ledger)[0];
    assert_eq!(march.working_days, 0);
    assert_eq!(march.non_working_days, 0);
    assert!(march.average_daily_income.is_zero());
    assert_eq!(march.remaining_amount, Decimal::from(-250));
    assert_eq!(march.expected_remaining_amount, Decimal::from(-250));
}

#[test]
fn month_with_only_days_off() {
    let mut ledger = Ledger::new();
    ledger.add_income(income("2024-05-04", 1500, false));
    let r = &stats::monthly_reports(&ledger)[0];
    assert!(r.average_daily_income.is_zero());
    assert_eq!(r.remaining_amount, Decimal::from(1500));
    assert!(r.expected_remaining_amount.is_zero());
}

#[test]
fn debts_do_not_create_months() {
    let mut ledger = Ledger::new();
    ledger.add_debt(&DebtDraft {
        name: "Loan".into(),
        amount: Some(Decimal::from(100)),
        start_date: Some(day("2023-06-01")),
        loan_term: Some(1),
        term_type: TermUnit::Years,
        ..DebtDraft::default()
    });
    assert!(stats::monthly_reports(&ledger).is_empty());
}

#[test]
fn reports_are_repeatable() {
    let ledger = setup();
    assert_eq!(stats::monthly_reports(&ledger), stats::monthly_reports(&ledger));
}

#[test]
fn period_is_inclusive_and_ignores_other_expenses() {
    let ledger = setup();
    let settings = Settings::default();
    let r = stats::period_report(&ledger, &settings, day("2024-01-06"), day("2024-02-01"));
    assert_eq!(r.total_income, Decimal::from(6000));
    // fuel + food + car wash only
    assert_eq!(r.total_expenses, Decimal::from(900));
    assert_eq!(r.remaining_amount, Decimal::from(5100));
    assert_eq!(r.working_days, 1);
    assert_eq!(r.average_daily_income, Decimal::from(6000));
    assert_eq!(r.progress, Decimal::from(100));
}

#[test]
fn period_progress_against_target() {
    let ledger = setup();
    let settings = Settings::default();
    let r = stats::period_report(&ledger, &settings, day("2024-01-01"), day("2024-01-31"));
    assert_eq!(r.average_daily_income, Decimal::from(5000));
    assert_eq!(r.progress, Decimal::from(100));

    let target = Settings {
        period_income_target: Decimal::from(10000),
        ..Settings::default()
    };
    let r = stats::period_report(&ledger, &target, day("2024-01-01"), day("2024-01-31"));
    assert_eq!(r.progress, Decimal::from(50));
}

#[test]
fn inverted_period_is_empty() {
    let ledger = setup();
    let r = stats::period_report(&ledger, &Settings::default(), day("2024-02-28"), day("2024-01-01"));
    assert!(r.total_income.is_zero());
    assert!(r.total_expenses.is_zero());
    assert_eq!(r.working_days, 0);
    assert!(r.progress.is_zero());
}

#[test]
fn overview_totals() {
    let mut ledger = setup();
    ledger.add_debt(&DebtDraft {
        name: "Car".into(),
        amount: Some(Decimal::from(120000)),
        start_date: Some(day("2024-01-01")),
        loan_term: Some(12),
        term_type: TermUnit::Months,
        ..DebtDraft::default()
    });
    let o = stats::overview(&ledger, &Settings::default());
    assert_eq!(o.total_income, Decimal::from(15000));
    assert_eq!(o.total_expenses, Decimal::from(1250));
    assert_eq!(o.total_debt, Decimal::from(120000));
    assert_eq!(o.total_monthly_payments, Decimal::from(10000));
    // 10000 / 25 + (2000 + 1000 + 100 + 0)
    assert_eq!(o.required_daily_income, Decimal::from(3500));
    assert_eq!(o.working_days_in_month, 25);
    assert_eq!(o.debts.len(), 1);
    assert!(o.debts[0].overpayment.is_zero());
}

#[test]
fn required_income_uses_configured_days() {
    let baseline = DailyExpenses {
        fuel: Decimal::from(100),
        food: Decimal::ZERO,
        car_wash: Decimal::ZERO,
        other_expenses: Decimal::from(50),
    };
    let v = stats::required_daily_income(&[], &baseline, 20);
    assert_eq!(v, Decimal::from(150));
}

#[test]
fn extreme_stored_amounts_do_not_crash_reports() {
    let max = Decimal::MAX.to_string();
    let mut store = MemoryStore::new();
    let debt = format!(
        r#"{{"id":1,"name":"Huge","amount":{max},"monthlyPayment":{max},
            "startDate":"2024-01-01","dueDate":"2024-11-01","loanTerm":10,"termType":"months"}}"#
    );
    store.set(DEBTS_KEY, &format!("[{debt},{debt}]")).unwrap();
    store
        .set(
            INCOMES_KEY,
            &format!(
                r#"[{{"date":"2024-01-05","amount":{max},"isWorkingDay":true}},
                   {{"date":"2024-01-06","amount":{max},"isWorkingDay":true}}]"#
            ),
        )
        .unwrap();
    let ledger = Ledger::load(&store).unwrap();
    assert_eq!(ledger.debts().len(), 2);

    let o = stats::overview(&ledger, &Settings::default());
    assert_eq!(o.total_debt, Decimal::MAX);
    assert_eq!(o.total_monthly_payments, Decimal::MAX);
    assert_eq!(o.total_income, Decimal::MAX);
    assert!(o.debts[0].overpayment.is_zero());

    let reports = stats::monthly_reports(&ledger);
    assert_eq!(reports[0].total_income, Decimal::MAX);
    let period = stats::period_report(&ledger, &Settings::default(), day("2024-01-01"), day("2024-01-31"));
    assert_eq!(period.progress, Decimal::ONE_HUNDRED);
}

#[test]
fn report_json_writes_money_as_numbers() {
    let mut ledger = setup();
    ledger.add_debt(&DebtDraft {
        name: "Car".into(),
        amount: Some(Decimal::from(120000)),
        start_date: Some(day("2024-01-01")),
        loan_term: Some(12),
        term_type: TermUnit::Months,
        ..DebtDraft::default()
    });
    let monthly = serde_json::to_value(stats::monthly_reports(&ledger)).unwrap();
    assert!(monthly[0]["totalIncome"].is_number());
    assert!(monthly[0]["expectedRemainingAmount"].is_number());
    assert_eq!(monthly[0]["month"], "2024-03");

    let period = serde_json::to_value(stats::period_report(
        &ledger,
        &Settings::default(),
        day("2024-01-01"),
        day("2024-01-31"),
    ))
    .unwrap();
    assert!(period["progress"].is_number());
    assert!(period["averageDailyIncome"].is_number());

    let overview = serde_json::to_value(stats::overview(&ledger, &Settings::default())).unwrap();
    assert!(overview["requiredDailyIncome"].is_number());
    assert!(overview["debts"][0]["overpayment"].is_number());
    assert!(overview["debts"][0]["amount"].is_number());
    assert!(overview["baseline"]["fuel"].is_number());
}

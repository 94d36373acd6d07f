// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Largest value any single money input may carry. Larger amounts are
/// rejected the same way a non-positive one is.
// 1_000_000_000_000_000 with scale 0 (`Decimal::new` is not const).
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

/// Sum that clamps at the `Decimal` bounds instead of panicking.
pub fn saturating_sum(values: impl IntoIterator<Item = Decimal>) -> Decimal {
    values
        .into_iter()
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

pub fn is_valid_amount(amount: Decimal) -> bool {
    amount > Decimal::ZERO && amount <= MAX_AMOUNT
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TermUnit {
    #[default]
    Years,
    Months,
}

impl fmt::Display for TermUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TermUnit::Years => f.write_str("years"),
            TermUnit::Months => f.write_str("months"),
        }
    }
}

impl FromStr for TermUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "years" | "year" | "y" => Ok(TermUnit::Years),
            "months" | "month" | "m" => Ok(TermUnit::Months),
            other => Err(format!("Unknown term unit '{}', expected years or months", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DebtKind {
    #[default]
    Credit,
    Other,
}

impl fmt::Display for DebtKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DebtKind::Credit => f.write_str("credit"),
            DebtKind::Other => f.write_str("other"),
        }
    }
}

impl FromStr for DebtKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "credit" => Ok(DebtKind::Credit),
            "other" => Ok(DebtKind::Other),
            other => Err(format!("Unknown debt type '{}', expected credit or other", other)),
        }
    }
}

/// A loan or credit with a fixed schedule. `remaining_amount` only goes down,
/// through income allocation or an explicit edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "DebtRecord")]
pub struct Debt {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: DebtKind,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub monthly_payment: Decimal,
    #[serde(with = "iso_date")]
    pub start_date: NaiveDate,
    #[serde(with = "iso_date")]
    pub due_date: NaiveDate,
    pub loan_term: u32,
    pub term_type: TermUnit,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub remaining_amount: Decimal,
}

// Persisted shape, tolerant of older entries without `type`, `termType`
// or `remainingAmount`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DebtRecord {
    id: i64,
    name: String,
    #[serde(rename = "type", default)]
    kind: DebtKind,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    amount: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    monthly_payment: Decimal,
    #[serde(with = "iso_date")]
    start_date: NaiveDate,
    #[serde(with = "iso_date")]
    due_date: NaiveDate,
    #[serde(default)]
    loan_term: u32,
    #[serde(default)]
    term_type: TermUnit,
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision_option")]
    remaining_amount: Option<Decimal>,
}

impl From<DebtRecord> for Debt {
    fn from(r: DebtRecord) -> Self {
        Debt {
            id: r.id,
            name: r.name,
            kind: r.kind,
            amount: r.amount,
            monthly_payment: r.monthly_payment,
            start_date: r.start_date,
            due_date: r.due_date,
            loan_term: r.loan_term,
            term_type: r.term_type,
            remaining_amount: r.remaining_amount.unwrap_or(r.amount),
        }
    }
}

/// Unvalidated input for a new debt, as collected by a form.
#[derive(Debug, Clone, Default)]
pub struct DebtDraft {
    pub name: String,
    pub kind: DebtKind,
    pub amount: Option<Decimal>,
    pub monthly_payment: Option<Decimal>,
    pub loan_term: Option<u32>,
    pub term_type: TermUnit,
    pub start_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyIncome {
    pub date: NaiveDate,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,
    pub is_working_day: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyExpenseRecord {
    pub date: NaiveDate,
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision")]
    pub fuel: Decimal,
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision")]
    pub food: Decimal,
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision")]
    pub car_wash: Decimal,
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision")]
    pub other_expenses: Decimal,
}

impl DailyExpenseRecord {
    pub fn total(&self) -> Decimal {
        saturating_sum(self.buckets())
    }

    fn buckets(&self) -> [Decimal; 4] {
        [self.fuel, self.food, self.car_wash, self.other_expenses]
    }

    /// At least one positive bucket, none negative and none above `MAX_AMOUNT`.
    pub fn is_acceptable(&self) -> bool {
        let buckets = self.buckets();
        buckets
            .iter()
            .all(|b| *b >= Decimal::ZERO && *b <= MAX_AMOUNT)
            && buckets.iter().any(|b| *b > Decimal::ZERO)
    }
}

/// Expected daily spend per bucket. Only feeds the required daily income figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyExpenses {
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision")]
    pub fuel: Decimal,
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision")]
    pub food: Decimal,
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision")]
    pub car_wash: Decimal,
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision")]
    pub other_expenses: Decimal,
}

impl Default for DailyExpenses {
    fn default() -> Self {
        DailyExpenses {
            fuel: Decimal::from(2000),
            food: Decimal::from(1000),
            car_wash: Decimal::from(100),
            other_expenses: Decimal::ZERO,
        }
    }
}

impl DailyExpenses {
    pub fn total(&self) -> Decimal {
        saturating_sum(self.buckets())
    }

    fn buckets(&self) -> [Decimal; 4] {
        [self.fuel, self.food, self.car_wash, self.other_expenses]
    }

    pub fn is_acceptable(&self) -> bool {
        self.buckets()
            .iter()
            .all(|b| *b >= Decimal::ZERO && *b <= MAX_AMOUNT)
    }
}

/// Derived per-month summary; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReport {
    pub month: String, // YYYY-MM
    pub label: String,
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub working_days: usize,
    pub non_working_days: usize,
    pub average_daily_income: Decimal,
    pub remaining_amount: Decimal,
    pub expected_remaining_amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodReport {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub remaining_amount: Decimal,
    pub working_days: usize,
    pub average_daily_income: Decimal,
    pub progress: Decimal, // percent, capped at 100
}

pub(crate) mod iso_date {
    use chrono::{DateTime, NaiveDate};
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S: Serializer>(date: &NaiveDate, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(d)?;
        parse(&raw).ok_or_else(|| {
            <D::Error as serde::de::Error>::custom(format!("invalid date '{}'", raw))
        })
    }

    /// Accepts a plain `YYYY-MM-DD` day or a full ISO-8601 timestamp.
    pub fn parse(raw: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(raw, FORMAT).ok().or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.date_naive())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debt_without_remaining_amount_defaults_to_principal() {
        let raw = r#"{"id":1,"name":"Car","amount":120000,"monthlyPayment":10000,
            "startDate":"2024-01-01T00:00:00.000Z","dueDate":"2025-01-01T00:00:00.000Z",
            "loanTerm":1,"termType":"years"}"#;
        let debt: Debt = serde_json::from_str(raw).unwrap();
        assert_eq!(debt.remaining_amount, Decimal::from(120000));
        assert_eq!(debt.kind, DebtKind::Credit);
        assert_eq!(debt.start_date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }

    #[test]
    fn paid_off_debt_keeps_zero_balance() {
        let raw = r#"{"id":1,"name":"Card","type":"other","amount":500,"monthlyPayment":50,
            "startDate":"2024-01-01","dueDate":"2024-11-01","loanTerm":10,"termType":"months",
            "remainingAmount":0}"#;
        let debt: Debt = serde_json::from_str(raw).unwrap();
        assert!(debt.remaining_amount.is_zero());
        assert_eq!(debt.kind, DebtKind::Other);
        assert_eq!(debt.term_type, TermUnit::Months);
    }

    #[test]
    fn expense_record_acceptance() {
        let mut rec = DailyExpenseRecord {
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            fuel: Decimal::ZERO,
            food: Decimal::ZERO,
            car_wash: Decimal::ZERO,
            other_expenses: Decimal::ZERO,
        };
        assert!(!rec.is_acceptable());
        rec.food = Decimal::from(10);
        assert!(rec.is_acceptable());
        rec.fuel = Decimal::from(-1);
        assert!(!rec.is_acceptable());
    }

    #[test]
    fn oversized_buckets_are_rejected_and_totals_clamp() {
        let rec = DailyExpenseRecord {
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            fuel: Decimal::MAX,
            food: Decimal::MAX,
            car_wash: Decimal::ZERO,
            other_expenses: Decimal::ZERO,
        };
        assert!(!rec.is_acceptable());
        assert_eq!(rec.total(), Decimal::MAX);

        let baseline = DailyExpenses {
            other_expenses: MAX_AMOUNT + Decimal::ONE,
            ..DailyExpenses::default()
        };
        assert!(!baseline.is_acceptable());
        assert!(is_valid_amount(MAX_AMOUNT));
        assert!(!is_valid_amount(Decimal::ZERO));
    }

    #[test]
    fn term_unit_parses_loosely() {
        assert_eq!("Months".parse::<TermUnit>().unwrap(), TermUnit::Months);
        assert_eq!("y".parse::<TermUnit>().unwrap(), TermUnit::Years);
        assert!("weeks".parse::<TermUnit>().is_err());
    }
}

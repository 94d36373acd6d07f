// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Debt schedule arithmetic and income allocation.

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Debt, DebtDraft, MAX_AMOUNT, TermUnit, is_valid_amount, saturating_sum};

/// Whole calendar months from `start` to `end`: the largest `n` with
/// `start + n months <= end`. Negative when `end` precedes `start`.
pub fn months_between(start: NaiveDate, end: NaiveDate) -> i32 {
    if end < start {
        return -months_between(end, start);
    }
    let mut months = (end.year() - start.year()) * 12 + end.month() as i32 - start.month() as i32;
    while months > 0 && add_months(start, months as u32).is_none_or(|anchor| anchor > end) {
        months -= 1;
    }
    months
}

fn add_months(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(months))
}

/// `start` plus `term` years or months. `None` only past the calendar range.
pub fn calculate_end_date(start: NaiveDate, term: u32, unit: TermUnit) -> Option<NaiveDate> {
    let months = match unit {
        TermUnit::Years => term.checked_mul(12)?,
        TermUnit::Months => term,
    };
    add_months(start, months)
}

/// Equal monthly share of `principal`, rounded up. A span under one month
/// means a single payment of the whole principal.
pub fn calculate_monthly_payment(principal: Decimal, start: NaiveDate, end: NaiveDate) -> Decimal {
    let months = months_between(start, end);
    if months <= 0 {
        return principal;
    }
    (principal / Decimal::from(months)).ceil()
}

/// Total scheduled payments minus principal. Negative when the payment
/// under-amortizes the debt. Clamps at the `Decimal` bounds.
pub fn calculate_overpayment(debt: &Debt) -> Decimal {
    let months = months_between(debt.start_date, debt.due_date);
    debt.monthly_payment
        .saturating_mul(Decimal::from(months))
        .saturating_sub(debt.amount)
}

/// Turns a draft into a debt with the given id, deriving the due date and
/// payment when they are missing. `None` when a required field is absent, an
/// amount exceeds `MAX_AMOUNT`, or the due date does not follow the start date.
pub fn build_debt(draft: &DebtDraft, id: i64) -> Option<Debt> {
    let name = draft.name.trim();
    if name.is_empty() {
        return None;
    }
    let amount = draft.amount.filter(|a| is_valid_amount(*a))?;
    let start_date = draft.start_date?;
    let loan_term = draft.loan_term.filter(|t| *t > 0)?;

    let due_date = match draft.due_date {
        Some(due) => due,
        None => calculate_end_date(start_date, loan_term, draft.term_type)?,
    };
    if due_date <= start_date {
        return None;
    }
    let monthly_payment = match draft.monthly_payment.filter(|p| *p > Decimal::ZERO) {
        Some(p) if p > MAX_AMOUNT => return None,
        Some(p) => p,
        None => calculate_monthly_payment(amount, start_date, due_date),
    };

    Some(Debt {
        id,
        name: name.to_string(),
        kind: draft.kind,
        amount,
        monthly_payment,
        start_date,
        due_date,
        loan_term,
        term_type: draft.term_type,
        remaining_amount: amount,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtPayment {
    pub debt_id: i64,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeAllocation {
    pub payments: Vec<DebtPayment>,
    pub unallocated: Decimal,
}

impl IncomeAllocation {
    pub fn applied(&self) -> Decimal {
        saturating_sum(self.payments.iter().map(|p| p.amount))
    }
}

/// Pays `income` into `debts` greedily in list order: each debt takes as much
/// as it still owes until the income runs out.
pub fn allocate_income(income: Decimal, debts: &mut [Debt]) -> IncomeAllocation {
    let mut pool = income.max(Decimal::ZERO);
    let mut payments = Vec::new();
    for debt in debts.iter_mut() {
        if pool <= Decimal::ZERO {
            break;
        }
        let payment = pool.min(debt.remaining_amount);
        if payment <= Decimal::ZERO {
            continue;
        }
        debt.remaining_amount -= payment;
        pool -= payment;
        payments.push(DebtPayment {
            debt_id: debt.id,
            amount: payment,
        });
    }
    IncomeAllocation {
        payments,
        unallocated: pool,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn months_between_counts_full_months() {
        assert_eq!(months_between(d(2024, 1, 1), d(2025, 1, 1)), 12);
        assert_eq!(months_between(d(2024, 1, 15), d(2024, 2, 14)), 0);
        assert_eq!(months_between(d(2024, 1, 15), d(2024, 2, 15)), 1);
        assert_eq!(months_between(d(2024, 1, 31), d(2024, 2, 29)), 1);
        assert_eq!(months_between(d(2024, 3, 1), d(2024, 1, 1)), -2);
        assert_eq!(months_between(d(2024, 3, 1), d(2024, 3, 1)), 0);
    }

    #[test]
    fn end_date_round_trips_through_months_between() {
        let starts = [d(2024, 1, 31), d(2023, 2, 28), d(2024, 2, 29), d(2020, 7, 15)];
        for start in starts {
            for n in [0u32, 1, 2, 11, 12, 13, 36, 121] {
                let end = calculate_end_date(start, n, TermUnit::Months).unwrap();
                assert_eq!(months_between(start, end), n as i32, "{start} + {n}");
            }
        }
        assert_eq!(
            calculate_end_date(d(2024, 2, 29), 1, TermUnit::Years),
            Some(d(2025, 2, 28))
        );
    }

    #[test]
    fn monthly_payment_rounds_up() {
        let p = calculate_monthly_payment(Decimal::from(1000), d(2024, 1, 1), d(2024, 4, 1));
        assert_eq!(p, Decimal::from(334));
        assert!(p * Decimal::from(3) >= Decimal::from(1000));
    }

    #[test]
    fn degenerate_span_is_single_payment() {
        let p = calculate_monthly_payment(Decimal::from(900), d(2024, 1, 10), d(2024, 1, 20));
        assert_eq!(p, Decimal::from(900));
        let p = calculate_monthly_payment(Decimal::from(900), d(2024, 5, 1), d(2024, 1, 1));
        assert_eq!(p, Decimal::from(900));
    }

    #[test]
    fn build_debt_requires_core_fields() {
        let draft = DebtDraft {
            name: "Loan".into(),
            amount: Some(Decimal::from(100)),
            start_date: Some(d(2024, 1, 1)),
            loan_term: None,
            ..DebtDraft::default()
        };
        assert!(build_debt(&draft, 1).is_none());

        let draft = DebtDraft {
            loan_term: Some(1),
            name: "   ".into(),
            ..draft
        };
        assert!(build_debt(&draft, 1).is_none());
    }

    #[test]
    fn explicit_due_date_must_follow_start() {
        let draft = DebtDraft {
            name: "Loan".into(),
            amount: Some(Decimal::from(100)),
            start_date: Some(d(2024, 1, 1)),
            due_date: Some(d(2024, 1, 1)),
            loan_term: Some(1),
            ..DebtDraft::default()
        };
        assert!(build_debt(&draft, 1).is_none());
    }

    #[test]
    fn oversized_amounts_are_rejected() {
        let draft = DebtDraft {
            name: "Loan".into(),
            amount: Some(Decimal::MAX),
            start_date: Some(d(2024, 1, 1)),
            loan_term: Some(10),
            term_type: TermUnit::Months,
            ..DebtDraft::default()
        };
        assert!(build_debt(&draft, 1).is_none());

        let draft = DebtDraft {
            amount: Some(Decimal::from(1000)),
            monthly_payment: Some(MAX_AMOUNT + Decimal::ONE),
            ..draft
        };
        assert!(build_debt(&draft, 1).is_none());

        let draft = DebtDraft {
            monthly_payment: Some(MAX_AMOUNT),
            ..draft
        };
        assert!(build_debt(&draft, 1).is_some());
    }

    #[test]
    fn overpayment_saturates_instead_of_overflowing() {
        let mut huge = debt(1, 0);
        huge.amount = Decimal::MAX;
        huge.monthly_payment = Decimal::MAX;
        assert_eq!(calculate_overpayment(&huge), Decimal::ZERO);

        huge.amount = Decimal::ONE;
        assert_eq!(calculate_overpayment(&huge), Decimal::MAX - Decimal::ONE);
    }

    #[test]
    fn allocation_skips_settled_debts() {
        let mut debts = vec![
            debt(1, 0),
            debt(2, 300),
            debt(3, 300),
        ];
        let alloc = allocate_income(Decimal::from(400), &mut debts);
        assert_eq!(alloc.payments.len(), 2);
        assert_eq!(alloc.payments[0].debt_id, 2);
        assert!(debts[0].remaining_amount.is_zero());
        assert!(debts[1].remaining_amount.is_zero());
        assert_eq!(debts[2].remaining_amount, Decimal::from(200));
        assert!(alloc.unallocated.is_zero());
    }

    #[test]
    fn allocation_leftover_when_debts_run_out() {
        let mut debts = vec![debt(1, 100)];
        let alloc = allocate_income(Decimal::from(250), &mut debts);
        assert_eq!(alloc.applied(), Decimal::from(100));
        assert_eq!(alloc.unallocated, Decimal::from(150));
    }

    fn debt(id: i64, remaining: i64) -> Debt {
        Debt {
            id,
            name: format!("debt {id}"),
            kind: Default::default(),
            amount: Decimal::from(1000),
            monthly_payment: Decimal::from(100),
            start_date: d(2024, 1, 1),
            due_date: d(2024, 11, 1),
            loan_term: 10,
            term_type: TermUnit::Months,
            remaining_amount: Decimal::from(remaining),
        }
    }
}

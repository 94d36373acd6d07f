// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! In-memory ledger of debts, incomes and expense records, and its mapping
//! onto the key-value store.
//!
//! Mutations follow a validate-then-skip policy: invalid input or a missing
//! target leaves the ledger untouched and is reported through the return
//! value, never as an error.
//!
//! A key whose stored value could not be read loads as its default and is
//! left alone by `save` until that collection is changed.

use rust_decimal::Decimal;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeSet;

use crate::error::Result;
use crate::models::{
    DailyExpenseRecord, DailyExpenses, DailyIncome, Debt, DebtDraft, MAX_AMOUNT, is_valid_amount,
};
use crate::schedule::{self, IncomeAllocation};
use crate::store::KvStore;

pub const DEBTS_KEY: &str = "debts";
pub const BASELINE_KEY: &str = "dailyExpenses";
pub const INCOMES_KEY: &str = "dailyIncomes";
pub const EXPENSES_KEY: &str = "dailyExpenseRecords";

#[derive(Debug, Clone, Default)]
pub struct Ledger {
    debts: Vec<Debt>,
    incomes: Vec<DailyIncome>,
    expense_records: Vec<DailyExpenseRecord>,
    baseline: DailyExpenses,
    // Keys that loaded as defaults and have not been changed since.
    unread: BTreeSet<&'static str>,
}

impl PartialEq for Ledger {
    fn eq(&self, other: &Self) -> bool {
        self.debts == other.debts
            && self.incomes == other.incomes
            && self.expense_records == other.expense_records
            && self.baseline == other.baseline
    }
}

/// Editable debt fields; `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct DebtUpdate {
    pub name: Option<String>,
    pub kind: Option<crate::models::DebtKind>,
    pub amount: Option<Decimal>,
    pub monthly_payment: Option<Decimal>,
    pub due_date: Option<chrono::NaiveDate>,
    pub remaining_amount: Option<Decimal>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn debts(&self) -> &[Debt] {
        &self.debts
    }

    pub fn incomes(&self) -> &[DailyIncome] {
        &self.incomes
    }

    pub fn expense_records(&self) -> &[DailyExpenseRecord] {
        &self.expense_records
    }

    pub fn baseline(&self) -> &DailyExpenses {
        &self.baseline
    }

    pub fn debt(&self, id: i64) -> Option<&Debt> {
        self.debts.iter().find(|d| d.id == id)
    }

    fn touch(&mut self, key: &'static str) {
        self.unread.remove(key);
    }

    /// Keys whose stored value could not be read on load and that `save`
    /// will not overwrite.
    pub fn unreadable_keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.unread.iter().copied()
    }

    fn next_id(&self) -> i64 {
        let now = chrono::Utc::now().timestamp_millis();
        match self.debts.iter().map(|d| d.id).max() {
            Some(max) if max >= now => max + 1,
            _ => now,
        }
    }

    /// Adds a debt built from `draft`. Returns the new id, or `None` when the
    /// draft lacks a name, amount, start date or term.
    pub fn add_debt(&mut self, draft: &DebtDraft) -> Option<i64> {
        let id = self.next_id();
        let Some(debt) = schedule::build_debt(draft, id) else {
            tracing::warn!(name = %draft.name, "debt draft incomplete, skipped");
            return None;
        };
        tracing::debug!(id, name = %debt.name, payment = %debt.monthly_payment, "debt added");
        self.debts.push(debt);
        self.touch(DEBTS_KEY);
        Some(id)
    }

    pub fn delete_debt(&mut self, id: i64) -> Option<Debt> {
        let pos = self.debts.iter().position(|d| d.id == id)?;
        tracing::debug!(id, "debt deleted");
        self.touch(DEBTS_KEY);
        Some(self.debts.remove(pos))
    }

    /// Applies `update` to the debt with `id`. The remaining balance is kept
    /// within `0..=amount`; a non-positive or oversized amount or payment, or
    /// a due date not after the start date, rejects the whole edit.
    pub fn edit_debt(&mut self, id: i64, update: &DebtUpdate) -> bool {
        let Some(debt) = self.debts.iter_mut().find(|d| d.id == id) else {
            return false;
        };
        let mut next = debt.clone();
        if let Some(name) = update.name.as_deref().map(str::trim) {
            if name.is_empty() {
                return false;
            }
            next.name = name.to_string();
        }
        if let Some(kind) = update.kind {
            next.kind = kind;
        }
        if let Some(amount) = update.amount {
            next.amount = amount;
        }
        if let Some(payment) = update.monthly_payment {
            next.monthly_payment = payment;
        }
        if let Some(due) = update.due_date {
            next.due_date = due;
        }
        if let Some(remaining) = update.remaining_amount {
            next.remaining_amount = remaining;
        }
        if !is_valid_amount(next.amount)
            || !is_valid_amount(next.monthly_payment)
            || next.due_date <= next.start_date
            || next.remaining_amount < Decimal::ZERO
        {
            return false;
        }
        next.remaining_amount = next.remaining_amount.min(next.amount);
        tracing::debug!(id, "debt edited");
        *debt = next;
        self.touch(DEBTS_KEY);
        true
    }

    /// Records an income entry and pays it into the debts in list order.
    /// Returns `None` (nothing recorded) for a non-positive amount or one
    /// above `MAX_AMOUNT`.
    pub fn add_income(&mut self, income: DailyIncome) -> Option<IncomeAllocation> {
        if !is_valid_amount(income.amount) {
            tracing::warn!(amount = %income.amount, max = %MAX_AMOUNT, "income out of range, skipped");
            return None;
        }
        let allocation = schedule::allocate_income(income.amount, &mut self.debts);
        tracing::debug!(
            date = %income.date,
            amount = %income.amount,
            applied = %allocation.applied(),
            "income added"
        );
        self.incomes.push(income);
        self.touch(INCOMES_KEY);
        if !allocation.payments.is_empty() {
            self.touch(DEBTS_KEY);
        }
        Some(allocation)
    }

    /// Replaces the entry at `index`. Debt balances are not recomputed.
    pub fn edit_income(&mut self, index: usize, income: DailyIncome) -> bool {
        if !is_valid_amount(income.amount) {
            return false;
        }
        match self.incomes.get_mut(index) {
            Some(slot) => {
                *slot = income;
                self.touch(INCOMES_KEY);
                true
            }
            None => false,
        }
    }

    /// Removes the entry at `index`; later entries shift down by one.
    pub fn delete_income(&mut self, index: usize) -> Option<DailyIncome> {
        if index >= self.incomes.len() {
            return None;
        }
        self.touch(INCOMES_KEY);
        Some(self.incomes.remove(index))
    }

    pub fn add_expenses(&mut self, record: DailyExpenseRecord) -> bool {
        if !record.is_acceptable() {
            tracing::warn!(date = %record.date, "empty or negative expense record skipped");
            return false;
        }
        tracing::debug!(date = %record.date, total = %record.total(), "expenses added");
        self.expense_records.push(record);
        self.touch(EXPENSES_KEY);
        true
    }

    pub fn edit_expense(&mut self, index: usize, record: DailyExpenseRecord) -> bool {
        if !record.is_acceptable() {
            return false;
        }
        match self.expense_records.get_mut(index) {
            Some(slot) => {
                *slot = record;
                self.touch(EXPENSES_KEY);
                true
            }
            None => false,
        }
    }

    pub fn delete_expense(&mut self, index: usize) -> Option<DailyExpenseRecord> {
        if index >= self.expense_records.len() {
            return None;
        }
        self.touch(EXPENSES_KEY);
        Some(self.expense_records.remove(index))
    }

    pub fn set_baseline(&mut self, baseline: DailyExpenses) -> bool {
        if !baseline.is_acceptable() {
            return false;
        }
        self.baseline = baseline;
        self.touch(BASELINE_KEY);
        true
    }

    /// Reads every collection from `store`. Absent keys and values that do not
    /// parse fall back to the defaults: empty lists and the stock baseline.
    pub fn load(store: &dyn KvStore) -> Result<Self> {
        let mut unread = BTreeSet::new();
        Ok(Ledger {
            debts: load_key(store, DEBTS_KEY, &mut unread)?,
            incomes: load_key(store, INCOMES_KEY, &mut unread)?,
            expense_records: load_key(store, EXPENSES_KEY, &mut unread)?,
            baseline: load_key(store, BASELINE_KEY, &mut unread)?,
            unread,
        })
    }

    /// Writes each collection whose serialized form differs from what the
    /// store holds, skipping keys that were unreadable on load and have not
    /// been changed since. Returns the number of keys written.
    pub fn save(&self, store: &mut dyn KvStore) -> Result<usize> {
        let mut written = 0;
        written += self.save_key(store, DEBTS_KEY, &self.debts)?;
        written += self.save_key(store, BASELINE_KEY, &self.baseline)?;
        written += self.save_key(store, INCOMES_KEY, &self.incomes)?;
        written += self.save_key(store, EXPENSES_KEY, &self.expense_records)?;
        if written > 0 {
            tracing::info!(keys = written, "ledger saved");
        }
        Ok(written)
    }

    fn save_key<T: Serialize + ?Sized>(
        &self,
        store: &mut dyn KvStore,
        key: &'static str,
        value: &T,
    ) -> Result<usize> {
        if self.unread.contains(key) {
            tracing::debug!(key, "unreadable key left as stored");
            return Ok(0);
        }
        let json = serde_json::to_string(value)?;
        if store.get(key)?.as_deref() == Some(json.as_str()) {
            return Ok(0);
        }
        store.set(key, &json)?;
        Ok(1)
    }
}

fn load_key<T: DeserializeOwned + Default>(
    store: &dyn KvStore,
    key: &'static str,
    unread: &mut BTreeSet<&'static str>,
) -> Result<T> {
    let Some(raw) = store.get(key)? else {
        return Ok(T::default());
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Ok(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "stored value unreadable, using default");
            unread.insert(key);
            Ok(T::default())
        }
    }
}

// Copyright (c) 2025 Spendlog Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Category, ExpensePatch, ExpenseRecord};

/// Canonical in-memory ledger: the working set of records plus the derived
/// running total. Pure data; all transitions go through [`apply`].
///
/// Invariant: `total_amount` equals the sum of all member amounts after
/// every transition. Add/update/remove adjust it incrementally; `Load`
/// recomputes from scratch because the incoming batch is untrusted.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LedgerState {
    pub records: Vec<ExpenseRecord>,
    pub total_amount: Decimal,
}

/// Closed set of ledger transitions.
#[derive(Debug, Clone)]
pub enum Mutation {
    /// Replace the entire working set. Does not merge.
    Load(Vec<ExpenseRecord>),
    /// Prepend a record; display order is newest first.
    Add(ExpenseRecord),
    /// Merge partial fields over the record with this id; no-op if absent.
    Update { id: String, patch: ExpensePatch },
    /// Delete by id; no-op if absent.
    Remove(String),
    /// Empty the set and reset the total. Used on sign-out.
    Clear,
}

pub fn apply(mut state: LedgerState, mutation: Mutation) -> LedgerState {
    match mutation {
        Mutation::Load(records) => {
            state.total_amount = records.iter().map(|r| r.amount).sum();
            state.records = records;
        }
        Mutation::Add(record) => {
            state.total_amount += record.amount;
            state.records.insert(0, record);
        }
        Mutation::Update { id, patch } => {
            if let Some(rec) = state.records.iter_mut().find(|r| r.id == id) {
                let old_amount = rec.amount;
                patch.apply_to(rec);
                state.total_amount = state.total_amount - old_amount + rec.amount;
            }
        }
        Mutation::Remove(id) => {
            if let Some(pos) = state.records.iter().position(|r| r.id == id) {
                let removed = state.records.remove(pos);
                state.total_amount -= removed.amount;
            }
        }
        Mutation::Clear => {
            state.records.clear();
            state.total_amount = Decimal::ZERO;
        }
    }
    state
}

impl LedgerState {
    /// In-place convenience over the pure [`apply`] transition.
    pub fn dispatch(&mut self, mutation: Mutation) {
        let state = std::mem::take(self);
        *self = apply(state, mutation);
    }

    pub fn get(&self, id: &str) -> Option<&ExpenseRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Per-category totals in category declaration order, skipping
    /// categories with no spend.
    pub fn category_totals(&self) -> Vec<(Category, Decimal)> {
        Category::ALL
            .iter()
            .filter_map(|cat| {
                let sum: Decimal = self
                    .records
                    .iter()
                    .filter(|r| r.category == *cat)
                    .map(|r| r.amount)
                    .sum();
                (!sum.is_zero()).then_some((*cat, sum))
            })
            .collect()
    }
}

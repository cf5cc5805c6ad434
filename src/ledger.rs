// 📒 Ledger
// Ordered in-memory expense collection, mirrored to the key-value store
// after every mutation (read whole, mutate, write whole)

use crate::error::TrackerResult;
use crate::expense::{Expense, NewExpense};
use crate::store::{KeyValueStore, EXPENSES_KEY};
use chrono::Utc;
use std::collections::BTreeMap;

pub struct Ledger<S: KeyValueStore> {
    store: S,
    expenses: Vec<Expense>,
    last_id: i64,
}

impl<S: KeyValueStore> Ledger<S> {
    /// Load the persisted collection
    ///
    /// Absent, unreadable or malformed data yields an empty ledger. This
    /// never fails.
    pub fn load(store: S) -> Self {
        let expenses = match store.get(EXPENSES_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Expense>>(&raw) {
                Ok(expenses) => expenses,
                Err(e) => {
                    tracing::warn!(error = %e, "malformed expense data, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "could not read expense data, starting empty");
                Vec::new()
            }
        };

        let last_id = expenses.iter().map(|e| e.id).max().unwrap_or(0);
        tracing::debug!(count = expenses.len(), "ledger loaded");

        Ledger {
            store,
            expenses,
            last_id,
        }
    }

    // ========================================================================
    // MUTATIONS
    // ========================================================================

    /// Append a record under a fresh id and persist
    ///
    /// Nothing changes in memory unless the store write succeeds.
    pub fn add(&mut self, new: NewExpense) -> TrackerResult<Expense> {
        let id = self.candidate_id();
        let expense = new.into_expense(id);

        let mut candidate = self.expenses.clone();
        candidate.push(expense.clone());
        self.commit(candidate)?;
        self.last_id = id;

        tracing::info!(id, category = %expense.category, amount = expense.amount, "expense added");
        Ok(expense)
    }

    /// Remove the record with `id`; unknown ids are a no-op
    pub fn delete(&mut self, id: i64) -> TrackerResult<Option<Expense>> {
        let mut candidate = self.expenses.clone();
        let removed = candidate
            .iter()
            .position(|e| e.id == id)
            .map(|index| candidate.remove(index));
        self.commit(candidate)?;

        match &removed {
            Some(_) => tracing::info!(id, "expense deleted"),
            None => tracing::debug!(id, "delete of unknown id ignored"),
        }
        Ok(removed)
    }

    /// First half of an interactive edit: hand back the old fields for
    /// pre-filling and drop the record. The caller re-adds it.
    pub fn take_for_edit(&mut self, id: i64) -> TrackerResult<Option<NewExpense>> {
        Ok(self.delete(id)?.map(|old| old.fields()))
    }

    /// Replace a record: delete then re-add, written to the store once
    ///
    /// The replacement always gets a new id.
    pub fn edit(&mut self, id: i64, fields: NewExpense) -> TrackerResult<Option<Expense>> {
        let index = match self.expenses.iter().position(|e| e.id == id) {
            Some(index) => index,
            None => return Ok(None),
        };

        let new_id = self.candidate_id();
        let replacement = fields.into_expense(new_id);

        let mut candidate = self.expenses.clone();
        candidate.remove(index);
        candidate.push(replacement.clone());
        self.commit(candidate)?;
        self.last_id = new_id;

        tracing::info!(old_id = id, new_id, "expense replaced");
        Ok(Some(replacement))
    }

    // ========================================================================
    // AGGREGATES
    // ========================================================================

    /// Sum of amounts per category label; empty categories are absent
    pub fn totals_by_category(&self) -> BTreeMap<String, f64> {
        let mut totals = BTreeMap::new();
        for expense in &self.expenses {
            *totals.entry(expense.category.clone()).or_insert(0.0) += expense.amount;
        }
        totals
    }

    pub fn grand_total(&self) -> f64 {
        self.expenses.iter().map(|e| e.amount).sum()
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn get(&self, id: i64) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    // ========================================================================
    // INTERNALS
    // ========================================================================

    /// Creation timestamp in milliseconds, bumped past the last issued id
    fn candidate_id(&self) -> i64 {
        let now = Utc::now().timestamp_millis();
        now.max(self.last_id + 1)
    }

    /// Write `candidate` to the store, then make it the in-memory sequence
    fn commit(&mut self, candidate: Vec<Expense>) -> TrackerResult<()> {
        let json = serde_json::to_string(&candidate)?;
        self.store.set(EXPENSES_KEY, &json)?;
        self.expenses = candidate;
        Ok(())
    }
}

// 🧭 Session
// Owns the ledger, the budget and the reward counter, and runs the
// budget/reward checks after each mutation

use crate::budget::{self, BudgetStatus};
use crate::error::TrackerResult;
use crate::expense::{Expense, NewExpense};
use crate::ledger::Ledger;
use crate::rewards::{accrue_reward, RewardGrant, RewardState};
use crate::store::KeyValueStore;
use serde::Serialize;

// ============================================================================
// ALERT SURFACE
// ============================================================================

pub trait AlertSink {
    fn alert(&mut self, message: &str);
}

/// Prints alerts on stdout
#[derive(Debug, Default)]
pub struct ConsoleAlerts;

impl AlertSink for ConsoleAlerts {
    fn alert(&mut self, message: &str) {
        println!("🔔 {}", message);
    }
}

/// Keeps alerts for later display
#[derive(Debug, Default, Clone)]
pub struct RecordedAlerts {
    pub messages: Vec<String>,
}

impl RecordedAlerts {
    pub fn drain(&mut self) -> Vec<String> {
        std::mem::take(&mut self.messages)
    }
}

impl AlertSink for RecordedAlerts {
    fn alert(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}

// ============================================================================
// SESSION
// ============================================================================

/// What a mutation produced, for surfaces that render it themselves
#[derive(Debug, Clone, Default, Serialize)]
pub struct MutationReport {
    pub expense: Option<Expense>,
    pub budget_status: Option<BudgetStatus>,
    pub reward: Option<RewardGrant>,
    pub total_rewards: u64,
}

pub struct Session<S: KeyValueStore, A: AlertSink> {
    ledger: Ledger<S>,
    budget: Option<f64>,
    rewards: RewardState,
    alerts: A,
}

impl<S: KeyValueStore, A: AlertSink> Session<S, A> {
    /// Load ledger and budget from the store; rewards start at zero
    pub fn open(store: S, alerts: A) -> Self {
        let budget = budget::load_budget(&store);
        let ledger = Ledger::load(store);

        Session {
            ledger,
            budget,
            rewards: RewardState::default(),
            alerts,
        }
    }

    pub fn add_expense(&mut self, new: NewExpense) -> TrackerResult<MutationReport> {
        let expense = self.ledger.add(new.normalized()?)?;

        let mut report = self.check_budget();
        report.reward = self.check_rewards();
        report.total_rewards = self.rewards.total;
        report.expense = Some(expense);
        Ok(report)
    }

    /// Unknown ids are ignored; the budget is still re-checked
    pub fn delete_expense(&mut self, id: i64) -> TrackerResult<MutationReport> {
        let removed = self.ledger.delete(id)?;

        let mut report = self.check_budget();
        report.expense = removed;
        Ok(report)
    }

    /// Replace a record (new id). `None` when the id is unknown.
    pub fn edit_expense(
        &mut self,
        id: i64,
        fields: NewExpense,
    ) -> TrackerResult<Option<MutationReport>> {
        let replacement = match self.ledger.edit(id, fields.normalized()?)? {
            Some(expense) => expense,
            None => return Ok(None),
        };

        let mut report = self.check_budget();
        report.reward = self.check_rewards();
        report.total_rewards = self.rewards.total;
        report.expense = Some(replacement);
        Ok(Some(report))
    }

    /// Drop a record and hand back its fields for an edit form
    ///
    /// The caller re-adds the (possibly changed) fields through
    /// `add_expense`, which then runs the budget and reward checks.
    pub fn take_for_edit(&mut self, id: i64) -> TrackerResult<Option<NewExpense>> {
        self.ledger.take_for_edit(id)
    }

    /// Invalid values are rejected before anything is written
    pub fn set_budget(&mut self, value: f64) -> TrackerResult<MutationReport> {
        budget::set_budget(self.ledger.store_mut(), value)?;
        self.budget = Some(value);
        Ok(self.check_budget())
    }

    pub fn clear_budget(&mut self) -> TrackerResult<()> {
        budget::clear_budget(self.ledger.store_mut())?;
        self.budget = None;
        Ok(())
    }

    // ========================================================================
    // READ SIDE
    // ========================================================================

    pub fn ledger(&self) -> &Ledger<S> {
        &self.ledger
    }

    pub fn budget(&self) -> Option<f64> {
        self.budget
    }

    pub fn budget_status(&self) -> Option<BudgetStatus> {
        budget::assess(self.ledger.grand_total(), self.budget)
    }

    pub fn total_rewards(&self) -> u64 {
        self.rewards.total
    }

    pub fn alerts(&self) -> &A {
        &self.alerts
    }

    pub fn alerts_mut(&mut self) -> &mut A {
        &mut self.alerts
    }

    // ========================================================================
    // CHECKS
    // ========================================================================

    fn check_budget(&mut self) -> MutationReport {
        let status = self.budget_status();
        if let Some(message) = status.and_then(|s| s.alert_message()) {
            self.alerts.alert(message);
        }

        MutationReport {
            budget_status: status,
            total_rewards: self.rewards.total,
            ..MutationReport::default()
        }
    }

    fn check_rewards(&mut self) -> Option<RewardGrant> {
        let outcome = accrue_reward(self.ledger.grand_total(), self.budget, self.rewards);
        self.rewards = outcome.state;

        if let Some(message) = outcome.message() {
            tracing::info!(total = self.rewards.total, "reward granted");
            self.alerts.alert(&message);
        }
        outcome.granted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn new_expense(amount: f64) -> NewExpense {
        NewExpense {
            name: "Groceries".to_string(),
            amount,
            category: "Food".to_string(),
            date: "2024-03-01".to_string(),
            recurring: None,
        }
    }

    fn session() -> Session<MemoryStore, RecordedAlerts> {
        Session::open(MemoryStore::new(), RecordedAlerts::default())
    }

    #[test]
    fn test_add_without_budget_is_silent() {
        let mut session = session();
        let report = session.add_expense(new_expense(50.0)).unwrap();

        assert_eq!(report.budget_status, None);
        assert_eq!(report.reward, None);
        assert!(session.alerts().messages.is_empty());
    }

    #[test]
    fn test_add_accrues_reward_each_time() {
        let mut session = session();
        session.set_budget(100.0).unwrap();

        let first = session.add_expense(new_expense(30.0)).unwrap();
        assert_eq!(first.budget_status, Some(BudgetStatus::WithinLimit));
        assert_eq!(first.reward.map(|g| g.reward), Some(7));
        assert_eq!(first.total_rewards, 7);

        let second = session.add_expense(new_expense(40.0)).unwrap();
        assert_eq!(second.reward.map(|g| g.reward), Some(3));
        assert_eq!(session.total_rewards(), 10);
    }

    #[test]
    fn test_alerts_on_threshold() {
        let mut session = session();
        session.set_budget(100.0).unwrap();

        session.add_expense(new_expense(85.0)).unwrap();
        let messages = session.alerts_mut().drain();
        assert_eq!(messages[0], "Warning: You are close to exceeding your budget.");
        assert!(messages[1].contains("reward of $1!"));

        let report = session.add_expense(new_expense(20.0)).unwrap();
        assert_eq!(report.budget_status, Some(BudgetStatus::Exceeded));
        assert_eq!(report.reward, None);
        assert_eq!(
            session.alerts_mut().drain(),
            vec!["You have exceeded your budget!".to_string()]
        );
    }

    #[test]
    fn test_delete_rechecks_budget_without_reward() {
        let mut session = session();
        session.set_budget(100.0).unwrap();
        let big = session.add_expense(new_expense(120.0)).unwrap().expense.unwrap();
        let rewards_before = session.total_rewards();

        let report = session.delete_expense(big.id).unwrap();
        assert_eq!(report.expense.map(|e| e.id), Some(big.id));
        assert_eq!(report.budget_status, Some(BudgetStatus::WithinLimit));
        assert_eq!(report.reward, None);
        assert_eq!(session.total_rewards(), rewards_before);
    }

    #[test]
    fn test_edit_changes_id_and_accrues() {
        let mut session = session();
        session.set_budget(100.0).unwrap();
        let original = session.add_expense(new_expense(90.0)).unwrap().expense.unwrap();

        let report = session
            .edit_expense(original.id, new_expense(50.0))
            .unwrap()
            .unwrap();
        let replacement = report.expense.unwrap();

        assert_ne!(replacement.id, original.id);
        assert_eq!(report.reward.map(|g| g.reward), Some(5));
        assert!(session.edit_expense(original.id, new_expense(1.0)).unwrap().is_none());
    }

    #[test]
    fn test_invalid_input_rejected() {
        let mut session = session();
        assert!(session.add_expense(new_expense(f64::NAN)).is_err());
        assert!(session.ledger().is_empty());
    }

    #[test]
    fn test_unusable_budget_rejected() {
        let mut session = session();
        session.set_budget(100.0).unwrap();

        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, -1.0] {
            assert!(session.set_budget(value).is_err(), "{} should be rejected", value);
        }

        assert_eq!(session.budget(), Some(100.0));
        assert_eq!(budget::load_budget(session.ledger().store()), Some(100.0));
        assert!(session.alerts().messages.is_empty());
    }

    #[test]
    fn test_padded_labels_share_a_category() {
        let mut session = session();
        let mut padded = new_expense(5.0);
        padded.category = " Food ".to_string();
        padded.name = " Snack ".to_string();

        let stored = session.add_expense(padded).unwrap().expense.unwrap();
        session.add_expense(new_expense(10.0)).unwrap();

        assert_eq!(stored.name, "Snack");
        let totals = session.ledger().totals_by_category();
        assert_eq!(totals.len(), 1);
        assert_eq!(totals["Food"], 15.0);

        let mut blank = new_expense(1.0);
        blank.name = "   ".to_string();
        assert!(session.edit_expense(stored.id, blank).is_err());
        assert!(session.ledger().get(stored.id).is_some());
    }

    #[test]
    fn test_take_for_edit_then_readd_accrues() {
        let mut session = session();
        session.set_budget(100.0).unwrap();
        let original = session.add_expense(new_expense(60.0)).unwrap().expense.unwrap();
        let rewards_before = session.total_rewards();

        let mut prefill = session.take_for_edit(original.id).unwrap().unwrap();
        assert_eq!(prefill, original.fields());
        assert!(session.ledger().is_empty());

        prefill.amount = 20.0;
        let report = session.add_expense(prefill).unwrap();
        assert_ne!(report.expense.map(|e| e.id), Some(original.id));
        assert_eq!(session.total_rewards(), rewards_before + 8);

        assert_eq!(session.take_for_edit(original.id).unwrap(), None);
    }

    #[test]
    fn test_rewards_reset_on_reopen() {
        let mut session = session();
        session.set_budget(100.0).unwrap();
        session.add_expense(new_expense(10.0)).unwrap();
        assert!(session.total_rewards() > 0);

        let store = session.ledger.store().clone();
        let reopened = Session::open(store, RecordedAlerts::default());
        assert_eq!(reopened.total_rewards(), 0);
        assert_eq!(reopened.budget(), Some(100.0));
        assert_eq!(reopened.ledger().len(), 1);
    }
}

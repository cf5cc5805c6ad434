// 💰 Budget Evaluator
// Single persisted spending threshold and the three-way status check

use crate::error::{TrackerResult, ValidationError};
use crate::store::{KeyValueStore, BUDGET_KEY};
use serde::{Deserialize, Serialize};

/// Share of the budget above which spending counts as "approaching"
pub const WARNING_RATIO: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BudgetStatus {
    /// total ≤ 80% of budget
    WithinLimit,
    /// 80% of budget < total ≤ budget
    Approaching,
    /// total > budget
    Exceeded,
}

impl BudgetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetStatus::WithinLimit => "WithinLimit",
            BudgetStatus::Approaching => "Approaching",
            BudgetStatus::Exceeded => "Exceeded",
        }
    }

    /// Text for the alert surface; nothing to say when within limit
    pub fn alert_message(&self) -> Option<&'static str> {
        match self {
            BudgetStatus::WithinLimit => None,
            BudgetStatus::Approaching => Some("Warning: You are close to exceeding your budget."),
            BudgetStatus::Exceeded => Some("You have exceeded your budget!"),
        }
    }
}

/// Classify a grand total against a budget
pub fn evaluate(grand_total: f64, budget: f64) -> BudgetStatus {
    if grand_total > budget {
        BudgetStatus::Exceeded
    } else if grand_total > WARNING_RATIO * budget {
        BudgetStatus::Approaching
    } else {
        BudgetStatus::WithinLimit
    }
}

/// Like `evaluate`, but an unset budget means "no limit" and yields no status
pub fn assess(grand_total: f64, budget: Option<f64>) -> Option<BudgetStatus> {
    budget.map(|limit| evaluate(grand_total, limit))
}

// ============================================================================
// PERSISTENCE
// ============================================================================

/// Read the stored threshold; absent or unparseable means no limit
pub fn load_budget<S: KeyValueStore>(store: &S) -> Option<f64> {
    let raw = match store.get(BUDGET_KEY) {
        Ok(raw) => raw?,
        Err(e) => {
            tracing::warn!(error = %e, "could not read budget, treating as unset");
            return None;
        }
    };

    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => {
            tracing::warn!(raw = %raw, "stored budget is not a number, treating as unset");
            None
        }
    }
}

/// Overwrite the stored threshold
///
/// Non-finite or negative values are rejected so that whatever is stored
/// reads back as the same limit.
pub fn set_budget<S: KeyValueStore>(store: &mut S, value: f64) -> TrackerResult<()> {
    check_budget(value)?;
    store.set(BUDGET_KEY, &value.to_string())?;
    tracing::info!(budget = value, "budget updated");
    Ok(())
}

/// Drop the stored threshold (back to no limit)
pub fn clear_budget<S: KeyValueStore>(store: &mut S) -> TrackerResult<()> {
    store.remove(BUDGET_KEY)?;
    tracing::info!("budget cleared");
    Ok(())
}

/// Parse a budget typed by the user
pub fn parse_budget(raw: &str) -> Result<f64, ValidationError> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| ValidationError::new("budget", format!("'{}' is not a number", raw.trim())))?;
    check_budget(value)?;
    Ok(value)
}

/// A usable limit is finite and non-negative
pub fn check_budget(value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::new("budget", "must be a finite number"));
    }
    if value < 0.0 {
        return Err(ValidationError::new("budget", "must not be negative"));
    }
    Ok(())
}

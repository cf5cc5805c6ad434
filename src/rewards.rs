// 🎉 Reward Accrual
// Session-scoped bonus credit granted while spending stays under budget.
//
// Accrual is NOT idempotent: every evaluation against an under-budget ledger
// grants the reward again, even if nothing changed since the last call.

use serde::{Deserialize, Serialize};

/// Fraction of the saved amount paid out as reward
pub const REWARD_RATE: f64 = 0.1;

/// Running reward total. Lives as long as the session; never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardState {
    pub total: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RewardGrant {
    /// budget - grand total at evaluation time
    pub saved: f64,
    /// floor(saved * REWARD_RATE); may be zero
    pub reward: u64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RewardOutcome {
    pub state: RewardState,
    pub granted: Option<RewardGrant>,
}

/// Evaluate one accrual step
///
/// No budget, or a total at/over budget, leaves the state unchanged.
pub fn accrue_reward(grand_total: f64, budget: Option<f64>, state: RewardState) -> RewardOutcome {
    let budget = match budget {
        Some(budget) if grand_total < budget => budget,
        _ => {
            return RewardOutcome {
                state,
                granted: None,
            }
        }
    };

    let saved = budget - grand_total;
    let reward = (saved * REWARD_RATE).floor() as u64;

    RewardOutcome {
        state: RewardState {
            total: state.total.saturating_add(reward),
        },
        granted: Some(RewardGrant { saved, reward }),
    }
}

impl RewardOutcome {
    /// Congratulation text for the alert surface
    pub fn message(&self) -> Option<String> {
        self.granted.map(|grant| {
            format!(
                "🎉 Congratulations! You have saved ${}. You've earned a reward of ${}! \
                 Total Rewards: ${} 💰",
                grant.saved, grant.reward, self.state.total
            )
        })
    }
}

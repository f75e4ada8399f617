//! Goal progress
//!
//! Goals have no per-goal running balance: every goal is measured against the
//! ledger's global net savings (all-time income minus all-time expenses).

use crate::models::{Goal, Money, Transaction, TransactionKind};

/// Progress toward one goal
#[derive(Debug, Clone, serde::Serialize)]
pub struct GoalProgress {
    pub name: String,
    #[serde(serialize_with = "crate::models::money::serialize_major")]
    pub target: Money,
    /// Net savings applied to this goal, capped at the target
    #[serde(serialize_with = "crate::models::money::serialize_major")]
    pub saved: Money,
    /// Percent of target reached, capped at 100
    pub percent: f64,
}

/// All-time net savings across the full transaction history
pub fn net_savings(transactions: &[Transaction]) -> Money {
    let mut net = Money::zero();
    for txn in transactions {
        match txn.kind {
            TransactionKind::Income => net += txn.amount,
            TransactionKind::Expense => net -= txn.amount,
        }
    }
    net
}

/// Progress for every goal against the global net savings
pub fn goal_progress(transactions: &[Transaction], goals: &[Goal]) -> Vec<GoalProgress> {
    let savings = net_savings(transactions);

    goals
        .iter()
        .map(|goal| {
            let percent = if goal.target.is_positive() {
                (savings.minor() as f64 / goal.target.minor() as f64 * 100.0)
                    .clamp(0.0, 100.0)
            } else {
                0.0
            };
            let saved = if savings.is_negative() {
                Money::zero()
            } else {
                savings.min(goal.target)
            };

            GoalProgress {
                name: goal.name.clone(),
                target: goal.target,
                saved,
                percent,
            }
        })
        .collect()
}

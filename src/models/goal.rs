//! Financial goal model
//!
//! Goals track a savings target. The stored `saved` field is always written
//! as zero; progress is reported against the ledger's global net savings,
//! not a per-goal running balance.

use serde::{Deserialize, Serialize};

use super::money::Money;

/// A named savings goal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    /// Goal name, e.g. "Emergency Fund"
    pub name: String,

    /// Target amount in minor units; always positive
    pub target: Money,

    /// Stored saved amount; the append path always writes 0
    pub saved: Money,
}

impl Goal {
    /// Create a new goal with nothing saved against it yet
    pub fn new(name: impl Into<String>, target: Money) -> Self {
        Self {
            name: name.into(),
            target,
            saved: Money::zero(),
        }
    }

    /// Check the append-time invariants
    pub fn validate(&self) -> Result<(), String> {
        if !self.target.is_positive() {
            return Err(format!("Goal target must be positive, got {}", self.target));
        }
        if self.name.trim().is_empty() {
            return Err("Goal name must not be empty".into());
        }
        Ok(())
    }
}

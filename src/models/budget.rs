//! Budget model
//!
//! A monthly spending limit for one category. Storage may contain multiple
//! entries for the same category; reads resolve duplicates last-wins.

use serde::{Deserialize, Serialize};

use super::money::Money;

/// A monthly budget for a spending category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    /// Category this budget applies to
    pub category: String,

    /// Monthly limit in minor units; always positive
    pub monthly_amount: Money,
}

impl Budget {
    /// Create a new budget entry
    pub fn new(category: impl Into<String>, monthly_amount: Money) -> Self {
        Self {
            category: category.into(),
            monthly_amount,
        }
    }

    /// Check the append-time invariants
    pub fn validate(&self) -> Result<(), String> {
        if !self.monthly_amount.is_positive() {
            return Err(format!(
                "Budget amount must be positive, got {}",
                self.monthly_amount
            ));
        }
        if self.category.trim().is_empty() {
            return Err("Budget category must not be empty".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        assert!(Budget::new("Food", Money::from_minor(10000)).validate().is_ok());
        assert!(Budget::new("Food", Money::zero()).validate().is_err());
        assert!(Budget::new("", Money::from_minor(10000)).validate().is_err());
    }
}

//! Storage layer for PocketLedger
//!
//! Plain-text line-record store with three append-only files: transactions,
//! budgets, and goals. Every query re-parses a fresh snapshot; nothing is
//! cached or indexed, and nothing is ever rewritten in place.

pub mod budgets;
pub mod goals;
pub mod records;
pub mod transactions;
pub mod validate;

pub use budgets::BudgetRepository;
pub use goals::GoalRepository;
pub use records::{DataIssue, RecordDefect};
pub use transactions::TransactionRepository;
pub use validate::{validate_storage, ValidationReport};

use crate::config::LedgerPaths;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: LedgerPaths,
    pub transactions: TransactionRepository,
    pub budgets: BudgetRepository,
    pub goals: GoalRepository,
}

impl Storage {
    /// Create a new Storage instance over the configured paths
    pub fn new(paths: LedgerPaths) -> Self {
        Self {
            transactions: TransactionRepository::new(paths.transactions_file()),
            budgets: BudgetRepository::new(paths.budgets_file()),
            goals: GoalRepository::new(paths.goals_file()),
            paths,
        }
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &LedgerPaths {
        &self.paths
    }
}

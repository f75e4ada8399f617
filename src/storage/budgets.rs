//! Budget repository for the plain-text store
//!
//! Budget records are append-only in storage; duplicates per category are
//! resolved last-wins at read time.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Budget, Money};

use super::records::{
    append_line, ensure_storable_field, parse_budget_line, read_lines, render_budget_line,
    DataIssue,
};

/// Repository for budget persistence
pub struct BudgetRepository {
    path: PathBuf,
}

impl BudgetRepository {
    /// Create a new budget repository
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Load every parsable budget entry in file order, with diagnostics
    pub fn load_with_issues(&self) -> LedgerResult<(Vec<Budget>, Vec<DataIssue>)> {
        let mut budgets = Vec::new();
        let mut issues = Vec::new();

        for (idx, line) in read_lines(&self.path)?.iter().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match parse_budget_line(line) {
                Ok(budget) => budgets.push(budget),
                Err(defect) => issues.push(DataIssue {
                    line_number: idx + 1,
                    defect,
                }),
            }
        }

        Ok((budgets, issues))
    }

    /// Load budgets as a category map, last entry per category winning
    ///
    /// A missing file yields an empty map, not an error.
    pub fn load(&self) -> LedgerResult<BTreeMap<String, Money>> {
        let (entries, _) = self.load_with_issues()?;
        let mut map = BTreeMap::new();
        for budget in entries {
            map.insert(budget.category, budget.monthly_amount);
        }
        Ok(map)
    }

    /// Validate field shape and append one budget record
    pub fn append(&self, category: &str, monthly_amount: Money) -> LedgerResult<()> {
        let budget = Budget::new(category, monthly_amount);
        budget.validate().map_err(LedgerError::Validation)?;
        ensure_storable_field("category", category)?;

        append_line(&self.path, &render_budget_line(&budget))
    }
}

//! Goal repository for the plain-text store

use std::path::PathBuf;

use crate::error::{LedgerError, LedgerResult};
use crate::models::Goal;

use super::records::{
    append_line, ensure_storable_field, parse_goal_line, read_lines, render_goal_line, DataIssue,
};

/// Repository for goal persistence
pub struct GoalRepository {
    path: PathBuf,
}

impl GoalRepository {
    /// Create a new goal repository
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Load every parsable goal in file order, with diagnostics
    pub fn load_with_issues(&self) -> LedgerResult<(Vec<Goal>, Vec<DataIssue>)> {
        let mut goals = Vec::new();
        let mut issues = Vec::new();

        for (idx, line) in read_lines(&self.path)?.iter().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match parse_goal_line(line) {
                Ok(goal) => goals.push(goal),
                Err(defect) => issues.push(DataIssue {
                    line_number: idx + 1,
                    defect,
                }),
            }
        }

        Ok((goals, issues))
    }

    /// Load goals, silently dropping malformed lines
    pub fn load(&self) -> LedgerResult<Vec<Goal>> {
        let (goals, _) = self.load_with_issues()?;
        Ok(goals)
    }

    /// Validate field shape and append one goal record
    ///
    /// The stored saved amount is always written as zero; progress is derived
    /// from the ledger's net savings at read time.
    pub fn append(&self, goal: &Goal) -> LedgerResult<()> {
        goal.validate().map_err(LedgerError::Validation)?;
        ensure_storable_field("name", &goal.name)?;

        append_line(&self.path, &render_goal_line(goal))
    }
}

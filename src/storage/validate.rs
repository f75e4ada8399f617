//! Strict data validation
//!
//! The counterpart to the silent-drop bulk loader: re-scans every record file
//! and reports each malformed line with its line number and specific defect,
//! without halting on the first error.

use crate::error::LedgerResult;

use super::records::DataIssue;
use super::Storage;

/// Issues found in one record file
#[derive(Debug, Clone)]
pub struct FileReport {
    /// File name relative to the data directory
    pub file: &'static str,
    pub issues: Vec<DataIssue>,
}

/// Aggregate result of a strict validation pass
#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub files: Vec<FileReport>,
}

impl ValidationReport {
    /// Total number of issues across all files
    pub fn issue_count(&self) -> usize {
        self.files.iter().map(|f| f.issues.len()).sum()
    }

    /// True when every record file parsed cleanly
    pub fn is_clean(&self) -> bool {
        self.issue_count() == 0
    }
}

/// Run a strict validation pass over every record file
pub fn validate_storage(storage: &Storage) -> LedgerResult<ValidationReport> {
    let (_, transaction_issues) = storage.transactions.load_with_issues()?;
    let (_, budget_issues) = storage.budgets.load_with_issues()?;
    let (_, goal_issues) = storage.goals.load_with_issues()?;

    Ok(ValidationReport {
        files: vec![
            FileReport {
                file: "transactions.txt",
                issues: transaction_issues,
            },
            FileReport {
                file: "budgets.txt",
                issues: budget_issues,
            },
            FileReport {
                file: "goals.txt",
                issues: goal_issues,
            },
        ],
    })
}

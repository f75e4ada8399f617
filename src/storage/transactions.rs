//! Transaction repository for the plain-text store
//!
//! The transaction file is append-only: records are never rewritten or merged
//! in place. Loading re-parses the whole file; callers choose between the
//! silent-drop view and the diagnostic view of the same parse.

use std::path::PathBuf;

use crate::error::{LedgerError, LedgerResult};
use crate::models::Transaction;

use super::records::{
    append_line, ensure_storable_field, parse_transaction_line, read_lines,
    render_transaction_line, DataIssue,
};

/// Repository for transaction persistence
pub struct TransactionRepository {
    path: PathBuf,
}

impl TransactionRepository {
    /// Create a new transaction repository
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Load every parsable transaction, collecting a diagnostic for each
    /// malformed line
    ///
    /// This is the single loader behind both error-handling policies: the
    /// bulk path discards the issues, the validation path reports them.
    pub fn load_with_issues(&self) -> LedgerResult<(Vec<Transaction>, Vec<DataIssue>)> {
        let mut transactions = Vec::new();
        let mut issues = Vec::new();

        for (idx, line) in read_lines(&self.path)?.iter().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match parse_transaction_line(line) {
                Ok(txn) => transactions.push(txn),
                Err(defect) => issues.push(DataIssue {
                    line_number: idx + 1,
                    defect,
                }),
            }
        }

        Ok((transactions, issues))
    }

    /// Load transactions, silently dropping malformed lines
    ///
    /// A missing file yields an empty dataset, not an error.
    pub fn load(&self) -> LedgerResult<Vec<Transaction>> {
        let (transactions, _) = self.load_with_issues()?;
        Ok(transactions)
    }

    /// Exact stored lines, for textual duplicate detection during import
    pub fn raw_lines(&self) -> LedgerResult<Vec<String>> {
        read_lines(&self.path)
    }

    /// Validate field shape and append one transaction record
    pub fn append(&self, txn: &Transaction) -> LedgerResult<()> {
        txn.validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;
        ensure_storable_field("category", &txn.category)?;
        ensure_storable_field("description", &txn.description)?;

        append_line(&self.path, &render_transaction_line(txn))
    }

    /// Append an already-rendered stored line (import fast path)
    ///
    /// The caller must have classified the line as valid beforehand.
    pub fn append_raw(&self, line: &str) -> LedgerResult<()> {
        append_line(&self.path, line)
    }
}

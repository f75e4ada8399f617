//! Line-record codec for the plain-text store
//!
//! The stored formats are fixed for compatibility with existing data files:
//!
//! - transaction: `YYYY-MM-DD,kind,category,description,amount_minor`
//! - budget: `category,amount_minor`
//! - goal: `name,target_minor,saved_minor`
//!
//! Fields are comma-delimited with no escaping. An embedded comma in a
//! description corrupts the row on read; this is a known format limitation,
//! so the append path rejects fields that would not round-trip instead of
//! writing them.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use chrono::NaiveDate;
use std::fmt;

use crate::error::LedgerError;
use crate::models::{Budget, Goal, Money, Transaction, TransactionKind};

/// Stored date format
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// What is wrong with a stored line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordDefect {
    /// Wrong number of comma-delimited columns
    WrongColumnCount { found: usize, expected: usize },
    /// Date does not parse as YYYY-MM-DD
    BadDate(String),
    /// Amount is not an integer
    BadAmount(String),
    /// Amount parses but is not positive
    NonPositiveAmount(i64),
    /// Kind token is neither "income" nor "expense"
    BadKind(String),
    /// A required label field is empty
    EmptyLabel(&'static str),
}

impl fmt::Display for RecordDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongColumnCount { found, expected } => {
                write!(f, "incorrect number of columns ({}), expected {}", found, expected)
            }
            Self::BadDate(s) => write!(f, "invalid date '{}', expected YYYY-MM-DD", s),
            Self::BadAmount(s) => write!(f, "amount '{}' is not a valid integer", s),
            Self::NonPositiveAmount(n) => write!(f, "amount {} is not positive", n),
            Self::BadKind(s) => write!(f, "type '{}' is neither income nor expense", s),
            Self::EmptyLabel(field) => write!(f, "{} must not be empty", field),
        }
    }
}

/// A defect located at a specific line of a record file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataIssue {
    /// 1-based line number
    pub line_number: usize,
    pub defect: RecordDefect,
}

impl fmt::Display for DataIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line_number, self.defect)
    }
}

/// Parse one stored transaction line
pub fn parse_transaction_line(line: &str) -> Result<Transaction, RecordDefect> {
    let parts: Vec<&str> = line.split(',').collect();
    if parts.len() != 5 {
        return Err(RecordDefect::WrongColumnCount {
            found: parts.len(),
            expected: 5,
        });
    }

    let date = NaiveDate::parse_from_str(parts[0], DATE_FORMAT)
        .map_err(|_| RecordDefect::BadDate(parts[0].to_string()))?;
    let kind = TransactionKind::parse(parts[1])
        .ok_or_else(|| RecordDefect::BadKind(parts[1].to_string()))?;
    if parts[2].trim().is_empty() {
        return Err(RecordDefect::EmptyLabel("category"));
    }
    let amount =
        Money::parse_minor(parts[4]).map_err(|_| RecordDefect::BadAmount(parts[4].to_string()))?;
    if !amount.is_positive() {
        return Err(RecordDefect::NonPositiveAmount(amount.minor()));
    }

    Ok(Transaction::new(date, kind, parts[2], parts[3], amount))
}

/// Render a transaction in the stored line format
pub fn render_transaction_line(txn: &Transaction) -> String {
    format!(
        "{},{},{},{},{}",
        txn.date.format(DATE_FORMAT),
        txn.kind,
        txn.category,
        txn.description,
        txn.amount.minor()
    )
}

/// Parse one stored budget line
pub fn parse_budget_line(line: &str) -> Result<Budget, RecordDefect> {
    let parts: Vec<&str> = line.split(',').collect();
    if parts.len() != 2 {
        return Err(RecordDefect::WrongColumnCount {
            found: parts.len(),
            expected: 2,
        });
    }
    if parts[0].trim().is_empty() {
        return Err(RecordDefect::EmptyLabel("category"));
    }
    let amount =
        Money::parse_minor(parts[1]).map_err(|_| RecordDefect::BadAmount(parts[1].to_string()))?;
    if !amount.is_positive() {
        return Err(RecordDefect::NonPositiveAmount(amount.minor()));
    }

    Ok(Budget::new(parts[0], amount))
}

/// Render a budget in the stored line format
pub fn render_budget_line(budget: &Budget) -> String {
    format!("{},{}", budget.category, budget.monthly_amount.minor())
}

/// Parse one stored goal line
pub fn parse_goal_line(line: &str) -> Result<Goal, RecordDefect> {
    let parts: Vec<&str> = line.split(',').collect();
    if parts.len() != 3 {
        return Err(RecordDefect::WrongColumnCount {
            found: parts.len(),
            expected: 3,
        });
    }
    if parts[0].trim().is_empty() {
        return Err(RecordDefect::EmptyLabel("name"));
    }
    let target =
        Money::parse_minor(parts[1]).map_err(|_| RecordDefect::BadAmount(parts[1].to_string()))?;
    if !target.is_positive() {
        return Err(RecordDefect::NonPositiveAmount(target.minor()));
    }
    let saved =
        Money::parse_minor(parts[2]).map_err(|_| RecordDefect::BadAmount(parts[2].to_string()))?;

    Ok(Goal {
        name: parts[0].to_string(),
        target,
        saved,
    })
}

/// Render a goal in the stored line format
pub fn render_goal_line(goal: &Goal) -> String {
    format!("{},{},{}", goal.name, goal.target.minor(), goal.saved.minor())
}

/// Reject field values that would not survive a round trip through the
/// unescaped comma-delimited format
pub fn ensure_storable_field(field: &'static str, value: &str) -> Result<(), LedgerError> {
    if value.contains(',') || value.contains('\n') || value.contains('\r') {
        return Err(LedgerError::invalid_label(
            field,
            "must not contain commas or line breaks (unescaped record format)",
        ));
    }
    Ok(())
}

/// Read all lines of a record file; a missing file is an empty dataset
pub fn read_lines(path: &Path) -> Result<Vec<String>, LedgerError> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path)
        .map_err(|e| LedgerError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;
    let reader = BufReader::new(file);

    let mut lines = Vec::new();
    for line in reader.lines() {
        let line = line.map_err(|e| {
            LedgerError::Storage(format!("Failed to read {}: {}", path.display(), e))
        })?;
        lines.push(line);
    }
    Ok(lines)
}

/// Append one record line, creating parent directories as needed
///
/// Writes go through a single handle opened per call; the store relies on
/// single-writer discipline rather than cross-process locking.
pub fn append_line(path: &Path, line: &str) -> Result<(), LedgerError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            LedgerError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| LedgerError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    writeln!(file, "{}", line)
        .map_err(|e| LedgerError::Storage(format!("Failed to append to {}: {}", path.display(), e)))
}

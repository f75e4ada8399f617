//! CLI command handlers
//!
//! Bridges clap argument parsing with the storage and service layers. This is
//! the only layer that resolves "today": every service call below it receives
//! an explicit reference date.

pub mod budget;
pub mod data;
pub mod goal;
pub mod report;
pub mod transaction;

pub use budget::{handle_budget_command, BudgetCommands};
pub use data::{handle_export, handle_import, handle_validate, ExportFormat};
pub use goal::{handle_goal_command, GoalCommands};
pub use report::{handle_check, handle_health, handle_report, handle_trend};
pub use transaction::{handle_transaction_command, TransactionCommands};

use chrono::NaiveDate;

use crate::error::{LedgerError, LedgerResult};
use crate::models::MonthKey;

/// Resolve the reference date for a command
///
/// An explicit `--month YYYY-MM` pins the reference to that month's first
/// day; otherwise the local calendar date is used.
pub(crate) fn resolve_as_of(month: Option<&str>) -> LedgerResult<NaiveDate> {
    match month {
        Some(raw) => {
            let month = MonthKey::parse(raw).ok_or_else(|| {
                LedgerError::Validation(format!("invalid month '{}', expected YYYY-MM", raw))
            })?;
            Ok(month.first_day())
        }
        None => Ok(chrono::Local::now().date_naive()),
    }
}

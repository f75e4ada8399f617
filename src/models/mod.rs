//! Core data models for PocketLedger
//!
//! All monetary values are integer minor units (`Money`); all aggregation is
//! keyed by calendar month (`MonthKey`).

pub mod budget;
pub mod goal;
pub mod money;
pub mod month;
pub mod transaction;

pub use budget::Budget;
pub use goal::Goal;
pub use money::{Money, MoneyParseError};
pub use month::MonthKey;
pub use transaction::{Transaction, TransactionKind, TransactionValidationError};

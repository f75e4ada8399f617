//! Export module
//!
//! Machine-readable export surfaces:
//! - CSV: transactions in the bulk interchange schema (re-importable)
//! - JSON: transaction list and composed monthly report

pub mod csv;
pub mod json;

pub use csv::{export_transactions_csv, write_transactions_csv};
pub use json::{export_report_json, export_transactions_json};

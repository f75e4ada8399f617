//! PocketLedger - plain-text personal finance ledger and analytics engine
//!
//! PocketLedger stores income and expense records in append-only plain-text
//! files and derives everything else from them: calendar-month aggregates,
//! budget performance, savings trends with a naive projection, a 0-100
//! financial health score, and a composed monthly report.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data types (money, months, transactions, budgets, goals)
//! - `storage`: Plain-text line-record persistence
//! - `services`: Pure analytics over loaded snapshots
//! - `reports`: Monthly report composition
//! - `export`: CSV and JSON export surfaces
//! - `cli`: Command handlers for the binary
//!
//! All monetary arithmetic is exact integer minor units; major-unit decimals
//! appear only at import, export, and display boundaries. Every service takes
//! an explicit reference date where "now" matters.
//!
//! # Example
//!
//! ```rust,ignore
//! use pocketledger::config::{LedgerPaths, Settings};
//! use pocketledger::storage::Storage;
//!
//! let paths = LedgerPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::new(paths);
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{LedgerError, LedgerResult};

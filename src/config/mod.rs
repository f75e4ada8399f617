//! Configuration and path management for PocketLedger

pub mod paths;
pub mod settings;

pub use paths::LedgerPaths;
pub use settings::{Settings, StatusBands};

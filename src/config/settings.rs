//! User settings for PocketLedger
//!
//! Manages user preferences including the currency symbol, budget status
//! thresholds, and the default trend window.

use serde::{Deserialize, Serialize};

use super::paths::LedgerPaths;
use crate::error::LedgerError;

/// Thresholds for budget status banding, expressed as utilization percents
///
/// One policy applies everywhere: below `warning_pct` is OK, between
/// `warning_pct` and `over_pct` inclusive is a warning, above `over_pct` is
/// over budget.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatusBands {
    /// Utilization percent at which a category starts warning
    pub warning_pct: f64,
    /// Utilization percent above which a category is over budget
    pub over_pct: f64,
}

impl Default for StatusBands {
    fn default() -> Self {
        Self {
            warning_pct: 70.0,
            over_pct: 100.0,
        }
    }
}

/// User settings for PocketLedger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Default currency symbol
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Budget status thresholds
    #[serde(default)]
    pub status_bands: StatusBands,

    /// Number of months shown by the savings trend
    #[serde(default = "default_trend_months")]
    pub trend_months: usize,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_trend_months() -> usize {
    3
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            status_bands: StatusBands::default(),
            trend_months: default_trend_months(),
        }
    }
}

impl Settings {
    /// Load settings from disk, creating the file with defaults if missing
    pub fn load_or_create(paths: &LedgerPaths) -> Result<Self, LedgerError> {
        let path = paths.settings_file();
        if path.exists() {
            let contents = std::fs::read_to_string(&path).map_err(|e| {
                LedgerError::Config(format!("Failed to read {}: {}", path.display(), e))
            })?;
            serde_json::from_str(&contents).map_err(|e| {
                LedgerError::Config(format!("Failed to parse {}: {}", path.display(), e))
            })
        } else {
            let settings = Self::default();
            settings.save(paths)?;
            Ok(settings)
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &LedgerPaths) -> Result<(), LedgerError> {
        paths.ensure_directories()?;
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(paths.settings_file(), json).map_err(|e| {
            LedgerError::Config(format!("Failed to write settings: {}", e))
        })
    }
}

//! Report composition

pub mod monthly;

pub use monthly::{CategoryAmount, MonthlyReport, PeriodSummary, ReportTransaction};

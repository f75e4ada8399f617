//! Analytics services for PocketLedger
//!
//! Each service is a pure computation over immutable snapshots loaded from
//! the store; nothing here mutates shared state, and every entry point takes
//! an explicit reference date where "now" matters.

pub mod aggregate;
pub mod assistant;
pub mod budget_tracker;
pub mod goals;
pub mod health;
pub mod import;
pub mod trend;

pub use aggregate::CategoryTotals;
pub use assistant::{daily_check, DailyCheck, SpendingAlert};
pub use budget_tracker::{BudgetOverview, BudgetStatus, CategoryPerformance};
pub use goals::GoalProgress;
pub use health::{score_financial_health, HealthRating, HealthScore};
pub use import::{ImportService, ImportSummary};
pub use trend::{MonthComparison, MonthFlow, TrendPoint};

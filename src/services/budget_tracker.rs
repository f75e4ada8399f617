//! Budget tracking
//!
//! Computes per-category and overall utilization of monthly budgets against
//! aggregated spending, with one status-banding policy shared by every call
//! site.

use std::collections::BTreeMap;
use std::fmt;

use crate::config::StatusBands;
use crate::models::Money;

use super::aggregate::CategoryTotals;

/// Budget status band for a utilization percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    Ok,
    Warning,
    OverBudget,
}

impl BudgetStatus {
    /// Classify a utilization percentage against the configured bands
    pub fn from_utilization(utilization: f64, bands: &StatusBands) -> Self {
        if utilization > bands.over_pct {
            Self::OverBudget
        } else if utilization >= bands.warning_pct {
            Self::Warning
        } else {
            Self::Ok
        }
    }
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => write!(f, "OK"),
            Self::Warning => write!(f, "Warning"),
            Self::OverBudget => write!(f, "Over budget"),
        }
    }
}

/// Utilization percent: spent / budget × 100, zero when the budget is zero
pub fn utilization(spent: Money, budget: Money) -> f64 {
    if budget.is_zero() {
        0.0
    } else {
        spent.minor() as f64 / budget.minor() as f64 * 100.0
    }
}

/// One category's budget performance
#[derive(Debug, Clone, serde::Serialize)]
pub struct CategoryPerformance {
    pub category: String,
    #[serde(serialize_with = "crate::models::money::serialize_major")]
    pub budget: Money,
    #[serde(serialize_with = "crate::models::money::serialize_major")]
    pub spent: Money,
    #[serde(serialize_with = "crate::models::money::serialize_major")]
    pub remaining: Money,
    pub utilization: f64,
    pub status: BudgetStatus,
}

/// Budget performance across all categories plus the overall view
#[derive(Debug, Clone, serde::Serialize)]
pub struct BudgetOverview {
    /// Per-category rows in category order
    pub categories: Vec<CategoryPerformance>,
    #[serde(serialize_with = "crate::models::money::serialize_major")]
    pub total_budget: Money,
    #[serde(serialize_with = "crate::models::money::serialize_major")]
    pub total_spent: Money,
    #[serde(serialize_with = "crate::models::money::serialize_major")]
    pub total_remaining: Money,
    pub overall_utilization: f64,
    pub overall_status: BudgetStatus,
}

impl BudgetOverview {
    /// True when no budgets are configured
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Compute the budget overview for one month's spending
///
/// `spent` is the expense aggregation for the month; spending in categories
/// without a budget contributes to the overall totals but has no per-category
/// row.
pub fn overview(
    budgets: &BTreeMap<String, Money>,
    spent: &CategoryTotals,
    bands: &StatusBands,
) -> BudgetOverview {
    let mut categories = Vec::with_capacity(budgets.len());
    let mut total_budget = Money::zero();

    for (category, budget) in budgets {
        let spent_here = spent.get(category);
        let pct = utilization(spent_here, *budget);
        total_budget += *budget;

        categories.push(CategoryPerformance {
            category: category.clone(),
            budget: *budget,
            spent: spent_here,
            remaining: *budget - spent_here,
            utilization: pct,
            status: BudgetStatus::from_utilization(pct, bands),
        });
    }

    let total_spent = spent.total;
    let overall_utilization = utilization(total_spent, total_budget);

    BudgetOverview {
        categories,
        total_budget,
        total_spent,
        total_remaining: total_budget - total_spent,
        overall_utilization,
        overall_status: BudgetStatus::from_utilization(overall_utilization, bands),
    }
}

/// Categories whose spending exceeds their budget, sorted by name
pub fn over_budget_categories(
    budgets: &BTreeMap<String, Money>,
    spent: &CategoryTotals,
) -> Vec<String> {
    budgets
        .iter()
        .filter(|(category, budget)| spent.get(category) > **budget)
        .map(|(category, _)| category.clone())
        .collect()
}

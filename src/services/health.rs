//! Financial health scoring
//!
//! A deterministic, pure scorer: given one month's income, expenses, and
//! budget picture it produces an integer score in [0, 100] built from three
//! sub-scores (savings rate, budget adherence, income vs expenses) plus an
//! ordered list of recommendations. The same rules back every call site.

use std::collections::BTreeMap;
use std::fmt;

use crate::models::Money;

use super::aggregate::CategoryTotals;
use super::budget_tracker::over_budget_categories;

/// Interpretation band for a total health score
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthRating {
    Excellent,
    Good,
    Fair,
    NeedsWork,
}

impl HealthRating {
    /// Band for a total score
    pub fn from_score(score: u8) -> Self {
        if score >= 80 {
            Self::Excellent
        } else if score >= 60 {
            Self::Good
        } else if score >= 40 {
            Self::Fair
        } else {
            Self::NeedsWork
        }
    }
}

impl fmt::Display for HealthRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Excellent => write!(f, "Excellent"),
            Self::Good => write!(f, "Good"),
            Self::Fair => write!(f, "Fair"),
            Self::NeedsWork => write!(f, "Needs Work"),
        }
    }
}

/// Health score breakdown with recommendations
#[derive(Debug, Clone, serde::Serialize)]
pub struct HealthScore {
    /// Savings-rate sub-score, max 40
    pub savings_score: u8,
    /// Budget-adherence sub-score, max 30
    pub budget_score: u8,
    /// Income-vs-expense sub-score, max 30
    pub cashflow_score: u8,
    /// Sum of the sub-scores, always in [0, 100]
    pub total: u8,
    pub rating: HealthRating,
    /// Current-month savings rate percent used for the savings sub-score
    pub savings_rate: f64,
    /// Ordered recommendations, in sub-score order
    pub recommendations: Vec<String>,
}

/// Score one month's financial health
///
/// `income` and `expense` are the month's grand totals; `spent_by_category`
/// is the month's expense aggregation; `budgets` is the configured budget
/// map. Pure and deterministic: same inputs, same score.
pub fn score_financial_health(
    income: Money,
    expense: Money,
    budgets: &BTreeMap<String, Money>,
    spent_by_category: &CategoryTotals,
) -> HealthScore {
    let mut recommendations = Vec::new();
    let savings = income - expense;

    // 1. Savings rate (max 40). Comparisons stay in exact integer space:
    // savings/income >= 20% iff savings*5 >= income.
    let savings_rate = if income.is_zero() {
        0.0
    } else {
        savings.minor() as f64 / income.minor() as f64 * 100.0
    };
    let savings_score = if income.is_positive() && savings.minor() * 5 >= income.minor() {
        40
    } else if income.is_positive() && savings.minor() * 10 >= income.minor() {
        25
    } else if income.is_positive() && savings.is_positive() {
        10
    } else {
        recommendations.push(
            "Increase your savings rate by reducing unnecessary expenses or increasing income."
                .to_string(),
        );
        0
    };

    // 2. Budget adherence (max 30). Total spending is measured across all
    // expense categories, so the overall budget can be blown without any
    // single budgeted category going over.
    let budget_score = if budgets.is_empty() {
        recommendations.push("Set up budgets to track your spending effectively.".to_string());
        0
    } else {
        let over = over_budget_categories(budgets, spent_by_category);
        let total_budget: Money = budgets.values().copied().sum();
        let total_spent = spent_by_category.total;

        if over.is_empty() && total_spent <= total_budget {
            30
        } else if over.is_empty() {
            recommendations.push(
                "Review your overall budget: total spending exceeded the total allocated budget."
                    .to_string(),
            );
            20
        } else {
            recommendations.push(format!("Address overspending in: {}.", over.join(", ")));
            10
        }
    };

    // 3. Income vs expenses (max 30)
    let cashflow_score = if income.is_zero() {
        if expense.is_positive() {
            recommendations.push(
                "No income recorded for this month, but expenses exist. Record your income."
                    .to_string(),
            );
        }
        0
    } else if savings.minor() * 5 >= income.minor() {
        30
    } else if savings.is_positive() {
        20
    } else if savings.is_zero() {
        recommendations.push("Aim for positive savings (income above expenses).".to_string());
        10
    } else {
        recommendations.push(
            "Your expenses exceed your income. Focus on reducing spending or increasing income."
                .to_string(),
        );
        0
    };

    let total = savings_score + budget_score + cashflow_score;

    HealthScore {
        savings_score,
        budget_score,
        cashflow_score,
        total,
        rating: HealthRating::from_score(total),
        savings_rate,
        recommendations,
    }
}

//! Monthly report composition
//!
//! Composes the month's aggregates, budget performance, trend signals, and
//! health score into one serialization-ready report object. Composition is
//! pure: it reads the snapshots it is given and touches nothing else;
//! persisting or rendering the report belongs to external collaborators.
//!
//! Serialized monetary fields are emitted in major units, matching the bulk
//! interchange schema.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::config::StatusBands;
use crate::models::{money, Money, MonthKey, Transaction};
use crate::services::aggregate::{self, CategoryTotals};
use crate::services::budget_tracker::{self, BudgetOverview};
use crate::services::health::{score_financial_health, HealthScore};
use crate::services::trend::{self, MonthComparison};
use crate::models::TransactionKind;

/// Income, expense, and savings totals for the report month
#[derive(Debug, Clone, Serialize)]
pub struct PeriodSummary {
    #[serde(serialize_with = "money::serialize_major")]
    pub total_income: Money,
    #[serde(serialize_with = "money::serialize_major")]
    pub total_expense: Money,
    #[serde(serialize_with = "money::serialize_major")]
    pub net_savings: Money,
    /// Savings rate percent, zero when income is zero
    pub savings_rate: f64,
}

/// One category (or income source) and its total for the month
#[derive(Debug, Clone, Serialize)]
pub struct CategoryAmount {
    pub category: String,
    #[serde(serialize_with = "money::serialize_major")]
    pub amount: Money,
}

/// One transaction as it appears in the report
#[derive(Debug, Clone, Serialize)]
pub struct ReportTransaction {
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category: String,
    pub description: String,
    #[serde(serialize_with = "money::serialize_major")]
    pub amount: Money,
}

impl From<&Transaction> for ReportTransaction {
    fn from(txn: &Transaction) -> Self {
        Self {
            date: txn.date,
            kind: txn.kind,
            category: txn.category.clone(),
            description: txn.description.clone(),
            amount: txn.amount,
        }
    }
}

/// The composed monthly financial report
#[derive(Debug, Clone, Serialize)]
pub struct MonthlyReport {
    /// Month covered by the report
    pub report_month: MonthKey,
    /// Reference date the report was composed for
    pub as_of: NaiveDate,
    pub summary: PeriodSummary,
    /// Income sources, largest first
    pub income_by_source: Vec<CategoryAmount>,
    /// Expense categories, largest first
    pub expenses_by_category: Vec<CategoryAmount>,
    /// The three largest expense categories
    pub top_expense_categories: Vec<CategoryAmount>,
    pub budget_performance: BudgetOverview,
    /// Expense total compared with the prior month
    pub expense_comparison: MonthComparison,
    /// Income total compared with the prior month
    pub income_comparison: MonthComparison,
    /// Flat-continuation estimate of next month's savings; absent when the
    /// month lacks income or expense signal
    #[serde(serialize_with = "money::serialize_major_opt")]
    pub projected_next_month_savings: Option<Money>,
    pub financial_health: HealthScore,
    /// Every transaction of the report month
    pub transactions: Vec<ReportTransaction>,
}

impl MonthlyReport {
    /// Compose the report for the month containing `as_of`
    pub fn compose(
        transactions: &[Transaction],
        budgets: &BTreeMap<String, Money>,
        bands: &StatusBands,
        as_of: NaiveDate,
    ) -> Self {
        let month = aggregate::current_month(as_of);
        let prior = month.prev();

        let income = aggregate::aggregate(transactions, month, TransactionKind::Income);
        let expenses = aggregate::aggregate(transactions, month, TransactionKind::Expense);
        let prior_income = aggregate::aggregate(transactions, prior, TransactionKind::Income);
        let prior_expenses = aggregate::aggregate(transactions, prior, TransactionKind::Expense);

        let net_savings = income.total - expenses.total;
        let savings_rate = if income.total.is_zero() {
            0.0
        } else {
            net_savings.minor() as f64 / income.total.minor() as f64 * 100.0
        };

        let expenses_by_category = ranked_amounts(&expenses);
        let top_expense_categories = expenses_by_category.iter().take(3).cloned().collect();

        let financial_health =
            score_financial_health(income.total, expenses.total, budgets, &expenses);

        MonthlyReport {
            report_month: month,
            as_of,
            summary: PeriodSummary {
                total_income: income.total,
                total_expense: expenses.total,
                net_savings,
                savings_rate,
            },
            income_by_source: ranked_amounts(&income),
            expenses_by_category,
            top_expense_categories,
            budget_performance: budget_tracker::overview(budgets, &expenses, bands),
            expense_comparison: trend::compare_months(expenses.total, prior_expenses.total),
            income_comparison: trend::compare_months(income.total, prior_income.total),
            projected_next_month_savings: trend::project_next_month(income.total, expenses.total),
            financial_health,
            transactions: aggregate::transactions_in_month(transactions, month)
                .iter()
                .map(ReportTransaction::from)
                .collect(),
        }
    }
}

/// Ranked category list, largest amount first
fn ranked_amounts(totals: &CategoryTotals) -> Vec<CategoryAmount> {
    totals
        .ranked()
        .into_iter()
        .map(|(category, amount)| CategoryAmount {
            category: category.to_string(),
            amount,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn txn(date: &str, kind: TransactionKind, category: &str, amount: i64) -> Transaction {
        Transaction::new(
            NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            kind,
            category,
            "test",
            Money::from_minor(amount),
        )
    }

    fn may_history() -> Vec<Transaction> {
        vec![
            txn("2024-05-01", TransactionKind::Expense, "Food", 50000),
            txn("2024-05-02", TransactionKind::Income, "Salary", 200000),
        ]
    }

    #[test]
    fn test_compose_single_month() {
        let as_of = NaiveDate::from_ymd_opt(2024, 5, 15).unwrap();
        let report = MonthlyReport::compose(
            &may_history(),
            &BTreeMap::new(),
            &StatusBands::default(),
            as_of,
        );

        assert_eq!(report.report_month, MonthKey::new(2024, 5).unwrap());
        assert_eq!(report.summary.total_income, Money::from_minor(200000));
        assert_eq!(report.summary.total_expense, Money::from_minor(50000));
        assert_eq!(report.summary.net_savings, Money::from_minor(150000));
        assert_eq!(report.summary.savings_rate, 75.0);

        assert_eq!(report.financial_health.total, 70);
        assert!(report
            .financial_health
            .recommendations
            .iter()
            .any(|r| r.contains("Set up budgets")));

        assert_eq!(report.transactions.len(), 2);
        assert_eq!(
            report.projected_next_month_savings,
            Some(Money::from_minor(150000))
        );
    }

    #[test]
    fn test_compose_no_prior_month_comparison() {
        // Prior month is empty: comparison carries no percent change.
        let as_of = NaiveDate::from_ymd_opt(2024, 5, 15).unwrap();
        let report = MonthlyReport::compose(
            &may_history(),
            &BTreeMap::new(),
            &StatusBands::default(),
            as_of,
        );

        assert_eq!(report.income_comparison.change_pct, None);
        assert_eq!(report.expense_comparison.change_pct, None);
    }

    #[test]
    fn test_top_three_expense_categories() {
        let mut history = may_history();
        history.push(txn("2024-05-03", TransactionKind::Expense, "Transport", 30000));
        history.push(txn("2024-05-04", TransactionKind::Expense, "Shopping", 40000));
        history.push(txn("2024-05-05", TransactionKind::Expense, "Bills", 20000));

        let as_of = NaiveDate::from_ymd_opt(2024, 5, 15).unwrap();
        let report =
            MonthlyReport::compose(&history, &BTreeMap::new(), &StatusBands::default(), as_of);

        assert_eq!(report.expenses_by_category.len(), 4);
        assert_eq!(report.top_expense_categories.len(), 3);
        assert_eq!(report.top_expense_categories[0].category, "Food");
        assert_eq!(report.top_expense_categories[1].category, "Shopping");
        assert_eq!(report.top_expense_categories[2].category, "Transport");
    }

    #[test]
    fn test_serializes_major_units() {
        let as_of = NaiveDate::from_ymd_opt(2024, 5, 15).unwrap();
        let report = MonthlyReport::compose(
            &may_history(),
            &BTreeMap::new(),
            &StatusBands::default(),
            as_of,
        );

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["report_month"], "2024-05");
        assert_eq!(json["summary"]["total_income"], 2000.0);
        assert_eq!(json["summary"]["net_savings"], 1500.0);
        assert_eq!(json["transactions"][0]["amount"], 500.0);
        assert_eq!(json["transactions"][0]["type"], "expense");
    }
}

//! Daily financial check
//!
//! A snapshot for one calendar day: spending recorded on that day, an
//! estimated daily budget (total monthly budget spread evenly over the
//! month's days), and alerts for budgeted categories nearing their monthly
//! limit. Pure over loaded snapshots; the reference date is always explicit.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{money, Money, MonthKey, Transaction, TransactionKind};

use super::aggregate;
use super::budget_tracker::utilization;

/// Utilization percent at which a category triggers a near-limit alert
pub const ALERT_UTILIZATION_PCT: f64 = 80.0;

/// A budgeted category close to or past its monthly limit
#[derive(Debug, Clone, Serialize)]
pub struct SpendingAlert {
    pub category: String,
    /// Month-to-date utilization percent of the category budget
    pub utilization: f64,
}

/// One day's financial check
#[derive(Debug, Clone, Serialize)]
pub struct DailyCheck {
    /// Day the check covers
    pub date: NaiveDate,
    /// Expenses recorded on that day
    #[serde(serialize_with = "money::serialize_major")]
    pub todays_spending: Money,
    /// Total monthly budget spread over the month's days; absent when no
    /// budgets are configured
    #[serde(serialize_with = "money::serialize_major_opt")]
    pub daily_budget: Option<Money>,
    /// Daily budget minus today's spending
    #[serde(serialize_with = "money::serialize_major_opt")]
    pub remaining_daily_budget: Option<Money>,
    /// Near-limit categories in name order
    pub alerts: Vec<SpendingAlert>,
}

/// Sum of expenses recorded on exactly one day
pub fn todays_spending(transactions: &[Transaction], date: NaiveDate) -> Money {
    transactions
        .iter()
        .filter(|txn| txn.kind == TransactionKind::Expense && txn.date == date)
        .map(|txn| txn.amount)
        .sum()
}

/// Even-split daily budget for the month containing `date`
///
/// Integer floor division in minor units; None when no budgets exist.
pub fn daily_budget(budgets: &BTreeMap<String, Money>, date: NaiveDate) -> Option<Money> {
    if budgets.is_empty() {
        return None;
    }
    let total: Money = budgets.values().copied().sum();
    let days = MonthKey::containing(date).days_in_month();
    Some(Money::from_minor(total.minor() / days as i64))
}

/// Budgeted categories at or above the alert threshold this month
pub fn spending_alerts(
    budgets: &BTreeMap<String, Money>,
    spent: &aggregate::CategoryTotals,
) -> Vec<SpendingAlert> {
    budgets
        .iter()
        .filter_map(|(category, budget)| {
            let pct = utilization(spent.get(category), *budget);
            (pct >= ALERT_UTILIZATION_PCT).then(|| SpendingAlert {
                category: category.clone(),
                utilization: pct,
            })
        })
        .collect()
}

/// Compose the daily check for one reference date
pub fn daily_check(
    transactions: &[Transaction],
    budgets: &BTreeMap<String, Money>,
    date: NaiveDate,
) -> DailyCheck {
    let spending = todays_spending(transactions, date);
    let budget = daily_budget(budgets, date);
    let month = MonthKey::containing(date);
    let spent = aggregate::aggregate(transactions, month, TransactionKind::Expense);

    DailyCheck {
        date,
        todays_spending: spending,
        daily_budget: budget,
        remaining_daily_budget: budget.map(|b| b - spending),
        alerts: spending_alerts(budgets, &spent),
    }
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

    #[test]
    fn test_todays_spending_filters_day_and_kind() {
        let history = vec![
            txn("2024-05-15", TransactionKind::Expense, "Food", 3000),
            txn("2024-05-15", TransactionKind::Expense, "Transport", 1000),
            txn("2024-05-15", TransactionKind::Income, "Salary", 200000),
            txn("2024-05-14", TransactionKind::Expense, "Food", 9999),
        ];
        let date = NaiveDate::from_ymd_opt(2024, 5, 15).unwrap();
        assert_eq!(todays_spending(&history, date), Money::from_minor(4000));
    }

    #[test]
    fn test_daily_budget_even_split() {
        let budgets = BTreeMap::from([
            ("Food".to_string(), Money::from_minor(62000)),
            ("Transport".to_string(), Money::from_minor(31000)),
        ]);
        // May has 31 days: 93000 / 31 = 3000
        let date = NaiveDate::from_ymd_opt(2024, 5, 15).unwrap();
        assert_eq!(daily_budget(&budgets, date), Some(Money::from_minor(3000)));

        assert_eq!(daily_budget(&BTreeMap::new(), date), None);
    }

    #[test]
    fn test_spending_alerts_threshold() {
        let budgets = BTreeMap::from([
            ("Food".to_string(), Money::from_minor(10000)),
            ("Transport".to_string(), Money::from_minor(10000)),
            ("Shopping".to_string(), Money::from_minor(10000)),
        ]);
        let mut spent = aggregate::CategoryTotals::default();
        for (category, amount) in [("Food", 8000), ("Transport", 7999), ("Shopping", 12000)] {
            spent
                .by_category
                .insert(category.to_string(), Money::from_minor(amount));
            spent.total += Money::from_minor(amount);
        }

        let alerts = spending_alerts(&budgets, &spent);
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].category, "Food");
        assert_eq!(alerts[0].utilization, 80.0);
        assert_eq!(alerts[1].category, "Shopping");
        assert_eq!(alerts[1].utilization, 120.0);
    }

    #[test]
    fn test_daily_check_composes() {
        let history = vec![
            txn("2024-05-15", TransactionKind::Expense, "Food", 2000),
            txn("2024-05-10", TransactionKind::Expense, "Food", 8000),
        ];
        let budgets = BTreeMap::from([("Food".to_string(), Money::from_minor(10000))]);
        let date = NaiveDate::from_ymd_opt(2024, 5, 15).unwrap();

        let check = daily_check(&history, &budgets, date);
        assert_eq!(check.todays_spending, Money::from_minor(2000));
        // 10000 / 31 days
        assert_eq!(check.daily_budget, Some(Money::from_minor(322)));
        assert_eq!(check.remaining_daily_budget, Some(Money::from_minor(-1678)));
        // Month-to-date Food spend is 10000 of 10000
        assert_eq!(check.alerts.len(), 1);
        assert_eq!(check.alerts[0].utilization, 100.0);
    }

    #[test]
    fn test_daily_check_without_budgets() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 15).unwrap();
        let check = daily_check(&[], &BTreeMap::new(), date);
        assert_eq!(check.todays_spending, Money::zero());
        assert_eq!(check.daily_budget, None);
        assert_eq!(check.remaining_daily_budget, None);
        assert!(check.alerts.is_empty());
    }
}

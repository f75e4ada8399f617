//! Period aggregation
//!
//! Sums transaction amounts by category over one calendar month. All
//! arithmetic is exact integer minor units; the grand total always equals the
//! sum of the per-category totals.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::{Money, MonthKey, Transaction, TransactionKind};

/// Per-category totals for one month and kind, plus their exact sum
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryTotals {
    /// Category -> summed amount, ordered by category name
    pub by_category: BTreeMap<String, Money>,
    /// Exact sum of all per-category totals
    pub total: Money,
}

impl CategoryTotals {
    /// Amount for one category, zero if absent
    pub fn get(&self, category: &str) -> Money {
        self.by_category.get(category).copied().unwrap_or_default()
    }

    /// Categories sorted by amount, largest first
    pub fn ranked(&self) -> Vec<(&str, Money)> {
        let mut ranked: Vec<(&str, Money)> = self
            .by_category
            .iter()
            .map(|(category, amount)| (category.as_str(), *amount))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
    }
}

/// Sum amounts by category for one month, filtered to one transaction kind
pub fn aggregate(
    transactions: &[Transaction],
    month: MonthKey,
    kind: TransactionKind,
) -> CategoryTotals {
    let mut totals = CategoryTotals::default();

    for txn in transactions {
        if txn.kind == kind && month.contains(txn.date) {
            *totals
                .by_category
                .entry(txn.category.clone())
                .or_insert_with(Money::zero) += txn.amount;
            totals.total += txn.amount;
        }
    }

    totals
}

/// The month containing the reference date
pub fn current_month(as_of: NaiveDate) -> MonthKey {
    MonthKey::containing(as_of)
}

/// The calendar month immediately preceding the reference date's month
///
/// Computed with exact calendar arithmetic; January rolls to the prior
/// December.
pub fn last_month(as_of: NaiveDate) -> MonthKey {
    MonthKey::containing(as_of).prev()
}

/// The `n` most recent calendar months up to the reference date's month,
/// oldest first
///
/// Uses exact month stepping, never fixed day offsets.
pub fn trailing_months(as_of: NaiveDate, n: usize) -> Vec<MonthKey> {
    let current = MonthKey::containing(as_of);
    (0..n)
        .rev()
        .map(|i| current.minus_months(i as u32))
        .collect()
}

/// Transactions falling inside one month, in stored order
pub fn transactions_in_month(transactions: &[Transaction], month: MonthKey) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|txn| month.contains(txn.date))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn txn(date: &str, kind: TransactionKind, category: &str, amount: i64) -> Transaction {
        Transaction::new(
            NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            kind,
            category,
            "test",
            Money::from_minor(amount),
        )
    }

    fn sample_history() -> Vec<Transaction> {
        vec![
            txn("2024-05-01", TransactionKind::Expense, "Food", 50000),
            txn("2024-05-10", TransactionKind::Expense, "Food", 25000),
            txn("2024-05-12", TransactionKind::Expense, "Transport", 10000),
            txn("2024-05-02", TransactionKind::Income, "Salary", 200000),
            txn("2024-04-20", TransactionKind::Expense, "Food", 99999),
        ]
    }

    #[test]
    fn test_aggregate_filters_month_and_kind() {
        let may = MonthKey::new(2024, 5).unwrap();
        let totals = aggregate(&sample_history(), may, TransactionKind::Expense);

        assert_eq!(totals.get("Food"), Money::from_minor(75000));
        assert_eq!(totals.get("Transport"), Money::from_minor(10000));
        assert_eq!(totals.get("Salary"), Money::zero());
        assert_eq!(totals.total, Money::from_minor(85000));
    }

    #[test]
    fn test_grand_total_equals_category_sum() {
        let may = MonthKey::new(2024, 5).unwrap();
        for kind in [TransactionKind::Expense, TransactionKind::Income] {
            let totals = aggregate(&sample_history(), may, kind);
            let sum: Money = totals.by_category.values().copied().sum();
            assert_eq!(sum, totals.total);
        }
    }

    #[test]
    fn test_ranked_orders_by_amount_descending() {
        let may = MonthKey::new(2024, 5).unwrap();
        let totals = aggregate(&sample_history(), may, TransactionKind::Expense);
        let ranked = totals.ranked();
        assert_eq!(ranked[0].0, "Food");
        assert_eq!(ranked[1].0, "Transport");
    }

    #[test]
    fn test_last_month_january_rollover() {
        let jan = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(last_month(jan), MonthKey::new(2023, 12).unwrap());
    }

    #[test]
    fn test_trailing_months_exact_stepping() {
        let as_of = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
        let months = trailing_months(as_of, 4);
        assert_eq!(
            months,
            vec![
                MonthKey::new(2023, 12).unwrap(),
                MonthKey::new(2024, 1).unwrap(),
                MonthKey::new(2024, 2).unwrap(),
                MonthKey::new(2024, 3).unwrap(),
            ]
        );
    }

    #[test]
    fn test_transactions_in_month() {
        let may = MonthKey::new(2024, 5).unwrap();
        let in_may = transactions_in_month(&sample_history(), may);
        assert_eq!(in_may.len(), 4);
    }
}

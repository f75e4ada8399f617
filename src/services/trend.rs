//! Trend and projection
//!
//! Builds a monthly income/expense series from the full transaction history,
//! derives the savings trend over the most recent calendar months, and makes
//! a naive flat-continuation projection for the next month.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::{Money, MonthKey, Transaction, TransactionKind};

use super::aggregate::trailing_months;

/// Income and expense totals for one month
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MonthFlow {
    pub income: Money,
    pub expense: Money,
}

impl MonthFlow {
    /// Net savings: income − expense
    pub fn savings(&self) -> Money {
        self.income - self.expense
    }

    /// Savings rate percent, zero when income is zero
    pub fn savings_rate(&self) -> f64 {
        if self.income.is_zero() {
            0.0
        } else {
            self.savings().minor() as f64 / self.income.minor() as f64 * 100.0
        }
    }
}

/// Aggregate the full history into per-month income/expense totals
pub fn monthly_flows(transactions: &[Transaction]) -> BTreeMap<MonthKey, MonthFlow> {
    let mut flows: BTreeMap<MonthKey, MonthFlow> = BTreeMap::new();

    for txn in transactions {
        let flow = flows.entry(MonthKey::containing(txn.date)).or_default();
        match txn.kind {
            TransactionKind::Income => flow.income += txn.amount,
            TransactionKind::Expense => flow.expense += txn.amount,
        }
    }

    flows
}

/// One month of the savings trend
#[derive(Debug, Clone, serde::Serialize)]
pub struct TrendPoint {
    pub month: MonthKey,
    #[serde(serialize_with = "crate::models::money::serialize_major")]
    pub income: Money,
    #[serde(serialize_with = "crate::models::money::serialize_major")]
    pub expense: Money,
    #[serde(serialize_with = "crate::models::money::serialize_major")]
    pub savings: Money,
    pub savings_rate: f64,
}

/// Savings trend over the `n` most recent calendar months, oldest first
///
/// Months without activity appear as zero rows. Months are stepped with
/// exact calendar arithmetic, never with fixed 30-day offsets.
pub fn savings_trend(transactions: &[Transaction], as_of: NaiveDate, n: usize) -> Vec<TrendPoint> {
    let flows = monthly_flows(transactions);

    trailing_months(as_of, n)
        .into_iter()
        .map(|month| {
            let flow = flows.get(&month).copied().unwrap_or_default();
            TrendPoint {
                month,
                income: flow.income,
                expense: flow.expense,
                savings: flow.savings(),
                savings_rate: flow.savings_rate(),
            }
        })
        .collect()
}

/// Month-over-month comparison of one total
#[derive(Debug, Clone, serde::Serialize)]
pub struct MonthComparison {
    #[serde(serialize_with = "crate::models::money::serialize_major")]
    pub current: Money,
    #[serde(serialize_with = "crate::models::money::serialize_major")]
    pub previous: Money,
    /// Percent change from previous to current; None when there is no
    /// previous-month record to compare against
    pub change_pct: Option<f64>,
}

/// Compare a current-month total against the prior month's
pub fn compare_months(current: Money, previous: Money) -> MonthComparison {
    let change_pct = if previous.is_zero() {
        None
    } else {
        Some((current - previous).minor() as f64 / previous.minor() as f64 * 100.0)
    };

    MonthComparison {
        current,
        previous,
        change_pct,
    }
}

/// Flat-continuation estimate of next month's savings
///
/// Returns None when either current-month income or expense is exactly zero:
/// a single-sided month is not enough signal to project from.
pub fn project_next_month(current_income: Money, current_expense: Money) -> Option<Money> {
    if current_income.is_zero() || current_expense.is_zero() {
        None
    } else {
        Some(current_income - current_expense)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn txn(date: &str, kind: TransactionKind, amount: i64) -> Transaction {
        Transaction::new(
            NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            kind,
            "Cat",
            "test",
            Money::from_minor(amount),
        )
    }

    #[test]
    fn test_monthly_flows() {
        let history = vec![
            txn("2024-03-10", TransactionKind::Income, 100000),
            txn("2024-03-15", TransactionKind::Expense, 40000),
            txn("2024-04-01", TransactionKind::Expense, 5000),
        ];

        let flows = monthly_flows(&history);
        let march = flows[&MonthKey::new(2024, 3).unwrap()];
        assert_eq!(march.income, Money::from_minor(100000));
        assert_eq!(march.expense, Money::from_minor(40000));
        assert_eq!(march.savings(), Money::from_minor(60000));
        assert_eq!(march.savings_rate(), 60.0);

        let april = flows[&MonthKey::new(2024, 4).unwrap()];
        assert_eq!(april.income, Money::zero());
        assert_eq!(april.savings_rate(), 0.0);
    }

    #[test]
    fn test_savings_trend_oldest_first_with_gaps() {
        let history = vec![
            txn("2024-01-10", TransactionKind::Income, 100000),
            txn("2024-03-10", TransactionKind::Income, 200000),
            txn("2024-03-12", TransactionKind::Expense, 50000),
        ];
        let as_of = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();

        let trend = savings_trend(&history, as_of, 3);
        assert_eq!(trend.len(), 3);
        assert_eq!(trend[0].month, MonthKey::new(2024, 1).unwrap());
        assert_eq!(trend[1].month, MonthKey::new(2024, 2).unwrap());
        assert_eq!(trend[2].month, MonthKey::new(2024, 3).unwrap());

        // February has no activity
        assert_eq!(trend[1].income, Money::zero());
        assert_eq!(trend[1].savings_rate, 0.0);

        assert_eq!(trend[2].savings, Money::from_minor(150000));
        assert_eq!(trend[2].savings_rate, 75.0);
    }

    #[test]
    fn test_compare_months_no_previous_record() {
        // Last month had nothing recorded: no percent change, no
        // divide-by-zero.
        let cmp = compare_months(Money::from_minor(100000), Money::zero());
        assert_eq!(cmp.change_pct, None);

        let cmp = compare_months(Money::from_minor(120000), Money::from_minor(100000));
        assert_eq!(cmp.change_pct, Some(20.0));
    }

    #[test]
    fn test_project_next_month() {
        assert_eq!(
            project_next_month(Money::from_minor(100000), Money::from_minor(40000)),
            Some(Money::from_minor(60000))
        );
        assert_eq!(project_next_month(Money::zero(), Money::from_minor(40000)), None);
        assert_eq!(project_next_month(Money::from_minor(100000), Money::zero()), None);
    }
}

//! End-to-end flows through storage, services, and report composition.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tempfile::TempDir;

use pocketledger::config::{LedgerPaths, StatusBands};
use pocketledger::models::{Money, MonthKey, Transaction, TransactionKind};
use pocketledger::reports::MonthlyReport;
use pocketledger::services::{aggregate, budget_tracker, trend, ImportService};
use pocketledger::storage::{validate_storage, Storage};

fn storage(dir: &TempDir) -> Storage {
    Storage::new(LedgerPaths::with_base_dir(dir.path().to_path_buf()))
}

fn record(storage: &Storage, date: &str, kind: TransactionKind, category: &str, minor: i64) {
    let txn = Transaction::new(
        NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        kind,
        category,
        "flow test",
        Money::from_minor(minor),
    );
    storage.transactions.append(&txn).unwrap();
}

#[test]
fn monthly_report_from_persisted_records() {
    let dir = TempDir::new().unwrap();
    let storage = storage(&dir);

    record(&storage, "2024-05-01", TransactionKind::Expense, "Food", 50000);
    record(&storage, "2024-05-02", TransactionKind::Income, "Salary", 200000);
    // Prior month for the comparison
    record(&storage, "2024-04-15", TransactionKind::Expense, "Food", 40000);

    let transactions = storage.transactions.load().unwrap();
    let budgets = storage.budgets.load().unwrap();
    let as_of = NaiveDate::from_ymd_opt(2024, 5, 20).unwrap();

    let report = MonthlyReport::compose(&transactions, &budgets, &StatusBands::default(), as_of);

    assert_eq!(report.report_month, MonthKey::new(2024, 5).unwrap());
    assert_eq!(report.summary.net_savings, Money::from_minor(150000));
    assert_eq!(report.summary.savings_rate, 75.0);
    assert_eq!(report.financial_health.total, 70);
    assert_eq!(report.expense_comparison.change_pct, Some(25.0));
    assert_eq!(
        report.projected_next_month_savings,
        Some(Money::from_minor(150000))
    );
}

#[test]
fn budget_utilization_over_scenario() {
    let dir = TempDir::new().unwrap();
    let storage = storage(&dir);

    storage.budgets.append("Food", Money::from_minor(10000)).unwrap();
    record(&storage, "2024-05-03", TransactionKind::Expense, "Food", 12000);

    let budgets = storage.budgets.load().unwrap();
    let transactions = storage.transactions.load().unwrap();
    let spent = aggregate::aggregate(
        &transactions,
        MonthKey::new(2024, 5).unwrap(),
        TransactionKind::Expense,
    );

    let overview = budget_tracker::overview(&budgets, &spent, &StatusBands::default());
    assert_eq!(overview.categories[0].utilization, 120.0);
    assert_eq!(
        overview.categories[0].status,
        budget_tracker::BudgetStatus::OverBudget
    );
}

#[test]
fn comparison_against_empty_prior_month() {
    let dir = TempDir::new().unwrap();
    let storage = storage(&dir);

    record(&storage, "2024-05-02", TransactionKind::Income, "Salary", 200000);

    let transactions = storage.transactions.load().unwrap();
    let may = MonthKey::new(2024, 5).unwrap();
    let income = aggregate::aggregate(&transactions, may, TransactionKind::Income);
    let prior = aggregate::aggregate(&transactions, may.prev(), TransactionKind::Income);

    let cmp = trend::compare_months(income.total, prior.total);
    assert_eq!(cmp.change_pct, None);
    assert_eq!(cmp.current, Money::from_minor(200000));
}

#[test]
fn import_is_idempotent_against_storage() {
    let dir = TempDir::new().unwrap();
    let storage = storage(&dir);

    let csv = "date,type,category,description,amount\n\
               2024-05-01,expense,Food,Lunch,500.00\n\
               2024-05-02,income,Salary,Pay,2000.00\n";

    let first = ImportService::new(&storage).import_csv(csv.as_bytes()).unwrap();
    assert_eq!(first.imported, 2);

    let second = ImportService::new(&storage).import_csv(csv.as_bytes()).unwrap();
    assert_eq!(second.imported, 0);
    assert_eq!(second.duplicates, 2);

    assert_eq!(storage.transactions.load().unwrap().len(), 2);
}

#[test]
fn malformed_lines_silently_dropped_but_reported_by_validation() {
    let dir = TempDir::new().unwrap();
    let storage = storage(&dir);

    record(&storage, "2024-05-01", TransactionKind::Expense, "Food", 50000);
    storage.transactions.append_raw("garbage line").unwrap();
    storage.transactions.append_raw("2024-05-02,expense,Food,Ok,100").unwrap();

    // Bulk load keeps only the parsable records
    assert_eq!(storage.transactions.load().unwrap().len(), 2);

    // Strict validation names the bad line
    let report = validate_storage(&storage).unwrap();
    assert_eq!(report.issue_count(), 1);
    assert_eq!(report.files[0].issues[0].line_number, 2);
}

#[test]
fn settings_bands_flow_into_scoring_inputs() {
    // A custom warning threshold shifts the banding everywhere it is used
    let bands = StatusBands {
        warning_pct: 50.0,
        over_pct: 100.0,
    };
    let budgets = BTreeMap::from([("Food".to_string(), Money::from_minor(10000))]);
    let mut spent = aggregate::CategoryTotals::default();
    spent
        .by_category
        .insert("Food".to_string(), Money::from_minor(6000));
    spent.total = Money::from_minor(6000);

    let overview = budget_tracker::overview(&budgets, &spent, &bands);
    assert_eq!(
        overview.categories[0].status,
        budget_tracker::BudgetStatus::Warning
    );
}

//! Report, trend, and health CLI commands

use chrono::NaiveDate;
use tabled::{settings::Style, Table, Tabled};

use crate::config::Settings;
use crate::error::{LedgerError, LedgerResult};
use crate::export::export_report_json;
use crate::models::{MonthKey, TransactionKind};
use crate::reports::MonthlyReport;
use crate::services::{aggregate, assistant, health, trend};
use crate::storage::Storage;

use super::resolve_as_of;

#[derive(Tabled)]
struct TrendRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Income")]
    income: String,
    #[tabled(rename = "Expense")]
    expense: String,
    #[tabled(rename = "Savings")]
    savings: String,
    #[tabled(rename = "Rate")]
    rate: String,
}

/// Compose and print the monthly report
pub fn handle_report(
    storage: &Storage,
    settings: &Settings,
    month: Option<String>,
    json: bool,
) -> LedgerResult<()> {
    let as_of = resolve_as_of(month.as_deref())?;
    let transactions = storage.transactions.load()?;
    let budgets = storage.budgets.load()?;

    let report = MonthlyReport::compose(&transactions, &budgets, &settings.status_bands, as_of);

    if json {
        let mut stdout = std::io::stdout().lock();
        export_report_json(&report, &mut stdout, true)?;
        println!();
        return Ok(());
    }

    let symbol = &settings.currency_symbol;
    println!("Monthly Report: {}", report.report_month.label());
    println!("{}", "=".repeat(48));
    println!(
        "Income:   {}",
        report.summary.total_income.format_with_symbol(symbol)
    );
    println!(
        "Expenses: {}",
        report.summary.total_expense.format_with_symbol(symbol)
    );
    println!(
        "Savings:  {} ({:.1}%)",
        report.summary.net_savings.format_with_symbol(symbol),
        report.summary.savings_rate,
    );
    println!();

    if !report.top_expense_categories.is_empty() {
        println!("Top expense categories:");
        for entry in &report.top_expense_categories {
            println!(
                "  {:<20} {}",
                entry.category,
                entry.amount.format_with_symbol(symbol)
            );
        }
        println!();
    }

    if !report.budget_performance.is_empty() {
        println!(
            "Budget: {} of {} used ({:.1}%), {}",
            report.budget_performance.total_spent.format_with_symbol(symbol),
            report.budget_performance.total_budget.format_with_symbol(symbol),
            report.budget_performance.overall_utilization,
            report.budget_performance.overall_status,
        );
    }

    print_comparison("Income", &report.income_comparison, symbol);
    print_comparison("Expenses", &report.expense_comparison, symbol);

    if let Some(projected) = report.projected_next_month_savings {
        println!(
            "Projected next-month savings: {}",
            projected.format_with_symbol(symbol)
        );
    }

    println!();
    print_health(&report.financial_health);
    Ok(())
}

fn print_comparison(label: &str, cmp: &trend::MonthComparison, symbol: &str) {
    match cmp.change_pct {
        Some(pct) => println!(
            "{} vs last month: {} -> {} ({:+.1}%)",
            label,
            cmp.previous.format_with_symbol(symbol),
            cmp.current.format_with_symbol(symbol),
            pct,
        ),
        None => println!(
            "{} vs last month: no prior-month record to compare against",
            label
        ),
    }
}

/// Print the savings trend over recent months
pub fn handle_trend(
    storage: &Storage,
    settings: &Settings,
    months: Option<usize>,
) -> LedgerResult<()> {
    let as_of = resolve_as_of(None)?;
    let n = months.unwrap_or(settings.trend_months);
    let transactions = storage.transactions.load()?;

    let points = trend::savings_trend(&transactions, as_of, n);
    let symbol = &settings.currency_symbol;

    let rows: Vec<TrendRow> = points
        .iter()
        .map(|p| TrendRow {
            month: p.month.label(),
            income: p.income.format_with_symbol(symbol),
            expense: p.expense.format_with_symbol(symbol),
            savings: p.savings.format_with_symbol(symbol),
            rate: format!("{:.1}%", p.savings_rate),
        })
        .collect();

    println!("{}", Table::new(rows).with(Style::sharp()));
    Ok(())
}

/// Score and print financial health for a month
pub fn handle_health(storage: &Storage, month: Option<String>) -> LedgerResult<()> {
    let as_of = resolve_as_of(month.as_deref())?;
    let key = MonthKey::containing(as_of);

    let transactions = storage.transactions.load()?;
    let budgets = storage.budgets.load()?;

    let income = aggregate::aggregate(&transactions, key, TransactionKind::Income);
    let expenses = aggregate::aggregate(&transactions, key, TransactionKind::Expense);
    let score = health::score_financial_health(income.total, expenses.total, &budgets, &expenses);

    println!("Financial health for {}", key.label());
    print_health(&score);
    Ok(())
}

/// Print the daily financial check
pub fn handle_check(
    storage: &Storage,
    settings: &Settings,
    date: Option<String>,
) -> LedgerResult<()> {
    let date = match date {
        Some(raw) => NaiveDate::parse_from_str(&raw, &settings.date_format)
            .map_err(|_| LedgerError::Validation(format!("invalid date '{}'", raw)))?,
        None => chrono::Local::now().date_naive(),
    };

    let transactions = storage.transactions.load()?;
    let budgets = storage.budgets.load()?;
    let check = assistant::daily_check(&transactions, &budgets, date);

    let symbol = &settings.currency_symbol;
    println!("Daily Financial Check: {}", date.format("%Y-%m-%d"));
    println!(
        "Today's spending: {}",
        check.todays_spending.format_with_symbol(symbol)
    );
    match (check.daily_budget, check.remaining_daily_budget) {
        (Some(budget), Some(remaining)) => {
            println!(
                "Estimated daily budget: {}",
                budget.format_with_symbol(symbol)
            );
            println!(
                "Remaining daily budget: {}",
                remaining.format_with_symbol(symbol)
            );
        }
        _ => println!("No budgets set. Set budgets to get daily estimates."),
    }

    if check.alerts.is_empty() {
        println!("No active alerts.");
    } else {
        println!("Active alerts:");
        for alert in &check.alerts {
            println!(
                "  - High budget utilization for '{}': {:.1}% used",
                alert.category, alert.utilization
            );
        }
    }
    Ok(())
}

fn print_health(score: &health::HealthScore) {
    println!(
        "Health score: {}/100 ({}) [savings {}/40, budget {}/30, cashflow {}/30]",
        score.total, score.rating, score.savings_score, score.budget_score, score.cashflow_score,
    );
    for recommendation in &score.recommendations {
        println!("  - {}", recommendation);
    }
}

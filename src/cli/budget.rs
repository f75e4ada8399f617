//! Budget CLI commands

use clap::Subcommand;
use tabled::{settings::Style, Table, Tabled};

use crate::config::Settings;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Money, MonthKey, TransactionKind};
use crate::services::{aggregate, budget_tracker};
use crate::storage::Storage;

use super::resolve_as_of;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Set the monthly budget for a category
    Set {
        /// Category name
        category: String,
        /// Monthly amount in major units, e.g. "400" or "400.00"
        amount: String,
    },

    /// Show budget performance for a month
    List {
        /// Month to report on (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },
}

#[derive(Tabled)]
struct BudgetRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Budget")]
    budget: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Remaining")]
    remaining: String,
    #[tabled(rename = "Used")]
    utilization: String,
    #[tabled(rename = "Status")]
    status: String,
}

/// Handle a budget command
pub fn handle_budget_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BudgetCommands,
) -> LedgerResult<()> {
    match cmd {
        BudgetCommands::Set { category, amount } => {
            let amount = Money::parse_major(&amount)
                .map_err(|_| LedgerError::invalid_amount(amount.clone()))?;
            storage.budgets.append(&category, amount)?;
            println!(
                "Budget for '{}' set to {} per month",
                category,
                amount.format_with_symbol(&settings.currency_symbol),
            );
            Ok(())
        }
        BudgetCommands::List { month } => list(storage, settings, month),
    }
}

fn list(storage: &Storage, settings: &Settings, month: Option<String>) -> LedgerResult<()> {
    let as_of = resolve_as_of(month.as_deref())?;
    let key = MonthKey::containing(as_of);

    let budgets = storage.budgets.load()?;
    if budgets.is_empty() {
        println!("No budgets configured. Set one with 'budget set <category> <amount>'.");
        return Ok(());
    }

    let transactions = storage.transactions.load()?;
    let spent = aggregate::aggregate(&transactions, key, TransactionKind::Expense);
    let overview = budget_tracker::overview(&budgets, &spent, &settings.status_bands);

    let symbol = &settings.currency_symbol;
    let rows: Vec<BudgetRow> = overview
        .categories
        .iter()
        .map(|row| BudgetRow {
            category: row.category.clone(),
            budget: row.budget.format_with_symbol(symbol),
            spent: row.spent.format_with_symbol(symbol),
            remaining: row.remaining.format_with_symbol(symbol),
            utilization: format!("{:.1}%", row.utilization),
            status: row.status.to_string(),
        })
        .collect();

    println!("Budget performance for {}", key.label());
    println!("{}", Table::new(rows).with(Style::sharp()));
    println!(
        "Total: {} of {} ({:.1}%), {}",
        overview.total_spent.format_with_symbol(symbol),
        overview.total_budget.format_with_symbol(symbol),
        overview.overall_utilization,
        overview.overall_status,
    );
    Ok(())
}

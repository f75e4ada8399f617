//! Transaction CLI commands

use chrono::NaiveDate;
use clap::{Args, Subcommand};
use tabled::{settings::Style, Table, Tabled};

use crate::config::Settings;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Money, Transaction, TransactionKind};
use crate::storage::Storage;

use super::resolve_as_of;

/// Shared arguments for recording an entry
#[derive(Args)]
pub struct EntryArgs {
    /// Category (income source or spending category)
    pub category: String,

    /// Amount in major units, e.g. "500" or "500.00"
    pub amount: String,

    /// Free-text description
    #[arg(short, long, default_value = "")]
    pub description: String,

    /// Entry date (YYYY-MM-DD), defaults to today
    #[arg(short = 'D', long)]
    pub date: Option<String>,
}

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record an income entry
    Income(EntryArgs),

    /// Record an expense entry
    Expense(EntryArgs),

    /// List recorded transactions
    List {
        /// Limit the listing to one month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,

        /// Number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Type")]
    kind: &'static str,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TransactionCommands,
) -> LedgerResult<()> {
    match cmd {
        TransactionCommands::Income(args) => record(storage, settings, TransactionKind::Income, args),
        TransactionCommands::Expense(args) => {
            record(storage, settings, TransactionKind::Expense, args)
        }
        TransactionCommands::List { month, limit } => list(storage, settings, month, limit),
    }
}

fn record(
    storage: &Storage,
    settings: &Settings,
    kind: TransactionKind,
    args: EntryArgs,
) -> LedgerResult<()> {
    let date = match args.date {
        Some(raw) => NaiveDate::parse_from_str(&raw, &settings.date_format)
            .map_err(|_| LedgerError::Validation(format!("invalid date '{}'", raw)))?,
        None => chrono::Local::now().date_naive(),
    };

    // Boundary conversion: the CLI takes major units
    let amount = Money::parse_major(&args.amount)
        .map_err(|_| LedgerError::invalid_amount(args.amount.clone()))?;

    let txn = Transaction::new(date, kind, args.category, args.description, amount);
    storage.transactions.append(&txn)?;

    println!(
        "Recorded {} of {} in '{}' on {}",
        kind,
        amount.format_with_symbol(&settings.currency_symbol),
        txn.category,
        date.format("%Y-%m-%d"),
    );
    Ok(())
}

fn list(
    storage: &Storage,
    settings: &Settings,
    month: Option<String>,
    limit: usize,
) -> LedgerResult<()> {
    let transactions = storage.transactions.load()?;

    let key = match &month {
        Some(_) => Some(crate::models::MonthKey::containing(resolve_as_of(
            month.as_deref(),
        )?)),
        None => None,
    };

    let total = transactions
        .iter()
        .filter(|txn| key.map_or(true, |k| k.contains(txn.date)))
        .count();
    if total == 0 {
        println!("No transactions found.");
        return Ok(());
    }

    let recent = recent_first(&transactions, key, limit);
    let rows: Vec<TransactionRow> = recent
        .iter()
        .map(|txn| TransactionRow {
            date: txn.date.format("%Y-%m-%d").to_string(),
            kind: txn.kind.as_str(),
            category: txn.category.clone(),
            description: txn.description.clone(),
            amount: txn.amount.format_with_symbol(&settings.currency_symbol),
        })
        .collect();

    println!("{}", Table::new(rows).with(Style::sharp()));
    if recent.len() < total {
        println!("Showing {} of {} transactions.", recent.len(), total);
    }
    Ok(())
}

/// The most recent transactions first, optionally limited to one month
///
/// Ties on the same date keep their stored order.
fn recent_first(
    transactions: &[Transaction],
    month: Option<crate::models::MonthKey>,
    limit: usize,
) -> Vec<&Transaction> {
    let mut filtered: Vec<&Transaction> = transactions
        .iter()
        .filter(|txn| month.map_or(true, |k| k.contains(txn.date)))
        .collect();
    filtered.sort_by(|a, b| b.date.cmp(&a.date));
    filtered.truncate(limit);
    filtered
}

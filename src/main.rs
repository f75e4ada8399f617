use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use pocketledger::cli::{
    handle_budget_command, handle_check, handle_export, handle_goal_command, handle_health,
    handle_import, handle_report, handle_transaction_command, handle_trend, handle_validate,
    ExportFormat,
};
use pocketledger::config::{LedgerPaths, Settings};
use pocketledger::storage::Storage;

#[derive(Parser)]
#[command(
    name = "pocketledger",
    version,
    about = "Plain-text personal finance ledger with budget and health analytics",
    long_about = "PocketLedger keeps income and expense records in plain-text files \
                  and derives monthly aggregates, budget performance, savings trends, \
                  and a financial health score from them."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Record and list transactions
    #[command(subcommand, alias = "txn")]
    Transaction(pocketledger::cli::TransactionCommands),

    /// Manage monthly category budgets
    #[command(subcommand)]
    Budget(pocketledger::cli::BudgetCommands),

    /// Manage savings goals
    #[command(subcommand)]
    Goal(pocketledger::cli::GoalCommands),

    /// Compose the monthly financial report
    Report {
        /// Month to report on (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the savings trend over recent months
    Trend {
        /// Number of months to include
        #[arg(short, long)]
        months: Option<usize>,
    },

    /// Run the daily financial check
    Check {
        /// Day to check (YYYY-MM-DD), defaults to today
        #[arg(short = 'D', long)]
        date: Option<String>,
    },

    /// Score financial health for a month
    Health {
        /// Month to score (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Import transactions from an interchange CSV file
    Import {
        /// Path to the CSV file
        file: PathBuf,
    },

    /// Export all transactions
    Export {
        /// Output format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: ExportFormat,
        /// Output file, stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check every record file and report malformed lines
    Validate,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = LedgerPaths::new()?;
    paths.ensure_directories()?;
    let settings = Settings::load_or_create(&paths)?;

    let storage = Storage::new(paths.clone());

    match cli.command {
        Some(Commands::Transaction(cmd)) => {
            handle_transaction_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Budget(cmd)) => {
            handle_budget_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Goal(cmd)) => {
            handle_goal_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Report { month, json }) => {
            handle_report(&storage, &settings, month, json)?;
        }
        Some(Commands::Trend { months }) => {
            handle_trend(&storage, &settings, months)?;
        }
        Some(Commands::Check { date }) => {
            handle_check(&storage, &settings, date)?;
        }
        Some(Commands::Health { month }) => {
            handle_health(&storage, month)?;
        }
        Some(Commands::Import { file }) => {
            handle_import(&storage, file)?;
        }
        Some(Commands::Export { format, output }) => {
            handle_export(&storage, format, output)?;
        }
        Some(Commands::Validate) => {
            handle_validate(&storage)?;
        }
        Some(Commands::Config) => {
            println!("PocketLedger Configuration");
            println!("==========================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Data directory: {}", paths.data_dir().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
            println!(
                "  Status bands:    warning at {}%, over at {}%",
                settings.status_bands.warning_pct, settings.status_bands.over_pct
            );
            println!("  Trend months:    {}", settings.trend_months);
        }
        None => {
            println!("PocketLedger - plain-text personal finance ledger");
            println!();
            println!("Run 'pocketledger --help' for usage information.");
        }
    }

    Ok(())
}

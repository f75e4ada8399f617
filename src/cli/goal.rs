//! Goal CLI commands

use clap::Subcommand;
use tabled::{settings::Style, Table, Tabled};

use crate::config::Settings;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Goal, Money};
use crate::services::goals;
use crate::storage::Storage;

/// Goal subcommands
#[derive(Subcommand)]
pub enum GoalCommands {
    /// Set a savings goal
    Set {
        /// Goal name, e.g. "Emergency Fund"
        name: String,
        /// Target amount in major units
        target: String,
    },

    /// List goals with progress
    List,
}

#[derive(Tabled)]
struct GoalRow {
    #[tabled(rename = "Goal")]
    name: String,
    #[tabled(rename = "Target")]
    target: String,
    #[tabled(rename = "Saved")]
    saved: String,
    #[tabled(rename = "Progress")]
    percent: String,
}

/// Handle a goal command
pub fn handle_goal_command(
    storage: &Storage,
    settings: &Settings,
    cmd: GoalCommands,
) -> LedgerResult<()> {
    match cmd {
        GoalCommands::Set { name, target } => {
            let target = Money::parse_major(&target)
                .map_err(|_| LedgerError::invalid_amount(target.clone()))?;
            let goal = Goal::new(name, target);
            storage.goals.append(&goal)?;
            println!(
                "Goal '{}' set with a target of {}",
                goal.name,
                target.format_with_symbol(&settings.currency_symbol),
            );
            Ok(())
        }
        GoalCommands::List => list(storage, settings),
    }
}

fn list(storage: &Storage, settings: &Settings) -> LedgerResult<()> {
    let stored = storage.goals.load()?;
    if stored.is_empty() {
        println!("No goals set. Create one with 'goal set <name> <target>'.");
        return Ok(());
    }

    let transactions = storage.transactions.load()?;
    let progress = goals::goal_progress(&transactions, &stored);

    let symbol = &settings.currency_symbol;
    let rows: Vec<GoalRow> = progress
        .iter()
        .map(|p| GoalRow {
            name: p.name.clone(),
            target: p.target.format_with_symbol(symbol),
            saved: p.saved.format_with_symbol(symbol),
            percent: format!("{:.1}%", p.percent),
        })
        .collect();

    println!("{}", Table::new(rows).with(Style::sharp()));
    Ok(())
}

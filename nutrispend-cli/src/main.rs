//! NutriSpend CLI - Food expense tracking in your terminal

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod notifier;
mod output;

use commands::{add, delete, list, reminder, smart_add, status, summary, theme, watch};

/// NutriSpend - track what you spend on food
#[derive(Parser)]
#[command(name = "ns", version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show expense history, most recent first
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Log an expense (prompts for anything not given)
    Add {
        /// What was bought
        #[arg(long)]
        description: Option<String>,
        /// Amount spent
        #[arg(long)]
        amount: Option<String>,
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
        /// Food, Drink, Snack, Grocery, Dining Out or Other
        #[arg(long)]
        category: Option<String>,
        /// Output as JSON; needs --description and --amount, category defaults to Food
        #[arg(long)]
        json: bool,
    },

    /// Log expenses described in plain language
    SmartAdd {
        /// e.g. "coffee 4.50 and a sandwich for 9 yesterday"
        text: String,
        /// Save proposals without asking
        #[arg(long, short)]
        yes: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete an expense by ID
    Delete {
        /// Expense ID
        id: String,
        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },

    /// Show the 30-day spend summary
    Summary {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage the daily reminder
    Reminder {
        #[command(subcommand)]
        command: Option<reminder::ReminderCommands>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run the reminder loop until interrupted
    Watch {
        /// Seconds between checks (defaults to the configured interval)
        #[arg(long)]
        interval: Option<u64>,
    },

    /// Show or set the theme preference
    Theme {
        /// light, dark or system
        theme: Option<String>,
    },

    /// Show backend, record count and reminder state
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (warn)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::List { json } => list::run(json).await,
        Commands::Add {
            description,
            amount,
            date,
            category,
            json,
        } => add::run(description, amount, date, category, json).await,
        Commands::SmartAdd { text, yes, json } => smart_add::run(&text, yes, json).await,
        Commands::Delete { id, force } => delete::run(&id, force).await,
        Commands::Summary { json } => summary::run(json).await,
        Commands::Reminder { command, json } => reminder::run(command, json).await,
        Commands::Watch { interval } => watch::run(interval).await,
        Commands::Theme { theme } => theme::run(theme).await,
        Commands::Status { json } => status::run(json).await,
    }
}

//! CLI argument definitions using clap
//!
//! This module contains the clap structs and enums for parsing CLI arguments.
//! The command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Pennywise - Track expenses and forecast next month's spending
#[derive(Parser)]
#[command(name = "pennywise")]
#[command(about = "Self-hosted personal expense tracker", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "pennywise.db", global = true)]
    pub db: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable database encryption (not recommended for real data)
    ///
    /// By default, the database is encrypted using SQLCipher.
    /// Set PENNYWISE_DB_KEY environment variable with your passphrase.
    #[arg(long, global = true)]
    pub no_encrypt: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Record an expense
    Add {
        /// Amount spent (e.g. 12.50)
        amount: String,

        /// Category: Food, Rent, Travel, Entertainment, Bills, Other
        #[arg(short, long)]
        category: String,

        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Optional note
        #[arg(short, long)]
        note: Option<String>,
    },

    /// Change an expense (unspecified fields keep their current value)
    Edit {
        /// Expense ID
        id: i64,

        #[arg(short, long)]
        amount: Option<String>,

        #[arg(short, long)]
        category: Option<String>,

        #[arg(short, long)]
        date: Option<String>,

        /// New note (pass an empty string to clear it)
        #[arg(short, long)]
        note: Option<String>,
    },

    /// Delete an expense
    Delete {
        /// Expense ID
        id: i64,
    },

    /// Show one expense
    Show {
        /// Expense ID
        id: i64,
    },

    /// List expenses
    List {
        /// Only this category
        #[arg(short, long)]
        category: Option<String>,

        /// Start date (YYYY-MM-DD, inclusive)
        #[arg(long)]
        from: Option<String>,

        /// End date (YYYY-MM-DD, inclusive)
        #[arg(long)]
        to: Option<String>,

        /// Match text in the note or category
        #[arg(short, long)]
        search: Option<String>,

        /// Sort by: date, amount, category
        #[arg(long, default_value = "date")]
        sort: String,

        /// Sort order: asc, desc
        #[arg(long, default_value = "desc")]
        order: String,

        /// Maximum rows to print
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show or change budget settings
    Budget {
        #[command(subcommand)]
        action: Option<BudgetAction>,
    },

    /// Spending reports
    Report {
        #[command(subcommand)]
        report: ReportType,
    },

    /// Show dashboard summary
    Dashboard {
        /// Months averaged for the forecast
        #[arg(long, default_value = "3")]
        window: usize,
    },

    /// Export expenses to a file
    Export {
        /// Month to export (YYYY-MM, or "all"; defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,

        /// Output format: csv, json
        #[arg(short, long, default_value = "csv")]
        format: String,

        /// Output file (defaults to expenses_YYYY-MM.<format>)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Disable authentication (for local development only)
        ///
        /// WARNING: Do not use this flag when exposing the server to a network.
        /// By default, the server requires a bearer key from PENNYWISE_API_KEYS.
        #[arg(long)]
        no_auth: bool,

        /// Directory containing static files to serve (e.g., ui/dist)
        #[arg(long)]
        static_dir: Option<PathBuf>,

        /// Months averaged for the forecast
        #[arg(long, default_value = "3")]
        forecast_window: usize,
    },
}

#[derive(Subcommand)]
pub enum BudgetAction {
    /// Replace the budget settings
    Set {
        /// Monthly income
        #[arg(long)]
        income: String,

        /// Monthly savings goal
        #[arg(long)]
        goal: String,
    },
}

#[derive(Subcommand)]
pub enum ReportType {
    /// Spending by category
    Categories {
        /// Period: this-month, last-month, this-year, last-30-days, last-90-days, last-12-months, all
        #[arg(short, long, default_value = "this-month")]
        period: String,

        /// Custom start date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// Custom end date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
    },

    /// Spending over time
    Trends {
        /// Granularity: daily, weekly, monthly
        #[arg(short, long, default_value = "monthly")]
        granularity: String,

        /// Period: this-month, last-month, this-year, last-30-days, last-90-days, last-12-months, all
        #[arg(short, long, default_value = "last-12-months")]
        period: String,

        #[arg(long)]
        from: Option<String>,

        #[arg(long)]
        to: Option<String>,
    },

    /// Forecast next month's spending
    Forecast {
        /// Months averaged
        #[arg(short, long, default_value = "3")]
        window: usize,

        /// Also forecast each category
        #[arg(long)]
        by_category: bool,
    },

    /// Recent monthly totals with the forecast month
    Trend {
        /// Months averaged for the forecast
        #[arg(short, long, default_value = "3")]
        window: usize,
    },
}

//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands`
//! module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Outlay - Track spending and spot recurring charges
#[derive(Parser)]
#[command(name = "outlay")]
#[command(about = "Self-hosted personal expense tracker", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "outlay.db", global = true)]
    pub db: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable database encryption (not recommended for production)
    ///
    /// By default, the database is encrypted using SQLCipher.
    /// Set OUTLAY_DB_KEY environment variable with your passphrase.
    /// Use --no-encrypt only for development or testing.
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
        /// Amount spent
        #[arg(short, long)]
        amount: f64,

        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Category label (e.g. Groceries)
        #[arg(short, long)]
        category: Option<String>,

        /// Free-text note
        #[arg(short, long)]
        note: Option<String>,
    },

    /// Expense commands
    Expenses {
        #[command(subcommand)]
        action: Option<ExpensesAction>,
    },

    /// Income commands
    Income {
        #[command(subcommand)]
        action: Option<IncomeAction>,
    },

    /// Suggest implicitly recurring expenses
    Detect {
        /// Minimum day gap between charges (inclusive)
        #[arg(long)]
        min_gap: Option<i64>,

        /// Maximum day gap between charges (inclusive)
        #[arg(long)]
        max_gap: Option<i64>,

        /// Maximum relative amount difference (inclusive)
        #[arg(long)]
        max_ratio: Option<f64>,

        /// Amount band width for bucketing
        #[arg(long)]
        bucket_width: Option<f64>,

        /// Cadence preset: weekly (default window) or monthly.
        /// Cannot be combined with --config.
        #[arg(long, conflicts_with = "config")]
        preset: Option<String>,

        /// Detector config override file (TOML)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show the dashboard summary
    Summary {
        /// Period: this-month, last-month, all
        #[arg(short, long, default_value = "this-month")]
        period: String,

        /// Custom period start (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// Custom period end (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,

        /// Emit the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Budget commands
    Budgets {
        #[command(subcommand)]
        action: Option<BudgetsAction>,
    },

    /// Recurring rule commands
    Rules {
        #[command(subcommand)]
        action: Option<RulesAction>,
    },

    /// Subscription commands
    Subscriptions {
        #[command(subcommand)]
        action: Option<SubscriptionsAction>,
    },

    /// Delete all records
    Reset {
        /// Skip confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum ExpensesAction {
    /// List expenses, newest first
    List {
        /// Maximum number to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
    /// Delete an expense
    Delete {
        /// Expense id
        id: String,
    },
}

#[derive(Subcommand)]
pub enum IncomeAction {
    /// Record an income
    Add {
        /// Amount received
        #[arg(short, long)]
        amount: f64,

        /// Income kind: salary, bonus, other
        #[arg(short, long, default_value = "other")]
        kind: String,

        /// Date received (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Free-text note
        #[arg(short, long)]
        note: Option<String>,
    },
    /// List incomes, newest first
    List,
}

#[derive(Subcommand)]
pub enum BudgetsAction {
    /// List budgets for a month with spent-vs-limit progress
    List {
        /// Month 1-12 (defaults to current)
        #[arg(short, long)]
        month: Option<u32>,

        /// Year (defaults to current)
        #[arg(short, long)]
        year: Option<i32>,
    },
    /// Set (or update) a category budget
    Set {
        /// Category label
        category: String,

        /// Monthly limit
        limit: f64,

        /// Month 1-12 (defaults to current)
        #[arg(short, long)]
        month: Option<u32>,

        /// Year (defaults to current)
        #[arg(short, long)]
        year: Option<i32>,
    },
}

#[derive(Subcommand)]
pub enum RulesAction {
    /// List recurring rules
    List {
        /// Include inactive rules
        #[arg(long)]
        all: bool,
    },
    /// Add a recurring rule
    Add {
        /// Rule label (also used as the expense category)
        label: String,

        /// Cadence: daily, weekly, monthly, custom
        #[arg(short, long)]
        frequency: String,

        /// Default amount for created expenses
        #[arg(short, long)]
        amount: Option<f64>,

        /// Weekly: weekday 1-7 (Mon-Sun); monthly: day of month 1-31
        #[arg(long)]
        on: Option<u32>,

        /// Create expenses automatically when due
        #[arg(long)]
        auto_create: bool,
    },
    /// Create expenses for all due auto-create rules
    Apply,
    /// Deactivate a rule
    Deactivate {
        /// Rule id
        id: String,
    },
}

#[derive(Subcommand)]
pub enum SubscriptionsAction {
    /// List subscriptions
    List,
    /// Add a subscription
    Add {
        /// Subscription name
        name: String,

        /// Billing frequency: monthly, quarterly, yearly, custom
        #[arg(short, long, default_value = "monthly")]
        frequency: String,

        /// Billing amount
        #[arg(short, long)]
        amount: Option<f64>,

        /// Start date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        start: Option<String>,

        /// First billing date (YYYY-MM-DD)
        #[arg(long)]
        next_billing: Option<String>,

        /// Days before billing the reminder window opens
        #[arg(long, default_value = "3")]
        reminder_days: i64,
    },
    /// Show subscriptions whose reminder window is open
    Due,
    /// Advance a subscription's next billing date by one period
    Advance {
        /// Subscription id
        id: String,
    },
    /// Update a subscription's status: active, paused, cancelled
    Status {
        /// Subscription id
        id: String,

        /// New status
        status: String,
    },
}

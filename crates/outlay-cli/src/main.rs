//! Outlay CLI - Personal expense tracker
//!
//! Usage:
//!   outlay init                   Initialize database
//!   outlay add --amount 42.50     Record an expense
//!   outlay detect                 Suggest implicitly recurring expenses
//!   outlay summary                Show the dashboard summary

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db, cli.no_encrypt),
        Commands::Add {
            amount,
            date,
            category,
            note,
        } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_add(&db, amount, date.as_deref(), category, note)
        }
        Commands::Expenses { action } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            match action {
                None => commands::cmd_expenses_list(&db, 20),
                Some(ExpensesAction::List { limit }) => commands::cmd_expenses_list(&db, limit),
                Some(ExpensesAction::Delete { id }) => commands::cmd_expenses_delete(&db, &id),
            }
        }
        Commands::Income { action } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            match action {
                None | Some(IncomeAction::List) => commands::cmd_income_list(&db),
                Some(IncomeAction::Add {
                    amount,
                    kind,
                    date,
                    note,
                }) => commands::cmd_income_add(&db, amount, &kind, date.as_deref(), note),
            }
        }
        Commands::Detect {
            min_gap,
            max_gap,
            max_ratio,
            bucket_width,
            preset,
            config,
        } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_detect(
                &db,
                commands::DetectOverrides {
                    min_gap,
                    max_gap,
                    max_ratio,
                    bucket_width,
                    preset,
                    config,
                },
            )
        }
        Commands::Summary {
            period,
            from,
            to,
            json,
        } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            let (from_date, to_date) =
                commands::resolve_period(&period, from.as_deref(), to.as_deref())?;
            commands::cmd_summary(&db, from_date, to_date, json)
        }
        Commands::Budgets { action } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            match action {
                None => commands::cmd_budgets_list(&db, None, None),
                Some(BudgetsAction::List { month, year }) => {
                    commands::cmd_budgets_list(&db, month, year)
                }
                Some(BudgetsAction::Set {
                    category,
                    limit,
                    month,
                    year,
                }) => commands::cmd_budgets_set(&db, &category, limit, month, year),
            }
        }
        Commands::Rules { action } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            match action {
                None => commands::cmd_rules_list(&db, false),
                Some(RulesAction::List { all }) => commands::cmd_rules_list(&db, all),
                Some(RulesAction::Add {
                    label,
                    frequency,
                    amount,
                    on,
                    auto_create,
                }) => commands::cmd_rules_add(&db, &label, &frequency, amount, on, auto_create),
                Some(RulesAction::Apply) => commands::cmd_rules_apply(&db),
                Some(RulesAction::Deactivate { id }) => commands::cmd_rules_deactivate(&db, &id),
            }
        }
        Commands::Subscriptions { action } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            match action {
                None | Some(SubscriptionsAction::List) => commands::cmd_subscriptions_list(&db),
                Some(SubscriptionsAction::Add {
                    name,
                    frequency,
                    amount,
                    start,
                    next_billing,
                    reminder_days,
                }) => commands::cmd_subscriptions_add(
                    &db,
                    &name,
                    &frequency,
                    amount,
                    start.as_deref(),
                    next_billing.as_deref(),
                    reminder_days,
                ),
                Some(SubscriptionsAction::Due) => commands::cmd_subscriptions_due(&db),
                Some(SubscriptionsAction::Advance { id }) => {
                    commands::cmd_subscriptions_advance(&db, &id)
                }
                Some(SubscriptionsAction::Status { id, status }) => {
                    commands::cmd_subscriptions_status(&db, &id, &status)
                }
            }
        }
        Commands::Reset { yes } => commands::cmd_reset(&cli.db, yes, cli.no_encrypt),
    }
}

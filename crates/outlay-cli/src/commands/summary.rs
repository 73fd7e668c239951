//! Dashboard summary command and period resolution

use anyhow::{bail, Context, Result};
use chrono::{Datelike, NaiveDate, Utc};
use outlay_core::db::Database;
use outlay_core::summary;

/// Resolve a period name (or custom from/to dates) into an optional window
///
/// "all" yields an unbounded window on both sides.
pub fn resolve_period(
    period: &str,
    custom_from: Option<&str>,
    custom_to: Option<&str>,
) -> Result<(Option<NaiveDate>, Option<NaiveDate>)> {
    // If custom dates provided, use those
    if custom_from.is_some() || custom_to.is_some() {
        let from = custom_from
            .map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
            .transpose()
            .context("Invalid --from date format (use YYYY-MM-DD)")?;
        let to = custom_to
            .map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
            .transpose()
            .context("Invalid --to date format (use YYYY-MM-DD)")?;
        return Ok((from, to));
    }

    let today = Utc::now().date_naive();

    match period.to_lowercase().as_str() {
        "this-month" => {
            let from = NaiveDate::from_ymd_opt(today.year(), today.month(), 1)
                .expect("Day 1 always valid");
            Ok((Some(from), Some(today)))
        }
        "last-month" => {
            let first_of_this = NaiveDate::from_ymd_opt(today.year(), today.month(), 1)
                .expect("Day 1 always valid");
            let last_day = first_of_this.pred_opt().context("Date out of range")?;
            let from = NaiveDate::from_ymd_opt(last_day.year(), last_day.month(), 1)
                .expect("Day 1 always valid");
            Ok((Some(from), Some(last_day)))
        }
        "all" => Ok((None, None)),
        _ => bail!("Unknown period '{}' (valid: this-month, last-month, all)", period),
    }
}

pub fn cmd_summary(
    db: &Database,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    json: bool,
) -> Result<()> {
    let expenses = db.list_expenses(from, to)?;
    let incomes = db.list_incomes(from, to)?;
    let rules = db.list_rules(true)?;

    let dashboard = summary::summarize(&expenses, &incomes, &rules);

    if json {
        println!("{}", serde_json::to_string_pretty(&dashboard)?);
        return Ok(());
    }

    let window = match (from, to) {
        (Some(f), Some(t)) => format!("{} to {}", f, t),
        (Some(f), None) => format!("from {}", f),
        (None, Some(t)) => format!("until {}", t),
        (None, None) => "all time".to_string(),
    };

    println!();
    println!("📊 Summary ({})", window);
    println!("   ─────────────────────────────");
    println!("   Spent:    ${:.2}", dashboard.total_spent);
    println!("   Income:   ${:.2}", dashboard.total_income);
    println!("   Net:      ${:.2}", dashboard.net);
    println!(
        "   Recurring (projected monthly): ${:.2}",
        dashboard.projected_recurring_monthly
    );

    if !dashboard.categories.is_empty() {
        println!();
        println!("   By category:");
        for cat in &dashboard.categories {
            println!("     {:<20} ${:.2}", cat.label, cat.amount);
        }
    }

    if !dashboard.spent_trend.is_empty() {
        println!();
        println!("   Daily trend:");
        for point in &dashboard.spent_trend {
            println!("     {} │ ${:.2}", point.date, point.spent);
        }
    }

    Ok(())
}

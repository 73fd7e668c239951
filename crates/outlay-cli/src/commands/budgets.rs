//! Budget command implementations

use anyhow::Result;
use chrono::{Datelike, NaiveDate, Utc};
use outlay_core::db::Database;
use outlay_core::summary;

/// Fill in the current month/year where flags were omitted
fn resolve_month(month: Option<u32>, year: Option<i32>) -> (u32, i32) {
    let today = Utc::now().date_naive();
    (month.unwrap_or(today.month()), year.unwrap_or(today.year()))
}

pub fn cmd_budgets_set(
    db: &Database,
    category: &str,
    limit: f64,
    month: Option<u32>,
    year: Option<i32>,
) -> Result<()> {
    let (month, year) = resolve_month(month, year);
    let budget = db.upsert_budget(category, limit, month, year)?;

    println!(
        "✅ Budget set: {} │ ${:.2}/month │ {}-{:02}",
        budget.category_label, budget.monthly_limit, budget.year, budget.month
    );
    Ok(())
}

pub fn cmd_budgets_list(db: &Database, month: Option<u32>, year: Option<i32>) -> Result<()> {
    let (month, year) = resolve_month(month, year);
    let budgets = db.list_budgets(month, year)?;

    if budgets.is_empty() {
        println!("No budgets for {}-{:02}. Set one with:", year, month);
        println!("  outlay budgets set Groceries 300");
        return Ok(());
    }

    // Progress only needs this month's expenses
    let from = NaiveDate::from_ymd_opt(year, month, 1);
    let to = from.and_then(|d| {
        d.checked_add_months(chrono::Months::new(1))
            .and_then(|next| next.pred_opt())
    });
    let expenses = db.list_expenses(from, to)?;
    let progress = summary::budget_progress(&budgets, &expenses);

    println!();
    println!("💰 Budgets for {}-{:02}", year, month);
    println!("   ─────────────────────────────────────────────");

    for status in progress {
        let marker = if status.remaining < 0.0 { "🔴" } else { "🟢" };
        println!(
            "   {} {:<20} ${:.2} of ${:.2} (${:.2} left)",
            marker,
            status.category_label,
            status.spent,
            status.monthly_limit,
            status.remaining
        );
    }

    Ok(())
}

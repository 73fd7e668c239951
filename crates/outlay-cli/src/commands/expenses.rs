//! Expense command implementations

use anyhow::{Context, Result};
use chrono::Utc;
use outlay_core::db::Database;
use outlay_core::models::NewExpense;
use outlay_core::validate;

use super::truncate;

pub fn cmd_add(
    db: &Database,
    amount: f64,
    date: Option<&str>,
    category: Option<String>,
    note: Option<String>,
) -> Result<()> {
    let date = match date {
        Some(s) => validate::parse_date(s).context("Invalid --date format (use YYYY-MM-DD)")?,
        None => Utc::now().date_naive(),
    };

    let expense = db.insert_expense(NewExpense {
        date,
        amount,
        category_label: category,
        note,
        ..Default::default()
    })?;

    println!(
        "✅ Recorded expense: {} │ ${:.2} │ {}",
        expense.date,
        expense.amount,
        expense.category_label.as_deref().unwrap_or("(uncategorized)")
    );
    Ok(())
}

pub fn cmd_expenses_list(db: &Database, limit: usize) -> Result<()> {
    let expenses = db.list_expenses(None, None)?;

    if expenses.is_empty() {
        println!("No expenses found. Record one with:");
        println!("  outlay add --amount 42.50 --category Groceries");
        return Ok(());
    }

    println!();
    println!("📝 Recent Expenses");
    println!("   ─────────────────────────────────────────────────────────────");

    for expense in expenses.iter().take(limit) {
        let category = expense.category_label.as_deref().unwrap_or("-");
        let note = expense.note.as_deref().unwrap_or("");

        println!(
            "   [{}] {} │ {:>9} │ {:<16} │ {}",
            truncate(&expense.id, 8),
            expense.date,
            format!("${:.2}", expense.amount),
            truncate(category, 16),
            truncate(note, 30)
        );
    }

    if expenses.len() > limit {
        println!();
        println!("   Showing {} of {} expenses.", limit, expenses.len());
    }

    Ok(())
}

pub fn cmd_expenses_delete(db: &Database, id: &str) -> Result<()> {
    let expense = db.get_expense(id).context("Expense not found")?;
    db.delete_expense(id)?;

    println!(
        "✅ Deleted expense: {} │ ${:.2} │ {}",
        expense.date,
        expense.amount,
        expense.category_label.as_deref().unwrap_or("(uncategorized)")
    );
    Ok(())
}

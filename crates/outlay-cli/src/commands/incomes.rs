//! Income command implementations

use anyhow::{Context, Result};
use chrono::Utc;
use outlay_core::db::Database;
use outlay_core::models::{IncomeKind, NewIncome};
use outlay_core::validate;

use super::truncate;

pub fn cmd_income_add(
    db: &Database,
    amount: f64,
    kind: &str,
    date: Option<&str>,
    note: Option<String>,
) -> Result<()> {
    let kind: IncomeKind = kind
        .parse()
        .map_err(|e: String| anyhow::anyhow!("{} (valid kinds: salary, bonus, other)", e))?;
    let date_received = match date {
        Some(s) => validate::parse_date(s).context("Invalid --date format (use YYYY-MM-DD)")?,
        None => Utc::now().date_naive(),
    };

    let income = db.insert_income(NewIncome {
        amount,
        kind,
        date_received,
        note,
    })?;

    println!(
        "✅ Recorded income: {} │ ${:.2} │ {}",
        income.date_received, income.amount, income.kind
    );
    Ok(())
}

pub fn cmd_income_list(db: &Database) -> Result<()> {
    let incomes = db.list_incomes(None, None)?;

    if incomes.is_empty() {
        println!("No incomes found. Record one with:");
        println!("  outlay income add --amount 3000 --kind salary");
        return Ok(());
    }

    println!();
    println!("💰 Incomes");
    println!("   ─────────────────────────────────────────────────────────────");

    for income in &incomes {
        let note = income.note.as_deref().unwrap_or("");
        println!(
            "   [{}] {} │ {:>10} │ {:<8} │ {}",
            truncate(&income.id, 8),
            income.date_received,
            format!("+${:.2}", income.amount),
            income.kind,
            truncate(note, 30)
        );
    }

    Ok(())
}

//! Recurring rule command implementations

use anyhow::Result;
use chrono::Utc;
use outlay_core::db::Database;
use outlay_core::models::{NewRecurringRule, RuleFrequency};
use outlay_core::schedule;

use super::truncate;

pub fn cmd_rules_add(
    db: &Database,
    label: &str,
    frequency: &str,
    amount: Option<f64>,
    on: Option<u32>,
    auto_create: bool,
) -> Result<()> {
    let frequency: RuleFrequency = frequency
        .parse()
        .map_err(|e: String| anyhow::anyhow!("{} (valid: daily, weekly, monthly, custom)", e))?;

    let rule = db.insert_rule(NewRecurringRule {
        label: label.to_string(),
        default_amount: amount,
        unit: None,
        frequency,
        weekday_or_day: on,
        auto_create,
    })?;

    println!("✅ Rule added: {} │ {}", rule.label, rule.frequency);
    if auto_create {
        println!("   Expenses will be created when due. Run 'outlay rules apply'.");
    }
    Ok(())
}

pub fn cmd_rules_list(db: &Database, all: bool) -> Result<()> {
    let rules = db.list_rules(!all)?;

    if rules.is_empty() {
        println!("No recurring rules. Add one with:");
        println!("  outlay rules add Milk --frequency weekly --amount 40");
        return Ok(());
    }

    println!();
    println!("🔁 Recurring Rules");
    println!("   ─────────────────────────────────────────────");

    for rule in &rules {
        let amount = rule
            .default_amount
            .map(|a| format!("${:.2}", a))
            .unwrap_or_else(|| "-".to_string());
        let state = if !rule.active {
            "inactive"
        } else if rule.auto_create {
            "auto"
        } else {
            "manual"
        };

        println!(
            "   [{}] {:<20} │ {:<8} │ {:>9} │ {}",
            truncate(&rule.id, 8),
            truncate(&rule.label, 20),
            rule.frequency,
            amount,
            state
        );
    }

    Ok(())
}

pub fn cmd_rules_apply(db: &Database) -> Result<()> {
    let today = Utc::now().date_naive();
    let created = schedule::apply_due_rules(db, today)?;

    if created == 0 {
        println!("✅ Nothing due. No expenses created.");
    } else {
        println!("✅ Created {} expenses from due rules.", created);
    }
    Ok(())
}

pub fn cmd_rules_deactivate(db: &Database, id: &str) -> Result<()> {
    let rule = db.get_rule(id)?;
    db.set_rule_active(id, false)?;

    println!("✅ Deactivated rule: {}", rule.label);
    println!("   It will no longer create expenses or count toward projections.");
    Ok(())
}

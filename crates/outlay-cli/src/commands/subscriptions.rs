//! Subscription command implementations

use anyhow::{Context, Result};
use chrono::Utc;
use outlay_core::db::Database;
use outlay_core::models::{BillingFrequency, NewSubscription, SubscriptionStatus};
use outlay_core::schedule;
use outlay_core::validate;

use super::truncate;

pub fn cmd_subscriptions_add(
    db: &Database,
    name: &str,
    frequency: &str,
    amount: Option<f64>,
    start: Option<&str>,
    next_billing: Option<&str>,
    reminder_days: i64,
) -> Result<()> {
    let frequency: BillingFrequency = frequency
        .parse()
        .map_err(|e: String| anyhow::anyhow!("{} (valid: monthly, quarterly, yearly, custom)", e))?;
    let start_date = match start {
        Some(s) => validate::parse_date(s).context("Invalid --start date format (use YYYY-MM-DD)")?,
        None => Utc::now().date_naive(),
    };
    let next_billing_date = next_billing
        .map(validate::parse_date)
        .transpose()
        .context("Invalid --next-billing date format (use YYYY-MM-DD)")?;

    let sub = db.insert_subscription(NewSubscription {
        name: name.to_string(),
        start_date,
        frequency,
        amount,
        next_billing_date,
        reminder_days,
    })?;

    println!("✅ Subscription added: {} │ {}", sub.name, sub.frequency);
    if let Some(next) = sub.next_billing_date {
        println!("   Next billing: {}", next);
    }
    Ok(())
}

pub fn cmd_subscriptions_list(db: &Database) -> Result<()> {
    let subs = db.list_subscriptions(None)?;

    if subs.is_empty() {
        println!("No subscriptions. Add one with:");
        println!("  outlay subscriptions add Streamflix --amount 15 --next-billing 2026-09-01");
        return Ok(());
    }

    println!();
    println!("📺 Subscriptions");
    println!("   ─────────────────────────────────────────────");

    for sub in &subs {
        let amount = sub
            .amount
            .map(|a| format!("${:.2}", a))
            .unwrap_or_else(|| "-".to_string());
        let next = sub
            .next_billing_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());

        println!(
            "   [{}] {:<20} │ {:<9} │ {:>9} │ next {} │ {}",
            truncate(&sub.id, 8),
            truncate(&sub.name, 20),
            sub.frequency,
            amount,
            next,
            sub.status
        );
    }

    Ok(())
}

pub fn cmd_subscriptions_due(db: &Database) -> Result<()> {
    let today = Utc::now().date_naive();
    let subs = db.list_subscriptions(Some(SubscriptionStatus::Active))?;
    let due: Vec<_> = subs
        .iter()
        .filter(|s| schedule::reminder_window_open(s, today))
        .collect();

    if due.is_empty() {
        println!("✅ No subscriptions billing soon.");
        return Ok(());
    }

    println!();
    println!("⏰ Billing soon");
    println!("   ─────────────────────────────────────────────");

    for sub in due {
        let amount = sub
            .amount
            .map(|a| format!("${:.2}", a))
            .unwrap_or_else(|| "-".to_string());
        // reminder_window_open guarantees a next billing date
        let next = sub
            .next_billing_date
            .map(|d| d.to_string())
            .unwrap_or_default();

        println!("   {:<20} │ {:>9} │ bills {}", truncate(&sub.name, 20), amount, next);
    }

    Ok(())
}

pub fn cmd_subscriptions_advance(db: &Database, id: &str) -> Result<()> {
    let sub = db.get_subscription(id).context("Subscription not found")?;

    match schedule::advance_subscription(db, id)? {
        Some(next) => println!("✅ {} advanced. Next billing: {}", sub.name, next),
        None => println!("⚠️  {} has a custom billing cadence; nothing to advance.", sub.name),
    }
    Ok(())
}

pub fn cmd_subscriptions_status(db: &Database, id: &str, status: &str) -> Result<()> {
    let status: SubscriptionStatus = status
        .parse()
        .map_err(|e: String| anyhow::anyhow!("{} (valid: active, paused, cancelled)", e))?;

    let sub = db.get_subscription(id).context("Subscription not found")?;
    db.update_subscription_status(id, status)?;

    println!("✅ {} is now {}.", sub.name, status);
    Ok(())
}

//! Recurring-charge detection command

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{bail, Result};
use outlay_core::db::Database;
use outlay_core::detect::{DetectorConfig, RecurrenceDetector};

use super::truncate;

/// Detector knobs collected from CLI flags
pub struct DetectOverrides {
    pub min_gap: Option<i64>,
    pub max_gap: Option<i64>,
    pub max_ratio: Option<f64>,
    pub bucket_width: Option<f64>,
    pub preset: Option<String>,
    pub config: Option<PathBuf>,
}

pub fn cmd_detect(db: &Database, overrides: DetectOverrides) -> Result<()> {
    println!("🔍 Scanning expenses for recurring charges...");

    if overrides.preset.is_some() && overrides.config.is_some() {
        bail!("--preset and --config cannot be combined; a preset replaces the config file");
    }

    let mut config = match overrides.preset.as_deref() {
        Some("monthly") => {
            println!("   Cadence preset: monthly (~30 days ± 5)");
            DetectorConfig::monthly()
        }
        Some("weekly") | None => DetectorConfig::load(overrides.config.as_deref())?,
        Some(other) => bail!("Unknown preset '{}' (valid: weekly, monthly)", other),
    };

    // Individual flags win over preset and config file
    if let Some(v) = overrides.min_gap {
        config.min_gap_days = v;
    }
    if let Some(v) = overrides.max_gap {
        config.max_gap_days = v;
    }
    if let Some(v) = overrides.max_ratio {
        config.max_amount_ratio = v;
    }
    if let Some(v) = overrides.bucket_width {
        config.amount_bucket_width = v;
    }
    config.validate()?;

    println!(
        "   Window: {}-{} days, ratio ≤ {:.2}, band {:.0}",
        config.min_gap_days, config.max_gap_days, config.max_amount_ratio, config.amount_bucket_width
    );

    let expenses = db.list_expenses(None, None)?;
    let recurring = RecurrenceDetector::with_config(config).detect(&expenses);

    if recurring.is_empty() {
        println!();
        println!("✅ No recurring charges detected.");
        return Ok(());
    }

    // Group flagged expenses by category for readable output
    let mut by_category: HashMap<&str, Vec<&outlay_core::models::Expense>> = HashMap::new();
    for expense in expenses.iter().filter(|e| recurring.contains(&e.id)) {
        let label = expense.category_label.as_deref().unwrap_or("(uncategorized)");
        by_category.entry(label).or_default().push(expense);
    }
    let mut categories: Vec<_> = by_category.into_iter().collect();
    categories.sort_by_key(|(label, _)| *label);

    println!();
    println!("📊 Likely recurring charges ({} expenses)", recurring.len());
    println!("   ─────────────────────────────────────────────");

    for (label, mut group) in categories {
        group.sort_by_key(|e| e.date);
        println!("   {}", label);
        for expense in group {
            println!(
                "     [{}] {} │ {:>9}",
                truncate(&expense.id, 8),
                expense.date,
                format!("${:.2}", expense.amount)
            );
        }
    }

    println!();
    println!("   These are suggestions. Pin one down with 'outlay rules add'.");

    Ok(())
}

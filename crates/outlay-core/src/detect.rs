//! Recurring-transaction detection heuristic
//!
//! Flags expenses that look like repeat occurrences of the same real-world
//! obligation (a weekly grocery run, a weekly lesson) without any explicit
//! rule:
//! - Groups expenses into (category, amount band) buckets
//! - Walks each bucket chronologically and compares adjacent pairs only
//! - A pair matches when its day gap falls inside the cadence window and
//!   the amounts are within tolerance
//!
//! The output is advisory. It is recomputed from scratch on every call and
//! never persisted; explicit recurring rules are a separate mechanism (see
//! `schedule`) and neither feeds the other.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::Expense;

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/detect.toml");

/// Shared bucket for expenses without a category label
const UNCATEGORIZED: &str = "uncategorized";

/// Detection configuration
///
/// The two knobs that trade recall against precision are the gap window and
/// the amount ratio. Defaults target weekly-ish cadences; see
/// [`DetectorConfig::monthly`] for monthly bills.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DetectorConfig {
    /// Minimum days between two charges to read as a cadence (inclusive)
    pub min_gap_days: i64,
    /// Maximum days between two charges (inclusive)
    pub max_gap_days: i64,
    /// Maximum relative amount difference, |a - b| / max(a, b) (inclusive)
    pub max_amount_ratio: f64,
    /// Width of the amount band used for bucketing. Expenses whose amounts
    /// round to the same multiple of this width share a bucket, so small
    /// price drift between recurrences still groups together.
    pub amount_bucket_width: f64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            min_gap_days: 5,            // weekly cadence: 7 days ± 2
            max_gap_days: 9,
            max_amount_ratio: 0.10,     // tolerate up to 10% price drift
            amount_bucket_width: 100.0, // ~±50-unit amount band
        }
    }
}

impl DetectorConfig {
    /// Window tuned for monthly bills (~30 days ± 5)
    pub fn monthly() -> Self {
        Self {
            min_gap_days: 25,
            max_gap_days: 35,
            ..Self::default()
        }
    }

    /// Load configuration with two-layer resolution:
    /// 1. Override file, if given and it exists
    /// 2. Embedded defaults (compiled into binary)
    pub fn load(override_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = override_path {
            if path.exists() {
                let contents = fs::read_to_string(path)?;
                let config = Self::from_toml(&contents)?;
                debug!("Loaded detector config override from {}", path.display());
                return Ok(config);
            }
        }
        Self::from_toml(DEFAULT_CONFIG)
    }

    /// Parse and validate configuration from TOML
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_gap_days < 0 || self.max_gap_days < self.min_gap_days {
            return Err(Error::Config(format!(
                "invalid gap window: {}..{} days",
                self.min_gap_days, self.max_gap_days
            )));
        }
        // !(x >= 0) also rejects NaN
        if !(self.max_amount_ratio >= 0.0) {
            return Err(Error::Config(format!(
                "max_amount_ratio must be >= 0, got {}",
                self.max_amount_ratio
            )));
        }
        if !(self.amount_bucket_width > 0.0) {
            return Err(Error::Config(format!(
                "amount_bucket_width must be > 0, got {}",
                self.amount_bucket_width
            )));
        }
        Ok(())
    }
}

/// Detects implicitly recurring expenses
pub struct RecurrenceDetector {
    config: DetectorConfig,
}

impl RecurrenceDetector {
    pub fn new() -> Self {
        Self {
            config: DetectorConfig::default(),
        }
    }

    pub fn with_config(config: DetectorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Flag expenses that are a member of at least one recurring pair
    ///
    /// Returns a set of expense ids. The result is always a subset of the
    /// input ids, and an expense with no qualifying neighbor in its bucket
    /// is never included. Pure: the same snapshot always yields the same
    /// set, and the input is never mutated.
    ///
    /// Malformed records (non-finite or negative amount) are skipped rather
    /// than reported; this is a best-effort suggestion, not authoritative
    /// data.
    pub fn detect(&self, expenses: &[Expense]) -> HashSet<String> {
        let mut buckets: HashMap<(String, i64), Vec<&Expense>> = HashMap::new();
        for expense in expenses {
            let Some(key) = self.bucket_key(expense) else {
                debug!(
                    id = %expense.id,
                    amount = expense.amount,
                    "Skipping malformed expense in recurrence detection"
                );
                continue;
            };
            buckets.entry(key).or_default().push(expense);
        }

        let mut recurring_ids = HashSet::new();
        for group in buckets.values_mut() {
            // Size 0/1 buckets have no adjacent pairs
            group.sort_by_key(|e| e.date);

            for pair in group.windows(2) {
                let (prev, curr) = (pair[0], pair[1]);
                let day_gap = (curr.date - prev.date).num_days().abs();
                if day_gap < self.config.min_gap_days || day_gap > self.config.max_gap_days {
                    continue;
                }
                if amount_ratio(prev.amount, curr.amount) <= self.config.max_amount_ratio {
                    recurring_ids.insert(prev.id.clone());
                    recurring_ids.insert(curr.id.clone());
                }
            }
        }

        recurring_ids
    }

    /// Bucket key for an expense, or None if the record is malformed
    fn bucket_key(&self, expense: &Expense) -> Option<(String, i64)> {
        if !expense.amount.is_finite() || expense.amount < 0.0 {
            return None;
        }
        let label = expense
            .category_label
            .clone()
            .unwrap_or_else(|| UNCATEGORIZED.to_string());
        let band = (expense.amount / self.config.amount_bucket_width).round() as i64;
        Some((label, band))
    }
}

impl Default for RecurrenceDetector {
    fn default() -> Self {
        Self::new()
    }
}

/// Relative difference between two non-negative amounts
///
/// Defined as 0 when both amounts are 0, so zero-amount charges still pair
/// on the cadence criteria alone.
fn amount_ratio(a: f64, b: f64) -> f64 {
    let max = a.max(b);
    if max == 0.0 {
        return 0.0;
    }
    (a - b).abs() / max
}

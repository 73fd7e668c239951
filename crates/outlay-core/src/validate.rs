//! Input validation and normalization
//!
//! Applied at the storage boundary: everything entering the record store
//! goes through `normalize_new_expense` (or the per-field helpers), so the
//! detector and summaries can assume well-formed records downstream.

use chrono::NaiveDate;

use crate::error::{Error, Result};
use crate::models::NewExpense;

/// Maximum length for category labels and rule names
const MAX_LABEL_LEN: usize = 500;

/// Maximum length for free-text notes
const MAX_NOTE_LEN: usize = 1000;

/// Validate an amount: finite and non-negative
pub fn validate_amount(amount: f64) -> Result<f64> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(Error::InvalidData(format!(
            "amount must be a non-negative number, got {}",
            amount
        )));
    }
    Ok(amount)
}

/// Parse an ISO `YYYY-MM-DD` date string
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| Error::InvalidData(format!("invalid date: {} (expected YYYY-MM-DD)", s)))
}

/// Validate a label: non-empty after trimming, bounded length
pub fn validate_label(label: &str) -> Result<String> {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidData("label must not be empty".to_string()));
    }
    if trimmed.chars().count() > MAX_LABEL_LEN {
        return Err(Error::InvalidData(format!(
            "label too long: maximum {} characters",
            MAX_LABEL_LEN
        )));
    }
    Ok(trimmed.to_string())
}

/// Clean a free-text note: strip control characters, trim, bound length
///
/// Returns None when nothing usable remains.
pub fn sanitize_note(note: &str) -> Option<String> {
    let cleaned: String = note
        .chars()
        .filter(|c| !c.is_control() || *c == '\n')
        .take(MAX_NOTE_LEN)
        .collect();
    let trimmed = cleaned.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Normalize a new expense before insertion
pub fn normalize_new_expense(expense: NewExpense) -> Result<NewExpense> {
    let amount = validate_amount(expense.amount)?;

    let category_label = match expense.category_label.as_deref() {
        Some(label) if !label.trim().is_empty() => Some(validate_label(label)?),
        _ => None,
    };

    if let Some(quantity) = expense.quantity {
        if !quantity.is_finite() || quantity <= 0.0 {
            return Err(Error::InvalidData(format!(
                "quantity must be a positive number, got {}",
                quantity
            )));
        }
    }

    Ok(NewExpense {
        amount,
        note: expense.note.as_deref().and_then(sanitize_note),
        category_label,
        ..expense
    })
}

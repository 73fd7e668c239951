//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `budgets` - Budget commands (set, list with progress)
//! - `core` - Core commands (init, reset) and shared utilities (open_db)
//! - `detect` - Recurring-charge detection command
//! - `expenses` - Expense commands (add, list, delete)
//! - `incomes` - Income commands (add, list)
//! - `rules` - Recurring rule commands (add, list, apply, deactivate)
//! - `subscriptions` - Subscription commands (add, list, due, advance, status)
//! - `summary` - Dashboard summary command and period resolution

pub mod budgets;
pub mod core;
pub mod detect;
pub mod expenses;
pub mod incomes;
pub mod rules;
pub mod subscriptions;
pub mod summary;

// Re-export command functions for main.rs
pub use budgets::*;
pub use core::*;
pub use detect::*;
pub use expenses::*;
pub use incomes::*;
pub use rules::*;
pub use subscriptions::*;
pub use summary::*;

/// Truncate a string to a maximum byte length, adding "..." if truncated
///
/// The cut backs up to the nearest char boundary so multibyte labels never
/// split mid-character.
pub fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut end = max.saturating_sub(3);
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &s[..end])
}

//! Outlay Core Library
//!
//! Shared functionality for the Outlay expense tracker:
//! - Record store (SQLite with optional encryption at rest)
//! - Recurring-transaction detection heuristic
//! - Explicit recurring rules and subscription cadence logic
//! - Dashboard summary and budget progress aggregation
//! - Input validation and normalization
//! - In-app notification channel

pub mod db;
pub mod detect;
pub mod error;
pub mod models;
pub mod notify;
pub mod schedule;
pub mod summary;
pub mod validate;

pub use db::Database;
pub use detect::{DetectorConfig, RecurrenceDetector};
pub use error::{Error, Result};
pub use notify::{Notification, NotificationChannel, NotificationKind, SubscriberId};
pub use summary::{BudgetStatus, CategoryTotal, DashboardSummary, SpendPoint};

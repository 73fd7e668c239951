//! Domain models for Outlay

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A single expense record
///
/// Immutable once stored. The `id` is an opaque string assigned by the
/// record store at insert time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    pub date: NaiveDate,
    /// Always >= 0; currency-agnostic
    pub amount: f64,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub note: Option<String>,
    /// Free-text category; absent expenses share an "uncategorized" bucket
    pub category_label: Option<String>,
    /// Set when this expense was created from an explicit recurring rule
    pub rule_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A new expense to be inserted (before the store assigns an id)
#[derive(Debug, Clone, Default)]
pub struct NewExpense {
    pub date: NaiveDate,
    pub amount: f64,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub note: Option<String>,
    pub category_label: Option<String>,
    pub rule_id: Option<String>,
}

/// An income record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Income {
    pub id: String,
    pub amount: f64,
    pub kind: IncomeKind,
    pub date_received: NaiveDate,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A new income to be inserted
#[derive(Debug, Clone)]
pub struct NewIncome {
    pub amount: f64,
    pub kind: IncomeKind,
    pub date_received: NaiveDate,
    pub note: Option<String>,
}

/// Income classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeKind {
    MonthlySalary,
    Bonus,
    Other,
}

impl IncomeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MonthlySalary => "monthly_salary",
            Self::Bonus => "bonus",
            Self::Other => "other",
        }
    }
}

impl std::str::FromStr for IncomeKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "monthly_salary" | "salary" => Ok(Self::MonthlySalary),
            "bonus" => Ok(Self::Bonus),
            "other" => Ok(Self::Other),
            _ => Err(format!("Unknown income kind: {}", s)),
        }
    }
}

impl std::fmt::Display for IncomeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A monthly category budget
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub id: String,
    pub category_label: String,
    pub monthly_limit: f64,
    /// 1-12
    pub month: u32,
    pub year: i32,
    pub created_at: DateTime<Utc>,
}

/// An explicit, user-declared recurring rule
///
/// This is the opt-in mechanism for recurring expenses. It is entirely
/// separate from the recurrence detection heuristic in `detect`, which
/// only produces advisory suggestions and never creates rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecurringRule {
    pub id: String,
    pub label: String,
    pub default_amount: Option<f64>,
    pub unit: Option<String>,
    pub frequency: RuleFrequency,
    /// Weekly rules: Monday-based weekday 1-7.
    /// Monthly rules: day of month 1-31 (clamped to month length).
    pub weekday_or_day: Option<u32>,
    /// When set, due occurrences create expenses automatically
    pub auto_create: bool,
    pub last_applied_date: Option<NaiveDate>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

/// A new recurring rule to be inserted
#[derive(Debug, Clone)]
pub struct NewRecurringRule {
    pub label: String,
    pub default_amount: Option<f64>,
    pub unit: Option<String>,
    pub frequency: RuleFrequency,
    pub weekday_or_day: Option<u32>,
    pub auto_create: bool,
}

/// Recurring rule cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleFrequency {
    Daily,
    Weekly,
    Monthly,
    /// Caller-managed cadence; never auto-applied
    Custom,
}

impl RuleFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Custom => "custom",
        }
    }
}

impl std::str::FromStr for RuleFrequency {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "custom" => Ok(Self::Custom),
            _ => Err(format!("Unknown rule frequency: {}", s)),
        }
    }
}

impl std::fmt::Display for RuleFrequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An explicit subscription (streaming service, gym, etc.)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    pub id: String,
    pub name: String,
    pub start_date: NaiveDate,
    pub frequency: BillingFrequency,
    pub amount: Option<f64>,
    pub next_billing_date: Option<NaiveDate>,
    /// Days before next_billing_date the reminder window opens
    pub reminder_days: i64,
    pub status: SubscriptionStatus,
    pub created_at: DateTime<Utc>,
}

/// A new subscription to be inserted
#[derive(Debug, Clone)]
pub struct NewSubscription {
    pub name: String,
    pub start_date: NaiveDate,
    pub frequency: BillingFrequency,
    pub amount: Option<f64>,
    pub next_billing_date: Option<NaiveDate>,
    pub reminder_days: i64,
}

/// Subscription billing frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingFrequency {
    Monthly,
    Quarterly,
    Yearly,
    Custom,
}

impl BillingFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Yearly => "yearly",
            Self::Custom => "custom",
        }
    }
}

impl std::str::FromStr for BillingFrequency {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "monthly" => Ok(Self::Monthly),
            "quarterly" => Ok(Self::Quarterly),
            "yearly" => Ok(Self::Yearly),
            "custom" => Ok(Self::Custom),
            _ => Err(format!("Unknown billing frequency: {}", s)),
        }
    }
}

impl std::fmt::Display for BillingFrequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Subscription status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Active,
    Paused,
    Cancelled,
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Paused => "paused",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::str::FromStr for SubscriptionStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "paused" => Ok(Self::Paused),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(format!("Unknown subscription status: {}", s)),
        }
    }
}

impl std::fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

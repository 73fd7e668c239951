//! Dashboard summary aggregation
//!
//! Pure functions over in-memory snapshots of expenses, incomes, rules, and
//! budgets. Like the recurrence detector, nothing here touches storage;
//! callers fetch a (possibly date-windowed) snapshot first.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::models::{Budget, Expense, Income, RecurringRule, RuleFrequency};

/// Category used for expenses without a label in summaries
const OTHER_CATEGORY: &str = "Other";

/// Total spent on one calendar day
#[derive(Debug, Clone, Serialize)]
pub struct SpendPoint {
    pub date: NaiveDate,
    pub spent: f64,
}

/// Total spent in one category
#[derive(Debug, Clone, Serialize)]
pub struct CategoryTotal {
    pub label: String,
    pub amount: f64,
}

/// Dashboard summary statistics
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub total_spent: f64,
    pub total_income: f64,
    pub net: f64,
    /// Per-day spend, chronological
    pub spent_trend: Vec<SpendPoint>,
    /// Per-category totals, largest first
    pub categories: Vec<CategoryTotal>,
    /// Monthly cost implied by active recurring rules
    pub projected_recurring_monthly: f64,
}

/// Spent-vs-limit status for one budget
#[derive(Debug, Clone, Serialize)]
pub struct BudgetStatus {
    pub category_label: String,
    pub monthly_limit: f64,
    pub spent: f64,
    pub remaining: f64,
}

/// Build a dashboard summary from a snapshot
pub fn summarize(
    expenses: &[Expense],
    incomes: &[Income],
    rules: &[RecurringRule],
) -> DashboardSummary {
    let total_spent: f64 = expenses.iter().map(|e| e.amount).sum();
    let total_income: f64 = incomes.iter().map(|i| i.amount).sum();

    // BTreeMap keeps the trend chronological
    let mut daily: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for expense in expenses {
        *daily.entry(expense.date).or_insert(0.0) += expense.amount;
    }
    let spent_trend = daily
        .into_iter()
        .map(|(date, spent)| SpendPoint { date, spent })
        .collect();

    let mut by_category: BTreeMap<String, f64> = BTreeMap::new();
    for expense in expenses {
        let label = expense
            .category_label
            .clone()
            .unwrap_or_else(|| OTHER_CATEGORY.to_string());
        *by_category.entry(label).or_insert(0.0) += expense.amount;
    }
    let mut categories: Vec<CategoryTotal> = by_category
        .into_iter()
        .map(|(label, amount)| CategoryTotal { label, amount })
        .collect();
    categories.sort_by(|a, b| b.amount.total_cmp(&a.amount));

    DashboardSummary {
        total_spent,
        total_income,
        net: total_income - total_spent,
        spent_trend,
        categories,
        projected_recurring_monthly: projected_recurring_monthly(rules),
    }
}

/// Monthly cost implied by active recurring rules
///
/// Weekly rules count 4x, daily rules 30x. Rules without a default amount
/// contribute nothing; custom-cadence rules are not projectable.
pub fn projected_recurring_monthly(rules: &[RecurringRule]) -> f64 {
    rules
        .iter()
        .filter(|r| r.active)
        .map(|r| {
            let amount = r.default_amount.unwrap_or(0.0);
            match r.frequency {
                RuleFrequency::Monthly => amount,
                RuleFrequency::Weekly => amount * 4.0,
                RuleFrequency::Daily => amount * 30.0,
                RuleFrequency::Custom => 0.0,
            }
        })
        .sum()
}

/// Spent-vs-limit status for each budget
///
/// Only expenses in the budget's month and with a matching category label
/// count toward it; uncategorized spending matches no budget.
pub fn budget_progress(budgets: &[Budget], expenses: &[Expense]) -> Vec<BudgetStatus> {
    budgets
        .iter()
        .map(|budget| {
            let spent: f64 = expenses
                .iter()
                .filter(|e| {
                    e.date.year() == budget.year
                        && e.date.month() == budget.month
                        && e.category_label.as_deref() == Some(budget.category_label.as_str())
                })
                .map(|e| e.amount)
                .sum();
            BudgetStatus {
                category_label: budget.category_label.clone(),
                monthly_limit: budget.monthly_limit,
                spent,
                remaining: budget.monthly_limit - spent,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::IncomeKind;
    use chrono::Utc;

    fn expense(date: &str, amount: f64, category: Option<&str>) -> Expense {
        Expense {
            id: format!("e-{}-{}", date, amount),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            amount,
            quantity: None,
            unit: None,
            note: None,
            category_label: category.map(str::to_string),
            rule_id: None,
            created_at: Utc::now(),
        }
    }

    fn income(date: &str, amount: f64) -> Income {
        Income {
            id: format!("i-{}", date),
            amount,
            kind: IncomeKind::MonthlySalary,
            date_received: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            note: None,
            created_at: Utc::now(),
        }
    }

    fn rule(frequency: RuleFrequency, amount: Option<f64>, active: bool) -> RecurringRule {
        RecurringRule {
            id: "r".to_string(),
            label: "rule".to_string(),
            default_amount: amount,
            unit: None,
            frequency,
            weekday_or_day: None,
            auto_create: false,
            last_applied_date: None,
            active,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_totals_and_net() {
        let expenses = vec![
            expense("2024-01-01", 30.0, Some("Groceries")),
            expense("2024-01-02", 20.0, None),
        ];
        let incomes = vec![income("2024-01-01", 100.0)];
        let summary = summarize(&expenses, &incomes, &[]);

        assert_eq!(summary.total_spent, 50.0);
        assert_eq!(summary.total_income, 100.0);
        assert_eq!(summary.net, 50.0);
    }

    #[test]
    fn test_trend_groups_by_day_chronologically() {
        let expenses = vec![
            expense("2024-01-02", 5.0, None),
            expense("2024-01-01", 10.0, None),
            expense("2024-01-01", 15.0, None),
        ];
        let summary = summarize(&expenses, &[], &[]);
        assert_eq!(summary.spent_trend.len(), 2);
        assert_eq!(summary.spent_trend[0].spent, 25.0);
        assert_eq!(summary.spent_trend[1].spent, 5.0);
        assert!(summary.spent_trend[0].date < summary.spent_trend[1].date);
    }

    #[test]
    fn test_categories_sorted_and_uncategorized_folds_to_other() {
        let expenses = vec![
            expense("2024-01-01", 10.0, Some("Groceries")),
            expense("2024-01-02", 40.0, None),
            expense("2024-01-03", 25.0, Some("Groceries")),
        ];
        let summary = summarize(&expenses, &[], &[]);
        assert_eq!(summary.categories[0].label, "Other");
        assert_eq!(summary.categories[0].amount, 40.0);
        assert_eq!(summary.categories[1].label, "Groceries");
        assert_eq!(summary.categories[1].amount, 35.0);
    }

    #[test]
    fn test_projected_recurring_monthly() {
        let rules = vec![
            rule(RuleFrequency::Monthly, Some(100.0), true),
            rule(RuleFrequency::Weekly, Some(10.0), true),
            rule(RuleFrequency::Daily, Some(2.0), true),
            rule(RuleFrequency::Monthly, Some(500.0), false), // inactive
            rule(RuleFrequency::Weekly, None, true),          // no amount
        ];
        // 100 + 10*4 + 2*30
        assert_eq!(projected_recurring_monthly(&rules), 200.0);
    }

    #[test]
    fn test_budget_progress() {
        let budgets = vec![Budget {
            id: "b".to_string(),
            category_label: "Groceries".to_string(),
            monthly_limit: 300.0,
            month: 1,
            year: 2024,
            created_at: Utc::now(),
        }];
        let expenses = vec![
            expense("2024-01-05", 120.0, Some("Groceries")),
            expense("2024-01-20", 80.0, Some("Groceries")),
            expense("2024-02-01", 50.0, Some("Groceries")), // wrong month
            expense("2024-01-10", 999.0, Some("Dining")),   // wrong category
            expense("2024-01-11", 999.0, None),             // uncategorized
        ];
        let progress = budget_progress(&budgets, &expenses);
        assert_eq!(progress.len(), 1);
        assert_eq!(progress[0].spent, 200.0);
        assert_eq!(progress[0].remaining, 100.0);
    }
}

//! Database tests

use super::*;
use crate::models::*;
use chrono::NaiveDate;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[test]
fn test_in_memory_db() {
    let db = Database::in_memory().unwrap();
    let expenses = db.list_expenses(None, None).unwrap();
    assert!(expenses.is_empty());
}

#[test]
fn test_in_memory_db_cleans_up_on_drop() {
    let path;
    {
        let db = Database::in_memory().unwrap();
        path = std::path::PathBuf::from(db.path());
        assert!(path.exists());
    }
    assert!(!path.exists());
}

#[test]
fn test_expense_crud() {
    let db = Database::in_memory().unwrap();

    let stored = db
        .insert_expense(NewExpense {
            date: date("2024-01-15"),
            amount: 42.5,
            note: Some("weekly shop".to_string()),
            category_label: Some("Groceries".to_string()),
            ..Default::default()
        })
        .unwrap();
    assert!(!stored.id.is_empty());

    let fetched = db.get_expense(&stored.id).unwrap();
    assert_eq!(fetched.amount, 42.5);
    assert_eq!(fetched.category_label.as_deref(), Some("Groceries"));
    assert_eq!(fetched.date, date("2024-01-15"));

    db.delete_expense(&stored.id).unwrap();
    assert!(matches!(
        db.get_expense(&stored.id),
        Err(crate::error::Error::NotFound(_))
    ));
}

#[test]
fn test_insert_expense_rejects_negative_amount() {
    let db = Database::in_memory().unwrap();
    let result = db.insert_expense(NewExpense {
        date: date("2024-01-15"),
        amount: -10.0,
        ..Default::default()
    });
    assert!(matches!(result, Err(crate::error::Error::InvalidData(_))));
}

#[test]
fn test_expense_ids_are_unique_and_opaque() {
    let db = Database::in_memory().unwrap();
    let a = db
        .insert_expense(NewExpense {
            date: date("2024-01-01"),
            amount: 10.0,
            ..Default::default()
        })
        .unwrap();
    let b = db
        .insert_expense(NewExpense {
            date: date("2024-01-01"),
            amount: 10.0,
            ..Default::default()
        })
        .unwrap();
    assert_ne!(a.id, b.id);
}

#[test]
fn test_list_expenses_date_window() {
    let db = Database::in_memory().unwrap();
    for (d, amount) in [("2024-01-01", 1.0), ("2024-01-15", 2.0), ("2024-02-01", 3.0)] {
        db.insert_expense(NewExpense {
            date: date(d),
            amount,
            ..Default::default()
        })
        .unwrap();
    }

    let january = db
        .list_expenses(Some(date("2024-01-01")), Some(date("2024-01-31")))
        .unwrap();
    assert_eq!(january.len(), 2);
    // Newest first
    assert_eq!(january[0].date, date("2024-01-15"));

    let all = db.list_expenses(None, None).unwrap();
    assert_eq!(all.len(), 3);
}

#[test]
fn test_income_crud() {
    let db = Database::in_memory().unwrap();
    let stored = db
        .insert_income(NewIncome {
            amount: 5000.0,
            kind: IncomeKind::MonthlySalary,
            date_received: date("2024-01-31"),
            note: None,
        })
        .unwrap();

    let incomes = db.list_incomes(None, None).unwrap();
    assert_eq!(incomes.len(), 1);
    assert_eq!(incomes[0].kind, IncomeKind::MonthlySalary);

    db.delete_income(&stored.id).unwrap();
    assert!(db.list_incomes(None, None).unwrap().is_empty());
}

#[test]
fn test_budget_upsert_replaces_limit() {
    let db = Database::in_memory().unwrap();

    let first = db.upsert_budget("Groceries", 300.0, 1, 2024).unwrap();
    let second = db.upsert_budget("Groceries", 350.0, 1, 2024).unwrap();
    assert_eq!(first.id, second.id);
    assert_eq!(second.monthly_limit, 350.0);

    // Different month is a different budget
    let other = db.upsert_budget("Groceries", 300.0, 2, 2024).unwrap();
    assert_ne!(first.id, other.id);

    assert_eq!(db.list_budgets(1, 2024).unwrap().len(), 1);
}

#[test]
fn test_budget_rejects_invalid_month() {
    let db = Database::in_memory().unwrap();
    assert!(db.upsert_budget("Groceries", 300.0, 13, 2024).is_err());
    assert!(db.upsert_budget("Groceries", 300.0, 0, 2024).is_err());
}

#[test]
fn test_rule_crud_and_applied_stamp() {
    let db = Database::in_memory().unwrap();

    let rule = db
        .insert_rule(NewRecurringRule {
            label: "Milk".to_string(),
            default_amount: Some(40.0),
            unit: Some("L".to_string()),
            frequency: RuleFrequency::Weekly,
            weekday_or_day: Some(1),
            auto_create: true,
        })
        .unwrap();
    assert!(rule.active);
    assert!(rule.last_applied_date.is_none());

    db.set_rule_applied(&rule.id, date("2024-01-08")).unwrap();
    let fetched = db.get_rule(&rule.id).unwrap();
    assert_eq!(fetched.last_applied_date, Some(date("2024-01-08")));

    db.set_rule_active(&rule.id, false).unwrap();
    assert!(db.list_rules(true).unwrap().is_empty());
    assert_eq!(db.list_rules(false).unwrap().len(), 1);
}

#[test]
fn test_subscription_crud() {
    let db = Database::in_memory().unwrap();

    let sub = db
        .insert_subscription(NewSubscription {
            name: "Streamflix".to_string(),
            start_date: date("2024-01-01"),
            frequency: BillingFrequency::Monthly,
            amount: Some(15.0),
            next_billing_date: Some(date("2024-02-01")),
            reminder_days: 3,
        })
        .unwrap();
    assert_eq!(sub.status, SubscriptionStatus::Active);

    db.update_subscription_status(&sub.id, SubscriptionStatus::Paused)
        .unwrap();
    assert_eq!(
        db.list_subscriptions(Some(SubscriptionStatus::Paused))
            .unwrap()
            .len(),
        1
    );
    assert!(db
        .list_subscriptions(Some(SubscriptionStatus::Active))
        .unwrap()
        .is_empty());

    db.set_next_billing_date(&sub.id, Some(date("2024-03-01")))
        .unwrap();
    let fetched = db.get_subscription(&sub.id).unwrap();
    assert_eq!(fetched.next_billing_date, Some(date("2024-03-01")));
}

#[test]
fn test_list_subscriptions_both_filters() {
    let db = Database::in_memory().unwrap();

    for (name, next) in [
        ("Streamflix", Some("2024-03-01")),
        ("Gym", Some("2024-02-01")),
        ("Paper", None),
    ] {
        db.insert_subscription(NewSubscription {
            name: name.to_string(),
            start_date: date("2024-01-01"),
            frequency: BillingFrequency::Monthly,
            amount: Some(10.0),
            next_billing_date: next.map(date),
            reminder_days: 3,
        })
        .unwrap();
    }
    let all = db.list_subscriptions(None).unwrap();
    assert_eq!(all.len(), 3);
    // Soonest billing first, unscheduled last
    assert_eq!(all[0].name, "Gym");
    assert_eq!(all[2].name, "Paper");

    let active = db.list_subscriptions(Some(SubscriptionStatus::Active)).unwrap();
    assert_eq!(active.len(), 3);
    assert!(db
        .list_subscriptions(Some(SubscriptionStatus::Cancelled))
        .unwrap()
        .is_empty());
}

#[test]
fn test_reset_clears_all_records() {
    let db = Database::in_memory().unwrap();
    db.insert_expense(NewExpense {
        date: date("2024-01-01"),
        amount: 10.0,
        ..Default::default()
    })
    .unwrap();
    db.upsert_budget("Groceries", 100.0, 1, 2024).unwrap();

    db.reset().unwrap();
    assert!(db.list_expenses(None, None).unwrap().is_empty());
    assert!(db.list_budgets(1, 2024).unwrap().is_empty());
}

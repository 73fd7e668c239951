//! Integration tests for outlay-core
//!
//! These tests exercise the full record → detect → suggest workflow and the
//! rule application path against a real database.

use chrono::NaiveDate;

use outlay_core::{
    db::Database,
    detect::{DetectorConfig, RecurrenceDetector},
    models::{
        BillingFrequency, NewExpense, NewIncome, NewRecurringRule, NewSubscription, IncomeKind,
        RuleFrequency,
    },
    schedule, summary,
};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn add_expense(db: &Database, d: &str, amount: f64, category: Option<&str>) -> String {
    db.insert_expense(NewExpense {
        date: date(d),
        amount,
        category_label: category.map(str::to_string),
        ..Default::default()
    })
    .unwrap()
    .id
}

#[test]
fn test_detect_over_stored_expenses() {
    let db = Database::in_memory().unwrap();

    // A weekly grocery cadence with small price drift
    let a = add_expense(&db, "2024-01-01", 412.0, Some("Groceries"));
    let b = add_expense(&db, "2024-01-08", 399.0, Some("Groceries"));
    let c = add_expense(&db, "2024-01-15", 405.0, Some("Groceries"));
    // One-off purchases that should stay unflagged
    let one_off = add_expense(&db, "2024-01-03", 1250.0, Some("Electronics"));
    let lone = add_expense(&db, "2024-01-04", 410.0, Some("Dining"));

    let expenses = db.list_expenses(None, None).unwrap();
    let recurring = RecurrenceDetector::new().detect(&expenses);

    assert!(recurring.contains(&a));
    assert!(recurring.contains(&b));
    assert!(recurring.contains(&c));
    assert!(!recurring.contains(&one_off));
    assert!(!recurring.contains(&lone));
}

#[test]
fn test_detect_monthly_preset_over_stored_expenses() {
    let db = Database::in_memory().unwrap();

    let a = add_expense(&db, "2024-01-05", 1500.0, Some("Rent"));
    let b = add_expense(&db, "2024-02-05", 1500.0, Some("Rent"));

    let expenses = db.list_expenses(None, None).unwrap();

    // Default weekly window misses monthly bills
    assert!(RecurrenceDetector::new().detect(&expenses).is_empty());

    let detector = RecurrenceDetector::with_config(DetectorConfig::monthly());
    let recurring = detector.detect(&expenses);
    assert!(recurring.contains(&a) && recurring.contains(&b));
}

#[test]
fn test_apply_due_rules_creates_expenses() {
    let db = Database::in_memory().unwrap();

    let rule = db
        .insert_rule(NewRecurringRule {
            label: "Milk".to_string(),
            default_amount: Some(40.0),
            unit: Some("L".to_string()),
            frequency: RuleFrequency::Weekly,
            weekday_or_day: None,
            auto_create: true,
        })
        .unwrap();

    // No default amount: due but nothing to create
    db.insert_rule(NewRecurringRule {
        label: "Variable bill".to_string(),
        default_amount: None,
        unit: None,
        frequency: RuleFrequency::Weekly,
        weekday_or_day: None,
        auto_create: true,
    })
    .unwrap();

    let today = date("2024-01-08");
    let created = schedule::apply_due_rules(&db, today).unwrap();
    assert_eq!(created, 1);

    let expenses = db.list_expenses(None, None).unwrap();
    assert_eq!(expenses.len(), 1);
    assert_eq!(expenses[0].amount, 40.0);
    assert_eq!(expenses[0].rule_id.as_deref(), Some(rule.id.as_str()));
    assert_eq!(expenses[0].category_label.as_deref(), Some("Milk"));

    // Applying again the same day creates nothing new
    let created = schedule::apply_due_rules(&db, today).unwrap();
    assert_eq!(created, 0);

    // A week later the rule is due again
    let created = schedule::apply_due_rules(&db, date("2024-01-15")).unwrap();
    assert_eq!(created, 1);
    assert_eq!(db.list_expenses(None, None).unwrap().len(), 2);
}

#[test]
fn test_rule_created_expenses_and_detector_stay_independent() {
    let db = Database::in_memory().unwrap();

    db.insert_rule(NewRecurringRule {
        label: "Milk".to_string(),
        default_amount: Some(40.0),
        unit: None,
        frequency: RuleFrequency::Daily,
        weekday_or_day: None,
        auto_create: true,
    })
    .unwrap();
    schedule::apply_due_rules(&db, date("2024-01-01")).unwrap();

    // One rule-created expense: no pair, so the detector suggests nothing
    let expenses = db.list_expenses(None, None).unwrap();
    assert_eq!(expenses.len(), 1);
    assert!(expenses[0].rule_id.is_some());
    assert!(RecurrenceDetector::new().detect(&expenses).is_empty());
}

#[test]
fn test_subscription_advance_workflow() {
    let db = Database::in_memory().unwrap();

    let sub = db
        .insert_subscription(NewSubscription {
            name: "Streamflix".to_string(),
            start_date: date("2024-01-31"),
            frequency: BillingFrequency::Monthly,
            amount: Some(15.0),
            next_billing_date: Some(date("2024-01-31")),
            reminder_days: 3,
        })
        .unwrap();

    // Month-end clamping: Jan 31 -> Feb 29 (leap year)
    let next = schedule::advance_subscription(&db, &sub.id).unwrap();
    assert_eq!(next, Some(date("2024-02-29")));

    let stored = db.get_subscription(&sub.id).unwrap();
    assert_eq!(stored.next_billing_date, Some(date("2024-02-29")));
    assert!(schedule::reminder_window_open(&stored, date("2024-02-27")));
    assert!(!schedule::reminder_window_open(&stored, date("2024-02-20")));
}

#[test]
fn test_summary_over_stored_records() {
    let db = Database::in_memory().unwrap();

    add_expense(&db, "2024-01-01", 100.0, Some("Groceries"));
    add_expense(&db, "2024-01-01", 50.0, None);
    add_expense(&db, "2024-01-02", 25.0, Some("Dining"));
    db.insert_income(NewIncome {
        amount: 1000.0,
        kind: IncomeKind::MonthlySalary,
        date_received: date("2024-01-01"),
        note: None,
    })
    .unwrap();

    let expenses = db.list_expenses(None, None).unwrap();
    let incomes = db.list_incomes(None, None).unwrap();
    let rules = db.list_rules(true).unwrap();

    let dashboard = summary::summarize(&expenses, &incomes, &rules);
    assert_eq!(dashboard.total_spent, 175.0);
    assert_eq!(dashboard.total_income, 1000.0);
    assert_eq!(dashboard.net, 825.0);
    assert_eq!(dashboard.spent_trend.len(), 2);
    assert_eq!(dashboard.categories[0].label, "Groceries");

    // Budget progress against the same snapshot
    let budget = db.upsert_budget("Groceries", 300.0, 1, 2024).unwrap();
    let progress = summary::budget_progress(&[budget], &expenses);
    assert_eq!(progress[0].spent, 100.0);
    assert_eq!(progress[0].remaining, 200.0);
}

//! Recurring rule and subscription cadence logic
//!
//! This is the explicit, user-declared recurrence mechanism: rules say when
//! the next occurrence falls and, when `auto_create` is set, due rules are
//! turned into expenses. Entirely independent of the detection heuristic in
//! `detect`, which only suggests.

use chrono::{Datelike, Duration, Months, NaiveDate, Weekday};
use tracing::{debug, info};

use crate::db::Database;
use crate::error::Result;
use crate::models::{
    BillingFrequency, NewExpense, RecurringRule, RuleFrequency, Subscription, SubscriptionStatus,
};

/// Next occurrence of a rule strictly after the given date
///
/// Custom-cadence rules are caller-managed and yield None, as do rules with
/// an out-of-range `weekday_or_day`.
pub fn next_occurrence(rule: &RecurringRule, after: NaiveDate) -> Option<NaiveDate> {
    match rule.frequency {
        RuleFrequency::Daily => Some(after + Duration::days(1)),
        RuleFrequency::Weekly => {
            let target = match rule.weekday_or_day {
                Some(n) => weekday_from_monday(n)?,
                // No anchor weekday: repeat on the same weekday
                None => return Some(after + Duration::days(7)),
            };
            let mut date = after + Duration::days(1);
            while date.weekday() != target {
                date += Duration::days(1);
            }
            Some(date)
        }
        RuleFrequency::Monthly => {
            let day = match rule.weekday_or_day {
                Some(d @ 1..=31) => d,
                Some(_) => return None,
                // No anchor day: repeat on the same day next month
                None => return after.checked_add_months(Months::new(1)),
            };
            let in_month = clamped_day(after.year(), after.month(), day);
            if in_month > after {
                Some(in_month)
            } else {
                let next = after.checked_add_months(Months::new(1))?;
                Some(clamped_day(next.year(), next.month(), day))
            }
        }
        RuleFrequency::Custom => None,
    }
}

/// Active auto-create rules whose next occurrence is due
///
/// A rule that has never been applied is due immediately.
pub fn due_rules<'a>(rules: &'a [RecurringRule], today: NaiveDate) -> Vec<&'a RecurringRule> {
    rules
        .iter()
        .filter(|r| r.active && r.auto_create)
        .filter(|r| match r.last_applied_date {
            None => r.frequency != RuleFrequency::Custom,
            Some(last) => next_occurrence(r, last).is_some_and(|d| d <= today),
        })
        .collect()
}

/// Create expenses for all due auto-create rules and stamp them applied
///
/// Rules without a default amount are skipped; there is nothing to create.
/// Returns the number of expenses created.
pub fn apply_due_rules(db: &Database, today: NaiveDate) -> Result<usize> {
    let rules = db.list_rules(true)?;
    let due = due_rules(&rules, today);

    let mut count = 0;
    for rule in due {
        let Some(amount) = rule.default_amount else {
            debug!(rule = %rule.label, "Skipping due rule without a default amount");
            continue;
        };

        db.insert_expense(NewExpense {
            date: today,
            amount,
            quantity: None,
            unit: rule.unit.clone(),
            note: None,
            category_label: Some(rule.label.clone()),
            rule_id: Some(rule.id.clone()),
        })?;
        db.set_rule_applied(&rule.id, today)?;
        count += 1;
    }

    if count > 0 {
        info!("Created {} expenses from due recurring rules", count);
    }
    Ok(count)
}

/// Next billing date one period after the given one
///
/// Custom billing has no derivable period and yields None. Day-of-month is
/// clamped by calendar month arithmetic (Jan 31 -> Feb 29).
pub fn advance_billing_date(frequency: BillingFrequency, from: NaiveDate) -> Option<NaiveDate> {
    let months = match frequency {
        BillingFrequency::Monthly => 1,
        BillingFrequency::Quarterly => 3,
        BillingFrequency::Yearly => 12,
        BillingFrequency::Custom => return None,
    };
    from.checked_add_months(Months::new(months))
}

/// Advance a subscription's next billing date by one period and store it
///
/// Uses the current next billing date as the anchor, falling back to the
/// start date. Custom-frequency subscriptions cannot be advanced and yield
/// None without touching the record.
pub fn advance_subscription(db: &Database, id: &str) -> Result<Option<NaiveDate>> {
    let sub = db.get_subscription(id)?;
    let anchor = sub.next_billing_date.unwrap_or(sub.start_date);

    let Some(next) = advance_billing_date(sub.frequency, anchor) else {
        debug!(subscription = %sub.name, "Custom billing frequency, nothing to advance");
        return Ok(None);
    };

    db.set_next_billing_date(id, Some(next))?;
    Ok(Some(next))
}

/// Whether a subscription's reminder window is open
///
/// The window opens `reminder_days` before the next billing date and closes
/// on the billing date itself. Only active subscriptions remind.
pub fn reminder_window_open(sub: &Subscription, today: NaiveDate) -> bool {
    if sub.status != SubscriptionStatus::Active {
        return false;
    }
    match sub.next_billing_date {
        Some(next) => {
            let opens = next - Duration::days(sub.reminder_days.max(0));
            today >= opens && today <= next
        }
        None => false,
    }
}

/// Monday-based weekday number (1-7) to chrono Weekday
fn weekday_from_monday(n: u32) -> Option<Weekday> {
    match n {
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        7 => Some(Weekday::Sun),
        _ => None,
    }
}

/// Date in the given month with the requested day, clamped to month length
fn clamped_day(year: i32, month: u32, day: u32) -> NaiveDate {
    (1..=day)
        .rev()
        .find_map(|d| NaiveDate::from_ymd_opt(year, month, d))
        .expect("Day 1 always valid")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn rule(
        frequency: RuleFrequency,
        weekday_or_day: Option<u32>,
        last_applied: Option<&str>,
    ) -> RecurringRule {
        RecurringRule {
            id: "r1".to_string(),
            label: "Milk".to_string(),
            default_amount: Some(40.0),
            unit: None,
            frequency,
            weekday_or_day,
            auto_create: true,
            last_applied_date: last_applied.map(|s| date(s)),
            active: true,
            created_at: Utc::now(),
        }
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_daily_next_occurrence() {
        let r = rule(RuleFrequency::Daily, None, None);
        assert_eq!(next_occurrence(&r, date("2024-01-01")), Some(date("2024-01-02")));
    }

    #[test]
    fn test_weekly_next_occurrence_lands_on_anchor_weekday() {
        // 2024-01-01 is a Monday; anchor = Friday (5)
        let r = rule(RuleFrequency::Weekly, Some(5), None);
        assert_eq!(next_occurrence(&r, date("2024-01-01")), Some(date("2024-01-05")));
        // From the anchor itself, next is a full week later
        assert_eq!(next_occurrence(&r, date("2024-01-05")), Some(date("2024-01-12")));
    }

    #[test]
    fn test_weekly_without_anchor_repeats_same_weekday() {
        let r = rule(RuleFrequency::Weekly, None, None);
        assert_eq!(next_occurrence(&r, date("2024-01-03")), Some(date("2024-01-10")));
    }

    #[test]
    fn test_monthly_clamps_to_month_length() {
        let r = rule(RuleFrequency::Monthly, Some(31), None);
        // After Jan 31, the next 31st clamps to Feb 29 (2024 is a leap year)
        assert_eq!(next_occurrence(&r, date("2024-01-31")), Some(date("2024-02-29")));
    }

    #[test]
    fn test_monthly_same_month_when_day_still_ahead() {
        let r = rule(RuleFrequency::Monthly, Some(15), None);
        assert_eq!(next_occurrence(&r, date("2024-01-03")), Some(date("2024-01-15")));
    }

    #[test]
    fn test_custom_has_no_derivable_occurrence() {
        let r = rule(RuleFrequency::Custom, None, None);
        assert_eq!(next_occurrence(&r, date("2024-01-01")), None);
    }

    #[test]
    fn test_out_of_range_anchor_yields_none() {
        let r = rule(RuleFrequency::Weekly, Some(8), None);
        assert_eq!(next_occurrence(&r, date("2024-01-01")), None);
        let r = rule(RuleFrequency::Monthly, Some(0), None);
        assert_eq!(next_occurrence(&r, date("2024-01-01")), None);
    }

    #[test]
    fn test_never_applied_rule_is_due() {
        let rules = vec![rule(RuleFrequency::Weekly, None, None)];
        assert_eq!(due_rules(&rules, date("2024-01-01")).len(), 1);
    }

    #[test]
    fn test_recently_applied_rule_is_not_due() {
        let rules = vec![rule(RuleFrequency::Weekly, None, Some("2024-01-01"))];
        assert!(due_rules(&rules, date("2024-01-05")).is_empty());
        assert_eq!(due_rules(&rules, date("2024-01-08")).len(), 1);
    }

    #[test]
    fn test_inactive_and_manual_rules_never_due() {
        let mut inactive = rule(RuleFrequency::Daily, None, None);
        inactive.active = false;
        let mut manual = rule(RuleFrequency::Daily, None, None);
        manual.auto_create = false;

        let rules = vec![inactive, manual];
        assert!(due_rules(&rules, date("2024-06-01")).is_empty());
    }

    #[test]
    fn test_advance_billing_date() {
        assert_eq!(
            advance_billing_date(BillingFrequency::Monthly, date("2024-01-31")),
            Some(date("2024-02-29"))
        );
        assert_eq!(
            advance_billing_date(BillingFrequency::Quarterly, date("2024-01-15")),
            Some(date("2024-04-15"))
        );
        assert_eq!(
            advance_billing_date(BillingFrequency::Yearly, date("2024-02-29")),
            Some(date("2025-02-28"))
        );
        assert_eq!(advance_billing_date(BillingFrequency::Custom, date("2024-01-01")), None);
    }

    #[test]
    fn test_reminder_window() {
        let sub = Subscription {
            id: "s1".to_string(),
            name: "Streamflix".to_string(),
            start_date: date("2024-01-01"),
            frequency: BillingFrequency::Monthly,
            amount: Some(15.0),
            next_billing_date: Some(date("2024-02-01")),
            reminder_days: 3,
            status: SubscriptionStatus::Active,
            created_at: Utc::now(),
        };

        assert!(!reminder_window_open(&sub, date("2024-01-28")));
        assert!(reminder_window_open(&sub, date("2024-01-29")));
        assert!(reminder_window_open(&sub, date("2024-02-01")));
        assert!(!reminder_window_open(&sub, date("2024-02-02")));

        let paused = Subscription {
            status: SubscriptionStatus::Paused,
            ..sub
        };
        assert!(!reminder_window_open(&paused, date("2024-01-30")));
    }
}

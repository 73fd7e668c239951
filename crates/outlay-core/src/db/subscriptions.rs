//! Subscription operations

use chrono::{NaiveDate, Utc};
use rusqlite::{params, Row};

use super::{format_datetime, new_id, parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{BillingFrequency, NewSubscription, Subscription, SubscriptionStatus};
use crate::validate;

fn map_subscription_row(row: &Row<'_>) -> rusqlite::Result<Subscription> {
    let start_date_str: String = row.get(2)?;
    let frequency_str: String = row.get(3)?;
    let next_billing_str: Option<String> = row.get(5)?;
    let status_str: String = row.get(7)?;
    let created_at_str: String = row.get(8)?;

    Ok(Subscription {
        id: row.get(0)?,
        name: row.get(1)?,
        start_date: NaiveDate::parse_from_str(&start_date_str, "%Y-%m-%d").unwrap_or_default(),
        frequency: frequency_str.parse().unwrap_or(BillingFrequency::Custom),
        amount: row.get(4)?,
        next_billing_date: next_billing_str
            .and_then(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()),
        reminder_days: row.get(6)?,
        status: status_str.parse().unwrap_or(SubscriptionStatus::Active),
        created_at: parse_datetime(&created_at_str),
    })
}

const SUBSCRIPTION_COLUMNS: &str =
    "id, name, start_date, frequency, amount, next_billing_date, reminder_days, status, created_at";

impl Database {
    /// Insert a new subscription
    pub fn insert_subscription(&self, sub: NewSubscription) -> Result<Subscription> {
        let name = validate::validate_label(&sub.name)?;
        if let Some(amount) = sub.amount {
            validate::validate_amount(amount)?;
        }
        if sub.reminder_days < 0 {
            return Err(Error::InvalidData(format!(
                "reminder_days must be >= 0, got {}",
                sub.reminder_days
            )));
        }

        let id = new_id();
        let created_at = Utc::now();

        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO subscriptions
                (id, name, start_date, frequency, amount, next_billing_date, reminder_days, status, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, 'active', ?)
            "#,
            params![
                id,
                name,
                sub.start_date.to_string(),
                sub.frequency.as_str(),
                sub.amount,
                sub.next_billing_date.map(|d| d.to_string()),
                sub.reminder_days,
                format_datetime(created_at),
            ],
        )?;

        Ok(Subscription {
            id,
            name,
            start_date: sub.start_date,
            frequency: sub.frequency,
            amount: sub.amount,
            next_billing_date: sub.next_billing_date,
            reminder_days: sub.reminder_days,
            status: SubscriptionStatus::Active,
            created_at,
        })
    }

    /// List subscriptions, optionally filtered by status
    pub fn list_subscriptions(
        &self,
        status: Option<SubscriptionStatus>,
    ) -> Result<Vec<Subscription>> {
        let conn = self.conn()?;

        if let Some(status) = status {
            let mut stmt = conn.prepare(&format!(
                "SELECT {} FROM subscriptions WHERE status = ? \
                 ORDER BY next_billing_date ASC NULLS LAST",
                SUBSCRIPTION_COLUMNS
            ))?;
            let subscriptions = stmt
                .query_map(params![status.as_str()], map_subscription_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(subscriptions)
        } else {
            let mut stmt = conn.prepare(&format!(
                "SELECT {} FROM subscriptions ORDER BY next_billing_date ASC NULLS LAST",
                SUBSCRIPTION_COLUMNS
            ))?;
            let subscriptions = stmt
                .query_map([], map_subscription_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(subscriptions)
        }
    }

    /// Fetch one subscription by id
    pub fn get_subscription(&self, id: &str) -> Result<Subscription> {
        let conn = self.conn()?;
        conn.query_row(
            &format!(
                "SELECT {} FROM subscriptions WHERE id = ?",
                SUBSCRIPTION_COLUMNS
            ),
            params![id],
            map_subscription_row,
        )
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => {
                Error::NotFound(format!("subscription {}", id))
            }
            other => Error::Database(other),
        })
    }

    /// Update subscription status
    pub fn update_subscription_status(&self, id: &str, status: SubscriptionStatus) -> Result<()> {
        let conn = self.conn()?;
        let updated = conn.execute(
            "UPDATE subscriptions SET status = ? WHERE id = ?",
            params![status.as_str(), id],
        )?;
        if updated == 0 {
            return Err(Error::NotFound(format!("subscription {}", id)));
        }
        Ok(())
    }

    /// Set (or clear) the next billing date
    pub fn set_next_billing_date(&self, id: &str, date: Option<NaiveDate>) -> Result<()> {
        let conn = self.conn()?;
        let updated = conn.execute(
            "UPDATE subscriptions SET next_billing_date = ? WHERE id = ?",
            params![date.map(|d| d.to_string()), id],
        )?;
        if updated == 0 {
            return Err(Error::NotFound(format!("subscription {}", id)));
        }
        Ok(())
    }
}

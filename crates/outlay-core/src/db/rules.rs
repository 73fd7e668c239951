//! Recurring rule operations

use chrono::{NaiveDate, Utc};
use rusqlite::{params, Row};

use super::{format_datetime, new_id, parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{NewRecurringRule, RecurringRule, RuleFrequency};
use crate::validate;

fn map_rule_row(row: &Row<'_>) -> rusqlite::Result<RecurringRule> {
    let frequency_str: String = row.get(4)?;
    let last_applied_str: Option<String> = row.get(7)?;
    let created_at_str: String = row.get(9)?;

    Ok(RecurringRule {
        id: row.get(0)?,
        label: row.get(1)?,
        default_amount: row.get(2)?,
        unit: row.get(3)?,
        frequency: frequency_str.parse().unwrap_or(RuleFrequency::Custom),
        weekday_or_day: row.get(5)?,
        auto_create: row.get(6)?,
        last_applied_date: last_applied_str
            .and_then(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()),
        active: row.get(8)?,
        created_at: parse_datetime(&created_at_str),
    })
}

const RULE_COLUMNS: &str = "id, label, default_amount, unit, frequency, weekday_or_day, \
                            auto_create, last_applied_date, active, created_at";

impl Database {
    /// Insert a new recurring rule
    pub fn insert_rule(&self, rule: NewRecurringRule) -> Result<RecurringRule> {
        let label = validate::validate_label(&rule.label)?;
        if let Some(amount) = rule.default_amount {
            validate::validate_amount(amount)?;
        }

        let id = new_id();
        let created_at = Utc::now();

        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO recurring_rules
                (id, label, default_amount, unit, frequency, weekday_or_day, auto_create, active, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, 1, ?)
            "#,
            params![
                id,
                label,
                rule.default_amount,
                rule.unit,
                rule.frequency.as_str(),
                rule.weekday_or_day,
                rule.auto_create,
                format_datetime(created_at),
            ],
        )?;

        Ok(RecurringRule {
            id,
            label,
            default_amount: rule.default_amount,
            unit: rule.unit,
            frequency: rule.frequency,
            weekday_or_day: rule.weekday_or_day,
            auto_create: rule.auto_create,
            last_applied_date: None,
            active: true,
            created_at,
        })
    }

    /// List rules, optionally only active ones, by frequency then label
    pub fn list_rules(&self, active_only: bool) -> Result<Vec<RecurringRule>> {
        let conn = self.conn()?;

        let query = if active_only {
            format!(
                "SELECT {} FROM recurring_rules WHERE active = 1 ORDER BY frequency, label",
                RULE_COLUMNS
            )
        } else {
            format!(
                "SELECT {} FROM recurring_rules ORDER BY frequency, label",
                RULE_COLUMNS
            )
        };

        let mut stmt = conn.prepare(&query)?;
        let rules = stmt
            .query_map([], map_rule_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(rules)
    }

    /// Fetch one rule by id
    pub fn get_rule(&self, id: &str) -> Result<RecurringRule> {
        let conn = self.conn()?;
        conn.query_row(
            &format!("SELECT {} FROM recurring_rules WHERE id = ?", RULE_COLUMNS),
            params![id],
            map_rule_row,
        )
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound(format!("rule {}", id)),
            other => Error::Database(other),
        })
    }

    /// Stamp a rule as applied on the given date
    pub fn set_rule_applied(&self, id: &str, date: NaiveDate) -> Result<()> {
        let conn = self.conn()?;
        let updated = conn.execute(
            "UPDATE recurring_rules SET last_applied_date = ? WHERE id = ?",
            params![date.to_string(), id],
        )?;
        if updated == 0 {
            return Err(Error::NotFound(format!("rule {}", id)));
        }
        Ok(())
    }

    /// Activate or deactivate a rule
    pub fn set_rule_active(&self, id: &str, active: bool) -> Result<()> {
        let conn = self.conn()?;
        let updated = conn.execute(
            "UPDATE recurring_rules SET active = ? WHERE id = ?",
            params![active, id],
        )?;
        if updated == 0 {
            return Err(Error::NotFound(format!("rule {}", id)));
        }
        Ok(())
    }
}

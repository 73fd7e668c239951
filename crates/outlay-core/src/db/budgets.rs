//! Budget operations

use chrono::Utc;
use rusqlite::{params, Row};

use super::{format_datetime, new_id, parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::Budget;
use crate::validate;

fn map_budget_row(row: &Row<'_>) -> rusqlite::Result<Budget> {
    let created_at_str: String = row.get(5)?;

    Ok(Budget {
        id: row.get(0)?,
        category_label: row.get(1)?,
        monthly_limit: row.get(2)?,
        month: row.get(3)?,
        year: row.get(4)?,
        created_at: parse_datetime(&created_at_str),
    })
}

impl Database {
    /// Upsert a budget, unique per (category, month, year)
    pub fn upsert_budget(
        &self,
        category_label: &str,
        monthly_limit: f64,
        month: u32,
        year: i32,
    ) -> Result<Budget> {
        let category_label = validate::validate_label(category_label)?;
        let monthly_limit = validate::validate_amount(monthly_limit)?;
        if !(1..=12).contains(&month) {
            return Err(Error::InvalidData(format!("invalid month: {}", month)));
        }

        let conn = self.conn()?;

        let existing: Option<String> = conn
            .query_row(
                "SELECT id FROM budgets WHERE category_label = ? AND month = ? AND year = ?",
                params![category_label, month, year],
                |row| row.get(0),
            )
            .ok();

        if let Some(id) = existing {
            conn.execute(
                "UPDATE budgets SET monthly_limit = ? WHERE id = ?",
                params![monthly_limit, id],
            )?;
            return self.get_budget(&id);
        }

        let id = new_id();
        let created_at = Utc::now();
        conn.execute(
            r#"
            INSERT INTO budgets (id, category_label, monthly_limit, month, year, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
            params![
                id,
                category_label,
                monthly_limit,
                month,
                year,
                format_datetime(created_at),
            ],
        )?;

        Ok(Budget {
            id,
            category_label,
            monthly_limit,
            month,
            year,
            created_at,
        })
    }

    /// List budgets for a month
    pub fn list_budgets(&self, month: u32, year: i32) -> Result<Vec<Budget>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, category_label, monthly_limit, month, year, created_at
            FROM budgets
            WHERE month = ? AND year = ?
            ORDER BY category_label
            "#,
        )?;

        let budgets = stmt
            .query_map(params![month, year], map_budget_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(budgets)
    }

    /// Fetch one budget by id
    pub fn get_budget(&self, id: &str) -> Result<Budget> {
        let conn = self.conn()?;
        conn.query_row(
            "SELECT id, category_label, monthly_limit, month, year, created_at FROM budgets WHERE id = ?",
            params![id],
            map_budget_row,
        )
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound(format!("budget {}", id)),
            other => Error::Database(other),
        })
    }

    /// Delete a budget by id
    pub fn delete_budget(&self, id: &str) -> Result<()> {
        let conn = self.conn()?;
        let deleted = conn.execute("DELETE FROM budgets WHERE id = ?", params![id])?;
        if deleted == 0 {
            return Err(Error::NotFound(format!("budget {}", id)));
        }
        Ok(())
    }
}

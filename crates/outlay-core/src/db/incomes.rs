//! Income operations

use chrono::{NaiveDate, Utc};
use rusqlite::{params, Row};

use super::{format_datetime, new_id, parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{Income, IncomeKind, NewIncome};
use crate::validate;

fn map_income_row(row: &Row<'_>) -> rusqlite::Result<Income> {
    let kind_str: String = row.get(2)?;
    let date_str: String = row.get(3)?;
    let created_at_str: String = row.get(5)?;

    Ok(Income {
        id: row.get(0)?,
        amount: row.get(1)?,
        kind: kind_str.parse().unwrap_or(IncomeKind::Other),
        date_received: NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").unwrap_or_default(),
        note: row.get(4)?,
        created_at: parse_datetime(&created_at_str),
    })
}

impl Database {
    /// Insert a new income record
    pub fn insert_income(&self, income: NewIncome) -> Result<Income> {
        let amount = validate::validate_amount(income.amount)?;
        let note = income.note.as_deref().and_then(validate::sanitize_note);
        let id = new_id();
        let created_at = Utc::now();

        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO incomes (id, amount, kind, date_received, note, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
            params![
                id,
                amount,
                income.kind.as_str(),
                income.date_received.to_string(),
                note,
                format_datetime(created_at),
            ],
        )?;

        Ok(Income {
            id,
            amount,
            kind: income.kind,
            date_received: income.date_received,
            note,
            created_at,
        })
    }

    /// List incomes, optionally windowed by date received, newest first
    pub fn list_incomes(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<Income>> {
        let conn = self.conn()?;

        let mut query = String::from(
            "SELECT id, amount, kind, date_received, note, created_at FROM incomes",
        );
        let mut clauses: Vec<&str> = Vec::new();
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(from) = from {
            clauses.push("date_received >= ?");
            params_vec.push(Box::new(from.to_string()));
        }
        if let Some(to) = to {
            clauses.push("date_received <= ?");
            params_vec.push(Box::new(to.to_string()));
        }
        if !clauses.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&clauses.join(" AND "));
        }
        query.push_str(" ORDER BY date_received DESC, created_at DESC");

        let mut stmt = conn.prepare(&query)?;
        let params_refs: Vec<&dyn rusqlite::ToSql> =
            params_vec.iter().map(|p| p.as_ref()).collect();

        let incomes = stmt
            .query_map(params_refs.as_slice(), map_income_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(incomes)
    }

    /// Delete an income by id
    pub fn delete_income(&self, id: &str) -> Result<()> {
        let conn = self.conn()?;
        let deleted = conn.execute("DELETE FROM incomes WHERE id = ?", params![id])?;
        if deleted == 0 {
            return Err(Error::NotFound(format!("income {}", id)));
        }
        Ok(())
    }
}

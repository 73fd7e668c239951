//! Expense operations

use chrono::{NaiveDate, Utc};
use rusqlite::{params, Row};

use super::{format_datetime, new_id, parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{Expense, NewExpense};
use crate::validate;

fn map_expense_row(row: &Row<'_>) -> rusqlite::Result<Expense> {
    let date_str: String = row.get(1)?;
    let created_at_str: String = row.get(8)?;

    Ok(Expense {
        id: row.get(0)?,
        date: NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").unwrap_or_default(),
        amount: row.get(2)?,
        quantity: row.get(3)?,
        unit: row.get(4)?,
        note: row.get(5)?,
        category_label: row.get(6)?,
        rule_id: row.get(7)?,
        created_at: parse_datetime(&created_at_str),
    })
}

const EXPENSE_COLUMNS: &str =
    "id, date, amount, quantity, unit, note, category_label, rule_id, created_at";

impl Database {
    /// Insert a new expense, normalizing it first
    ///
    /// Returns the stored record with its assigned id.
    pub fn insert_expense(&self, expense: NewExpense) -> Result<Expense> {
        let expense = validate::normalize_new_expense(expense)?;
        let id = new_id();
        let created_at = Utc::now();

        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO expenses (id, date, amount, quantity, unit, note, category_label, rule_id, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
            params![
                id,
                expense.date.to_string(),
                expense.amount,
                expense.quantity,
                expense.unit,
                expense.note,
                expense.category_label,
                expense.rule_id,
                format_datetime(created_at),
            ],
        )?;

        Ok(Expense {
            id,
            date: expense.date,
            amount: expense.amount,
            quantity: expense.quantity,
            unit: expense.unit,
            note: expense.note,
            category_label: expense.category_label,
            rule_id: expense.rule_id,
            created_at,
        })
    }

    /// List expenses, optionally windowed by date, newest first
    pub fn list_expenses(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<Expense>> {
        let conn = self.conn()?;

        let mut query = format!("SELECT {} FROM expenses", EXPENSE_COLUMNS);
        let mut clauses: Vec<&str> = Vec::new();
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(from) = from {
            clauses.push("date >= ?");
            params_vec.push(Box::new(from.to_string()));
        }
        if let Some(to) = to {
            clauses.push("date <= ?");
            params_vec.push(Box::new(to.to_string()));
        }
        if !clauses.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&clauses.join(" AND "));
        }
        query.push_str(" ORDER BY date DESC, created_at DESC");

        let mut stmt = conn.prepare(&query)?;
        let params_refs: Vec<&dyn rusqlite::ToSql> =
            params_vec.iter().map(|p| p.as_ref()).collect();

        let expenses = stmt
            .query_map(params_refs.as_slice(), map_expense_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(expenses)
    }

    /// Fetch one expense by id
    pub fn get_expense(&self, id: &str) -> Result<Expense> {
        let conn = self.conn()?;
        conn.query_row(
            &format!("SELECT {} FROM expenses WHERE id = ?", EXPENSE_COLUMNS),
            params![id],
            map_expense_row,
        )
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound(format!("expense {}", id)),
            other => Error::Database(other),
        })
    }

    /// Delete an expense by id
    pub fn delete_expense(&self, id: &str) -> Result<()> {
        let conn = self.conn()?;
        let deleted = conn.execute("DELETE FROM expenses WHERE id = ?", params![id])?;
        if deleted == 0 {
            return Err(Error::NotFound(format!("expense {}", id)));
        }
        Ok(())
    }
}

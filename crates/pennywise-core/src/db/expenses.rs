//! Expense operations

use rusqlite::{params, OptionalExtension, Row};
use tracing::{debug, info};

use super::{decimal_column, parse_datetime, Database};
use crate::error::Result;
use crate::models::{
    Category, DateRange, Expense, ExpenseFilter, NewExpense, SortField, DATE_FORMAT,
};

const EXPENSE_COLUMNS: &str = "id, amount, category, date, note, created_at";

fn row_to_expense(row: &Row<'_>) -> rusqlite::Result<Expense> {
    let category: String = row.get(2)?;
    let category: Category = category.parse().map_err(|e: String| {
        rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, e.into())
    })?;
    let date: String = row.get(3)?;
    let date = chrono::NaiveDate::parse_from_str(&date, DATE_FORMAT).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e))
    })?;
    let created_at: String = row.get(5)?;

    Ok(Expense {
        id: row.get(0)?,
        amount: decimal_column(row, 1)?,
        category,
        date,
        note: row.get(4)?,
        created_at: parse_datetime(&created_at),
    })
}

/// Make `%` and `_` in user search text match literally
fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Append inclusive date bounds to a WHERE clause
fn push_range(
    range: &DateRange,
    conditions: &mut Vec<String>,
    params: &mut Vec<Box<dyn rusqlite::ToSql>>,
) {
    if let Some(from) = range.from {
        conditions.push("date >= ?".to_string());
        params.push(Box::new(from.to_string()));
    }
    if let Some(to) = range.to {
        conditions.push("date <= ?".to_string());
        params.push(Box::new(to.to_string()));
    }
}

impl Database {
    /// Insert an expense, returning its new ID
    pub fn insert_expense(&self, expense: &NewExpense) -> Result<i64> {
        let conn = self.conn()?;

        conn.execute(
            "INSERT INTO expenses (amount, category, date, note) VALUES (?, ?, ?, ?)",
            params![
                expense.amount.to_string(),
                expense.category.as_str(),
                expense.date.to_string(),
                expense.note,
            ],
        )?;

        let id = conn.last_insert_rowid();
        info!(id, amount = %expense.amount, category = %expense.category, "Expense recorded");
        Ok(id)
    }

    /// Get a single expense
    pub fn get_expense(&self, id: i64) -> Result<Option<Expense>> {
        let conn = self.conn()?;

        let expense = conn
            .query_row(
                &format!("SELECT {} FROM expenses WHERE id = ?", EXPENSE_COLUMNS),
                params![id],
                row_to_expense,
            )
            .optional()?;

        Ok(expense)
    }

    /// Replace every field of an existing expense.
    /// Returns false when no expense has this ID.
    pub fn update_expense(&self, id: i64, expense: &NewExpense) -> Result<bool> {
        let conn = self.conn()?;

        let changed = conn.execute(
            "UPDATE expenses SET amount = ?, category = ?, date = ?, note = ? WHERE id = ?",
            params![
                expense.amount.to_string(),
                expense.category.as_str(),
                expense.date.to_string(),
                expense.note,
                id,
            ],
        )?;

        if changed > 0 {
            info!(id, "Expense updated");
        }
        Ok(changed > 0)
    }

    /// Permanently delete an expense.
    /// Returns false when no expense has this ID.
    pub fn delete_expense(&self, id: i64) -> Result<bool> {
        let conn = self.conn()?;
        let changed = conn.execute("DELETE FROM expenses WHERE id = ?", params![id])?;

        if changed > 0 {
            info!(id, "Expense deleted");
        }
        Ok(changed > 0)
    }

    /// Every expense, oldest first
    pub fn list_all_expenses(&self) -> Result<Vec<Expense>> {
        self.expenses_in_range(&DateRange::all())
    }

    /// Expenses dated within `range`, oldest first
    pub fn expenses_in_range(&self, range: &DateRange) -> Result<Vec<Expense>> {
        let conn = self.conn()?;

        let mut conditions = Vec::new();
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();
        push_range(range, &mut conditions, &mut params);

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let sql = format!(
            "SELECT {} FROM expenses {} ORDER BY date ASC, id ASC",
            EXPENSE_COLUMNS, where_clause
        );

        let param_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();
        let mut stmt = conn.prepare(&sql)?;
        let expenses = stmt
            .query_map(param_refs.as_slice(), row_to_expense)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        debug!(count = expenses.len(), ?range, "Loaded expense snapshot");
        Ok(expenses)
    }

    /// List expenses with category, date, and search filters
    pub fn list_expenses(&self, filter: &ExpenseFilter) -> Result<Vec<Expense>> {
        let conn = self.conn()?;

        let mut conditions = Vec::new();
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(category) = filter.category {
            conditions.push("category = ?".to_string());
            params.push(Box::new(category.as_str()));
        }

        push_range(&filter.range, &mut conditions, &mut params);

        if let Some(q) = &filter.search {
            if !q.trim().is_empty() {
                conditions.push(
                    "(note LIKE ? ESCAPE '\\' OR category LIKE ? ESCAPE '\\')".to_string(),
                );
                let pattern = format!("%{}%", escape_like(q.trim()));
                params.push(Box::new(pattern.clone()));
                params.push(Box::new(pattern));
            }
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let order = filter.order.as_sql();
        let sort_column = match filter.sort {
            SortField::Date => "date",
            SortField::Amount => "CAST(amount AS REAL)",
            SortField::Category => "category",
        };

        let sql = format!(
            "SELECT {} FROM expenses {} ORDER BY {} {}, id {}",
            EXPENSE_COLUMNS, where_clause, sort_column, order, order
        );

        let param_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();
        let mut stmt = conn.prepare(&sql)?;
        let expenses = stmt
            .query_map(param_refs.as_slice(), row_to_expense)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(expenses)
    }

    /// Total number of stored expenses
    pub fn count_expenses(&self) -> Result<i64> {
        let conn = self.conn()?;
        let count = conn.query_row("SELECT COUNT(*) FROM expenses", [], |row| row.get(0))?;
        Ok(count)
    }
}

//! Budget settings (single row)

use rusqlite::params;
use tracing::info;

use super::{decimal_column, Database};
use crate::error::Result;
use crate::models::BudgetSettings;

impl Database {
    /// Current budget settings. The row is seeded with zeros at schema
    /// initialisation, so this never comes back empty.
    pub fn get_budget(&self) -> Result<BudgetSettings> {
        let conn = self.conn()?;

        let budget = conn.query_row(
            "SELECT monthly_income, savings_goal FROM budget_settings WHERE id = 1",
            [],
            |row| {
                Ok(BudgetSettings {
                    monthly_income: decimal_column(row, 0)?,
                    savings_goal: decimal_column(row, 1)?,
                })
            },
        )?;

        Ok(budget)
    }

    /// Overwrite the budget settings
    pub fn set_budget(&self, budget: &BudgetSettings) -> Result<()> {
        let conn = self.conn()?;

        conn.execute(
            r#"
            INSERT INTO budget_settings (id, monthly_income, savings_goal, updated_at)
            VALUES (1, ?, ?, CURRENT_TIMESTAMP)
            ON CONFLICT(id) DO UPDATE SET
                monthly_income = excluded.monthly_income,
                savings_goal = excluded.savings_goal,
                updated_at = excluded.updated_at
            "#,
            params![
                budget.monthly_income.to_string(),
                budget.savings_goal.to_string()
            ],
        )?;

        info!(
            monthly_income = %budget.monthly_income,
            savings_goal = %budget.savings_goal,
            "Budget settings updated"
        );
        Ok(())
    }
}

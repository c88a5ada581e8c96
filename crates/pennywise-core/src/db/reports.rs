//! Report queries
//!
//! Each method loads one expense snapshot and hands it to the pure
//! functions in `crate::report`, so every number in a response comes from
//! the same read.

use chrono::NaiveDate;

use super::Database;
use crate::aggregate::{self, Aggregation};
use crate::error::Result;
use crate::forecast::Forecaster;
use crate::models::{DateRange, Expense, ExpenseFilter, Granularity};
use crate::report::{self, BudgetComparison, Dashboard, MonthlyTrend, NextMonthForecast};

impl Database {
    /// Category and time-bucket totals for `range`
    pub fn spending_aggregation(
        &self,
        granularity: Granularity,
        range: &DateRange,
    ) -> Result<Aggregation> {
        let expenses = self.expenses_in_range(range)?;
        Ok(aggregate::aggregate(&expenses, granularity, range))
    }

    /// Next month's forecast from the trailing window ending at `today`
    pub fn next_month_forecast(
        &self,
        today: NaiveDate,
        forecaster: &Forecaster,
        by_category: bool,
    ) -> Result<NextMonthForecast> {
        let range = report::trailing_month_range(today, forecaster.window());
        let expenses = self.expenses_in_range(&range)?;
        Ok(report::forecast_next_month(
            &expenses,
            today,
            forecaster,
            by_category,
        ))
    }

    /// Trailing monthly totals plus the forecast month
    pub fn monthly_trend(
        &self,
        today: NaiveDate,
        forecaster: &Forecaster,
        months: usize,
    ) -> Result<MonthlyTrend> {
        let range = report::trailing_month_range(today, months.max(forecaster.window()));
        let expenses = self.expenses_in_range(&range)?;
        Ok(report::monthly_trend(&expenses, today, forecaster, months))
    }

    /// Budget settings against this month's spending and the forecast
    pub fn budget_comparison(
        &self,
        today: NaiveDate,
        forecaster: &Forecaster,
    ) -> Result<BudgetComparison> {
        let budget = self.get_budget()?;
        let range = report::trailing_month_range(today, forecaster.window());
        let expenses = self.expenses_in_range(&range)?;
        let next = report::forecast_next_month(&expenses, today, forecaster, false);

        Ok(report::budget_comparison(
            &budget,
            &expenses,
            today,
            &next.forecast,
        ))
    }

    /// The `limit` largest expenses, biggest first
    pub fn top_expenses(&self, limit: usize) -> Result<Vec<Expense>> {
        let expenses = self.list_all_expenses()?;
        Ok(report::top_expenses(&expenses, limit))
    }

    /// Everything the dashboard shows, with the listing narrowed by `filter`
    pub fn dashboard(
        &self,
        filter: &ExpenseFilter,
        today: NaiveDate,
        forecaster: &Forecaster,
    ) -> Result<Dashboard> {
        let all = self.list_all_expenses()?;
        let listed = filter.apply(&all);
        let budget = self.get_budget()?;

        Ok(report::dashboard(&all, listed, &budget, today, forecaster))
    }
}

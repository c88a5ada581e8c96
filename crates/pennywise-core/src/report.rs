//! Report shapes for the dashboard and charts
//!
//! Everything here is computed from an explicit expense snapshot and an
//! explicit `today`, then handed to the server or CLI for display.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::aggregate::{self, BucketTotal, CategoryTotals};
use crate::forecast::{self, Forecast, Forecaster};
use crate::models::{BudgetSettings, Category, DateRange, Expense, Granularity};

/// Months shown in the monthly trend chart, current month included
pub const TREND_MONTHS: usize = 6;

/// Days covered by the daily spending chart
pub const DAILY_WINDOW_DAYS: i64 = 30;

/// Number of largest expenses highlighted on the dashboard
pub const TOP_EXPENSES: usize = 3;

/// Forecast for the month after `today`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NextMonthForecast {
    /// `YYYY-MM` of the forecast month
    pub month: String,
    pub forecast: Forecast,
    /// Monthly totals the forecast was computed from, oldest first
    pub history: Vec<BucketTotal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub by_category: Option<BTreeMap<Category, Forecast>>,
}

/// Recent monthly totals followed by the forecast month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTrend {
    pub actual: Vec<BucketTotal>,
    pub forecast_month: String,
    pub forecast: Forecast,
}

/// Budget settings set against actual and forecast spend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetComparison {
    /// `YYYY-MM` of the current month
    pub month: String,
    pub monthly_income: Decimal,
    pub savings_goal: Decimal,
    pub spent_this_month: Decimal,
    /// Income left after this month's spending
    pub remaining: Decimal,
    /// What can be spent while still meeting the savings goal
    pub spendable: Decimal,
    pub forecast_next_month: Option<Decimal>,
    /// Income minus forecast, when there is a forecast
    pub projected_savings: Option<Decimal>,
    pub on_track: bool,
}

/// Everything the dashboard page shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub expenses: Vec<Expense>,
    /// Sum of the listed (filtered) expenses
    pub total_spent: Decimal,
    pub categories: CategoryTotals,
    pub daily: Vec<BucketTotal>,
    pub forecast: NextMonthForecast,
    pub monthly_trend: MonthlyTrend,
    pub top_expenses: Vec<Expense>,
    pub budget: BudgetComparison,
    pub category_names: Vec<Category>,
}

/// Range covering the `months` calendar months that end with `today`'s month
pub fn trailing_month_range(today: NaiveDate, months: usize) -> DateRange {
    let from = forecast::trailing_months(today, months.max(1))
        .first()
        .copied()
        .unwrap_or_else(|| forecast::month_start(today));
    let to = forecast::next_month(today).pred_opt().unwrap_or(today);
    DateRange::between(from, to)
}

/// Forecast next month from monthly totals of the trailing window.
///
/// Only months with spending count as periods, so a new user with one
/// month of data gets an "insufficient history" forecast rather than an
/// average diluted by empty months.
pub fn forecast_next_month(
    expenses: &[Expense],
    today: NaiveDate,
    forecaster: &Forecaster,
    by_category: bool,
) -> NextMonthForecast {
    let range = trailing_month_range(today, forecaster.window());
    let history = aggregate::bucket_totals(expenses, Granularity::Monthly, &range);
    let amounts: Vec<Decimal> = history.iter().map(|b| b.amount).collect();

    let by_category = by_category.then(|| {
        let months: Vec<String> = history.iter().map(|b| b.period.clone()).collect();
        let series = aggregate::monthly_category_series(expenses, &months);
        forecaster.forecast_by_category(&series)
    });

    NextMonthForecast {
        month: forecast::month_label(forecast::next_month(today)),
        forecast: forecaster.forecast(&amounts),
        history,
        by_category,
    }
}

/// Monthly totals for the trailing `months` plus next month's forecast
pub fn monthly_trend(
    expenses: &[Expense],
    today: NaiveDate,
    forecaster: &Forecaster,
    months: usize,
) -> MonthlyTrend {
    let range = trailing_month_range(today, months);
    let next = forecast_next_month(expenses, today, forecaster, false);

    MonthlyTrend {
        actual: aggregate::bucket_totals(expenses, Granularity::Monthly, &range),
        forecast_month: next.month,
        forecast: next.forecast,
    }
}

/// Compare the budget against this month's spending and the forecast
pub fn budget_comparison(
    budget: &BudgetSettings,
    expenses: &[Expense],
    today: NaiveDate,
    forecast: &Forecast,
) -> BudgetComparison {
    let spent = aggregate::category_totals(expenses, &DateRange::month_of(today)).total;
    let spendable = budget.monthly_income - budget.savings_goal;

    BudgetComparison {
        month: forecast::month_label(today),
        monthly_income: budget.monthly_income,
        savings_goal: budget.savings_goal,
        spent_this_month: spent,
        remaining: budget.monthly_income - spent,
        spendable,
        forecast_next_month: forecast.amount,
        projected_savings: forecast.amount.map(|f| budget.monthly_income - f),
        on_track: spent <= spendable,
    }
}

/// The `limit` largest expenses, biggest first (ties: lowest ID first)
pub fn top_expenses(expenses: &[Expense], limit: usize) -> Vec<Expense> {
    let mut sorted: Vec<&Expense> = expenses.iter().collect();
    sorted.sort_by(|a, b| b.amount.cmp(&a.amount).then(a.id.cmp(&b.id)));
    sorted.into_iter().take(limit).cloned().collect()
}

/// Assemble the dashboard from the full snapshot and the filtered listing
pub fn dashboard(
    all: &[Expense],
    listed: Vec<Expense>,
    budget: &BudgetSettings,
    today: NaiveDate,
    forecaster: &Forecaster,
) -> Dashboard {
    let total_spent = listed.iter().map(|e| e.amount).sum();
    let daily_range = DateRange::between(today - Duration::days(DAILY_WINDOW_DAYS), today);
    let next = forecast_next_month(all, today, forecaster, false);
    let monthly_trend = monthly_trend(all, today, forecaster, TREND_MONTHS);
    let budget = budget_comparison(budget, all, today, &next.forecast);

    Dashboard {
        expenses: listed,
        total_spent,
        categories: aggregate::category_totals(all, &DateRange::all()),
        daily: aggregate::bucket_totals(all, Granularity::Daily, &daily_range),
        forecast: next,
        monthly_trend,
        top_expenses: top_expenses(all, TOP_EXPENSES),
        budget,
        category_names: Category::ALL.to_vec(),
    }
}

//! Report handlers

use std::sync::Arc;

use axum::{
    extract::{Query, Request, State},
    Json,
};
use serde::Deserialize;

use super::{range_params, today};
use crate::{get_actor, AppError, AppState};
use pennywise_core::aggregate::{self, Aggregation, CategoryTotals};
use pennywise_core::forecast::Forecaster;
use pennywise_core::models::Granularity;
use pennywise_core::report::{BudgetComparison, MonthlyTrend, NextMonthForecast, TREND_MONTHS};

/// Query parameters for date-bounded reports
#[derive(Debug, Deserialize)]
pub struct ReportRangeQuery {
    /// Start date (YYYY-MM-DD, inclusive)
    pub from: Option<String>,
    /// End date (YYYY-MM-DD, inclusive)
    pub to: Option<String>,
}

/// Query parameters for the trends report
#[derive(Debug, Deserialize)]
pub struct ReportTrendsQuery {
    /// daily, weekly, or monthly (default monthly)
    pub granularity: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

/// Query parameters for the forecast report
#[derive(Debug, Deserialize)]
pub struct ReportForecastQuery {
    /// Also forecast each category
    #[serde(default)]
    pub by_category: bool,
    /// Override the configured window
    pub window: Option<usize>,
}

/// GET /api/reports/categories - Spending per category
pub async fn report_categories(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ReportRangeQuery>,
    request: Request,
) -> Result<Json<CategoryTotals>, AppError> {
    let actor = get_actor(request.headers());
    let range = range_params(params.from.as_deref(), params.to.as_deref())?;

    let expenses = state.db.expenses_in_range(&range)?;
    let totals = aggregate::category_totals(&expenses, &range);

    state.db.log_audit(
        &actor,
        "report",
        Some("categories"),
        None,
        Some(&format!("from={:?}, to={:?}", range.from, range.to)),
    )?;

    Ok(Json(totals))
}

/// GET /api/reports/trends - Spending per day, week, or month
pub async fn report_trends(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ReportTrendsQuery>,
    request: Request,
) -> Result<Json<Aggregation>, AppError> {
    let actor = get_actor(request.headers());

    let granularity: Granularity = params
        .granularity
        .as_deref()
        .unwrap_or("monthly")
        .parse()
        .map_err(|e: String| AppError::bad_request(&e))?;
    let range = range_params(params.from.as_deref(), params.to.as_deref())?;

    let aggregation = state.db.spending_aggregation(granularity, &range)?;

    state.db.log_audit(
        &actor,
        "report",
        Some("trends"),
        None,
        Some(&format!(
            "granularity={}, from={:?}, to={:?}, buckets={}",
            granularity.as_str(),
            range.from,
            range.to,
            aggregation.buckets.len()
        )),
    )?;

    Ok(Json(aggregation))
}

/// GET /api/reports/forecast - Next month's projected spend
pub async fn report_forecast(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ReportForecastQuery>,
    request: Request,
) -> Result<Json<NextMonthForecast>, AppError> {
    let actor = get_actor(request.headers());

    let forecaster = match params.window {
        Some(window) => Forecaster::new(window).map_err(AppError::from_core)?,
        None => state.forecaster,
    };

    let forecast = state
        .db
        .next_month_forecast(today(), &forecaster, params.by_category)?;

    state.db.log_audit(
        &actor,
        "report",
        Some("forecast"),
        None,
        Some(&format!(
            "window={}, by_category={}, status={:?}",
            forecaster.window(),
            params.by_category,
            forecast.forecast.status
        )),
    )?;

    Ok(Json(forecast))
}

/// GET /api/reports/monthly-trend - Recent months plus the forecast month
pub async fn report_monthly_trend(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<MonthlyTrend>, AppError> {
    let actor = get_actor(request.headers());

    let trend = state
        .db
        .monthly_trend(today(), &state.forecaster, TREND_MONTHS)?;

    state.db.log_audit(
        &actor,
        "report",
        Some("monthly_trend"),
        None,
        Some(&format!("months={}", trend.actual.len())),
    )?;

    Ok(Json(trend))
}

/// GET /api/reports/budget - Budget against actual and forecast spend
pub async fn report_budget(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<BudgetComparison>, AppError> {
    let actor = get_actor(request.headers());

    let comparison = state.db.budget_comparison(today(), &state.forecaster)?;

    state.db.log_audit(
        &actor,
        "report",
        Some("budget"),
        None,
        Some(&format!("on_track={}", comparison.on_track)),
    )?;

    Ok(Json(comparison))
}

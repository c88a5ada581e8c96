//! Expense handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, Request, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use super::{amount_from_json, range_params, read_json};
use crate::{get_actor, AppError, AppState, SuccessResponse, MAX_TOP_LIMIT};
use pennywise_core::models::{
    parse_date, Category, Expense, ExpenseFilter, NewExpense, SortField, SortOrder,
};

/// Query parameters shared by the expense list and the dashboard
#[derive(Debug, Default, Deserialize)]
pub struct ExpenseListQuery {
    pub category: Option<String>,
    /// Start date (YYYY-MM-DD, inclusive)
    pub from: Option<String>,
    /// End date (YYYY-MM-DD, inclusive)
    pub to: Option<String>,
    /// Substring match on note or category
    pub search: Option<String>,
    /// date, amount, or category
    pub sort: Option<String>,
    /// asc or desc
    pub order: Option<String>,
}

impl ExpenseListQuery {
    pub fn to_filter(&self) -> Result<ExpenseFilter, AppError> {
        let category = self
            .category
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .map(|c| c.parse::<Category>())
            .transpose()
            .map_err(|e| AppError::bad_request(&e))?;

        let sort: SortField = self
            .sort
            .as_deref()
            .map(str::parse)
            .transpose()
            .map_err(|e: String| AppError::bad_request(&e))?
            .unwrap_or_default();

        let order: SortOrder = self
            .order
            .as_deref()
            .map(str::parse)
            .transpose()
            .map_err(|e: String| AppError::bad_request(&e))?
            .unwrap_or_default();

        Ok(ExpenseFilter {
            category,
            range: range_params(self.from.as_deref(), self.to.as_deref())?,
            search: self.search.clone(),
            sort,
            order,
        })
    }
}

/// Request body for creating or replacing an expense
#[derive(Debug, Deserialize)]
pub struct ExpenseRequest {
    #[serde(default)]
    pub amount: serde_json::Value,
    pub category: String,
    pub date: String,
    pub note: Option<String>,
}

impl ExpenseRequest {
    fn validate(&self) -> Result<NewExpense, AppError> {
        let amount = amount_from_json(&self.amount, "amount")?;
        let category: Category = self
            .category
            .parse()
            .map_err(|e: String| AppError::bad_request(&e))?;
        let date = parse_date(&self.date).map_err(AppError::from_core)?;

        NewExpense::new(amount, category, date, self.note.clone()).map_err(AppError::from_core)
    }
}

/// Query parameters for top expenses
#[derive(Debug, Deserialize)]
pub struct TopExpensesQuery {
    #[serde(default = "default_top_limit")]
    pub limit: usize,
}

fn default_top_limit() -> usize {
    3
}

/// GET /api/expenses - List expenses with filters
pub async fn list_expenses(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ExpenseListQuery>,
    request: Request,
) -> Result<Json<Vec<Expense>>, AppError> {
    let actor = get_actor(request.headers());
    let filter = params.to_filter()?;

    let expenses = state.db.list_expenses(&filter)?;

    state.db.log_audit(
        &actor,
        "list",
        Some("expense"),
        None,
        Some(&format!(
            "category={:?}, from={:?}, to={:?}, search={:?}, count={}",
            filter.category,
            filter.range.from,
            filter.range.to,
            filter.search,
            expenses.len()
        )),
    )?;

    Ok(Json(expenses))
}

/// POST /api/expenses - Record a new expense
pub async fn create_expense(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<(StatusCode, Json<Expense>), AppError> {
    let actor = get_actor(request.headers());
    let req: ExpenseRequest = read_json(request.into_body()).await?;
    let expense = req.validate()?;

    let id = state.db.insert_expense(&expense)?;

    state.db.log_audit(
        &actor,
        "create",
        Some("expense"),
        Some(id),
        Some(&format!(
            "amount={}, category={}, date={}",
            expense.amount, expense.category, expense.date
        )),
    )?;

    let created = state
        .db
        .get_expense(id)?
        .ok_or_else(|| AppError::internal("Expense not found after creation"))?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/expenses/top - Largest expenses
pub async fn top_expenses(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TopExpensesQuery>,
    request: Request,
) -> Result<Json<Vec<Expense>>, AppError> {
    let actor = get_actor(request.headers());
    let limit = params.limit.clamp(1, MAX_TOP_LIMIT);

    let expenses = state.db.top_expenses(limit)?;

    state.db.log_audit(
        &actor,
        "list",
        Some("expense"),
        None,
        Some(&format!("top limit={}", limit)),
    )?;

    Ok(Json(expenses))
}

/// GET /api/expenses/:id - Get a single expense
pub async fn get_expense(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    request: Request,
) -> Result<Json<Expense>, AppError> {
    let actor = get_actor(request.headers());

    let expense = state
        .db
        .get_expense(id)?
        .ok_or_else(|| AppError::not_found(&format!("Expense {} not found", id)))?;

    state
        .db
        .log_audit(&actor, "view", Some("expense"), Some(id), None)?;

    Ok(Json(expense))
}

/// PUT /api/expenses/:id - Replace every field of an expense
pub async fn update_expense(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    request: Request,
) -> Result<Json<Expense>, AppError> {
    let actor = get_actor(request.headers());
    let req: ExpenseRequest = read_json(request.into_body()).await?;
    let expense = req.validate()?;

    if !state.db.update_expense(id, &expense)? {
        return Err(AppError::not_found(&format!("Expense {} not found", id)));
    }

    state.db.log_audit(
        &actor,
        "update",
        Some("expense"),
        Some(id),
        Some(&format!(
            "amount={}, category={}, date={}",
            expense.amount, expense.category, expense.date
        )),
    )?;

    let updated = state
        .db
        .get_expense(id)?
        .ok_or_else(|| AppError::not_found(&format!("Expense {} not found", id)))?;

    Ok(Json(updated))
}

/// DELETE /api/expenses/:id - Delete an expense
pub async fn delete_expense(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    request: Request,
) -> Result<Json<SuccessResponse>, AppError> {
    let actor = get_actor(request.headers());

    if !state.db.delete_expense(id)? {
        return Err(AppError::not_found(&format!("Expense {} not found", id)));
    }

    state
        .db
        .log_audit(&actor, "delete", Some("expense"), Some(id), None)?;

    Ok(Json(SuccessResponse { success: true }))
}

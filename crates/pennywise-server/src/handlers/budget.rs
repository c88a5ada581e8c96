//! Budget settings handlers

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    Json,
};
use serde::Deserialize;

use super::{amount_from_json, read_json};
use crate::{get_actor, AppError, AppState};
use pennywise_core::models::BudgetSettings;

/// Request body for replacing the budget settings
#[derive(Debug, Deserialize)]
pub struct BudgetRequest {
    #[serde(default)]
    pub monthly_income: serde_json::Value,
    #[serde(default)]
    pub savings_goal: serde_json::Value,
}

/// GET /api/budget - Current budget settings
pub async fn get_budget(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<BudgetSettings>, AppError> {
    let actor = get_actor(request.headers());

    let budget = state.db.get_budget()?;

    state
        .db
        .log_audit(&actor, "view", Some("budget"), None, None)?;

    Ok(Json(budget))
}

/// PUT /api/budget - Replace the budget settings
pub async fn update_budget(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<BudgetSettings>, AppError> {
    let actor = get_actor(request.headers());
    let req: BudgetRequest = read_json(request.into_body()).await?;

    let budget = BudgetSettings::new(
        amount_from_json(&req.monthly_income, "monthly_income")?,
        amount_from_json(&req.savings_goal, "savings_goal")?,
    )
    .map_err(AppError::from_core)?;

    state.db.set_budget(&budget)?;

    state.db.log_audit(
        &actor,
        "update",
        Some("budget"),
        None,
        Some(&format!(
            "monthly_income={}, savings_goal={}",
            budget.monthly_income, budget.savings_goal
        )),
    )?;

    Ok(Json(budget))
}

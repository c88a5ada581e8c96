//! Dashboard handler

use std::sync::Arc;

use axum::{
    extract::{Query, Request, State},
    Json,
};

use super::{today, ExpenseListQuery};
use crate::{get_actor, AppError, AppState};
use pennywise_core::report::Dashboard;

/// GET /api/dashboard - Everything the dashboard page shows
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ExpenseListQuery>,
    request: Request,
) -> Result<Json<Dashboard>, AppError> {
    let actor = get_actor(request.headers());
    let filter = params.to_filter()?;

    let dashboard = state.db.dashboard(&filter, today(), &state.forecaster)?;

    state.db.log_audit(
        &actor,
        "view",
        Some("dashboard"),
        None,
        Some(&format!(
            "listed={}, forecast={:?}",
            dashboard.expenses.len(),
            dashboard.forecast.forecast.status
        )),
    )?;

    Ok(Json(dashboard))
}

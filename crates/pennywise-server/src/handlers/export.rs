//! Export handlers

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, Response, StatusCode},
};
use chrono::NaiveDate;
use serde::Deserialize;

use super::today;
use crate::{get_actor, AppError, AppState};
use pennywise_core::export::ExportFormat;
use pennywise_core::models::parse_date;

/// Query parameters for expense export
#[derive(Debug, Deserialize)]
pub struct ExpenseExportQuery {
    /// csv (default) or json
    pub format: Option<String>,
    /// YYYY-MM, or "all" for every expense (default: current month)
    pub month: Option<String>,
}

/// Resolve the `month` parameter to a day inside that month
fn export_month(month: Option<&str>) -> Result<Option<NaiveDate>, AppError> {
    match month.map(str::trim) {
        None | Some("") => Ok(Some(today())),
        Some("all") => Ok(None),
        Some(m) => parse_date(&format!("{}-01", m))
            .map(Some)
            .map_err(|_| AppError::bad_request("Invalid month format (use YYYY-MM)")),
    }
}

/// GET /api/export/expenses - Download expenses as CSV or JSON
pub async fn export_expenses(
    State(state): State<Arc<AppState>>,
    headers: axum::http::HeaderMap,
    Query(params): Query<ExpenseExportQuery>,
) -> Result<Response<Body>, AppError> {
    let actor = get_actor(&headers);

    let format: ExportFormat = params
        .format
        .as_deref()
        .unwrap_or("csv")
        .parse()
        .map_err(|e: String| AppError::bad_request(&e))?;
    let month = export_month(params.month.as_deref())?;

    let export = state.db.export_expenses(month, format)?;

    state.db.log_audit(
        &actor,
        "export",
        Some("expense"),
        None,
        Some(&format!(
            "format={:?}, file={}, count={}",
            format, export.filename, export.count
        )),
    )?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, format.content_type())
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", export.filename),
        )
        .body(Body::from(export.body))
        .map_err(|e| AppError::internal(&e.to_string()))
}

//! Audit log handlers

use std::sync::Arc;

use axum::{
    extract::{Query, Request, State},
    Json,
};
use serde::Deserialize;

use crate::{get_actor, AppError, AppState, MAX_PAGE_LIMIT};
use pennywise_core::{AuditEntry, AuditFilter};

const DEFAULT_AUDIT_LIMIT: i64 = 100;

/// Query parameters for the audit log
#[derive(Debug, Deserialize)]
pub struct AuditQuery {
    pub limit: Option<i64>,
    /// Only entries about this kind of entity (`expense`, `budget`, ...)
    pub entity_type: Option<String>,
    /// Only entries about this record; e.g. one expense's history
    pub entity_id: Option<i64>,
}

impl AuditQuery {
    fn to_filter(&self) -> AuditFilter {
        AuditFilter {
            entity_type: self
                .entity_type
                .as_deref()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_lowercase),
            entity_id: self.entity_id,
        }
    }
}

/// GET /api/audit - Recent audit log entries, newest first
pub async fn list_audit_log(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AuditQuery>,
    request: Request,
) -> Result<Json<Vec<AuditEntry>>, AppError> {
    let actor = get_actor(request.headers());
    let limit = params
        .limit
        .unwrap_or(DEFAULT_AUDIT_LIMIT)
        .clamp(1, MAX_PAGE_LIMIT);
    let filter = params.to_filter();

    let entries = state.db.list_audit_log(&filter, limit)?;

    // Reading the log is logged too, after the read
    state.db.log_audit(
        &actor,
        "list",
        Some("audit_log"),
        None,
        Some(&format!(
            "limit={}, entity_type={:?}, entity_id={:?}, returned={}",
            limit,
            filter.entity_type,
            filter.entity_id,
            entries.len()
        )),
    )?;

    Ok(Json(entries))
}

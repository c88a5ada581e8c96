//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod audit;
pub mod budget;
pub mod dashboard;
pub mod expenses;
pub mod export;
pub mod reports;

// Re-export all handlers for use in router
pub use audit::*;
pub use budget::*;
pub use dashboard::*;
pub use expenses::*;
pub use export::*;
pub use reports::*;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;

use crate::{AppError, MAX_BODY_SIZE};
use pennywise_core::models::{parse_amount, parse_date, DateRange};

/// Read and decode a JSON request body
pub(crate) async fn read_json<T: DeserializeOwned>(body: axum::body::Body) -> Result<T, AppError> {
    let bytes = axum::body::to_bytes(body, MAX_BODY_SIZE)
        .await
        .map_err(|_| AppError::bad_request("Invalid request body"))?;
    serde_json::from_slice(&bytes).map_err(|_| AppError::bad_request("Invalid JSON"))
}

/// Accept an amount sent either as a JSON number or a string.
/// Numbers are read through their decimal text so `12.1` stays exact.
pub(crate) fn amount_from_json(value: &serde_json::Value, field: &str) -> Result<Decimal, AppError> {
    let text = match value {
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => {
            return Err(AppError::bad_request(&format!("Missing {}", field)))
        }
        _ => return Err(AppError::bad_request(&format!("Invalid {}", field))),
    };
    parse_amount(&text).map_err(AppError::from_core)
}

/// Parse an optional `YYYY-MM-DD` query parameter
pub(crate) fn date_param(value: Option<&str>, name: &str) -> Result<Option<NaiveDate>, AppError> {
    value
        .filter(|s| !s.trim().is_empty())
        .map(parse_date)
        .transpose()
        .map_err(|_| {
            AppError::bad_request(&format!("Invalid '{}' date format (use YYYY-MM-DD)", name))
        })
}

/// Build an inclusive range from optional `from` / `to` parameters
pub(crate) fn range_params(from: Option<&str>, to: Option<&str>) -> Result<DateRange, AppError> {
    let range = DateRange {
        from: date_param(from, "from")?,
        to: date_param(to, "to")?,
    };
    if let (Some(from), Some(to)) = (range.from, range.to) {
        if from > to {
            return Err(AppError::bad_request("'from' must not be after 'to'"));
        }
    }
    Ok(range)
}

/// Today in local time; every report is computed against it
pub(crate) fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

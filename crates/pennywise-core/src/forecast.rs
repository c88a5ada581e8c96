//! Next-period spending forecast
//!
//! A simple moving average: the unweighted mean of the last K period
//! totals. Short histories still produce a number but are flagged, and an
//! empty history produces no number at all, so callers can show
//! "not enough history" instead of a misleading zero.

use std::collections::BTreeMap;

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::Category;

/// Default number of trailing periods averaged
pub const DEFAULT_WINDOW: usize = 3;

/// Largest accepted window (ten years of months)
pub const MAX_WINDOW: usize = 120;

/// How much history backed a forecast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForecastStatus {
    /// A full window of periods was averaged
    Complete,
    /// Fewer periods than the window; averaged what exists
    InsufficientHistory,
    /// No periods at all; there is no forecast
    NoData,
}

/// Projected spend for the next period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Forecast {
    pub status: ForecastStatus,
    /// `None` exactly when `status` is `NoData`
    pub amount: Option<Decimal>,
    pub periods_used: usize,
    pub window: usize,
}

impl Forecast {
    fn no_data(window: usize) -> Self {
        Self {
            status: ForecastStatus::NoData,
            amount: None,
            periods_used: 0,
            window,
        }
    }

    pub fn is_no_data(&self) -> bool {
        self.status == ForecastStatus::NoData
    }

    pub fn is_insufficient_history(&self) -> bool {
        self.status == ForecastStatus::InsufficientHistory
    }
}

/// Simple-moving-average forecaster over a trailing window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Forecaster {
    window: usize,
}

impl Forecaster {
    pub fn new(window: usize) -> Result<Self> {
        if window == 0 {
            return Err(Error::InvalidData(
                "Forecast window must be at least 1 period".to_string(),
            ));
        }
        if window > MAX_WINDOW {
            return Err(Error::InvalidData(format!(
                "Forecast window cannot exceed {} periods (got {})",
                MAX_WINDOW, window
            )));
        }
        Ok(Self { window })
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Forecast the period after `history` (oldest first)
    pub fn forecast(&self, history: &[Decimal]) -> Forecast {
        if history.is_empty() {
            return Forecast::no_data(self.window);
        }

        let used = history.len().min(self.window);
        let recent = &history[history.len() - used..];
        let sum: Decimal = recent.iter().sum();
        let mean = (sum / Decimal::from(used as i64))
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

        let status = if used < self.window {
            ForecastStatus::InsufficientHistory
        } else {
            ForecastStatus::Complete
        };

        Forecast {
            status,
            amount: Some(mean),
            periods_used: used,
            window: self.window,
        }
    }

    /// Forecast each category's series independently
    pub fn forecast_by_category(
        &self,
        series: &BTreeMap<Category, Vec<Decimal>>,
    ) -> BTreeMap<Category, Forecast> {
        series
            .iter()
            .map(|(category, history)| (*category, self.forecast(history)))
            .collect()
    }
}

impl Default for Forecaster {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
        }
    }
}

/// First day of the month containing `date`
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// First day of the month after `date`
pub fn next_month(date: NaiveDate) -> NaiveDate {
    let start = month_start(date);
    start.checked_add_months(Months::new(1)).unwrap_or(start)
}

/// `YYYY-MM` label of the month containing `date`
pub fn month_label(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// First days of the `count` calendar months ending with the month of
/// `today`, oldest first. `count` is capped at `MAX_WINDOW`.
pub fn trailing_months(today: NaiveDate, count: usize) -> Vec<NaiveDate> {
    let current = month_start(today);
    (0..count.min(MAX_WINDOW))
        .rev()
        .filter_map(|back| u32::try_from(back).ok())
        .filter_map(|back| current.checked_sub_months(Months::new(back)))
        .collect()
}

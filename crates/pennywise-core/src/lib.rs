//! Pennywise Core Library
//!
//! Shared functionality for the Pennywise expense tracker:
//! - Database access and migrations (expenses, budget, audit log)
//! - Spending aggregation by category and by day, week, or month
//! - Moving-average forecasting of next month's spend
//! - Dashboard, trend, and budget reports
//! - CSV and JSON export

pub mod aggregate;
pub mod db;
pub mod error;
pub mod export;
pub mod forecast;
pub mod models;
pub mod report;

pub use aggregate::{Aggregation, BucketTotal, CategoryTotal, CategoryTotals};
pub use db::{AuditEntry, AuditFilter, Database};
pub use error::{Error, Result};
pub use export::{Export, ExportFormat};
pub use forecast::{Forecast, ForecastStatus, Forecaster, DEFAULT_WINDOW, MAX_WINDOW};
pub use models::{
    BudgetSettings, Category, DateRange, Expense, ExpenseFilter, Granularity, NewExpense,
    SortField, SortOrder,
};
pub use report::{BudgetComparison, Dashboard, MonthlyTrend, NextMonthForecast};

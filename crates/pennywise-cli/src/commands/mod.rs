//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Init command and shared utilities (open_db)
//! - `expenses` - Expense commands (add, edit, delete, show, list)
//! - `budget` - Budget settings commands
//! - `reports` - Report, forecast, and dashboard commands
//! - `export` - CSV/JSON export command
//! - `serve` - Web server command

pub mod budget;
pub mod core;
pub mod expenses;
pub mod export;
pub mod reports;
pub mod serve;

// Re-export command functions for main.rs
pub use budget::*;
pub use core::*;
pub use expenses::*;
pub use export::*;
pub use reports::*;
pub use serve::*;

use chrono::NaiveDate;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Today in local time
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

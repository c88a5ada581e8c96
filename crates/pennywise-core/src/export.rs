//! Expense export to CSV and JSON

use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::db::Database;
use crate::error::{Error, Result};
use crate::forecast::month_label;
use crate::models::{DateRange, Expense};

/// Column order of exported CSV files
pub const CSV_HEADER: [&str; 5] = ["id", "date", "category", "amount", "note"];

/// Export file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Csv => "text/csv; charset=utf-8",
            Self::Json => "application/json",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(format!("Unknown export format: {}", other)),
        }
    }
}

/// A rendered export ready to write or send
#[derive(Debug, Clone)]
pub struct Export {
    pub filename: String,
    pub format: ExportFormat,
    pub body: String,
    pub count: usize,
}

/// `expenses_YYYY-MM.ext` for a month, `expenses_all.ext` otherwise
pub fn export_filename(month: Option<NaiveDate>, format: ExportFormat) -> String {
    let scope = month.map(month_label).unwrap_or_else(|| "all".to_string());
    format!("expenses_{}.{}", scope, format.extension())
}

fn newest_first(expenses: &[Expense]) -> Vec<&Expense> {
    let mut sorted: Vec<&Expense> = expenses.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
    sorted
}

/// Render expenses as CSV, newest first
pub fn expenses_to_csv(expenses: &[Expense]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;

    for expense in newest_first(expenses) {
        writer.write_record([
            expense.id.to_string(),
            expense.date.to_string(),
            expense.category.to_string(),
            expense.amount.to_string(),
            expense.note.clone().unwrap_or_default(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| Error::Io(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| Error::InvalidData(format!("Invalid UTF-8 in CSV: {}", e)))
}

/// Render expenses as a pretty JSON array, newest first
pub fn expenses_to_json(expenses: &[Expense]) -> Result<String> {
    Ok(serde_json::to_string_pretty(&newest_first(expenses))?)
}

impl Database {
    /// Export every expense, or only those in `month`'s calendar month
    pub fn export_expenses(&self, month: Option<NaiveDate>, format: ExportFormat) -> Result<Export> {
        let range = month.map(DateRange::month_of).unwrap_or_default();
        let expenses = self.expenses_in_range(&range)?;

        let body = match format {
            ExportFormat::Csv => expenses_to_csv(&expenses)?,
            ExportFormat::Json => expenses_to_json(&expenses)?,
        };

        info!(count = expenses.len(), ?format, "Exported expenses");

        Ok(Export {
            filename: export_filename(month, format),
            format,
            body,
            count: expenses.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn expense(id: i64, cents: i64, date: &str, note: Option<&str>) -> Expense {
        Expense {
            id,
            amount: Decimal::new(cents, 2),
            category: Category::Food,
            date: date.parse().unwrap(),
            note: note.map(String::from),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_csv_is_newest_first_with_header() {
        let expenses = vec![
            expense(1, 1250, "2024-03-01", Some("lunch")),
            expense(2, 500, "2024-03-05", None),
            expense(3, 99, "2024-03-05", Some("coffee, large")),
        ];

        let csv = expenses_to_csv(&expenses).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "id,date,category,amount,note");
        assert_eq!(lines[1], "3,2024-03-05,Food,0.99,\"coffee, large\"");
        assert_eq!(lines[2], "2,2024-03-05,Food,5.00,");
        assert_eq!(lines[3], "1,2024-03-01,Food,12.50,lunch");
    }

    #[test]
    fn test_csv_of_nothing_is_just_the_header() {
        let csv = expenses_to_csv(&[]).unwrap();
        assert_eq!(csv.trim_end(), "id,date,category,amount,note");
    }

    #[test]
    fn test_json_export() {
        let expenses = vec![
            expense(1, 1250, "2024-03-01", None),
            expense(2, 500, "2024-03-05", None),
        ];
        let json: serde_json::Value =
            serde_json::from_str(&expenses_to_json(&expenses).unwrap()).unwrap();

        assert_eq!(json.as_array().unwrap().len(), 2);
        assert_eq!(json[0]["id"], 2);
        assert_eq!(json[0]["category"], "Food");
    }

    #[test]
    fn test_export_filename() {
        let march = NaiveDate::from_ymd_opt(2024, 3, 17);
        assert_eq!(export_filename(march, ExportFormat::Csv), "expenses_2024-03.csv");
        assert_eq!(export_filename(None, ExportFormat::Json), "expenses_all.json");
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("json".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert!("xml".parse::<ExportFormat>().is_err());
    }
}

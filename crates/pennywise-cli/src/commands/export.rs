//! Export command implementation

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use pennywise_core::db::Database;
use pennywise_core::export::ExportFormat;
use pennywise_core::models::parse_date;

/// Resolve `--month` to a day inside that month; `None` means every expense
fn export_month(month: Option<&str>, today: NaiveDate) -> Result<Option<NaiveDate>> {
    match month.map(str::trim) {
        None | Some("") => Ok(Some(today)),
        Some("all") => Ok(None),
        Some(m) => parse_date(&format!("{}-01", m))
            .map(Some)
            .with_context(|| format!("Invalid --month '{}' (use YYYY-MM)", m)),
    }
}

/// Write an export file, returning where it went
pub fn cmd_export(
    db: &Database,
    month: Option<&str>,
    format: &str,
    output: Option<&Path>,
    today: NaiveDate,
) -> Result<PathBuf> {
    let format: ExportFormat = format.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    let month = export_month(month, today)?;

    let export = db.export_expenses(month, format)?;
    let path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(&export.filename));

    std::fs::write(&path, &export.body)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!(
        "📤 Exported {} expenses to {}",
        export.count,
        path.display()
    );
    Ok(path)
}

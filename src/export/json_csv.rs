// src/export/json_csv.rs

use crate::core::report::MonthOverview;
use crate::errors::{AppError, AppResult};
use crate::export::model::{entry_rows, overview_rows};
use crate::export::notify_export_success;
use crate::ui::messages::info;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Export JSON pretty-printed.
pub(crate) fn export_json(overview: &MonthOverview, path: &Path) -> AppResult<()> {
    info(format!("Exporting to JSON: {}", path.display()));

    let json_data = serde_json::to_string_pretty(overview)
        .map_err(|e| AppError::Export(format!("JSON serialization error: {e}")))?;

    let mut file = File::create(path)?;
    file.write_all(json_data.as_bytes())?;

    notify_export_success("JSON", path);
    Ok(())
}

/// Export CSV: one row per employee, or per entry with `details`.
pub(crate) fn export_csv(
    overview: &MonthOverview,
    path: &Path,
    delimiter: u8,
    details: bool,
) -> AppResult<()> {
    info(format!("Exporting to CSV: {}", path.display()));

    if details {
        write_csv(&entry_rows(overview), path, delimiter)?;
    } else {
        write_csv(&overview_rows(overview), path, delimiter)?;
    }

    notify_export_success("CSV", path);
    Ok(())
}

/// Header comes from the serde field names.
fn write_csv<T: Serialize>(rows: &[T], path: &Path, delimiter: u8) -> AppResult<()> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_path(path)
        .map_err(|e| AppError::Export(format!("CSV open error: {e}")))?;

    for item in rows {
        wtr.serialize(item)
            .map_err(|e| AppError::Export(format!("CSV write error: {e}")))?;
    }

    wtr.flush()?;
    Ok(())
}

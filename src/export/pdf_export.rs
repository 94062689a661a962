// src/export/pdf_export.rs

use crate::core::report::MonthOverview;
use crate::errors::{AppError, AppResult};
use crate::export::model::{PDF_ENTRY_HEADERS, PDF_SUMMARY_HEADERS, pdf_entry_rows, pdf_summary_rows};
use crate::export::notify_export_success;
use crate::export::pdf::PdfManager;
use crate::ui::messages::info;
use crate::utils::date::month_name;
use chrono::Local;
use std::path::Path;

pub(crate) fn pdf_title(overview: &MonthOverview) -> String {
    format!(
        "Monthly overview {} {}",
        month_name(overview.month),
        overview.year
    )
}

/// Summary table, then one table per employee with `details`.
pub(crate) fn export_pdf(
    overview: &MonthOverview,
    path: &Path,
    currency: &str,
    details: bool,
) -> AppResult<()> {
    info(format!("Exporting to PDF: {}", path.display()));

    let mut pdf = PdfManager::new(&pdf_title(overview));
    pdf.write_title(&format!(
        "Generated on {}",
        Local::now().format("%d.%m.%Y %H:%M")
    ));

    pdf.write_table(
        Some("Summary"),
        &PDF_SUMMARY_HEADERS,
        &pdf_summary_rows(overview, currency),
    );

    if details {
        for (heading, rows) in pdf_entry_rows(overview, currency) {
            pdf.write_table(Some(&heading), &PDF_ENTRY_HEADERS, &rows);
        }
    }

    pdf.save(path)
        .map_err(|e| AppError::Export(format!("PDF export error: {e}")))?;

    notify_export_success("PDF", path);
    Ok(())
}

// src/export/logic.rs

use crate::config::Config;
use crate::core::report::ReportLogic;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::pdf_export::export_pdf;
use crate::export::xlsx::export_xlsx;
use crate::ui::messages::warning;
use crate::utils::date::month_name;
use crate::utils::path::expand_tilde;

/// High-level export of a month overview.
pub struct ExportLogic;

impl ExportLogic {
    /// Write the overview of `(year, month)` to `file`.
    ///
    /// `file` must be absolute; an existing file is replaced only with
    /// `force` or after confirmation. Every entry date of the month is
    /// recomputed before the data is read.
    #[allow(clippy::too_many_arguments)]
    pub fn export(
        pool: &mut DbPool,
        cfg: &Config,
        format: ExportFormat,
        file: &str,
        year: i32,
        month: u32,
        details: bool,
        force: bool,
    ) -> AppResult<()> {
        let path = expand_tilde(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "Output file path must be absolute: {file}"
            )));
        }

        ensure_writable(&path, force)?;

        let overview = ReportLogic::month_overview(pool, cfg, year, month)?;

        if !overview.has_entries() {
            warning(format!(
                "No entries found for {} {}.",
                month_name(month),
                year
            ));
        }

        match format {
            ExportFormat::Csv => export_csv(&overview, &path, cfg.csv_delimiter_byte()?, details)?,
            ExportFormat::Json => export_json(&overview, &path)?,
            ExportFormat::Xlsx => export_xlsx(&overview, &path, details)?,
            ExportFormat::Pdf => export_pdf(&overview, &path, &cfg.currency_symbol, details)?,
        }

        ttlog(
            &pool.conn,
            "export",
            &path.to_string_lossy(),
            &format!("{} export of {year:04}-{month:02}", format.as_str()),
        )?;

        Ok(())
    }
}

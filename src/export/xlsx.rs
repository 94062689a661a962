// src/export/xlsx.rs

use crate::core::report::MonthOverview;
use crate::errors::{AppError, AppResult};
use crate::export::excel_date::parse_to_excel_date;
use crate::export::model::{
    ENTRY_HEADERS, OVERVIEW_HEADERS, entry_rows, entry_to_cells, overview_rows, overview_to_cells,
};
use crate::export::notify_export_success;
use crate::ui::messages::info;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook, Worksheet};
use std::path::Path;
use unicode_width::UnicodeWidthStr;

/// Columns written as text even when they look numeric.
const TEXT_COLUMNS: [&str; 2] = ["name", "employee"];

/// Export XLSX: an "Overview" sheet, plus "Entries" with `details`.
pub(crate) fn export_xlsx(overview: &MonthOverview, path: &Path, details: bool) -> AppResult<()> {
    info(format!("Exporting to XLSX: {}", path.display()));

    let mut workbook = Workbook::new();

    let summary: Vec<Vec<String>> = overview_rows(overview)
        .iter()
        .map(overview_to_cells)
        .collect();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Overview").map_err(to_app_error)?;
    write_sheet(sheet, &OVERVIEW_HEADERS, &summary)?;

    if details {
        let entries: Vec<Vec<String>> = entry_rows(overview).iter().map(entry_to_cells).collect();
        let sheet = workbook.add_worksheet();
        sheet.set_name("Entries").map_err(to_app_error)?;
        write_sheet(sheet, &ENTRY_HEADERS, &entries)?;
    }

    workbook.save(path).map_err(to_app_error)?;

    notify_export_success("XLSX", path);
    Ok(())
}

/// Styled header, banded rows and auto column widths.
fn write_sheet(worksheet: &mut Worksheet, headers: &[&str], rows: &[Vec<String>]) -> AppResult<()> {
    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x2F75B5))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_with_format(0, col as u16, *header, &header_format)
            .map_err(to_app_error)?;
    }

    worksheet.set_freeze_panes(1, 0).map_err(to_app_error)?;

    if rows.is_empty() {
        worksheet
            .write(1, 0, "No data available")
            .map_err(to_app_error)?;
    }

    let mut col_widths: Vec<usize> = headers.iter().map(|h| UnicodeWidthStr::width(*h)).collect();

    let band1 = Color::RGB(0xEAF3FB);
    let band2 = Color::RGB(0xFFFFFF);

    for (row_index, values) in rows.iter().enumerate() {
        let row = (row_index + 1) as u32;
        let band_color = if row_index % 2 == 0 { band1 } else { band2 };

        for (col, value) in values.iter().enumerate().take(headers.len()) {
            let as_text = TEXT_COLUMNS.contains(&headers[col]);
            write_xlsx_cell(worksheet, row, col as u16, value, band_color, as_text)?;
            col_widths[col] = col_widths[col].max(UnicodeWidthStr::width(value.as_str()));
        }
    }

    for (c, w) in col_widths.iter().enumerate() {
        worksheet
            .set_column_width(c as u16, *w as f64 + 2.0)
            .map_err(to_app_error)?;
    }

    Ok(())
}

/// Dates and times become Excel serials, numbers stay numeric, the rest is text.
fn write_xlsx_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    s: &str,
    bg: Color,
    as_text: bool,
) -> AppResult<()> {
    let base = Format::new()
        .set_background_color(bg)
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    if !as_text {
        if let Some((num_format, serial)) = parse_to_excel_date(s) {
            let fmt = base.set_num_format(num_format);
            worksheet
                .write_with_format(row, col, serial, &fmt)
                .map_err(to_app_error)?;
            return Ok(());
        }

        if let Ok(num) = s.parse::<f64>() {
            let fmt = base.set_align(FormatAlign::Right);
            worksheet
                .write_with_format(row, col, num, &fmt)
                .map_err(to_app_error)?;
            return Ok(());
        }
    }

    worksheet
        .write_with_format(row, col, s, &base)
        .map_err(to_app_error)?;

    Ok(())
}

fn to_app_error<E: std::fmt::Display>(e: E) -> AppError {
    AppError::Export(e.to_string())
}

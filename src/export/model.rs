// src/export/model.rs

use crate::core::report::MonthOverview;
use crate::utils::date::display_date;
use crate::utils::formatting::{format_hours_minutes, format_money, one_line};
use crate::utils::time::{format_time, round2};
use serde::Serialize;

/// One summary line per employee.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct OverviewRow {
    pub employee_id: i64,
    pub name: String,
    pub total_hours: f64,
    pub work_days: u32,
    pub vacation_days: u32,
    pub sick_days: u32,
    pub tours_before_18: i64,
    pub tours_after_18: i64,
    pub total_commission: f64,
    pub contract_hours_month: Option<f64>,
}

/// One line per time entry (`--details`).
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct EntryRow {
    pub employee: String,
    pub date: String,
    pub entry_type: String,
    pub start_time: String,
    pub end_time: String,
    pub pause_minutes: i64,
    pub hours: f64,
    pub tours_before_18: i64,
    pub tours_after_18: i64,
    pub commission: f64,
    pub notes: String,
}

pub(crate) const OVERVIEW_HEADERS: [&str; 10] = [
    "id",
    "name",
    "hours",
    "work_days",
    "vacation_days",
    "sick_days",
    "tours_before_18",
    "tours_after_18",
    "commission",
    "expected_hours",
];

pub(crate) const ENTRY_HEADERS: [&str; 11] = [
    "employee",
    "date",
    "type",
    "start",
    "end",
    "pause_min",
    "hours",
    "tours_before_18",
    "tours_after_18",
    "commission",
    "notes",
];

pub(crate) fn overview_rows(overview: &MonthOverview) -> Vec<OverviewRow> {
    overview
        .employees
        .iter()
        .map(|m| OverviewRow {
            employee_id: m.employee.id,
            name: m.employee.name.clone(),
            total_hours: m.summary.total_hours,
            work_days: m.summary.work_days,
            vacation_days: m.summary.vacation_days,
            sick_days: m.summary.sick_days,
            tours_before_18: m.summary.total_tours_before_18,
            tours_after_18: m.summary.total_tours_after_18,
            total_commission: m.summary.total_commission,
            contract_hours_month: m.summary.contract_hours_month,
        })
        .collect()
}

pub(crate) fn entry_rows(overview: &MonthOverview) -> Vec<EntryRow> {
    let mut out = Vec::new();
    for m in &overview.employees {
        for e in &m.entries {
            out.push(EntryRow {
                employee: m.employee.name.clone(),
                date: e.date.format("%Y-%m-%d").to_string(),
                entry_type: e.entry_type.to_db_str().to_string(),
                start_time: e.start_time.map(format_time).unwrap_or_default(),
                end_time: e.end_time.map(format_time).unwrap_or_default(),
                pause_minutes: e.pause_minutes,
                hours: round2(e.worked_hours().unwrap_or(0.0)),
                tours_before_18: e.tours_before_18,
                tours_after_18: e.tours_after_18,
                commission: e.commission,
                notes: e.notes.clone(),
            });
        }
    }
    out
}

/// Plain cells for spreadsheet output; numbers stay machine-readable.
pub(crate) fn overview_to_cells(r: &OverviewRow) -> Vec<String> {
    vec![
        r.employee_id.to_string(),
        r.name.clone(),
        r.total_hours.to_string(),
        r.work_days.to_string(),
        r.vacation_days.to_string(),
        r.sick_days.to_string(),
        r.tours_before_18.to_string(),
        r.tours_after_18.to_string(),
        r.total_commission.to_string(),
        r.contract_hours_month
            .map(|h| h.to_string())
            .unwrap_or_default(),
    ]
}

pub(crate) fn entry_to_cells(r: &EntryRow) -> Vec<String> {
    vec![
        r.employee.clone(),
        r.date.clone(),
        r.entry_type.clone(),
        r.start_time.clone(),
        r.end_time.clone(),
        r.pause_minutes.to_string(),
        r.hours.to_string(),
        r.tours_before_18.to_string(),
        r.tours_after_18.to_string(),
        r.commission.to_string(),
        r.notes.clone(),
    ]
}

pub(crate) const PDF_SUMMARY_HEADERS: [&str; 9] = [
    "Employee",
    "Hours",
    "Work days",
    "Vacation",
    "Sick",
    "Tours < 18",
    "Tours >= 18",
    "Commission",
    "Expected hours",
];

pub(crate) const PDF_ENTRY_HEADERS: [&str; 9] = [
    "Date",
    "Type",
    "Start",
    "End",
    "Pause",
    "Hours",
    "Tours < 18 / >= 18",
    "Commission",
    "Notes",
];

/// Human-formatted summary table for the PDF.
pub(crate) fn pdf_summary_rows(overview: &MonthOverview, currency: &str) -> Vec<Vec<String>> {
    overview
        .employees
        .iter()
        .map(|m| {
            let s = &m.summary;
            vec![
                m.employee.name.clone(),
                format_hours_minutes(s.total_hours),
                s.work_days.to_string(),
                s.vacation_days.to_string(),
                s.sick_days.to_string(),
                s.total_tours_before_18.to_string(),
                s.total_tours_after_18.to_string(),
                format_money(s.total_commission, currency),
                s.contract_hours_month
                    .map(format_hours_minutes)
                    .unwrap_or_else(|| "-".to_string()),
            ]
        })
        .collect()
}

pub(crate) fn pdf_entry_rows(
    overview: &MonthOverview,
    currency: &str,
) -> Vec<(String, Vec<Vec<String>>)> {
    overview
        .employees
        .iter()
        .map(|m| {
            let heading = format!(
                "{} ({} h/week)",
                m.employee.name,
                crate::utils::format_decimal(m.employee.contract_hours, "")
            );
            let rows = m
                .entries
                .iter()
                .map(|e| {
                    vec![
                        display_date(e.date),
                        e.entry_type.label().to_string(),
                        e.start_time.map(format_time).unwrap_or_else(|| "-".into()),
                        e.end_time.map(format_time).unwrap_or_else(|| "-".into()),
                        format!("{} min", e.pause_minutes),
                        e.worked_hours()
                            .map(format_hours_minutes)
                            .unwrap_or_else(|| "-".into()),
                        format!("{} / {}", e.tours_before_18, e.tours_after_18),
                        format_money(e.commission, currency),
                        one_line(&e.notes, 30),
                    ]
                })
                .collect();
            (heading, rows)
        })
        .collect()
}

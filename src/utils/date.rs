//! Date helpers: strict parsing, month bounds and display names.

use crate::errors::{AppResult, ParseError};
use chrono::{Datelike, NaiveDate};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| ParseError::InvalidDate(s.to_string()).into())
}

pub fn parse_optional_date(s: Option<&str>) -> AppResult<Option<NaiveDate>> {
    s.map(parse_date).transpose()
}

/// Parse a `YYYY-MM` month into (year, month).
pub fn parse_month(s: &str) -> AppResult<(i32, u32)> {
    let invalid = || ParseError::InvalidMonth(s.to_string());

    let (y, m) = s.trim().split_once('-').ok_or_else(invalid)?;
    if y.len() != 4 || m.len() != 2 {
        return Err(invalid().into());
    }

    let year: i32 = y.parse().map_err(|_| invalid())?;
    let month: u32 = m.parse().map_err(|_| invalid())?;
    check_month(year, month)?;

    Ok((year, month))
}

pub fn check_month(year: i32, month: u32) -> AppResult<()> {
    if !(1..=12).contains(&month) {
        return Err(ParseError::InvalidMonth(format!("{year:04}-{month:02}")).into());
    }
    Ok(())
}

/// First and last day of a calendar month.
pub fn month_bounds(year: i32, month: u32) -> AppResult<(NaiveDate, NaiveDate)> {
    let invalid = || ParseError::InvalidMonth(format!("{year:04}-{month:02}"));

    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let next = NaiveDate::from_ymd_opt(next_year, next_month, 1).ok_or_else(invalid)?;

    let last = next.pred_opt().ok_or_else(invalid)?;
    Ok((first, last))
}

pub fn month_name(month: u32) -> &'static str {
    MONTH_NAMES
        .get((month as usize).wrapping_sub(1))
        .copied()
        .unwrap_or("")
}

/// Weekday index with Monday = 0 .. Sunday = 6.
pub fn weekday_index(date: NaiveDate) -> u32 {
    date.weekday().num_days_from_monday()
}

pub fn weekday_name(index: u32) -> &'static str {
    match index {
        0 => "Mon",
        1 => "Tue",
        2 => "Wed",
        3 => "Thu",
        4 => "Fri",
        5 => "Sat",
        6 => "Sun",
        _ => "?",
    }
}

/// Day-first display used in reports (`dd.mm.yyyy`).
pub fn display_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

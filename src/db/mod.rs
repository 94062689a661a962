pub mod employees;
pub mod entries;
pub mod log;
pub mod migrate;
pub mod pool;
pub mod revenue;
pub mod settings;
pub mod stats;
pub mod thresholds;

use crate::errors::ParseError;
use chrono::{NaiveDate, NaiveTime};
use rusqlite::Row;
use rusqlite::types::Type;

/// Storage format of every date column.
pub(crate) fn date_param(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub(crate) fn time_param(time: Option<NaiveTime>) -> Option<String> {
    time.map(|t| t.format("%H:%M").to_string())
}

pub(crate) fn conversion_error(err: ParseError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(err))
}

pub(crate) fn date_column(row: &Row, name: &str) -> rusqlite::Result<NaiveDate> {
    let raw: String = row.get(name)?;
    NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
        .map_err(|_| conversion_error(ParseError::InvalidDate(raw.clone())))
}

pub(crate) fn opt_date_column(row: &Row, name: &str) -> rusqlite::Result<Option<NaiveDate>> {
    let raw: Option<String> = row.get(name)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| conversion_error(ParseError::InvalidDate(s.to_string()))),
    }
}

pub(crate) fn opt_time_column(row: &Row, name: &str) -> rusqlite::Result<Option<NaiveTime>> {
    let raw: Option<String> = row.get(name)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => NaiveTime::parse_from_str(s, "%H:%M")
            .map(Some)
            .map_err(|_| conversion_error(ParseError::InvalidTime(s.to_string()))),
    }
}

pub(crate) fn time_column(row: &Row, name: &str) -> rusqlite::Result<NaiveTime> {
    let raw: String = row.get(name)?;
    NaiveTime::parse_from_str(raw.trim(), "%H:%M")
        .map_err(|_| conversion_error(ParseError::InvalidTime(raw.clone())))
}

//! Unified application error type.
//! All modules (db, core, cli, export) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

/// Malformed input that could not be interpreted.
/// Never coerced to a default: callers always see it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid date format: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("Invalid time format: {0} (expected HH:MM)")]
    InvalidTime(String),

    #[error("Invalid month: {0} (expected YYYY-MM)")]
    InvalidMonth(String),

    #[error("Invalid entry type: {0} (expected work, vacation or sick)")]
    InvalidEntryType(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error(transparent)]
    Parse(#[from] ParseError),

    // ---------------------------
    // Record errors
    // ---------------------------
    #[error("Employee not found: {0}")]
    EmployeeNotFound(i64),

    #[error("Time entry not found: {0}")]
    EntryNotFound(i64),

    #[error("Date {date} is outside the employment period ({period})")]
    OutsideEmployment { date: String, period: String },

    #[error("Work entries need both a start and an end time")]
    MissingWorkTimes,

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    pub fn is_parse_error(&self) -> bool {
        matches!(self, AppError::Parse(_))
    }
}

/// Row conversions box a `ParseError` inside rusqlite's conversion error;
/// unwrap it so malformed stored values surface as parse failures.
impl From<rusqlite::Error> for AppError {
    fn from(e: rusqlite::Error) -> Self {
        if let rusqlite::Error::FromSqlConversionFailure(_, _, inner) = &e
            && let Some(parse) = inner.downcast_ref::<ParseError>()
        {
            return AppError::Parse(parse.clone());
        }
        AppError::Db(e)
    }
}

pub type AppResult<T> = Result<T, AppError>;

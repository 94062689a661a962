//! Audit trail stored in the `log` table.

use crate::errors::AppResult;
use chrono::Local;
use rusqlite::{Connection, params};

/// One row of the audit trail.
#[derive(Debug, Clone)]
pub struct LogLine {
    pub id: i64,
    pub date: String,
    pub operation: String,
    pub target: String,
    pub message: String,
}

/// Append an audit line stamped with the local time (RFC 3339).
pub fn ttlog(conn: &Connection, operation: &str, target: &str, message: &str) -> AppResult<()> {
    conn.prepare_cached(
        "INSERT INTO log (date, operation, target, message) VALUES (?1, ?2, ?3, ?4)",
    )?
    .execute(params![Local::now().to_rfc3339(), operation, target, message])?;
    Ok(())
}

/// Audit lines in insertion order, optionally only one operation.
pub fn log_lines(conn: &Connection, operation: Option<&str>) -> AppResult<Vec<LogLine>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, date, operation, target, message FROM log
         WHERE (?1 IS NULL OR operation = ?1)
         ORDER BY id ASC",
    )?;

    let rows = stmt.query_map([operation], |row| {
        Ok(LogLine {
            id: row.get(0)?,
            date: row.get(1)?,
            operation: row.get(2)?,
            target: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
            message: row.get(4)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

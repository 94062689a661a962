use crate::db::{date_column, date_param};
use crate::errors::AppResult;
use crate::models::CommissionThreshold;
use rusqlite::{Connection, Row, params};

fn map_threshold(row: &Row) -> rusqlite::Result<CommissionThreshold> {
    Ok(CommissionThreshold {
        weekday: row.get("weekday")?,
        employee_count: row.get("employee_count")?,
        threshold: row.get("threshold")?,
        valid_from: date_column(row, "valid_from")?,
    })
}

/// Insert a rule or replace the amount of the rule with the same key.
pub fn upsert_threshold(conn: &Connection, rule: &CommissionThreshold) -> AppResult<()> {
    conn.execute(
        "INSERT INTO commission_thresholds (weekday, employee_count, threshold, valid_from)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(weekday, employee_count, valid_from) DO UPDATE SET
             threshold = excluded.threshold",
        params![
            rule.weekday,
            rule.employee_count,
            rule.threshold,
            date_param(rule.valid_from),
        ],
    )?;
    Ok(())
}

/// Every rule, grouped by weekday and headcount, newest validity first.
pub fn list_thresholds(conn: &Connection) -> AppResult<Vec<CommissionThreshold>> {
    let mut stmt = conn.prepare(
        "SELECT weekday, employee_count, threshold, valid_from
         FROM commission_thresholds
         ORDER BY weekday, employee_count, valid_from DESC",
    )?;
    let rows = stmt.query_map([], map_threshold)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Candidate rules for one (weekday, headcount) pair, all validity dates.
pub fn thresholds_for(
    conn: &Connection,
    weekday: u32,
    employee_count: u32,
) -> AppResult<Vec<CommissionThreshold>> {
    let mut stmt = conn.prepare_cached(
        "SELECT weekday, employee_count, threshold, valid_from
         FROM commission_thresholds
         WHERE weekday = ?1 AND employee_count = ?2",
    )?;
    let rows = stmt.query_map(params![weekday, employee_count], map_threshold)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

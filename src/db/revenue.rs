use crate::db::{date_column, date_param};
use crate::errors::AppResult;
use crate::models::Revenue;
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Row, params};

fn map_revenue(row: &Row) -> rusqlite::Result<Revenue> {
    Ok(Revenue {
        id: row.get("id")?,
        date: date_column(row, "date")?,
        amount: row.get("amount")?,
        notes: row.get::<_, Option<String>>("notes")?.unwrap_or_default(),
    })
}

/// Insert or replace the revenue of `date`; returns the row id.
pub fn upsert_revenue(conn: &Connection, date: NaiveDate, amount: f64, notes: &str) -> AppResult<i64> {
    let id = conn.query_row(
        "INSERT INTO revenue (date, amount, notes) VALUES (?1, ?2, ?3)
         ON CONFLICT(date) DO UPDATE SET amount = excluded.amount, notes = excluded.notes
         RETURNING id",
        params![date_param(date), amount, notes],
        |row| row.get(0),
    )?;
    Ok(id)
}

pub fn revenue_for(conn: &Connection, date: NaiveDate) -> AppResult<Option<f64>> {
    let mut stmt = conn.prepare_cached("SELECT amount FROM revenue WHERE date = ?1")?;
    Ok(stmt
        .query_row([date_param(date)], |row| row.get(0))
        .optional()?)
}

/// Revenue rows between two dates (inclusive), newest first.
pub fn list_revenue(
    conn: &Connection,
    bounds: Option<(NaiveDate, NaiveDate)>,
) -> AppResult<Vec<Revenue>> {
    let mut out = Vec::new();

    match bounds {
        None => {
            let mut stmt = conn.prepare(
                "SELECT id, date, amount, notes FROM revenue ORDER BY date DESC",
            )?;
            let rows = stmt.query_map([], map_revenue)?;
            for r in rows {
                out.push(r?);
            }
        }
        Some((start, end)) => {
            let mut stmt = conn.prepare(
                "SELECT id, date, amount, notes FROM revenue
                 WHERE date BETWEEN ?1 AND ?2
                 ORDER BY date DESC",
            )?;
            let rows = stmt.query_map(params![date_param(start), date_param(end)], map_revenue)?;
            for r in rows {
                out.push(r?);
            }
        }
    }

    Ok(out)
}

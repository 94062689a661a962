use crate::db::{conversion_error, date_column, date_param, opt_time_column, time_param};
use crate::errors::{AppError, AppResult, ParseError};
use crate::models::{EntryType, TimeEntry, TimeEntryInput};
use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::{Connection, OptionalExtension, Row, params, params_from_iter};

const ENTRY_SELECT: &str = "SELECT t.id AS id, t.employee_id AS employee_id, t.date AS date,
        t.entry_type AS entry_type, t.start_time AS start_time, t.end_time AS end_time,
        t.pause_minutes AS pause_minutes, t.commission AS commission,
        t.tours_before_18 AS tours_before_18, t.tours_after_18 AS tours_after_18,
        t.notes AS notes, e.name AS employee_name
    FROM time_entries t
    LEFT JOIN employees e ON e.id = t.employee_id";

pub fn map_entry(row: &Row) -> rusqlite::Result<TimeEntry> {
    let kind: String = row.get("entry_type")?;
    let entry_type = EntryType::from_db_str(&kind)
        .ok_or_else(|| conversion_error(ParseError::InvalidEntryType(kind.clone())))?;

    Ok(TimeEntry {
        id: row.get("id")?,
        employee_id: row.get("employee_id")?,
        date: date_column(row, "date")?,
        entry_type,
        start_time: opt_time_column(row, "start_time")?,
        end_time: opt_time_column(row, "end_time")?,
        pause_minutes: row.get::<_, Option<i64>>("pause_minutes")?.unwrap_or(0),
        commission: row.get::<_, Option<f64>>("commission")?.unwrap_or(0.0),
        tours_before_18: row.get::<_, Option<i64>>("tours_before_18")?.unwrap_or(0),
        tours_after_18: row.get::<_, Option<i64>>("tours_after_18")?.unwrap_or(0),
        notes: row.get::<_, Option<String>>("notes")?.unwrap_or_default(),
        employee_name: row.get("employee_name")?,
    })
}

fn collect(stmt: &mut rusqlite::Statement, args: &[Value]) -> AppResult<Vec<TimeEntry>> {
    let rows = stmt.query_map(params_from_iter(args.iter()), map_entry)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Insert the entry of (employee, date) or overwrite the existing one.
///
/// Commission is reset to 0; the caller recomputes the date afterwards.
pub fn upsert_entry(conn: &Connection, input: &TimeEntryInput) -> AppResult<i64> {
    let id = conn.query_row(
        "INSERT INTO time_entries
            (employee_id, date, entry_type, start_time, end_time, pause_minutes,
             commission, tours_before_18, tours_after_18, notes)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, 0, ?7, ?8, ?9)
         ON CONFLICT(employee_id, date) DO UPDATE SET
             entry_type      = excluded.entry_type,
             start_time      = excluded.start_time,
             end_time        = excluded.end_time,
             pause_minutes   = excluded.pause_minutes,
             commission      = 0,
             tours_before_18 = excluded.tours_before_18,
             tours_after_18  = excluded.tours_after_18,
             notes           = excluded.notes
         RETURNING id",
        params![
            input.employee_id,
            date_param(input.date),
            input.entry_type.to_db_str(),
            time_param(input.start_time),
            time_param(input.end_time),
            input.pause_minutes,
            input.tours_before_18,
            input.tours_after_18,
            input.notes,
        ],
        |row| row.get(0),
    )?;
    Ok(id)
}

/// Replace every caller-owned field of entry `id`.
pub fn update_entry(conn: &Connection, id: i64, input: &TimeEntryInput) -> AppResult<()> {
    let changed = conn.execute(
        "UPDATE time_entries
         SET employee_id = ?1, date = ?2, entry_type = ?3, start_time = ?4,
             end_time = ?5, pause_minutes = ?6, commission = 0,
             tours_before_18 = ?7, tours_after_18 = ?8, notes = ?9
         WHERE id = ?10",
        params![
            input.employee_id,
            date_param(input.date),
            input.entry_type.to_db_str(),
            time_param(input.start_time),
            time_param(input.end_time),
            input.pause_minutes,
            input.tours_before_18,
            input.tours_after_18,
            input.notes,
            id,
        ],
    )?;

    if changed == 0 {
        return Err(AppError::EntryNotFound(id));
    }
    Ok(())
}

pub fn find_entry(conn: &Connection, id: i64) -> AppResult<Option<TimeEntry>> {
    let mut stmt = conn.prepare(&format!("{ENTRY_SELECT} WHERE t.id = ?1"))?;
    Ok(stmt.query_row([id], map_entry).optional()?)
}

pub fn get_entry(conn: &Connection, id: i64) -> AppResult<TimeEntry> {
    find_entry(conn, id)?.ok_or(AppError::EntryNotFound(id))
}

/// Id of the entry another row already holds for (employee, date).
pub fn entry_id_for(conn: &Connection, employee_id: i64, date: NaiveDate) -> AppResult<Option<i64>> {
    let mut stmt =
        conn.prepare_cached("SELECT id FROM time_entries WHERE employee_id = ?1 AND date = ?2")?;
    Ok(stmt
        .query_row(params![employee_id, date_param(date)], |row| row.get(0))
        .optional()?)
}

pub fn delete_entry(conn: &Connection, id: i64) -> AppResult<()> {
    let removed = conn.execute("DELETE FROM time_entries WHERE id = ?1", [id])?;
    if removed == 0 {
        return Err(AppError::EntryNotFound(id));
    }
    Ok(())
}

/// Entries newest first, optionally restricted to one employee and/or a date range.
pub fn list_entries(
    conn: &Connection,
    employee_id: Option<i64>,
    bounds: Option<(NaiveDate, NaiveDate)>,
) -> AppResult<Vec<TimeEntry>> {
    let mut clauses = Vec::new();
    let mut args: Vec<Value> = Vec::new();

    if let Some(id) = employee_id {
        args.push(Value::Integer(id));
        clauses.push(format!("t.employee_id = ?{}", args.len()));
    }
    if let Some((start, end)) = bounds {
        args.push(Value::Text(date_param(start)));
        args.push(Value::Text(date_param(end)));
        clauses.push(format!("t.date BETWEEN ?{} AND ?{}", args.len() - 1, args.len()));
    }

    let filter = if clauses.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", clauses.join(" AND "))
    };

    let mut stmt = conn.prepare(&format!(
        "{ENTRY_SELECT}{filter} ORDER BY t.date DESC, e.name ASC"
    ))?;
    collect(&mut stmt, &args)
}

/// One employee's entries of a calendar range, oldest first.
pub fn entries_between(
    conn: &Connection,
    employee_id: i64,
    start: NaiveDate,
    end: NaiveDate,
) -> AppResult<Vec<TimeEntry>> {
    let mut stmt = conn.prepare(&format!(
        "{ENTRY_SELECT} WHERE t.employee_id = ?1 AND t.date BETWEEN ?2 AND ?3 ORDER BY t.date ASC"
    ))?;
    collect(
        &mut stmt,
        &[
            Value::Integer(employee_id),
            Value::Text(date_param(start)),
            Value::Text(date_param(end)),
        ],
    )
}

/// Distinct dates carrying at least one entry, ascending.
pub fn entry_dates_between(
    conn: &Connection,
    employee_id: Option<i64>,
    start: NaiveDate,
    end: NaiveDate,
) -> AppResult<Vec<NaiveDate>> {
    let mut stmt = conn.prepare(
        "SELECT DISTINCT date FROM time_entries
         WHERE date BETWEEN ?1 AND ?2 AND (?3 IS NULL OR employee_id = ?3)
         ORDER BY date ASC",
    )?;
    let rows = stmt.query_map(
        params![date_param(start), date_param(end), employee_id],
        |row| date_column(row, "date"),
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

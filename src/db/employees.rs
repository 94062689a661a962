use crate::db::{date_column, date_param, opt_date_column};
use crate::errors::{AppError, AppResult};
use crate::models::{Employee, EmployeeInput};
use rusqlite::{Connection, OptionalExtension, Row, params};

const EMPLOYEE_COLUMNS: &str =
    "id, name, contract_hours, has_commission, is_active, start_date, end_date";

pub fn map_employee(row: &Row) -> rusqlite::Result<Employee> {
    Ok(Employee {
        id: row.get("id")?,
        name: row.get("name")?,
        contract_hours: row.get::<_, Option<f64>>("contract_hours")?.unwrap_or(0.0),
        has_commission: row.get::<_, Option<bool>>("has_commission")?.unwrap_or(false),
        is_active: row.get::<_, Option<bool>>("is_active")?.unwrap_or(true),
        start_date: date_column(row, "start_date")?,
        end_date: opt_date_column(row, "end_date")?,
    })
}

pub fn insert_employee(conn: &Connection, input: &EmployeeInput) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO employees (name, contract_hours, has_commission, is_active, start_date, end_date)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            input.name,
            input.contract_hours,
            input.has_commission,
            input.is_active,
            date_param(input.start_date),
            input.end_date.map(date_param),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update_employee(conn: &Connection, id: i64, input: &EmployeeInput) -> AppResult<()> {
    let changed = conn.execute(
        "UPDATE employees
         SET name = ?1, contract_hours = ?2, has_commission = ?3,
             is_active = ?4, start_date = ?5, end_date = ?6
         WHERE id = ?7",
        params![
            input.name,
            input.contract_hours,
            input.has_commission,
            input.is_active,
            date_param(input.start_date),
            input.end_date.map(date_param),
            id,
        ],
    )?;

    if changed == 0 {
        return Err(AppError::EmployeeNotFound(id));
    }
    Ok(())
}

pub fn find_employee(conn: &Connection, id: i64) -> AppResult<Option<Employee>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE id = ?1"
    ))?;
    Ok(stmt.query_row([id], map_employee).optional()?)
}

pub fn get_employee(conn: &Connection, id: i64) -> AppResult<Employee> {
    find_employee(conn, id)?.ok_or(AppError::EmployeeNotFound(id))
}

/// All employees ordered by name; `active_only` hides former staff.
pub fn list_employees(conn: &Connection, active_only: bool) -> AppResult<Vec<Employee>> {
    let sql = if active_only {
        format!("SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE is_active = 1 ORDER BY name")
    } else {
        format!("SELECT {EMPLOYEE_COLUMNS} FROM employees ORDER BY name")
    };

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], map_employee)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

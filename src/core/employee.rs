use crate::db::employees::{get_employee, insert_employee, list_employees, update_employee};
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::{Employee, EmployeeInput};
use chrono::NaiveDate;

/// Fields to change on an existing employee; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct EmployeeUpdate {
    pub name: Option<String>,
    pub contract_hours: Option<f64>,
    pub has_commission: Option<bool>,
    pub is_active: Option<bool>,
    pub start_date: Option<NaiveDate>,
    /// `Some(None)` clears the end date.
    pub end_date: Option<Option<NaiveDate>>,
}

impl EmployeeUpdate {
    fn apply_to(self, current: &Employee) -> EmployeeInput {
        let mut input = EmployeeInput::from(current);
        if let Some(name) = self.name {
            input.name = name;
        }
        if let Some(h) = self.contract_hours {
            input.contract_hours = h;
        }
        if let Some(c) = self.has_commission {
            input.has_commission = c;
        }
        if let Some(a) = self.is_active {
            input.is_active = a;
        }
        if let Some(s) = self.start_date {
            input.start_date = s;
        }
        if let Some(e) = self.end_date {
            input.end_date = e;
        }
        input
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.contract_hours.is_none()
            && self.has_commission.is_none()
            && self.is_active.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
    }
}

fn validate(input: &EmployeeInput) -> AppResult<()> {
    if input.name.trim().is_empty() {
        return Err(AppError::InvalidValue("employee name must not be empty".into()));
    }
    if !input.contract_hours.is_finite() || input.contract_hours < 0.0 {
        return Err(AppError::InvalidValue(format!(
            "contract hours must be >= 0, got {}",
            input.contract_hours
        )));
    }
    if let Some(end) = input.end_date
        && end < input.start_date
    {
        return Err(AppError::InvalidValue(format!(
            "end date {} is before start date {}",
            end, input.start_date
        )));
    }
    Ok(())
}

pub struct EmployeeLogic;

impl EmployeeLogic {
    pub fn add(pool: &mut DbPool, input: &EmployeeInput) -> AppResult<Employee> {
        validate(input)?;

        let id = insert_employee(&pool.conn, input)?;
        ttlog(
            &pool.conn,
            "employee_add",
            &id.to_string(),
            &format!("Added employee '{}'", input.name),
        )?;

        get_employee(&pool.conn, id)
    }

    /// Entries already recorded are not revalidated against a changed period.
    pub fn update(pool: &mut DbPool, id: i64, changes: EmployeeUpdate) -> AppResult<Employee> {
        let current = get_employee(&pool.conn, id)?;
        let input = changes.apply_to(&current);
        validate(&input)?;

        update_employee(&pool.conn, id, &input)?;
        ttlog(
            &pool.conn,
            "employee_update",
            &id.to_string(),
            &format!("Updated employee '{}'", input.name),
        )?;

        get_employee(&pool.conn, id)
    }

    pub fn get(pool: &DbPool, id: i64) -> AppResult<Employee> {
        get_employee(&pool.conn, id)
    }

    pub fn list(pool: &DbPool, active_only: bool) -> AppResult<Vec<Employee>> {
        list_employees(&pool.conn, active_only)
    }
}

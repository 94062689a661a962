use crate::config::Config;
use crate::core::commission::CommissionLogic;
use crate::db::employees::{get_employee, list_employees};
use crate::db::entries::{entries_between, entry_dates_between};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::{Employee, MonthSummary, TimeEntry};
use crate::utils::date::month_bounds;
use serde::Serialize;

/// One employee's month: entries oldest first plus totals.
#[derive(Debug, Clone, Serialize)]
pub struct EmployeeMonth {
    pub employee: Employee,
    pub entries: Vec<TimeEntry>,
    pub summary: MonthSummary,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthOverview {
    pub year: i32,
    pub month: u32,
    pub employees: Vec<EmployeeMonth>,
}

impl MonthOverview {
    pub fn has_entries(&self) -> bool {
        self.employees.iter().any(|e| !e.entries.is_empty())
    }
}

pub struct ReportLogic;

impl ReportLogic {
    /// Month report of one employee, recomputing each of their entry dates first.
    pub fn employee_month(
        pool: &mut DbPool,
        cfg: &Config,
        employee_id: i64,
        year: i32,
        month: u32,
    ) -> AppResult<EmployeeMonth> {
        let (first, last) = month_bounds(year, month)?;
        let employee = get_employee(&pool.conn, employee_id)?;

        let dates = entry_dates_between(&pool.conn, Some(employee_id), first, last)?;
        CommissionLogic::recompute_dates(pool, &dates, cfg.threshold_headcount)?;

        Self::load_month(pool, cfg, employee, first, last)
    }

    /// Every active employee's month, ordered by name.
    ///
    /// All entry dates of the month are recomputed once, ascending, before loading.
    pub fn month_overview(
        pool: &mut DbPool,
        cfg: &Config,
        year: i32,
        month: u32,
    ) -> AppResult<MonthOverview> {
        let (first, last) = month_bounds(year, month)?;

        let dates = entry_dates_between(&pool.conn, None, first, last)?;
        CommissionLogic::recompute_dates(pool, &dates, cfg.threshold_headcount)?;

        let mut employees = Vec::new();
        for employee in list_employees(&pool.conn, true)? {
            employees.push(Self::load_month(pool, cfg, employee, first, last)?);
        }

        Ok(MonthOverview {
            year,
            month,
            employees,
        })
    }

    fn load_month(
        pool: &DbPool,
        cfg: &Config,
        employee: Employee,
        first: chrono::NaiveDate,
        last: chrono::NaiveDate,
    ) -> AppResult<EmployeeMonth> {
        let entries = entries_between(&pool.conn, employee.id, first, last)?;
        let summary = MonthSummary::from_entries(
            &entries,
            Some(employee.contract_hours),
            cfg.monthly_hours_factor,
        );

        Ok(EmployeeMonth {
            employee,
            entries,
            summary,
        })
    }
}

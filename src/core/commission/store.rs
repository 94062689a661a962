//! Data access needed by the commission engine.

use crate::db::{date_param, settings, thresholds, time_column};
use crate::errors::AppResult;
use crate::models::{CommissionSettings, CommissionThreshold};
use crate::utils::date::month_bounds;
use crate::utils::time::worked_hours;
use chrono::{Datelike, NaiveDate, NaiveTime};
use rusqlite::{Connection, OptionalExtension, params};

/// A complete work entry of one day, joined with its employee's eligibility.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkShift {
    pub entry_id: i64,
    pub employee_id: i64,
    pub has_commission: bool,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub pause_minutes: i64,
}

impl WorkShift {
    pub fn hours(&self) -> f64 {
        worked_hours(self.start, self.end, self.pause_minutes)
    }
}

/// Everything `CommissionLogic::recompute_with` reads and writes.
pub trait CommissionStore {
    /// Revenue of `date`, 0 when none was recorded.
    fn revenue_for(&self, date: NaiveDate) -> AppResult<f64>;

    fn settings(&self) -> AppResult<CommissionSettings>;

    /// Work entries of `date` carrying both a start and an end time.
    fn work_shifts(&self, date: NaiveDate) -> AppResult<Vec<WorkShift>>;

    fn thresholds_for(&self, weekday: u32, employee_count: u32)
    -> AppResult<Vec<CommissionThreshold>>;

    /// Commission already booked for the employee in the month of `date`,
    /// not counting `date` itself.
    fn month_commission_excluding(&self, employee_id: i64, date: NaiveDate) -> AppResult<f64>;

    fn set_commission(&self, entry_id: i64, amount: f64) -> AppResult<()>;

    /// Zero every entry of `date` whose id is not in `keep`.
    fn zero_commission_except(&self, date: NaiveDate, keep: &[i64]) -> AppResult<()>;
}

impl CommissionStore for Connection {
    fn revenue_for(&self, date: NaiveDate) -> AppResult<f64> {
        Ok(crate::db::revenue::revenue_for(self, date)?.unwrap_or(0.0))
    }

    fn settings(&self) -> AppResult<CommissionSettings> {
        settings::load_settings(self)
    }

    fn work_shifts(&self, date: NaiveDate) -> AppResult<Vec<WorkShift>> {
        let mut stmt = self.prepare_cached(
            "SELECT t.id AS id, t.employee_id AS employee_id, t.start_time AS start_time,
                    t.end_time AS end_time, t.pause_minutes AS pause_minutes,
                    e.has_commission AS has_commission
             FROM time_entries t
             JOIN employees e ON e.id = t.employee_id
             WHERE t.date = ?1
               AND t.entry_type = 'work'
               AND t.start_time IS NOT NULL AND t.start_time != ''
               AND t.end_time IS NOT NULL AND t.end_time != ''
             ORDER BY t.id",
        )?;

        let rows = stmt.query_map([date_param(date)], |row| {
            Ok(WorkShift {
                entry_id: row.get("id")?,
                employee_id: row.get("employee_id")?,
                has_commission: row.get::<_, Option<bool>>("has_commission")?.unwrap_or(false),
                start: time_column(row, "start_time")?,
                end: time_column(row, "end_time")?,
                pause_minutes: row.get::<_, Option<i64>>("pause_minutes")?.unwrap_or(0),
            })
        })?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    fn thresholds_for(
        &self,
        weekday: u32,
        employee_count: u32,
    ) -> AppResult<Vec<CommissionThreshold>> {
        thresholds::thresholds_for(self, weekday, employee_count)
    }

    fn month_commission_excluding(&self, employee_id: i64, date: NaiveDate) -> AppResult<f64> {
        let (first, last) = month_bounds(date.year(), date.month())?;

        let total: Option<f64> = self
            .prepare_cached(
                "SELECT SUM(commission) FROM time_entries
                 WHERE employee_id = ?1
                   AND date BETWEEN ?2 AND ?3
                   AND date != ?4",
            )?
            .query_row(
                params![
                    employee_id,
                    date_param(first),
                    date_param(last),
                    date_param(date)
                ],
                |row| row.get(0),
            )
            .optional()?
            .flatten();

        Ok(total.unwrap_or(0.0))
    }

    fn set_commission(&self, entry_id: i64, amount: f64) -> AppResult<()> {
        self.execute(
            "UPDATE time_entries SET commission = ?1 WHERE id = ?2",
            params![amount, entry_id],
        )?;
        Ok(())
    }

    fn zero_commission_except(&self, date: NaiveDate, keep: &[i64]) -> AppResult<()> {
        let mut stmt = self.prepare_cached(
            "SELECT id FROM time_entries WHERE date = ?1 AND commission != 0",
        )?;
        let ids = stmt.query_map([date_param(date)], |row| row.get::<_, i64>(0))?;

        let mut stale = Vec::new();
        for id in ids {
            let id = id?;
            if !keep.contains(&id) {
                stale.push(id);
            }
        }

        for id in stale {
            self.set_commission(id, 0.0)?;
        }
        Ok(())
    }
}

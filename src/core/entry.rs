//! Time entry writes. Each write and the recompute of the dates it
//! touched share one transaction: either both land or neither does.

use crate::core::commission::{CommissionLogic, DayCommission};
use crate::db::employees::get_employee;
use crate::db::entries::{
    delete_entry, entry_id_for, get_entry, list_entries, update_entry, upsert_entry,
};
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::{EntryType, HeadcountMode, TimeEntry, TimeEntryInput};
use crate::utils::date::month_bounds;
use chrono::{NaiveDate, NaiveTime};

/// Fields to change on an existing entry; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct EntryUpdate {
    pub employee_id: Option<i64>,
    pub date: Option<NaiveDate>,
    pub entry_type: Option<EntryType>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub pause_minutes: Option<i64>,
    pub tours_before_18: Option<i64>,
    pub tours_after_18: Option<i64>,
    pub notes: Option<String>,
}

impl EntryUpdate {
    fn apply_to(self, current: &TimeEntry) -> TimeEntryInput {
        let mut input = TimeEntryInput::from(current);
        if let Some(v) = self.employee_id {
            input.employee_id = v;
        }
        if let Some(v) = self.date {
            input.date = v;
        }
        if let Some(v) = self.entry_type {
            input.entry_type = v;
        }
        if let Some(v) = self.start_time {
            input.start_time = Some(v);
        }
        if let Some(v) = self.end_time {
            input.end_time = Some(v);
        }
        if let Some(v) = self.pause_minutes {
            input.pause_minutes = v;
        }
        if let Some(v) = self.tours_before_18 {
            input.tours_before_18 = v;
        }
        if let Some(v) = self.tours_after_18 {
            input.tours_after_18 = v;
        }
        if let Some(v) = self.notes {
            input.notes = v;
        }
        input
    }
}

/// Check an entry against its employee and normalize it for storage.
pub fn validate_entry(
    conn: &rusqlite::Connection,
    mut input: TimeEntryInput,
) -> AppResult<TimeEntryInput> {
    let employee = get_employee(conn, input.employee_id)?;

    let period = employee.period();
    if !period.contains(input.date) {
        return Err(AppError::OutsideEmployment {
            date: input.date.to_string(),
            period: period.describe(),
        });
    }

    if input.pause_minutes < 0 {
        return Err(AppError::InvalidValue(format!(
            "pause must be >= 0 minutes, got {}",
            input.pause_minutes
        )));
    }
    if input.tours_before_18 < 0 || input.tours_after_18 < 0 {
        return Err(AppError::InvalidValue("tour counters must be >= 0".into()));
    }

    match input.entry_type {
        EntryType::Work => {
            if input.start_time.is_none() || input.end_time.is_none() {
                return Err(AppError::MissingWorkTimes);
            }
        }
        EntryType::Vacation | EntryType::Sick => {
            input.start_time = None;
            input.end_time = None;
            input.pause_minutes = 0;
        }
    }

    Ok(input)
}

fn describe(input: &TimeEntryInput) -> String {
    format!(
        "{} {} for employee {}",
        input.entry_type.to_db_str(),
        input.date,
        input.employee_id
    )
}

pub struct EntryLogic;

impl EntryLogic {
    /// Create or overwrite the entry of (employee, date).
    pub fn set(
        pool: &mut DbPool,
        mode: HeadcountMode,
        input: TimeEntryInput,
    ) -> AppResult<(TimeEntry, DayCommission)> {
        let tx = pool.conn.transaction()?;
        let input = validate_entry(&tx, input)?;

        let id = upsert_entry(&tx, &input)?;
        ttlog(&tx, "entry_set", &id.to_string(), &describe(&input))?;

        let day = CommissionLogic::recompute_with(&*tx, input.date, mode)?;
        let entry = get_entry(&tx, id)?;
        tx.commit()?;
        Ok((entry, day))
    }

    /// Change an entry by id. When the date moves, both days are recomputed.
    pub fn update(
        pool: &mut DbPool,
        mode: HeadcountMode,
        id: i64,
        changes: EntryUpdate,
    ) -> AppResult<(TimeEntry, Vec<DayCommission>)> {
        let tx = pool.conn.transaction()?;
        let current = get_entry(&tx, id)?;
        let input = validate_entry(&tx, changes.apply_to(&current))?;

        if let Some(other) = entry_id_for(&tx, input.employee_id, input.date)?
            && other != id
        {
            return Err(AppError::InvalidValue(format!(
                "employee {} already has entry {} on {}",
                input.employee_id, other, input.date
            )));
        }

        update_entry(&tx, id, &input)?;
        ttlog(&tx, "entry_update", &id.to_string(), &describe(&input))?;

        let mut dates = vec![current.date];
        if input.date != current.date {
            dates.push(input.date);
            dates.sort();
        }
        let days = dates
            .iter()
            .map(|date| CommissionLogic::recompute_with(&*tx, *date, mode))
            .collect::<AppResult<Vec<_>>>()?;

        let entry = get_entry(&tx, id)?;
        tx.commit()?;
        Ok((entry, days))
    }

    pub fn delete(pool: &mut DbPool, mode: HeadcountMode, id: i64) -> AppResult<DayCommission> {
        let tx = pool.conn.transaction()?;
        let entry = get_entry(&tx, id)?;

        delete_entry(&tx, id)?;
        ttlog(
            &tx,
            "entry_del",
            &id.to_string(),
            &format!("Deleted {} entry of {}", entry.entry_type.to_db_str(), entry.date),
        )?;

        let day = CommissionLogic::recompute_with(&*tx, entry.date, mode)?;
        tx.commit()?;
        Ok(day)
    }

    /// Newest first, optionally filtered by employee and/or `(year, month)`.
    pub fn list(
        pool: &DbPool,
        employee_id: Option<i64>,
        month: Option<(i32, u32)>,
    ) -> AppResult<Vec<TimeEntry>> {
        let bounds = month.map(|(y, m)| month_bounds(y, m)).transpose()?;
        list_entries(&pool.conn, employee_id, bounds)
    }
}

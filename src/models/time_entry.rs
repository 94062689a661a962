use super::entry_type::EntryType;
use crate::utils::time::worked_hours;
use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct TimeEntry {
    pub id: i64,
    pub employee_id: i64,
    pub date: NaiveDate,               // ⇔ time_entries.date (TEXT "YYYY-MM-DD")
    pub entry_type: EntryType,         // ⇔ time_entries.entry_type
    #[serde(serialize_with = "crate::models::hhmm::serialize")]
    pub start_time: Option<NaiveTime>, // ⇔ time_entries.start_time (TEXT "HH:MM")
    #[serde(serialize_with = "crate::models::hhmm::serialize")]
    pub end_time: Option<NaiveTime>,   // ⇔ time_entries.end_time (TEXT "HH:MM")
    pub pause_minutes: i64,
    /// Owned by the commission engine; any other value is a placeholder.
    pub commission: f64,
    pub tours_before_18: i64,
    pub tours_after_18: i64,
    pub notes: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_name: Option<String>,
}

impl TimeEntry {
    /// Net worked hours for complete work entries, `None` otherwise.
    pub fn worked_hours(&self) -> Option<f64> {
        match (self.entry_type, self.start_time, self.end_time) {
            (EntryType::Work, Some(start), Some(end)) => {
                Some(worked_hours(start, end, self.pause_minutes))
            }
            _ => None,
        }
    }
}

/// Caller-supplied fields of a time entry; commission is never part of it.
#[derive(Debug, Clone)]
pub struct TimeEntryInput {
    pub employee_id: i64,
    pub date: NaiveDate,
    pub entry_type: EntryType,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub pause_minutes: i64,
    pub tours_before_18: i64,
    pub tours_after_18: i64,
    pub notes: String,
}

impl TimeEntryInput {
    pub fn work(employee_id: i64, date: NaiveDate, start: NaiveTime, end: NaiveTime) -> Self {
        Self {
            employee_id,
            date,
            entry_type: EntryType::Work,
            start_time: Some(start),
            end_time: Some(end),
            pause_minutes: 0,
            tours_before_18: 0,
            tours_after_18: 0,
            notes: String::new(),
        }
    }

    pub fn absence(employee_id: i64, date: NaiveDate, entry_type: EntryType) -> Self {
        Self {
            employee_id,
            date,
            entry_type,
            start_time: None,
            end_time: None,
            pause_minutes: 0,
            tours_before_18: 0,
            tours_after_18: 0,
            notes: String::new(),
        }
    }
}

impl From<&TimeEntry> for TimeEntryInput {
    fn from(e: &TimeEntry) -> Self {
        Self {
            employee_id: e.employee_id,
            date: e.date,
            entry_type: e.entry_type,
            start_time: e.start_time,
            end_time: e.end_time,
            pause_minutes: e.pause_minutes,
            tours_before_18: e.tours_before_18,
            tours_after_18: e.tours_after_18,
            notes: e.notes.clone(),
        }
    }
}

pub mod commission;
pub mod employee;
pub mod entry_type;
pub mod month_summary;
pub mod revenue;
pub mod time_entry;

pub use commission::{CommissionSettings, CommissionThreshold, HeadcountMode};
pub use employee::{Employee, EmployeeInput, EmploymentPeriod};
pub use entry_type::EntryType;
pub use month_summary::MonthSummary;
pub use revenue::Revenue;
pub use time_entry::{TimeEntry, TimeEntryInput};

/// Serialize optional clock times as `HH:MM` instead of chrono's `HH:MM:SS`.
pub(crate) mod hhmm {
    use chrono::NaiveTime;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(t: &Option<NaiveTime>, s: S) -> Result<S::Ok, S::Error> {
        match t {
            Some(t) => s.serialize_str(&t.format("%H:%M").to_string()),
            None => s.serialize_none(),
        }
    }
}

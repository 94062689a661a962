use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Singleton commission configuration (row `id = 1`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CommissionSettings {
    /// Share of the daily revenue that forms the pool, in percent.
    pub percentage: f64,
    /// Maximum commission per employee and calendar month.
    pub monthly_max: f64,
}

/// Minimum revenue needed on a weekday with a given headcount,
/// effective from `valid_from` until superseded by a later row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommissionThreshold {
    /// Monday = 0 .. Sunday = 6
    pub weekday: u32,
    pub employee_count: u32,
    pub threshold: f64,
    pub valid_from: NaiveDate,
}

impl CommissionThreshold {
    pub fn default_valid_from() -> NaiveDate {
        NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or_default()
    }
}

/// Which employees count toward the headcount used for threshold lookup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum HeadcountMode {
    /// Everyone with a complete work entry that day, eligible or not.
    #[default]
    AllWorkers,
    /// Only commission-eligible employees with a complete work entry.
    EligibleOnly,
}

impl HeadcountMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            HeadcountMode::AllWorkers => "all_workers",
            HeadcountMode::EligibleOnly => "eligible_only",
        }
    }
}

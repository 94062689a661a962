use crate::models::{EntryType, MonthSummary, TimeEntry};
use crate::utils::time::round2;

/// Weeks per month used to turn weekly contract hours into monthly ones.
pub const DEFAULT_MONTHLY_HOURS_FACTOR: f64 = 4.33;

impl MonthSummary {
    /// Fold a month of entries into totals.
    ///
    /// A work entry only counts as a work day when both clock times are set.
    pub fn from_entries(entries: &[TimeEntry], contract_hours: Option<f64>, factor: f64) -> Self {
        let mut summary = MonthSummary::default();
        let mut hours = 0.0;
        let mut commission = 0.0;

        for entry in entries {
            match entry.entry_type {
                EntryType::Work => {
                    if let Some(h) = entry.worked_hours() {
                        hours += h;
                        summary.work_days += 1;
                    }
                }
                EntryType::Vacation => summary.vacation_days += 1,
                EntryType::Sick => summary.sick_days += 1,
            }

            commission += entry.commission;
            summary.total_tours_before_18 += entry.tours_before_18;
            summary.total_tours_after_18 += entry.tours_after_18;
        }

        summary.total_hours = round2(hours);
        summary.total_commission = round2(commission);
        summary.contract_hours_month = contract_hours.map(|h| round2(h * factor));
        summary
    }
}

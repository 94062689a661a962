use crate::models::CommissionThreshold;
use chrono::NaiveDate;

/// Minimum revenue in force on `date` for a weekday and headcount.
///
/// Picks the matching rule with the latest `valid_from` not after `date`.
/// Without one the threshold is 0, so any revenue qualifies.
pub fn resolve_threshold(
    rules: &[CommissionThreshold],
    weekday: u32,
    employee_count: u32,
    date: NaiveDate,
) -> f64 {
    rules
        .iter()
        .filter(|r| r.weekday == weekday && r.employee_count == employee_count)
        .filter(|r| r.valid_from <= date)
        .max_by_key(|r| r.valid_from)
        .map(|r| r.threshold)
        .unwrap_or(0.0)
}

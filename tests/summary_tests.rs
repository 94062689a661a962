mod common;
use common::{d, t};

use rshiftlog::core::summary::DEFAULT_MONTHLY_HOURS_FACTOR;
use rshiftlog::models::{EntryType, MonthSummary, TimeEntry};

fn entry(date: &str, kind: EntryType, times: Option<(&str, &str)>, pause: i64) -> TimeEntry {
    TimeEntry {
        id: 0,
        employee_id: 1,
        date: d(date),
        entry_type: kind,
        start_time: times.map(|(s, _)| t(s)),
        end_time: times.map(|(_, e)| t(e)),
        pause_minutes: pause,
        commission: 0.0,
        tours_before_18: 0,
        tours_after_18: 0,
        notes: String::new(),
        employee_name: None,
    }
}

#[test]
fn test_empty_month_is_all_zero() {
    let summary = MonthSummary::from_entries(&[], None, DEFAULT_MONTHLY_HOURS_FACTOR);
    assert_eq!(summary, MonthSummary::default());
}

#[test]
fn test_month_totals() {
    let mut work = entry("2024-06-03", EntryType::Work, Some(("09:00", "17:00")), 60);
    work.commission = 15.0;
    work.tours_before_18 = 2;

    let mut late = entry("2024-06-04", EntryType::Work, Some(("14:00", "22:30")), 30);
    late.commission = 7.5;
    late.tours_after_18 = 3;

    let entries = vec![
        work,
        late,
        entry("2024-06-05", EntryType::Vacation, None, 0),
        entry("2024-06-06", EntryType::Sick, None, 0),
        entry("2024-06-07", EntryType::Sick, None, 0),
    ];

    let summary = MonthSummary::from_entries(&entries, Some(40.0), DEFAULT_MONTHLY_HOURS_FACTOR);

    assert_eq!(summary.total_hours, 15.0);
    assert_eq!(summary.work_days, 2);
    assert_eq!(summary.vacation_days, 1);
    assert_eq!(summary.sick_days, 2);
    assert_eq!(summary.total_tours_before_18, 2);
    assert_eq!(summary.total_tours_after_18, 3);
    assert_eq!(summary.total_commission, 22.5);
    assert_eq!(summary.contract_hours_month, Some(173.2));
}

#[test]
fn test_incomplete_work_entry_is_not_a_work_day() {
    let entries = vec![entry("2024-06-03", EntryType::Work, None, 0)];
    let summary = MonthSummary::from_entries(&entries, None, DEFAULT_MONTHLY_HOURS_FACTOR);

    assert_eq!(summary.work_days, 0);
    assert_eq!(summary.total_hours, 0.0);
    assert_eq!(summary.contract_hours_month, None);
}

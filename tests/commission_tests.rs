mod common;
use common::{add_employee, d, open_test_pool, set_commission, shift};

use rshiftlog::core::commission::CommissionLogic;
use rshiftlog::core::entry::{EntryLogic, EntryUpdate};
use rshiftlog::core::revenue::RevenueLogic;
use rshiftlog::core::settings::SettingsLogic;
use rshiftlog::db::entries::get_entry;
use rshiftlog::db::pool::DbPool;
use rshiftlog::models::{CommissionThreshold, EntryType, HeadcountMode, TimeEntryInput};

const ALL: HeadcountMode = HeadcountMode::AllWorkers;

fn threshold(pool: &mut DbPool, weekday: u32, count: u32, amount: f64, valid_from: &str) {
    let rule = CommissionThreshold {
        weekday,
        employee_count: count,
        threshold: amount,
        valid_from: d(valid_from),
    };
    SettingsLogic::set_threshold(pool, &rule).expect("set threshold");
}

fn commission_of(pool: &DbPool, entry_id: i64) -> f64 {
    get_entry(&pool.conn, entry_id).expect("entry").commission
}

#[test]
fn test_threshold_versions_pick_latest_valid_from() {
    let mut pool = open_test_pool("commission_threshold_versions");
    let emp = add_employee(&mut pool, "Anna", true);
    set_commission(&mut pool, 10.0, 10000.0);

    // Both dates are Mondays.
    threshold(&mut pool, 0, 1, 100.0, "2023-01-01");
    threshold(&mut pool, 0, 1, 200.0, "2024-01-01");

    let (e2023, _) = EntryLogic::set(&mut pool, ALL, shift(emp, "2023-06-05", "09:00", "17:00", 60))
        .expect("entry 2023");
    let (e2024, _) = EntryLogic::set(&mut pool, ALL, shift(emp, "2024-06-03", "09:00", "17:00", 60))
        .expect("entry 2024");

    let day_2023 = RevenueLogic::set(&mut pool, ALL, d("2023-06-05"), 150.0, "").expect("revenue");
    let day_2024 = RevenueLogic::set(&mut pool, ALL, d("2024-06-03"), 150.0, "").expect("revenue");

    assert_eq!(day_2023.threshold, 100.0);
    assert_eq!(day_2024.threshold, 200.0);

    assert_eq!(commission_of(&pool, e2023.id), 15.0);
    assert_eq!(commission_of(&pool, e2024.id), 0.0);
}

#[test]
fn test_revenue_below_threshold_zeroes_everyone() {
    let mut pool = open_test_pool("commission_below_threshold");
    let a = add_employee(&mut pool, "Anna", true);
    let b = add_employee(&mut pool, "Ben", true);
    set_commission(&mut pool, 10.0, 10000.0);

    // 2024-06-05 is a Wednesday.
    threshold(&mut pool, 2, 2, 500.0, "1970-01-01");

    let (ea, _) = EntryLogic::set(&mut pool, ALL, shift(a, "2024-06-05", "09:00", "17:00", 0)).unwrap();
    let (eb, _) = EntryLogic::set(&mut pool, ALL, shift(b, "2024-06-05", "10:00", "14:00", 0)).unwrap();

    let day = RevenueLogic::set(&mut pool, ALL, d("2024-06-05"), 499.99, "").unwrap();

    assert_eq!(day.pool, 0.0);
    assert_eq!(commission_of(&pool, ea.id), 0.0);
    assert_eq!(commission_of(&pool, eb.id), 0.0);
}

#[test]
fn test_pool_split_by_hours_and_conserved() {
    let mut pool = open_test_pool("commission_split");
    let a = add_employee(&mut pool, "Anna", true);
    let b = add_employee(&mut pool, "Ben", true);
    set_commission(&mut pool, 10.0, 10000.0);

    let (ea, _) = EntryLogic::set(&mut pool, ALL, shift(a, "2024-06-04", "09:00", "17:00", 0)).unwrap();
    let (eb, _) = EntryLogic::set(&mut pool, ALL, shift(b, "2024-06-04", "09:00", "13:00", 0)).unwrap();

    let day = RevenueLogic::set(&mut pool, ALL, d("2024-06-04"), 300.0, "").unwrap();

    assert_eq!(day.headcount, 2);
    assert_eq!(day.total_hours, 12.0);
    assert_eq!(day.pool, 30.0);
    assert_eq!(commission_of(&pool, ea.id), 20.0);
    assert_eq!(commission_of(&pool, eb.id), 10.0);
    assert_eq!(day.amount_for(a), 20.0);
    assert_eq!(day.amount_for(b), 10.0);
    assert!(day.total_allocated() <= day.pool + 1e-9);
}

#[test]
fn test_uneven_split_shares_sum_to_pool() {
    let mut pool = open_test_pool("commission_uneven_split");
    let ids: Vec<i64> = ["A", "B", "C"]
        .iter()
        .map(|n| add_employee(&mut pool, n, true))
        .collect();
    set_commission(&mut pool, 7.0, 10000.0);

    for (id, end) in ids.iter().zip(["16:07", "13:13", "11:59"]) {
        EntryLogic::set(&mut pool, ALL, shift(*id, "2024-06-06", "08:00", end, 17)).unwrap();
    }

    let day = RevenueLogic::set(&mut pool, ALL, d("2024-06-06"), 1234.56, "").unwrap();

    assert_eq!(day.allocations.len(), 3);
    let shares: f64 = day.allocations.iter().map(|a| a.share).sum();
    assert!((shares - day.pool).abs() < 1e-9);

    let slack = 0.005 * day.allocations.len() as f64;
    assert!(day.total_allocated() <= day.pool + slack);
    assert!(day.allocations.iter().all(|a| a.amount > 0.0));
}

#[test]
fn test_sub_cent_cap_is_never_rounded_up() {
    let mut pool = open_test_pool("commission_sub_cent_cap");
    let a = add_employee(&mut pool, "Anna", true);
    set_commission(&mut pool, 10.0, 0.125);

    let (ea, _) = EntryLogic::set(&mut pool, ALL, shift(a, "2024-06-04", "09:00", "17:00", 0)).unwrap();
    let day = RevenueLogic::set(&mut pool, ALL, d("2024-06-04"), 150.0, "").unwrap();

    assert_eq!(day.pool, 15.0);
    assert_eq!(commission_of(&pool, ea.id), 0.12);
    assert!(day.amount_for(a) <= 0.125);
}

#[test]
fn test_ineligible_employee_gets_zero() {
    let mut pool = open_test_pool("commission_ineligible");
    let a = add_employee(&mut pool, "Anna", true);
    let c = add_employee(&mut pool, "Carl", false);
    set_commission(&mut pool, 10.0, 10000.0);

    let (ea, _) = EntryLogic::set(&mut pool, ALL, shift(a, "2024-06-04", "09:00", "17:00", 0)).unwrap();
    let (ec, _) = EntryLogic::set(&mut pool, ALL, shift(c, "2024-06-04", "09:00", "17:00", 0)).unwrap();

    let day = RevenueLogic::set(&mut pool, ALL, d("2024-06-04"), 100.0, "").unwrap();

    assert_eq!(day.total_hours, 8.0);
    assert_eq!(commission_of(&pool, ea.id), 10.0);
    assert_eq!(commission_of(&pool, ec.id), 0.0);
}

#[test]
fn test_headcount_modes_select_different_thresholds() {
    let mut pool = open_test_pool("commission_headcount_modes");
    let a = add_employee(&mut pool, "Anna", true);
    let c = add_employee(&mut pool, "Carl", false);
    set_commission(&mut pool, 10.0, 10000.0);

    // 2024-06-04 is a Tuesday.
    threshold(&mut pool, 1, 2, 500.0, "1970-01-01");
    threshold(&mut pool, 1, 1, 50.0, "1970-01-01");

    let (ea, _) = EntryLogic::set(&mut pool, ALL, shift(a, "2024-06-04", "09:00", "17:00", 0)).unwrap();
    EntryLogic::set(&mut pool, ALL, shift(c, "2024-06-04", "09:00", "17:00", 0)).unwrap();
    RevenueLogic::set(&mut pool, ALL, d("2024-06-04"), 100.0, "").unwrap();

    let all = CommissionLogic::recompute(&mut pool, d("2024-06-04"), HeadcountMode::AllWorkers).unwrap();
    assert_eq!(all.headcount, 2);
    assert_eq!(all.threshold, 500.0);
    assert_eq!(commission_of(&pool, ea.id), 0.0);

    let eligible =
        CommissionLogic::recompute(&mut pool, d("2024-06-04"), HeadcountMode::EligibleOnly).unwrap();
    assert_eq!(eligible.headcount, 1);
    assert_eq!(eligible.threshold, 50.0);
    assert_eq!(commission_of(&pool, ea.id), 10.0);
}

#[test]
fn test_recompute_is_idempotent() {
    let mut pool = open_test_pool("commission_idempotent");
    let a = add_employee(&mut pool, "Anna", true);
    let b = add_employee(&mut pool, "Ben", true);
    set_commission(&mut pool, 12.5, 100.0);

    EntryLogic::set(&mut pool, ALL, shift(a, "2024-06-04", "08:30", "16:45", 45)).unwrap();
    EntryLogic::set(&mut pool, ALL, shift(b, "2024-06-04", "12:00", "20:10", 30)).unwrap();
    RevenueLogic::set(&mut pool, ALL, d("2024-06-04"), 812.4, "").unwrap();

    let first = CommissionLogic::recompute(&mut pool, d("2024-06-04"), ALL).unwrap();
    let second = CommissionLogic::recompute(&mut pool, d("2024-06-04"), ALL).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_monthly_cap_clips_and_reaches_zero() {
    let mut pool = open_test_pool("commission_monthly_cap");
    let a = add_employee(&mut pool, "Anna", true);
    set_commission(&mut pool, 10.0, 20.0);

    let mut ids = Vec::new();
    for date in ["2024-03-04", "2024-03-05", "2024-03-06"] {
        let (e, _) = EntryLogic::set(&mut pool, ALL, shift(a, date, "09:00", "17:00", 60)).unwrap();
        RevenueLogic::set(&mut pool, ALL, d(date), 150.0, "").unwrap();
        ids.push(e.id);
    }

    assert_eq!(commission_of(&pool, ids[0]), 15.0);
    assert_eq!(commission_of(&pool, ids[1]), 5.0);
    assert_eq!(commission_of(&pool, ids[2]), 0.0);

    // Recomputing in any order keeps the month within the cap.
    for date in ["2024-03-06", "2024-03-04", "2024-03-05", "2024-03-04"] {
        CommissionLogic::recompute(&mut pool, d(date), ALL).unwrap();
        let total: f64 = ids.iter().map(|id| commission_of(&pool, *id)).sum();
        assert!(total <= 20.0 + 1e-9, "month total {total} exceeds cap");
    }
}

#[test]
fn test_cap_only_counts_same_month() {
    let mut pool = open_test_pool("commission_cap_month_boundary");
    let a = add_employee(&mut pool, "Anna", true);
    set_commission(&mut pool, 10.0, 15.0);

    EntryLogic::set(&mut pool, ALL, shift(a, "2024-02-29", "09:00", "17:00", 60)).unwrap();
    RevenueLogic::set(&mut pool, ALL, d("2024-02-29"), 150.0, "").unwrap();

    let (march, _) = EntryLogic::set(&mut pool, ALL, shift(a, "2024-03-01", "09:00", "17:00", 60)).unwrap();
    let day = RevenueLogic::set(&mut pool, ALL, d("2024-03-01"), 150.0, "").unwrap();

    assert_eq!(day.allocations[0].month_to_date, 0.0);
    assert_eq!(commission_of(&pool, march.id), 15.0);
}

#[test]
fn test_delete_recomputes_remaining_entries() {
    let mut pool = open_test_pool("commission_delete_recompute");
    let a = add_employee(&mut pool, "Anna", true);
    let b = add_employee(&mut pool, "Ben", true);
    set_commission(&mut pool, 10.0, 10000.0);

    let (ea, _) = EntryLogic::set(&mut pool, ALL, shift(a, "2024-06-04", "09:00", "17:00", 0)).unwrap();
    let (eb, _) = EntryLogic::set(&mut pool, ALL, shift(b, "2024-06-04", "09:00", "17:00", 0)).unwrap();
    RevenueLogic::set(&mut pool, ALL, d("2024-06-04"), 200.0, "").unwrap();
    assert_eq!(commission_of(&pool, ea.id), 10.0);

    let day = EntryLogic::delete(&mut pool, ALL, eb.id).unwrap();

    assert_eq!(day.headcount, 1);
    assert_eq!(commission_of(&pool, ea.id), 20.0);
}

#[test]
fn test_moving_entry_recomputes_both_dates() {
    let mut pool = open_test_pool("commission_move_entry");
    let a = add_employee(&mut pool, "Anna", true);
    let b = add_employee(&mut pool, "Ben", true);
    set_commission(&mut pool, 10.0, 10000.0);

    let (ea, _) = EntryLogic::set(&mut pool, ALL, shift(a, "2024-06-04", "09:00", "17:00", 0)).unwrap();
    let (eb, _) = EntryLogic::set(&mut pool, ALL, shift(b, "2024-06-04", "09:00", "17:00", 0)).unwrap();
    RevenueLogic::set(&mut pool, ALL, d("2024-06-04"), 200.0, "").unwrap();
    RevenueLogic::set(&mut pool, ALL, d("2024-06-05"), 100.0, "").unwrap();

    let changes = EntryUpdate {
        date: Some(d("2024-06-05")),
        ..EntryUpdate::default()
    };
    let (moved, days) = EntryLogic::update(&mut pool, ALL, eb.id, changes).unwrap();

    assert_eq!(days.len(), 2);
    assert_eq!(commission_of(&pool, ea.id), 20.0);
    assert_eq!(moved.commission, 10.0);
}

#[test]
fn test_no_revenue_or_zero_percentage_gives_zero() {
    let mut pool = open_test_pool("commission_no_pool");
    let a = add_employee(&mut pool, "Anna", true);

    let (e, day) = EntryLogic::set(&mut pool, ALL, shift(a, "2024-06-04", "09:00", "17:00", 0)).unwrap();
    assert_eq!(day.revenue, 0.0);
    assert_eq!(e.commission, 0.0);

    // Seeded settings are 0 %.
    let day = RevenueLogic::set(&mut pool, ALL, d("2024-06-04"), 1000.0, "").unwrap();
    assert_eq!(day.pool, 0.0);
    assert_eq!(commission_of(&pool, e.id), 0.0);
}

#[test]
fn test_overnight_shift_wraps_midnight() {
    let mut pool = open_test_pool("commission_overnight");
    let a = add_employee(&mut pool, "Anna", true);
    set_commission(&mut pool, 10.0, 10000.0);

    let (e, _) = EntryLogic::set(&mut pool, ALL, shift(a, "2024-06-04", "22:00", "06:00", 30)).unwrap();
    let day = RevenueLogic::set(&mut pool, ALL, d("2024-06-04"), 100.0, "").unwrap();

    assert_eq!(day.total_hours, 7.5);
    assert_eq!(commission_of(&pool, e.id), 10.0);
}

#[test]
fn test_absence_and_incomplete_rows_are_zeroed() {
    let mut pool = open_test_pool("commission_absence_zeroed");
    let a = add_employee(&mut pool, "Anna", true);
    let b = add_employee(&mut pool, "Ben", true);
    set_commission(&mut pool, 10.0, 10000.0);

    EntryLogic::set(&mut pool, ALL, shift(a, "2024-06-04", "09:00", "17:00", 0)).unwrap();
    let (vacation, _) = EntryLogic::set(
        &mut pool,
        ALL,
        TimeEntryInput::absence(b, d("2024-06-04"), EntryType::Vacation),
    )
    .unwrap();

    // A stale amount left on the vacation row must be cleared.
    pool.conn
        .execute(
            "UPDATE time_entries SET commission = 99 WHERE id = ?1",
            [vacation.id],
        )
        .unwrap();

    let day = RevenueLogic::set(&mut pool, ALL, d("2024-06-04"), 100.0, "").unwrap();

    assert_eq!(day.headcount, 1);
    assert_eq!(commission_of(&pool, vacation.id), 0.0);
}

#[test]
fn test_malformed_stored_time_is_a_parse_error() {
    let mut pool = open_test_pool("commission_malformed_time");
    let a = add_employee(&mut pool, "Anna", true);

    pool.conn
        .execute(
            "INSERT INTO time_entries (employee_id, date, entry_type, start_time, end_time)
             VALUES (?1, '2024-06-04', 'work', '9h', '17:00')",
            [a],
        )
        .unwrap();

    let err = CommissionLogic::recompute(&mut pool, d("2024-06-04"), ALL).unwrap_err();
    assert!(err.is_parse_error(), "unexpected error: {err}");
}

#[test]
fn test_failed_recompute_rolls_back_the_write() {
    let mut pool = open_test_pool("commission_rollback_on_failure");
    let a = add_employee(&mut pool, "Anna", true);
    let b = add_employee(&mut pool, "Ben", true);
    set_commission(&mut pool, 10.0, 10000.0);

    pool.conn
        .execute(
            "INSERT INTO time_entries (employee_id, date, entry_type, start_time, end_time)
             VALUES (?1, '2024-06-04', 'work', '9h', '17:00')",
            [a],
        )
        .unwrap();
    let log_rows = |pool: &DbPool| -> i64 {
        pool.conn
            .query_row("SELECT COUNT(*) FROM log", [], |r| r.get(0))
            .unwrap()
    };
    let logged_before = log_rows(&pool);

    let err = EntryLogic::set(&mut pool, ALL, shift(b, "2024-06-04", "09:00", "17:00", 0))
        .unwrap_err();
    assert!(err.is_parse_error(), "unexpected error: {err}");

    let err = RevenueLogic::set(&mut pool, ALL, d("2024-06-04"), 500.0, "").unwrap_err();
    assert!(err.is_parse_error(), "unexpected error: {err}");

    let entries: i64 = pool
        .conn
        .query_row(
            "SELECT COUNT(*) FROM time_entries WHERE employee_id = ?1",
            [b],
            |r| r.get(0),
        )
        .unwrap();
    let revenue: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM revenue", [], |r| r.get(0))
        .unwrap();
    assert_eq!(entries, 0);
    assert_eq!(revenue, 0);
    assert_eq!(log_rows(&pool), logged_before);
}

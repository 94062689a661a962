#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{NaiveDate, NaiveTime};
use rshiftlog::core::employee::EmployeeLogic;
use rshiftlog::core::settings::SettingsLogic;
use rshiftlog::db::pool::DbPool;
use rshiftlog::models::{EmployeeInput, TimeEntryInput};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rsl() -> Command {
    cargo_bin_cmd!("rshiftlog")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rshiftlog.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Fresh database with the current schema, opened through the library.
pub fn open_test_pool(name: &str) -> DbPool {
    let db_path = setup_test_db(name);
    DbPool::open(&db_path).expect("open test db")
}

pub fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid date")
}

pub fn t(s: &str) -> NaiveTime {
    NaiveTime::parse_from_str(s, "%H:%M").expect("valid time")
}

pub fn add_employee(pool: &mut DbPool, name: &str, has_commission: bool) -> i64 {
    let input = EmployeeInput {
        name: name.to_string(),
        contract_hours: 40.0,
        has_commission,
        is_active: true,
        start_date: d("2020-01-01"),
        end_date: None,
    };
    EmployeeLogic::add(pool, &input).expect("add employee").id
}

pub fn set_commission(pool: &mut DbPool, percentage: f64, monthly_max: f64) {
    SettingsLogic::save(pool, Some(percentage), Some(monthly_max)).expect("save settings");
}

pub fn shift(employee_id: i64, date: &str, start: &str, end: &str, pause: i64) -> TimeEntryInput {
    let mut input = TimeEntryInput::work(employee_id, d(date), t(start), t(end));
    input.pause_minutes = pause;
    input
}

/// Initialize DB through the CLI and add a small dataset:
/// one eligible employee working 09:00-17:00 with a 60 min pause on
/// 2024-06-03 and 2024-06-04, revenue 150 on both days, 10 % commission.
pub fn init_db_with_data(db_path: &str) {
    rsl()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    rsl()
        .args([
            "--db",
            db_path,
            "employee",
            "add",
            "--name",
            "Anna Berger",
            "--contract-hours",
            "30",
            "--commission",
            "--start",
            "2024-01-01",
        ])
        .assert()
        .success();

    rsl()
        .args([
            "--db",
            db_path,
            "commission",
            "set",
            "--percentage",
            "10",
            "--max",
            "10000",
        ])
        .assert()
        .success();

    for date in ["2024-06-03", "2024-06-04"] {
        rsl()
            .args([
                "--db",
                db_path,
                "entry",
                "set",
                "--employee",
                "1",
                "--date",
                date,
                "--start",
                "09:00",
                "--end",
                "17:00",
                "--pause",
                "60",
                "--tours-before-18",
                "2",
            ])
            .assert()
            .success();

        rsl()
            .args([
                "--db", db_path, "revenue", "set", "--date", date, "--amount", "150",
            ])
            .assert()
            .success();
    }
}

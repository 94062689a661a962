mod common;
use common::{init_db_with_data, rsl, setup_test_db};
use predicates::prelude::*;
use predicates::str::contains;

#[test]
fn test_init_creates_database() {
    let db_path = setup_test_db("cli_init");

    rsl()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));

    assert!(std::path::Path::new(&db_path).exists());
}

#[test]
fn test_report_shows_month_commission() {
    let db_path = setup_test_db("cli_report");
    init_db_with_data(&db_path);

    rsl()
        .args(["--db", &db_path, "report", "--month", "2024-06"])
        .assert()
        .success()
        .stdout(contains("Monthly overview June 2024"))
        .stdout(contains("Anna Berger"))
        .stdout(contains("30.00"))
        .stdout(contains("14 h 00 min"));

    rsl()
        .args([
            "--db", &db_path, "report", "--month", "2024-06", "--employee", "1", "--details",
        ])
        .assert()
        .success()
        .stdout(contains("15.00"))
        .stdout(contains("2024-06-03"))
        .stdout(contains("2024-06-04"));
}

#[test]
fn test_threshold_then_recompute_changes_commission() {
    let db_path = setup_test_db("cli_threshold_recompute");
    init_db_with_data(&db_path);

    // Tuesday with one worker now needs 200.
    rsl()
        .args([
            "--db",
            &db_path,
            "commission",
            "threshold",
            "--weekday",
            "1",
            "--employees",
            "1",
            "--amount",
            "200",
        ])
        .assert()
        .success()
        .stdout(contains("Tue"));

    rsl()
        .args(["--db", &db_path, "commission", "recompute", "--month", "2024-06"])
        .assert()
        .success()
        .stdout(contains("Recomputed 2 day(s)"));

    rsl()
        .args(["--db", &db_path, "entry", "list", "--month", "2024-06"])
        .assert()
        .success()
        .stdout(contains("15.00"))
        .stdout(contains("0.00"));

    rsl()
        .args(["--db", &db_path, "report", "--month", "2024-06"])
        .assert()
        .success()
        .stdout(contains("15.00"))
        .stdout(contains("30.00").not());
}

#[test]
fn test_invalid_date_is_reported() {
    let db_path = setup_test_db("cli_invalid_date");
    init_db_with_data(&db_path);

    rsl()
        .args([
            "--db",
            &db_path,
            "revenue",
            "set",
            "--date",
            "2024-13-01",
            "--amount",
            "10",
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid date format"));

    rsl()
        .args(["--db", &db_path, "report", "--month", "June"])
        .assert()
        .failure()
        .stderr(contains("Invalid month"));
}

#[test]
fn test_unknown_employee_fails() {
    let db_path = setup_test_db("cli_unknown_employee");
    init_db_with_data(&db_path);

    rsl()
        .args([
            "--db",
            &db_path,
            "entry",
            "set",
            "--employee",
            "99",
            "--date",
            "2024-06-05",
            "--start",
            "09:00",
            "--end",
            "17:00",
        ])
        .assert()
        .failure()
        .stderr(contains("Employee not found: 99"));
}

#[test]
fn test_entry_outside_employment_fails() {
    let db_path = setup_test_db("cli_outside_employment");
    init_db_with_data(&db_path);

    rsl()
        .args([
            "--db",
            &db_path,
            "entry",
            "set",
            "--employee",
            "1",
            "--date",
            "2023-12-29",
            "--type",
            "vacation",
        ])
        .assert()
        .failure()
        .stderr(contains("outside the employment period"));
}

#[test]
fn test_employee_list_and_log() {
    let db_path = setup_test_db("cli_employee_list_log");
    init_db_with_data(&db_path);

    rsl()
        .args(["--db", &db_path, "employee", "list"])
        .assert()
        .success()
        .stdout(contains("Anna Berger"));

    rsl()
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("employee_add"))
        .stdout(contains("entry_set"));

    rsl()
        .args(["--db", &db_path, "log", "--print", "--operation", "revenue_set"])
        .assert()
        .success()
        .stdout(contains("revenue_set"))
        .stdout(contains("employee_add").not());
}

#[test]
fn test_commission_show() {
    let db_path = setup_test_db("cli_commission_show");
    init_db_with_data(&db_path);

    rsl()
        .args(["--db", &db_path, "commission", "show"])
        .assert()
        .success()
        .stdout(contains("Percentage:        10 %"))
        .stdout(contains("all_workers"));
}

#[test]
fn test_backup_plain_and_compressed() {
    let db_path = setup_test_db("cli_backup");
    init_db_with_data(&db_path);

    let out = common::temp_out("cli_backup", "sqlite");
    rsl()
        .args(["--db", &db_path, "backup", "--file", &out])
        .assert()
        .success()
        .stdout(contains("Backup created"));
    assert!(std::path::Path::new(&out).exists());

    let compressed = common::temp_out("cli_backup_gz", "sqlite");
    let archive = if cfg!(target_os = "windows") {
        std::path::Path::new(&compressed).with_extension("zip")
    } else {
        std::path::PathBuf::from(format!("{compressed}.tar.gz"))
    };
    std::fs::remove_file(&archive).ok();

    rsl()
        .args(["--db", &db_path, "backup", "--file", &compressed, "--compress"])
        .assert()
        .success();
    assert!(archive.exists());
    assert!(!std::path::Path::new(&compressed).exists());
}

#[test]
fn test_db_check_and_info() {
    let db_path = setup_test_db("cli_db_info");
    init_db_with_data(&db_path);

    rsl()
        .args(["--db", &db_path, "db", "--check", "--info"])
        .assert()
        .success()
        .stdout(contains("Integrity check passed"))
        .stdout(contains("Time entries"));
}

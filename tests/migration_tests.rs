
use rshiftlog::db::pool::DbPool;
use rusqlite::Connection;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Own directory per test so the pre-migration backup is easy to find.
fn legacy_dir(name: &str) -> PathBuf {
    let dir = env::temp_dir().join(format!("rshiftlog_{}", name));
    fs::remove_dir_all(&dir).ok();
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn create_legacy_db(path: &str) {
    let conn = Connection::open(path).expect("open legacy db");
    conn.execute_batch(
        r#"
        CREATE TABLE employees (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            name           TEXT NOT NULL,
            contract_hours REAL NOT NULL DEFAULT 0,
            has_commission INTEGER NOT NULL DEFAULT 0,
            is_active      INTEGER NOT NULL DEFAULT 1,
            created_at     TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE time_entries (
            id               INTEGER PRIMARY KEY AUTOINCREMENT,
            employee_id      INTEGER NOT NULL,
            date             TEXT NOT NULL,
            entry_type       TEXT NOT NULL DEFAULT 'work',
            start_time       TEXT,
            end_time         TEXT,
            pause_minutes    INTEGER NOT NULL DEFAULT 0,
            commission       REAL NOT NULL DEFAULT 0,
            duftreise_bis_18 INTEGER NOT NULL DEFAULT 0,
            duftreise_ab_18  INTEGER NOT NULL DEFAULT 0,
            notes            TEXT NOT NULL DEFAULT ''
        );

        CREATE TABLE revenue (
            id     INTEGER PRIMARY KEY AUTOINCREMENT,
            date   TEXT NOT NULL,
            amount REAL NOT NULL,
            notes  TEXT NOT NULL DEFAULT ''
        );

        CREATE TABLE commission_settings (
            id          INTEGER PRIMARY KEY,
            percentage  REAL NOT NULL DEFAULT 0,
            monthly_max REAL NOT NULL DEFAULT 0
        );

        CREATE TABLE commission_thresholds (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            weekday        INTEGER NOT NULL,
            employee_count INTEGER NOT NULL,
            threshold      REAL NOT NULL
        );

        INSERT INTO employees (name, contract_hours, has_commission, created_at)
        VALUES ('Anna', 30, 1, '2023-02-15 08:00:00');

        INSERT INTO time_entries (employee_id, date, start_time, end_time, duftreise_bis_18, duftreise_ab_18)
        VALUES (1, '2024-06-03', '09:00', '17:00', 1, 1),
               (1, '2024-06-03', '10:00', '18:00', 4, 2);

        INSERT INTO revenue (date, amount) VALUES ('2024-06-03', 100), ('2024-06-03', 180);

        INSERT INTO commission_settings (id, percentage, monthly_max) VALUES (1, 10, 500);

        INSERT INTO commission_thresholds (weekday, employee_count, threshold)
        VALUES (0, 1, 150), (0, 1, 170), (1, 2, 300);
        "#,
    )
    .expect("create legacy schema");
}

fn count(conn: &Connection, sql: &str) -> i64 {
    conn.query_row(sql, [], |row| row.get(0)).expect("count query")
}

#[test]
fn test_legacy_schema_is_upgraded() {
    let dir = legacy_dir("migration_legacy");
    let db_path = dir.join("legacy.sqlite").to_string_lossy().to_string();
    create_legacy_db(&db_path);

    let pool = DbPool::open(&db_path).expect("migrate legacy db");
    let conn = &pool.conn;

    let start: String = conn
        .query_row("SELECT start_date FROM employees WHERE id = 1", [], |r| r.get(0))
        .unwrap();
    assert_eq!(start, "2023-02-15");

    // Duplicate days collapse onto the newest row, counters keep their values.
    assert_eq!(count(conn, "SELECT COUNT(*) FROM time_entries"), 1);
    let (id, before, after): (i64, i64, i64) = conn
        .query_row(
            "SELECT id, tours_before_18, tours_after_18 FROM time_entries",
            [],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
        )
        .unwrap();
    assert_eq!((id, before, after), (2, 4, 2));

    let amount: f64 = conn
        .query_row("SELECT amount FROM revenue WHERE date = '2024-06-03'", [], |r| r.get(0))
        .unwrap();
    assert_eq!(amount, 180.0);
    assert_eq!(count(conn, "SELECT COUNT(*) FROM revenue"), 1);

    assert_eq!(count(conn, "SELECT COUNT(*) FROM commission_thresholds"), 2);
    assert_eq!(
        count(
            conn,
            "SELECT COUNT(*) FROM commission_thresholds WHERE valid_from = '1970-01-01'"
        ),
        2
    );
    let monday: f64 = conn
        .query_row(
            "SELECT threshold FROM commission_thresholds WHERE weekday = 0 AND employee_count = 1",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(monday, 170.0);

    let applied = count(
        conn,
        "SELECT COUNT(*) FROM log WHERE operation = 'migration_applied'",
    );
    assert_eq!(applied, 5);

    let backups: Vec<_> = fs::read_dir(&dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.file_name()
                .to_string_lossy()
                .ends_with("-backup_db_pre_migration.zip")
        })
        .collect();
    assert_eq!(backups.len(), 1);
}

#[test]
fn test_reopening_does_not_reapply_migrations() {
    let dir = legacy_dir("migration_reopen");
    let db_path = dir.join("legacy.sqlite").to_string_lossy().to_string();
    create_legacy_db(&db_path);

    drop(DbPool::open(&db_path).expect("first open"));
    let pool = DbPool::open(&db_path).expect("second open");

    let applied = count(
        &pool.conn,
        "SELECT COUNT(*) FROM log WHERE operation = 'migration_applied'",
    );
    assert_eq!(applied, 5);
}

#[test]
fn test_fresh_database_has_current_schema() {
    let dir = legacy_dir("migration_fresh");
    let db_path = dir.join("fresh.sqlite").to_string_lossy().to_string();

    let pool = DbPool::open(&db_path).expect("open fresh db");

    for table in [
        "employees",
        "time_entries",
        "revenue",
        "commission_settings",
        "commission_thresholds",
        "log",
    ] {
        let n = count(
            &pool.conn,
            &format!("SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = '{table}'"),
        );
        assert_eq!(n, 1, "missing table {table}");
    }

    assert_eq!(count(&pool.conn, "SELECT COUNT(*) FROM commission_settings"), 1);
    assert_eq!(
        count(&pool.conn, "SELECT COUNT(*) FROM log WHERE operation = 'migration_applied'"),
        0
    );

    let zips = fs::read_dir(&dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".zip"))
        .count();
    assert_eq!(zips, 0);
}

use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use rusqlite::{Connection, OptionalExtension};

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> AppResult<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([table], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

fn table_columns(conn: &Connection, table: &str) -> AppResult<Vec<String>> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1)")?;
    let cols = stmt.query_map([table], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for c in cols {
        out.push(c?);
    }
    Ok(out)
}

/// True when `table` has a UNIQUE index over exactly `columns`, in order.
fn has_unique_index(conn: &Connection, table: &str, columns: &[&str]) -> AppResult<bool> {
    let indexes: Vec<String> = {
        let mut stmt =
            conn.prepare(r#"SELECT name FROM pragma_index_list(?1) WHERE "unique" = 1"#)?;
        let rows = stmt.query_map([table], |row| row.get::<_, String>(0))?;
        let mut v = Vec::new();
        for r in rows {
            v.push(r?);
        }
        v
    };

    for idx in indexes {
        let mut stmt = conn.prepare("SELECT name FROM pragma_index_info(?1) ORDER BY seqno")?;
        let rows = stmt.query_map([&idx], |row| row.get::<_, Option<String>>(0))?;

        let mut idx_cols = Vec::new();
        for r in rows {
            idx_cols.push(r?.unwrap_or_default());
        }

        if idx_cols == columns {
            return Ok(true);
        }
    }

    Ok(false)
}

fn is_applied(conn: &Connection, version: &str) -> AppResult<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> AppResult<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    success(format!("Migration applied: {} → {}", version, message));
    Ok(())
}

/// Create every table with the modern schema. No-op for existing tables.
fn create_schema(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS employees (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            name           TEXT NOT NULL,
            contract_hours REAL NOT NULL DEFAULT 0,
            has_commission INTEGER NOT NULL DEFAULT 0,
            is_active      INTEGER NOT NULL DEFAULT 1,
            start_date     TEXT NOT NULL,
            end_date       TEXT,
            created_at     TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS time_entries (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            employee_id     INTEGER NOT NULL REFERENCES employees(id),
            date            TEXT NOT NULL,
            entry_type      TEXT NOT NULL DEFAULT 'work' CHECK(entry_type IN ('work','vacation','sick')),
            start_time      TEXT,
            end_time        TEXT,
            pause_minutes   INTEGER NOT NULL DEFAULT 0,
            commission      REAL NOT NULL DEFAULT 0,
            tours_before_18 INTEGER NOT NULL DEFAULT 0,
            tours_after_18  INTEGER NOT NULL DEFAULT 0,
            notes           TEXT NOT NULL DEFAULT '',
            created_at      TEXT NOT NULL DEFAULT (datetime('now')),
            UNIQUE (employee_id, date)
        );

        CREATE TABLE IF NOT EXISTS revenue (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            date       TEXT NOT NULL UNIQUE,
            amount     REAL NOT NULL,
            notes      TEXT NOT NULL DEFAULT '',
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS commission_settings (
            id          INTEGER PRIMARY KEY CHECK (id = 1),
            percentage  REAL NOT NULL DEFAULT 0,
            monthly_max REAL NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS commission_thresholds (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            weekday        INTEGER NOT NULL CHECK(weekday BETWEEN 0 AND 6),
            employee_count INTEGER NOT NULL,
            threshold      REAL NOT NULL,
            valid_from     TEXT NOT NULL DEFAULT '1970-01-01',
            UNIQUE (weekday, employee_count, valid_from)
        );
        "#,
    )?;
    Ok(())
}

fn create_indexes(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE INDEX IF NOT EXISTS idx_time_entries_date ON time_entries(date);
        "#,
    )?;
    Ok(())
}

/// Older databases lack the employment period columns.
fn migrate_employee_period(conn: &Connection) -> AppResult<()> {
    let version = "20240301_0001_employee_period";
    let cols = table_columns(conn, "employees")?;

    let has_start = cols.iter().any(|c| c == "start_date");
    let has_end = cols.iter().any(|c| c == "end_date");

    if !has_start {
        conn.execute("ALTER TABLE employees ADD COLUMN start_date TEXT", [])?;
    }
    if !has_end {
        conn.execute("ALTER TABLE employees ADD COLUMN end_date TEXT", [])?;
    }

    // Rows without a start date fall back to their creation day.
    let fallback = if cols.iter().any(|c| c == "created_at") {
        "COALESCE(date(created_at), '1970-01-01')"
    } else {
        "'1970-01-01'"
    };
    let filled = conn.execute(
        &format!(
            "UPDATE employees SET start_date = {fallback}
             WHERE start_date IS NULL OR start_date = ''"
        ),
        [],
    )?;

    if (!has_start || !has_end || filled > 0) && !is_applied(conn, version)? {
        mark_applied(conn, version, "Added employment period to employees")?;
    }
    Ok(())
}

/// Rename the legacy daily counter columns.
fn migrate_counter_columns(conn: &Connection) -> AppResult<()> {
    let version = "20240415_0002_rename_tour_counters";
    let cols = table_columns(conn, "time_entries")?;

    let mut renamed = false;
    for (old, new) in [
        ("duftreise_bis_18", "tours_before_18"),
        ("duftreise_ab_18", "tours_after_18"),
    ] {
        let has_old = cols.iter().any(|c| c == old);
        let has_new = cols.iter().any(|c| c == new);

        if has_old && !has_new {
            conn.execute_batch(&format!(
                "ALTER TABLE time_entries RENAME COLUMN {old} TO {new};"
            ))?;
            renamed = true;
        } else if !has_old && !has_new {
            conn.execute_batch(&format!(
                "ALTER TABLE time_entries ADD COLUMN {new} INTEGER NOT NULL DEFAULT 0;"
            ))?;
            renamed = true;
        }
    }

    if renamed {
        mark_applied(conn, version, "Renamed daily tour counters")?;
    }
    Ok(())
}

/// Rebuild `commission_thresholds` with `valid_from` and the
/// (weekday, employee_count, valid_from) unique key.
fn migrate_thresholds_valid_from(conn: &Connection) -> AppResult<()> {
    let version = "20240601_0003_threshold_valid_from";
    let cols = table_columns(conn, "commission_thresholds")?;
    let has_valid_from = cols.iter().any(|c| c == "valid_from");

    if has_valid_from
        && has_unique_index(
            conn,
            "commission_thresholds",
            &["weekday", "employee_count", "valid_from"],
        )?
    {
        conn.execute(
            "UPDATE commission_thresholds SET valid_from = '1970-01-01' WHERE valid_from IS NULL",
            [],
        )?;
        return Ok(());
    }

    warning("Rebuilding commission_thresholds with validity dates...");

    let valid_from_expr = if has_valid_from {
        "COALESCE(valid_from, '1970-01-01')"
    } else {
        "'1970-01-01'"
    };

    // Legacy rows may collide once valid_from is part of the key: keep the newest.
    conn.execute_batch(&format!(
        r#"
        BEGIN;

        ALTER TABLE commission_thresholds RENAME TO commission_thresholds_old;

        CREATE TABLE commission_thresholds (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            weekday        INTEGER NOT NULL CHECK(weekday BETWEEN 0 AND 6),
            employee_count INTEGER NOT NULL,
            threshold      REAL NOT NULL,
            valid_from     TEXT NOT NULL DEFAULT '1970-01-01',
            UNIQUE (weekday, employee_count, valid_from)
        );

        INSERT OR REPLACE INTO commission_thresholds (id, weekday, employee_count, threshold, valid_from)
        SELECT id, weekday, employee_count, threshold, {valid_from_expr}
        FROM commission_thresholds_old
        ORDER BY id ASC;

        DROP TABLE commission_thresholds_old;

        COMMIT;
        "#
    ))?;

    mark_applied(conn, version, "Added valid_from to commission thresholds")?;
    Ok(())
}

/// Collapse duplicates (keeping the newest row) and enforce one row per key.
fn enforce_unique_key(
    conn: &Connection,
    version: &str,
    table: &str,
    key: &[&str],
    index_name: &str,
) -> AppResult<()> {
    if has_unique_index(conn, table, key)? {
        return Ok(());
    }

    let key_list = key.join(", ");
    let removed = conn.execute(
        &format!(
            "DELETE FROM {table}
             WHERE id NOT IN (SELECT MAX(id) FROM {table} GROUP BY {key_list})"
        ),
        [],
    )?;

    if removed > 0 {
        warning(format!(
            "Removed {} duplicate row(s) from {} (kept the latest per {}).",
            removed, table, key_list
        ));
    }

    conn.execute_batch(&format!(
        "CREATE UNIQUE INDEX IF NOT EXISTS {index_name} ON {table}({key_list});"
    ))?;

    mark_applied(conn, version, &format!("Enforced unique ({key_list}) on {table}"))?;
    Ok(())
}

fn seed_settings(conn: &Connection) -> AppResult<()> {
    conn.execute(
        "INSERT OR IGNORE INTO commission_settings (id, percentage, monthly_max) VALUES (1, 0, 0)",
        [],
    )?;
    Ok(())
}

/// Legacy databases come from the previous server-based tool.
fn is_legacy_schema(conn: &Connection) -> AppResult<bool> {
    if !table_exists(conn, "employees")? {
        return Ok(false);
    }

    let employee_cols = table_columns(conn, "employees")?;
    if !employee_cols.iter().any(|c| c == "start_date")
        || !employee_cols.iter().any(|c| c == "end_date")
    {
        return Ok(true);
    }

    if table_exists(conn, "time_entries")? {
        let entry_cols = table_columns(conn, "time_entries")?;
        if entry_cols.iter().any(|c| c.starts_with("duftreise_"))
            || !has_unique_index(conn, "time_entries", &["employee_id", "date"])?
        {
            return Ok(true);
        }
    }

    if table_exists(conn, "revenue")? && !has_unique_index(conn, "revenue", &["date"])? {
        return Ok(true);
    }

    if table_exists(conn, "commission_thresholds")? {
        let cols = table_columns(conn, "commission_thresholds")?;
        if !cols.iter().any(|c| c == "valid_from") {
            return Ok(true);
        }
    }

    Ok(false)
}

fn backup_before_migration(db_path: &str) -> AppResult<()> {
    use chrono::Local;
    use std::fs::{self, File};
    use std::io::Write;
    use zip::CompressionMethod;
    use zip::ZipWriter;
    use zip::write::FileOptions;

    let backup_name = format!(
        "{}-backup_db_pre_migration.zip",
        Local::now().format("%Y%m%d_%H%M%S")
    );

    let backup_path = std::path::Path::new(db_path)
        .parent()
        .map(|p| p.join(&backup_name))
        .ok_or_else(|| AppError::Migration(format!("No parent directory for {db_path}")))?;

    let zip_err = |e: zip::result::ZipError| AppError::Migration(format!("Backup failed: {e}"));

    let file = File::create(&backup_path)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.start_file("database.sqlite", options).map_err(zip_err)?;

    let db_content = fs::read(db_path)?;
    zip.write_all(&db_content)?;
    zip.finish().map_err(zip_err)?;

    success(format!("📦 Backup created: {}", backup_path.display()));
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by `DbPool::open`.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    // 1) Ensure log table
    ensure_log_table(conn)?;

    // 2) Detect legacy schema → safety backup first
    let fresh = !table_exists(conn, "employees")?;

    if is_legacy_schema(conn)? {
        warning("Legacy schema detected, creating safety backup before migration...");

        let db_path: String = conn
            .query_row("PRAGMA database_list;", [], |row| row.get::<_, String>(2))
            .unwrap_or_default();

        if !db_path.is_empty() {
            backup_before_migration(&db_path)?;
        } else {
            warning("Could not determine DB path, backup skipped.");
        }
    }

    // 3) Tables missing entirely get the modern schema
    create_schema(conn)?;
    if fresh {
        success("Created database schema.");
    }

    // 4) Upgrade older layouts
    migrate_employee_period(conn)?;
    migrate_counter_columns(conn)?;
    migrate_thresholds_valid_from(conn)?;
    enforce_unique_key(
        conn,
        "20240701_0004_unique_entry_per_day",
        "time_entries",
        &["employee_id", "date"],
        "idx_time_entries_unique_day",
    )?;
    enforce_unique_key(
        conn,
        "20240701_0005_unique_revenue_per_day",
        "revenue",
        &["date"],
        "idx_revenue_unique_date",
    )?;

    // 5) Indexes and singleton rows
    create_indexes(conn)?;
    seed_settings(conn)?;

    Ok(())
}

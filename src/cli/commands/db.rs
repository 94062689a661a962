use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::migrate::run_pending_migrations;
use crate::db::pool::DbPool;
use crate::db::stats;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Db {
        migrate,
        check,
        vacuum,
        info: show_info,
    } = cmd
    else {
        return Ok(());
    };

    // Opened raw so `--migrate` is what upgrades the schema.
    let pool = DbPool::new(&cfg.database)?;

    if *migrate {
        info("Running migrations…");
        run_pending_migrations(&pool.conn)?;
        success("Migration completed.");
    }

    if *show_info {
        stats::print_db_info(&pool, &cfg.database)?;
    }

    if *check {
        integrity_check(&pool)?;
    }

    if *vacuum {
        info("Running VACUUM…");
        pool.conn.execute_batch("VACUUM;")?;
        success("Vacuum completed.");
    }

    if !(*migrate || *show_info || *check || *vacuum) {
        info("Nothing to do: pass --migrate, --check, --vacuum or --info.");
    }

    Ok(())
}

/// SQLite page integrity plus dangling employee references.
fn integrity_check(pool: &DbPool) -> AppResult<()> {
    info("Running integrity check…");

    let integrity: String = pool
        .conn
        .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;

    let orphans: i64 = pool.conn.query_row(
        "SELECT COUNT(*) FROM time_entries t
         LEFT JOIN employees e ON e.id = t.employee_id
         WHERE e.id IS NULL",
        [],
        |row| row.get(0),
    )?;

    if integrity == "ok" && orphans == 0 {
        success("Integrity check passed.");
    } else {
        if integrity != "ok" {
            warning(format!("Integrity check failed: {integrity}"));
        }
        if orphans > 0 {
            warning(format!("{orphans} time entry(ies) reference a missing employee."));
        }
    }
    Ok(())
}

//! Repository for the singleton commission settings row.

use crate::errors::AppResult;
use crate::models::CommissionSettings;
use rusqlite::{Connection, OptionalExtension, params};

/// Current settings; a missing row reads as all zeros.
pub fn load_settings(conn: &Connection) -> AppResult<CommissionSettings> {
    let mut stmt = conn
        .prepare_cached("SELECT percentage, monthly_max FROM commission_settings WHERE id = 1")?;

    let row = stmt
        .query_row([], |row| {
            Ok(CommissionSettings {
                percentage: row.get::<_, Option<f64>>(0)?.unwrap_or(0.0),
                monthly_max: row.get::<_, Option<f64>>(1)?.unwrap_or(0.0),
            })
        })
        .optional()?;

    Ok(row.unwrap_or_default())
}

pub fn save_settings(conn: &Connection, settings: &CommissionSettings) -> AppResult<()> {
    conn.execute(
        "INSERT INTO commission_settings (id, percentage, monthly_max)
         VALUES (1, ?1, ?2)
         ON CONFLICT(id) DO UPDATE SET
             percentage = excluded.percentage,
             monthly_max = excluded.monthly_max",
        params![settings.percentage, settings.monthly_max],
    )?;
    Ok(())
}

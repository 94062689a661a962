use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::settings::{load_settings, save_settings};
use crate::db::thresholds::{list_thresholds, upsert_threshold};
use crate::errors::{AppError, AppResult};
use crate::models::{CommissionSettings, CommissionThreshold};

fn non_negative(label: &str, value: f64) -> AppResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::InvalidValue(format!(
            "{label} must be >= 0, got {value}"
        )));
    }
    Ok(())
}

/// Commission settings and threshold rules. Changing either does not
/// recompute stored commissions; run a recompute for the affected dates.
pub struct SettingsLogic;

impl SettingsLogic {
    pub fn show(pool: &DbPool) -> AppResult<CommissionSettings> {
        load_settings(&pool.conn)
    }

    /// Update percentage and/or monthly cap, keeping the other value.
    pub fn save(
        pool: &mut DbPool,
        percentage: Option<f64>,
        monthly_max: Option<f64>,
    ) -> AppResult<CommissionSettings> {
        let mut settings = load_settings(&pool.conn)?;

        if let Some(p) = percentage {
            non_negative("percentage", p)?;
            if p > 100.0 {
                return Err(AppError::InvalidValue(format!(
                    "percentage must be <= 100, got {p}"
                )));
            }
            settings.percentage = p;
        }
        if let Some(m) = monthly_max {
            non_negative("monthly cap", m)?;
            settings.monthly_max = m;
        }

        save_settings(&pool.conn, &settings)?;
        ttlog(
            &pool.conn,
            "settings",
            "commission",
            &format!(
                "percentage={} monthly_max={}",
                settings.percentage, settings.monthly_max
            ),
        )?;

        Ok(settings)
    }

    pub fn set_threshold(pool: &mut DbPool, rule: &CommissionThreshold) -> AppResult<()> {
        if rule.weekday > 6 {
            return Err(AppError::InvalidValue(format!(
                "weekday must be 0 (Monday) to 6 (Sunday), got {}",
                rule.weekday
            )));
        }
        if rule.employee_count == 0 {
            return Err(AppError::InvalidValue(
                "employee count must be at least 1".into(),
            ));
        }
        non_negative("threshold", rule.threshold)?;

        upsert_threshold(&pool.conn, rule)?;
        ttlog(
            &pool.conn,
            "threshold",
            &format!("{}/{}", rule.weekday, rule.employee_count),
            &format!("threshold={} valid_from={}", rule.threshold, rule.valid_from),
        )?;
        Ok(())
    }

    pub fn thresholds(pool: &DbPool) -> AppResult<Vec<CommissionThreshold>> {
        list_thresholds(&pool.conn)
    }
}

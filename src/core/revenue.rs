use crate::core::commission::{CommissionLogic, DayCommission};
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::revenue::{list_revenue, upsert_revenue};
use crate::errors::{AppError, AppResult};
use crate::models::{HeadcountMode, Revenue};
use crate::utils::date::month_bounds;
use chrono::NaiveDate;

pub struct RevenueLogic;

impl RevenueLogic {
    /// Record the takings of `date` (latest write wins) and recompute the day,
    /// both in one transaction.
    pub fn set(
        pool: &mut DbPool,
        mode: HeadcountMode,
        date: NaiveDate,
        amount: f64,
        notes: &str,
    ) -> AppResult<DayCommission> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(AppError::InvalidValue(format!(
                "revenue must be >= 0, got {amount}"
            )));
        }

        let tx = pool.conn.transaction()?;
        let id = upsert_revenue(&tx, date, amount, notes)?;
        ttlog(
            &tx,
            "revenue_set",
            &id.to_string(),
            &format!("Revenue {date}: {amount:.2}"),
        )?;

        let day = CommissionLogic::recompute_with(&*tx, date, mode)?;
        tx.commit()?;
        Ok(day)
    }

    pub fn list(pool: &DbPool, month: Option<(i32, u32)>) -> AppResult<Vec<Revenue>> {
        let bounds = month.map(|(y, m)| month_bounds(y, m)).transpose()?;
        list_revenue(&pool.conn, bounds)
    }
}

pub mod backup;
pub mod commission;
pub mod config;
pub mod db;
pub mod employee;
pub mod entry;
pub mod export;
pub mod init;
pub mod log;
pub mod report;
pub mod revenue;

use crate::config::Config;
use crate::core::commission::DayCommission;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::utils::colors::{RESET, color_for_amount};
use crate::utils::date::display_date;
use crate::utils::formatting::{format_hours_minutes, format_money};

/// Open the configured database with an up-to-date schema.
pub(crate) fn open_pool(cfg: &Config) -> AppResult<DbPool> {
    DbPool::open(&cfg.database)
}

/// One-line outcome of a recomputation.
pub(crate) fn print_day_commission(day: &DayCommission, currency: &str) {
    let color = color_for_amount(day.pool);
    info(format!(
        "{}: revenue {} | threshold {} | {} worker(s) | eligible hours {} | pool {}{}{}",
        display_date(day.date),
        format_money(day.revenue, currency),
        format_money(day.threshold, currency),
        day.headcount,
        format_hours_minutes(day.total_hours),
        color,
        format_money(day.pool, currency),
        RESET,
    ));
}

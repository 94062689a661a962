use crate::cli::commands::{open_pool, print_day_commission};
use crate::cli::parser::{CommissionCmd, Commands};
use crate::config::Config;
use crate::core::commission::CommissionLogic;
use crate::core::settings::SettingsLogic;
use crate::db::entries::entry_dates_between;
use crate::db::log::ttlog;
use crate::errors::AppResult;
use crate::models::CommissionThreshold;
use crate::ui::messages::{hint, info, success};
use crate::utils::date::{month_bounds, parse_date, parse_month, parse_optional_date, weekday_name};
use crate::utils::formatting::format_money;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Commission { action } = cmd else {
        return Ok(());
    };

    let mut pool = open_pool(cfg)?;
    let currency = &cfg.currency_symbol;

    match action {
        CommissionCmd::Show => {
            let s = SettingsLogic::show(&pool)?;
            println!("Percentage:        {} %", s.percentage);
            println!("Monthly cap:       {}", format_money(s.monthly_max, currency));
            println!("Headcount mode:    {}", cfg.threshold_headcount.as_str());
        }

        CommissionCmd::Set {
            percentage,
            monthly_max,
        } => {
            if percentage.is_none() && monthly_max.is_none() {
                info("Nothing to update.");
                return Ok(());
            }
            let s = SettingsLogic::save(&mut pool, *percentage, *monthly_max)?;
            success(format!(
                "Commission settings saved: {} % of revenue, cap {} per month.",
                s.percentage,
                format_money(s.monthly_max, currency)
            ));
            hint("Stored commissions change only after `commission recompute`.");
        }

        CommissionCmd::Threshold {
            weekday,
            employee_count,
            amount,
            valid_from,
        } => {
            let rule = CommissionThreshold {
                weekday: *weekday,
                employee_count: *employee_count,
                threshold: *amount,
                valid_from: parse_optional_date(valid_from.as_deref())?
                    .unwrap_or_else(CommissionThreshold::default_valid_from),
            };
            SettingsLogic::set_threshold(&mut pool, &rule)?;
            success(format!(
                "Threshold for {} with {} employee(s) set to {} from {}.",
                weekday_name(rule.weekday),
                rule.employee_count,
                format_money(rule.threshold, currency),
                rule.valid_from
            ));
            hint("Stored commissions change only after `commission recompute`.");
        }

        CommissionCmd::Thresholds => {
            let rules = SettingsLogic::thresholds(&pool)?;
            if rules.is_empty() {
                info("No threshold rules defined (threshold is 0 everywhere).");
                return Ok(());
            }

            let mut table = Table::new(vec![
                Column::left("Weekday"),
                Column::right("Employees"),
                Column::right("Threshold"),
                Column::left("Valid from"),
            ]);
            for r in &rules {
                table.add_row(vec![
                    format!("{} ({})", weekday_name(r.weekday), r.weekday),
                    r.employee_count.to_string(),
                    format_money(r.threshold, currency),
                    r.valid_from.to_string(),
                ]);
            }
            print!("{}", table.render());
        }

        CommissionCmd::Recompute { date, month } => {
            let dates = match (date, month) {
                (Some(d), _) => vec![parse_date(d)?],
                (None, Some(m)) => {
                    let (y, m) = parse_month(m)?;
                    let (first, last) = month_bounds(y, m)?;
                    entry_dates_between(&pool.conn, None, first, last)?
                }
                (None, None) => Vec::new(),
            };

            let days =
                CommissionLogic::recompute_dates(&mut pool, &dates, cfg.threshold_headcount)?;
            for day in &days {
                print_day_commission(day, currency);
            }

            ttlog(
                &pool.conn,
                "recompute",
                date.as_deref().or(month.as_deref()).unwrap_or(""),
                &format!("Recomputed {} day(s)", days.len()),
            )?;
            success(format!("Recomputed {} day(s).", days.len()));
        }
    }

    Ok(())
}

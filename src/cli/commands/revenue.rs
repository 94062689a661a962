use crate::cli::commands::{open_pool, print_day_commission};
use crate::cli::parser::{Commands, RevenueCmd};
use crate::config::Config;
use crate::core::revenue::RevenueLogic;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::date::{parse_date, parse_month};
use crate::utils::formatting::{format_money, one_line};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Revenue { action } = cmd else {
        return Ok(());
    };

    let mut pool = open_pool(cfg)?;

    match action {
        RevenueCmd::Set {
            date,
            amount,
            notes,
        } => {
            let date = parse_date(date)?;
            let day = RevenueLogic::set(&mut pool, cfg.threshold_headcount, date, *amount, notes)?;
            success(format!(
                "Revenue for {} set to {}.",
                date,
                format_money(*amount, &cfg.currency_symbol)
            ));
            print_day_commission(&day, &cfg.currency_symbol);
        }

        RevenueCmd::List { month } => {
            let month = month.as_deref().map(parse_month).transpose()?;
            let rows = RevenueLogic::list(&pool, month)?;

            if rows.is_empty() {
                info("No revenue recorded.");
                return Ok(());
            }

            let mut table = Table::new(vec![
                Column::left("Date"),
                Column::right("Amount"),
                Column::left("Notes"),
            ]);
            let mut total = 0.0;
            for r in &rows {
                total += r.amount;
                table.add_row(vec![
                    r.date.to_string(),
                    format_money(r.amount, &cfg.currency_symbol),
                    one_line(&r.notes, 40),
                ]);
            }
            print!("{}", table.render());
            println!("Total: {}", format_money(total, &cfg.currency_symbol));
        }
    }

    Ok(())
}

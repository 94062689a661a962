use crate::cli::commands::entry::entries_table;
use crate::cli::commands::open_pool;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::report::{EmployeeMonth, ReportLogic};
use crate::errors::AppResult;
use crate::ui::messages::{header, info};
use crate::utils::colors::{RESET, color_for_amount};
use crate::utils::date::{month_name, parse_month};
use crate::utils::formatting::{bold, format_hours_minutes, format_money};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Report {
        month,
        employee,
        details,
    } = cmd
    else {
        return Ok(());
    };

    let (year, month) = parse_month(month)?;
    let mut pool = open_pool(cfg)?;

    let months = match employee {
        Some(id) => vec![ReportLogic::employee_month(&mut pool, cfg, *id, year, month)?],
        None => ReportLogic::month_overview(&mut pool, cfg, year, month)?.employees,
    };

    header(format!("Monthly overview {} {}", month_name(month), year));

    if months.is_empty() {
        info("No active employees.");
        return Ok(());
    }

    print!("{}", summary_table(&months, &cfg.currency_symbol).render());

    if *details {
        for m in &months {
            println!("\n{}", bold(&m.employee.name));
            if m.entries.is_empty() {
                info("No entries this month.");
            } else {
                print!("{}", entries_table(&m.entries, &cfg.currency_symbol).render());
            }
        }
    }

    Ok(())
}

fn summary_table(months: &[EmployeeMonth], currency: &str) -> Table {
    let mut table = Table::new(vec![
        Column::left("Employee"),
        Column::right("Worked"),
        Column::right("Expected"),
        Column::right("Work"),
        Column::right("Vacation"),
        Column::right("Sick"),
        Column::right("Tours <18"),
        Column::right("Tours >=18"),
        Column::right("Commission"),
    ]);

    for m in months {
        let s = &m.summary;
        table.add_row(vec![
            m.employee.name.clone(),
            format_hours_minutes(s.total_hours),
            s.contract_hours_month
                .map(format_hours_minutes)
                .unwrap_or_else(|| "-".into()),
            s.work_days.to_string(),
            s.vacation_days.to_string(),
            s.sick_days.to_string(),
            s.total_tours_before_18.to_string(),
            s.total_tours_after_18.to_string(),
            format!(
                "{}{}{}",
                color_for_amount(s.total_commission),
                format_money(s.total_commission, currency),
                RESET
            ),
        ]);
    }
    table
}

use crate::cli::commands::open_pool;
use crate::cli::parser::{Commands, EmployeeCmd};
use crate::config::Config;
use crate::core::employee::{EmployeeLogic, EmployeeUpdate};
use crate::errors::AppResult;
use crate::models::{Employee, EmployeeInput};
use crate::ui::messages::{hint, info, success};
use crate::utils::colors::{GREEN, GREY, RESET};
use crate::utils::date::{parse_date, parse_optional_date, today};
use crate::utils::format_decimal;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Employee { action } = cmd else {
        return Ok(());
    };

    let mut pool = open_pool(cfg)?;

    match action {
        EmployeeCmd::Add {
            name,
            contract_hours,
            has_commission,
            inactive,
            start,
            end,
        } => {
            let input = EmployeeInput {
                name: name.trim().to_string(),
                contract_hours: *contract_hours,
                has_commission: *has_commission,
                is_active: !*inactive,
                start_date: parse_optional_date(start.as_deref())?.unwrap_or_else(today),
                end_date: parse_optional_date(end.as_deref())?,
            };

            let employee = EmployeeLogic::add(&mut pool, &input)?;
            success(format!(
                "Employee #{} '{}' added (employed {}).",
                employee.id,
                employee.name,
                employee.period().describe()
            ));
        }

        EmployeeCmd::Update {
            id,
            name,
            contract_hours,
            has_commission,
            is_active,
            start,
            end,
            clear_end,
        } => {
            let end_date = if *clear_end {
                Some(None)
            } else {
                end.as_deref().map(parse_date).transpose()?.map(Some)
            };

            let changes = EmployeeUpdate {
                name: name.as_ref().map(|n| n.trim().to_string()),
                contract_hours: *contract_hours,
                has_commission: *has_commission,
                is_active: *is_active,
                start_date: parse_optional_date(start.as_deref())?,
                end_date,
            };

            if changes.is_empty() {
                info("Nothing to update.");
                return Ok(());
            }

            let employee = EmployeeLogic::update(&mut pool, *id, changes)?;
            success(format!("Employee #{} '{}' updated.", employee.id, employee.name));
            hint("Run `commission recompute` for dates affected by the change.");
        }

        EmployeeCmd::List { all } => {
            let employees = EmployeeLogic::list(&pool, !*all)?;
            if employees.is_empty() {
                info("No employees found.");
            } else {
                print!("{}", employees_table(&employees).render());
            }
        }
    }

    Ok(())
}

fn employees_table(employees: &[Employee]) -> Table {
    let mut table = Table::new(vec![
        Column::right("ID"),
        Column::left("Name"),
        Column::right("h/week"),
        Column::left("Commission"),
        Column::left("Active"),
        Column::left("Start"),
        Column::left("End"),
    ]);

    let flag = |on: bool| {
        if on {
            format!("{GREEN}yes{RESET}")
        } else {
            format!("{GREY}no{RESET}")
        }
    };

    for e in employees {
        table.add_row(vec![
            e.id.to_string(),
            e.name.clone(),
            format_decimal(e.contract_hours, ""),
            flag(e.has_commission),
            flag(e.is_active),
            e.start_date.to_string(),
            e.end_date
                .map(|d| d.to_string())
                .unwrap_or_else(|| format!("{GREY}-{RESET}")),
        ]);
    }
    table
}

use crate::cli::commands::{open_pool, print_day_commission};
use crate::cli::parser::{Commands, EntryCmd};
use crate::config::Config;
use crate::core::entry::{EntryLogic, EntryUpdate};
use crate::errors::AppResult;
use crate::models::{TimeEntry, TimeEntryInput};
use crate::ui::messages::{info, success};
use crate::utils::colors::{color_for_amount, colorize_optional, RESET};
use crate::utils::date::{parse_date, parse_month, parse_optional_date, weekday_index, weekday_name};
use crate::utils::formatting::{format_hours_minutes, format_money, one_line};
use crate::utils::table::{Column, Table};
use crate::utils::time::{format_time, parse_optional_time};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Entry { action } = cmd else {
        return Ok(());
    };

    let mode = cfg.threshold_headcount;
    let mut pool = open_pool(cfg)?;

    match action {
        EntryCmd::Set {
            employee,
            date,
            entry_type,
            start,
            end,
            pause,
            tours_before_18,
            tours_after_18,
            notes,
        } => {
            let input = TimeEntryInput {
                employee_id: *employee,
                date: parse_date(date)?,
                entry_type: *entry_type,
                start_time: parse_optional_time(start.as_deref())?,
                end_time: parse_optional_time(end.as_deref())?,
                pause_minutes: *pause,
                tours_before_18: *tours_before_18,
                tours_after_18: *tours_after_18,
                notes: notes.clone(),
            };

            let (entry, day) = EntryLogic::set(&mut pool, mode, input)?;
            success(format!(
                "Saved {} entry #{} for {} on {}: commission {}",
                entry.entry_type.label().to_lowercase(),
                entry.id,
                entry.employee_name.as_deref().unwrap_or("?"),
                entry.date,
                format_money(entry.commission, &cfg.currency_symbol)
            ));
            print_day_commission(&day, &cfg.currency_symbol);
        }

        EntryCmd::Update {
            id,
            employee,
            date,
            entry_type,
            start,
            end,
            pause,
            tours_before_18,
            tours_after_18,
            notes,
        } => {
            let changes = EntryUpdate {
                employee_id: *employee,
                date: parse_optional_date(date.as_deref())?,
                entry_type: *entry_type,
                start_time: parse_optional_time(start.as_deref())?,
                end_time: parse_optional_time(end.as_deref())?,
                pause_minutes: *pause,
                tours_before_18: *tours_before_18,
                tours_after_18: *tours_after_18,
                notes: notes.clone(),
            };

            let (entry, days) = EntryLogic::update(&mut pool, mode, *id, changes)?;
            success(format!(
                "Updated entry #{} ({} on {}): commission {}",
                entry.id,
                entry.entry_type.label().to_lowercase(),
                entry.date,
                format_money(entry.commission, &cfg.currency_symbol)
            ));
            for day in &days {
                print_day_commission(day, &cfg.currency_symbol);
            }
        }

        EntryCmd::Del { id } => {
            let day = EntryLogic::delete(&mut pool, mode, *id)?;
            success(format!("Deleted entry #{id}."));
            print_day_commission(&day, &cfg.currency_symbol);
        }

        EntryCmd::List { employee, month } => {
            let month = month.as_deref().map(parse_month).transpose()?;
            let entries = EntryLogic::list(&pool, *employee, month)?;

            if entries.is_empty() {
                info("No entries found.");
            } else {
                print!("{}", entries_table(&entries, &cfg.currency_symbol).render());
            }
        }
    }

    Ok(())
}

pub(crate) fn entries_table(entries: &[TimeEntry], currency: &str) -> Table {
    let mut table = Table::new(vec![
        Column::right("ID"),
        Column::left("Date"),
        Column::left("Day"),
        Column::left("Employee"),
        Column::left("Type"),
        Column::left("Start"),
        Column::left("End"),
        Column::right("Pause"),
        Column::right("Worked"),
        Column::right("Tours <18/>=18"),
        Column::right("Commission"),
        Column::left("Notes"),
    ]);

    for e in entries {
        let time = |t: Option<chrono::NaiveTime>| {
            colorize_optional(&t.map(format_time).unwrap_or_else(|| "--:--".into()))
        };

        table.add_row(vec![
            e.id.to_string(),
            e.date.to_string(),
            weekday_name(weekday_index(e.date)).to_string(),
            e.employee_name.clone().unwrap_or_else(|| format!("#{}", e.employee_id)),
            e.entry_type.label().to_string(),
            time(e.start_time),
            time(e.end_time),
            format!("{} min", e.pause_minutes),
            colorize_optional(
                &e.worked_hours()
                    .map(format_hours_minutes)
                    .unwrap_or_else(|| "-".into()),
            ),
            format!("{} / {}", e.tours_before_18, e.tours_after_18),
            format!(
                "{}{}{}",
                color_for_amount(e.commission),
                format_money(e.commission, currency),
                RESET
            ),
            one_line(&e.notes, 30),
        ]);
    }
    table
}

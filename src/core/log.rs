use crate::db::log::{LogLine, log_lines};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use ansi_term::Colour;
use regex::Regex;

/// Visible width of the "operation (target)" column.
const OP_WIDTH: usize = 60;

fn color_for_operation(op: &str) -> Colour {
    match op {
        "employee_add" | "entry_set" | "revenue_set" => Colour::Green,
        "entry_del" => Colour::Red,
        "employee_update" | "entry_update" => Colour::Yellow,
        "settings" | "threshold" | "recompute" => Colour::Cyan,
        "migration_applied" => Colour::Purple,
        "backup" | "export" => Colour::Blue,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

/// Seconds precision is enough on screen.
fn short_date(raw: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

/// `operation (target)`, cut to `OP_WIDTH` visible characters.
/// Only the operation keeps its color.
fn op_column(ansi: &Regex, line: &LogLine) -> (String, usize) {
    let color = color_for_operation(&line.operation);

    let mut plain = line.operation.clone();
    if !line.target.is_empty() {
        plain.push_str(&format!(" ({})", line.target));
    }
    let plain = ansi.replace_all(&plain, "").into_owned();

    let shown: String = if plain.chars().count() > OP_WIDTH {
        let mut s: String = plain.chars().take(OP_WIDTH - 3).collect();
        s.push_str("...");
        s
    } else {
        plain
    };
    let width = shown.chars().count();

    let colored = match shown.split_once(' ') {
        Some((op, rest)) => format!("{} {}", color.paint(op), rest),
        None => color.paint(shown.as_str()).to_string(),
    };
    (colored, width)
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(pool: &DbPool, operation: Option<&str>) -> AppResult<()> {
        let lines = log_lines(&pool.conn, operation)?;

        if lines.is_empty() {
            match operation {
                Some(op) => println!("📜 No log lines for operation '{op}'."),
                None => println!("📜 Internal log is empty."),
            }
            return Ok(());
        }

        let ansi = Regex::new(r"\x1B\[[0-9;]*[mK]")
            .map_err(|e| AppError::Other(format!("invalid ANSI pattern: {e}")))?;

        let id_w = lines
            .iter()
            .map(|l| l.id.to_string().len())
            .max()
            .unwrap_or(1);

        println!("📜 Internal log:\n");

        for line in &lines {
            let (op, width) = op_column(&ansi, line);
            let padding = " ".repeat(OP_WIDTH.saturating_sub(width));
            println!(
                "{:>id_w$}: {} | {}{} => {}",
                line.id,
                short_date(&line.date),
                op,
                padding,
                line.message,
            );
        }

        Ok(())
    }
}

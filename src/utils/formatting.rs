//! Formatting utilities used for CLI and export outputs.

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

/// `7` for whole numbers, `7.25` otherwise, followed by `suffix`.
pub fn format_decimal(value: f64, suffix: &str) -> String {
    if value.fract() == 0.0 {
        format!("{}{}", value as i64, suffix)
    } else {
        format!("{:.2}{}", value, suffix)
    }
}

/// Fractional hours as `H h MM min` (e.g. 7.5 → `7 h 30 min`).
pub fn format_hours_minutes(hours: f64) -> String {
    let total_minutes = (hours * 60.0).round() as i64;
    let sign = if total_minutes < 0 { "-" } else { "" };
    let m = total_minutes.abs();
    format!("{}{} h {:02} min", sign, m / 60, m % 60)
}

pub fn format_money(value: f64, currency: &str) -> String {
    format!("{:.2} {}", value, currency)
}

/// Truncate free text to a single line of at most `width` columns.
pub fn one_line(text: &str, width: usize) -> String {
    let lines = textwrap::wrap(text, width.max(4));
    match lines.len() {
        0 => String::new(),
        1 => lines[0].to_string(),
        _ => {
            let first = textwrap::wrap(text, width.saturating_sub(3).max(1));
            format!("{}...", first[0])
        }
    }
}

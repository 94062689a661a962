//! Time utilities: parsing HH:MM, worked-hours computation, rounding.

use crate::errors::{AppResult, ParseError};
use chrono::NaiveTime;

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Parse an `HH:MM` clock time.
pub fn parse_time(t: &str) -> AppResult<NaiveTime> {
    NaiveTime::parse_from_str(t.trim(), "%H:%M")
        .map_err(|_| ParseError::InvalidTime(t.to_string()).into())
}

pub fn parse_optional_time(input: Option<&str>) -> AppResult<Option<NaiveTime>> {
    input.map(parse_time).transpose()
}

pub fn format_time(t: NaiveTime) -> String {
    t.format("%H:%M").to_string()
}

/// Minutes from `start` to `end`; a shift ending before it starts runs past midnight.
pub fn minutes_between(start: NaiveTime, end: NaiveTime) -> i64 {
    let minutes = (end - start).num_minutes();
    if minutes < 0 {
        minutes + MINUTES_PER_DAY
    } else {
        minutes
    }
}

/// Net worked hours of a shift, never negative.
pub fn worked_hours(start: NaiveTime, end: NaiveTime, pause_minutes: i64) -> f64 {
    let net = minutes_between(start, end) - pause_minutes;
    (net.max(0) as f64) / 60.0
}

/// Round a monetary or hour value to 2 decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round down to whole cents. Float noise just below a cent boundary
/// still counts as reaching it.
pub fn floor2(value: f64) -> f64 {
    ((value * 100.0) + 1e-6).floor() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor2_never_rounds_up() {
        assert_eq!(floor2(0.125), 0.12);
        assert_eq!(floor2(0.129), 0.12);
        assert_eq!(floor2(12.0), 12.0);
        assert_eq!(floor2(1.0 - 0.7), 0.3);
        assert_eq!(round2(0.125), 0.13);
    }

    #[test]
    fn overnight_shift_wraps_past_midnight() {
        let start = parse_time("22:00").unwrap();
        let end = parse_time("06:00").unwrap();
        assert_eq!(worked_hours(start, end, 30), 7.5);
    }
}

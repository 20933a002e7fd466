//! Clock time parser for event schedules.
//!
//! Supports both formats the event form produces:
//! - 24-hour: `16:30`, `16:30:00`, `7:05`
//! - 12-hour: `4:30 PM`, `12:05 am`

use chrono::NaiveTime;

/// Error type for time parsing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeParseError {
    pub input: String,
    pub message: String,
}

impl std::fmt::Display for TimeParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to parse time '{}': {}", self.input, self.message)
    }
}

impl std::error::Error for TimeParseError {}

/// Parses a 12-hour or 24-hour clock time.
///
/// # Examples
///
/// ```
/// use campusgrid::util::{format_24h, parse_clock};
///
/// let t = parse_clock("4:30 PM").unwrap();
/// assert_eq!(format_24h(t), "16:30");
/// ```
pub fn parse_clock(input: &str) -> Result<NaiveTime, TimeParseError> {
    let input = input.trim();

    if let Some(t) = try_parse_12h(input) {
        return Ok(t);
    }

    if let Some(t) = try_parse_24h(input) {
        return Ok(t);
    }

    Err(TimeParseError {
        input: input.to_string(),
        message: "Unrecognized format. Use: 24-hour (16:30, 16:30:00) or 12-hour (4:30 PM)"
            .to_string(),
    })
}

/// Formats as `HH:MM` (the backend format). Seconds are dropped.
pub fn format_24h(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Formats as `H:MM AM|PM`. Midnight is `12:00 AM`, noon is `12:00 PM`.
pub fn format_12h(time: NaiveTime) -> String {
    time.format("%-I:%M %p").to_string()
}

/// Try to parse as `H:MM AM|PM`.
fn try_parse_12h(input: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(input, "%I:%M %p").ok()
}

/// Try to parse as `HH:MM` or `HH:MM:SS`.
fn try_parse_24h(input: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(input, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(input, "%H:%M:%S"))
        .ok()
}

//! Calendar date helpers: lenient parsing, epoch conversion, age.

use chrono::{DateTime, Datelike, Local, NaiveDate};

/// Date formats accepted after the optional `T...` suffix is stripped.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y"];

/// Parses a backend date string.
///
/// Accepts RFC 3339 timestamps, `YYYY-MM-DD` (padded or not), `YYYY/MM/DD`,
/// `DD/MM/YYYY`, and `YYYY-MM-DDT...` where the time part is ignored.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.date_naive());
    }

    let date_part = input.split_once('T').map(|(d, _)| d).unwrap_or(input);
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date_part, fmt).ok())
}

/// Epoch milliseconds at UTC midnight of the parsed date.
pub fn parse_date_millis(input: &str) -> Option<i64> {
    let date = parse_date(input)?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc().timestamp_millis())
}

/// Age in whole years on `today`. `None` when born after `today`.
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> Option<u32> {
    if birth > today {
        return None;
    }
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    u32::try_from(age).ok()
}

/// `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Current local date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

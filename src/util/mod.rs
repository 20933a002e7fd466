//! Utility modules for campusgrid.

mod dates;
mod natural;
mod sanitize;
mod time_parser;

pub use dates::{age_on, format_date, parse_date, parse_date_millis, today};
pub use natural::natural_code_key;
pub use sanitize::{InputRule, limit_digits, sanitize};
pub use time_parser::{TimeParseError, format_12h, format_24h, parse_clock};

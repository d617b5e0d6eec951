//! Date and time format checks for filter parameters

use chrono::{NaiveDate, NaiveTime};

/// Date filter format
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Time filter format (seconds are always `00`)
pub const TIME_FORMAT: &str = "%H:%M:00";

/// True iff `s` is exactly `YYYY-MM-DD` and names a real calendar date
pub fn validate_date(s: &str) -> bool {
    has_shape(s, b"dddd-dd-dd") && NaiveDate::parse_from_str(s, DATE_FORMAT).is_ok()
}

/// True iff `s` is exactly `HH:MM:00` with hour 0-23 and minute 0-59
pub fn validate_time(s: &str) -> bool {
    has_shape(s, b"dd:dd:00") && NaiveTime::parse_from_str(s, TIME_FORMAT).is_ok()
}

/// Byte-level shape check: `d` matches an ASCII digit, anything else
/// matches itself. Rejects signs, padding, and wrong lengths before chrono
/// gets a chance to be lenient about them.
fn has_shape(s: &str, shape: &[u8]) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == shape.len()
        && bytes.iter().zip(shape).all(|(b, p)| match p {
            b'd' => b.is_ascii_digit(),
            _ => b == p,
        })
}

//! Days-ago window resolution

use chrono::{Days, Local, NaiveDate};

use super::types::FilterError;
use super::validate::DATE_FORMAT;

/// Inclusive calendar-date window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn start_str(&self) -> String {
        self.start.format(DATE_FORMAT).to_string()
    }

    pub fn end_str(&self) -> String {
        self.end.format(DATE_FORMAT).to_string()
    }
}

/// Local calendar date of the server process
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Resolve a days-ago window against [`today`]
pub fn resolve(days_ago: i64) -> Result<DateRange, FilterError> {
    resolve_from(today(), days_ago)
}

/// Resolve `days_ago` relative to `today`.
///
/// `start = today - n`, `end = today - (n - 1)`. For `n = 1` that is
/// yesterday through today, both inclusive.
pub fn resolve_from(today: NaiveDate, days_ago: i64) -> Result<DateRange, FilterError> {
    if days_ago <= 0 {
        return Err(FilterError::InvalidDaysAgo);
    }

    let days = days_ago as u64;
    let start = today
        .checked_sub_days(Days::new(days))
        .ok_or(FilterError::InvalidDaysAgo)?;
    let end = today
        .checked_sub_days(Days::new(days - 1))
        .ok_or(FilterError::InvalidDaysAgo)?;

    Ok(DateRange { start, end })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    #[test]
    fn one_day_ago_is_yesterday_through_today() {
        let range = resolve_from(date("2024-03-10"), 1).unwrap();
        assert_eq!(range.start_str(), "2024-03-09");
        assert_eq!(range.end_str(), "2024-03-10");
    }

    #[test]
    fn window_crosses_month_and_leap_day() {
        let range = resolve_from(date("2024-03-01"), 2).unwrap();
        assert_eq!(range.start_str(), "2024-02-28");
        assert_eq!(range.end_str(), "2024-02-29");
    }

    #[test]
    fn window_is_always_one_day_wide() {
        let today = date("2023-07-15");
        for n in [1_i64, 2, 7, 30, 365, 4000] {
            let range = resolve_from(today, n).unwrap();
            assert_eq!((range.end - range.start).num_days(), 1, "n = {n}");
            assert_eq!((today - range.start).num_days(), n, "n = {n}");
        }
    }

    #[test]
    fn non_positive_is_rejected() {
        let today = date("2023-07-15");
        assert_eq!(resolve_from(today, 0), Err(FilterError::InvalidDaysAgo));
        assert_eq!(resolve_from(today, -3), Err(FilterError::InvalidDaysAgo));
    }

    #[test]
    fn out_of_calendar_range_is_rejected() {
        let today = date("2023-07-15");
        assert_eq!(
            resolve_from(today, i64::MAX),
            Err(FilterError::InvalidDaysAgo)
        );
    }

    #[test]
    fn resolve_uses_local_today() {
        let today = today();
        let range = resolve(7).unwrap();
        // Tolerate a midnight rollover between the two clock reads
        let drift = (range.start - (today - Days::new(7))).num_days();
        assert!((0..=1).contains(&drift));
    }
}

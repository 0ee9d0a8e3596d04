//! Calendar date range selected for a fetch.

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Default start of the date range: 2015-01-01.
pub fn default_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2015, 1, 1).unwrap_or_default()
}

/// A `(start, end)` pair of calendar dates.
///
/// `start <= end` is not enforced here. An inverted range is passed through to
/// the gateway unchanged; see [`DateRange::is_inverted`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// The range shown before the user touches the date pickers.
    pub fn default_for(start: NaiveDate, today: NaiveDate) -> Self {
        Self { start, end: today }
    }

    /// True if the start date falls after the end date.
    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }

    /// Number of calendar days from start to end (negative when inverted).
    pub fn span_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

/// Which end of the range a date control edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeBound {
    Start,
    End,
}

/// Shift a date by whole days, saturating at the calendar limits.
pub fn shift_days(date: NaiveDate, days: i64) -> NaiveDate {
    let delta = chrono::Duration::days(days);
    date.checked_add_signed(delta).unwrap_or(date)
}

/// Shift a date by whole months, clamping the day to the target month's length.
pub fn shift_months(date: NaiveDate, months: i32) -> NaiveDate {
    let shifted = if months >= 0 {
        date.checked_add_months(Months::new(months.unsigned_abs()))
    } else {
        date.checked_sub_months(Months::new(months.unsigned_abs()))
    };
    shifted.unwrap_or(date)
}

/// Parse a `YYYY-MM-DD` date as typed into a date control.
pub fn parse_date(input: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn default_range_starts_2015() {
        let today = d(2026, 10, 18);
        let range = DateRange::default_for(default_start_date(), today);
        assert_eq!(range.start, d(2015, 1, 1));
        assert_eq!(range.end, today);
        assert!(!range.is_inverted());
    }

    #[test]
    fn inverted_range_detected() {
        let range = DateRange::new(d(2020, 1, 2), d(2020, 1, 1));
        assert!(range.is_inverted());
        assert_eq!(range.span_days(), -1);
        assert!(!DateRange::new(d(2020, 1, 1), d(2020, 1, 1)).is_inverted());
    }

    #[test]
    fn month_shift_clamps_day() {
        assert_eq!(shift_months(d(2024, 1, 31), 1), d(2024, 2, 29));
        assert_eq!(shift_months(d(2024, 3, 31), -1), d(2024, 2, 29));
        assert_eq!(shift_months(d(2024, 5, 15), 12), d(2025, 5, 15));
    }

    #[test]
    fn day_shift_crosses_months() {
        assert_eq!(shift_days(d(2015, 1, 31), 1), d(2015, 2, 1));
        assert_eq!(shift_days(d(2015, 1, 1), -1), d(2014, 12, 31));
    }

    #[test]
    fn parse_accepts_iso_dates_only() {
        assert_eq!(parse_date(" 2015-01-10 ").unwrap(), d(2015, 1, 10));
        assert!(parse_date("2015-02-30").is_err());
        assert!(parse_date("01/10/2015").is_err());
        assert!(parse_date("").is_err());
    }
}

//! The historical window: the same calendar day across the years preceding a
//! reference year.

use chrono::{Datelike, NaiveDate};
use std::fmt;
use std::ops::RangeInclusive;

const KEY_FORMAT: &str = "%Y%m%d";

/// Calendar day of the target date, repeated over `years` preceding years.
///
/// With a reference year of 2025 and 15 years, the window covers 2010–2024.
/// February 29th falls back to February 28th in years that are not leap years,
/// both for the range bounds and for day matching.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use weather_odds::HistoricalWindow;
///
/// let target = NaiveDate::from_ymd_opt(2026, 7, 4).unwrap();
/// let window = HistoricalWindow::for_date(target, 2025, 15).unwrap();
/// assert_eq!(window.start_key(), "20100704");
/// assert_eq!(window.end_key(), "20240704");
/// assert!(window.matches_key("20170704"));
/// assert!(!window.matches_key("20170705"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoricalWindow {
    month: u32,
    day: u32,
    start: NaiveDate,
    end: NaiveDate,
}

impl HistoricalWindow {
    /// Builds the window for `target`, covering `[reference_year - years, reference_year - 1]`.
    ///
    /// Returns `None` when `years` is zero or the years fall outside the supported calendar.
    pub fn for_date(target: NaiveDate, reference_year: i32, years: u32) -> Option<Self> {
        if years == 0 {
            return None;
        }
        let years = i32::try_from(years).ok()?;
        let start_year = reference_year.checked_sub(years)?;
        let end_year = reference_year.checked_sub(1)?;
        let (month, day) = (target.month(), target.day());
        Some(Self {
            month,
            day,
            start: day_in_year(start_year, month, day)?,
            end: day_in_year(end_year, month, day)?,
        })
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn years(&self) -> RangeInclusive<i32> {
        self.start.year()..=self.end.year()
    }

    /// First day of the range as `YYYYMMDD`.
    pub fn start_key(&self) -> String {
        self.start.format(KEY_FORMAT).to_string()
    }

    /// Last day of the range as `YYYYMMDD`.
    pub fn end_key(&self) -> String {
        self.end.format(KEY_FORMAT).to_string()
    }

    /// Whether a `YYYYMMDD` key is the window's calendar day in one of its years.
    pub fn matches_key(&self, key: &str) -> bool {
        let Some(date) = parse_key(key) else {
            return false;
        };
        if !self.years().contains(&date.year()) {
            return false;
        }
        day_in_year(date.year(), self.month, self.day) == Some(date)
    }
}

impl fmt::Display for HistoricalWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}-{:02} over {}..={}",
            self.month,
            self.day,
            self.start.year(),
            self.end.year()
        )
    }
}

/// Parses a `YYYYMMDD` series key.
pub(crate) fn parse_key(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(key, KEY_FORMAT).ok()
}

fn day_in_year(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day).or_else(|| {
        if month == 2 && day == 29 {
            NaiveDate::from_ymd_opt(year, 2, 28)
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_fifteen_year_window() {
        let window = HistoricalWindow::for_date(date(2025, 10, 19), 2025, 15).unwrap();
        assert_eq!(window.years(), 2010..=2024);
        assert_eq!(window.start(), date(2010, 10, 19));
        assert_eq!(window.end(), date(2024, 10, 19));
        assert_eq!(window.years().count(), 15);
    }

    #[test]
    fn test_zero_years_is_rejected() {
        assert!(HistoricalWindow::for_date(date(2025, 1, 1), 2025, 0).is_none());
    }

    #[test]
    fn test_leap_day_falls_back_in_common_years() {
        // 2011 and 2024 bound the window; only 2024 has a Feb 29.
        let window = HistoricalWindow::for_date(date(2028, 2, 29), 2025, 14).unwrap();
        assert_eq!(window.start_key(), "20110228");
        assert_eq!(window.end_key(), "20240229");
        assert!(window.matches_key("20160229"));
        assert!(window.matches_key("20170228"));
        assert!(!window.matches_key("20160228"));
    }

    #[test]
    fn test_matches_key_rejects_out_of_range_and_garbage() {
        let window = HistoricalWindow::for_date(date(2025, 3, 1), 2025, 5).unwrap();
        assert!(window.matches_key("20200301"));
        assert!(!window.matches_key("20250301"));
        assert!(!window.matches_key("20190301"));
        assert!(!window.matches_key("2020-03-01"));
        assert!(!window.matches_key(""));
    }
}

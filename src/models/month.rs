//! Calendar-month key used for payroll records.
//!
//! Payroll is generated once per member per calendar month. [`PayrollMonth`]
//! is the natural key for that month: it parses from and displays as the
//! `YYYY-MM` form used throughout the API, and knows its own length in days
//! (including leap-year February).

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveDate};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{EngineError, EngineResult};

/// A calendar-month key: a year plus a month number from 1 to 12.
///
/// Serialized as a `"YYYY-MM"` string in JSON and YAML. Construction is
/// validated, so every `PayrollMonth` value names a real calendar month.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayrollMonth;
///
/// let month: PayrollMonth = "2024-02".parse().unwrap();
/// assert_eq!(month.year(), 2024);
/// assert_eq!(month.month(), 2);
/// assert_eq!(month.days_in_month(), 29); // leap year
/// assert_eq!(month.to_string(), "2024-02");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PayrollMonth {
    year: i32,
    month: u32,
}

impl PayrollMonth {
    /// Creates a month key, validating that `month` is in 1..=12 and that the
    /// year is within chrono's supported calendar range.
    pub fn new(year: i32, month: u32) -> EngineResult<Self> {
        if !(1..=12).contains(&month) || NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(EngineError::InvalidMonth {
                input: format!("{year:04}-{month:02}"),
            });
        }
        Ok(Self { year, month })
    }

    /// Returns the year component.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Returns the month number (1 = January, 12 = December).
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Returns the first calendar day of the month.
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .expect("validated month key names a real calendar month")
    }

    /// Returns the number of days in the month, accounting for leap years.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::PayrollMonth;
    ///
    /// assert_eq!(PayrollMonth::new(2024, 2).unwrap().days_in_month(), 29);
    /// assert_eq!(PayrollMonth::new(2025, 2).unwrap().days_in_month(), 28);
    /// assert_eq!(PayrollMonth::new(2024, 4).unwrap().days_in_month(), 30);
    /// assert_eq!(PayrollMonth::new(2024, 12).unwrap().days_in_month(), 31);
    /// ```
    pub fn days_in_month(&self) -> u32 {
        let first = self.first_day();
        let next_month_first = if self.month == 12 {
            NaiveDate::from_ymd_opt(self.year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(self.year, self.month + 1, 1)
        }
        .expect("first day of the following month is a real calendar day");
        next_month_first.signed_duration_since(first).num_days() as u32
    }

    /// Iterates every calendar date in the month, in order.
    pub fn dates(self) -> impl Iterator<Item = NaiveDate> {
        let first = self.first_day();
        (0..self.days_in_month()).map(move |offset| first + Duration::days(i64::from(offset)))
    }
}

impl fmt::Display for PayrollMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for PayrollMonth {
    type Err = EngineError;

    fn from_str(s: &str) -> EngineResult<Self> {
        let invalid = || EngineError::InvalidMonth {
            input: s.to_string(),
        };
        let (year_part, month_part) = s.split_once('-').ok_or_else(invalid)?;
        let year: i32 = year_part.parse().map_err(|_| invalid())?;
        let month: u32 = month_part.parse().map_err(|_| invalid())?;
        Self::new(year, month).map_err(|_| invalid())
    }
}

impl Serialize for PayrollMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PayrollMonth {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|err: EngineError| D::Error::custom(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_parse_valid_month() {
        let month: PayrollMonth = "2024-03".parse().unwrap();
        assert_eq!(month.year(), 2024);
        assert_eq!(month.month(), 3);
    }

    #[test]
    fn test_parse_rejects_month_out_of_range() {
        assert!("2024-00".parse::<PayrollMonth>().is_err());
        assert!("2024-13".parse::<PayrollMonth>().is_err());
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        assert!("2024".parse::<PayrollMonth>().is_err());
        assert!("march-2024".parse::<PayrollMonth>().is_err());
        assert!("2024-3x".parse::<PayrollMonth>().is_err());
        assert!("".parse::<PayrollMonth>().is_err());
    }

    #[test]
    fn test_display_zero_pads() {
        let month = PayrollMonth::new(2024, 3).unwrap();
        assert_eq!(month.to_string(), "2024-03");
    }

    #[test]
    fn test_days_in_month_leap_february() {
        assert_eq!(PayrollMonth::new(2024, 2).unwrap().days_in_month(), 29);
        assert_eq!(PayrollMonth::new(2023, 2).unwrap().days_in_month(), 28);
        assert_eq!(PayrollMonth::new(2000, 2).unwrap().days_in_month(), 29);
        assert_eq!(PayrollMonth::new(1900, 2).unwrap().days_in_month(), 28);
    }

    #[test]
    fn test_days_in_month_december_wraps_year() {
        assert_eq!(PayrollMonth::new(2024, 12).unwrap().days_in_month(), 31);
    }

    #[test]
    fn test_dates_covers_whole_month_in_order() {
        let month = PayrollMonth::new(2024, 2).unwrap();
        let dates: Vec<NaiveDate> = month.dates().collect();
        assert_eq!(dates.len(), 29);
        assert_eq!(dates[0], NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(dates[28], NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert!(dates.iter().all(|d| d.month() == 2));
    }

    #[test]
    fn test_serde_round_trip_as_string() {
        let month = PayrollMonth::new(2024, 7).unwrap();
        let json = serde_json::to_string(&month).unwrap();
        assert_eq!(json, "\"2024-07\"");
        let back: PayrollMonth = serde_json::from_str(&json).unwrap();
        assert_eq!(back, month);
    }

    #[test]
    fn test_deserialize_rejects_invalid_month() {
        assert!(serde_json::from_str::<PayrollMonth>("\"2024-13\"").is_err());
    }
}

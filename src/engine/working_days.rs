//! Working-day calendar logic.
//!
//! This module classifies the days of a payroll month as working or weekend
//! days. The weekend pair is Friday/Saturday, the regional convention the
//! system was built for, kept as a hard-coded constant with no configuration
//! surface.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::models::PayrollMonth;

/// The two fixed weekend days.
///
/// Friday/Saturday in a 0=Sunday..6=Saturday indexing, i.e. days 5 and 6.
/// Not user-configurable.
pub const WEEKEND_DAYS: [Weekday; 2] = [Weekday::Fri, Weekday::Sat];

/// Returns true if the date's weekday is not one of the two weekend days.
///
/// # Example
///
/// ```
/// use payroll_engine::engine::is_working_day;
/// use chrono::NaiveDate;
///
/// // 2024-03-10 is a Sunday: a working day under the Fri/Sat weekend.
/// assert!(is_working_day(NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()));
/// // 2024-03-08 is a Friday.
/// assert!(!is_working_day(NaiveDate::from_ymd_opt(2024, 3, 8).unwrap()));
/// ```
pub fn is_working_day(date: NaiveDate) -> bool {
    !WEEKEND_DAYS.contains(&date.weekday())
}

/// Iterates the working days of a month, in calendar order.
///
/// Uses the month's actual length (leap-year February included) and excludes
/// every day whose weekday is in [`WEEKEND_DAYS`].
///
/// # Example
///
/// ```
/// use payroll_engine::engine::working_days;
/// use payroll_engine::models::PayrollMonth;
///
/// // February 2024: 29 days, of which 4 Fridays and 4 Saturdays.
/// let month = PayrollMonth::new(2024, 2).unwrap();
/// assert_eq!(working_days(month).count(), 21);
/// ```
pub fn working_days(month: PayrollMonth) -> impl Iterator<Item = NaiveDate> {
    month.dates().filter(|date| is_working_day(*date))
}

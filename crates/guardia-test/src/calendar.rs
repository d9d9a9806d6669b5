//! Periods and month calendars.

use chrono::NaiveDate;
use guardia_core::{CalendarModel, Period};

/// Builds a date, panicking on invalid input.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

/// January 2026: 31 days, 22 of them Monday to Friday.
pub fn january_2026() -> Period {
    Period::new(1, 2026).expect("valid test period")
}

/// Monday to Friday working, two afternoon shifts each, no consultations.
pub fn weekday_calendar(period: Period) -> CalendarModel {
    CalendarModel::weekdays(period, 2, 0)
}

//! The (month, year) key of a schedule.

use std::fmt;

use chrono::{Datelike, NaiveDate};

use crate::error::{GuardiaError, Result};

/// A calendar month, the unit every schedule is generated for.
///
/// Ordering follows the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Period {
    first_day: NaiveDate,
    days: u32,
}

impl Period {
    /// Earliest supported year.
    pub const MIN_YEAR: i32 = 1970;

    /// Creates a period; `month` must be in `1..=12` and `year >= 1970`.
    pub fn new(month: u32, year: i32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(GuardiaError::InvalidData(format!(
                "month {} is outside 1..=12",
                month
            )));
        }
        if year < Self::MIN_YEAR {
            return Err(GuardiaError::InvalidData(format!(
                "year {} is before {}",
                year,
                Self::MIN_YEAR
            )));
        }
        let first_day = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| GuardiaError::InvalidData(format!("no such month {}/{}", month, year)))?;
        let (next_year, next_month) = if month == 12 {
            (year + 1, 1)
        } else {
            (year, month + 1)
        };
        let next_first = NaiveDate::from_ymd_opt(next_year, next_month, 1).ok_or_else(|| {
            GuardiaError::InvalidData(format!("no month after {}/{}", month, year))
        })?;
        let days = (next_first - first_day).num_days() as u32;
        Ok(Self { first_day, days })
    }

    pub fn month(&self) -> u32 {
        self.first_day.month()
    }

    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    /// Number of days in the month.
    pub fn days_in_month(&self) -> u32 {
        self.days
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    pub fn last_day(&self) -> NaiveDate {
        self.first_day + chrono::Days::new(u64::from(self.days - 1))
    }

    /// Returns the date of a 1-based day of the month.
    pub fn date(&self, day: u32) -> Option<NaiveDate> {
        if day == 0 || day > self.days {
            return None;
        }
        Some(self.first_day + chrono::Days::new(u64::from(day - 1)))
    }

    /// Iterates over every date of the month in order.
    pub fn dates(&self) -> impl DoubleEndedIterator<Item = NaiveDate> + '_ {
        (0..u64::from(self.days)).map(move |i| self.first_day + chrono::Days::new(i))
    }

    /// Returns true if `date` falls inside the month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{}", self.month(), self.year())
    }
}

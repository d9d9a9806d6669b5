//! Month calendars: per-day working flags, baseline counts and overrides.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, Weekday};

use super::{DoctorId, Period};
use crate::error::{GuardiaError, Result};

/// Reassigns one day's cycle duty from `giver` to `receiver`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CycleChange {
    giver: DoctorId,
    receiver: DoctorId,
}

impl CycleChange {
    pub fn new(giver: DoctorId, receiver: DoctorId) -> Result<Self> {
        if giver == receiver {
            return Err(GuardiaError::InvalidData(format!(
                "doctor {} cannot give a cycle shift to themselves",
                giver
            )));
        }
        Ok(Self { giver, receiver })
    }

    pub fn giver(&self) -> DoctorId {
        self.giver
    }

    pub fn receiver(&self) -> DoctorId {
        self.receiver
    }
}

/// One day of a [`CalendarModel`].
///
/// `num_shifts` is the baseline number of afternoon shifts the day offers
/// before any demand-driven expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DayConfiguration {
    date: NaiveDate,
    pub is_working_day: bool,
    pub num_shifts: u32,
    pub num_consultations: u32,
    pub unwanted: BTreeSet<DoctorId>,
    pub unavailable: BTreeSet<DoctorId>,
    pub wanted: BTreeSet<DoctorId>,
    pub mandatory: BTreeSet<DoctorId>,
    pub cycle_changes: Vec<CycleChange>,
}

impl DayConfiguration {
    pub fn new(date: NaiveDate, is_working_day: bool, num_shifts: u32, num_consultations: u32) -> Self {
        Self {
            date,
            is_working_day,
            num_shifts,
            num_consultations,
            unwanted: BTreeSet::new(),
            unavailable: BTreeSet::new(),
            wanted: BTreeSet::new(),
            mandatory: BTreeSet::new(),
            cycle_changes: Vec::new(),
        }
    }

    /// A holiday or weekend day.
    pub fn non_working(date: NaiveDate) -> Self {
        Self::new(date, false, 0, 0)
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// 1-based day of the month.
    pub fn day(&self) -> u32 {
        self.date.day()
    }

    pub fn weekday(&self) -> Weekday {
        self.date.weekday()
    }

    pub fn with_unwanted(mut self, doctor: DoctorId) -> Self {
        self.unwanted.insert(doctor);
        self
    }

    pub fn with_unavailable(mut self, doctor: DoctorId) -> Self {
        self.unavailable.insert(doctor);
        self
    }

    pub fn with_wanted(mut self, doctor: DoctorId) -> Self {
        self.wanted.insert(doctor);
        self
    }

    pub fn with_mandatory(mut self, doctor: DoctorId) -> Self {
        self.mandatory.insert(doctor);
        self
    }

    pub fn with_cycle_change(mut self, change: CycleChange) -> Self {
        self.cycle_changes.push(change);
        self
    }

    /// Returns true if `doctor` handed this day's cycle shift to someone else.
    pub fn gives_cycle(&self, doctor: DoctorId) -> bool {
        self.cycle_changes.iter().any(|c| c.giver == doctor)
    }

    /// Returns true if `doctor` takes over someone's cycle shift this day.
    pub fn receives_cycle(&self, doctor: DoctorId) -> bool {
        self.cycle_changes.iter().any(|c| c.receiver == doctor)
    }
}

/// Immutable snapshot of one month: every day exactly once, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarModel {
    period: Period,
    days: Vec<DayConfiguration>,
}

impl CalendarModel {
    /// Builds a calendar, checking that every day of `period` is present
    /// exactly once and that cycle changes are well-formed.
    pub fn new(period: Period, mut days: Vec<DayConfiguration>) -> Result<Self> {
        days.sort_by_key(|d| d.date);

        for day in &days {
            if !period.contains(day.date) {
                return Err(GuardiaError::InvalidData(format!(
                    "day {} is outside {}",
                    day.date, period
                )));
            }
            if day.cycle_changes.iter().any(|c| c.giver == c.receiver) {
                return Err(GuardiaError::InvalidData(format!(
                    "day {} has a cycle change to the same doctor",
                    day.date
                )));
            }
        }
        if let Some(pair) = days.windows(2).find(|w| w[0].date == w[1].date) {
            return Err(GuardiaError::InvalidData(format!(
                "day {} is configured more than once",
                pair[0].date
            )));
        }
        if days.len() != period.days_in_month() as usize {
            return Err(GuardiaError::InvalidData(format!(
                "{} has {} days but {} are configured",
                period,
                period.days_in_month(),
                days.len()
            )));
        }

        Ok(Self { period, days })
    }

    /// Default month layout: Monday to Friday are working days with the
    /// given baseline counts, weekends are not.
    pub fn weekdays(period: Period, num_shifts: u32, num_consultations: u32) -> Self {
        let days = period
            .dates()
            .map(|date| match date.weekday() {
                Weekday::Sat | Weekday::Sun => DayConfiguration::non_working(date),
                _ => DayConfiguration::new(date, true, num_shifts, num_consultations),
            })
            .collect();
        Self { period, days }
    }

    /// Marks the given 1-based days as holidays.
    pub fn with_holidays(mut self, holidays: &[u32]) -> Result<Self> {
        for &day in holidays {
            let config = self.day_mut(day)?;
            config.is_working_day = false;
            config.num_shifts = 0;
            config.num_consultations = 0;
        }
        Ok(self)
    }

    /// Applies `f` to the configuration of a 1-based day.
    pub fn with_day(mut self, day: u32, f: impl FnOnce(DayConfiguration) -> DayConfiguration) -> Result<Self> {
        let index = self.index_of(day)?;
        let date = self.days[index].date;
        let updated = f(self.days[index].clone());
        if updated.date != date {
            return Err(GuardiaError::InvalidData(format!(
                "day {} cannot be moved to {}",
                date, updated.date
            )));
        }
        self.days[index] = updated;
        Ok(self)
    }

    fn index_of(&self, day: u32) -> Result<usize> {
        if day == 0 || day as usize > self.days.len() {
            return Err(GuardiaError::InvalidData(format!(
                "day {} is outside {}",
                day, self.period
            )));
        }
        Ok(day as usize - 1)
    }

    fn day_mut(&mut self, day: u32) -> Result<&mut DayConfiguration> {
        let index = self.index_of(day)?;
        Ok(&mut self.days[index])
    }

    pub fn period(&self) -> Period {
        self.period
    }

    pub fn days(&self) -> &[DayConfiguration] {
        &self.days
    }

    /// Returns the configuration of a 1-based day.
    pub fn day(&self, day: u32) -> Option<&DayConfiguration> {
        self.index_of(day).ok().map(|i| &self.days[i])
    }

    /// Working days with their 0-based index, in calendar order.
    pub fn working_days(&self) -> impl Iterator<Item = (usize, &DayConfiguration)> {
        self.days.iter().enumerate().filter(|(_, d)| d.is_working_day)
    }

    pub fn working_day_count(&self) -> usize {
        self.working_days().count()
    }
}

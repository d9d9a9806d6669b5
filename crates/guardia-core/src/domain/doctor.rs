//! Doctors, their contract quota and their absences.

use chrono::{Datelike, NaiveDate, Weekday};

use super::Period;
use crate::error::{GuardiaError, Result};

/// External identity of a doctor.
pub type DoctorId = u64;

/// Roster status as maintained by HR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum DoctorStatus {
    #[default]
    Available,
    Deleted,
}

/// An inclusive date interval during which a doctor cannot work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Absence {
    start: NaiveDate,
    end: NaiveDate,
}

impl Absence {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(GuardiaError::InvalidData(format!(
                "absence starts on {} after it ends on {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn is_absent_on(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Returns true if every day of `period` lies within the absence.
    pub fn covers(&self, period: &Period) -> bool {
        self.start <= period.first_day() && period.last_day() <= self.end
    }
}

/// A small set of weekdays.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "Vec<Weekday>", into = "Vec<Weekday>"))]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    pub const EMPTY: WeekdaySet = WeekdaySet(0);

    #[inline]
    fn bit(day: Weekday) -> u8 {
        1 << day.num_days_from_monday()
    }

    pub fn insert(&mut self, day: Weekday) {
        self.0 |= Self::bit(day);
    }

    pub fn with(mut self, day: Weekday) -> Self {
        self.insert(day);
        self
    }

    #[inline]
    pub fn contains(&self, day: Weekday) -> bool {
        self.0 & Self::bit(day) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn intersects(&self, other: &WeekdaySet) -> bool {
        self.0 & other.0 != 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Weekday> + '_ {
        [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ]
        .into_iter()
        .filter(move |d| self.contains(*d))
    }
}

impl FromIterator<Weekday> for WeekdaySet {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        let mut set = WeekdaySet::EMPTY;
        for day in iter {
            set.insert(day);
        }
        set
    }
}

impl From<Vec<Weekday>> for WeekdaySet {
    fn from(days: Vec<Weekday>) -> Self {
        days.into_iter().collect()
    }
}

impl From<WeekdaySet> for Vec<Weekday> {
    fn from(set: WeekdaySet) -> Self {
        set.iter().collect()
    }
}

impl std::fmt::Debug for WeekdaySet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// A doctor's monthly contract: how many afternoon shifts and consultations
/// they owe, whether they take cycle shifts, and their weekday preferences.
///
/// Weekday preferences for shifts apply to afternoon shifts, except
/// `unavailable_shifts` which blocks every shift type on those weekdays.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ShiftQuota {
    pub min_shifts: u32,
    pub max_shifts: u32,
    pub num_consultations: u32,
    pub does_cycle_shifts: bool,
    pub has_shifts_only_when_cycle_shifts: bool,
    pub unwanted_shifts: WeekdaySet,
    pub unavailable_shifts: WeekdaySet,
    pub wanted_shifts: WeekdaySet,
    pub mandatory_shifts: WeekdaySet,
    pub wanted_consultations: WeekdaySet,
}

impl Default for ShiftQuota {
    fn default() -> Self {
        Self {
            min_shifts: 0,
            max_shifts: 0,
            num_consultations: 0,
            does_cycle_shifts: true,
            has_shifts_only_when_cycle_shifts: false,
            unwanted_shifts: WeekdaySet::EMPTY,
            unavailable_shifts: WeekdaySet::EMPTY,
            wanted_shifts: WeekdaySet::EMPTY,
            mandatory_shifts: WeekdaySet::EMPTY,
            wanted_consultations: WeekdaySet::EMPTY,
        }
    }
}

impl ShiftQuota {
    pub fn new(min_shifts: u32, max_shifts: u32, num_consultations: u32) -> Self {
        Self {
            min_shifts,
            max_shifts,
            num_consultations,
            ..Self::default()
        }
    }

    pub fn with_cycle_shifts(mut self, does_cycle_shifts: bool) -> Self {
        self.does_cycle_shifts = does_cycle_shifts;
        self
    }

    pub fn with_shifts_only_when_cycle_shifts(mut self, only: bool) -> Self {
        self.has_shifts_only_when_cycle_shifts = only;
        self
    }

    pub fn with_unwanted_shift(mut self, day: Weekday) -> Self {
        self.unwanted_shifts.insert(day);
        self
    }

    pub fn with_unavailable_shift(mut self, day: Weekday) -> Self {
        self.unavailable_shifts.insert(day);
        self
    }

    pub fn with_wanted_shift(mut self, day: Weekday) -> Self {
        self.wanted_shifts.insert(day);
        self
    }

    pub fn with_mandatory_shift(mut self, day: Weekday) -> Self {
        self.mandatory_shifts.insert(day);
        self
    }

    pub fn with_wanted_consultation(mut self, day: Weekday) -> Self {
        self.wanted_consultations.insert(day);
        self
    }

    /// Doctors with the same class are compared by the fairness rule.
    pub fn class(&self) -> (u32, u32) {
        (self.min_shifts, self.max_shifts)
    }

    /// Checks bounds and that no weekday is both wanted and refused.
    pub fn validate(&self) -> Result<()> {
        if self.min_shifts > self.max_shifts {
            return Err(GuardiaError::InvalidData(format!(
                "min_shifts {} exceeds max_shifts {}",
                self.min_shifts, self.max_shifts
            )));
        }
        let refused = [self.unwanted_shifts, self.unavailable_shifts];
        let asked = [self.wanted_shifts, self.mandatory_shifts];
        for r in &refused {
            for a in &asked {
                if r.intersects(a) {
                    return Err(GuardiaError::InvalidData(format!(
                        "weekdays {:?} are both requested and refused",
                        WeekdaySet(r.0 & a.0)
                    )));
                }
            }
        }
        Ok(())
    }
}

/// A member of the roster.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Doctor {
    pub id: DoctorId,
    pub first_name: String,
    pub last_names: String,
    pub email: String,
    pub status: DoctorStatus,
    pub start_date: NaiveDate,
    pub absence: Option<Absence>,
    pub quota: Option<ShiftQuota>,
}

impl Doctor {
    pub fn new(
        id: DoctorId,
        first_name: impl Into<String>,
        last_names: impl Into<String>,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_names: last_names.into(),
            email: String::new(),
            status: DoctorStatus::Available,
            start_date,
            absence: None,
            quota: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn with_status(mut self, status: DoctorStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_absence(mut self, absence: Absence) -> Self {
        self.absence = Some(absence);
        self
    }

    pub fn with_quota(mut self, quota: ShiftQuota) -> Self {
        self.quota = Some(quota);
        self
    }

    pub fn is_available(&self) -> bool {
        self.status == DoctorStatus::Available
    }

    /// Returns true if the doctor is employed and not absent on `date`.
    pub fn is_present_on(&self, date: NaiveDate) -> bool {
        date >= self.start_date && !self.absence.is_some_and(|a| a.is_absent_on(date))
    }

    /// Returns true if the doctor is present on at least one day of `period`.
    pub fn is_present_in(&self, period: &Period) -> bool {
        if self.absence.is_some_and(|a| a.covers(period)) {
            return false;
        }
        period.dates().any(|d| self.is_present_on(d))
    }

    /// Returns true if the quota binds this doctor for `period`.
    pub fn quota_applies(&self, period: &Period) -> bool {
        self.is_available() && self.quota.is_some() && self.is_present_in(period)
    }

    /// Returns true if the weekday of `date` is blocked by the quota.
    pub fn unavailable_weekday(&self, date: NaiveDate) -> bool {
        self.quota
            .as_ref()
            .is_some_and(|q| q.unavailable_shifts.contains(date.weekday()))
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(absence) = &self.absence {
            Absence::new(absence.start(), absence.end())?;
        }
        if let Some(quota) = &self.quota {
            quota.validate().map_err(|e| match e {
                GuardiaError::InvalidData(msg) => {
                    GuardiaError::InvalidData(format!("doctor {}: {}", self.id, msg))
                }
                other => other,
            })?;
        }
        Ok(())
    }
}

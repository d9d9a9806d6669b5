//! Collaborator contracts for calendars, doctors and schedules.
//!
//! The engine only reads calendars and doctors and upserts schedules; how
//! they are stored is up to the implementor. [`InMemoryRepository`]
//! implements all three for tests and embedding.

use std::collections::BTreeMap;

use guardia_core::{CalendarModel, Doctor, DoctorId, GuardiaError, Period, Result, Schedule};
use parking_lot::RwLock;

/// Source of month calendars.
pub trait CalendarSource: Send + Sync {
    /// Returns the calendar of `period`.
    ///
    /// # Errors
    ///
    /// `NotFound` if no calendar was set up for the month.
    fn load_calendar(&self, period: Period) -> Result<CalendarModel>;
}

/// Source of the doctor roster.
pub trait DoctorSource: Send + Sync {
    /// Doctors that are neither deleted nor otherwise unavailable.
    fn load_active_doctors(&self) -> Result<Vec<Doctor>>;
}

/// Storage for schedules, keyed by period.
pub trait ScheduleStore: Send + Sync {
    /// Inserts or replaces the schedule of its period.
    fn persist_schedule(&self, schedule: &Schedule) -> Result<()>;

    fn load_schedule(&self, period: Period) -> Result<Option<Schedule>>;
}

/// Thread-safe in-memory implementation of every collaborator.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    calendars: RwLock<BTreeMap<Period, CalendarModel>>,
    doctors: RwLock<BTreeMap<DoctorId, Doctor>>,
    schedules: RwLock<BTreeMap<Period, Schedule>>,
    persist_count: RwLock<u64>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_calendar(&self, calendar: CalendarModel) {
        self.calendars.write().insert(calendar.period(), calendar);
    }

    pub fn upsert_doctor(&self, doctor: Doctor) {
        self.doctors.write().insert(doctor.id, doctor);
    }

    /// The stored schedule of `period`, whatever its status.
    pub fn schedule(&self, period: Period) -> Option<Schedule> {
        self.schedules.read().get(&period).cloned()
    }

    /// Number of successful `persist_schedule` calls.
    pub fn persist_count(&self) -> u64 {
        *self.persist_count.read()
    }
}

impl CalendarSource for InMemoryRepository {
    fn load_calendar(&self, period: Period) -> Result<CalendarModel> {
        self.calendars
            .read()
            .get(&period)
            .cloned()
            .ok_or_else(|| GuardiaError::NotFound(format!("calendar {}", period)))
    }
}

impl DoctorSource for InMemoryRepository {
    fn load_active_doctors(&self) -> Result<Vec<Doctor>> {
        Ok(self
            .doctors
            .read()
            .values()
            .filter(|d| d.is_available())
            .cloned()
            .collect())
    }
}

impl ScheduleStore for InMemoryRepository {
    fn persist_schedule(&self, schedule: &Schedule) -> Result<()> {
        self.schedules
            .write()
            .insert(schedule.period(), schedule.clone());
        *self.persist_count.write() += 1;
        Ok(())
    }

    fn load_schedule(&self, period: Period) -> Result<Option<Schedule>> {
        Ok(self.schedule(period))
    }
}

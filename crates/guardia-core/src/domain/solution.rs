//! The arena holding one solve's problem and decision state.

use super::{CalendarModel, DayConfiguration, Doctor, Period, Shift, ShiftAssignment, ShiftId, ShiftType};
use crate::error::{GuardiaError, Result};
use crate::score::HardSoftScore;

/// 0-based index of a day within the calendar.
pub type DayIndex = usize;

/// Index of a doctor within the solution's roster.
pub type DoctorIdx = usize;

/// Problem facts plus the assignment state the solver mutates.
///
/// `shifts[i].id == i` and `assignments[i].shift == i`: each shift has
/// exactly one assignment, found at the same index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleSolution {
    calendar: CalendarModel,
    doctors: Vec<Doctor>,
    shifts: Vec<Shift>,
    assignments: Vec<ShiftAssignment>,
    pub score: Option<HardSoftScore>,
}

impl ScheduleSolution {
    pub fn new(
        calendar: CalendarModel,
        doctors: Vec<Doctor>,
        shifts: Vec<Shift>,
        assignments: Vec<ShiftAssignment>,
    ) -> Result<Self> {
        if shifts.len() != assignments.len() {
            return Err(GuardiaError::Internal(format!(
                "{} shifts but {} assignments",
                shifts.len(),
                assignments.len()
            )));
        }
        let day_count = calendar.days().len();
        for (i, (shift, assignment)) in shifts.iter().zip(&assignments).enumerate() {
            if shift.id != i || assignment.shift != i {
                return Err(GuardiaError::Internal(format!(
                    "shift at position {} is not indexed by its id",
                    i
                )));
            }
            if shift.day >= day_count {
                return Err(GuardiaError::Internal(format!(
                    "shift {} references missing day {}",
                    i, shift.day
                )));
            }
            if assignment.doctor.is_some_and(|d| d >= doctors.len())
                || assignment.previous_doctor.is_some_and(|d| d >= doctors.len())
            {
                return Err(GuardiaError::Internal(format!(
                    "assignment of shift {} references a missing doctor",
                    i
                )));
            }
            if assignment.pinned && assignment.doctor.is_none() {
                return Err(GuardiaError::Internal(format!(
                    "shift {} is pinned without a doctor",
                    i
                )));
            }
        }
        Ok(Self {
            calendar,
            doctors,
            shifts,
            assignments,
            score: None,
        })
    }

    pub fn calendar(&self) -> &CalendarModel {
        &self.calendar
    }

    pub fn period(&self) -> Period {
        self.calendar.period()
    }

    pub fn days(&self) -> &[DayConfiguration] {
        self.calendar.days()
    }

    pub fn day(&self, index: DayIndex) -> &DayConfiguration {
        &self.calendar.days()[index]
    }

    pub fn doctors(&self) -> &[Doctor] {
        &self.doctors
    }

    pub fn doctor(&self, index: DoctorIdx) -> &Doctor {
        &self.doctors[index]
    }

    pub fn shifts(&self) -> &[Shift] {
        &self.shifts
    }

    pub fn shift(&self, id: ShiftId) -> &Shift {
        &self.shifts[id]
    }

    pub fn shifts_of_type(&self, shift_type: ShiftType) -> impl Iterator<Item = &Shift> {
        self.shifts.iter().filter(move |s| s.shift_type == shift_type)
    }

    pub fn assignments(&self) -> &[ShiftAssignment] {
        &self.assignments
    }

    pub fn assignment(&self, id: ShiftId) -> &ShiftAssignment {
        &self.assignments[id]
    }

    pub fn doctor_of(&self, id: ShiftId) -> Option<DoctorIdx> {
        self.assignments[id].doctor
    }

    /// Sets the doctor of a shift, returning the previous one.
    ///
    /// Callers must not target pinned assignments.
    pub fn assign(&mut self, id: ShiftId, doctor: Option<DoctorIdx>) -> Option<DoctorIdx> {
        debug_assert!(!self.assignments[id].pinned, "shift {} is pinned", id);
        std::mem::replace(&mut self.assignments[id].doctor, doctor)
    }

    /// Number of shifts of any type held by `doctor`.
    pub fn assigned_count(&self, doctor: DoctorIdx) -> usize {
        self.assignments.iter().filter(|a| a.doctor == Some(doctor)).count()
    }

    pub fn open_count(&self) -> usize {
        self.assignments.iter().filter(|a| a.is_open()).count()
    }

    /// Ids of the shifts the solver may change.
    pub fn movable_shifts(&self) -> Vec<ShiftId> {
        self.assignments
            .iter()
            .filter(|a| a.is_movable())
            .map(|a| a.shift)
            .collect()
    }
}

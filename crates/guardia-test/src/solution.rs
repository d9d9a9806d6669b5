//! Hand-built solutions for rule and move tests.

use guardia_core::{
    CalendarModel, DayIndex, Doctor, DoctorIdx, ScheduleSolution, Shift, ShiftAssignment, ShiftType,
};

struct PlannedShift {
    day: DayIndex,
    shift_type: ShiftType,
    doctor: Option<DoctorIdx>,
    pinned: bool,
    previous: Option<DoctorIdx>,
}

/// Builds a [`ScheduleSolution`] shift by shift.
///
/// Days are given 1-based, the way a calendar reads; ordinals are
/// numbered automatically.
///
/// ```
/// use guardia_core::ShiftType;
/// use guardia_test::{january_2026, quota_doctors, weekday_calendar, SolutionBuilder};
///
/// let solution = SolutionBuilder::new(weekday_calendar(january_2026()))
///     .doctors(quota_doctors(2, 0, 5, 0))
///     .shift(1, ShiftType::Cycle, Some(0))
///     .shift(1, ShiftType::Afternoon, None)
///     .build();
/// assert_eq!(solution.shifts().len(), 2);
/// assert_eq!(solution.open_count(), 1);
/// ```
pub struct SolutionBuilder {
    calendar: CalendarModel,
    doctors: Vec<Doctor>,
    shifts: Vec<PlannedShift>,
}

impl SolutionBuilder {
    pub fn new(calendar: CalendarModel) -> Self {
        Self {
            calendar,
            doctors: Vec::new(),
            shifts: Vec::new(),
        }
    }

    pub fn doctors(mut self, doctors: Vec<Doctor>) -> Self {
        self.doctors.extend(doctors);
        self
    }

    pub fn doctor(mut self, doctor: Doctor) -> Self {
        self.doctors.push(doctor);
        self
    }

    /// Adds a shift on a 1-based day, optionally assigned.
    pub fn shift(mut self, day: u32, shift_type: ShiftType, doctor: Option<DoctorIdx>) -> Self {
        self.shifts.push(PlannedShift {
            day: day as usize - 1,
            shift_type,
            doctor,
            pinned: false,
            previous: None,
        });
        self
    }

    /// Adds a pinned shift.
    pub fn pinned(mut self, day: u32, shift_type: ShiftType, doctor: DoctorIdx) -> Self {
        self.shifts.push(PlannedShift {
            day: day as usize - 1,
            shift_type,
            doctor: Some(doctor),
            pinned: true,
            previous: Some(doctor),
        });
        self
    }

    /// Adds a shift remembered from a prior generation.
    pub fn previously(mut self, day: u32, shift_type: ShiftType, doctor: Option<DoctorIdx>, previous: DoctorIdx) -> Self {
        self.shifts.push(PlannedShift {
            day: day as usize - 1,
            shift_type,
            doctor,
            pinned: false,
            previous: Some(previous),
        });
        self
    }

    pub fn build(self) -> ScheduleSolution {
        let mut shifts = Vec::with_capacity(self.shifts.len());
        let mut assignments = Vec::with_capacity(self.shifts.len());
        for (id, planned) in self.shifts.iter().enumerate() {
            let ordinal = self.shifts[..id]
                .iter()
                .filter(|p| p.day == planned.day && p.shift_type == planned.shift_type)
                .count() as u32;
            shifts.push(Shift::new(id, planned.day, planned.shift_type, ordinal));
            assignments.push(ShiftAssignment {
                shift: id,
                doctor: planned.doctor,
                pinned: planned.pinned,
                previous_doctor: planned.previous,
            });
        }
        ScheduleSolution::new(self.calendar, self.doctors, shifts, assignments)
            .expect("consistent test solution")
    }
}

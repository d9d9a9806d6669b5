//! Shifts and the assignment decision variable.

use std::fmt;

use super::{DayIndex, DoctorIdx};

/// Index of a shift inside its solution; stable for one solve.
pub type ShiftId = usize;

/// Duty kinds, ordered the way a day is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum ShiftType {
    /// Periodic on-call duty ("guardia").
    Cycle,
    /// Regular month-varying duty ("tarde").
    Afternoon,
    /// Clinic duty, quota-constrained on its own.
    Consultation,
}

impl ShiftType {
    pub const ALL: [ShiftType; 3] = [ShiftType::Cycle, ShiftType::Afternoon, ShiftType::Consultation];

    pub fn label(&self) -> &'static str {
        match self {
            ShiftType::Cycle => "CYCLE",
            ShiftType::Afternoon => "AFTERNOON",
            ShiftType::Consultation => "CONSULTATION",
        }
    }
}

impl fmt::Display for ShiftType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single schedulable unit.
///
/// `ordinal` numbers the shifts of one type within a day, so `(day,
/// shift_type, ordinal)` identifies a shift across regenerations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shift {
    pub id: ShiftId,
    pub day: DayIndex,
    pub shift_type: ShiftType,
    pub ordinal: u32,
    pub requires_skill: bool,
    pub is_consultation: bool,
}

impl Shift {
    pub fn new(id: ShiftId, day: DayIndex, shift_type: ShiftType, ordinal: u32) -> Self {
        Self {
            id,
            day,
            shift_type,
            ordinal,
            requires_skill: shift_type == ShiftType::Cycle,
            is_consultation: shift_type == ShiftType::Consultation,
        }
    }

    /// Stable key used to match shifts between two generations of a period.
    pub fn slot(&self) -> (DayIndex, ShiftType, u32) {
        (self.day, self.shift_type, self.ordinal)
    }
}

/// The decision variable: which doctor (if any) covers a shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShiftAssignment {
    pub shift: ShiftId,
    pub doctor: Option<DoctorIdx>,
    /// Pinned assignments are inputs; the solver never changes them.
    pub pinned: bool,
    /// Doctor who held this slot in the prior generation, if any.
    pub previous_doctor: Option<DoctorIdx>,
}

impl ShiftAssignment {
    pub fn open(shift: ShiftId) -> Self {
        Self {
            shift,
            doctor: None,
            pinned: false,
            previous_doctor: None,
        }
    }

    pub fn pinned(shift: ShiftId, doctor: DoctorIdx) -> Self {
        Self {
            shift,
            doctor: Some(doctor),
            pinned: true,
            previous_doctor: Some(doctor),
        }
    }

    pub fn is_open(&self) -> bool {
        self.doctor.is_none()
    }

    /// Returns true if the solver may change this assignment.
    pub fn is_movable(&self) -> bool {
        !self.pinned
    }
}

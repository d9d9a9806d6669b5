//! Domain model for monthly duty scheduling.
//!
//! Entities are held in arenas and addressed by integer indices: a
//! [`Shift`] names its day by [`DayIndex`], an assignment names its doctor
//! by [`DoctorIdx`]. Nothing holds a back-reference to its owner.

mod calendar;
mod doctor;
mod period;
mod schedule;
mod shift;
mod solution;


pub use calendar::{CalendarModel, CycleChange, DayConfiguration};
pub use doctor::{Absence, Doctor, DoctorId, DoctorStatus, ShiftQuota, WeekdaySet};
pub use period::Period;
pub use schedule::{Schedule, ScheduleDay, ScheduleStatus};
pub use shift::{Shift, ShiftAssignment, ShiftId, ShiftType};
pub use solution::{DayIndex, DoctorIdx, ScheduleSolution};

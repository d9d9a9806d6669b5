//! Guardia Core - Core types for monthly duty scheduling
//!
//! This crate provides the fundamental abstractions for Guardia:
//! - Score types for representing schedule quality
//! - The domain model: periods, calendars, doctors, shifts and assignments
//! - The schedule aggregate and its lifecycle status
//! - The shared error type

pub mod domain;
pub mod error;
pub mod score;

pub use domain::{
    Absence, CalendarModel, CycleChange, DayConfiguration, DayIndex, Doctor, DoctorId, DoctorIdx,
    DoctorStatus, Period, Schedule, ScheduleDay, ScheduleSolution, ScheduleStatus, Shift,
    ShiftAssignment, ShiftId, ShiftQuota, ShiftType,
};
pub use error::{GuardiaError, Result};
pub use score::{HardSoftScore, Score, ScoreParseError};

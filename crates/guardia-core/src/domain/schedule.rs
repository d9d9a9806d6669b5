//! The per-period schedule aggregate and its lifecycle status.

use std::fmt;

use chrono::NaiveDate;

use super::{DoctorId, Period, ScheduleSolution, ShiftAssignment, ShiftType};
use crate::error::{GuardiaError, Result};
use crate::score::HardSoftScore;

/// Lifecycle status of a period's schedule.
///
/// ```text
/// NOT_CREATED -> BEING_GENERATED -> PENDING_CONFIRMATION -> CONFIRMED
///                       |
///                       +-> GENERATION_ERROR
/// ```
///
/// A pending or failed schedule may be regenerated; `CONFIRMED` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum ScheduleStatus {
    #[default]
    NotCreated,
    BeingGenerated,
    PendingConfirmation,
    Confirmed,
    GenerationError,
}

impl ScheduleStatus {
    /// Returns true if the lifecycle allows moving from `self` to `next`.
    ///
    /// `BEING_GENERATED -> BEING_GENERATED` restarts a job whose worker died;
    /// live jobs are kept exclusive by the caller's in-flight guard.
    pub fn can_transition_to(self, next: ScheduleStatus) -> bool {
        use ScheduleStatus::*;
        matches!(
            (self, next),
            (NotCreated | BeingGenerated | PendingConfirmation | GenerationError, BeingGenerated)
                | (BeingGenerated, PendingConfirmation | GenerationError)
                | (PendingConfirmation, Confirmed)
        )
    }

    pub fn is_terminal(self) -> bool {
        self == ScheduleStatus::Confirmed
    }
}

impl fmt::Display for ScheduleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ScheduleStatus::NotCreated => "NOT_CREATED",
            ScheduleStatus::BeingGenerated => "BEING_GENERATED",
            ScheduleStatus::PendingConfirmation => "PENDING_CONFIRMATION",
            ScheduleStatus::Confirmed => "CONFIRMED",
            ScheduleStatus::GenerationError => "GENERATION_ERROR",
        };
        f.write_str(label)
    }
}

/// One calendar day of a solved schedule, grouped by duty kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleDay {
    pub date: NaiveDate,
    pub is_working_day: bool,
    pub cycle: Vec<DoctorId>,
    pub afternoon: Vec<DoctorId>,
    pub consultations: Vec<DoctorId>,
}

/// The schedule of one period: status plus, once solved, every assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    period: Period,
    status: ScheduleStatus,
    solution: Option<ScheduleSolution>,
    error: Option<GuardiaError>,
    warning: Option<GuardiaError>,
}

impl Schedule {
    pub fn new(period: Period) -> Self {
        Self {
            period,
            status: ScheduleStatus::NotCreated,
            solution: None,
            error: None,
            warning: None,
        }
    }

    pub fn period(&self) -> Period {
        self.period
    }

    pub fn status(&self) -> ScheduleStatus {
        self.status
    }

    /// The solved state; `None` unless pending confirmation or confirmed.
    pub fn solution(&self) -> Option<&ScheduleSolution> {
        self.solution.as_ref()
    }

    pub fn error(&self) -> Option<&GuardiaError> {
        self.error.as_ref()
    }

    pub fn warning(&self) -> Option<&GuardiaError> {
        self.warning.as_ref()
    }

    pub fn score(&self) -> Option<HardSoftScore> {
        self.solution.as_ref().and_then(|s| s.score)
    }

    pub fn assignments(&self) -> &[ShiftAssignment] {
        self.solution.as_ref().map_or(&[], |s| s.assignments())
    }

    fn transition(&mut self, next: ScheduleStatus) -> Result<()> {
        if !self.status.can_transition_to(next) {
            return Err(GuardiaError::InvalidState(format!(
                "schedule {} cannot move from {} to {}",
                self.period, self.status, next
            )));
        }
        self.status = next;
        Ok(())
    }

    /// Enters `BEING_GENERATED`, discarding any prior result.
    pub fn begin_generation(&mut self) -> Result<()> {
        self.transition(ScheduleStatus::BeingGenerated)?;
        self.solution = None;
        self.error = None;
        self.warning = None;
        Ok(())
    }

    /// Stores the solved state and enters `PENDING_CONFIRMATION`.
    pub fn complete(&mut self, solution: ScheduleSolution, warning: Option<GuardiaError>) -> Result<()> {
        if solution.period() != self.period {
            return Err(GuardiaError::Internal(format!(
                "solution for {} stored in schedule {}",
                solution.period(),
                self.period
            )));
        }
        self.transition(ScheduleStatus::PendingConfirmation)?;
        self.solution = Some(solution);
        self.warning = warning;
        Ok(())
    }

    /// Records a failure and enters `GENERATION_ERROR`; no assignments remain.
    pub fn fail(&mut self, error: GuardiaError) -> Result<()> {
        self.transition(ScheduleStatus::GenerationError)?;
        self.solution = None;
        self.error = Some(error);
        Ok(())
    }

    pub fn confirm(&mut self) -> Result<()> {
        self.transition(ScheduleStatus::Confirmed)
    }

    /// Per-day view of the assignments, in calendar order.
    pub fn days(&self) -> Vec<ScheduleDay> {
        let Some(solution) = &self.solution else {
            return Vec::new();
        };
        let mut days: Vec<ScheduleDay> = solution
            .days()
            .iter()
            .map(|d| ScheduleDay {
                date: d.date(),
                is_working_day: d.is_working_day,
                cycle: Vec::new(),
                afternoon: Vec::new(),
                consultations: Vec::new(),
            })
            .collect();
        for (shift, assignment) in solution.shifts().iter().zip(solution.assignments()) {
            let Some(doctor) = assignment.doctor else {
                continue;
            };
            let id = solution.doctor(doctor).id;
            let day = &mut days[shift.day];
            match shift.shift_type {
                ShiftType::Cycle => day.cycle.push(id),
                ShiftType::Afternoon => day.afternoon.push(id),
                ShiftType::Consultation => day.consultations.push(id),
            }
        }
        days
    }
}

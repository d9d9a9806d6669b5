//! Guardia - monthly duty scheduling for hospital departments
//!
//! Turns a month's calendar and the doctor roster into a schedule of cycle
//! ("guardia") shifts, afternoon shifts and consultations:
//!
//! 1. [`DemandAnalyzer`] sizes the afternoon shifts against the doctors'
//!    minimum quotas, expanding the calendar's baseline when needed
//! 2. [`ProblemBuilder`] lays out every shift with an open assignment
//! 3. [`Solver`] fills and improves the assignments
//! 4. [`ScheduleService`] wraps it all in the schedule lifecycle
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use guardia::prelude::*;
//! use guardia::repository::InMemoryRepository;
//!
//! let period = Period::new(2, 2026).unwrap();
//! let repository = Arc::new(InMemoryRepository::new());
//! repository.insert_calendar(CalendarModel::weekdays(period, 2, 0));
//! for id in 1..=6 {
//!     let start = period.first_day();
//!     repository.upsert_doctor(
//!         Doctor::new(id, "Doctor", "Example", start).with_quota(ShiftQuota::new(2, 10, 0)),
//!     );
//! }
//!
//! let config = SolverConfig::new().with_termination(TerminationConfig::steps(100));
//! let service = ScheduleService::in_memory(config, repository);
//! let schedule = service.generate_schedule(2, 2026, 42, None).unwrap();
//! assert_eq!(schedule.status(), ScheduleStatus::PendingConfirmation);
//! ```

pub mod lifecycle;
pub mod problem;
pub mod repository;
pub mod service;
pub mod telemetry;

pub use lifecycle::{GenerationPermit, ScheduleLifecycle};
pub use problem::{DemandAnalysis, DemandAnalyzer, ProblemBuilder};
pub use repository::{CalendarSource, DoctorSource, InMemoryRepository, ScheduleStore};
pub use service::ScheduleService;

pub use guardia_config::{ConfigError, SolverConfig, TerminationConfig};
pub use guardia_core::{GuardiaError, HardSoftScore, Result, Score};
pub use guardia_solver::{SolveResult, Solver, TerminationReason};

/// Everything needed to set up and run a generation.
pub mod prelude {
    pub use crate::{ScheduleService, SolverConfig, TerminationConfig};
    pub use guardia_core::domain::WeekdaySet;
    pub use guardia_core::{
        Absence, CalendarModel, CycleChange, DayConfiguration, Doctor, DoctorId, DoctorStatus,
        GuardiaError, HardSoftScore, Period, Schedule, ScheduleDay, ScheduleStatus, Score,
        ShiftQuota, ShiftType,
    };
}

//! Schedule generation and confirmation.

use std::sync::Arc;

use guardia_config::{SolverConfig, TerminationConfig};
use guardia_core::{GuardiaError, Period, Result, Schedule};
use guardia_solver::Solver;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::lifecycle::{GenerationPermit, ScheduleLifecycle};
use crate::problem::ProblemBuilder;
use crate::repository::{CalendarSource, DoctorSource, InMemoryRepository, ScheduleStore};

/// Generates and confirms period schedules against the collaborators.
///
/// Cloning is cheap and shares collaborators and the in-flight registry, so
/// a clone can be moved into a background task.
#[derive(Clone)]
pub struct ScheduleService {
    config: SolverConfig,
    calendars: Arc<dyn CalendarSource>,
    doctors: Arc<dyn DoctorSource>,
    store: Arc<dyn ScheduleStore>,
    lifecycle: ScheduleLifecycle,
}

impl ScheduleService {
    pub fn new(
        config: SolverConfig,
        calendars: Arc<dyn CalendarSource>,
        doctors: Arc<dyn DoctorSource>,
        store: Arc<dyn ScheduleStore>,
    ) -> Self {
        Self {
            config,
            calendars,
            doctors,
            store,
            lifecycle: ScheduleLifecycle::new(),
        }
    }

    /// One repository acting as every collaborator.
    pub fn in_memory(config: SolverConfig, repository: Arc<InMemoryRepository>) -> Self {
        Self::new(config, repository.clone(), repository.clone(), repository)
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn lifecycle(&self) -> &ScheduleLifecycle {
        &self.lifecycle
    }

    /// Generates the schedule of `month`/`year` and blocks until done.
    ///
    /// `budget` overrides the configured termination. The result is
    /// `PENDING_CONFIRMATION` (possibly with a `BudgetExhausted` warning) or
    /// `GENERATION_ERROR`.
    ///
    /// # Errors
    ///
    /// `Config` for an invalid configuration or budget, `InvalidData` for a
    /// bad period, `ConcurrentGeneration` if the period
    /// is already being generated, `InvalidState` if it is confirmed, and
    /// `NotFound` / `InsufficientData` for missing input. None of these
    /// persist anything.
    pub fn generate_schedule(
        &self,
        month: u32,
        year: i32,
        seed: u64,
        budget: Option<TerminationConfig>,
    ) -> Result<Schedule> {
        let permit = self.lifecycle.acquire(Period::new(month, year)?)?;
        self.generate_with_permit(&permit, seed, budget)
    }

    /// Claims the period now, then generates on the blocking pool.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn_generation(
        &self,
        month: u32,
        year: i32,
        seed: u64,
        budget: Option<TerminationConfig>,
    ) -> Result<JoinHandle<Result<Schedule>>> {
        let handle = tokio::runtime::Handle::try_current()
            .map_err(|e| GuardiaError::Internal(format!("no tokio runtime: {}", e)))?;
        let permit = self.lifecycle.acquire(Period::new(month, year)?)?;
        let service = self.clone();
        Ok(handle.spawn_blocking(move || service.generate_with_permit(&permit, seed, budget)))
    }

    /// Asks a running generation to stop and keep its best result so far.
    pub fn cancel_generation(&self, month: u32, year: i32) -> Result<bool> {
        let period = Period::new(month, year)?;
        let cancelled = self.lifecycle.cancel(period);
        if cancelled {
            info!(event = "generation_cancel", period = %period);
        }
        Ok(cancelled)
    }

    /// Moves a pending schedule to `CONFIRMED`.
    ///
    /// # Errors
    ///
    /// `NotFound` without a schedule, `InvalidState` unless it is
    /// `PENDING_CONFIRMATION`.
    pub fn confirm_schedule(&self, month: u32, year: i32) -> Result<Schedule> {
        let period = Period::new(month, year)?;
        let mut schedule = self
            .store
            .load_schedule(period)?
            .ok_or_else(|| GuardiaError::NotFound(format!("schedule {}", period)))?;
        schedule.confirm()?;
        self.store.persist_schedule(&schedule)?;
        info!(
            event = "schedule_status",
            period = %period,
            status = %schedule.status(),
        );
        Ok(schedule)
    }

    /// The stored schedule of `month`/`year`, if any.
    pub fn schedule(&self, month: u32, year: i32) -> Result<Option<Schedule>> {
        self.store.load_schedule(Period::new(month, year)?)
    }

    fn generate_with_permit(
        &self,
        permit: &GenerationPermit,
        seed: u64,
        budget: Option<TerminationConfig>,
    ) -> Result<Schedule> {
        let period = permit.period();
        let mut config = self.config.clone();
        if let Some(budget) = budget {
            config.termination = budget;
        }
        config.validate()?;

        let existing = self.store.load_schedule(period)?;
        ScheduleLifecycle::check_regenerable(existing.as_ref())?;

        let calendar = self.calendars.load_calendar(period)?;
        let doctors = self.doctors.load_active_doctors()?;

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let problem = ProblemBuilder::new(calendar, doctors)
            .with_cycle_shifts_per_day(config.problem.cycle_shifts_per_day)
            .with_prior(existing.as_ref().and_then(|s| s.solution()))
            .build(&mut rng)?;

        let mut schedule = existing.unwrap_or_else(|| Schedule::new(period));
        schedule.begin_generation()?;
        self.store.persist_schedule(&schedule)?;
        info!(
            event = "schedule_status",
            period = %period,
            status = %schedule.status(),
            seed = seed,
        );

        let solver = Solver::new(&config).with_terminate_flag(permit.cancel_flag());

        ScheduleLifecycle::settle(&mut schedule, || {
            let result = solver.solve_with_rng(problem, rng);
            let warning = if result.is_feasible() {
                None
            } else {
                warn!(
                    event = "budget_exhausted",
                    period = %period,
                    score = %result.score,
                    termination = %result.termination,
                );
                Some(GuardiaError::BudgetExhausted {
                    hard: result.score.hard(),
                })
            };
            Ok((result.solution, warning))
        })?;

        self.store.persist_schedule(&schedule)?;
        Ok(schedule)
    }
}

impl std::fmt::Debug for ScheduleService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScheduleService")
            .field("config", &self.config)
            .field("generating", &self.lifecycle.generating())
            .finish()
    }
}

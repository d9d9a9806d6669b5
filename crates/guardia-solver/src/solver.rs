//! Solver implementation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use guardia_config::SolverConfig;
use guardia_core::{HardSoftScore, ScheduleSolution};
use guardia_scoring::{ConstraintSet, ScoreDirector};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::phase::construction::ConstructionPhase;
use crate::phase::localsearch::{LocalSearchPhase, MoveTabuAcceptor, SimulatedAnnealingAcceptor};
use crate::phase::Phase;
use crate::scope::SolverScope;
use crate::statistics::SolverStatistics;
use crate::termination::{
    ExternalTermination, OrTermination, StepCountTermination, TerminationReason, TimeTermination,
    UnimprovedStepCountTermination,
};

/// Outcome of a solve.
#[derive(Debug, Clone)]
pub struct SolveResult {
    /// Best solution seen, with its score set.
    pub solution: ScheduleSolution,
    pub score: HardSoftScore,
    pub termination: TerminationReason,
    pub statistics: SolverStatistics,
}

impl SolveResult {
    pub fn is_feasible(&self) -> bool {
        self.score.hard() >= 0
    }
}

/// Runs construction, then local search, on one schedule.
///
/// # Example
///
/// ```
/// use guardia_config::{SolverConfig, TerminationConfig};
/// use guardia_core::ShiftType;
/// use guardia_solver::Solver;
/// use guardia_test::{january_2026, quota_doctors, weekday_calendar, SolutionBuilder};
///
/// let solution = SolutionBuilder::new(weekday_calendar(january_2026()))
///     .doctors(quota_doctors(2, 0, 5, 0))
///     .shift(1, ShiftType::Cycle, None)
///     .shift(1, ShiftType::Afternoon, None)
///     .build();
///
/// let config = SolverConfig::new().with_termination(TerminationConfig::steps(50));
/// let result = Solver::new(&config).solve(solution, 7);
/// assert_eq!(result.solution.open_count(), 0);
/// assert!(result.is_feasible());
/// ```
#[derive(Debug, Clone)]
pub struct Solver {
    config: SolverConfig,
    terminate_early_flag: Arc<AtomicBool>,
}

impl Solver {
    pub fn new(config: &SolverConfig) -> Self {
        Self {
            config: config.clone(),
            terminate_early_flag: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Overrides the configured budget.
    pub fn with_termination(mut self, termination: guardia_config::TerminationConfig) -> Self {
        self.config.termination = termination;
        self
    }

    /// Shares a cancellation flag with the caller.
    pub fn with_terminate_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.terminate_early_flag = flag;
        self
    }

    /// Requests early termination; the solve returns its best so far.
    pub fn terminate_early(&self) {
        self.terminate_early_flag.store(true, Ordering::SeqCst);
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn solve(&self, solution: ScheduleSolution, seed: u64) -> SolveResult {
        self.solve_with_rng(solution, ChaCha8Rng::seed_from_u64(seed))
    }

    /// Solves continuing the given random stream.
    pub fn solve_with_rng(&self, solution: ScheduleSolution, rng: ChaCha8Rng) -> SolveResult {
        let constraints = self.constraint_set();

        info!(
            event = "solve_start",
            shift_count = solution.shifts().len(),
            doctor_count = solution.doctors().len(),
            pinned = solution.assignments().iter().filter(|a| a.pinned).count(),
        );

        let director = ScoreDirector::new(solution, constraints);
        let mut solver_scope = SolverScope::with_rng(director, rng);
        solver_scope.set_terminate_early_flag(self.terminate_early_flag.clone());
        solver_scope.start_solving();

        ConstructionPhase::new()
            .with_phase_index(0)
            .solve(&mut solver_scope);

        if solver_scope.is_terminate_early() {
            solver_scope.set_termination_reason(TerminationReason::Cancelled);
        } else {
            let ls = &self.config.local_search;
            let sa = &ls.simulated_annealing;
            let acceptor = (
                SimulatedAnnealingAcceptor::new(
                    sa.starting_temperature,
                    sa.decay_rate,
                    sa.max_acceptance_probability,
                ),
                MoveTabuAcceptor::new(ls.tabu.move_tabu_size),
            );
            LocalSearchPhase::new(
                acceptor,
                self.build_termination(),
                ls.move_sample_size,
                ls.swap_probability,
            )
            .with_phase_index(1)
            .solve(&mut solver_scope);
        }

        let termination = solver_scope
            .termination_reason()
            .unwrap_or(TerminationReason::StepLimit);
        let (mut solution, statistics) = solver_scope.finish();

        let constraints = self.constraint_set();
        let score = constraints.score(&solution);
        solution.score = Some(score);

        info!(
            event = "solve_end",
            score = %score,
            termination = %termination,
            steps = statistics.total_step_count,
            moves_evaluated = statistics.total_moves_evaluated,
            duration_ms = statistics.total_duration.as_millis() as u64,
        );
        debug!("{}", constraints.explain(&solution));

        SolveResult {
            solution,
            score,
            termination,
            statistics,
        }
    }

    fn constraint_set(&self) -> ConstraintSet {
        ConstraintSet::new(
            &self.config.constraint_weights,
            self.config.problem.min_days_between_cycle_shifts,
        )
    }

    fn build_termination(&self) -> OrTermination {
        let budget = &self.config.termination;
        let mut termination =
            OrTermination::default().with(ExternalTermination::new(self.terminate_early_flag.clone()));
        if let Some(steps) = budget.step_count_limit {
            termination = termination.with(StepCountTermination::new(steps));
        }
        if let Some(limit) = budget.time_limit() {
            termination = termination.with(TimeTermination::new(limit));
        }
        if let Some(steps) = budget.unimproved_step_count_limit {
            termination = termination.with(UnimprovedStepCountTermination::new(steps));
        }
        termination
    }
}

#[cfg(test)]
mod tests;

//! Phase-level scope.

use std::time::{Duration, Instant};

use super::SolverScope;
use crate::statistics::PhaseStatistics;

/// Scope of a single phase, borrowing the solver scope.
pub struct PhaseScope<'a> {
    solver_scope: &'a mut SolverScope,
    statistics: PhaseStatistics,
    start_time: Instant,
}

impl<'a> PhaseScope<'a> {
    pub fn new(solver_scope: &'a mut SolverScope, phase_index: usize, phase_type: &'static str) -> Self {
        let starting_score = solver_scope.calculate_score();
        let mut statistics = PhaseStatistics::new(phase_index, phase_type);
        statistics.starting_score = Some(starting_score);
        Self {
            solver_scope,
            statistics,
            start_time: Instant::now(),
        }
    }

    pub fn solver_scope(&self) -> &SolverScope {
        &*self.solver_scope
    }

    pub fn solver_scope_mut(&mut self) -> &mut SolverScope {
        &mut *self.solver_scope
    }

    pub fn phase_index(&self) -> usize {
        self.statistics.phase_index
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn step_count(&self) -> u64 {
        self.statistics.step_count
    }

    pub fn increment_step_count(&mut self) -> u64 {
        self.statistics.step_count += 1;
        self.solver_scope.increment_step_count();
        self.statistics.step_count
    }

    pub fn record_evaluated(&mut self, count: u64) {
        self.statistics.moves_evaluated += count;
    }

    pub fn record_accepted(&mut self) {
        self.statistics.moves_accepted += 1;
    }

    pub fn update_best_solution(&mut self) -> bool {
        self.solver_scope.update_best_solution()
    }

    /// Closes the phase and folds its statistics into the solver's.
    pub fn finish(mut self) -> PhaseStatistics {
        self.statistics.duration = self.start_time.elapsed();
        self.statistics.ending_score = self.solver_scope.best_score();
        let stats = self.statistics.clone();
        self.solver_scope.statistics_mut().record_phase(self.statistics);
        stats
    }
}

//! Solver-level scope.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use guardia_core::{HardSoftScore, ScheduleSolution};
use guardia_scoring::ScoreDirector;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::heuristic::{Move, MoveSelector};
use crate::statistics::SolverStatistics;
use crate::termination::TerminationReason;

/// Top-level scope for the entire solving process.
pub struct SolverScope {
    score_director: ScoreDirector,
    best_solution: Option<ScheduleSolution>,
    best_score: Option<HardSoftScore>,
    rng: ChaCha8Rng,
    start_time: Option<Instant>,
    total_step_count: u64,
    statistics: SolverStatistics,
    terminate_early_flag: Option<Arc<AtomicBool>>,
    termination_reason: Option<TerminationReason>,
}

impl SolverScope {
    pub fn with_seed(score_director: ScoreDirector, seed: u64) -> Self {
        Self::with_rng(score_director, ChaCha8Rng::seed_from_u64(seed))
    }

    /// Continues an existing random stream.
    pub fn with_rng(score_director: ScoreDirector, rng: ChaCha8Rng) -> Self {
        Self {
            score_director,
            best_solution: None,
            best_score: None,
            rng,
            start_time: None,
            total_step_count: 0,
            statistics: SolverStatistics::new(),
            terminate_early_flag: None,
            termination_reason: None,
        }
    }

    pub fn start_solving(&mut self) {
        self.start_time = Some(Instant::now());
        self.total_step_count = 0;
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.map(|t| t.elapsed()).unwrap_or_default()
    }

    pub fn score_director(&self) -> &ScoreDirector {
        &self.score_director
    }

    pub fn score_director_mut(&mut self) -> &mut ScoreDirector {
        &mut self.score_director
    }

    pub fn working_solution(&self) -> &ScheduleSolution {
        self.score_director.working_solution()
    }

    pub fn calculate_score(&mut self) -> HardSoftScore {
        self.score_director.calculate_score()
    }

    pub fn best_solution(&self) -> Option<&ScheduleSolution> {
        self.best_solution.as_ref()
    }

    pub fn best_score(&self) -> Option<HardSoftScore> {
        self.best_score
    }

    /// Snapshots the working solution if it beats the best so far.
    ///
    /// Returns true on a new best.
    pub fn update_best_solution(&mut self) -> bool {
        let current_score = self.score_director.calculate_score();
        let is_better = match self.best_score {
            None => true,
            Some(best) => current_score > best,
        };

        if is_better {
            self.best_solution = Some(self.score_director.clone_working_solution());
            self.best_score = Some(current_score);
            let elapsed = self.elapsed();
            self.statistics
                .record_improvement(elapsed, self.total_step_count, current_score);
        }
        is_better
    }

    pub fn rng(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    /// Draws candidate moves against the working solution.
    pub fn sample_moves(&mut self, selector: &MoveSelector) -> Vec<Move> {
        selector.sample(self.score_director.working_solution(), &mut self.rng)
    }

    pub fn increment_step_count(&mut self) -> u64 {
        self.total_step_count += 1;
        self.total_step_count
    }

    pub fn total_step_count(&self) -> u64 {
        self.total_step_count
    }

    pub fn statistics(&self) -> &SolverStatistics {
        &self.statistics
    }

    pub fn statistics_mut(&mut self) -> &mut SolverStatistics {
        &mut self.statistics
    }

    pub fn set_terminate_early_flag(&mut self, flag: Arc<AtomicBool>) {
        self.terminate_early_flag = Some(flag);
    }

    pub fn is_terminate_early(&self) -> bool {
        self.terminate_early_flag
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::SeqCst))
    }

    pub fn termination_reason(&self) -> Option<TerminationReason> {
        self.termination_reason
    }

    pub fn set_termination_reason(&mut self, reason: TerminationReason) {
        self.termination_reason.get_or_insert(reason);
    }

    /// Ends the solve, returning the best solution seen (or the working one
    /// if nothing was recorded) and the final statistics.
    pub fn finish(mut self) -> (ScheduleSolution, SolverStatistics) {
        self.statistics.total_duration = self.elapsed();
        self.statistics.score_calculation_count = self.score_director.calculation_count();
        let solution = match self.best_solution {
            Some(best) => best,
            None => self.score_director.into_working_solution(),
        };
        (solution, self.statistics)
    }
}

impl std::fmt::Debug for SolverScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SolverScope")
            .field("best_score", &self.best_score)
            .field("total_step_count", &self.total_step_count)
            .field("termination_reason", &self.termination_reason)
            .finish()
    }
}

//! Counters gathered while a schedule is solved.
//!
//! The per-step working scores back the guarantee that the hard score never
//! regresses once the improvement phase starts.

use std::time::Duration;

use guardia_core::{HardSoftScore, Score};

/// What one phase did.
#[derive(Debug, Clone)]
pub struct PhaseStatistics {
    pub phase_index: usize,
    /// "Construction" or "LocalSearch".
    pub phase_type: &'static str,
    pub duration: Duration,
    pub step_count: u64,
    /// Candidate assignments scored.
    pub moves_evaluated: u64,
    /// Assignments actually applied.
    pub moves_accepted: u64,
    pub starting_score: Option<HardSoftScore>,
    /// Best score when the phase ended.
    pub ending_score: Option<HardSoftScore>,
}

impl PhaseStatistics {
    pub fn new(phase_index: usize, phase_type: &'static str) -> Self {
        Self {
            phase_index,
            phase_type,
            duration: Duration::ZERO,
            step_count: 0,
            moves_evaluated: 0,
            moves_accepted: 0,
            starting_score: None,
            ending_score: None,
        }
    }

    /// Hard and soft gained between phase start and end.
    pub fn gain(&self) -> Option<HardSoftScore> {
        match (self.starting_score, self.ending_score) {
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        }
    }
}

/// A new best schedule was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreImprovement {
    pub time_offset: Duration,
    pub step_count: u64,
    pub score: HardSoftScore,
}

/// Everything recorded over one solve.
#[derive(Debug, Clone, Default)]
pub struct SolverStatistics {
    pub total_duration: Duration,
    pub total_step_count: u64,
    pub total_moves_evaluated: u64,
    pub total_moves_accepted: u64,
    /// Full rescorings done by the score director.
    pub score_calculation_count: u64,
    pub phase_statistics: Vec<PhaseStatistics>,
    pub score_history: Vec<ScoreImprovement>,
    /// Working score after every local-search step.
    pub step_scores: Vec<HardSoftScore>,
}

impl SolverStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_phase(&mut self, phase: PhaseStatistics) {
        self.total_step_count += phase.step_count;
        self.total_moves_evaluated += phase.moves_evaluated;
        self.total_moves_accepted += phase.moves_accepted;
        self.phase_statistics.push(phase);
    }

    pub fn record_improvement(&mut self, time_offset: Duration, step_count: u64, score: HardSoftScore) {
        self.score_history.push(ScoreImprovement {
            time_offset,
            step_count,
            score,
        });
    }

    pub fn best_score(&self) -> Option<HardSoftScore> {
        self.score_history.last().map(|i| i.score)
    }

    /// Step at which the schedule first had no hard violation.
    pub fn first_feasible_step(&self) -> Option<u64> {
        self.score_history
            .iter()
            .find(|i| i.score.is_feasible())
            .map(|i| i.step_count)
    }

    /// Whether the local-search trace ever lost hard score.
    pub fn hard_regressed(&self) -> bool {
        self.step_scores.windows(2).any(|w| w[1].hard() < w[0].hard())
    }
}

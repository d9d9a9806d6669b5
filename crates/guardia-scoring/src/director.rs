//! Score director owning the working solution.

use guardia_core::{DoctorIdx, HardSoftScore, ScheduleSolution, ShiftId};
use tracing::trace;

use crate::analysis::ScoreExplanation;
use crate::constraint::ConstraintSet;
use crate::context::RosterFacts;

/// Holds the working solution during a solve and scores it on demand.
///
/// Every change goes through [`assign`](Self::assign) so the cached score
/// is invalidated consistently.
pub struct ScoreDirector {
    working_solution: ScheduleSolution,
    constraints: ConstraintSet,
    facts: RosterFacts,
    cached_score: Option<HardSoftScore>,
    calculation_count: u64,
}

impl ScoreDirector {
    pub fn new(working_solution: ScheduleSolution, constraints: ConstraintSet) -> Self {
        let facts = RosterFacts::new(&working_solution);
        Self {
            working_solution,
            constraints,
            facts,
            cached_score: None,
            calculation_count: 0,
        }
    }

    pub fn working_solution(&self) -> &ScheduleSolution {
        &self.working_solution
    }

    pub fn constraints(&self) -> &ConstraintSet {
        &self.constraints
    }

    pub fn facts(&self) -> &RosterFacts {
        &self.facts
    }

    /// Changes the doctor of an unpinned shift; returns the previous doctor.
    pub fn assign(&mut self, shift: ShiftId, doctor: Option<DoctorIdx>) -> Option<DoctorIdx> {
        let previous = self.working_solution.assign(shift, doctor);
        if previous != doctor {
            self.cached_score = None;
            self.working_solution.score = None;
        }
        previous
    }

    /// Scores the working solution and stores the result on it.
    pub fn calculate_score(&mut self) -> HardSoftScore {
        if let Some(score) = self.cached_score {
            return score;
        }
        let score = self
            .constraints
            .score_with(&self.working_solution, &self.facts);
        self.calculation_count += 1;
        trace!(event = "score_calculated", score = %score, count = self.calculation_count);
        self.cached_score = Some(score);
        self.working_solution.score = Some(score);
        score
    }

    /// Number of full score calculations performed.
    pub fn calculation_count(&self) -> u64 {
        self.calculation_count
    }

    pub fn explain(&self) -> ScoreExplanation {
        self.constraints.explain(&self.working_solution)
    }

    /// Returns a scored copy of the working solution.
    pub fn clone_working_solution(&mut self) -> ScheduleSolution {
        self.calculate_score();
        self.working_solution.clone()
    }

    pub fn into_working_solution(mut self) -> ScheduleSolution {
        self.calculate_score();
        self.working_solution
    }
}

impl std::fmt::Debug for ScoreDirector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoreDirector")
            .field("shifts", &self.working_solution.shifts().len())
            .field("cached_score", &self.cached_score)
            .field("calculation_count", &self.calculation_count)
            .finish()
    }
}

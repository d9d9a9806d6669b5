//! Termination based on lack of improvement.

use guardia_core::{HardSoftScore, Score};

use super::{Termination, TerminationReason};
use crate::scope::SolverScope;

/// Terminates once the best score is feasible and has not improved for
/// `limit` steps.
///
/// While infeasible the counter never fires: the search keeps going until
/// the budget runs out.
#[derive(Debug, Clone)]
pub struct UnimprovedStepCountTermination {
    limit: u64,
    last_best_score: Option<HardSoftScore>,
    last_improvement_step: u64,
}

impl UnimprovedStepCountTermination {
    pub fn new(limit: u64) -> Self {
        Self {
            limit,
            last_best_score: None,
            last_improvement_step: 0,
        }
    }

    pub fn steps_since_improvement(&self, current_step: u64) -> u64 {
        current_step.saturating_sub(self.last_improvement_step)
    }
}

impl Termination for UnimprovedStepCountTermination {
    fn is_terminated(&mut self, solver_scope: &SolverScope) -> bool {
        let step = solver_scope.total_step_count();
        let Some(best) = solver_scope.best_score() else {
            return false;
        };
        let improved = match self.last_best_score {
            None => true,
            Some(last) => best > last,
        };
        if improved {
            self.last_best_score = Some(best);
            self.last_improvement_step = step;
            return false;
        }
        best.is_feasible() && self.steps_since_improvement(step) >= self.limit
    }

    fn reason(&self) -> TerminationReason {
        TerminationReason::Stalled
    }
}

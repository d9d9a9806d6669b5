//! Step count termination.

use super::{Termination, TerminationReason};
use crate::scope::SolverScope;

/// Terminates after a fixed number of steps, counted from the first poll.
///
/// Construction steps taken before the improvement phase starts polling do
/// not use up the budget.
#[derive(Debug, Clone, Copy)]
pub struct StepCountTermination {
    limit: u64,
    started_at: Option<u64>,
}

impl StepCountTermination {
    pub fn new(limit: u64) -> Self {
        Self {
            limit,
            started_at: None,
        }
    }
}

impl Termination for StepCountTermination {
    fn is_terminated(&mut self, solver_scope: &SolverScope) -> bool {
        let step = solver_scope.total_step_count();
        let start = *self.started_at.get_or_insert(step);
        step - start >= self.limit
    }

    fn reason(&self) -> TerminationReason {
        TerminationReason::StepLimit
    }
}

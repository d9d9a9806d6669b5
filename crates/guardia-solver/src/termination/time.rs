//! Time-based termination.

use std::time::Duration;

use super::{Termination, TerminationReason};
use crate::scope::SolverScope;

/// Terminates once the solve has run for the given duration.
#[derive(Debug, Clone, Copy)]
pub struct TimeTermination {
    limit: Duration,
}

impl TimeTermination {
    pub fn new(limit: Duration) -> Self {
        Self { limit }
    }

    pub fn seconds(secs: u64) -> Self {
        Self::new(Duration::from_secs(secs))
    }

    pub fn millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }
}

impl Termination for TimeTermination {
    fn is_terminated(&mut self, solver_scope: &SolverScope) -> bool {
        solver_scope.elapsed() >= self.limit
    }

    fn reason(&self) -> TerminationReason {
        TerminationReason::TimeLimit
    }
}

//! Solver phases
//!
//! Phases run in sequence against one solver scope:
//! - ConstructionPhase: fills every open shift greedily
//! - LocalSearchPhase: improves the filled schedule

pub mod construction;
pub mod localsearch;

use std::fmt::Debug;

use crate::scope::SolverScope;

/// A phase of the solving process.
pub trait Phase: Send + Debug {
    /// Executes this phase.
    ///
    /// The phase modifies the working solution in the solver scope and
    /// updates the best solution when improvements are found.
    fn solve(&mut self, solver_scope: &mut SolverScope);

    /// Returns the name of this phase type.
    fn phase_type_name(&self) -> &'static str;
}

/// Steps per second, for phase_end events.
pub(crate) fn speed(steps: u64, duration: std::time::Duration) -> u64 {
    if duration.as_secs_f64() > 0.0 {
        (steps as f64 / duration.as_secs_f64()) as u64
    } else {
        0
    }
}

//! Termination conditions for the improvement phase.

mod composite;
mod external;
mod step_count;
mod time;
mod unimproved;

use std::fmt::{self, Debug};

use crate::scope::SolverScope;

pub use composite::OrTermination;
pub use external::ExternalTermination;
pub use step_count::StepCountTermination;
pub use time::TimeTermination;
pub use unimproved::UnimprovedStepCountTermination;

/// Why a solve stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerminationReason {
    /// The step budget ran out.
    StepLimit,
    /// The time budget ran out.
    TimeLimit,
    /// Feasible, and the best score stopped improving.
    Stalled,
    /// The caller asked the solve to stop.
    Cancelled,
    /// Every assignment is pinned, nothing left to move.
    NoMoves,
}

impl TerminationReason {
    /// Returns true if the solve was cut short by its budget.
    pub fn is_budget(&self) -> bool {
        matches!(self, TerminationReason::StepLimit | TerminationReason::TimeLimit)
    }
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TerminationReason::StepLimit => "step_limit",
            TerminationReason::TimeLimit => "time_limit",
            TerminationReason::Stalled => "stalled",
            TerminationReason::Cancelled => "cancelled",
            TerminationReason::NoMoves => "no_moves",
        };
        f.write_str(label)
    }
}

/// Decides when to stop solving.
///
/// Checked once before every improvement step.
pub trait Termination: Send + Debug {
    /// Returns true if solving should terminate.
    fn is_terminated(&mut self, solver_scope: &SolverScope) -> bool;

    /// The reason reported when this condition fires.
    fn reason(&self) -> TerminationReason;
}

//! Guardia Solver Engine
//!
//! Two phases run against one [`ScoreDirector`](guardia_scoring::ScoreDirector):
//! - a greedy construction phase that fills every open shift
//! - a local-search phase sampling change and swap moves, with simulated
//!   annealing and a move tabu list to escape local optima
//!
//! The solver is single-threaded and, for a given seed, deterministic.

pub mod heuristic;
pub mod phase;
pub mod scope;
pub mod solver;
pub mod statistics;
pub mod termination;

#[cfg(test)]
mod test_utils;

pub use heuristic::{Move, MoveSelector};
pub use phase::construction::ConstructionPhase;
pub use phase::localsearch::{Acceptor, LocalSearchPhase, MoveTabuAcceptor, SimulatedAnnealingAcceptor};
pub use phase::Phase;
pub use scope::{PhaseScope, SolverScope};
pub use solver::{SolveResult, Solver};
pub use statistics::{PhaseStatistics, ScoreImprovement, SolverStatistics};
pub use termination::{
    ExternalTermination, OrTermination, StepCountTermination, Termination, TerminationReason,
    TimeTermination, UnimprovedStepCountTermination,
};

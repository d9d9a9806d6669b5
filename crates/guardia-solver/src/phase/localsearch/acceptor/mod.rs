//! Acceptors for local search move acceptance.
//!
//! Strictly improving moves are always taken by the phase itself; an
//! acceptor only decides on the rest.

mod move_tabu;
mod simulated_annealing;

use std::fmt::Debug;

use guardia_core::HardSoftScore;

use crate::heuristic::Move;

pub use move_tabu::MoveTabuAcceptor;
pub use simulated_annealing::SimulatedAnnealingAcceptor;

/// Trait for accepting or rejecting non-improving moves in local search.
pub trait Acceptor: Send + Debug {
    /// Returns true if `candidate`, scoring `move_score` against the last
    /// step's `last_step_score`, should be taken.
    ///
    /// `roll` is a uniform draw in `[0, 1)` shared by all acceptors of a
    /// step, so combining acceptors does not consume extra randomness.
    fn is_accepted(
        &self,
        candidate: &Move,
        last_step_score: HardSoftScore,
        move_score: HardSoftScore,
        roll: f64,
    ) -> bool;

    /// Called when a phase starts.
    fn phase_started(&mut self, _initial_score: HardSoftScore) {}

    /// Called when a phase ends.
    fn phase_ended(&mut self) {}

    /// Called when a step ends, with the move taken (if any) and the new
    /// working score.
    fn step_ended(&mut self, _step_move: Option<&Move>, _step_score: HardSoftScore) {}
}

/// Both acceptors must agree.
impl<A: Acceptor, B: Acceptor> Acceptor for (A, B) {
    fn is_accepted(
        &self,
        candidate: &Move,
        last_step_score: HardSoftScore,
        move_score: HardSoftScore,
        roll: f64,
    ) -> bool {
        self.0.is_accepted(candidate, last_step_score, move_score, roll)
            && self.1.is_accepted(candidate, last_step_score, move_score, roll)
    }

    fn phase_started(&mut self, initial_score: HardSoftScore) {
        self.0.phase_started(initial_score);
        self.1.phase_started(initial_score);
    }

    fn phase_ended(&mut self) {
        self.0.phase_ended();
        self.1.phase_ended();
    }

    fn step_ended(&mut self, step_move: Option<&Move>, step_score: HardSoftScore) {
        self.0.step_ended(step_move, step_score);
        self.1.step_ended(step_move, step_score);
    }
}

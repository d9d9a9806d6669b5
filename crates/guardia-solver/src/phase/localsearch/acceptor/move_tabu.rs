//! Move tabu acceptor.

use std::collections::VecDeque;

use guardia_core::HardSoftScore;

use super::Acceptor;
use crate::heuristic::Move;

/// Forbids undoing recent steps.
///
/// After each step the undo of the taken move becomes tabu for
/// `move_tabu_size` steps. A tabu move is still accepted when it would
/// beat the best score seen in the phase (aspiration).
///
/// # Example
///
/// ```
/// use guardia_solver::{Move, MoveTabuAcceptor};
///
/// let acceptor = MoveTabuAcceptor::new(7);
/// assert!(!acceptor.is_move_tabu(&Move::swap(1, 2)));
/// ```
#[derive(Debug, Clone)]
pub struct MoveTabuAcceptor {
    move_tabu_size: usize,
    move_tabu_list: VecDeque<Move>,
    aspiration_enabled: bool,
    best_score: Option<HardSoftScore>,
}

impl MoveTabuAcceptor {
    /// Creates a move tabu acceptor with aspiration enabled.
    pub fn new(move_tabu_size: usize) -> Self {
        Self {
            move_tabu_size,
            move_tabu_list: VecDeque::with_capacity(move_tabu_size),
            aspiration_enabled: true,
            best_score: None,
        }
    }

    /// Tabu moves are never accepted, even on a new best.
    pub fn without_aspiration(move_tabu_size: usize) -> Self {
        Self {
            aspiration_enabled: false,
            ..Self::new(move_tabu_size)
        }
    }

    pub fn is_move_tabu(&self, candidate: &Move) -> bool {
        self.move_tabu_list.contains(candidate)
    }

    pub fn tabu_len(&self) -> usize {
        self.move_tabu_list.len()
    }

    fn record(&mut self, taken: &Move) {
        if self.move_tabu_size == 0 {
            return;
        }
        if self.move_tabu_list.len() == self.move_tabu_size {
            self.move_tabu_list.pop_front();
        }
        self.move_tabu_list.push_back(taken.undo());
    }
}

impl Default for MoveTabuAcceptor {
    fn default() -> Self {
        Self::new(10)
    }
}

impl Acceptor for MoveTabuAcceptor {
    fn is_accepted(
        &self,
        candidate: &Move,
        _last_step_score: HardSoftScore,
        move_score: HardSoftScore,
        _roll: f64,
    ) -> bool {
        if !self.is_move_tabu(candidate) {
            return true;
        }
        self.aspiration_enabled && self.best_score.is_some_and(|best| move_score > best)
    }

    fn phase_started(&mut self, initial_score: HardSoftScore) {
        self.move_tabu_list.clear();
        self.best_score = Some(initial_score);
    }

    fn phase_ended(&mut self) {
        self.move_tabu_list.clear();
    }

    fn step_ended(&mut self, step_move: Option<&Move>, step_score: HardSoftScore) {
        if let Some(taken) = step_move {
            self.record(taken);
        }
        if self.best_score.map_or(true, |best| step_score > best) {
            self.best_score = Some(step_score);
        }
    }
}

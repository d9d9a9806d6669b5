//! Change and swap moves over shift assignments.

use std::fmt;

use guardia_core::{DoctorIdx, ScheduleSolution, ShiftId};
use guardia_scoring::ScoreDirector;

/// A reversible change to the assignment state.
///
/// Moves never target pinned assignments; selectors only build moves whose
/// incoming doctors pass the eligibility pre-check.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    /// Give `shift` to `to`, replacing `from`.
    Change {
        shift: ShiftId,
        from: Option<DoctorIdx>,
        to: Option<DoctorIdx>,
    },
    /// Exchange the doctors of two shifts. `left < right`.
    Swap { left: ShiftId, right: ShiftId },
}

impl Move {
    pub fn change(shift: ShiftId, from: Option<DoctorIdx>, to: Option<DoctorIdx>) -> Self {
        Move::Change { shift, from, to }
    }

    pub fn swap(a: ShiftId, b: ShiftId) -> Self {
        Move::Swap {
            left: a.min(b),
            right: a.max(b),
        }
    }

    /// Returns true if the move changes something and touches no pinned
    /// assignment in the current state.
    pub fn is_doable(&self, solution: &ScheduleSolution) -> bool {
        match *self {
            Move::Change { shift, from, to } => {
                let a = solution.assignment(shift);
                !a.pinned && a.doctor == from && from != to
            }
            Move::Swap { left, right } => {
                let (l, r) = (solution.assignment(left), solution.assignment(right));
                left != right && !l.pinned && !r.pinned && l.doctor != r.doctor
            }
        }
    }

    /// Applies the move through the score director.
    pub fn apply(&self, director: &mut ScoreDirector) {
        match *self {
            Move::Change { shift, to, .. } => {
                director.assign(shift, to);
            }
            Move::Swap { left, right } => {
                let l = director.working_solution().doctor_of(left);
                let r = director.working_solution().doctor_of(right);
                director.assign(left, r);
                director.assign(right, l);
            }
        }
    }

    /// The move that restores the state before this one.
    pub fn undo(&self) -> Move {
        match *self {
            Move::Change { shift, from, to } => Move::Change {
                shift,
                from: to,
                to: from,
            },
            swap @ Move::Swap { .. } => swap,
        }
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Change { shift, from, to } => {
                write!(f, "Change(shift {}: {:?} -> {:?})", shift, from, to)
            }
            Move::Swap { left, right } => write!(f, "Swap(shift {} <-> shift {})", left, right),
        }
    }
}

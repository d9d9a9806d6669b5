//! Random move sampling.

use guardia_core::{DoctorIdx, ScheduleSolution, ShiftId};
use guardia_scoring::is_eligible;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use super::Move;

/// Samples change and swap moves over the movable shifts.
///
/// Eligibility is fixed for a solve, so the eligible doctors of every
/// shift are computed once up front.
#[derive(Debug, Clone)]
pub struct MoveSelector {
    sample_size: usize,
    swap_probability: f64,
    movable: Vec<ShiftId>,
    eligible: Vec<Vec<DoctorIdx>>,
}

impl MoveSelector {
    pub fn new(solution: &ScheduleSolution, sample_size: usize, swap_probability: f64) -> Self {
        let movable = solution.movable_shifts();
        let eligible = solution
            .shifts()
            .iter()
            .map(|shift| {
                (0..solution.doctors().len())
                    .filter(|&d| is_eligible(solution, d, shift))
                    .collect()
            })
            .collect();
        Self {
            sample_size: sample_size.max(1),
            swap_probability,
            movable,
            eligible,
        }
    }

    /// Shifts the selector may touch.
    pub fn movable_shifts(&self) -> &[ShiftId] {
        &self.movable
    }

    /// Doctors that may hold `shift`.
    pub fn eligible_doctors(&self, shift: ShiftId) -> &[DoctorIdx] {
        &self.eligible[shift]
    }

    fn can_hold(&self, shift: ShiftId, doctor: Option<DoctorIdx>) -> bool {
        match doctor {
            None => true,
            Some(d) => self.eligible[shift].contains(&d),
        }
    }

    /// Draws up to `sample_size` doable moves.
    ///
    /// Gives up after a bounded number of draws, so the result may be
    /// shorter (or empty when nothing is movable).
    pub fn sample(&self, solution: &ScheduleSolution, rng: &mut ChaCha8Rng) -> Vec<Move> {
        let mut moves = Vec::with_capacity(self.sample_size);
        if self.movable.is_empty() {
            return moves;
        }
        let max_draws = self.sample_size * 8;
        for _ in 0..max_draws {
            if moves.len() == self.sample_size {
                break;
            }
            let candidate = if self.movable.len() > 1 && rng.random_bool(self.swap_probability) {
                self.draw_swap(solution, rng)
            } else {
                self.draw_change(solution, rng)
            };
            if let Some(m) = candidate {
                if !moves.contains(&m) {
                    moves.push(m);
                }
            }
        }
        moves
    }

    fn draw_change(&self, solution: &ScheduleSolution, rng: &mut ChaCha8Rng) -> Option<Move> {
        let shift = self.movable[rng.random_range(0..self.movable.len())];
        let eligible = &self.eligible[shift];
        if eligible.is_empty() {
            return None;
        }
        let to = eligible[rng.random_range(0..eligible.len())];
        let m = Move::change(shift, solution.doctor_of(shift), Some(to));
        m.is_doable(solution).then_some(m)
    }

    fn draw_swap(&self, solution: &ScheduleSolution, rng: &mut ChaCha8Rng) -> Option<Move> {
        let a = self.movable[rng.random_range(0..self.movable.len())];
        let b = self.movable[rng.random_range(0..self.movable.len())];
        let m = Move::swap(a, b);
        if !m.is_doable(solution) {
            return None;
        }
        let (da, db) = (solution.doctor_of(a), solution.doctor_of(b));
        (self.can_hold(a, db) && self.can_hold(b, da)).then_some(m)
    }
}

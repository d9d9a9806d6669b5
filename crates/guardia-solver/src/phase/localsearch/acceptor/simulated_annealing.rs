//! Simulated annealing acceptor.

use guardia_core::HardSoftScore;

use super::Acceptor;
use crate::heuristic::Move;

/// Simulated annealing acceptor over the soft level.
///
/// A move that worsens the hard score is never accepted. A move that keeps
/// the hard score is accepted with probability
/// `min(max_p, exp(-Δsoft / T))`, where `T` decays geometrically per step.
///
/// # Example
///
/// ```
/// use guardia_solver::SimulatedAnnealingAcceptor;
///
/// let acceptor = SimulatedAnnealingAcceptor::new(20.0, 0.999, 0.5);
/// assert_eq!(acceptor.current_temperature(), 20.0);
/// ```
#[derive(Debug, Clone)]
pub struct SimulatedAnnealingAcceptor {
    starting_temperature: f64,
    current_temperature: f64,
    decay_rate: f64,
    max_acceptance_probability: f64,
}

impl SimulatedAnnealingAcceptor {
    pub fn new(starting_temperature: f64, decay_rate: f64, max_acceptance_probability: f64) -> Self {
        Self {
            starting_temperature,
            current_temperature: starting_temperature,
            decay_rate,
            max_acceptance_probability,
        }
    }

    pub fn current_temperature(&self) -> f64 {
        self.current_temperature
    }

    /// Probability of taking a move from `last` to `candidate`.
    pub fn acceptance_probability(&self, last: HardSoftScore, candidate: HardSoftScore) -> f64 {
        if candidate.hard() < last.hard() {
            return 0.0;
        }
        if candidate >= last {
            return 1.0;
        }
        if self.current_temperature <= 0.0 {
            return 0.0;
        }
        let delta = (last.soft() - candidate.soft()) as f64;
        (-delta / self.current_temperature)
            .exp()
            .min(self.max_acceptance_probability)
    }
}

impl Default for SimulatedAnnealingAcceptor {
    fn default() -> Self {
        Self::new(20.0, 0.999, 0.5)
    }
}

impl Acceptor for SimulatedAnnealingAcceptor {
    fn is_accepted(
        &self,
        _candidate: &Move,
        last_step_score: HardSoftScore,
        move_score: HardSoftScore,
        roll: f64,
    ) -> bool {
        roll < self.acceptance_probability(last_step_score, move_score)
    }

    fn phase_started(&mut self, _initial_score: HardSoftScore) {
        self.current_temperature = self.starting_temperature;
    }

    fn step_ended(&mut self, _step_move: Option<&Move>, _step_score: HardSoftScore) {
        self.current_temperature *= self.decay_rate;
    }
}

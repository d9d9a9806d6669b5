//! Local search phase implementation.

use std::fmt::{self, Debug};

use guardia_core::HardSoftScore;
use rand::Rng;
use tracing::{debug, info, trace};

use crate::heuristic::{Move, MoveSelector};
use crate::phase::localsearch::Acceptor;
use crate::phase::{speed, Phase};
use crate::scope::{PhaseScope, SolverScope};
use crate::termination::{Termination, TerminationReason};

const PROGRESS_INTERVAL: u64 = 1_000;

/// Local search phase that improves an existing solution.
///
/// Each step:
/// 1. Samples candidate moves
/// 2. Evaluates each by applying, scoring and undoing it
/// 3. Takes the best strictly improving move, or failing that the best
///    candidate the acceptor lets through
///
/// Runs until the termination fires; the best solution seen is kept in the
/// solver scope.
pub struct LocalSearchPhase<A: Acceptor, T: Termination> {
    acceptor: A,
    termination: T,
    move_sample_size: usize,
    swap_probability: f64,
    phase_index: usize,
}

impl<A: Acceptor, T: Termination> LocalSearchPhase<A, T> {
    pub fn new(acceptor: A, termination: T, move_sample_size: usize, swap_probability: f64) -> Self {
        Self {
            acceptor,
            termination,
            move_sample_size,
            swap_probability,
            phase_index: 1,
        }
    }

    pub fn with_phase_index(mut self, phase_index: usize) -> Self {
        self.phase_index = phase_index;
        self
    }

    /// Runs one step. Returns the move taken, if any.
    fn step(
        &self,
        phase_scope: &mut PhaseScope<'_>,
        selector: &MoveSelector,
        last_step_score: HardSoftScore,
    ) -> Option<(Move, HardSoftScore)> {
        let moves = phase_scope.solver_scope_mut().sample_moves(selector);
        let mut evaluated: Vec<(Move, HardSoftScore)> = Vec::with_capacity(moves.len());
        {
            let director = phase_scope.solver_scope_mut().score_director_mut();
            for m in moves {
                if !m.is_doable(director.working_solution()) {
                    continue;
                }
                m.apply(director);
                let score = director.calculate_score();
                m.undo().apply(director);
                evaluated.push((m, score));
            }
        }
        phase_scope.record_evaluated(evaluated.len() as u64);
        // One draw per step, whether or not it gets used.
        let roll: f64 = phase_scope.solver_scope_mut().rng().random();

        let mut improving: Option<(Move, HardSoftScore)> = None;
        for &(m, score) in &evaluated {
            if score > last_step_score && improving.map_or(true, |(_, best)| score > best) {
                improving = Some((m, score));
            }
        }

        let chosen = improving.or_else(|| {
            let mut ranked = evaluated.clone();
            ranked.sort_by(|a, b| b.1.cmp(&a.1));
            ranked
                .into_iter()
                .find(|(m, score)| self.acceptor.is_accepted(m, last_step_score, *score, roll))
        })?;

        chosen
            .0
            .apply(phase_scope.solver_scope_mut().score_director_mut());
        phase_scope.record_accepted();
        Some(chosen)
    }
}

impl<A: Acceptor, T: Termination> Debug for LocalSearchPhase<A, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalSearchPhase")
            .field("acceptor", &self.acceptor)
            .field("termination", &self.termination)
            .field("move_sample_size", &self.move_sample_size)
            .field("swap_probability", &self.swap_probability)
            .finish()
    }
}

impl<A: Acceptor, T: Termination> Phase for LocalSearchPhase<A, T> {
    fn solve(&mut self, solver_scope: &mut SolverScope) {
        let phase_index = self.phase_index;
        let mut phase_scope = PhaseScope::new(solver_scope, phase_index, self.phase_type_name());

        info!(
            event = "phase_start",
            phase = "Local Search",
            phase_index = phase_index,
        );

        let selector = MoveSelector::new(
            phase_scope.solver_scope().working_solution(),
            self.move_sample_size,
            self.swap_probability,
        );
        let mut last_step_score = phase_scope.solver_scope_mut().calculate_score();
        phase_scope.update_best_solution();

        if selector.movable_shifts().is_empty() {
            phase_scope
                .solver_scope_mut()
                .set_termination_reason(TerminationReason::NoMoves);
        } else {
            self.acceptor.phase_started(last_step_score);
            loop {
                if self.termination.is_terminated(phase_scope.solver_scope()) {
                    let reason = self.termination.reason();
                    phase_scope.solver_scope_mut().set_termination_reason(reason);
                    break;
                }

                let step = phase_scope.increment_step_count();
                let taken = self.step(&mut phase_scope, &selector, last_step_score);
                if let Some((m, score)) = taken {
                    last_step_score = score;
                    trace!(event = "step", step = step, candidate = ?m, score = %score, accepted = true);
                    phase_scope.update_best_solution();
                }
                self.acceptor
                    .step_ended(taken.as_ref().map(|(m, _)| m), last_step_score);
                phase_scope
                    .solver_scope_mut()
                    .statistics_mut()
                    .step_scores
                    .push(last_step_score);

                if step % PROGRESS_INTERVAL == 0 {
                    let best = phase_scope.solver_scope().best_score().unwrap_or(last_step_score);
                    debug!(
                        event = "progress",
                        steps = step,
                        speed = speed(step, phase_scope.elapsed()),
                        score = %best,
                    );
                }
            }
            self.acceptor.phase_ended();
        }

        let best_score = phase_scope
            .solver_scope()
            .best_score()
            .map(|s| format!("{s}"))
            .unwrap_or_else(|| "none".to_string());
        let duration = phase_scope.elapsed();
        let steps = phase_scope.step_count();
        info!(
            event = "phase_end",
            phase = "Local Search",
            phase_index = phase_index,
            duration_ms = duration.as_millis() as u64,
            steps = steps,
            speed = speed(steps, duration),
            score = best_score,
        );
        phase_scope.finish();
    }

    fn phase_type_name(&self) -> &'static str {
        "LocalSearch"
    }
}

//! Greedy construction.

use guardia_core::{HardSoftScore, ShiftId};
use guardia_scoring::is_eligible;
use tracing::{debug, info, trace};

use crate::phase::{speed, Phase};
use crate::scope::{PhaseScope, SolverScope};

/// Fills open shifts one at a time, best fit first.
///
/// Shifts are visited by day, then type. Each open, unpinned shift goes to
/// the eligible doctor whose assignment yields the best score; ties go to
/// the doctor holding fewer shifts, then to the lower index. Shifts with no
/// eligible doctor stay open.
#[derive(Debug, Clone, Default)]
pub struct ConstructionPhase {
    phase_index: usize,
}

impl ConstructionPhase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_phase_index(mut self, phase_index: usize) -> Self {
        self.phase_index = phase_index;
        self
    }
}

impl Phase for ConstructionPhase {
    fn solve(&mut self, solver_scope: &mut SolverScope) {
        let phase_index = self.phase_index;
        let mut phase_scope = PhaseScope::new(solver_scope, phase_index, self.phase_type_name());

        info!(
            event = "phase_start",
            phase = "Construction Heuristic",
            phase_index = phase_index,
        );

        let order: Vec<ShiftId> = {
            let solution = phase_scope.solver_scope().working_solution();
            let mut order: Vec<ShiftId> = solution
                .assignments()
                .iter()
                .filter(|a| a.is_open() && !a.pinned)
                .map(|a| a.shift)
                .collect();
            order.sort_by_key(|&id| {
                let shift = solution.shift(id);
                (shift.day, shift.shift_type, id)
            });
            order
        };

        let mut unfilled = 0usize;
        for shift_id in order {
            if phase_scope.solver_scope().is_terminate_early() {
                break;
            }
            phase_scope.increment_step_count();

            match best_fit(&mut phase_scope, shift_id) {
                Some((doctor, score)) => {
                    phase_scope
                        .solver_scope_mut()
                        .score_director_mut()
                        .assign(shift_id, Some(doctor));
                    phase_scope.record_accepted();
                    trace!(event = "step", shift = shift_id, doctor = doctor, score = %score);
                }
                None => {
                    unfilled += 1;
                    debug!(event = "unfilled", shift = shift_id);
                }
            }
        }

        phase_scope.update_best_solution();

        let best_score = phase_scope
            .solver_scope()
            .best_score()
            .map(|s| format!("{s}"))
            .unwrap_or_else(|| "none".to_string());
        let duration = phase_scope.elapsed();
        let steps = phase_scope.step_count();
        info!(
            event = "phase_end",
            phase = "Construction Heuristic",
            phase_index = phase_index,
            duration_ms = duration.as_millis() as u64,
            steps = steps,
            speed = speed(steps, duration),
            unfilled = unfilled,
            score = best_score,
        );
        phase_scope.finish();
    }

    fn phase_type_name(&self) -> &'static str {
        "Construction"
    }
}

/// Tries every eligible doctor on `shift_id` and leaves the shift open again.
fn best_fit(phase_scope: &mut PhaseScope<'_>, shift_id: ShiftId) -> Option<(usize, HardSoftScore)> {
    let candidates: Vec<(usize, usize)> = {
        let solution = phase_scope.solver_scope().working_solution();
        let shift = solution.shift(shift_id);
        (0..solution.doctors().len())
            .filter(|&d| is_eligible(solution, d, shift))
            .map(|d| (d, solution.assigned_count(d)))
            .collect()
    };

    let mut best: Option<(usize, usize, HardSoftScore)> = None;
    let director = phase_scope.solver_scope_mut().score_director_mut();
    for &(doctor, load) in &candidates {
        director.assign(shift_id, Some(doctor));
        let score = director.calculate_score();
        director.assign(shift_id, None);

        let better = match best {
            None => true,
            Some((_, best_load, best_score)) => {
                score > best_score || (score == best_score && load < best_load)
            }
        };
        if better {
            best = Some((doctor, load, score));
        }
    }
    phase_scope.record_evaluated(candidates.len() as u64);
    best.map(|(doctor, _, score)| (doctor, score))
}

#[cfg(test)]
mod tests;

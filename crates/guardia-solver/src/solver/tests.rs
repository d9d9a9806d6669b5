use guardia_config::{SolverConfig, TerminationConfig};
use guardia_core::ShiftType;
use guardia_scoring::ConstraintSet;
use guardia_test::{january_2026, quota_doctors, weekday_calendar, SolutionBuilder};

use super::*;
use crate::test_utils::small_solution;

fn config(steps: u64) -> SolverConfig {
    SolverConfig::new().with_termination(TerminationConfig::steps(steps))
}

#[test]
fn test_solve_small_problem() {
    let result = Solver::new(&config(300)).solve(small_solution(), 42);

    assert!(result.is_feasible(), "got {}", result.score);
    assert_eq!(result.solution.open_count(), 0);
    assert_eq!(result.solution.score, Some(result.score));
    assert_eq!(result.score, ConstraintSet::default().score(&result.solution));
    assert_eq!(result.termination, TerminationReason::StepLimit);

    let phases = &result.statistics.phase_statistics;
    assert_eq!(phases.len(), 2);
    assert_eq!(phases[0].phase_type, "Construction");
    assert_eq!(phases[1].phase_type, "LocalSearch");
    assert_eq!(phases[1].step_count, 300);
    assert!(!result.statistics.hard_regressed());
    assert!(result.statistics.first_feasible_step().is_some());
    assert!(phases[0].gain().unwrap().hard() >= 0);
}

#[test]
fn test_same_seed_same_schedule() {
    let doctors = |s: &ScheduleSolution| -> Vec<Option<usize>> {
        s.assignments().iter().map(|a| a.doctor).collect()
    };
    let solver = Solver::new(&config(200));
    let a = solver.solve(small_solution(), 7);
    let b = solver.solve(small_solution(), 7);

    assert_eq!(doctors(&a.solution), doctors(&b.solution));
    assert_eq!(a.score, b.score);
}

#[test]
fn test_pinned_assignments_survive() {
    let solution = SolutionBuilder::new(weekday_calendar(january_2026()))
        .doctors(quota_doctors(3, 0, 10, 0))
        .pinned(1, ShiftType::Cycle, 2)
        .pinned(1, ShiftType::Afternoon, 2)
        .shift(2, ShiftType::Cycle, None)
        .shift(2, ShiftType::Afternoon, None)
        .build();
    let result = Solver::new(&config(100)).solve(solution, 1);

    assert_eq!(result.solution.doctor_of(0), Some(2));
    assert_eq!(result.solution.doctor_of(1), Some(2));
    assert!(result.solution.assignment(0).pinned);
    assert_eq!(result.solution.open_count(), 0);
}

#[test]
fn test_cancelled_before_start() {
    let solver = Solver::new(&config(1_000));
    solver.terminate_early();
    let result = solver.solve(small_solution(), 3);

    assert_eq!(result.termination, TerminationReason::Cancelled);
    assert_eq!(result.solution.open_count(), 10);
    assert_eq!(result.statistics.phase_statistics.len(), 1);
}

#[test]
fn test_stalls_once_feasible() {
    let budget = TerminationConfig::steps(100_000).with_unimproved_step_count_limit(50);
    let result = Solver::new(&config(0))
        .with_termination(budget)
        .solve(small_solution(), 11);

    assert_eq!(result.termination, TerminationReason::Stalled);
    assert!(result.is_feasible());
    assert!(result.statistics.total_step_count < 100_000);
}

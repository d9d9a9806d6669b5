use guardia_core::{Score, ShiftType};
use guardia_test::{january_2026, quota_doctors, weekday_calendar, SolutionBuilder};

use super::*;
use crate::test_utils::{create_scope, create_test_scope};

#[test]
fn test_construction_fills_every_shift() {
    let mut scope = create_test_scope();
    ConstructionPhase::new().solve(&mut scope);

    let solution = scope.best_solution().expect("best recorded");
    assert_eq!(solution.open_count(), 0);
    assert!(scope.best_score().unwrap().is_feasible());
    assert_eq!(scope.total_step_count(), 10);

    let stats = &scope.statistics().phase_statistics[0];
    assert_eq!(stats.phase_type, "Construction");
    assert_eq!(stats.moves_accepted, 10);
    assert_eq!(stats.moves_evaluated, 30);
}

#[test]
fn test_construction_ties_go_to_lightest_then_lowest_index() {
    let solution = SolutionBuilder::new(weekday_calendar(january_2026()))
        .doctors(quota_doctors(2, 0, 5, 0))
        .shift(1, ShiftType::Afternoon, None)
        .build();
    let mut scope = create_scope(solution);
    ConstructionPhase::new().solve(&mut scope);

    assert_eq!(scope.working_solution().doctor_of(0), Some(0));
}

#[test]
fn test_construction_spreads_load() {
    let solution = SolutionBuilder::new(weekday_calendar(january_2026()))
        .doctors(quota_doctors(2, 0, 5, 0))
        .shift(1, ShiftType::Afternoon, None)
        .shift(2, ShiftType::Afternoon, None)
        .build();
    let mut scope = create_scope(solution);
    ConstructionPhase::new().solve(&mut scope);

    let working = scope.working_solution();
    assert_ne!(working.doctor_of(0), working.doctor_of(1));
}

#[test]
fn test_construction_keeps_pinned_and_leaves_impossible_open() {
    let mut doctors = quota_doctors(2, 0, 5, 0);
    for d in &mut doctors {
        d.quota = d.quota.clone().map(|q| q.with_cycle_shifts(false));
    }
    let solution = SolutionBuilder::new(weekday_calendar(january_2026()))
        .doctors(doctors)
        .pinned(1, ShiftType::Afternoon, 1)
        .shift(2, ShiftType::Cycle, None)
        .build();
    let mut scope = create_scope(solution);
    ConstructionPhase::new().solve(&mut scope);

    let working = scope.working_solution();
    assert_eq!(working.doctor_of(0), Some(1));
    assert!(working.assignment(0).pinned);
    assert_eq!(working.doctor_of(1), None);
    assert_eq!(scope.best_score().unwrap().hard(), -100);
}

#[test]
fn test_construction_stops_when_cancelled() {
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;

    let mut scope = create_test_scope();
    scope.set_terminate_early_flag(Arc::new(AtomicBool::new(true)));
    ConstructionPhase::new().solve(&mut scope);

    assert_eq!(scope.working_solution().open_count(), 10);
}

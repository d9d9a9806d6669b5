use guardia_core::ShiftType;
use guardia_scoring::{ConstraintSet, ScoreDirector};
use guardia_test::{january_2026, quota_doctors, weekday_calendar, SolutionBuilder};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::*;
use crate::test_utils::small_solution;

#[test]
fn test_swap_is_normalized() {
    assert_eq!(Move::swap(5, 2), Move::swap(2, 5));
    assert_eq!(Move::swap(5, 2).undo(), Move::swap(2, 5));
}

#[test]
fn test_change_undo_restores() {
    let mut director = ScoreDirector::new(small_solution(), ConstraintSet::default());
    director.assign(0, Some(0));
    let before = director.calculate_score();

    let m = Move::change(0, Some(0), Some(2));
    assert!(m.is_doable(director.working_solution()));
    m.apply(&mut director);
    assert_eq!(director.working_solution().doctor_of(0), Some(2));

    m.undo().apply(&mut director);
    assert_eq!(director.working_solution().doctor_of(0), Some(0));
    assert_eq!(director.calculate_score(), before);
}

#[test]
fn test_swap_exchanges_doctors() {
    let mut director = ScoreDirector::new(small_solution(), ConstraintSet::default());
    director.assign(0, Some(0));
    director.assign(3, Some(1));

    let m = Move::swap(0, 3);
    m.apply(&mut director);
    assert_eq!(director.working_solution().doctor_of(0), Some(1));
    assert_eq!(director.working_solution().doctor_of(3), Some(0));

    m.undo().apply(&mut director);
    assert_eq!(director.working_solution().doctor_of(0), Some(0));
    assert_eq!(director.working_solution().doctor_of(3), Some(1));
}

#[test]
fn test_pinned_and_noop_moves_not_doable() {
    let solution = SolutionBuilder::new(weekday_calendar(january_2026()))
        .doctors(quota_doctors(2, 0, 5, 0))
        .pinned(1, ShiftType::Cycle, 0)
        .shift(1, ShiftType::Afternoon, Some(0))
        .shift(2, ShiftType::Afternoon, Some(0))
        .build();

    assert!(!Move::change(0, Some(0), Some(1)).is_doable(&solution));
    assert!(!Move::change(1, Some(0), Some(0)).is_doable(&solution));
    assert!(!Move::change(1, Some(1), Some(0)).is_doable(&solution));
    assert!(!Move::swap(0, 1).is_doable(&solution));
    assert!(!Move::swap(1, 2).is_doable(&solution), "same doctor on both");
    assert!(Move::change(1, Some(0), Some(1)).is_doable(&solution));
}

#[test]
fn test_selector_skips_pinned_and_ineligible() {
    let mut doctors = quota_doctors(3, 0, 5, 0);
    doctors[2].quota = doctors[2].quota.clone().map(|q| q.with_cycle_shifts(false));
    let solution = SolutionBuilder::new(weekday_calendar(january_2026()))
        .doctors(doctors)
        .pinned(1, ShiftType::Cycle, 0)
        .shift(2, ShiftType::Cycle, Some(1))
        .shift(2, ShiftType::Afternoon, Some(2))
        .build();

    let selector = MoveSelector::new(&solution, 16, 0.5);
    assert_eq!(selector.movable_shifts(), &[1, 2]);
    assert_eq!(selector.eligible_doctors(1), &[0, 1]);
    assert_eq!(selector.eligible_doctors(2), &[0, 1, 2]);

    let mut rng = ChaCha8Rng::seed_from_u64(1);
    for _ in 0..20 {
        for m in selector.sample(&solution, &mut rng) {
            assert!(m.is_doable(&solution));
            match m {
                Move::Change { shift, to, .. } => {
                    assert_ne!(shift, 0);
                    if shift == 1 {
                        assert_ne!(to, Some(2));
                    }
                }
                // Doctor 2 cannot take the cycle shift.
                Move::Swap { left, right } => panic!("unexpected swap {left}<->{right}"),
            }
        }
    }
}

#[test]
fn test_selector_is_deterministic() {
    let solution = small_solution();
    let selector = MoveSelector::new(&solution, 8, 0.3);
    let a = selector.sample(&solution, &mut ChaCha8Rng::seed_from_u64(9));
    let b = selector.sample(&solution, &mut ChaCha8Rng::seed_from_u64(9));
    assert_eq!(a, b);
    assert!(!a.is_empty());
}

#[test]
fn test_selector_with_everything_pinned() {
    let solution = SolutionBuilder::new(weekday_calendar(january_2026()))
        .doctors(quota_doctors(1, 0, 5, 0))
        .pinned(1, ShiftType::Afternoon, 0)
        .build();
    let selector = MoveSelector::new(&solution, 8, 0.5);
    assert!(selector.movable_shifts().is_empty());
    assert!(selector
        .sample(&solution, &mut ChaCha8Rng::seed_from_u64(0))
        .is_empty());
}

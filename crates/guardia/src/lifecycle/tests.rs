use guardia_core::{GuardiaError, Period, Schedule, ScheduleStatus, ShiftType};
use guardia_test::{january_2026, quota_doctors, weekday_calendar, SolutionBuilder};

use super::*;

fn solved() -> ScheduleSolution {
    SolutionBuilder::new(weekday_calendar(january_2026()))
        .doctors(quota_doctors(1, 0, 5, 0))
        .shift(1, ShiftType::Afternoon, Some(0))
        .build()
}

fn generating() -> Schedule {
    let mut schedule = Schedule::new(january_2026());
    schedule.begin_generation().unwrap();
    schedule
}

#[test]
fn test_second_permit_for_same_period_is_rejected() {
    let lifecycle = ScheduleLifecycle::new();
    let period = january_2026();
    let permit = lifecycle.acquire(period).unwrap();

    let err = lifecycle.acquire(period).unwrap_err();
    assert_eq!(err, GuardiaError::ConcurrentGeneration(period));

    let other = Period::new(2, 2026).unwrap();
    assert!(lifecycle.acquire(other).is_ok());

    drop(permit);
    assert!(!lifecycle.is_generating(period));
    assert!(lifecycle.acquire(period).is_ok());
}

#[test]
fn test_clones_share_registry() {
    let lifecycle = ScheduleLifecycle::new();
    let _permit = lifecycle.acquire(january_2026()).unwrap();
    let clone = lifecycle.clone();
    assert!(clone.is_generating(january_2026()));
    assert_eq!(clone.generating(), vec![january_2026()]);
}

#[test]
fn test_cancel_raises_permit_flag() {
    let lifecycle = ScheduleLifecycle::new();
    assert!(!lifecycle.cancel(january_2026()));

    let permit = lifecycle.acquire(january_2026()).unwrap();
    assert!(!permit.is_cancelled());
    assert!(lifecycle.cancel(january_2026()));
    assert!(permit.is_cancelled());
    assert!(permit.cancel_flag().load(Ordering::SeqCst));
}

#[test]
fn test_confirmed_schedule_is_not_regenerable() {
    let mut schedule = generating();
    schedule.complete(solved(), None).unwrap();
    assert!(ScheduleLifecycle::check_regenerable(Some(&schedule)).is_ok());

    schedule.confirm().unwrap();
    let err = ScheduleLifecycle::check_regenerable(Some(&schedule)).unwrap_err();
    assert!(matches!(err, GuardiaError::InvalidState(_)));
    assert!(ScheduleLifecycle::check_regenerable(None).is_ok());
}

#[test]
fn test_settle_success_with_warning() {
    let mut schedule = generating();
    ScheduleLifecycle::settle(&mut schedule, || {
        Ok((solved(), Some(GuardiaError::BudgetExhausted { hard: -100 })))
    })
    .unwrap();

    assert_eq!(schedule.status(), ScheduleStatus::PendingConfirmation);
    assert_eq!(schedule.assignments().len(), 1);
    assert_eq!(
        schedule.warning(),
        Some(&GuardiaError::BudgetExhausted { hard: -100 })
    );
}

#[test]
fn test_settle_contains_errors_and_panics() {
    let mut schedule = generating();
    ScheduleLifecycle::settle(&mut schedule, || {
        Err(GuardiaError::Internal("lost the roster".into()))
    })
    .unwrap();
    assert_eq!(schedule.status(), ScheduleStatus::GenerationError);
    assert!(schedule.assignments().is_empty());

    let mut schedule = generating();
    ScheduleLifecycle::settle(&mut schedule, || panic!("move index out of range")).unwrap();
    assert_eq!(schedule.status(), ScheduleStatus::GenerationError);
    match schedule.error() {
        Some(GuardiaError::Internal(msg)) => assert!(msg.contains("move index out of range")),
        other => panic!("unexpected error {:?}", other),
    }
}

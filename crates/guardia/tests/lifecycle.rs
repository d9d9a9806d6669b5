//! Lifecycle rules across generations of one period.

use std::sync::Arc;

use guardia::prelude::*;
use guardia::repository::InMemoryRepository;
use guardia_test::{january_2026, uniform_roster, weekday_calendar};

fn service(termination: TerminationConfig) -> (ScheduleService, Arc<InMemoryRepository>) {
    guardia::telemetry::init_test_tracing();
    let repository = Arc::new(InMemoryRepository::new());
    repository.insert_calendar(weekday_calendar(january_2026()));
    for doctor in uniform_roster(2) {
        repository.upsert_doctor(doctor);
    }
    let config = SolverConfig::new().with_termination(termination);
    (ScheduleService::in_memory(config, repository.clone()), repository)
}

#[test]
fn confirmed_period_cannot_be_regenerated() {
    let (service, repository) = service(TerminationConfig::steps(50));
    service.generate_schedule(1, 2026, 1, None).unwrap();
    service.confirm_schedule(1, 2026).unwrap();
    let persisted = repository.persist_count();

    let err = service.generate_schedule(1, 2026, 1, None).unwrap_err();
    assert!(matches!(err, GuardiaError::InvalidState(_)));
    assert_eq!(repository.persist_count(), persisted);
    assert_eq!(
        repository.schedule(january_2026()).unwrap().status(),
        ScheduleStatus::Confirmed
    );
}

#[test]
fn running_period_rejects_second_generation() {
    let (service, _) = service(TerminationConfig::steps(50));
    let _permit = service.lifecycle().acquire(january_2026()).unwrap();

    let err = service.generate_schedule(1, 2026, 1, None).unwrap_err();
    assert_eq!(err, GuardiaError::ConcurrentGeneration(january_2026()));
}

#[test]
fn regeneration_replaces_pending_schedule_and_keeps_pins() {
    let (service, repository) = service(TerminationConfig::steps(50));
    let first = service.generate_schedule(1, 2026, 1, None).unwrap();
    assert_eq!(first.status(), ScheduleStatus::PendingConfirmation);

    let second = service.generate_schedule(1, 2026, 2, None).unwrap();
    assert_eq!(second.status(), ScheduleStatus::PendingConfirmation);
    assert_eq!(repository.schedule(january_2026()), Some(second.clone()));

    // Every cycle slot remembers who held it in the first run.
    let solution = second.solution().unwrap();
    let remembered = solution
        .assignments()
        .iter()
        .filter(|a| solution.shift(a.shift).shift_type == ShiftType::Cycle)
        .all(|a| a.previous_doctor.is_some());
    assert!(remembered);
}

#[test]
fn unfinished_budget_is_a_warning() {
    // Nobody takes cycle shifts, so they stay open whatever the budget.
    guardia::telemetry::init_test_tracing();
    let repository = Arc::new(InMemoryRepository::new());
    repository.insert_calendar(weekday_calendar(january_2026()));
    for mut doctor in uniform_roster(2) {
        doctor.quota = doctor.quota.map(|q| q.with_cycle_shifts(false));
        repository.upsert_doctor(doctor);
    }
    let config = SolverConfig::new().with_termination(TerminationConfig::steps(50));
    let service = ScheduleService::in_memory(config, repository.clone());

    let schedule = service.generate_schedule(1, 2026, 3, None).unwrap();

    assert_eq!(schedule.status(), ScheduleStatus::PendingConfirmation);
    let score = schedule.score().expect("scored schedule");
    assert!(score.hard() < 0, "got {}", score);
    assert_eq!(
        schedule.warning(),
        Some(&GuardiaError::BudgetExhausted { hard: score.hard() })
    );
    assert!(schedule.warning().is_some_and(GuardiaError::is_warning));
    assert_eq!(repository.schedule(january_2026()), Some(schedule.clone()));

    let confirmed = service.confirm_schedule(1, 2026).unwrap();
    assert_eq!(confirmed.warning(), schedule.warning());
}

#[tokio::test]
async fn spawned_generation_holds_the_period_until_done() {
    let (service, _) = service(TerminationConfig::steps(5_000_000));
    let handle = service.spawn_generation(1, 2026, 9, None).unwrap();

    assert!(matches!(
        service.spawn_generation(1, 2026, 9, None),
        Err(GuardiaError::ConcurrentGeneration(_))
    ));
    assert!(service.cancel_generation(1, 2026).unwrap());

    let schedule = handle.await.unwrap().unwrap();
    assert_eq!(schedule.status(), ScheduleStatus::PendingConfirmation);
    assert!(!service.lifecycle().is_generating(january_2026()));

    let confirmed = service.confirm_schedule(1, 2026).unwrap();
    assert_eq!(confirmed.status(), ScheduleStatus::Confirmed);
}

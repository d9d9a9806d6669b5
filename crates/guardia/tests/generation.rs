//! End-to-end generation properties.

use std::collections::HashSet;
use std::sync::Arc;

use guardia::prelude::*;
use guardia::repository::InMemoryRepository;
use guardia::{ProblemBuilder, Solver};
use guardia_test::{date, january_2026, uniform_roster, weekday_calendar};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const STEPS: u64 = 200;

fn config() -> SolverConfig {
    SolverConfig::new().with_termination(TerminationConfig::steps(STEPS))
}

fn repository(doctors: Vec<Doctor>) -> Arc<InMemoryRepository> {
    guardia::telemetry::init_test_tracing();
    let repository = Arc::new(InMemoryRepository::new());
    repository.insert_calendar(weekday_calendar(january_2026()));
    for doctor in doctors {
        repository.upsert_doctor(doctor);
    }
    repository
}

fn generate(doctors: Vec<Doctor>, seed: u64) -> Schedule {
    let service = ScheduleService::in_memory(config(), repository(doctors));
    service.generate_schedule(1, 2026, seed, None).unwrap()
}

fn afternoon_count(schedule: &Schedule) -> usize {
    let solution = schedule.solution().unwrap();
    schedule
        .assignments()
        .iter()
        .filter(|a| solution.shift(a.shift).shift_type == ShiftType::Afternoon)
        .count()
}

#[test]
fn every_shift_has_exactly_one_assignment() {
    let schedule = generate(uniform_roster(1), 1);
    let solution = schedule.solution().unwrap();

    assert_eq!(solution.assignments().len(), solution.shifts().len());
    let covered: HashSet<usize> = solution.assignments().iter().map(|a| a.shift).collect();
    assert_eq!(covered.len(), solution.shifts().len());
}

#[test]
fn afternoons_follow_capacity_when_demand_is_low() {
    // 22 working days x 2 = 44 >= 10 doctors x 1
    let schedule = generate(uniform_roster(1), 1);
    assert_eq!(afternoon_count(&schedule), 44);
}

#[test]
fn afternoons_expand_to_meet_demand() {
    // 10 doctors x 5 = 50 > 44
    let schedule = generate(uniform_roster(5), 1);
    assert_eq!(afternoon_count(&schedule), 50);
}

#[test]
fn same_seed_same_schedule() {
    let a = generate(uniform_roster(3), 77);
    let b = generate(uniform_roster(3), 77);
    assert_eq!(a.assignments(), b.assignments());
    assert_eq!(a.score(), b.score());
}

#[test]
fn non_cycle_doctors_never_hold_cycle_shifts() {
    let mut doctors = uniform_roster(2);
    for doctor in doctors.iter_mut().take(3) {
        doctor.quota = doctor.quota.clone().map(|q| q.with_cycle_shifts(false));
    }
    let schedule = generate(doctors, 5);

    for day in schedule.days() {
        for id in &day.cycle {
            assert!(*id > 3, "doctor {} holds a cycle shift on {}", id, day.date);
        }
    }
}

#[test]
fn fully_absent_doctor_gets_nothing() {
    let mut doctors = uniform_roster(2);
    doctors[0] = doctors[0]
        .clone()
        .with_absence(Absence::new(date(2026, 1, 1), date(2026, 1, 31)).unwrap());
    let schedule = generate(doctors, 8);

    for day in schedule.days() {
        assert!(!day.cycle.contains(&1));
        assert!(!day.afternoon.contains(&1));
        assert!(!day.consultations.contains(&1));
    }
}

#[test]
fn hard_score_never_regresses_during_search() {
    let mut rng = ChaCha8Rng::seed_from_u64(13);
    let problem = ProblemBuilder::new(weekday_calendar(january_2026()), uniform_roster(5))
        .build(&mut rng)
        .unwrap();
    let result = Solver::new(&config()).solve_with_rng(problem, rng);

    let constructed = result.statistics.phase_statistics[0]
        .ending_score
        .expect("construction score");
    let mut hard = constructed.hard();
    for score in &result.statistics.step_scores {
        assert!(score.hard() >= hard, "hard regressed from {} to {}", hard, score.hard());
        hard = score.hard();
    }
    assert!(result.score >= constructed);
}

#[test]
fn per_day_view_matches_assignments() {
    let schedule = generate(uniform_roster(1), 2);
    let days = schedule.days();
    assert_eq!(days.len(), 31);

    let assigned = schedule
        .assignments()
        .iter()
        .filter(|a| a.doctor.is_some())
        .count();
    let listed: usize = days
        .iter()
        .map(|d| d.cycle.len() + d.afternoon.len() + d.consultations.len())
        .sum();
    assert_eq!(assigned, listed);
    for day in days.iter().filter(|d| !d.is_working_day) {
        assert!(day.afternoon.is_empty());
        assert!(day.consultations.is_empty());
    }
}

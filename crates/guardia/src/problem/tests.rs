use guardia_core::{
    Absence, CalendarModel, DoctorStatus, GuardiaError, ScheduleSolution, ShiftAssignment,
    ShiftQuota, ShiftType,
};
use guardia_test::{date, doctor, january_2026, quota_doctors, uniform_roster, weekday_calendar};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::*;

fn rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

fn count_of(solution: &ScheduleSolution, shift_type: ShiftType) -> usize {
    solution.shifts_of_type(shift_type).count()
}

#[test]
fn test_demand_below_capacity_keeps_baseline() {
    let calendar = weekday_calendar(january_2026());
    let doctors = uniform_roster(1);
    let analysis = DemandAnalyzer::new(&calendar, &doctors).analyze(&mut rng(1));

    assert_eq!(analysis.base_capacity(), 44);
    assert_eq!(analysis.demand(), 10);
    assert_eq!(analysis.deficit(), 0);
    assert_eq!(analysis.total(), 44);
    for (idx, day) in calendar.days().iter().enumerate() {
        let expected = if day.is_working_day { 2 } else { 0 };
        assert_eq!(analysis.afternoons_on(idx), expected, "day {}", idx + 1);
    }
}

#[test]
fn test_demand_above_capacity_expands_one_per_pass() {
    let calendar = weekday_calendar(january_2026());
    let doctors = uniform_roster(5);
    let analysis = DemandAnalyzer::new(&calendar, &doctors).analyze(&mut rng(1));

    assert_eq!(analysis.demand(), 50);
    assert_eq!(analysis.deficit(), 6);
    assert_eq!(analysis.total(), 50);
    let expanded = analysis.per_day().iter().filter(|&&c| c == 3).count();
    assert_eq!(expanded, 6);
    assert!(analysis.per_day().iter().all(|&c| c <= 3));
}

#[test]
fn test_demand_spreads_evenly_over_several_passes() {
    let calendar = weekday_calendar(january_2026());
    let doctors = quota_doctors(10, 10, 10, 0);
    let analysis = DemandAnalyzer::new(&calendar, &doctors).analyze(&mut rng(3));

    assert_eq!(analysis.total(), 100);
    let working: Vec<u32> = calendar
        .working_days()
        .map(|(idx, _)| analysis.afternoons_on(idx))
        .collect();
    let (min, max) = (working.iter().min().unwrap(), working.iter().max().unwrap());
    assert_eq!((*min, *max), (4, 5));
}

#[test]
fn test_demand_ignores_doctors_whose_quota_does_not_apply() {
    let period = january_2026();
    let calendar = weekday_calendar(period);
    let mut doctors = uniform_roster(5);
    doctors[0] = doctors[0].clone().with_status(DoctorStatus::Deleted);
    doctors[1] = doctors[1]
        .clone()
        .with_absence(Absence::new(date(2025, 12, 20), date(2026, 2, 5)).unwrap());
    doctors[2].quota = None;

    let analyzer = DemandAnalyzer::new(&calendar, &doctors);
    assert_eq!(analyzer.demand(), 35);
}

#[test]
fn test_demand_is_seed_deterministic() {
    let calendar = weekday_calendar(january_2026());
    let doctors = uniform_roster(5);
    let analyzer = DemandAnalyzer::new(&calendar, &doctors);
    assert_eq!(analyzer.analyze(&mut rng(9)), analyzer.analyze(&mut rng(9)));
}

#[test]
fn test_builder_lays_out_every_shift_type() {
    let calendar = weekday_calendar(january_2026());
    let solution = ProblemBuilder::new(calendar, uniform_roster(5))
        .build(&mut rng(5))
        .unwrap();

    assert_eq!(count_of(&solution, ShiftType::Cycle), 62);
    assert_eq!(count_of(&solution, ShiftType::Afternoon), 50);
    assert_eq!(count_of(&solution, ShiftType::Consultation), 20);
    assert_eq!(solution.open_count(), solution.shifts().len());
    assert!(solution.assignments().iter().all(|a| !a.pinned));

    for shift in solution.shifts_of_type(ShiftType::Consultation) {
        assert!(solution.day(shift.day).is_working_day);
    }
    for (id, shift) in solution.shifts().iter().enumerate() {
        assert_eq!(shift.id, id);
        assert_eq!(solution.assignment(id).shift, id);
    }
}

#[test]
fn test_builder_consultations_round_robin() {
    // 30 consultations over 22 working days: every day gets one, 8 get two.
    let calendar = weekday_calendar(january_2026());
    let solution = ProblemBuilder::new(calendar, quota_doctors(10, 1, 10, 3))
        .build(&mut rng(2))
        .unwrap();

    let mut per_day = vec![0u32; solution.days().len()];
    for shift in solution.shifts_of_type(ShiftType::Consultation) {
        per_day[shift.day] += 1;
        assert_eq!(shift.ordinal, per_day[shift.day] - 1);
    }
    let working: Vec<u32> = solution
        .calendar()
        .working_days()
        .map(|(idx, _)| per_day[idx])
        .collect();
    assert_eq!(working.iter().filter(|&&c| c == 2).count(), 8);
    assert!(working.iter().all(|&c| c == 1 || c == 2));
}

#[test]
fn test_builder_honours_cycle_shifts_per_day() {
    let calendar = weekday_calendar(january_2026());
    let solution = ProblemBuilder::new(calendar, uniform_roster(1))
        .with_cycle_shifts_per_day(1)
        .build(&mut rng(5))
        .unwrap();
    assert_eq!(count_of(&solution, ShiftType::Cycle), 31);
}

#[test]
fn test_builder_rejects_month_without_working_days() {
    let holidays: Vec<u32> = (1..=31).collect();
    let calendar = weekday_calendar(january_2026()).with_holidays(&holidays).unwrap();
    let err = ProblemBuilder::new(calendar, uniform_roster(1))
        .build(&mut rng(0))
        .unwrap_err();
    assert!(matches!(err, GuardiaError::InsufficientData(_)));
}

#[test]
fn test_builder_rejects_roster_without_quotas() {
    let calendar = weekday_calendar(january_2026());
    let mut doctors = uniform_roster(1);
    doctors.truncate(1);
    doctors[0].quota = None;
    let err = ProblemBuilder::new(calendar, doctors)
        .build(&mut rng(0))
        .unwrap_err();
    assert!(matches!(err, GuardiaError::InsufficientData(_)));
}

#[test]
fn test_builder_rejects_invalid_quota() {
    let calendar = weekday_calendar(january_2026());
    let doctors = vec![doctor(1, ShiftQuota::new(6, 2, 0))];
    let err = ProblemBuilder::new(calendar, doctors)
        .build(&mut rng(0))
        .unwrap_err();
    assert!(matches!(err, GuardiaError::InvalidData(_)));
}

#[test]
fn test_builder_drops_deleted_doctors_and_sorts_by_id() {
    let calendar = weekday_calendar(january_2026());
    let mut doctors = uniform_roster(1);
    doctors.reverse();
    doctors[0] = doctors[0].clone().with_status(DoctorStatus::Deleted);
    let solution = ProblemBuilder::new(calendar, doctors)
        .build(&mut rng(0))
        .unwrap();

    let ids: Vec<u64> = solution.doctors().iter().map(|d| d.id).collect();
    assert_eq!(ids, (1..=9).collect::<Vec<_>>());
}

#[test]
fn test_builder_carries_over_prior_assignments() {
    let calendar: CalendarModel = weekday_calendar(january_2026());
    let first = ProblemBuilder::new(calendar.clone(), uniform_roster(1))
        .build(&mut rng(1))
        .unwrap();

    // Pin doctor id 3 on the first cycle of day 1, remember id 4 on the second.
    let mut assignments: Vec<ShiftAssignment> = first.assignments().to_vec();
    assignments[0] = ShiftAssignment::pinned(0, 2);
    assignments[1].doctor = Some(3);
    let prior = ScheduleSolution::new(
        first.calendar().clone(),
        first.doctors().to_vec(),
        first.shifts().to_vec(),
        assignments,
    )
    .unwrap();

    let second = ProblemBuilder::new(calendar, uniform_roster(1))
        .with_prior(Some(&prior))
        .build(&mut rng(2))
        .unwrap();

    let a0 = second.assignment(0);
    assert!(a0.pinned);
    assert_eq!(a0.doctor, Some(2));
    let a1 = second.assignment(1);
    assert!(!a1.pinned);
    assert_eq!(a1.doctor, None);
    assert_eq!(a1.previous_doctor, Some(3));
    assert_eq!(second.assignments().iter().filter(|a| a.pinned).count(), 1);
}

use chrono::Weekday;
use guardia_config::ConstraintWeights;
use guardia_core::{HardSoftScore, ShiftQuota, ShiftType};
use guardia_test::{doctor, january_2026, quota_doctors, weekday_calendar, SolutionBuilder};

use super::*;

fn one_open_shift() -> guardia_core::ScheduleSolution {
    SolutionBuilder::new(weekday_calendar(january_2026()))
        .doctors(quota_doctors(2, 0, 10, 0))
        .shift(1, ShiftType::Cycle, Some(0))
        .shift(1, ShiftType::Afternoon, None)
        .build()
}

#[test]
fn test_score_sums_weighted_rules() {
    let set = ConstraintSet::default();
    // coverage: one open shift; fairness: cycle counts 1 and 0
    assert_eq!(set.score(&one_open_shift()), HardSoftScore::of(-100, -10));
}

#[test]
fn test_explain_matches_score() {
    let set = ConstraintSet::default();
    let solution = one_open_shift();
    let explanation = set.explain(&solution);
    assert_eq!(explanation.score, set.score(&solution));
    assert_eq!(explanation.non_zero_constraints().len(), 2);
    assert_eq!(explanation.total_match_count(), 2);

    let coverage = explanation.get("coverage").unwrap();
    assert!(coverage.is_hard);
    assert_eq!(coverage.match_count, 1);
    assert_eq!(coverage.score, HardSoftScore::of_hard(-100));
    assert!(explanation.to_string().starts_with("-100hard/-10soft"));
}

#[test]
fn test_zero_weight_disables_rule() {
    let weights = ConstraintWeights {
        fairness: HardSoftScore::ZERO,
        ..ConstraintWeights::default()
    };
    let set = ConstraintSet::new(&weights, 3);
    assert_eq!(set.rules().len(), 17);
    assert_eq!(set.score(&one_open_shift()), HardSoftScore::of_hard(-100));
}

#[test]
fn test_rewards_raise_score() {
    let solution = SolutionBuilder::new(weekday_calendar(january_2026()))
        .doctor(doctor(1, ShiftQuota::new(0, 5, 0).with_wanted_shift(Weekday::Thu)))
        .shift(1, ShiftType::Afternoon, Some(0))
        .build();
    let weights = ConstraintWeights {
        fairness: HardSoftScore::ZERO,
        ..ConstraintWeights::default()
    };
    let set = ConstraintSet::new(&weights, 3);
    assert_eq!(set.score(&solution), HardSoftScore::of_soft(5));
}

#[test]
fn test_director_caches_score() {
    let weights = ConstraintWeights {
        fairness: HardSoftScore::ZERO,
        ..ConstraintWeights::default()
    };
    let mut director = ScoreDirector::new(one_open_shift(), ConstraintSet::new(&weights, 3));
    let before = director.calculate_score();
    assert_eq!(director.calculate_score(), before);
    assert_eq!(director.calculation_count(), 1);

    assert_eq!(director.assign(1, Some(1)), None);
    let after = director.calculate_score();
    assert_eq!(director.calculation_count(), 2);
    assert!(after > before);
    assert_eq!(after, HardSoftScore::ZERO);
    assert_eq!(director.working_solution().score, Some(after));

    // assigning the same doctor again keeps the cache
    director.assign(1, Some(1));
    director.calculate_score();
    assert_eq!(director.calculation_count(), 2);

    let solution = director.into_working_solution();
    assert_eq!(solution.score, Some(HardSoftScore::ZERO));
}

#[test]
fn test_eligibility() {
    let solution = SolutionBuilder::new(weekday_calendar(january_2026()))
        .doctor(doctor(1, ShiftQuota::new(0, 5, 0)))
        .doctor(doctor(2, ShiftQuota::new(0, 5, 0).with_cycle_shifts(false)))
        .shift(5, ShiftType::Cycle, None)
        .shift(5, ShiftType::Afternoon, None)
        .build();
    let cycle = *solution.shift(0);
    let afternoon = *solution.shift(1);
    assert!(is_eligible(&solution, 0, &cycle));
    assert!(!is_eligible(&solution, 1, &cycle));
    assert!(is_eligible(&solution, 1, &afternoon));
}

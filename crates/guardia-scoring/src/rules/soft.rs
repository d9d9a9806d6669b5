//! Soft rules: preferences the solver minimizes but may leave unmet.

use std::collections::BTreeMap;

use guardia_core::{DoctorIdx, ShiftType};

use crate::constraint::Matches;
use crate::context::ScoringContext;

/// Uneven load among doctors that share a quota class.
///
/// For each class and duty kind (afternoon, plus cycle for cycle-eligible
/// doctors) the magnitude is `n * Σc² - (Σc)²`, the sum of squared
/// pairwise differences of the counts `c`.
pub fn fairness(ctx: &ScoringContext<'_>) -> Matches {
    let mut classes: BTreeMap<(u32, u32), Vec<DoctorIdx>> = BTreeMap::new();
    for (doctor, doc) in ctx.solution.doctors().iter().enumerate() {
        if let Some(quota) = &doc.quota {
            if ctx.facts.quota_applies(doctor) {
                classes.entry(quota.class()).or_default().push(doctor);
            }
        }
    }

    let mut m = Matches::NONE;
    for members in classes.values() {
        m.add(spread(members.iter().map(|&d| ctx.index.total(d, ShiftType::Afternoon))));
        let cycle_members = members.iter().filter(|&&d| {
            ctx.solution
                .doctor(d)
                .quota
                .as_ref()
                .is_some_and(|q| q.does_cycle_shifts)
        });
        m.add(spread(cycle_members.map(|&d| ctx.index.total(d, ShiftType::Cycle))));
    }
    m
}

fn spread(counts: impl Iterator<Item = u32>) -> i64 {
    let (mut n, mut sum, mut sum_sq) = (0i64, 0i64, 0i64);
    for c in counts {
        let c = i64::from(c);
        n += 1;
        sum += c;
        sum_sq += c * c;
    }
    n * sum_sq - sum * sum
}

/// Cycle shifts of one doctor closer than the configured minimum gap; each
/// pair of consecutive duty days weighs by how many days it falls short.
pub fn cycle_spacing(ctx: &ScoringContext<'_>) -> Matches {
    let min_gap = ctx.min_days_between_cycle_shifts as usize;
    let mut m = Matches::NONE;
    if min_gap <= 1 {
        return m;
    }
    for doctor in 0..ctx.doctor_count() {
        let mut last = None;
        for day in ctx.index.days_with(doctor, ShiftType::Cycle) {
            if let Some(prev) = last {
                let gap: usize = day - prev;
                if gap < min_gap {
                    m.add((min_gap - gap) as i64);
                }
            }
            last = Some(day);
        }
    }
    m
}

/// Afternoons on two adjacent calendar days.
pub fn consecutive_afternoons(ctx: &ScoringContext<'_>) -> Matches {
    let mut m = Matches::NONE;
    for doctor in 0..ctx.doctor_count() {
        let mut last = None;
        for day in ctx.index.days_with(doctor, ShiftType::Afternoon) {
            if last.is_some_and(|prev| prev + 1 == day) {
                m.add(1);
            }
            last = Some(day);
        }
    }
    m
}

fn shifts_matching(
    ctx: &ScoringContext<'_>,
    shift_type: ShiftType,
    prefers: impl Fn(DoctorIdx, usize) -> bool,
) -> Matches {
    let mut m = Matches::NONE;
    for shift in ctx.solution.shifts_of_type(shift_type) {
        if let Some(d) = ctx.solution.doctor_of(shift.id) {
            if prefers(d, shift.day) {
                m.add(1);
            }
        }
    }
    m
}

/// Afternoons on an unwanted day or weekday.
pub fn unwanted(ctx: &ScoringContext<'_>) -> Matches {
    let solution = ctx.solution;
    shifts_matching(ctx, ShiftType::Afternoon, |d, day| {
        let doc = solution.doctor(d);
        let config = solution.day(day);
        config.unwanted.contains(&doc.id)
            || doc
                .quota
                .as_ref()
                .is_some_and(|q| q.unwanted_shifts.contains(config.weekday()))
    })
}

/// Afternoons on a wanted day or weekday.
pub fn wanted(ctx: &ScoringContext<'_>) -> Matches {
    let solution = ctx.solution;
    shifts_matching(ctx, ShiftType::Afternoon, |d, day| {
        let doc = solution.doctor(d);
        let config = solution.day(day);
        config.wanted.contains(&doc.id)
            || doc
                .quota
                .as_ref()
                .is_some_and(|q| q.wanted_shifts.contains(config.weekday()))
    })
}

/// Consultations on a weekday the doctor asked for.
pub fn wanted_consultation(ctx: &ScoringContext<'_>) -> Matches {
    let solution = ctx.solution;
    shifts_matching(ctx, ShiftType::Consultation, |d, day| {
        solution
            .doctor(d)
            .quota
            .as_ref()
            .is_some_and(|q| q.wanted_consultations.contains(solution.day(day).weekday()))
    })
}

/// Slots that changed hands relative to the prior generation.
pub fn stability(ctx: &ScoringContext<'_>) -> Matches {
    let mut m = Matches::NONE;
    for a in ctx.solution.assignments() {
        if a.previous_doctor.is_some() && a.doctor != a.previous_doctor {
            m.add(1);
        }
    }
    m
}

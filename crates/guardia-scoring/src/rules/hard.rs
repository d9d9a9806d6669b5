//! Hard rules: any match makes the schedule infeasible.

use guardia_core::ShiftType;

use crate::constraint::Matches;
use crate::context::ScoringContext;
use crate::eligibility::{is_cycle_eligible, is_unavailable};

/// One match per open shift.
pub fn coverage(ctx: &ScoringContext<'_>) -> Matches {
    let open = ctx.index.open_count();
    Matches {
        count: open,
        units: open as i64,
    }
}

/// Cycle shifts held by a doctor not allowed to take them that day.
pub fn cycle_eligibility(ctx: &ScoringContext<'_>) -> Matches {
    let solution = ctx.solution;
    let mut m = Matches::NONE;
    for shift in solution.shifts_of_type(ShiftType::Cycle) {
        if let Some(d) = solution.doctor_of(shift.id) {
            if !is_cycle_eligible(solution.doctor(d), solution.day(shift.day)) {
                m.add(1);
            }
        }
    }
    m
}

/// Shifts held while absent or before the employment start date.
pub fn absence(ctx: &ScoringContext<'_>) -> Matches {
    let solution = ctx.solution;
    let mut m = Matches::NONE;
    for (shift, a) in solution.shifts().iter().zip(solution.assignments()) {
        if let Some(d) = a.doctor {
            if !solution.doctor(d).is_present_on(solution.day(shift.day).date()) {
                m.add(1);
            }
        }
    }
    m
}

/// A consultation day admits no other shift for the same doctor.
pub fn consultation_exclusivity(ctx: &ScoringContext<'_>) -> Matches {
    let mut m = Matches::NONE;
    for doctor in 0..ctx.doctor_count() {
        for day in ctx.index.days_with(doctor, ShiftType::Consultation) {
            let others = ctx.index.count(doctor, day, ShiftType::Cycle)
                + ctx.index.count(doctor, day, ShiftType::Afternoon);
            m.add(i64::from(others));
        }
    }
    m
}

/// Two shifts of the same type for one doctor on one day.
pub fn duplicate_shift_type(ctx: &ScoringContext<'_>) -> Matches {
    let mut m = Matches::NONE;
    for doctor in 0..ctx.doctor_count() {
        for day in 0..ctx.day_count() {
            for shift_type in ShiftType::ALL {
                let c = ctx.index.count(doctor, day, shift_type);
                if c > 1 {
                    m.add(i64::from(c - 1));
                }
            }
        }
    }
    m
}

/// Afternoons without a same-day cycle shift, for doctors who only take
/// afternoons alongside cycle duty.
pub fn conditional_shifts(ctx: &ScoringContext<'_>) -> Matches {
    let mut m = Matches::NONE;
    for (doctor, doc) in ctx.solution.doctors().iter().enumerate() {
        if !doc
            .quota
            .as_ref()
            .is_some_and(|q| q.has_shifts_only_when_cycle_shifts)
        {
            continue;
        }
        for day in ctx.index.days_with(doctor, ShiftType::Afternoon) {
            if ctx.index.count(doctor, day, ShiftType::Cycle) == 0 {
                m.add(i64::from(ctx.index.count(doctor, day, ShiftType::Afternoon)));
            }
        }
    }
    m
}

/// Afternoon shortfall below the quota minimum.
pub fn min_shifts(ctx: &ScoringContext<'_>) -> Matches {
    let mut m = Matches::NONE;
    for (doctor, doc) in ctx.solution.doctors().iter().enumerate() {
        let Some(quota) = &doc.quota else { continue };
        if !ctx.facts.quota_applies(doctor) {
            continue;
        }
        let held = ctx.index.total(doctor, ShiftType::Afternoon);
        m.add(i64::from(quota.min_shifts.saturating_sub(held)));
    }
    m
}

/// Afternoons above the quota maximum.
pub fn max_shifts(ctx: &ScoringContext<'_>) -> Matches {
    let mut m = Matches::NONE;
    for (doctor, doc) in ctx.solution.doctors().iter().enumerate() {
        let held = ctx.index.total(doctor, ShiftType::Afternoon);
        let max = doc.quota.as_ref().map_or(0, |q| q.max_shifts);
        m.add(i64::from(held.saturating_sub(max)));
    }
    m
}

/// Consultations away from the exact quota count.
pub fn consultation_count(ctx: &ScoringContext<'_>) -> Matches {
    let mut m = Matches::NONE;
    for (doctor, doc) in ctx.solution.doctors().iter().enumerate() {
        let held = ctx.index.total(doctor, ShiftType::Consultation);
        let owed = match &doc.quota {
            Some(q) if ctx.facts.quota_applies(doctor) => q.num_consultations,
            _ => 0,
        };
        m.add(i64::from(held.abs_diff(owed)));
    }
    m
}

/// Any shift on a day or weekday the doctor declared unavailable.
pub fn unavailable(ctx: &ScoringContext<'_>) -> Matches {
    let solution = ctx.solution;
    let mut m = Matches::NONE;
    for (shift, a) in solution.shifts().iter().zip(solution.assignments()) {
        if let Some(d) = a.doctor {
            if is_unavailable(solution.doctor(d), solution.day(shift.day)) {
                m.add(1);
            }
        }
    }
    m
}

/// Mandatory working days (by day override or weekday) left without an
/// afternoon shift while the doctor is present.
pub fn mandatory(ctx: &ScoringContext<'_>) -> Matches {
    let solution = ctx.solution;
    let mut m = Matches::NONE;
    for (doctor, doc) in solution.doctors().iter().enumerate() {
        if !ctx.facts.quota_applies(doctor) {
            continue;
        }
        let weekdays = doc.quota.as_ref().map(|q| q.mandatory_shifts).unwrap_or_default();
        for (day, config) in solution.calendar().working_days() {
            let required = config.mandatory.contains(&doc.id) || weekdays.contains(config.weekday());
            if required
                && doc.is_present_on(config.date())
                && ctx.index.count(doctor, day, ShiftType::Afternoon) == 0
            {
                m.add(1);
            }
        }
    }
    m
}

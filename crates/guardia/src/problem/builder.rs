//! Lays out the shifts of a month.

use std::collections::HashMap;

use guardia_core::{
    CalendarModel, DayIndex, Doctor, DoctorId, GuardiaError, Result, ScheduleSolution, Shift,
    ShiftAssignment, ShiftType,
};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use super::demand::DemandAnalyzer;

/// Default number of cycle shifts on every day of the month.
pub const DEFAULT_CYCLE_SHIFTS_PER_DAY: u32 = 2;

type Slot = (DayIndex, ShiftType, u32);

/// Expands a calendar and a roster into shifts and open assignments.
///
/// Every day gets the same number of cycle shifts. Afternoon shifts follow
/// the [`DemandAnalyzer`]; consultations, one per unit of quota, are dealt
/// round-robin over a shuffle of the working days.
///
/// Given a prior solution for the same month, shifts found again at the
/// same (day, type, ordinal) keep a pinned doctor pinned and remember any
/// other doctor as the previous holder.
#[derive(Debug, Clone)]
pub struct ProblemBuilder<'a> {
    calendar: CalendarModel,
    doctors: Vec<Doctor>,
    cycle_shifts_per_day: u32,
    prior: Option<&'a ScheduleSolution>,
}

impl<'a> ProblemBuilder<'a> {
    pub fn new(calendar: CalendarModel, doctors: Vec<Doctor>) -> Self {
        Self {
            calendar,
            doctors,
            cycle_shifts_per_day: DEFAULT_CYCLE_SHIFTS_PER_DAY,
            prior: None,
        }
    }

    pub fn with_cycle_shifts_per_day(mut self, count: u32) -> Self {
        self.cycle_shifts_per_day = count;
        self
    }

    /// Carries pins and previous holders over from an earlier generation.
    pub fn with_prior(mut self, prior: Option<&'a ScheduleSolution>) -> Self {
        self.prior = prior;
        self
    }

    /// Builds the problem, drawing the layout shuffles from `rng`.
    ///
    /// # Errors
    ///
    /// `InsufficientData` when the month has no working day or no doctor has
    /// an applicable quota; `InvalidData` for an inconsistent doctor record.
    pub fn build<R: Rng + ?Sized>(self, rng: &mut R) -> Result<ScheduleSolution> {
        let period = self.calendar.period();
        let mut doctors: Vec<Doctor> = self.doctors.into_iter().filter(|d| d.is_available()).collect();
        doctors.sort_by_key(|d| d.id);
        for doctor in &doctors {
            doctor.validate()?;
        }

        if self.calendar.working_day_count() == 0 {
            return Err(GuardiaError::InsufficientData(format!(
                "calendar {} has no working days",
                period
            )));
        }
        if !doctors.iter().any(|d| d.quota_applies(&period)) {
            return Err(GuardiaError::InsufficientData(format!(
                "no doctor has a quota for {}",
                period
            )));
        }

        let demand = DemandAnalyzer::new(&self.calendar, &doctors).analyze(rng);
        let consultations = consultation_layout(&self.calendar, &doctors, rng);

        let mut shifts = Vec::new();
        for day in 0..self.calendar.days().len() {
            let counts = [
                (ShiftType::Cycle, self.cycle_shifts_per_day),
                (ShiftType::Afternoon, demand.afternoons_on(day)),
                (ShiftType::Consultation, consultations[day]),
            ];
            for (shift_type, count) in counts {
                for ordinal in 0..count {
                    shifts.push(Shift::new(shifts.len(), day, shift_type, ordinal));
                }
            }
        }

        let carried = self.prior.map(carried_over).unwrap_or_default();
        let index_of: HashMap<DoctorId, usize> =
            doctors.iter().enumerate().map(|(i, d)| (d.id, i)).collect();
        let mut pinned = 0usize;
        let assignments: Vec<ShiftAssignment> = shifts
            .iter()
            .map(|shift| match carried.get(&shift.slot()) {
                Some(&(id, was_pinned)) => match index_of.get(&id) {
                    Some(&doctor) if was_pinned => {
                        pinned += 1;
                        ShiftAssignment::pinned(shift.id, doctor)
                    }
                    Some(&doctor) => ShiftAssignment {
                        previous_doctor: Some(doctor),
                        ..ShiftAssignment::open(shift.id)
                    },
                    None => ShiftAssignment::open(shift.id),
                },
                None => ShiftAssignment::open(shift.id),
            })
            .collect();

        debug!(
            event = "problem_built",
            period = %period,
            shifts = shifts.len(),
            doctors = doctors.len(),
            afternoons = demand.total(),
            consultations = consultations.iter().sum::<u32>(),
            pinned = pinned,
        );

        ScheduleSolution::new(self.calendar, doctors, shifts, assignments)
    }
}

/// Consultations per day: Σ applicable quotas, dealt round-robin.
fn consultation_layout<R: Rng + ?Sized>(
    calendar: &CalendarModel,
    doctors: &[Doctor],
    rng: &mut R,
) -> Vec<u32> {
    let period = calendar.period();
    let total: u32 = doctors
        .iter()
        .filter(|d| d.quota_applies(&period))
        .filter_map(|d| d.quota.as_ref())
        .map(|q| q.num_consultations)
        .sum();

    let mut per_day = vec![0u32; calendar.days().len()];
    let mut working: Vec<DayIndex> = calendar.working_days().map(|(idx, _)| idx).collect();
    working.shuffle(rng);
    for &day in working.iter().cycle().take(total as usize) {
        per_day[day] += 1;
    }
    per_day
}

/// Doctor ids held in a prior solution, by slot, with their pinned flag.
fn carried_over(prior: &ScheduleSolution) -> HashMap<Slot, (DoctorId, bool)> {
    prior
        .assignments()
        .iter()
        .filter_map(|a| {
            let doctor = a.doctor?;
            Some((prior.shift(a.shift).slot(), (prior.doctor(doctor).id, a.pinned)))
        })
        .collect()
}

//! Read-only views the rules evaluate against.

use guardia_core::{DayIndex, DoctorIdx, ScheduleSolution, ShiftType};

/// Facts about the roster that do not change while solving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterFacts {
    quota_applies: Vec<bool>,
}

impl RosterFacts {
    pub fn new(solution: &ScheduleSolution) -> Self {
        let period = solution.period();
        Self {
            quota_applies: solution
                .doctors()
                .iter()
                .map(|d| d.quota_applies(&period))
                .collect(),
        }
    }

    /// Returns true if the doctor's quota binds them this period.
    #[inline]
    pub fn quota_applies(&self, doctor: DoctorIdx) -> bool {
        self.quota_applies.get(doctor).copied().unwrap_or(false)
    }
}

#[inline]
fn type_slot(shift_type: ShiftType) -> usize {
    match shift_type {
        ShiftType::Cycle => 0,
        ShiftType::Afternoon => 1,
        ShiftType::Consultation => 2,
    }
}

/// Per-doctor, per-day assignment counts, rebuilt for every evaluation.
#[derive(Debug, Clone)]
pub struct AssignmentIndex {
    day_count: usize,
    counts: Vec<[u32; 3]>,
    totals: Vec<[u32; 3]>,
    open: usize,
}

impl AssignmentIndex {
    pub fn new(solution: &ScheduleSolution) -> Self {
        let day_count = solution.days().len();
        let doctor_count = solution.doctors().len();
        let mut counts = vec![[0u32; 3]; day_count * doctor_count];
        let mut totals = vec![[0u32; 3]; doctor_count];
        let mut open = 0;

        for (shift, assignment) in solution.shifts().iter().zip(solution.assignments()) {
            match assignment.doctor {
                Some(d) => {
                    let slot = type_slot(shift.shift_type);
                    counts[d * day_count + shift.day][slot] += 1;
                    totals[d][slot] += 1;
                }
                None => open += 1,
            }
        }

        Self {
            day_count,
            counts,
            totals,
            open,
        }
    }

    /// Shifts of `shift_type` the doctor holds on `day`.
    #[inline]
    pub fn count(&self, doctor: DoctorIdx, day: DayIndex, shift_type: ShiftType) -> u32 {
        self.counts[doctor * self.day_count + day][type_slot(shift_type)]
    }

    /// Shifts of `shift_type` the doctor holds over the period.
    #[inline]
    pub fn total(&self, doctor: DoctorIdx, shift_type: ShiftType) -> u32 {
        self.totals[doctor][type_slot(shift_type)]
    }

    /// Days on which the doctor holds at least one shift of `shift_type`.
    pub fn days_with(&self, doctor: DoctorIdx, shift_type: ShiftType) -> impl Iterator<Item = DayIndex> + '_ {
        let slot = type_slot(shift_type);
        (0..self.day_count).filter(move |&day| self.counts[doctor * self.day_count + day][slot] > 0)
    }

    pub fn open_count(&self) -> usize {
        self.open
    }
}

/// Everything a rule may read.
pub struct ScoringContext<'a> {
    pub solution: &'a ScheduleSolution,
    pub facts: &'a RosterFacts,
    pub index: AssignmentIndex,
    pub min_days_between_cycle_shifts: u32,
}

impl<'a> ScoringContext<'a> {
    pub fn new(solution: &'a ScheduleSolution, facts: &'a RosterFacts, min_days_between_cycle_shifts: u32) -> Self {
        Self {
            solution,
            facts,
            index: AssignmentIndex::new(solution),
            min_days_between_cycle_shifts,
        }
    }

    pub fn doctor_count(&self) -> usize {
        self.solution.doctors().len()
    }

    pub fn day_count(&self) -> usize {
        self.solution.days().len()
    }
}

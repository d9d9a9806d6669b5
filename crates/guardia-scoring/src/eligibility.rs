//! Availability checks shared by the hard rules and the move selectors.
//!
//! The solver only proposes doctors that pass [`is_eligible`], so the
//! matching hard rules stay at zero for every assignment it makes.

use guardia_core::{DayConfiguration, Doctor, DoctorIdx, ScheduleSolution, Shift, ShiftType};

/// Cycle duty permission for one day, after cycle changes.
pub fn is_cycle_eligible(doctor: &Doctor, day: &DayConfiguration) -> bool {
    if day.gives_cycle(doctor.id) {
        return false;
    }
    if day.receives_cycle(doctor.id) {
        return true;
    }
    doctor.quota.as_ref().is_some_and(|q| q.does_cycle_shifts)
}

/// Day override or weekday preference marking the doctor unavailable.
pub fn is_unavailable(doctor: &Doctor, day: &DayConfiguration) -> bool {
    day.unavailable.contains(&doctor.id) || doctor.unavailable_weekday(day.date())
}

/// Returns true if `doctor` may be placed on `shift` without breaking an
/// eligibility, absence or availability rule.
pub fn is_eligible(solution: &ScheduleSolution, doctor: DoctorIdx, shift: &Shift) -> bool {
    let doc = solution.doctor(doctor);
    let day = solution.day(shift.day);
    if !doc.is_available() || !doc.is_present_on(day.date()) || is_unavailable(doc, day) {
        return false;
    }
    match shift.shift_type {
        ShiftType::Cycle => is_cycle_eligible(doc, day),
        ShiftType::Afternoon | ShiftType::Consultation => doc.quota.is_some(),
    }
}

//! Doctors and quotas.

use guardia_core::{Doctor, DoctorId, ShiftQuota};

use crate::calendar::date;

/// A doctor employed since 2020 with the given quota.
pub fn doctor(id: DoctorId, quota: ShiftQuota) -> Doctor {
    Doctor::new(id, format!("Doctor{}", id), "Test", date(2020, 1, 1))
        .with_email(format!("doctor{}@hospital.test", id))
        .with_quota(quota)
}

/// `count` doctors with ids `1..=count` sharing one quota.
pub fn quota_doctors(count: u64, min_shifts: u32, max_shifts: u32, num_consultations: u32) -> Vec<Doctor> {
    (1..=count)
        .map(|id| doctor(id, ShiftQuota::new(min_shifts, max_shifts, num_consultations)))
        .collect()
}

/// The roster used across the end-to-end tests: ten cycle-taking doctors
/// with room for up to ten afternoons and two consultations each.
pub fn uniform_roster(min_shifts: u32) -> Vec<Doctor> {
    quota_doctors(10, min_shifts, 10, 2)
}

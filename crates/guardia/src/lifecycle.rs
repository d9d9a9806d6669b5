//! Schedule lifecycle: one generation per period at a time, with failures
//! contained at the job boundary.

use std::any::Any;
use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use guardia_core::{GuardiaError, Period, Result, Schedule, ScheduleSolution, ScheduleStatus};
use parking_lot::Mutex;
use tracing::{info, warn};

type InFlight = Arc<Mutex<HashMap<Period, Arc<AtomicBool>>>>;

/// Tracks in-flight generations and drives schedule status changes.
///
/// Cloning shares the in-flight registry.
#[derive(Debug, Clone, Default)]
pub struct ScheduleLifecycle {
    in_flight: InFlight,
}

impl ScheduleLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `period` for a generation run.
    ///
    /// # Errors
    ///
    /// `ConcurrentGeneration` if a run for the period is already in flight.
    pub fn acquire(&self, period: Period) -> Result<GenerationPermit> {
        let mut in_flight = self.in_flight.lock();
        if in_flight.contains_key(&period) {
            return Err(GuardiaError::ConcurrentGeneration(period));
        }
        let cancel = Arc::new(AtomicBool::new(false));
        in_flight.insert(period, cancel.clone());
        Ok(GenerationPermit {
            period,
            cancel,
            in_flight: self.in_flight.clone(),
        })
    }

    pub fn is_generating(&self, period: Period) -> bool {
        self.in_flight.lock().contains_key(&period)
    }

    /// Asks the run for `period` to stop; returns false if none is running.
    pub fn cancel(&self, period: Period) -> bool {
        match self.in_flight.lock().get(&period) {
            Some(flag) => {
                flag.store(true, Ordering::SeqCst);
                true
            }
            None => false,
        }
    }

    /// Periods currently being generated.
    pub fn generating(&self) -> Vec<Period> {
        let mut periods: Vec<Period> = self.in_flight.lock().keys().copied().collect();
        periods.sort();
        periods
    }

    /// Rejects regeneration of a confirmed schedule.
    pub fn check_regenerable(existing: Option<&Schedule>) -> Result<()> {
        match existing {
            Some(schedule) if schedule.status() == ScheduleStatus::Confirmed => {
                Err(GuardiaError::InvalidState(format!(
                    "schedule {} is already confirmed",
                    schedule.period()
                )))
            }
            _ => Ok(()),
        }
    }

    /// Runs `job` and settles `schedule` with its outcome.
    ///
    /// A returned solution moves the schedule to `PENDING_CONFIRMATION`,
    /// carrying the job's warning if any. An error or a panic moves it to
    /// `GENERATION_ERROR`, leaving no assignments behind.
    pub fn settle<F>(schedule: &mut Schedule, job: F) -> Result<()>
    where
        F: FnOnce() -> Result<(ScheduleSolution, Option<GuardiaError>)>,
    {
        let outcome = catch_unwind(AssertUnwindSafe(job))
            .unwrap_or_else(|payload| Err(GuardiaError::Internal(panic_message(payload.as_ref()))));

        match outcome {
            Ok((solution, warning)) => {
                if let Some(w) = &warning {
                    warn!(event = "schedule_warning", period = %schedule.period(), warning = %w);
                }
                schedule.complete(solution, warning)?;
            }
            Err(error) => {
                warn!(event = "generation_failed", period = %schedule.period(), error = %error);
                schedule.fail(error)?;
            }
        }
        info!(
            event = "schedule_status",
            period = %schedule.period(),
            status = %schedule.status(),
        );
        Ok(())
    }
}

/// Exclusive claim on a period's generation; released on drop.
#[derive(Debug)]
pub struct GenerationPermit {
    period: Period,
    cancel: Arc<AtomicBool>,
    in_flight: InFlight,
}

impl GenerationPermit {
    pub fn period(&self) -> Period {
        self.period
    }

    /// Flag raised by [`ScheduleLifecycle::cancel`].
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        self.cancel.clone()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::SeqCst)
    }
}

impl Drop for GenerationPermit {
    fn drop(&mut self) {
        self.in_flight.lock().remove(&self.period);
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        format!("solver panicked: {}", msg)
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        format!("solver panicked: {}", msg)
    } else {
        "solver panicked".to_string()
    }
}

#[cfg(test)]
mod tests;

//! Afternoon demand against calendar capacity.

use guardia_core::{CalendarModel, DayIndex, Doctor};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::info;

/// Afternoon shifts to lay out on each day of the month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemandAnalysis {
    afternoons: Vec<u32>,
    base_capacity: u32,
    demand: u32,
}

impl DemandAnalysis {
    /// Afternoon shifts on day `day` (0-based); zero on non-working days.
    pub fn afternoons_on(&self, day: DayIndex) -> u32 {
        self.afternoons.get(day).copied().unwrap_or(0)
    }

    pub fn per_day(&self) -> &[u32] {
        &self.afternoons
    }

    /// Sum of the calendar's baseline afternoon counts on working days.
    pub fn base_capacity(&self) -> u32 {
        self.base_capacity
    }

    /// Sum of the minimum quotas that apply to the month.
    pub fn demand(&self) -> u32 {
        self.demand
    }

    /// Afternoon shifts added on top of the baseline.
    pub fn deficit(&self) -> u32 {
        self.demand.saturating_sub(self.base_capacity)
    }

    /// Total afternoon shifts, `max(demand, base_capacity)`.
    pub fn total(&self) -> u32 {
        self.afternoons.iter().sum()
    }
}

/// Reconciles the doctors' minimum afternoon quotas with the calendar.
///
/// When the quotas ask for more afternoons than the working days offer,
/// the shortfall is handed out one shift at a time over a shuffled cyclic
/// pass of the working days, so no day grows by more than one per pass.
#[derive(Debug, Clone, Copy)]
pub struct DemandAnalyzer<'a> {
    calendar: &'a CalendarModel,
    doctors: &'a [Doctor],
}

impl<'a> DemandAnalyzer<'a> {
    pub fn new(calendar: &'a CalendarModel, doctors: &'a [Doctor]) -> Self {
        Self { calendar, doctors }
    }

    pub fn base_capacity(&self) -> u32 {
        self.calendar
            .working_days()
            .map(|(_, day)| day.num_shifts)
            .sum()
    }

    pub fn demand(&self) -> u32 {
        let period = self.calendar.period();
        self.doctors
            .iter()
            .filter(|d| d.quota_applies(&period))
            .filter_map(|d| d.quota.as_ref())
            .map(|q| q.min_shifts)
            .sum()
    }

    pub fn analyze<R: Rng + ?Sized>(&self, rng: &mut R) -> DemandAnalysis {
        let mut afternoons = vec![0u32; self.calendar.days().len()];
        let mut working: Vec<DayIndex> = Vec::new();
        for (idx, day) in self.calendar.working_days() {
            afternoons[idx] = day.num_shifts;
            working.push(idx);
        }

        let base_capacity = self.base_capacity();
        let demand = self.demand();
        let deficit = demand.saturating_sub(base_capacity) as usize;

        if deficit > 0 && !working.is_empty() {
            working.shuffle(rng);
            for &day in working.iter().cycle().take(deficit) {
                afternoons[day] += 1;
            }
        }

        info!(
            event = "demand_analysis",
            period = %self.calendar.period(),
            working_days = working.len(),
            base_capacity = base_capacity,
            demand = demand,
            deficit = deficit,
        );

        DemandAnalysis {
            afternoons,
            base_capacity,
            demand,
        }
    }
}

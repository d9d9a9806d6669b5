//! Test fixtures shared by the solver's test modules.

use guardia_core::{ScheduleSolution, ShiftType};
use guardia_scoring::{ConstraintSet, ScoreDirector};
use guardia_test::{january_2026, quota_doctors, weekday_calendar, SolutionBuilder};

use crate::scope::SolverScope;

/// Three doctors and one open cycle plus one open afternoon on the first
/// five days of January 2026 (a Thursday, Friday and the following
/// Monday to Wednesday).
pub fn small_solution() -> ScheduleSolution {
    let mut builder = SolutionBuilder::new(weekday_calendar(january_2026()))
        .doctors(quota_doctors(3, 0, 10, 0));
    for day in [1, 2, 5, 6, 7] {
        builder = builder
            .shift(day, ShiftType::Cycle, None)
            .shift(day, ShiftType::Afternoon, None);
    }
    builder.build()
}

pub fn create_scope(solution: ScheduleSolution) -> SolverScope {
    let director = ScoreDirector::new(solution, ConstraintSet::default());
    SolverScope::with_seed(director, 42)
}

pub fn create_test_scope() -> SolverScope {
    create_scope(small_solution())
}

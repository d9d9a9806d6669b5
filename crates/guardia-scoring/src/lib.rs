//! Constraint scoring for Guardia.
//!
//! Scoring is a pure function of a [`ScheduleSolution`]: every rule reads
//! the assignment state through a [`ScoringContext`] and reports how often
//! and how badly it matched. A [`ConstraintSet`] weighs and sums the rules;
//! a [`ScoreDirector`] owns the working solution during a solve.
//!
//! [`ScheduleSolution`]: guardia_core::ScheduleSolution

pub mod analysis;
pub mod constraint;
pub mod context;
pub mod director;
pub mod eligibility;
pub mod rules;

pub use analysis::{ConstraintAnalysis, ScoreExplanation};
pub use constraint::{ConstraintSet, ImpactType, Matches, Rule};
pub use context::{AssignmentIndex, RosterFacts, ScoringContext};
pub use director::ScoreDirector;
pub use eligibility::{is_cycle_eligible, is_eligible, is_unavailable};

#[cfg(test)]
mod tests;

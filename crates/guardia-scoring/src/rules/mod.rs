//! The scheduling rules.
//!
//! Each rule is a plain function over a [`ScoringContext`]; weights come
//! from [`ConstraintWeights`] and are attached in [`all`].

mod hard;
mod soft;


use guardia_config::ConstraintWeights;

use guardia_core::HardSoftScore;

use crate::constraint::{ImpactType, Matches, Rule};
use crate::context::ScoringContext;

pub use hard::{
    absence, conditional_shifts, consultation_count, consultation_exclusivity, coverage,
    cycle_eligibility, duplicate_shift_type, mandatory, max_shifts, min_shifts, unavailable,
};
pub use soft::{consecutive_afternoons, cycle_spacing, fairness, stability, unwanted, wanted, wanted_consultation};

/// Every rule with its configured weight, hard rules first.
pub fn all(w: &ConstraintWeights) -> Vec<Rule> {
    use ImpactType::{Penalty, Reward};
    fn rule(
        name: &'static str,
        impact: ImpactType,
        weight: HardSoftScore,
        evaluate: fn(&ScoringContext<'_>) -> Matches,
    ) -> Rule {
        Rule {
            name,
            impact,
            weight,
            evaluate,
        }
    }
    vec![
        rule("coverage", Penalty, w.coverage, coverage),
        rule("cycle_eligibility", Penalty, w.cycle_eligibility, cycle_eligibility),
        rule("absence", Penalty, w.absence, absence),
        rule("consultation_exclusivity", Penalty, w.consultation_exclusivity, consultation_exclusivity),
        rule("duplicate_shift_type", Penalty, w.duplicate_shift_type, duplicate_shift_type),
        rule("conditional_shifts", Penalty, w.conditional_shifts, conditional_shifts),
        rule("min_shifts", Penalty, w.min_shifts, min_shifts),
        rule("max_shifts", Penalty, w.max_shifts, max_shifts),
        rule("consultation_count", Penalty, w.consultation_count, consultation_count),
        rule("unavailable", Penalty, w.unavailable, unavailable),
        rule("mandatory", Penalty, w.mandatory, mandatory),
        rule("fairness", Penalty, w.fairness, fairness),
        rule("cycle_spacing", Penalty, w.cycle_spacing, cycle_spacing),
        rule("consecutive_afternoons", Penalty, w.consecutive_afternoons, consecutive_afternoons),
        rule("unwanted", Penalty, w.unwanted, unwanted),
        rule("wanted", Reward, w.wanted, wanted),
        rule("wanted_consultation", Reward, w.wanted_consultation, wanted_consultation),
        rule("stability", Penalty, w.stability, stability),
    ]
}

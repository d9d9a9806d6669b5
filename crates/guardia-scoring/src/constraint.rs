//! Weighted rules and their composition.

use std::fmt;

use guardia_config::ConstraintWeights;
use guardia_core::{HardSoftScore, ScheduleSolution};

use crate::analysis::{ConstraintAnalysis, ScoreExplanation};
use crate::context::{RosterFacts, ScoringContext};
use crate::rules;

/// Whether matches lower or raise the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImpactType {
    Penalty,
    Reward,
}

/// What a rule found: how many distinct matches and their summed magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Matches {
    pub count: usize,
    pub units: i64,
}

impl Matches {
    pub const NONE: Matches = Matches { count: 0, units: 0 };

    /// Records one match of the given magnitude; zero is ignored.
    #[inline]
    pub fn add(&mut self, units: i64) {
        if units != 0 {
            self.count += 1;
            self.units += units;
        }
    }
}

/// A pure scoring rule with its weight.
#[derive(Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub impact: ImpactType,
    pub weight: HardSoftScore,
    pub evaluate: fn(&ScoringContext<'_>) -> Matches,
}

impl Rule {
    pub fn is_hard(&self) -> bool {
        self.weight.has_hard_component()
    }

    /// Score contribution of the given matches.
    pub fn impact_of(&self, matches: Matches) -> HardSoftScore {
        let magnitude = self.weight.multiply(matches.units);
        match self.impact {
            ImpactType::Penalty => -magnitude,
            ImpactType::Reward => magnitude,
        }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("impact", &self.impact)
            .field("weight", &self.weight)
            .finish()
    }
}

/// The full rule list, built from configured weights.
#[derive(Debug, Clone)]
pub struct ConstraintSet {
    rules: Vec<Rule>,
    min_days_between_cycle_shifts: u32,
}

impl ConstraintSet {
    /// Builds every rule; zero-weight rules are left out.
    pub fn new(weights: &ConstraintWeights, min_days_between_cycle_shifts: u32) -> Self {
        let rules = rules::all(weights)
            .into_iter()
            .filter(|r| r.weight != HardSoftScore::ZERO)
            .collect();
        Self {
            rules,
            min_days_between_cycle_shifts,
        }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Scores a solution from scratch.
    pub fn score(&self, solution: &ScheduleSolution) -> HardSoftScore {
        self.score_with(solution, &RosterFacts::new(solution))
    }

    /// Scores a solution with precomputed roster facts.
    pub fn score_with(&self, solution: &ScheduleSolution, facts: &RosterFacts) -> HardSoftScore {
        let ctx = ScoringContext::new(solution, facts, self.min_days_between_cycle_shifts);
        self.rules
            .iter()
            .map(|rule| rule.impact_of((rule.evaluate)(&ctx)))
            .sum()
    }

    /// Per-rule breakdown of the score.
    pub fn explain(&self, solution: &ScheduleSolution) -> ScoreExplanation {
        let facts = RosterFacts::new(solution);
        let ctx = ScoringContext::new(solution, &facts, self.min_days_between_cycle_shifts);
        let analyses: Vec<_> = self
            .rules
            .iter()
            .map(|rule| {
                let matches = (rule.evaluate)(&ctx);
                ConstraintAnalysis::new(
                    rule.name,
                    rule.weight,
                    rule.impact_of(matches),
                    matches.count,
                    rule.is_hard(),
                )
            })
            .collect();
        let score = analyses.iter().map(|a| a.score).sum();
        ScoreExplanation::new(score, analyses)
    }
}

impl Default for ConstraintSet {
    fn default() -> Self {
        Self::new(&ConstraintWeights::default(), 3)
    }
}

//! Score breakdown by constraint.

use std::fmt;

use guardia_core::HardSoftScore;

/// Analysis of a single constraint's contribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintAnalysis {
    pub name: &'static str,
    /// Score per unit of match.
    pub weight: HardSoftScore,
    /// Total score from this constraint.
    pub score: HardSoftScore,
    pub match_count: usize,
    pub is_hard: bool,
}

impl ConstraintAnalysis {
    pub fn new(name: &'static str, weight: HardSoftScore, score: HardSoftScore, match_count: usize, is_hard: bool) -> Self {
        Self {
            name,
            weight,
            score,
            match_count,
            is_hard,
        }
    }
}

/// Complete explanation of a solution's score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreExplanation {
    /// The total score.
    pub score: HardSoftScore,
    /// Per-constraint breakdown.
    pub constraint_analyses: Vec<ConstraintAnalysis>,
}

impl ScoreExplanation {
    pub fn new(score: HardSoftScore, constraint_analyses: Vec<ConstraintAnalysis>) -> Self {
        Self {
            score,
            constraint_analyses,
        }
    }

    /// Returns the total match count across all constraints.
    pub fn total_match_count(&self) -> usize {
        self.constraint_analyses.iter().map(|a| a.match_count).sum()
    }

    /// Returns constraints with non-zero scores.
    pub fn non_zero_constraints(&self) -> Vec<&ConstraintAnalysis> {
        self.constraint_analyses
            .iter()
            .filter(|a| a.score != HardSoftScore::ZERO)
            .collect()
    }

    /// Returns the analysis of the named constraint.
    pub fn get(&self, name: &str) -> Option<&ConstraintAnalysis> {
        self.constraint_analyses.iter().find(|a| a.name == name)
    }
}

impl fmt::Display for ScoreExplanation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.score)?;
        for a in self.non_zero_constraints() {
            write!(f, "\n  {:<26} {:>5} matches  {}", a.name, a.match_count, a.score)?;
        }
        Ok(())
    }
}

//! HardSoftScore - two-level schedule score

use std::cmp::Ordering;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub};
use std::str::FromStr;

use super::Score;

/// Hard points first, soft points only break ties.
///
/// # Examples
///
/// ```
/// use guardia_core::HardSoftScore;
///
/// let infeasible = HardSoftScore::of(-1, -100);
/// let feasible = HardSoftScore::of(0, -200);
/// assert!(feasible > infeasible);
///
/// let parsed: HardSoftScore = "0hard/-50soft".parse().unwrap();
/// assert!(parsed > feasible);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HardSoftScore {
    #[cfg_attr(feature = "serde", serde(default))]
    hard: i64,
    #[cfg_attr(feature = "serde", serde(default))]
    soft: i64,
}

impl HardSoftScore {
    pub const ZERO: HardSoftScore = HardSoftScore { hard: 0, soft: 0 };

    #[inline]
    pub const fn of(hard: i64, soft: i64) -> Self {
        HardSoftScore { hard, soft }
    }

    #[inline]
    pub const fn of_hard(hard: i64) -> Self {
        HardSoftScore { hard, soft: 0 }
    }

    #[inline]
    pub const fn of_soft(soft: i64) -> Self {
        HardSoftScore { hard: 0, soft }
    }

    #[inline]
    pub const fn hard(&self) -> i64 {
        self.hard
    }

    #[inline]
    pub const fn soft(&self) -> i64 {
        self.soft
    }

    /// Whether a constraint weight counts against feasibility.
    pub const fn has_hard_component(&self) -> bool {
        self.hard != 0
    }

    /// Scales a per-unit weight by a match count.
    pub const fn multiply(&self, units: i64) -> Self {
        HardSoftScore::of(self.hard * units, self.soft * units)
    }
}

impl Score for HardSoftScore {
    #[inline]
    fn is_feasible(&self) -> bool {
        self.hard >= 0
    }

    #[inline]
    fn zero() -> Self {
        HardSoftScore::ZERO
    }
}

impl Ord for HardSoftScore {
    fn cmp(&self, other: &Self) -> Ordering {
        self.hard
            .cmp(&other.hard)
            .then_with(|| self.soft.cmp(&other.soft))
    }
}

impl PartialOrd for HardSoftScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Add for HardSoftScore {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        HardSoftScore::of(self.hard + other.hard, self.soft + other.soft)
    }
}

impl AddAssign for HardSoftScore {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for HardSoftScore {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        HardSoftScore::of(self.hard - other.hard, self.soft - other.soft)
    }
}

impl Neg for HardSoftScore {
    type Output = Self;

    fn neg(self) -> Self {
        HardSoftScore::of(-self.hard, -self.soft)
    }
}

impl Sum for HardSoftScore {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(HardSoftScore::ZERO, Add::add)
    }
}

impl fmt::Debug for HardSoftScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HardSoftScore({}, {})", self.hard, self.soft)
    }
}

impl fmt::Display for HardSoftScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}hard/{}soft", self.hard, self.soft)
    }
}

/// Text that is not of the form `"<n>hard/<n>soft"`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid score '{0}': expected \"<n>hard/<n>soft\"")]
pub struct ScoreParseError(pub String);

impl FromStr for HardSoftScore {
    type Err = ScoreParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ScoreParseError(s.to_string());
        let (hard, soft) = s.trim().split_once('/').ok_or_else(invalid)?;
        let level = |part: &str, suffix: &str| -> Result<i64, ScoreParseError> {
            part.trim()
                .strip_suffix(suffix)
                .and_then(|n| n.parse().ok())
                .ok_or_else(invalid)
        };
        Ok(HardSoftScore::of(level(hard, "hard")?, level(soft, "soft")?))
    }
}

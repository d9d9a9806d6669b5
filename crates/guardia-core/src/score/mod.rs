//! Schedule quality.
//!
//! A schedule is scored on two levels: hard points count broken rules, soft
//! points measure how well preferences and fairness are met.

mod hard_soft;


use std::fmt::{Debug, Display};

pub use hard_soft::{HardSoftScore, ScoreParseError};

/// Totally ordered score, higher is better.
pub trait Score: Copy + Debug + Display + Default + Send + Sync + Ord + 'static {
    /// No hard rule is broken.
    fn is_feasible(&self) -> bool;

    fn zero() -> Self;
}

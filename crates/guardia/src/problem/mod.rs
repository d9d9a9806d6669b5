//! From calendar and roster to an unsolved schedule.

mod builder;
mod demand;

pub use builder::ProblemBuilder;
pub use demand::{DemandAnalysis, DemandAnalyzer};

#[cfg(test)]
mod tests;

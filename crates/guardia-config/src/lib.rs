//! Configuration system for Guardia.
//!
//! Load solver configuration from TOML or YAML to control the random seed,
//! the termination budget, the local-search acceptor and the constraint
//! weights without code changes.
//!
//! # Examples
//!
//! ```
//! use guardia_config::SolverConfig;
//! use guardia_core::HardSoftScore;
//! use std::time::Duration;
//!
//! let config = SolverConfig::from_toml_str(r#"
//!     random_seed = 7
//!
//!     [termination]
//!     seconds_spent_limit = 30
//!
//!     [local_search.tabu]
//!     move_tabu_size = 12
//!
//!     [constraint_weights]
//!     fairness = { soft = 20 }
//! "#).unwrap();
//!
//! assert_eq!(config.random_seed, Some(7));
//! assert_eq!(config.termination.time_limit(), Some(Duration::from_secs(30)));
//! assert_eq!(config.local_search.tabu.move_tabu_size, 12);
//! assert_eq!(config.constraint_weights.fairness, HardSoftScore::of_soft(20));
//! ```
//!
//! Use the default config when the file is missing:
//!
//! ```
//! use guardia_config::SolverConfig;
//!
//! let config = SolverConfig::load("guardia.toml").unwrap_or_default();
//! assert_eq!(config.problem.cycle_shifts_per_day, 2);
//! ```

use std::path::Path;
use std::time::Duration;

use guardia_core::{GuardiaError, HardSoftScore};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<ConfigError> for GuardiaError {
    fn from(e: ConfigError) -> Self {
        GuardiaError::Config(e.to_string())
    }
}

/// Main solver configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SolverConfig {
    /// Seed used when the caller does not supply one.
    #[serde(default)]
    pub random_seed: Option<u64>,

    /// Default solve budget.
    #[serde(default)]
    pub termination: TerminationConfig,

    /// Improvement phase tuning.
    #[serde(default)]
    pub local_search: LocalSearchConfig,

    /// Shape of the generated problem.
    #[serde(default)]
    pub problem: ProblemConfig,

    /// Weight of every constraint.
    #[serde(default)]
    pub constraint_weights: ConstraintWeights,
}

impl SolverConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file doesn't exist, contains invalid TOML, or
    /// fails [`validate`](Self::validate).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the random seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Replaces the termination budget.
    pub fn with_termination(mut self, termination: TerminationConfig) -> Self {
        self.termination = termination;
        self
    }

    /// Replaces the constraint weights.
    pub fn with_constraint_weights(mut self, weights: ConstraintWeights) -> Self {
        self.constraint_weights = weights;
        self
    }

    /// Checks value ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.termination.validate()?;
        self.local_search.validate()?;
        self.constraint_weights.validate()
    }
}

/// Solve budget. Whichever limit is hit first ends the solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TerminationConfig {
    /// Maximum seconds to spend solving.
    pub seconds_spent_limit: Option<u64>,

    /// Maximum milliseconds to spend solving; added to `seconds_spent_limit`.
    pub millis_spent_limit: Option<u64>,

    /// Maximum number of improvement steps.
    pub step_count_limit: Option<u64>,

    /// Once feasible, stop after this many steps without a better score.
    pub unimproved_step_count_limit: Option<u64>,
}

impl Default for TerminationConfig {
    fn default() -> Self {
        Self {
            seconds_spent_limit: Some(30),
            millis_spent_limit: None,
            step_count_limit: Some(20_000),
            unimproved_step_count_limit: Some(2_000),
        }
    }
}

impl TerminationConfig {
    /// A budget with only a step limit.
    pub fn steps(limit: u64) -> Self {
        Self {
            seconds_spent_limit: None,
            millis_spent_limit: None,
            step_count_limit: Some(limit),
            unimproved_step_count_limit: None,
        }
    }

    pub fn with_unimproved_step_count_limit(mut self, limit: u64) -> Self {
        self.unimproved_step_count_limit = Some(limit);
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.seconds_spent_limit = None;
        self.millis_spent_limit = Some(limit.as_millis() as u64);
        self
    }

    /// A solve must be bounded by steps or time.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.total_millis().is_none() {
            return Err(ConfigError::Invalid(
                "termination time limit does not fit in milliseconds".into(),
            ));
        }
        if self.step_count_limit.is_none() && self.time_limit().is_none() {
            return Err(ConfigError::Invalid(
                "termination needs a step_count_limit or a time limit".into(),
            ));
        }
        Ok(())
    }

    /// Returns the time limit as a Duration, if any.
    ///
    /// A limit too large to count in milliseconds saturates.
    pub fn time_limit(&self) -> Option<Duration> {
        let millis = self.total_millis().unwrap_or(u64::MAX);
        if millis > 0 {
            Some(Duration::from_millis(millis))
        } else {
            None
        }
    }

    fn total_millis(&self) -> Option<u64> {
        self.seconds_spent_limit
            .unwrap_or(0)
            .checked_mul(1000)?
            .checked_add(self.millis_spent_limit.unwrap_or(0))
    }
}

/// Improvement phase tuning.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LocalSearchConfig {
    /// Candidate moves sampled per step.
    pub move_sample_size: usize,

    /// Share of sampled moves that are swaps rather than reassignments.
    pub swap_probability: f64,

    pub simulated_annealing: SimulatedAnnealingConfig,

    pub tabu: TabuConfig,
}

impl Default for LocalSearchConfig {
    fn default() -> Self {
        Self {
            move_sample_size: 24,
            swap_probability: 0.4,
            simulated_annealing: SimulatedAnnealingConfig::default(),
            tabu: TabuConfig::default(),
        }
    }
}

impl LocalSearchConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.move_sample_size == 0 {
            return Err(ConfigError::Invalid(
                "local_search.move_sample_size must be at least 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.swap_probability) {
            return Err(ConfigError::Invalid(format!(
                "local_search.swap_probability {} is outside [0, 1]",
                self.swap_probability
            )));
        }
        self.simulated_annealing.validate()
    }
}

/// Simulated annealing for non-improving moves.
///
/// A soft-worse move of `delta` is accepted with probability
/// `min(max_acceptance_probability, exp(-delta / T))`, where `T` starts at
/// `starting_temperature` and is multiplied by `decay_rate` every step.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SimulatedAnnealingConfig {
    pub starting_temperature: f64,
    pub decay_rate: f64,
    pub max_acceptance_probability: f64,
}

impl Default for SimulatedAnnealingConfig {
    fn default() -> Self {
        Self {
            starting_temperature: 20.0,
            decay_rate: 0.999,
            max_acceptance_probability: 0.5,
        }
    }
}

impl SimulatedAnnealingConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.starting_temperature <= 0.0 {
            return Err(ConfigError::Invalid(
                "simulated_annealing.starting_temperature must be positive".into(),
            ));
        }
        if !(self.decay_rate > 0.0 && self.decay_rate <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "simulated_annealing.decay_rate {} is outside (0, 1]",
                self.decay_rate
            )));
        }
        if !(0.0..=1.0).contains(&self.max_acceptance_probability) {
            return Err(ConfigError::Invalid(format!(
                "simulated_annealing.max_acceptance_probability {} is outside [0, 1]",
                self.max_acceptance_probability
            )));
        }
        Ok(())
    }
}

/// Tabu list configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TabuConfig {
    /// Number of recently undone moves that may not be repeated.
    pub move_tabu_size: usize,
}

impl Default for TabuConfig {
    fn default() -> Self {
        Self { move_tabu_size: 10 }
    }
}

/// Shape constants of the generated problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ProblemConfig {
    /// Cycle shifts emitted on every day of the month.
    pub cycle_shifts_per_day: u32,

    /// Cycle shifts of one doctor closer than this many days are penalized.
    pub min_days_between_cycle_shifts: u32,
}

impl Default for ProblemConfig {
    fn default() -> Self {
        Self {
            cycle_shifts_per_day: 2,
            min_days_between_cycle_shifts: 3,
        }
    }
}

/// Weight of each constraint.
///
/// Weights are magnitudes: penalties subtract them per match, rewards add
/// them. A weight of zero disables the constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ConstraintWeights {
    pub coverage: HardSoftScore,
    pub cycle_eligibility: HardSoftScore,
    pub absence: HardSoftScore,
    pub consultation_exclusivity: HardSoftScore,
    pub duplicate_shift_type: HardSoftScore,
    pub conditional_shifts: HardSoftScore,
    pub min_shifts: HardSoftScore,
    pub max_shifts: HardSoftScore,
    pub consultation_count: HardSoftScore,
    pub unavailable: HardSoftScore,
    pub mandatory: HardSoftScore,
    pub fairness: HardSoftScore,
    pub cycle_spacing: HardSoftScore,
    pub consecutive_afternoons: HardSoftScore,
    pub unwanted: HardSoftScore,
    pub wanted: HardSoftScore,
    pub wanted_consultation: HardSoftScore,
    pub stability: HardSoftScore,
}

impl Default for ConstraintWeights {
    fn default() -> Self {
        Self {
            coverage: HardSoftScore::of_hard(100),
            cycle_eligibility: HardSoftScore::of_hard(1000),
            absence: HardSoftScore::of_hard(1000),
            consultation_exclusivity: HardSoftScore::of_hard(1000),
            duplicate_shift_type: HardSoftScore::of_hard(1000),
            conditional_shifts: HardSoftScore::of_hard(1000),
            min_shifts: HardSoftScore::of_hard(100),
            max_shifts: HardSoftScore::of_hard(100),
            consultation_count: HardSoftScore::of_hard(100),
            unavailable: HardSoftScore::of_hard(1000),
            mandatory: HardSoftScore::of_hard(1000),
            fairness: HardSoftScore::of_soft(10),
            cycle_spacing: HardSoftScore::of_soft(50),
            consecutive_afternoons: HardSoftScore::of_soft(10),
            unwanted: HardSoftScore::of_soft(5),
            wanted: HardSoftScore::of_soft(5),
            wanted_consultation: HardSoftScore::of_soft(2),
            stability: HardSoftScore::of_soft(1),
        }
    }
}

impl ConstraintWeights {
    /// Every weight with its field name, in declaration order.
    pub fn entries(&self) -> [(&'static str, HardSoftScore); 18] {
        [
            ("coverage", self.coverage),
            ("cycle_eligibility", self.cycle_eligibility),
            ("absence", self.absence),
            ("consultation_exclusivity", self.consultation_exclusivity),
            ("duplicate_shift_type", self.duplicate_shift_type),
            ("conditional_shifts", self.conditional_shifts),
            ("min_shifts", self.min_shifts),
            ("max_shifts", self.max_shifts),
            ("consultation_count", self.consultation_count),
            ("unavailable", self.unavailable),
            ("mandatory", self.mandatory),
            ("fairness", self.fairness),
            ("cycle_spacing", self.cycle_spacing),
            ("consecutive_afternoons", self.consecutive_afternoons),
            ("unwanted", self.unwanted),
            ("wanted", self.wanted),
            ("wanted_consultation", self.wanted_consultation),
            ("stability", self.stability),
        ]
    }

    fn validate(&self) -> Result<(), ConfigError> {
        match self
            .entries()
            .into_iter()
            .find(|(_, w)| w.hard() < 0 || w.soft() < 0)
        {
            Some((name, w)) => Err(ConfigError::Invalid(format!(
                "constraint_weights.{} = {} must not be negative",
                name, w
            ))),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests;

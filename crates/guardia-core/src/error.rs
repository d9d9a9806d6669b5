//! Error types for Guardia

use thiserror::Error;

use crate::domain::Period;

/// Main error type for Guardia operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuardiaError {
    /// Calendar, doctor or schedule data is missing
    #[error("Not found: {0}")]
    NotFound(String),

    /// The input cannot produce a schedule (no working days, no quota-bearing doctors)
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// Calendar or doctor data is malformed
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Lifecycle transition attempted from the wrong status
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// A generation job for the period is already in flight
    #[error("A schedule for {0} is already being generated")]
    ConcurrentGeneration(Period),

    /// The solve budget ran out before every hard constraint was satisfied.
    ///
    /// Not fatal: the best-effort schedule is still returned.
    #[error("Budget exhausted with hard score {hard}")]
    BudgetExhausted { hard: i64 },

    /// Error in solver configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not occur in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl GuardiaError {
    /// Returns true for errors that leave a usable best-effort result behind.
    pub fn is_warning(&self) -> bool {
        matches!(self, GuardiaError::BudgetExhausted { .. })
    }
}

/// Result type alias for Guardia operations
pub type Result<T> = std::result::Result<T, GuardiaError>;

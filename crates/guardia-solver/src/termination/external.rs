//! Cooperative cancellation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::{Termination, TerminationReason};
use crate::scope::SolverScope;

/// Terminates when a shared flag is raised, or when the solver scope's own
/// terminate-early flag is.
#[derive(Debug, Clone, Default)]
pub struct ExternalTermination {
    flag: Option<Arc<AtomicBool>>,
}

impl ExternalTermination {
    pub fn new(flag: Arc<AtomicBool>) -> Self {
        Self { flag: Some(flag) }
    }

    /// Only watches the solver scope's flag.
    pub fn from_scope() -> Self {
        Self { flag: None }
    }
}

impl Termination for ExternalTermination {
    fn is_terminated(&mut self, solver_scope: &SolverScope) -> bool {
        solver_scope.is_terminate_early()
            || self
                .flag
                .as_ref()
                .is_some_and(|flag| flag.load(Ordering::SeqCst))
    }

    fn reason(&self) -> TerminationReason {
        TerminationReason::Cancelled
    }
}

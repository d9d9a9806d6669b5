//! Composite termination.

use super::{Termination, TerminationReason};
use crate::scope::SolverScope;

/// Terminates when ANY child terminates, remembering which one fired.
#[derive(Debug, Default)]
pub struct OrTermination {
    terminations: Vec<Box<dyn Termination>>,
    fired: Option<TerminationReason>,
}

impl OrTermination {
    pub fn new(terminations: Vec<Box<dyn Termination>>) -> Self {
        Self {
            terminations,
            fired: None,
        }
    }

    pub fn with(mut self, termination: impl Termination + 'static) -> Self {
        self.terminations.push(Box::new(termination));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.terminations.is_empty()
    }
}

impl Termination for OrTermination {
    fn is_terminated(&mut self, solver_scope: &SolverScope) -> bool {
        // Every child is polled so stateful ones keep their counters current.
        let mut fired = None;
        for t in &mut self.terminations {
            if t.is_terminated(solver_scope) && fired.is_none() {
                fired = Some(t.reason());
            }
        }
        if fired.is_some() {
            self.fired = fired;
        }
        fired.is_some()
    }

    fn reason(&self) -> TerminationReason {
        self.fired.unwrap_or(TerminationReason::StepLimit)
    }
}

//! Local search phase and its acceptors.

mod acceptor;
mod phase;

pub use acceptor::{Acceptor, MoveTabuAcceptor, SimulatedAnnealingAcceptor};
pub use phase::LocalSearchPhase;

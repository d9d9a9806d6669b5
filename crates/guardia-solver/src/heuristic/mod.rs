//! Moves and move selection.

mod moves;
mod selector;

pub use moves::Move;
pub use selector::MoveSelector;

#[cfg(test)]
mod tests;

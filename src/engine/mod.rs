/// Board evolution modes and their persistence rules
pub mod evolution;
/// Bounded neighbour counting over a frozen snapshot
pub mod neighbors;
/// Single-cell rule and whole-board transition
pub mod rules;

pub use evolution::{EvolutionController, EvolutionObserver};

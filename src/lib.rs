//! Conway's Game of Life as a store of evolving boards
//!
//! Boards are created from a boolean matrix or a random fill, then advanced
//! one generation at a time, by an exact number of generations, or until
//! they reach a fixed point. Every operation loads a board by identifier,
//! evolves an owned copy and persists only the final result.

#![forbid(unsafe_code)]

/// Board state, identifiers and construction
pub mod board;
/// Transition rule and evolution orchestration
pub mod engine;
/// Input/output operations, configuration and error handling
pub mod io;
/// Board persistence interface and implementations
pub mod store;

pub use board::{Board, BoardId};
pub use engine::{EvolutionController, EvolutionObserver};
pub use io::error::{BoardError, ErrorKind, Result};
pub use store::{BoardStore, InMemoryStore, JsonFileStore};

//! Board data model and construction
//!
//! This module contains:
//! - The board state and its identifier
//! - Validation and construction from matrices or random fill

/// Board state, identifiers and cell access
pub mod grid;
/// Construction of new boards from raw input
pub mod validation;

pub use grid::{Board, BoardId, ParseBoardIdError};

//! Persisted board layout
//!
//! Records carry the identifier, dimensions, the flat row-major cell array,
//! the generation and the population. Restoring a record re-checks every
//! board invariant so that corrupt data surfaces as a storage error instead
//! of an inconsistent board.

use bitvec::prelude::*;
use serde::{Deserialize, Serialize};

use crate::board::validation::check_dimensions;
use crate::board::{Board, BoardId};
use crate::io::error::{Result, storage_error};

/// Serializable form of a [`Board`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardRecord {
    /// Board identifier in hyphenated hexadecimal form
    pub id: String,
    /// Number of rows
    pub rows: usize,
    /// Number of columns
    pub columns: usize,
    /// Row-major cells, `true` for alive
    pub cells: Vec<bool>,
    /// Generation counter
    pub generation: u64,
    /// Alive-cell count
    pub population: usize,
}

impl From<&Board> for BoardRecord {
    fn from(board: &Board) -> Self {
        Self {
            id: board.id().to_string(),
            rows: board.rows(),
            columns: board.columns(),
            cells: board.cells().iter().by_vals().collect(),
            generation: board.generation(),
            population: board.population(),
        }
    }
}

impl BoardRecord {
    /// Rebuild the board described by this record
    ///
    /// # Errors
    ///
    /// Returns a storage error if:
    /// - The identifier cannot be parsed
    /// - The dimensions are outside the accepted range
    /// - The cell count differs from `rows * columns`
    /// - The generation is zero
    /// - The stored population differs from the alive-cell count
    pub fn into_board(self) -> Result<Board> {
        let id: BoardId = self
            .id
            .parse()
            .map_err(|e| storage_error("restore board", &e))?;

        check_dimensions(self.rows, self.columns)
            .map_err(|e| storage_error("restore board", &format!("board {id}: {e}")))?;

        let expected = self.rows * self.columns;
        if self.cells.len() != expected {
            return Err(storage_error(
                "restore board",
                &format!(
                    "board {id} has {} cells, expected {expected}",
                    self.cells.len()
                ),
            ));
        }

        if self.generation == 0 {
            return Err(storage_error(
                "restore board",
                &format!("board {id} has generation 0"),
            ));
        }

        let cells: BitVec = self.cells.into_iter().collect();
        let board = Board::from_parts(id, self.rows, self.columns, cells, self.generation);
        if board.population() != self.population {
            return Err(storage_error(
                "restore board",
                &format!(
                    "board {id} records population {} but has {} alive cells",
                    self.population,
                    board.population()
                ),
            ));
        }

        Ok(board)
    }
}

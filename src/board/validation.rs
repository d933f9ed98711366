//! Board construction from raw input
//!
//! Every board enters the system through this module, which enforces the
//! size rules and derives the initial population from the actual cells.

use bitvec::prelude::*;
use rand::Rng;

use crate::board::grid::{Board, BoardId};
use crate::io::configuration::{MAX_GRID_DIMENSION, MIN_DIMENSION};
use crate::io::error::{BoardError, Result};

/// Generation number of a freshly created board
pub const INITIAL_GENERATION: u64 = 1;

/// Check that a board of `rows` x `columns` may be created
///
/// # Errors
///
/// Returns [`BoardError::DimensionsTooSmall`] when either side is below the
/// minimum and [`BoardError::DimensionsTooLarge`] when either side exceeds
/// the allocation limit.
pub const fn check_dimensions(rows: usize, columns: usize) -> Result<()> {
    if rows < MIN_DIMENSION || columns < MIN_DIMENSION {
        return Err(BoardError::DimensionsTooSmall { rows, columns });
    }
    if rows > MAX_GRID_DIMENSION || columns > MAX_GRID_DIMENSION {
        return Err(BoardError::DimensionsTooLarge {
            rows,
            columns,
            max: MAX_GRID_DIMENSION,
        });
    }
    Ok(())
}

/// Build a generation-1 board from a matrix of rows
///
/// The column count is the length of the first row (zero when there are no
/// rows). Cells are flattened row-major.
///
/// # Errors
///
/// Returns an error if:
/// - The matrix has fewer than 3 rows or its first row fewer than 3 columns
/// - Any row's length differs from the first row's
pub fn from_matrix<R: AsRef<[bool]>>(matrix: &[R]) -> Result<Board> {
    let rows = matrix.len();
    let columns = matrix.first().map_or(0, |row| row.as_ref().len());
    check_dimensions(rows, columns)?;

    let mut cells = BitVec::with_capacity(rows * columns);
    for (index, row) in matrix.iter().enumerate() {
        let row = row.as_ref();
        if row.len() != columns {
            return Err(BoardError::InconsistentRowLengths {
                row: index,
                expected: columns,
                actual: row.len(),
            });
        }
        cells.extend(row.iter().copied());
    }

    Ok(Board::from_parts(
        BoardId::generate(),
        rows,
        columns,
        cells,
        INITIAL_GENERATION,
    ))
}

/// Build a generation-1 board with every cell alive with probability 1/2
///
/// The generator is injected so that seeded runs are reproducible.
///
/// # Errors
///
/// Returns an error if the dimensions are rejected by [`check_dimensions`]
pub fn from_random<G: Rng + ?Sized>(rows: usize, columns: usize, rng: &mut G) -> Result<Board> {
    check_dimensions(rows, columns)?;

    let cells: BitVec = (0..rows * columns).map(|_| rng.random::<bool>()).collect();

    Ok(Board::from_parts(
        BoardId::generate(),
        rows,
        columns,
        cells,
        INITIAL_GENERATION,
    ))
}

//! Game of Life transition rule applied to whole boards
//!
//! The next generation is always computed into a separate buffer while the
//! current cells stay frozen, so no cell ever observes a neighbour that was
//! already rewritten during the same step.

use bitvec::prelude::*;
use rayon::prelude::*;

use crate::board::Board;
use crate::engine::neighbors::alive_neighbor_count;
use crate::io::configuration::PARALLEL_CELL_THRESHOLD;

/// The outcome of applying the rule to a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Alive with fewer than two neighbours; dies
    Underpopulation,
    /// Alive with two or three neighbours; lives on
    Survival,
    /// Alive with more than three neighbours; dies
    Overpopulation,
    /// Dead with exactly three neighbours; becomes alive
    Birth,
    /// Dead with any other count; stays dead
    StaysDead,
}

impl Transition {
    /// Classify a cell by its current state and alive-neighbour count
    pub const fn classify(alive: bool, neighbors: u8) -> Self {
        match (alive, neighbors) {
            (true, 0 | 1) => Self::Underpopulation,
            (true, 2 | 3) => Self::Survival,
            (true, _) => Self::Overpopulation,
            (false, 3) => Self::Birth,
            (false, _) => Self::StaysDead,
        }
    }

    /// Whether the cell is alive after this transition
    pub const fn is_alive(self) -> bool {
        matches!(self, Self::Survival | Self::Birth)
    }
}

/// Next state of a single cell
pub const fn next_state(alive: bool, neighbors: u8) -> bool {
    Transition::classify(alive, neighbors).is_alive()
}

fn next_cell(snapshot: &BitSlice, rows: usize, columns: usize, index: usize) -> bool {
    let alive = snapshot.get(index).is_some_and(|bit| *bit);
    next_state(alive, alive_neighbor_count(snapshot, rows, columns, index))
}

/// Compute the next generation's cells on the calling thread
pub fn next_generation_serial(board: &Board) -> BitVec {
    let snapshot = board.cells();
    let (rows, columns) = (board.rows(), board.columns());

    (0..board.cell_count())
        .map(|index| next_cell(snapshot, rows, columns, index))
        .collect()
}

/// Compute the next generation's cells across the rayon thread pool
///
/// Each cell reads only the frozen snapshot, so the result is identical to
/// [`next_generation_serial`].
pub fn next_generation_parallel(board: &Board) -> BitVec {
    let snapshot = board.cells();
    let (rows, columns) = (board.rows(), board.columns());

    let cells: Vec<bool> = (0..board.cell_count())
        .into_par_iter()
        .map(|index| next_cell(snapshot, rows, columns, index))
        .collect();

    cells.into_iter().collect()
}

/// Compute the next generation's cells without touching the board
///
/// Large boards use the parallel cell loop.
pub fn next_generation(board: &Board) -> BitVec {
    if board.cell_count() >= PARALLEL_CELL_THRESHOLD {
        next_generation_parallel(board)
    } else {
        next_generation_serial(board)
    }
}

/// Apply one transition to the board
///
/// Keeps the identifier, replaces the cells, increments the generation by
/// one and recomputes the population. Never fails for a well-formed board.
#[must_use]
pub fn step(mut board: Board) -> Board {
    let next = next_generation(&board);
    board.replace_cells(next);
    board
}

//! Board state with row-major cell storage
//!
//! A board owns its cells as a packed bit vector. Dimensions and identifier
//! are fixed at creation; cells, generation and population only change
//! together through [`Board::replace_cells`], so the population can never
//! drift from the actual alive-cell count.

use std::fmt;
use std::str::FromStr;

use bitvec::prelude::*;
use ndarray::Array2;
use rand::Rng;

/// Opaque unique identifier of a board
///
/// Rendered in the familiar 8-4-4-4-12 hexadecimal grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoardId(u128);

impl BoardId {
    /// Draw a fresh identifier from the thread-local generator
    pub fn generate() -> Self {
        Self(rand::rng().random())
    }

    /// Wrap a raw identifier value
    pub const fn from_u128(value: u128) -> Self {
        Self(value)
    }

    /// Raw identifier value
    pub const fn as_u128(self) -> u128 {
        self.0
    }
}

// Digit counts of the hyphenated form
const HYPHEN_GROUPS: [usize; 5] = [8, 4, 4, 4, 12];

impl fmt::Display for BoardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex = format!("{:032x}", self.0);
        let (a, rest) = hex.split_at(8);
        let (b, rest) = rest.split_at(4);
        let (c, rest) = rest.split_at(4);
        let (d, e) = rest.split_at(4);
        write!(f, "{a}-{b}-{c}-{d}-{e}")
    }
}

/// Failure to parse a [`BoardId`] from text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseBoardIdError {
    input: String,
}

impl fmt::Display for ParseBoardIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not a valid board identifier", self.input)
    }
}

impl std::error::Error for ParseBoardIdError {}

impl FromStr for BoardId {
    type Err = ParseBoardIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let groups: Vec<&str> = s.split('-').collect();
        let well_formed = match groups.as_slice() {
            [plain] => plain.len() == 32,
            [a, b, c, d, e] => [a.len(), b.len(), c.len(), d.len(), e.len()] == HYPHEN_GROUPS,
            _ => false,
        };
        let digits = groups.concat();
        if !well_formed || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ParseBoardIdError {
                input: s.to_string(),
            });
        }
        u128::from_str_radix(&digits, 16)
            .map(Self)
            .map_err(|_parse_error| ParseBoardIdError {
                input: s.to_string(),
            })
    }
}

/// A Game of Life board
///
/// Cells are stored row-major: the cell at `(row, column)` lives at index
/// `row * columns + column`. Alive cells are set bits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    id: BoardId,
    rows: usize,
    columns: usize,
    cells: BitVec,
    generation: u64,
    population: usize,
}

impl Board {
    /// Assemble a board from already validated parts
    ///
    /// The population is always derived from `cells`. Callers guarantee
    /// `cells.len() == rows * columns`.
    pub(crate) fn from_parts(
        id: BoardId,
        rows: usize,
        columns: usize,
        cells: BitVec,
        generation: u64,
    ) -> Self {
        let population = cells.count_ones();
        Self {
            id,
            rows,
            columns,
            cells,
            generation,
            population,
        }
    }

    /// Identifier assigned at creation
    pub const fn id(&self) -> BoardId {
        self.id
    }

    /// Number of rows
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    pub const fn columns(&self) -> usize {
        self.columns
    }

    /// Total number of cells (`rows * columns`)
    pub const fn cell_count(&self) -> usize {
        self.rows * self.columns
    }

    /// Transitions applied since creation, starting at 1
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of alive cells
    pub const fn population(&self) -> usize {
        self.population
    }

    /// Row-major cell bits
    pub fn cells(&self) -> &BitSlice {
        &self.cells
    }

    /// Whether the cell at `(row, column)` is alive
    ///
    /// Positions outside the board read as dead.
    pub fn is_alive(&self, row: usize, column: usize) -> bool {
        if row >= self.rows || column >= self.columns {
            return false;
        }
        self.cells
            .get(row * self.columns + column)
            .is_some_and(|bit| *bit)
    }

    /// Positions of all alive cells as `(row, column)` pairs in row-major order
    pub fn alive_positions(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter_ones()
            .map(|index| (index / self.columns, index % self.columns))
            .collect()
    }

    /// Cells as a list of rows
    pub fn to_matrix(&self) -> Vec<Vec<bool>> {
        self.cells
            .chunks(self.columns)
            .map(|row| row.iter().by_vals().collect())
            .collect()
    }

    /// Cells as a two-dimensional array indexed by `[row, column]`
    pub fn to_array(&self) -> Array2<bool> {
        Array2::from_shape_fn((self.rows, self.columns), |(row, column)| {
            self.is_alive(row, column)
        })
    }

    /// Install the next generation's cells
    ///
    /// Advances the generation by one and recomputes the population.
    pub(crate) fn replace_cells(&mut self, next: BitVec) {
        debug_assert_eq!(next.len(), self.cells.len());
        self.cells = next;
        self.generation += 1;
        self.population = self.cells.count_ones();
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.columns) {
            let line: String = row
                .iter()
                .by_vals()
                .map(|alive| if alive { '#' } else { '.' })
                .collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

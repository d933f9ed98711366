//! Bounded Moore-neighbourhood counting
//!
//! The board does not wrap: positions beyond an edge simply do not exist,
//! so a corner cell has three neighbours and an edge cell five.

use bitvec::slice::BitSlice;

/// Relative `(row, column)` offsets of the eight surrounding cells
pub const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Count the alive neighbours of the cell at `index`
///
/// `snapshot` must hold the generation being superseded, row-major with
/// `rows * columns` cells. The result is in `0..=8`.
pub fn alive_neighbor_count(snapshot: &BitSlice, rows: usize, columns: usize, index: usize) -> u8 {
    let row = index / columns;
    let column = index % columns;

    let mut alive = 0;
    for (row_offset, column_offset) in NEIGHBOR_OFFSETS {
        let Some(neighbor_row) = row.checked_add_signed(row_offset) else {
            continue;
        };
        let Some(neighbor_column) = column.checked_add_signed(column_offset) else {
            continue;
        };
        if neighbor_row >= rows || neighbor_column >= columns {
            continue;
        }

        if snapshot
            .get(neighbor_row * columns + neighbor_column)
            .is_some_and(|bit| *bit)
        {
            alive += 1;
        }
    }

    alive
}

/// Number of in-bounds neighbour positions of the cell at `index`
///
/// This is the upper bound for [`alive_neighbor_count`] at that cell.
pub fn neighbor_capacity(rows: usize, columns: usize, index: usize) -> u8 {
    let row = index / columns;
    let column = index % columns;

    let span = |position: usize, limit: usize| -> u8 {
        let below = u8::from(position > 0);
        let above = u8::from(position + 1 < limit);
        1 + below + above
    };

    span(row, rows) * span(column, columns) - 1
}

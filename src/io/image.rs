//! PNG export of a single board generation

use crate::board::Board;
use crate::io::configuration::{ALIVE_COLOR, DEAD_COLOR};
use crate::io::error::{BoardError, Result, invalid_parameter};
use image::{ImageBuffer, Rgba, RgbaImage};
use std::path::Path;

/// Draw the board with each cell as a `cell_size` x `cell_size` square
///
/// # Errors
///
/// Returns an error if `cell_size` is zero or the image would exceed
/// `u32` pixel dimensions
pub fn render_board(board: &Board, cell_size: u32) -> Result<RgbaImage> {
    if cell_size == 0 {
        return Err(invalid_parameter(
            "cell_size",
            &cell_size,
            &"cell size must be greater than zero",
        ));
    }

    let width = u32::try_from(board.columns())
        .ok()
        .and_then(|columns| columns.checked_mul(cell_size));
    let height = u32::try_from(board.rows())
        .ok()
        .and_then(|rows| rows.checked_mul(cell_size));
    let (Some(width), Some(height)) = (width, height) else {
        return Err(invalid_parameter(
            "cell_size",
            &cell_size,
            &"rendered image would be too large",
        ));
    };

    let img = ImageBuffer::from_fn(width, height, |x, y| {
        let row = (y / cell_size) as usize;
        let column = (x / cell_size) as usize;
        if board.is_alive(row, column) {
            Rgba(ALIVE_COLOR)
        } else {
            Rgba(DEAD_COLOR)
        }
    });

    Ok(img)
}

/// Export the board as a PNG image
///
/// # Errors
///
/// Returns an error if:
/// - The board cannot be rendered at `cell_size`
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_board_as_png(board: &Board, cell_size: u32, output_path: &Path) -> Result<()> {
    let img = render_board(board, cell_size)?;

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| BoardError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(output_path)
        .map_err(|e| BoardError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}

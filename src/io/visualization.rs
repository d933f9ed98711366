//! Frame capture and GIF generation for board evolutions

use crate::board::Board;
use crate::engine::EvolutionObserver;
use crate::io::error::{BoardError, Result};
use crate::io::image::render_board;
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame};
use std::path::Path;

/// Captures every generation of an evolution for later animation
///
/// The first frame is the board as it was before the evolution started.
pub struct VisualizationCapture {
    frames: Vec<Board>,
    cell_size: u32,
}

impl VisualizationCapture {
    /// Start a capture from the board's current generation
    pub fn new(initial: &Board, cell_size: u32) -> Self {
        Self {
            frames: vec![initial.clone()],
            cell_size,
        }
    }

    /// Records one generation
    pub fn record(&mut self, board: &Board) {
        self.frames.push(board.clone());
    }

    /// Generations captured so far, oldest first
    pub fn frames(&self) -> &[Board] {
        &self.frames
    }

    /// Export the captured generations as an animated GIF
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A frame cannot be rendered
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif(&self, output_path: &Path, frame_delay_ms: u32) -> Result<()> {
        let delay = Delay::from_numer_denom_ms(frame_delay_ms, 1);
        let frames = self
            .frames
            .iter()
            .map(|board| {
                render_board(board, self.cell_size)
                    .map(|img| Frame::from_parts(img, 0, 0, delay))
            })
            .collect::<Result<Vec<_>>>()?;

        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| BoardError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }

        let file = std::fs::File::create(output_path).map_err(|e| BoardError::FileSystem {
            path: output_path.to_path_buf(),
            operation: "create file",
            source: e,
        })?;

        let export_error = |e: image::ImageError| BoardError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        };

        let mut encoder = GifEncoder::new(file);
        encoder
            .set_repeat(Repeat::Infinite)
            .map_err(export_error)?;
        encoder.encode_frames(frames).map_err(export_error)?;

        Ok(())
    }
}

impl EvolutionObserver for VisualizationCapture {
    fn on_step(&mut self, board: &Board) {
        self.record(board);
    }
}

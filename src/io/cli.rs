//! Command-line interface for creating, evolving and rendering stored boards

use crate::board::{Board, BoardId};
use crate::engine::EvolutionController;
use crate::io::configuration::{
    DEFAULT_ADVANCE_GENERATIONS, DEFAULT_ATTEMPTS, DEFAULT_CELL_SIZE, DEFAULT_GENERATIONS,
    DEFAULT_RANDOM_COLUMNS, DEFAULT_RANDOM_ROWS, DEFAULT_STORE_PATH, GIF_FRAME_DELAY_MS,
};
use crate::io::error::{BoardError, Result};
use crate::io::image::export_board_as_png;
use crate::io::progress::GenerationProgress;
use crate::io::visualization::VisualizationCapture;
use crate::store::{BoardStore, JsonFileStore};
use clap::{Parser, Subcommand};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "lifeboard")]
#[command(
    author,
    version,
    about = "Create Game of Life boards and evolve them step by step"
)]
/// Command-line arguments for the board tool
pub struct Cli {
    /// JSON file holding all boards
    #[arg(long, global = true, default_value = DEFAULT_STORE_PATH)]
    pub store: PathBuf,

    /// Only log errors and suppress progress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log every applied generation
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Operation to perform
    #[command(subcommand)]
    pub command: Command,
}

/// Board operations exposed on the command line
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create a board from a JSON matrix of booleans ("-" reads stdin)
    Create {
        /// File containing `[[true, false, ...], ...]`
        #[arg(value_name = "MATRIX")]
        matrix: PathBuf,
    },

    /// Create a board with every cell alive with probability 1/2
    Random {
        /// Number of rows
        #[arg(short, long, default_value_t = DEFAULT_RANDOM_ROWS)]
        rows: usize,

        /// Number of columns
        #[arg(short, long, default_value_t = DEFAULT_RANDOM_COLUMNS)]
        cols: usize,

        /// Random seed for a reproducible fill
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Show a board
    Get {
        /// Board identifier
        id: BoardId,
    },

    /// Advance a board by one generation, or by `--generations`
    Next {
        /// Board identifier
        id: BoardId,

        /// Number of generations to apply
        #[arg(short, long, default_value_t = DEFAULT_GENERATIONS)]
        generations: usize,

        /// Write the evolution as an animated GIF
        #[arg(long, value_name = "GIF")]
        gif: Option<PathBuf>,
    },

    /// Advance a board by exactly N generations
    Advance {
        /// Board identifier
        id: BoardId,

        /// Number of generations to apply
        #[arg(default_value_t = DEFAULT_ADVANCE_GENERATIONS)]
        generations: usize,

        /// Write the evolution as an animated GIF
        #[arg(long, value_name = "GIF")]
        gif: Option<PathBuf>,
    },

    /// Step a board until it stops changing
    Stabilize {
        /// Board identifier
        id: BoardId,

        /// Maximum number of generations to try
        #[arg(short, long, default_value_t = DEFAULT_ATTEMPTS)]
        attempts: usize,

        /// Write the evolution as an animated GIF
        #[arg(long, value_name = "GIF")]
        gif: Option<PathBuf>,
    },

    /// List all stored boards
    List,

    /// Delete a board
    Delete {
        /// Board identifier
        id: BoardId,
    },

    /// Render a board to a PNG image
    Render {
        /// Board identifier
        id: BoardId,

        /// Output PNG path
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Edge length of one cell in pixels
        #[arg(long, default_value_t = DEFAULT_CELL_SIZE)]
        cell_size: u32,
    },
}

impl Cli {
    /// Default log filter implied by the verbosity flags
    pub const fn log_filter(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose {
            "debug"
        } else {
            "info"
        }
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Random fill seed requested by the command, if any
    pub const fn seed(&self) -> Option<u64> {
        match self.command {
            Command::Random { seed, .. } => seed,
            _ => None,
        }
    }

    /// Controller over the JSON store named on the command line
    pub fn controller(&self) -> EvolutionController<JsonFileStore> {
        let store = JsonFileStore::new(&self.store);
        match self.seed() {
            Some(seed) => EvolutionController::with_seed(store, seed),
            None => EvolutionController::new(store),
        }
    }

    /// Run the command against `controller`, writing the report to `out`
    ///
    /// # Errors
    ///
    /// Returns an error if the board operation fails, the matrix input
    /// cannot be read, an image cannot be exported, or `out` cannot be
    /// written
    pub fn execute<S: BoardStore, W: Write>(
        &self,
        controller: &mut EvolutionController<S>,
        out: &mut W,
    ) -> Result<()> {
        match &self.command {
            Command::Create { matrix } => {
                let matrix = read_matrix(matrix)?;
                let board = controller.create_from_matrix(&matrix)?;
                write_board(out, &board)
            }
            Command::Random { rows, cols, .. } => {
                let board = controller.create_random(*rows, *cols)?;
                write_board(out, &board)
            }
            Command::Get { id } => write_board(out, &controller.get(*id)?),
            Command::Next {
                id,
                generations,
                gif,
            } => {
                let board = self.observed(controller, *id, *generations, gif.as_deref(), |c, o| {
                    c.evolve_observed(*id, *generations, o)
                })?;
                write_board(out, &board)
            }
            Command::Advance {
                id,
                generations,
                gif,
            } => {
                let board = self.observed(controller, *id, *generations, gif.as_deref(), |c, o| {
                    c.advance_observed(*id, *generations, o)
                })?;
                write_board(out, &board)
            }
            Command::Stabilize { id, attempts, gif } => {
                let board = self.observed(controller, *id, *attempts, gif.as_deref(), |c, o| {
                    c.stabilize_observed(*id, *attempts, o)
                })?;
                write_board(out, &board)
            }
            Command::List => {
                for board in controller.list()? {
                    writeln!(
                        out,
                        "{}  {}x{}  generation {}  population {}",
                        board.id(),
                        board.rows(),
                        board.columns(),
                        board.generation(),
                        board.population()
                    )?;
                }
                Ok(())
            }
            Command::Delete { id } => {
                controller.delete(*id)?;
                writeln!(out, "deleted {id}")?;
                Ok(())
            }
            Command::Render {
                id,
                output,
                cell_size,
            } => {
                let board = controller.get(*id)?;
                export_board_as_png(&board, *cell_size, output)?;
                writeln!(out, "rendered {id} to {}", output.display())?;
                Ok(())
            }
        }
    }

    // Wraps an evolution with a progress bar and optional GIF capture
    fn observed<S, F>(
        &self,
        controller: &mut EvolutionController<S>,
        id: BoardId,
        total: usize,
        gif: Option<&Path>,
        evolve: F,
    ) -> Result<Board>
    where
        S: BoardStore,
        F: FnOnce(
            &mut EvolutionController<S>,
            &mut (GenerationProgress, Option<VisualizationCapture>),
        ) -> Result<Board>,
    {
        let progress = if self.should_show_progress() {
            GenerationProgress::new(&id.to_string(), total)
        } else {
            GenerationProgress::hidden()
        };

        let capture = gif
            .map(|_| {
                controller
                    .get(id)
                    .map(|initial| VisualizationCapture::new(&initial, DEFAULT_CELL_SIZE))
            })
            .transpose()?;

        let mut observer = (progress, capture);
        let result = evolve(controller, &mut observer);
        observer.0.finish();
        let board = result?;

        if let (Some(path), Some(capture)) = (gif, &observer.1) {
            capture.export_gif(path, GIF_FRAME_DELAY_MS)?;
        }

        Ok(board)
    }
}

/// Read a JSON boolean matrix from a file, or from stdin for `-`
///
/// # Errors
///
/// Returns an error if the input cannot be read or is not a JSON array of
/// boolean arrays
pub fn read_matrix(path: &Path) -> Result<Vec<Vec<bool>>> {
    let contents = if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| BoardError::FileSystem {
                path: path.to_path_buf(),
                operation: "read matrix",
                source: e,
            })?;
        buffer
    } else {
        std::fs::read_to_string(path).map_err(|e| BoardError::FileSystem {
            path: path.to_path_buf(),
            operation: "read matrix",
            source: e,
        })?
    };

    serde_json::from_str(&contents).map_err(|e| BoardError::Serialization {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Write a board summary followed by its cells
///
/// # Errors
///
/// Returns an error if `out` cannot be written
pub fn write_board<W: Write>(out: &mut W, board: &Board) -> Result<()> {
    writeln!(out, "board {}", board.id())?;
    writeln!(
        out,
        "{}x{}  generation {}  population {}",
        board.rows(),
        board.columns(),
        board.generation(),
        board.population()
    )?;
    write!(out, "{board}")?;
    Ok(())
}

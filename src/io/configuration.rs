//! Board limits and runtime configuration defaults

// Board size limits
/// Minimum number of rows and columns for any board
pub const MIN_DIMENSION: usize = 3;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed board dimension
pub const MAX_GRID_DIMENSION: usize = 10_000;

// Default values for configurable parameters
/// Rows of a random board when none are requested
pub const DEFAULT_RANDOM_ROWS: usize = 3;
/// Columns of a random board when none are requested
pub const DEFAULT_RANDOM_COLUMNS: usize = 3;

/// Generations applied by `next` when no count is given
pub const DEFAULT_GENERATIONS: usize = 1;

/// Generations applied by an N-step advance when no count is given
pub const DEFAULT_ADVANCE_GENERATIONS: usize = 10;

/// Attempts made by the stabilization search when none are given
pub const DEFAULT_ATTEMPTS: usize = 10;

// Below this size the rayon fan-out costs more than it saves
/// Cell count at which a step switches to the parallel cell loop
pub const PARALLEL_CELL_THRESHOLD: usize = 128 * 128;

// Storage settings
/// Board store file used by the CLI when no path is given
pub const DEFAULT_STORE_PATH: &str = "boards.json";

// Progress bar display settings
/// Generation count from which the CLI shows a progress bar
pub const PROGRESS_MIN_GENERATIONS: usize = 100;
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

// Output settings
/// Edge length of one cell in rendered images (in pixels)
pub const DEFAULT_CELL_SIZE: u32 = 8;
/// Delay between GIF animation frames
pub const GIF_FRAME_DELAY_MS: u32 = 100;
/// Colour of alive cells in rendered images
pub const ALIVE_COLOR: [u8; 4] = [20, 20, 20, 255];
/// Colour of dead cells in rendered images
pub const DEAD_COLOR: [u8; 4] = [245, 245, 245, 255];

/// Command-line parsing and command execution
pub mod cli;
/// Board limits and runtime defaults
pub mod configuration;
/// Error types shared by every operation
pub mod error;
/// PNG rendering of single generations
pub mod image;
/// Terminal progress bars for long evolutions
pub mod progress;
/// GIF capture of whole evolutions
pub mod visualization;

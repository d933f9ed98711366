//! Error types for board creation, evolution and storage

use std::fmt;
use std::path::PathBuf;

use crate::board::BoardId;
use crate::io::configuration::MIN_DIMENSION;

/// Broad classification of a [`BoardError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad input; nothing was persisted
    Validation,
    /// The requested board does not exist
    NotFound,
    /// A stabilization search ran out of attempts
    ConvergenceNotFound,
    /// The board store failed to load or save
    Storage,
}

/// Main error type for all board operations
#[derive(Debug)]
pub enum BoardError {
    /// Board has fewer than three rows or columns
    DimensionsTooSmall {
        /// Requested row count
        rows: usize,
        /// Requested column count
        columns: usize,
    },

    /// Board exceeds the allocation safety limit
    DimensionsTooLarge {
        /// Requested row count
        rows: usize,
        /// Requested column count
        columns: usize,
        /// Largest accepted dimension
        max: usize,
    },

    /// Matrix rows differ in length
    InconsistentRowLengths {
        /// Index of the first row whose length differs
        row: usize,
        /// Length of the first row
        expected: usize,
        /// Length of the offending row
        actual: usize,
    },

    /// Operation parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// No board is stored under the identifier
    NotFound {
        /// The unknown identifier
        id: BoardId,
    },

    /// No fixed point was reached within the attempt budget
    ConvergenceNotFound {
        /// Attempts made before giving up
        attempts: usize,
    },

    /// The board store reported a failure
    Storage {
        /// Store operation that failed
        operation: &'static str,
        /// Description of the failure
        reason: String,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// JSON encoding or decoding failed
    Serialization {
        /// File being read or written
        path: PathBuf,
        /// Underlying serde error
        source: serde_json::Error,
    },

    /// Failed to write a rendered image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },
}

impl BoardError {
    /// Classify the error into the broad failure categories
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::DimensionsTooSmall { .. }
            | Self::DimensionsTooLarge { .. }
            | Self::InconsistentRowLengths { .. }
            | Self::InvalidParameter { .. } => ErrorKind::Validation,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::ConvergenceNotFound { .. } => ErrorKind::ConvergenceNotFound,
            Self::Storage { .. }
            | Self::FileSystem { .. }
            | Self::Serialization { .. }
            | Self::ImageExport { .. } => ErrorKind::Storage,
        }
    }
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DimensionsTooSmall { rows, columns } => {
                write!(
                    f,
                    "dimensions too small: board must be at least {MIN_DIMENSION}x{MIN_DIMENSION}, got {rows}x{columns}"
                )
            }
            Self::DimensionsTooLarge { rows, columns, max } => {
                write!(
                    f,
                    "dimensions too large: board is {rows}x{columns}, limit is {max} per side"
                )
            }
            Self::InconsistentRowLengths {
                row,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "inconsistent row lengths: row {row} has {actual} cells, expected {expected}"
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::NotFound { id } => write!(f, "board not found: {id}"),
            Self::ConvergenceNotFound { attempts } => {
                write!(f, "final state not achieved after {attempts} attempts")
            }
            Self::Storage { operation, reason } => {
                write!(f, "storage error during {operation}: {reason}")
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::Serialization { path, source } => {
                write!(f, "Malformed board data in '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for BoardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FileSystem { source, .. } => Some(source),
            Self::Serialization { source, .. } => Some(source),
            Self::ImageExport { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for board results
pub type Result<T> = std::result::Result<T, BoardError>;

impl From<std::io::Error> for BoardError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> BoardError {
    BoardError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a storage error
pub fn storage_error(operation: &'static str, reason: &impl ToString) -> BoardError {
    BoardError::Storage {
        operation,
        reason: reason.to_string(),
    }
}

//! Error types for turn snapshots.

use std::fmt;

use crate::types::Coord;

/// Why a snapshot cannot be decided on.
///
/// Every variant is fatal for the current turn only; the service layer
/// reports it to the caller instead of guessing a move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    /// Board width or height is not positive.
    InvalidDimensions { width: i32, height: i32 },
    /// A snake reported no body segments.
    EmptyBody { snake_id: String },
    /// A snake reported a length below one.
    InvalidLength { snake_id: String, length: i32 },
    /// Health outside `0..=100`.
    InvalidHealth { snake_id: String, health: i32 },
    /// A reported position lies off the board.
    OutOfBounds { what: &'static str, coord: Coord },
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::InvalidDimensions { width, height } => {
                write!(f, "invalid board dimensions {width}x{height}")
            }
            SnapshotError::EmptyBody { snake_id } => {
                write!(f, "snake '{snake_id}' has an empty body")
            }
            SnapshotError::InvalidLength { snake_id, length } => {
                write!(f, "snake '{snake_id}' has invalid length {length}")
            }
            SnapshotError::InvalidHealth { snake_id, health } => {
                write!(f, "snake '{snake_id}' has invalid health {health}")
            }
            SnapshotError::OutOfBounds { what, coord } => {
                write!(f, "{what} at ({}, {}) is outside the board", coord.x, coord.y)
            }
        }
    }
}

impl std::error::Error for SnapshotError {}

/// Result type for snapshot validation and grid construction.
pub type SnapshotResult<T> = Result<T, SnapshotError>;

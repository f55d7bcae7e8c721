//! Crate error type
//!
//! Nothing in the steady-state tick fails; errors come from construction
//! (degenerate entities, badly shaped grids) and from decoding settings or levels.

use thiserror::Error;

/// Errors raised while building a board or reading its inputs.
#[derive(Debug, Error)]
pub enum SimError {
    /// Level grid does not match the board's `cells_y` x `cells_x` shape.
    #[error("grid shape mismatch: expected {expected_rows}x{expected_cols}, found row {row} with {found} cells")]
    GridShape {
        expected_rows: usize,
        expected_cols: usize,
        row: usize,
        found: usize,
    },
    /// Ball direction has zero length and cannot be normalized.
    #[error("ball direction ({x}, {y}) has zero length")]
    DegenerateDirection { x: f32, y: f32 },
    /// Ball speed is negative or not finite.
    #[error("invalid ball speed: {0}")]
    InvalidSpeed(f32),
    /// Level JSON could not be parsed or written.
    #[error("level error: {0}")]
    Level(#[source] serde_json::Error),
    /// Settings JSON could not be parsed.
    #[error("config error: {0}")]
    Config(#[source] serde_json::Error),
    /// I/O failure reading settings or level files.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;

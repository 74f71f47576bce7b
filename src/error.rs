//! Error types for segmentation and scoring.

use thiserror::Error;

/// Errors that can occur while segmenting or scoring a label buffer.
#[derive(Debug, Error)]
pub enum SegmentationError {
    /// Two rasters that must share a shape do not.
    #[error("dimension mismatch: expected {}x{}, got {}x{}", expected.0, expected.1, actual.0, actual.1)]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// A label buffer cell holds a value outside the reserved range.
    #[error("invalid label {value} at ({x}, {y})")]
    InvalidLabel { x: u32, y: u32, value: i32 },

    /// A configuration value outside its documented domain.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A score sequence that does not line up with the regions of its buffer.
    #[error("score count mismatch: {expected} regions, {actual} scores")]
    ScoreCountMismatch { expected: usize, actual: usize },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for segmentation operations
pub type Result<T> = std::result::Result<T, SegmentationError>;

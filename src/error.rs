//! Error types for pattern storage and recall

use thiserror::Error;

/// Result type for this library
pub type Result<T> = std::result::Result<T, HopfieldError>;

/// Reasons a pattern or pattern set is rejected
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PatternError {
    /// No patterns were supplied to the store
    #[error("pattern set is empty")]
    EmptySet,

    /// A pattern with zero units
    #[error("pattern must contain at least one unit")]
    EmptyPattern,

    /// A pattern whose length differs from the first pattern in the set
    #[error("pattern {index} has length {actual}, expected {expected}")]
    LengthMismatch {
        index: usize,
        expected: usize,
        actual: usize,
    },

    /// An element outside {-1, +1}
    #[error("value {value} at position {position} is not bipolar (-1 or +1)")]
    NonBipolar { position: usize, value: f64 },

    /// A grid row whose width differs from the others
    #[error("grid row {row} has width {actual}, expected {expected}")]
    RaggedGrid {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// An unknown character in a text grid
    #[error("unexpected character {0:?} in pattern grid")]
    InvalidGlyph(char),
}

/// Library error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HopfieldError {
    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] PatternError),

    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

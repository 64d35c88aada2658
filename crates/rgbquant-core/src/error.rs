//! Error types for rgbquant-core
//!
//! Palette construction is the only fallible operation in this crate; every
//! variant carries the sizes involved so callers can report them directly.

use thiserror::Error;

/// rgbquant-core error type
#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    /// Requested palette capacity is outside `1..=256`
    #[error("invalid palette capacity: {0} (expected 1..=256)")]
    InvalidCapacity(usize),

    /// Palette already holds `capacity` entries
    #[error("palette full: capacity {capacity}")]
    PaletteFull { capacity: usize },

    /// Index out of bounds
    #[error("index out of bounds: {index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Byte buffer is not a whole number of 4-byte entries
    #[error("invalid palette byte length: {0} (expected a multiple of 4)")]
    InvalidByteLength(usize),
}

/// Result type alias for rgbquant-core operations
pub type Result<T> = std::result::Result<T, Error>;

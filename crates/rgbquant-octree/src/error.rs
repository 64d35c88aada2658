//! Error types for rgbquant-octree

use crate::quantizer::Phase;
use thiserror::Error;

/// Errors that can occur while building or querying an octree palette
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuantError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] rgbquant_core::Error),

    /// No tree depth has been configured
    #[error("quantizer not configured: set a tree depth first")]
    NotConfigured,

    /// Operation called out of phase order
    #[error("{operation} is not allowed in the {phase} phase")]
    InvalidPhase {
        operation: &'static str,
        phase: Phase,
    },

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// Caller-provided palette buffer is too short
    #[error("palette buffer too small: need {needed}, have {available}")]
    BufferTooSmall { needed: usize, available: usize },

    /// A node's accumulated weight or pixel count would wrap, either on
    /// a checked insert or when merging nodes during reduction
    #[error("accumulated weight overflow at node {level}:{index}")]
    WeightOverflow { level: u32, index: usize },

    /// No pixels to process
    #[error("empty input: no pixels to process")]
    EmptyInput,
}

/// Result type for quantization operations
pub type QuantResult<T> = Result<T, QuantError>;

//! Error types for quadpix-core
//!
//! Provides a unified error type for all operations in the core crate.
//! Each variant captures enough context for diagnostics without exposing
//! internal implementation details.

use thiserror::Error;

/// quadpix core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Image has zero width or height
    #[error("degenerate input: image dimensions {width}x{height}")]
    DegenerateInput { width: u32, height: u32 },

    /// Region is empty or reaches outside the image
    #[error("invalid region ({x}, {y}, {w}x{h}): {reason}")]
    InvalidRegion {
        x: u32,
        y: u32,
        w: u32,
        h: u32,
        reason: &'static str,
    },

    /// Index out of bounds
    #[error("index out of bounds: {index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for quadpix core operations
pub type Result<T> = std::result::Result<T, Error>;

//! Error types for quadpix-codec

use thiserror::Error;

/// Errors that can occur while encoding or decoding quadtree streams
#[derive(Debug, Error)]
pub enum CodecError {
    /// Tree construction error
    #[error("region error: {0}")]
    Region(#[from] quadpix_region::RegionError),

    /// The byte stream does not describe a valid quadtree
    #[error("corrupt stream: {0}")]
    CorruptStream(String),

    /// The tree cannot be represented in the stream format
    #[error("unsupported tree: {0}")]
    Unsupported(String),

    /// The byte transform failed
    #[error("compression error: {0}")]
    Compression(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for codec operations
pub type CodecResult<T> = Result<T, CodecError>;

/// Shorthand for a [`CodecError::CorruptStream`].
pub(crate) fn corrupt(msg: impl Into<String>) -> CodecError {
    CodecError::CorruptStream(msg.into())
}

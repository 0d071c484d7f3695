//! Error type for the end-to-end pipeline

use thiserror::Error;

/// Any failure along read, build, encode, decode or write
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Statistics or tree construction failed
    #[error("region error: {0}")]
    Region(#[from] quadpix_region::RegionError),

    /// Encoding, decoding or byte transform failed
    #[error("codec error: {0}")]
    Codec(#[from] quadpix_codec::CodecError),

    /// Reading or writing an image failed
    #[error("image I/O error: {0}")]
    Io(#[from] quadpix_io::IoError),

    /// Reading or writing a stream file failed
    #[error("file error: {0}")]
    File(#[from] std::io::Error),
}

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;

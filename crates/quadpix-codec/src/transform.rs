//! Optional whole-stream byte transforms
//!
//! The encoded stream may be passed through a reversible byte transform
//! before storage (general-purpose compression, for example). The
//! transform never sees the tree, only the finished bytes.

use quadpix_region::Quadtree;

use crate::decode::decode;
use crate::encode::encode;
use crate::error::CodecResult;

/// A reversible transform applied to a whole encoded stream.
pub trait ByteTransform {
    /// Short name for diagnostics.
    fn name(&self) -> &'static str;

    /// Transform encoded bytes for storage.
    fn compress(&self, data: &[u8]) -> CodecResult<Vec<u8>>;

    /// Undo [`ByteTransform::compress`].
    fn decompress(&self, data: &[u8]) -> CodecResult<Vec<u8>>;
}

/// Pass bytes through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl ByteTransform for Identity {
    fn name(&self) -> &'static str {
        "identity"
    }

    fn compress(&self, data: &[u8]) -> CodecResult<Vec<u8>> {
        Ok(data.to_vec())
    }

    fn decompress(&self, data: &[u8]) -> CodecResult<Vec<u8>> {
        Ok(data.to_vec())
    }
}

/// zlib-wrapped Deflate compression
#[cfg(feature = "deflate")]
#[derive(Debug, Clone, Copy)]
pub struct Deflate {
    level: u8,
    max_output: usize,
}

#[cfg(feature = "deflate")]
impl Deflate {
    /// Default compression level (0-10)
    pub const DEFAULT_LEVEL: u8 = 9;

    /// Default cap on decompressed size
    pub const DEFAULT_MAX_OUTPUT: usize = 1 << 30;

    pub fn new() -> Self {
        Self::default()
    }

    /// Set the compression level, clamped to 0-10.
    pub fn with_level(mut self, level: u8) -> Self {
        self.level = level.min(10);
        self
    }

    /// Set the largest stream `decompress` will produce.
    pub fn with_max_output(mut self, max_output: usize) -> Self {
        self.max_output = max_output;
        self
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn max_output(&self) -> usize {
        self.max_output
    }
}

#[cfg(feature = "deflate")]
impl Default for Deflate {
    fn default() -> Self {
        Self {
            level: Self::DEFAULT_LEVEL,
            max_output: Self::DEFAULT_MAX_OUTPUT,
        }
    }
}

#[cfg(feature = "deflate")]
impl ByteTransform for Deflate {
    fn name(&self) -> &'static str {
        "deflate"
    }

    fn compress(&self, data: &[u8]) -> CodecResult<Vec<u8>> {
        Ok(miniz_oxide::deflate::compress_to_vec_zlib(data, self.level))
    }

    fn decompress(&self, data: &[u8]) -> CodecResult<Vec<u8>> {
        miniz_oxide::inflate::decompress_to_vec_zlib_with_limit(data, self.max_output).map_err(|e| {
            crate::CodecError::Compression(format!("inflate failed: {:?}", e.status))
        })
    }
}

/// Encode `tree` and pass the stream through `transform`.
pub fn encode_with(tree: &Quadtree, transform: &impl ByteTransform) -> CodecResult<Vec<u8>> {
    let raw = encode(tree)?;
    let out = transform.compress(&raw)?;
    tracing::debug!(
        transform = transform.name(),
        raw = raw.len(),
        stored = out.len(),
        "applied byte transform"
    );
    Ok(out)
}

/// Undo `transform` and decode the resulting stream.
pub fn decode_with(data: &[u8], transform: &impl ByteTransform) -> CodecResult<Quadtree> {
    let raw = transform.decompress(data)?;
    decode(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quadpix_core::Rgb;

    #[test]
    fn test_identity() {
        assert_eq!(Identity.compress(&[1, 2, 3]).unwrap(), vec![1, 2, 3]);
        assert_eq!(Identity.decompress(&[4]).unwrap(), vec![4]);
    }

    #[test]
    fn test_identity_matches_plain_encode() {
        let tree = Quadtree::with_root(3, 5, Rgb::new(9, 8, 7), 0.0).unwrap();
        assert_eq!(encode_with(&tree, &Identity).unwrap(), encode(&tree).unwrap());
    }

    #[cfg(feature = "deflate")]
    #[test]
    fn test_deflate_round_trip() {
        let data: Vec<u8> = (0..4096u32).map(|i| (i % 7) as u8).collect();
        let deflate = Deflate::new().with_level(6);
        let packed = deflate.compress(&data).unwrap();
        assert!(packed.len() < data.len());
        assert_eq!(deflate.decompress(&packed).unwrap(), data);
    }

    #[cfg(feature = "deflate")]
    #[test]
    fn test_deflate_rejects_garbage() {
        assert!(matches!(
            Deflate::new().decompress(&[1, 2, 3, 4]),
            Err(crate::CodecError::Compression(_))
        ));
    }

    #[cfg(feature = "deflate")]
    #[test]
    fn test_deflate_limit() {
        let data = vec![0u8; 10_000];
        let deflate = Deflate::new().with_max_output(100);
        let packed = deflate.compress(&data).unwrap();
        assert!(deflate.decompress(&packed).is_err());
    }

    #[cfg(feature = "deflate")]
    #[test]
    fn test_level_clamped() {
        assert_eq!(Deflate::new().with_level(99).level(), 10);
    }
}

//! Stream layout
//!
//! ```text
//! offset  size                 field
//! 0       4                    width            (u32, little-endian)
//! 4       4                    height           (u32, little-endian)
//! 8       4                    bit_count        (u32, little-endian)
//! 12      ceil(bit_count / 8)  subdivision flags (preorder, 1 = internal)
//! ...     3 * leaves           leaf colors, R G B, preorder
//! ```
//!
//! `leaves` is the number of zero flags. Node geometry is never stored:
//! it follows from the image size and the quadrant split rule.

use crate::error::{CodecResult, corrupt};

/// Size of the fixed header in bytes.
pub const HEADER_LEN: usize = 12;

/// Bytes per leaf color.
pub const COLOR_LEN: usize = 3;

/// Fixed stream header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamHeader {
    pub width: u32,
    pub height: u32,
    pub bit_count: u32,
}

impl StreamHeader {
    /// Read and validate the header at the start of `data`.
    ///
    /// # Errors
    ///
    /// Returns `CorruptStream` if `data` is shorter than [`HEADER_LEN`] or
    /// any field is zero.
    pub fn parse(data: &[u8]) -> CodecResult<Self> {
        let header: &[u8; HEADER_LEN] = data
            .get(..HEADER_LEN)
            .and_then(|h| h.try_into().ok())
            .ok_or_else(|| {
                corrupt(format!(
                    "stream of {} bytes is shorter than the {HEADER_LEN}-byte header",
                    data.len()
                ))
            })?;
        let field = |i: usize| {
            u32::from_le_bytes([header[i], header[i + 1], header[i + 2], header[i + 3]])
        };
        let parsed = Self {
            width: field(0),
            height: field(4),
            bit_count: field(8),
        };
        if parsed.width == 0 || parsed.height == 0 {
            return Err(corrupt(format!(
                "zero image dimension {}x{}",
                parsed.width, parsed.height
            )));
        }
        if parsed.bit_count == 0 {
            return Err(corrupt("bit_count is zero"));
        }
        Ok(parsed)
    }

    /// Encoded header bytes.
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut out = [0u8; HEADER_LEN];
        out[0..4].copy_from_slice(&self.width.to_le_bytes());
        out[4..8].copy_from_slice(&self.height.to_le_bytes());
        out[8..12].copy_from_slice(&self.bit_count.to_le_bytes());
        out
    }

    /// Length of the packed flag section.
    pub fn bitset_len(&self) -> usize {
        (self.bit_count as usize).div_ceil(8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CodecError;

    #[test]
    fn test_little_endian_layout() {
        let header = StreamHeader {
            width: 0x0102_0304,
            height: 2,
            bit_count: 9,
        };
        let bytes = header.to_bytes();
        assert_eq!(&bytes[0..4], &[4, 3, 2, 1]);
        assert_eq!(&bytes[4..8], &[2, 0, 0, 0]);
        assert_eq!(header.bitset_len(), 2);
        assert_eq!(StreamHeader::parse(&bytes).unwrap(), header);
    }

    #[test]
    fn test_short_header() {
        assert!(matches!(
            StreamHeader::parse(&[1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0]),
            Err(CodecError::CorruptStream(_))
        ));
    }

    #[test]
    fn test_zero_fields_rejected() {
        let mut header = StreamHeader {
            width: 4,
            height: 4,
            bit_count: 1,
        };
        header.width = 0;
        assert!(StreamHeader::parse(&header.to_bytes()).is_err());
        header.width = 4;
        header.bit_count = 0;
        assert!(StreamHeader::parse(&header.to_bytes()).is_err());
    }
}

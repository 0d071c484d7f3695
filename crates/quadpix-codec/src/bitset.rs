//! Densely packed boolean flags
//!
//! Eight flags share one byte. Flag `i` lives in byte `i / 8` under mask
//! `1 << (i % 8)`, i.e. each byte is filled from its least significant bit
//! upward ([`Lsb0`] order). Unused bits of the last byte are zero.

use bitvec::order::Lsb0;
use bitvec::slice::BitSlice;
use bitvec::vec::BitVec;

use crate::error::{CodecResult, corrupt};

/// Growable flag buffer in stream bit order.
pub type FlagVec = BitVec<u8, Lsb0>;

/// Borrowed flags in stream bit order.
pub type FlagSlice = BitSlice<u8, Lsb0>;

/// Finish a flag buffer into bytes, zeroing the padding bits.
pub fn flags_into_bytes(mut flags: FlagVec) -> Vec<u8> {
    flags.set_uninitialized(false);
    flags.into_vec()
}

/// View `bytes` as exactly `len` flags.
///
/// # Errors
///
/// Returns `CorruptStream` if `bytes` is not exactly `ceil(len / 8)` long
/// or if any padding bit after the last flag is set.
pub fn flags_from_bytes(bytes: &[u8], len: usize) -> CodecResult<&FlagSlice> {
    if bytes.len() != len.div_ceil(8) {
        return Err(corrupt(format!(
            "bitset of {len} flags needs {} bytes, got {}",
            len.div_ceil(8),
            bytes.len()
        )));
    }
    let all = FlagSlice::try_from_slice(bytes)
        .map_err(|_| corrupt("bitset is too long to address"))?;
    let (flags, padding) = all.split_at(len);
    if padding.any() {
        return Err(corrupt("non-zero padding bits in bitset"));
    }
    Ok(flags)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CodecError;

    #[test]
    fn test_lsb_first_packing() {
        let mut flags = FlagVec::new();
        for bit in [true, false, false, false, false, false, false, false, false, true] {
            flags.push(bit);
        }
        assert_eq!(flags.len(), 10);
        assert_eq!(flags_into_bytes(flags), vec![0b0000_0001, 0b0000_0010]);
    }

    #[test]
    fn test_read_back() {
        let expected: Vec<bool> = (0..19).map(|i| i % 3 == 0).collect();
        let mut flags = FlagVec::with_capacity(expected.len());
        expected.iter().for_each(|&f| flags.push(f));
        let bytes = flags_into_bytes(flags);
        let view = flags_from_bytes(&bytes, expected.len()).unwrap();
        assert_eq!(view.count_zeros(), expected.iter().filter(|f| !**f).count());
        assert_eq!(view.iter().by_vals().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn test_wrong_length_rejected() {
        assert!(matches!(
            flags_from_bytes(&[0, 0], 8),
            Err(CodecError::CorruptStream(_))
        ));
        assert!(matches!(
            flags_from_bytes(&[], 1),
            Err(CodecError::CorruptStream(_))
        ));
    }

    #[test]
    fn test_padding_must_be_zero() {
        assert!(flags_from_bytes(&[0b0001_1111], 5).is_ok());
        assert!(matches!(
            flags_from_bytes(&[0b0010_0000], 5),
            Err(CodecError::CorruptStream(_))
        ));
    }
}

//! quadpix-codec - Compact binary format for quadpix quadtrees
//!
//! A stream stores the image size, one subdivision flag per node in
//! preorder and one RGB triple per leaf. Geometry is implied by the
//! quadrant split rule, so a tree of `n` nodes and `l` leaves costs
//! `12 + ceil(n / 8) + 3l` bytes.
//!
//! # Examples
//!
//! ```
//! use quadpix_core::Rgb;
//! use quadpix_codec::{decode, encode};
//! use quadpix_region::Quadtree;
//!
//! let tree = Quadtree::with_root(8, 8, Rgb::new(255, 0, 0), 0.0).unwrap();
//! let bytes = encode(&tree).unwrap();
//! assert_eq!(bytes.len(), 16);
//!
//! let decoded = decode(&bytes).unwrap();
//! assert_eq!(decoded.leaf_count(), 1);
//! ```

pub mod bitset;
pub mod decode;
pub mod encode;
pub mod error;
pub mod format;
pub mod transform;

pub use bitset::{FlagSlice, FlagVec, flags_from_bytes, flags_into_bytes};
pub use decode::decode;
pub use encode::{encode, encode_to_writer, encoded_len};
pub use error::{CodecError, CodecResult};
pub use format::{COLOR_LEN, HEADER_LEN, StreamHeader};
#[cfg(feature = "deflate")]
pub use transform::Deflate;
pub use transform::{ByteTransform, Identity, decode_with, encode_with};

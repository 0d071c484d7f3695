//! Quadtree to bytes

use std::io::Write;

use quadpix_region::Quadtree;
use tracing::debug;

use crate::bitset::{FlagVec, flags_into_bytes};
use crate::error::{CodecError, CodecResult};
use crate::format::{COLOR_LEN, HEADER_LEN, StreamHeader};

/// Serialize a quadtree.
///
/// Walks the tree in preorder, emitting one flag per node (1 = internal)
/// and one RGB triple per leaf. See [`crate::format`] for the layout.
///
/// # Errors
///
/// Returns [`CodecError::Unsupported`] if the tree has more than
/// `u32::MAX` nodes.
pub fn encode(tree: &Quadtree) -> CodecResult<Vec<u8>> {
    let mut out = Vec::with_capacity(encoded_len(tree));
    encode_to_writer(tree, &mut out)?;
    Ok(out)
}

/// Serialize a quadtree into `writer`.
pub fn encode_to_writer(tree: &Quadtree, writer: &mut impl Write) -> CodecResult<()> {
    let mut flags = FlagVec::with_capacity(tree.node_count());
    let mut colors = Vec::with_capacity(tree.leaf_count() * COLOR_LEN);
    for (_, node) in tree.preorder() {
        flags.push(node.is_subdivided());
        if node.is_leaf() {
            colors.extend_from_slice(&node.color().channels());
        }
    }

    let bit_count = u32::try_from(flags.len()).map_err(|_| {
        CodecError::Unsupported(format!("{} nodes exceed the u32 bit count", flags.len()))
    })?;
    let header = StreamHeader {
        width: tree.width(),
        height: tree.height(),
        bit_count,
    };
    let flag_bytes = flags_into_bytes(flags);

    writer.write_all(&header.to_bytes())?;
    writer.write_all(&flag_bytes)?;
    writer.write_all(&colors)?;
    debug!(
        width = header.width,
        height = header.height,
        bits = bit_count,
        leaves = colors.len() / COLOR_LEN,
        bytes = HEADER_LEN + flag_bytes.len() + colors.len(),
        "encoded quadtree"
    );
    Ok(())
}

/// Exact size of [`encode`]'s output for `tree`.
pub fn encoded_len(tree: &Quadtree) -> usize {
    HEADER_LEN + tree.node_count().div_ceil(8) + tree.leaf_count() * COLOR_LEN
}

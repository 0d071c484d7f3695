//! Bytes to quadtree
//!
//! Decoding is strict: the declared flag count, the flags the traversal
//! actually consumes and the number of colors present must all agree, or
//! the stream is rejected as corrupt. No partial tree is ever returned.

use quadpix_core::Rgb;
use quadpix_region::{NodeId, Quadtree};
use tracing::debug;

use crate::bitset::flags_from_bytes;
use crate::error::{CodecResult, corrupt};
use crate::format::{COLOR_LEN, HEADER_LEN, StreamHeader};

/// Reconstruct a quadtree from an encoded stream.
///
/// Geometry is rederived from the header dimensions and the quadrant split
/// rule. Internal nodes get the area-weighted mean of their children's
/// colors; detail scores are zero.
///
/// # Errors
///
/// Returns `CorruptStream` for a short or inconsistent stream.
pub fn decode(data: &[u8]) -> CodecResult<Quadtree> {
    let header = StreamHeader::parse(data)?;
    let bits_end = HEADER_LEN + header.bitset_len();
    let flag_bytes = data.get(HEADER_LEN..bits_end).ok_or_else(|| {
        corrupt(format!(
            "stream of {} bytes cannot hold {} flag bytes",
            data.len(),
            header.bitset_len()
        ))
    })?;
    let flag_bits = flags_from_bytes(flag_bytes, header.bit_count as usize)?;

    let color_bytes = &data[bits_end..];
    let leaves = flag_bits.count_zeros();
    if color_bytes.len() != leaves * COLOR_LEN {
        return Err(corrupt(format!(
            "{leaves} leaf flags need {} color bytes, stream has {}",
            leaves * COLOR_LEN,
            color_bytes.len()
        )));
    }
    let mut colors = color_bytes.chunks_exact(COLOR_LEN);
    let mut flags = flag_bits.iter().by_vals();
    let mut consumed = 0usize;

    let mut tree = Quadtree::with_root(header.width, header.height, Rgb::BLACK, 0.0)?;
    let mut stack = vec![NodeId::ROOT];
    while let Some(id) = stack.pop() {
        let subdivided = flags.next().ok_or_else(|| {
            corrupt(format!(
                "traversal needs more than the {} declared flags",
                header.bit_count
            ))
        })?;
        consumed += 1;
        if subdivided {
            let splittable = tree.node(id).is_some_and(|n| n.region().is_splittable());
            if !splittable {
                return Err(corrupt(format!(
                    "node {} is flagged internal but cannot be split",
                    id.index()
                )));
            }
            let children = tree.subdivide(id, [(Rgb::BLACK, 0.0); 4])?;
            stack.extend(children.iter().rev());
        } else {
            let c = colors
                .next()
                .ok_or_else(|| corrupt("ran out of leaf colors"))?;
            tree.set_leaf_color(id, Rgb::new(c[0], c[1], c[2]))?;
        }
    }

    if consumed != flag_bits.len() {
        return Err(corrupt(format!(
            "traversal consumed {consumed} of {} declared flags",
            header.bit_count
        )));
    }

    tree.synthesize_internal_colors();
    debug!(
        width = header.width,
        height = header.height,
        bits = header.bit_count,
        leaves,
        "decoded quadtree"
    );
    Ok(tree)
}

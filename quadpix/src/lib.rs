//! quadpix - Adaptive quadtree image approximation
//!
//! An image is approximated by a quadtree whose leaves carry flat colors.
//! Refinement is greedy: each step splits the leaf whose region has the
//! most detail (combined channel standard deviation times area). The tree
//! serializes to a compact bit-packed stream from which the approximation
//! can be rebuilt exactly.
//!
//! # Overview
//!
//! - [`region`] - region statistics, the quadtree model, the adaptive
//!   builder and the renderer
//! - [`codec`] - the binary stream format and optional byte transforms
//! - [`io`] - PPM reading and writing
//!
//! # Example
//!
//! ```
//! use quadpix::codec::Identity;
//! use quadpix::region::BuildOptions;
//! use quadpix::{Image, Rgb, compress_and_encode, compress_image, reconstruct};
//!
//! let image = Image::filled(16, 16, Rgb::new(40, 80, 120)).unwrap();
//! let options = BuildOptions::default();
//!
//! let approx = compress_image(&image, 100, &options).unwrap();
//! assert_eq!(approx, image);
//!
//! let bytes = compress_and_encode(&image, 100, &options, &Identity).unwrap();
//! assert_eq!(reconstruct(&bytes, &Identity).unwrap(), image);
//! ```

mod error;

// Re-export core types (primary data structures used everywhere)
pub use quadpix_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use quadpix_codec as codec;
pub use quadpix_io as io;
pub use quadpix_region as region;

pub use error::{PipelineError, PipelineResult};

use quadpix_codec::{ByteTransform, decode_with, encode_with};
use quadpix_region::{BuildOptions, Quadtree, QuadtreeBuilder, render};
use tracing::info;

/// Subdivision budget used when the caller has no preference.
pub const DEFAULT_ITERATIONS: usize = 20_000;

/// Build a quadtree for `image` with up to `iterations` subdivisions.
pub fn build_tree(
    image: &Image,
    iterations: usize,
    options: &BuildOptions,
) -> PipelineResult<Quadtree> {
    let mut builder = QuadtreeBuilder::new(image, *options)?;
    builder.add_detail(iterations)?;
    Ok(builder.into_tree())
}

/// Approximate `image` with up to `iterations` subdivisions and render it.
pub fn compress_image(
    image: &Image,
    iterations: usize,
    options: &BuildOptions,
) -> PipelineResult<Image> {
    let tree = build_tree(image, iterations, options)?;
    Ok(render(&tree)?)
}

/// Approximate `image` and serialize the tree through `transform`.
pub fn compress_and_encode(
    image: &Image,
    iterations: usize,
    options: &BuildOptions,
    transform: &impl ByteTransform,
) -> PipelineResult<Vec<u8>> {
    let tree = build_tree(image, iterations, options)?;
    Ok(encode_with(&tree, transform)?)
}

/// Rebuild the approximation stored in `data`.
pub fn reconstruct(data: &[u8], transform: &impl ByteTransform) -> PipelineResult<Image> {
    let tree = decode_with(data, transform)?;
    Ok(render(&tree)?)
}

/// Read a PPM, approximate it and write the Deflate-wrapped stream.
///
/// Returns the number of bytes written.
#[cfg(feature = "deflate")]
pub fn compress_image_file<P, Q>(
    input: P,
    output: Q,
    iterations: usize,
    options: &BuildOptions,
) -> PipelineResult<usize>
where
    P: AsRef<std::path::Path>,
    Q: AsRef<std::path::Path>,
{
    let image = quadpix_io::read_image(&input)?;
    let bytes = compress_and_encode(&image, iterations, options, &quadpix_codec::Deflate::new())?;
    std::fs::write(&output, &bytes)?;
    info!(
        input = %input.as_ref().display(),
        output = %output.as_ref().display(),
        width = image.width(),
        height = image.height(),
        bytes = bytes.len(),
        "compressed image file"
    );
    Ok(bytes.len())
}

/// Read a Deflate-wrapped stream written by [`compress_image_file`].
#[cfg(feature = "deflate")]
pub fn reconstruct_image_file<P: AsRef<std::path::Path>>(input: P) -> PipelineResult<Image> {
    let data = std::fs::read(&input)?;
    let image = reconstruct(&data, &quadpix_codec::Deflate::new())?;
    info!(
        input = %input.as_ref().display(),
        width = image.width(),
        height = image.height(),
        "reconstructed image file"
    );
    Ok(image)
}

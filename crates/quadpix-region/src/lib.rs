//! quadpix-region - Region statistics and adaptive quadtrees
//!
//! This crate provides:
//!
//! - **Region statistics** - O(1) mean / standard deviation of any
//!   rectangle via summed-area tables ([`RegionStats`])
//! - **Quadtree model** - arena-backed tree of flat-colored regions
//!   ([`Quadtree`], [`Node`], [`NodeId`])
//! - **Adaptive builder** - greedy, deterministic priority-ordered
//!   subdivision ([`QuadtreeBuilder`], [`BuildOptions`])
//! - **Renderer** - rasterize any quadtree back into an [`Image`]
//!
//! # Examples
//!
//! ```
//! use quadpix_core::{Image, Rgb};
//! use quadpix_region::{BuildOptions, QuadtreeBuilder, render};
//!
//! let bytes = [255, 0, 0, 0, 255, 0, 0, 0, 255, 255, 255, 255];
//! let image = Image::from_rgb_bytes(2, 2, &bytes).unwrap();
//!
//! let mut builder = QuadtreeBuilder::new(&image, BuildOptions::default()).unwrap();
//! let performed = builder.add_detail(10).unwrap();
//! assert_eq!(performed, 1);
//! assert_eq!(builder.tree().leaf_count(), 4);
//!
//! // Four 1x1 leaves reproduce the source exactly
//! let rendered = render(builder.tree()).unwrap();
//! assert_eq!(rendered, image);
//! ```

pub mod builder;
pub mod error;
pub mod integral;
pub mod quadtree;
pub mod render;

// Re-export core types
pub use quadpix_core;
pub use quadpix_core::Image;

// Re-export error types
pub use error::{RegionError, RegionResult};

// Re-export statistics types and functions
pub use integral::{
    ChannelSums, IntegralImage, RegionSample, RegionStats, SquaredIntegralImage, mean_in_region,
    variance_in_region,
};

// Re-export tree types
pub use quadtree::{Node, NodeId, Preorder, Quadtree};

// Re-export builder types
pub use builder::{BuildOptions, QuadtreeBuilder};

// Re-export renderer functions
pub use render::{draw_leaf_outlines, render, render_to_depth};

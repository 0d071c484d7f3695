//! quadpix Core - Basic data structures for quadtree image approximation
//!
//! This crate provides the fundamental data structures shared by the
//! statistics, tree and codec crates:
//!
//! - [`Image`] / [`ImageMut`] - The RGB pixel buffer (immutable / mutable)
//! - [`Region`] - Axis-aligned pixel rectangles and the quadrant split rule
//! - [`Rgb`] - 8-bit RGB color
//! - [`Error`] - Core error type

pub mod color;
pub mod error;
pub mod image;
pub mod region;

pub use color::Rgb;
pub use error::{Error, Result};
pub use image::{Image, ImageMut};
pub use region::Region;

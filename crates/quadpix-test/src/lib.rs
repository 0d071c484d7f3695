//! quadpix-test - Regression test helpers for quadpix
//!
//! Provides [`RegParams`], which accumulates comparison failures across a
//! regression run, and a handful of deterministic synthetic images so the
//! tests need no image files on disk.
//!
//! # Usage
//!
//! ```
//! use quadpix_test::{RegParams, gradient_image};
//!
//! let image = gradient_image(16, 8).unwrap();
//! let mut rp = RegParams::new("doc");
//! rp.compare_values(16.0, image.width() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::RegParams;

use quadpix_core::{Image, Rgb};
use std::path::PathBuf;

/// Get the path to the workspace root
fn workspace_root() -> PathBuf {
    // quadpix-test is at crates/quadpix-test
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../..")
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> PathBuf {
    workspace_root().join("target/regout")
}

/// Horizontal red ramp, vertical green ramp, constant blue
pub fn gradient_image(width: u32, height: u32) -> TestResult<Image> {
    let mut bytes = Vec::with_capacity(width as usize * height as usize * 3);
    for y in 0..height {
        for x in 0..width {
            bytes.push(ramp(x, width));
            bytes.push(ramp(y, height));
            bytes.push(128);
        }
    }
    Ok(Image::from_rgb_bytes(width, height, &bytes)?)
}

fn ramp(pos: u32, len: u32) -> u8 {
    if len <= 1 {
        0
    } else {
        (pos as u64 * 255 / (len as u64 - 1)) as u8
    }
}

/// Black and white squares of side `cell`
pub fn checkerboard_image(width: u32, height: u32, cell: u32) -> TestResult<Image> {
    let cell = cell.max(1);
    let mut image = Image::new(width, height)?.to_mut();
    for y in 0..height {
        for x in 0..width {
            if (x / cell + y / cell) % 2 == 0 {
                image.set_rgb_unchecked(x, y, Rgb::WHITE);
            }
        }
    }
    Ok(image.into())
}

/// Uniform noise from a seeded linear congruential generator
///
/// The same seed always yields the same image.
pub fn noise_image(width: u32, height: u32, seed: u64) -> TestResult<Image> {
    let mut state = seed;
    let len = width as usize * height as usize * 3;
    let bytes: Vec<u8> = (0..len)
        .map(|_| {
            state = state
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            (state >> 56) as u8
        })
        .collect();
    Ok(Image::from_rgb_bytes(width, height, &bytes)?)
}

/// Single-color image
pub fn solid_image(width: u32, height: u32, color: Rgb) -> TestResult<Image> {
    Ok(Image::filled(width, height, color)?)
}

/// Four flat quadrants split at `(width / 2, height / 2)`
///
/// Colors are given in top-left, top-right, bottom-left, bottom-right order,
/// matching the quadtree split rule.
pub fn quadrant_image(width: u32, height: u32, colors: [Rgb; 4]) -> TestResult<Image> {
    let (half_w, half_h) = (width / 2, height / 2);
    let mut image = Image::new(width, height)?.to_mut();
    for y in 0..height {
        for x in 0..width {
            let q = usize::from(x >= half_w) + 2 * usize::from(y >= half_h);
            image.set_rgb_unchecked(x, y, colors[q]);
        }
    }
    Ok(image.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noise_is_seeded() {
        let a = noise_image(5, 4, 7).unwrap();
        let b = noise_image(5, 4, 7).unwrap();
        let c = noise_image(5, 4, 8).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_gradient_ends() {
        let image = gradient_image(4, 3).unwrap();
        assert_eq!(image.get_rgb(0, 0), Some(Rgb::new(0, 0, 128)));
        assert_eq!(image.get_rgb(3, 2), Some(Rgb::new(255, 255, 128)));
    }

    #[test]
    fn test_quadrants() {
        let colors = [Rgb::new(1, 0, 0), Rgb::new(2, 0, 0), Rgb::new(3, 0, 0), Rgb::new(4, 0, 0)];
        let image = quadrant_image(5, 3, colors).unwrap();
        assert_eq!(image.get_rgb(1, 0), Some(colors[0]));
        assert_eq!(image.get_rgb(2, 0), Some(colors[1]));
        assert_eq!(image.get_rgb(0, 1), Some(colors[2]));
        assert_eq!(image.get_rgb(4, 2), Some(colors[3]));
    }

    #[test]
    fn test_checkerboard() {
        let image = checkerboard_image(4, 4, 2).unwrap();
        assert_eq!(image.get_rgb(0, 0), Some(Rgb::WHITE));
        assert_eq!(image.get_rgb(2, 0), Some(Rgb::BLACK));
        assert_eq!(image.get_rgb(2, 2), Some(Rgb::WHITE));
    }
}

//! Image - The RGB pixel buffer
//!
//! # Pixel layout
//!
//! - Pixels are stored row-major, one 32-bit word per pixel
//! - Each word is `0xRRGGBBAA` (see [`crate::color`]), alpha is always 255
//!
//! # Ownership model
//!
//! `Image` uses `Arc` for cheap cloning (shared ownership).
//! To modify pixel data, convert to `ImageMut` via [`Image::try_into_mut`]
//! or [`Image::to_mut`], then convert back with `Into<Image>`.

mod access;

use crate::color::Rgb;
use crate::error::{Error, Result};
use std::sync::Arc;

/// Internal image storage
#[derive(Debug, Clone)]
struct ImageData {
    width: u32,
    height: u32,
    data: Vec<u32>,
}

/// Number of pixels in a `width` x `height` image.
fn pixel_count(width: u32, height: u32) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(Error::DegenerateInput { width, height });
    }
    (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| Error::InvalidParameter(format!("image too large: {width}x{height}")))
}

/// Immutable RGB image
///
/// # Examples
///
/// ```
/// use quadpix_core::{Image, Rgb};
///
/// let image = Image::new(64, 48).unwrap();
/// assert_eq!(image.width(), 64);
/// assert_eq!(image.get_rgb(0, 0), Some(Rgb::BLACK));
/// ```
#[derive(Debug, Clone)]
pub struct Image {
    inner: Arc<ImageData>,
}

impl Image {
    /// Create a new black image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DegenerateInput`] if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::filled(width, height, Rgb::BLACK)
    }

    /// Create an image with every pixel set to `color`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DegenerateInput`] if width or height is 0, and
    /// [`Error::InvalidParameter`] if the pixel buffer cannot be allocated.
    pub fn filled(width: u32, height: u32, color: Rgb) -> Result<Self> {
        let len = pixel_count(width, height)?;
        let mut data = Vec::new();
        data.try_reserve_exact(len).map_err(|_| {
            Error::InvalidParameter(format!("cannot allocate a {width}x{height} image"))
        })?;
        data.resize(len, color.to_pixel());
        Ok(Image {
            inner: Arc::new(ImageData {
                width,
                height,
                data,
            }),
        })
    }

    /// Create an image from tightly packed RGB bytes (row-major, 3 bytes per pixel).
    ///
    /// # Errors
    ///
    /// Returns [`Error::DegenerateInput`] for a zero dimension and
    /// [`Error::InvalidParameter`] if `bytes.len() != width * height * 3`.
    pub fn from_rgb_bytes(width: u32, height: u32, bytes: &[u8]) -> Result<Self> {
        let expected = pixel_count(width, height)?
            .checked_mul(3)
            .ok_or_else(|| Error::InvalidParameter(format!("image too large: {width}x{height}")))?;
        if bytes.len() != expected {
            return Err(Error::InvalidParameter(format!(
                "expected {expected} RGB bytes for {width}x{height}, got {}",
                bytes.len()
            )));
        }
        let data = bytes
            .chunks_exact(3)
            .map(|c| Rgb::new(c[0], c[1], c[2]).to_pixel())
            .collect();
        Ok(Image {
            inner: Arc::new(ImageData {
                width,
                height,
                data,
            }),
        })
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Raw packed pixel words, row-major.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Packed pixel words for row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    pub fn row_data(&self, y: u32) -> &[u32] {
        let w = self.inner.width as usize;
        let start = y as usize * w;
        &self.inner.data[start..start + w]
    }

    /// Copy the pixels out as tightly packed RGB bytes.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.inner.data.len() * 3);
        for &pixel in &self.inner.data {
            out.extend_from_slice(&Rgb::from_pixel(pixel).channels());
        }
        out
    }

    /// Check if two images have the same dimensions.
    pub fn sizes_equal(&self, other: &Image) -> bool {
        self.width() == other.width() && self.height() == other.height()
    }

    /// Get the number of strong references to the underlying data.
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Try to get mutable access to the image data.
    ///
    /// Succeeds only if there is exactly one reference to the data.
    pub fn try_into_mut(self) -> std::result::Result<ImageMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(ImageMut { inner: data }),
            Err(arc) => Err(Image { inner: arc }),
        }
    }

    /// Create a mutable copy of this image.
    pub fn to_mut(&self) -> ImageMut {
        ImageMut {
            inner: (*self.inner).clone(),
        }
    }
}

impl PartialEq for Image {
    fn eq(&self, other: &Self) -> bool {
        self.sizes_equal(other) && self.inner.data == other.inner.data
    }
}

impl Eq for Image {}

/// Mutable image
///
/// Allows modification of pixel data. Convert back to an immutable
/// [`Image`] using `Into<Image>`.
#[derive(Debug)]
pub struct ImageMut {
    inner: ImageData,
}

impl ImageMut {
    /// Get the image width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Raw packed pixel words, row-major.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Mutable packed pixel words, row-major.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u32] {
        &mut self.inner.data
    }

    /// Set every pixel to `color`.
    pub fn fill(&mut self, color: Rgb) {
        self.inner.data.fill(color.to_pixel());
    }
}

impl From<ImageMut> for Image {
    fn from(image: ImageMut) -> Self {
        Image {
            inner: Arc::new(image.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oversized_image_is_an_error() {
        assert!(matches!(
            Image::new(u32::MAX, u32::MAX),
            Err(Error::InvalidParameter(_))
        ));
        assert!(matches!(
            Image::from_rgb_bytes(u32::MAX, u32::MAX, &[0, 0, 0]),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_new_rejects_zero_dimension() {
        assert!(matches!(
            Image::new(0, 4),
            Err(Error::DegenerateInput { width: 0, height: 4 })
        ));
        assert!(matches!(
            Image::new(4, 0),
            Err(Error::DegenerateInput { .. })
        ));
    }

    #[test]
    fn test_filled() {
        let red = Rgb::new(255, 0, 0);
        let image = Image::filled(3, 2, red).unwrap();
        assert!(image.data().iter().all(|&p| Rgb::from_pixel(p) == red));
    }

    #[test]
    fn test_rgb_bytes_roundtrip() {
        let bytes: Vec<u8> = (0..2 * 3 * 3).map(|i| i as u8 * 10).collect();
        let image = Image::from_rgb_bytes(3, 2, &bytes).unwrap();
        assert_eq!(image.get_rgb(1, 0), Some(Rgb::new(30, 40, 50)));
        assert_eq!(image.to_rgb_bytes(), bytes);
    }

    #[test]
    fn test_rgb_bytes_wrong_length() {
        assert!(matches!(
            Image::from_rgb_bytes(2, 2, &[0; 11]),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_try_into_mut_shared() {
        let image = Image::new(2, 2).unwrap();
        let other = image.clone();
        let image = image.try_into_mut().unwrap_err();
        assert_eq!(image.ref_count(), 2);
        drop(other);
        let mut m = image.try_into_mut().unwrap();
        m.fill(Rgb::WHITE);
        let image: Image = m.into();
        assert_eq!(image.get_rgb(1, 1), Some(Rgb::WHITE));
    }

    #[test]
    fn test_to_mut_copies() {
        let image = Image::new(2, 2).unwrap();
        let mut m = image.to_mut();
        m.fill(Rgb::WHITE);
        assert_eq!(image.get_rgb(0, 0), Some(Rgb::BLACK));
        let copy: Image = m.into();
        assert_ne!(image, copy);
    }
}

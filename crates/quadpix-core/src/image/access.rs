//! Pixel access functions
//!
//! Getting and setting individual pixels and filling rectangular regions.

use super::{Image, ImageMut};
use crate::color::Rgb;
use crate::error::{Error, Result};
use crate::region::Region;

impl Image {
    /// Get the color at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    pub fn get_rgb(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.get_rgb_unchecked(x, y))
    }

    /// Get the color at (x, y) without a bounds check on `x`.
    ///
    /// # Panics
    ///
    /// Panics if the linear index falls outside the pixel buffer.
    #[inline]
    pub fn get_rgb_unchecked(&self, x: u32, y: u32) -> Rgb {
        let idx = y as usize * self.width() as usize + x as usize;
        Rgb::from_pixel(self.inner.data[idx])
    }
}

impl ImageMut {
    /// Get the color at (x, y).
    pub fn get_rgb(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let idx = y as usize * self.width() as usize + x as usize;
        Some(Rgb::from_pixel(self.inner.data[idx]))
    }

    /// Set the color at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds.
    pub fn set_rgb(&mut self, x: u32, y: u32, color: Rgb) -> Result<()> {
        if x >= self.width() {
            return Err(Error::IndexOutOfBounds {
                index: x as usize,
                len: self.width() as usize,
            });
        }
        if y >= self.height() {
            return Err(Error::IndexOutOfBounds {
                index: y as usize,
                len: self.height() as usize,
            });
        }
        self.set_rgb_unchecked(x, y, color);
        Ok(())
    }

    /// Set the color at (x, y) without a bounds check on `x`.
    ///
    /// # Panics
    ///
    /// Panics if the linear index falls outside the pixel buffer.
    #[inline]
    pub fn set_rgb_unchecked(&mut self, x: u32, y: u32, color: Rgb) {
        let idx = y as usize * self.width() as usize + x as usize;
        self.inner.data[idx] = color.to_pixel();
    }

    /// Fill every pixel of `region` with `color`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRegion`] if the region is not inside the image.
    pub fn fill_region(&mut self, region: &Region, color: Rgb) -> Result<()> {
        region.check_within(self.width(), self.height())?;
        let w = self.width() as usize;
        let pixel = color.to_pixel();
        let (x0, x1) = (region.x() as usize, region.right() as usize);
        for y in region.y()..region.bottom() {
            let start = y as usize * w;
            self.inner.data[start + x0..start + x1].fill(pixel);
        }
        Ok(())
    }
}

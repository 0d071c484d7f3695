//! Region - Axis-aligned pixel rectangles
//!
//! A [`Region`] is an immutable rectangle `(x, y, w, h)` in pixel units.
//! Zero-area regions cannot be constructed through [`Region::new`].
//!
//! # Split rule
//!
//! [`Region::split`] divides a region into four quadrants at
//! `w / 2` and `h / 2` (integer floor). Children are returned in the fixed
//! order top-left, top-right, bottom-left, bottom-right. Odd dimensions give
//! the extra column to the right children and the extra row to the bottom
//! children. Regions narrower or shorter than two pixels are never split.

use crate::error::{Error, Result};

/// A rectangle region of pixels
///
/// Like the image types, this is a small `Copy` value; it is never mutated
/// after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Region {
    x: u32,
    y: u32,
    w: u32,
    h: u32,
}

impl Region {
    /// Create a new region
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRegion`] if the region has zero area or its
    /// far edge overflows `u32`.
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Result<Self> {
        if w == 0 || h == 0 {
            return Err(Error::InvalidRegion {
                x,
                y,
                w,
                h,
                reason: "zero area",
            });
        }
        if x.checked_add(w).is_none() || y.checked_add(h).is_none() {
            return Err(Error::InvalidRegion {
                x,
                y,
                w,
                h,
                reason: "coordinates overflow",
            });
        }
        Ok(Self { x, y, w, h })
    }

    /// Region covering a whole `width` x `height` image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DegenerateInput`] if either dimension is zero.
    pub fn full(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::DegenerateInput { width, height });
        }
        Ok(Self {
            x: 0,
            y: 0,
            w: width,
            h: height,
        })
    }

    /// Left x coordinate
    #[inline]
    pub fn x(&self) -> u32 {
        self.x
    }

    /// Top y coordinate
    #[inline]
    pub fn y(&self) -> u32 {
        self.y
    }

    /// Width in pixels
    #[inline]
    pub fn width(&self) -> u32 {
        self.w
    }

    /// Height in pixels
    #[inline]
    pub fn height(&self) -> u32 {
        self.h
    }

    /// Get the right x coordinate (exclusive)
    #[inline]
    pub fn right(&self) -> u32 {
        self.x + self.w
    }

    /// Get the bottom y coordinate (exclusive)
    #[inline]
    pub fn bottom(&self) -> u32 {
        self.y + self.h
    }

    /// Number of pixels covered
    #[inline]
    pub fn area(&self) -> u64 {
        self.w as u64 * self.h as u64
    }

    /// Whether [`Region::split`] yields children for this region.
    #[inline]
    pub fn is_splittable(&self) -> bool {
        self.w >= 2 && self.h >= 2
    }

    /// Check if a point is inside the region
    #[inline]
    pub fn contains_point(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Check if this region contains another region
    pub fn contains_region(&self, other: &Region) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Check if this region overlaps with another
    pub fn overlaps(&self, other: &Region) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Check that the region lies inside a `width` x `height` image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRegion`] if any pixel falls outside.
    pub fn check_within(&self, width: u32, height: u32) -> Result<()> {
        if self.right() > width || self.bottom() > height {
            return Err(Error::InvalidRegion {
                x: self.x,
                y: self.y,
                w: self.w,
                h: self.h,
                reason: "outside image bounds",
            });
        }
        Ok(())
    }

    /// Split into four quadrants.
    ///
    /// Returns `None` when `w < 2` or `h < 2`; such regions are terminal.
    pub fn split(&self) -> Option<[Region; 4]> {
        if !self.is_splittable() {
            return None;
        }
        let half_w = self.w / 2;
        let half_h = self.h / 2;
        let (x, y) = (self.x, self.y);
        Some([
            Region::new_unchecked(x, y, half_w, half_h),
            Region::new_unchecked(x + half_w, y, self.w - half_w, half_h),
            Region::new_unchecked(x, y + half_h, half_w, self.h - half_h),
            Region::new_unchecked(x + half_w, y + half_h, self.w - half_w, self.h - half_h),
        ])
    }

    const fn new_unchecked(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {}x{})", self.x, self.y, self.w, self.h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_tiles(parent: Region) {
        let children = parent.split().unwrap();
        let total: u64 = children.iter().map(Region::area).sum();
        assert_eq!(total, parent.area());
        for (i, a) in children.iter().enumerate() {
            assert!(a.width() > 0 && a.height() > 0);
            assert!(parent.contains_region(a));
            for b in &children[i + 1..] {
                assert!(!a.overlaps(b), "{a} overlaps {b}");
            }
        }
    }

    #[test]
    fn test_new_rejects_zero_area() {
        assert!(matches!(
            Region::new(0, 0, 0, 5),
            Err(Error::InvalidRegion { .. })
        ));
        assert!(matches!(
            Region::new(3, 3, 5, 0),
            Err(Error::InvalidRegion { .. })
        ));
    }

    #[test]
    fn test_full_rejects_degenerate() {
        assert!(matches!(
            Region::full(0, 10),
            Err(Error::DegenerateInput { width: 0, height: 10 })
        ));
        let r = Region::full(7, 3).unwrap();
        assert_eq!((r.x(), r.y(), r.width(), r.height()), (0, 0, 7, 3));
    }

    #[test]
    fn test_split_even() {
        let r = Region::new(10, 20, 8, 6).unwrap();
        let [tl, tr, bl, br] = r.split().unwrap();
        assert_eq!(tl, Region::new(10, 20, 4, 3).unwrap());
        assert_eq!(tr, Region::new(14, 20, 4, 3).unwrap());
        assert_eq!(bl, Region::new(10, 23, 4, 3).unwrap());
        assert_eq!(br, Region::new(14, 23, 4, 3).unwrap());
    }

    #[test]
    fn test_split_odd_gives_extra_to_right_and_bottom() {
        let r = Region::new(0, 0, 5, 3).unwrap();
        let [tl, tr, bl, br] = r.split().unwrap();
        assert_eq!((tl.width(), tl.height()), (2, 1));
        assert_eq!((tr.width(), tr.height()), (3, 1));
        assert_eq!((bl.width(), bl.height()), (2, 2));
        assert_eq!((br.width(), br.height()), (3, 2));
    }

    #[test]
    fn test_split_tiles_many_shapes() {
        for w in 2..12 {
            for h in 2..12 {
                assert_tiles(Region::new(1, 2, w, h).unwrap());
            }
        }
    }

    #[test]
    fn test_thin_regions_are_terminal() {
        assert!(Region::new(0, 0, 1, 1).unwrap().split().is_none());
        assert!(Region::new(0, 0, 1, 9).unwrap().split().is_none());
        assert!(Region::new(0, 0, 9, 1).unwrap().split().is_none());
        assert!(Region::new(0, 0, 2, 2).unwrap().split().is_some());
    }

    #[test]
    fn test_check_within() {
        let r = Region::new(2, 2, 4, 4).unwrap();
        assert!(r.check_within(6, 6).is_ok());
        assert!(matches!(
            r.check_within(5, 6),
            Err(Error::InvalidRegion { .. })
        ));
    }
}

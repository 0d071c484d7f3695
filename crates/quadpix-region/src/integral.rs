//! Region statistics from summed-area tables
//!
//! An integral image (summed area table) stores at `(x, y)` the sum of all
//! pixels above and to the left of that point, exclusive. The sum over any
//! rectangle then takes four lookups:
//!
//! ```text
//! sum(x0..x1, y0..y1) = I(x1, y1) - I(x0, y1) - I(x1, y0) + I(x0, y0)
//! ```
//!
//! [`RegionStats`] keeps one table of per-channel sums and one of
//! per-channel squared sums, which gives the mean and population variance
//! of any rectangle in O(1) after a single O(width * height) pass.
//!
//! # Combined standard deviation
//!
//! The combined standard deviation of a region is the **sum** of the
//! population standard deviations of the red, green and blue channels.
//! The detail score of a region is that value multiplied by the region's
//! pixel area. Both definitions are part of the subdivision order and
//! therefore of the encoded output; they must not change.

use crate::error::RegionResult;
use quadpix_core::{Image, Region, Rgb};

/// Per-channel sums, in R, G, B order.
pub type ChannelSums = [u64; 3];

/// Summed-area table over one function of each channel value.
#[derive(Debug, Clone)]
struct SummedAreaTable {
    data: Vec<ChannelSums>,
    width: u32,
    height: u32,
}

impl SummedAreaTable {
    fn build(image: &Image, f: impl Fn(u8) -> u64) -> Self {
        let width = image.width();
        let height = image.height();
        let stride = width as usize + 1;
        let mut data = vec![[0u64; 3]; stride * (height as usize + 1)];

        for y in 0..height as usize {
            let mut row_sum = [0u64; 3];
            for (x, &pixel) in image.row_data(y as u32).iter().enumerate() {
                let channels = Rgb::from_pixel(pixel).channels();
                for c in 0..3 {
                    row_sum[c] += f(channels[c]);
                }
                let above = data[y * stride + x + 1];
                data[(y + 1) * stride + x + 1] =
                    [above[0] + row_sum[0], above[1] + row_sum[1], above[2] + row_sum[2]];
            }
        }

        Self {
            data,
            width,
            height,
        }
    }

    #[inline]
    fn at(&self, x: u32, y: u32) -> ChannelSums {
        self.data[y as usize * (self.width as usize + 1) + x as usize]
    }

    fn get(&self, x: u32, y: u32) -> Option<ChannelSums> {
        if x > self.width || y > self.height {
            return None;
        }
        Some(self.at(x, y))
    }

    fn sum_region(&self, region: &Region) -> RegionResult<ChannelSums> {
        region.check_within(self.width, self.height)?;
        let (x0, y0, x1, y1) = (region.x(), region.y(), region.right(), region.bottom());
        let a = self.at(x0, y0);
        let b = self.at(x1, y0);
        let c = self.at(x0, y1);
        let d = self.at(x1, y1);
        // Tables are monotone in x and y, so (d + a) >= (b + c) per channel.
        Ok([
            d[0] + a[0] - b[0] - c[0],
            d[1] + a[1] - b[1] - c[1],
            d[2] + a[2] - b[2] - c[2],
        ])
    }
}

/// Integral image of per-channel pixel values
#[derive(Debug, Clone)]
pub struct IntegralImage {
    table: SummedAreaTable,
}

impl IntegralImage {
    /// Create an integral image from an RGB image
    pub fn from_image(image: &Image) -> Self {
        Self {
            table: SummedAreaTable::build(image, u64::from),
        }
    }

    /// Get the width of the source image
    pub fn width(&self) -> u32 {
        self.table.width
    }

    /// Get the height of the source image
    pub fn height(&self) -> u32 {
        self.table.height
    }

    /// Get the integral value at (x, y); valid for `x <= width`, `y <= height`
    pub fn get(&self, x: u32, y: u32) -> Option<ChannelSums> {
        self.table.get(x, y)
    }

    /// Compute per-channel sums of the pixels in a region
    pub fn sum_region(&self, region: &Region) -> RegionResult<ChannelSums> {
        self.table.sum_region(region)
    }
}

/// Squared integral image for variance computation
#[derive(Debug, Clone)]
pub struct SquaredIntegralImage {
    table: SummedAreaTable,
}

impl SquaredIntegralImage {
    /// Create a squared integral image from an RGB image
    pub fn from_image(image: &Image) -> Self {
        Self {
            table: SummedAreaTable::build(image, |v| u64::from(v) * u64::from(v)),
        }
    }

    /// Get the width of the source image
    pub fn width(&self) -> u32 {
        self.table.width
    }

    /// Get the height of the source image
    pub fn height(&self) -> u32 {
        self.table.height
    }

    /// Compute per-channel sums of squared pixel values in a region
    pub fn sum_region(&self, region: &Region) -> RegionResult<ChannelSums> {
        self.table.sum_region(region)
    }
}

/// Statistics of one region, as returned by [`RegionStats::query`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionSample {
    /// Per-channel mean, rounded to nearest (halves up)
    pub mean: Rgb,
    /// Per-channel population standard deviation
    pub channel_std: [f64; 3],
    /// Number of pixels in the region
    pub area: u64,
}

impl RegionSample {
    /// Sum of the three channel standard deviations.
    pub fn combined_std(&self) -> f64 {
        self.channel_std.iter().sum()
    }

    /// Combined standard deviation weighted by pixel area.
    ///
    /// Exactly `0.0` when every pixel in the region has the same color.
    pub fn detail_score(&self) -> f64 {
        self.combined_std() * self.area as f64
    }
}

/// Compute the rounded per-channel mean from channel sums
pub fn mean_from_sums(sums: &ChannelSums, area: u64) -> Rgb {
    let mean = |s: u64| ((s + area / 2) / area).min(255) as u8;
    Rgb::new(mean(sums[0]), mean(sums[1]), mean(sums[2]))
}

/// Compute per-channel population variance from sums and squared sums
///
/// Uses the exact integer numerator `n * sum(v^2) - sum(v)^2`, so the result
/// is exactly zero for a uniform region.
pub fn variance_from_sums(sums: &ChannelSums, sq_sums: &ChannelSums, area: u64) -> [f64; 3] {
    let n = area as u128;
    let denom = (n * n) as f64;
    let var = |s: u64, sq: u64| {
        let s = s as u128;
        let numer = (n * sq as u128).saturating_sub(s * s);
        numer as f64 / denom
    };
    [
        var(sums[0], sq_sums[0]),
        var(sums[1], sq_sums[1]),
        var(sums[2], sq_sums[2]),
    ]
}

/// Compute the mean color in a region using an integral image
pub fn mean_in_region(region: &Region, integral: &IntegralImage) -> RegionResult<Rgb> {
    let sums = integral.sum_region(region)?;
    Ok(mean_from_sums(&sums, region.area()))
}

/// Compute per-channel (variance, standard deviation) in a region
pub fn variance_in_region(
    region: &Region,
    integral: &IntegralImage,
    sq_integral: &SquaredIntegralImage,
) -> RegionResult<([f64; 3], [f64; 3])> {
    let sums = integral.sum_region(region)?;
    let sq_sums = sq_integral.sum_region(region)?;
    let var = variance_from_sums(&sums, &sq_sums, region.area());
    Ok((var, var.map(f64::sqrt)))
}

/// Region statistics provider
///
/// Precomputes both integral images once per source image. The tables are
/// read-only afterwards, so a `&RegionStats` may be shared across threads.
#[derive(Debug, Clone)]
pub struct RegionStats {
    integral: IntegralImage,
    sq_integral: SquaredIntegralImage,
}

impl RegionStats {
    /// Precompute the summed-area tables for `image`.
    ///
    /// With the `parallel` feature the two tables are built concurrently on
    /// the rayon pool. Each table is a single sequential pass either way, so
    /// the result is identical.
    pub fn new(image: &Image) -> Self {
        #[cfg(feature = "parallel")]
        let (integral, sq_integral) = rayon::join(
            || IntegralImage::from_image(image),
            || SquaredIntegralImage::from_image(image),
        );
        #[cfg(not(feature = "parallel"))]
        let (integral, sq_integral) = (
            IntegralImage::from_image(image),
            SquaredIntegralImage::from_image(image),
        );
        Self {
            integral,
            sq_integral,
        }
    }

    /// Width of the source image
    pub fn width(&self) -> u32 {
        self.integral.width()
    }

    /// Height of the source image
    pub fn height(&self) -> u32 {
        self.integral.height()
    }

    /// Region covering the whole source image
    pub fn full_region(&self) -> RegionResult<Region> {
        Ok(Region::full(self.width(), self.height())?)
    }

    /// Mean color and spread of the pixels inside `region`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRegion` (wrapped in [`crate::RegionError::Core`]) if
    /// the region reaches outside the source image.
    pub fn query(&self, region: &Region) -> RegionResult<RegionSample> {
        let sums = self.integral.sum_region(region)?;
        let sq_sums = self.sq_integral.sum_region(region)?;
        let area = region.area();
        let var = variance_from_sums(&sums, &sq_sums, area);
        Ok(RegionSample {
            mean: mean_from_sums(&sums, area),
            channel_std: var.map(f64::sqrt),
            area,
        })
    }

    /// Access the underlying integral image
    pub fn integral(&self) -> &IntegralImage {
        &self.integral
    }

    /// Access the underlying squared integral image
    pub fn squared_integral(&self) -> &SquaredIntegralImage {
        &self.sq_integral
    }
}

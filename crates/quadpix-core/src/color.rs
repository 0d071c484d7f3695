//! Color values and packed-pixel helpers.
//!
//! # Pixel format
//!
//! Pixels are stored as `0xRRGGBBAA` words (red in MSB, alpha in LSB).
//! quadpix only deals in opaque RGB, so alpha is always written as 255.

/// Shift amounts for extracting color channels
pub const RED_SHIFT: u32 = 24;
pub const GREEN_SHIFT: u32 = 16;
pub const BLUE_SHIFT: u32 = 8;
pub const ALPHA_SHIFT: u32 = 0;

/// Extract red component from a packed pixel.
#[inline]
pub fn red(pixel: u32) -> u8 {
    ((pixel >> RED_SHIFT) & 0xff) as u8
}

/// Extract green component from a packed pixel.
#[inline]
pub fn green(pixel: u32) -> u8 {
    ((pixel >> GREEN_SHIFT) & 0xff) as u8
}

/// Extract blue component from a packed pixel.
#[inline]
pub fn blue(pixel: u32) -> u8 {
    ((pixel >> BLUE_SHIFT) & 0xff) as u8
}

/// Compose a packed RGB pixel (alpha = 255).
#[inline]
pub fn compose_rgb(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32) << RED_SHIFT)
        | ((g as u32) << GREEN_SHIFT)
        | ((b as u32) << BLUE_SHIFT)
        | (255 << ALPHA_SHIFT)
}

/// Extract RGB values from a packed pixel.
#[inline]
pub fn extract_rgb(pixel: u32) -> (u8, u8, u8) {
    (red(pixel), green(pixel), blue(pixel))
}

/// An 8-bit-per-channel RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels as an array, in R, G, B order.
    #[inline]
    pub fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Build from channels in R, G, B order.
    #[inline]
    pub fn from_channels(c: [u8; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }

    /// Packed `0xRRGGBBAA` representation.
    #[inline]
    pub fn to_pixel(self) -> u32 {
        compose_rgb(self.r, self.g, self.b)
    }

    /// Unpack from a `0xRRGGBBAA` word, ignoring alpha.
    #[inline]
    pub fn from_pixel(pixel: u32) -> Self {
        let (r, g, b) = extract_rgb(pixel);
        Self { r, g, b }
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self { r, g, b }
    }
}

impl From<Rgb> for (u8, u8, u8) {
    fn from(c: Rgb) -> Self {
        (c.r, c.g, c.b)
    }
}

//! quadpix-io - Pixel buffer I/O for quadpix
//!
//! Reads and writes binary PPM images. This is the only on-disk image
//! format; anything else should be converted before it reaches quadpix.
//!
//! # Examples
//!
//! ```
//! use quadpix_core::{Image, Rgb};
//! use quadpix_io::{read_ppm, write_ppm};
//!
//! let image = Image::filled(4, 3, Rgb::new(10, 20, 30)).unwrap();
//! let mut buf = Vec::new();
//! write_ppm(&image, &mut buf).unwrap();
//! assert_eq!(read_ppm(&buf[..]).unwrap(), image);
//! ```

mod error;
pub mod pnm;

pub use error::{IoError, IoResult};
pub use pnm::{read_ppm, write_ppm};

use quadpix_core::Image;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Read a PPM image from a file.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Image> {
    let file = File::open(path)?;
    read_ppm(BufReader::new(file))
}

/// Write an image to a file as PPM.
pub fn write_image<P: AsRef<Path>>(image: &Image, path: P) -> IoResult<()> {
    let file = File::create(path)?;
    write_ppm(image, BufWriter::new(file))
}

//! PPM (Portable PixMap) format support
//!
//! Reads and writes binary PPM (`P6`) with a maxval of 255. Header fields
//! may be separated by any whitespace and interleaved with `#` comments
//! running to the end of the line. Exactly one whitespace byte separates
//! the maxval from the raster.

use crate::{IoError, IoResult};
use quadpix_core::Image;
use std::io::{BufRead, Read, Write};

const MAGIC: &str = "P6";
const MAXVAL: u32 = 255;

/// Read a binary PPM image from a reader.
///
/// # Errors
///
/// Returns [`IoError::Format`] for a malformed or unsupported header or a
/// short raster, and [`IoError::Core`] for a zero-sized image.
pub fn read_ppm<R: BufRead>(mut reader: R) -> IoResult<Image> {
    let magic = read_token(&mut reader)?;
    if magic != MAGIC {
        return Err(IoError::Format(format!("expected magic P6, found {magic:?}")));
    }
    let width = read_number(&mut reader, "width")?;
    let height = read_number(&mut reader, "height")?;
    let maxval = read_number(&mut reader, "maxval")?;
    if maxval != MAXVAL {
        return Err(IoError::Format(format!(
            "only maxval {MAXVAL} is supported, found {maxval}"
        )));
    }

    let len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(3))
        .ok_or_else(|| IoError::Format(format!("image {width}x{height} is too large")))?;
    // grow with the data actually present rather than trusting the header
    let mut raster = Vec::new();
    reader.take(len as u64).read_to_end(&mut raster)?;
    if raster.len() != len {
        return Err(IoError::Format(format!(
            "raster has {} of {len} bytes",
            raster.len()
        )));
    }
    Ok(Image::from_rgb_bytes(width, height, &raster)?)
}

/// Write an image as binary PPM to a writer.
pub fn write_ppm<W: Write>(image: &Image, mut writer: W) -> IoResult<()> {
    write!(
        writer,
        "{MAGIC}\n{} {}\n{MAXVAL}\n",
        image.width(),
        image.height()
    )?;
    writer.write_all(&image.to_rgb_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Read one byte, or `None` at end of input.
fn next_byte<R: BufRead>(reader: &mut R) -> IoResult<Option<u8>> {
    let byte = reader.fill_buf()?.first().copied();
    if byte.is_some() {
        reader.consume(1);
    }
    Ok(byte)
}

/// Read one whitespace-delimited header token, skipping comments.
///
/// The single whitespace byte ending the token is consumed.
fn read_token<R: BufRead>(reader: &mut R) -> IoResult<String> {
    let mut token = Vec::new();
    loop {
        let Some(byte) = next_byte(reader)? else {
            break;
        };
        match byte {
            b'#' if token.is_empty() => {
                while let Some(b) = next_byte(reader)? {
                    if b == b'\n' || b == b'\r' {
                        break;
                    }
                }
            }
            b if b.is_ascii_whitespace() => {
                if !token.is_empty() {
                    break;
                }
            }
            b => token.push(b),
        }
    }
    if token.is_empty() {
        return Err(IoError::Format("unexpected end of header".to_string()));
    }
    String::from_utf8(token).map_err(|_| IoError::Format("non-ASCII header token".to_string()))
}

fn read_number<R: BufRead>(reader: &mut R, field: &str) -> IoResult<u32> {
    let token = read_token(reader)?;
    token
        .parse()
        .map_err(|_| IoError::Format(format!("invalid {field} {token:?}")))
}

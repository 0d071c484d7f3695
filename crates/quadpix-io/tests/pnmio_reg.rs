//! PPM I/O regression test
//!
//! Writes synthetic images to disk and in memory, reads them back and
//! checks the pixels survive unchanged.

use quadpix_core::Rgb;
use quadpix_io::{IoError, read_image, read_ppm, write_image, write_ppm};
use quadpix_test::{RegParams, gradient_image, noise_image, solid_image};

#[test]
fn pnmio_reg() {
    let mut rp = RegParams::new("pnmio");

    // Test 1-2: file roundtrip, odd dimensions
    eprintln!("=== Test 1: gradient file roundtrip ===");
    let image = gradient_image(37, 21).expect("gradient");
    let path = rp.output_path("ppm").expect("output path");
    write_image(&image, &path).expect("write ppm");
    let back = read_image(&path).expect("read ppm");
    rp.compare_images(&image, &back);
    let size = std::fs::metadata(&path).expect("metadata").len();
    rp.compare_values((b"P6\n37 21\n255\n".len() + 37 * 21 * 3) as f64, size as f64, 0.0);

    // Test 3: in-memory roundtrip of noise
    eprintln!("=== Test 3: noise memory roundtrip ===");
    let image = noise_image(16, 9, 42).expect("noise");
    let mut buf = Vec::new();
    write_ppm(&image, &mut buf).expect("write mem");
    let back = read_ppm(&buf[..]).expect("read mem");
    rp.compare_images(&image, &back);

    // Test 4: rewrite produces identical bytes
    let mut again = Vec::new();
    write_ppm(&back, &mut again).expect("rewrite");
    rp.compare_strings(&buf, &again);

    // Test 5: 1x1
    let image = solid_image(1, 1, Rgb::new(7, 8, 9)).expect("solid");
    let mut buf = Vec::new();
    write_ppm(&image, &mut buf).expect("write 1x1");
    rp.compare_images(&image, &read_ppm(&buf[..]).expect("read 1x1"));

    // Test 6: missing file
    let missing = read_image("/nonexistent/quadpix/none.ppm");
    rp.check(matches!(missing, Err(IoError::Io(_))), "missing file is an I/O error");

    assert!(rp.cleanup());
}

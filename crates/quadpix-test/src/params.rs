//! Regression test parameters and operations

use crate::error::{TestError, TestResult};
use crate::regout_dir;
use quadpix_core::Image;
use std::fs;
use std::path::PathBuf;

/// Regression test parameters
///
/// Tracks the test name, the index of the current check and whether every
/// check so far has passed. Failures are collected rather than panicking,
/// so one run reports all of them.
pub struct RegParams {
    /// Name of the test (e.g., "codec")
    pub test_name: String,
    /// Current check index (incremented before each check)
    index: usize,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    pub fn new(test_name: &str) -> Self {
        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");

        Self {
            test_name: test_name.to_string(),
            index: 0,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current check index
    pub fn index(&self) -> usize {
        self.index
    }

    fn fail(&mut self, msg: String) -> bool {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
        false
    }

    /// Compare two floating-point values
    ///
    /// # Arguments
    ///
    /// * `expected` - Expected value
    /// * `actual` - Actual computed value
    /// * `delta` - Maximum allowed difference
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        if diff > delta {
            let msg = format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            );
            self.fail(msg)
        } else {
            true
        }
    }

    /// Check a boolean condition, recording `what` on failure
    pub fn check(&mut self, condition: bool, what: &str) -> bool {
        self.index += 1;
        if condition {
            true
        } else {
            let msg = format!(
                "Failure in {}_reg: check for index {} - {}",
                self.test_name, self.index, what
            );
            self.fail(msg)
        }
    }

    /// Compare two images for exact equality
    pub fn compare_images(&mut self, image1: &Image, image2: &Image) -> bool {
        self.index += 1;

        if !image1.sizes_equal(image2) {
            let msg = format!(
                "Failure in {}_reg: image comparison for index {} - size mismatch {}x{} vs {}x{}",
                self.test_name,
                self.index,
                image1.width(),
                image1.height(),
                image2.width(),
                image2.height()
            );
            return self.fail(msg);
        }

        for y in 0..image1.height() {
            for x in 0..image1.width() {
                if image1.get_rgb(x, y) != image2.get_rgb(x, y) {
                    let msg = format!(
                        "Failure in {}_reg: image comparison for index {} - pixel mismatch at ({}, {})",
                        self.test_name, self.index, x, y
                    );
                    return self.fail(msg);
                }
            }
        }

        true
    }

    /// Compare two binary data arrays
    pub fn compare_strings(&mut self, data1: &[u8], data2: &[u8]) -> bool {
        self.index += 1;

        if data1 != data2 {
            let msg = format!(
                "Failure in {}_reg: string comparison for index {}\n\
                 sizes: {} vs {}",
                self.test_name,
                self.index,
                data1.len(),
                data2.len()
            );
            self.fail(msg)
        } else {
            true
        }
    }

    /// Path for an output file of the current test
    ///
    /// The regout directory is created on demand. The file name carries the
    /// test name and the next index, e.g. `pipeline.03.ppm`.
    pub fn output_path(&self, ext: &str) -> TestResult<PathBuf> {
        let dir = regout_dir();
        fs::create_dir_all(&dir).map_err(|e| TestError::DirectoryCreate {
            path: dir.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(dir.join(format!(
            "{}.{:02}.{}",
            self.test_name,
            self.index + 1,
            ext
        )))
    }

    /// Clean up and report results
    ///
    /// # Returns
    ///
    /// `true` if all checks passed, `false` if any failed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Check if all checks have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quadpix_core::Rgb;

    #[test]
    fn test_compare_values_within_delta() {
        let mut rp = RegParams::new("test");
        assert!(rp.compare_values(100.0, 100.5, 1.0));
        assert!(rp.is_success());
    }

    #[test]
    fn test_compare_values_failure() {
        let mut rp = RegParams::new("test");
        assert!(!rp.compare_values(100.0, 200.0, 0.0));
        assert!(!rp.is_success());
        assert_eq!(rp.failures().len(), 1);
    }

    #[test]
    fn test_compare_images() {
        let mut rp = RegParams::new("test");
        let a = Image::filled(3, 2, Rgb::WHITE).unwrap();
        let same: Image = a.to_mut().into();
        assert!(rp.compare_images(&a, &same));
        let mut b = a.to_mut();
        b.set_rgb(2, 1, Rgb::BLACK).unwrap();
        assert!(!rp.compare_images(&a, &b.into()));
        assert_eq!(rp.index(), 2);
    }
}

//! Shared test utilities.
//!
//! Synthetic images are generated on the fly so tests never depend on
//! checked-in binaries.

use image::{Rgb, RgbImage};
use std::path::Path;

/// Write a PNG with a deterministic gradient so crops can be checked pixel by pixel.
pub fn create_test_png(path: &Path, width: u32, height: u32) {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    });
    img.save_with_format(path, image::ImageFormat::Png).unwrap();
}

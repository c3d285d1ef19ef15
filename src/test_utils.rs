// SPDX-License-Identifier: MPL-2.0
//! Test utilities for float comparisons and image fixtures.
//!
//! Re-exports the `approx` crate's assertion macros for float comparison,
//! which properly handle floating-point precision issues that `assert_eq!` cannot.

pub use approx::{assert_abs_diff_eq, assert_abs_diff_ne, assert_relative_eq, assert_relative_ne};

use std::path::{Path, PathBuf};

/// Default epsilon for f32 comparisons.
pub const F32_EPSILON: f32 = 1e-5;

/// Writes a solid-color RGB image into `dir`; the format follows the extension of `name`.
pub fn create_test_image(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    image_rs::RgbImage::from_pixel(width, height, image_rs::Rgb([90, 120, 200]))
        .save(&path)
        .expect("failed to write test image");
    path
}

/// Writes a PNG whose pixel at (x, y) is `[x, y, 0, 255]` (coordinates truncated to u8).
pub fn create_gradient_image(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    image_rs::RgbaImage::from_fn(width, height, |x, y| {
        image_rs::Rgba([(x % 256) as u8, (y % 256) as u8, 0, 255])
    })
    .save(&path)
    .expect("failed to write test image");
    path
}

/// In-memory image whose pixel at (x, y) is `[x, y, 0, 255]`.
pub fn gradient_data(width: u32, height: u32) -> crate::media::ImageData {
    let mut pixels = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            pixels.extend_from_slice(&[(x % 256) as u8, (y % 256) as u8, 0, 255]);
        }
    }
    crate::media::ImageData::from_rgba(width, height, pixels)
}

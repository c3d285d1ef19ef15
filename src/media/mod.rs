// SPDX-License-Identifier: MPL-2.0
//! Raster image handling: decoding, resampling, caching and fingerprints.

pub mod cache;
pub mod fingerprint;
pub mod image;

use std::path::Path;

pub use cache::DecodedImageCache;
pub use extensions::IMAGE_EXTENSIONS;
pub use fingerprint::{ComparisonFingerprint, FingerprintCache};
pub use image::{load_image, ImageData, ResizeFilter};

/// Browsable file extensions.
pub mod extensions {
    /// Matched case-sensitively: `photo.Jpg` is not listed.
    pub const IMAGE_EXTENSIONS: &[&str] = &[
        "jpg", "JPG", "jpeg", "JPEG", "png", "PNG", "ppm", "PPM", "bmp", "BMP", "gif", "GIF",
        "tiff", "TIFF",
    ];
}

/// Returns true when the extension of `path` is one of [`IMAGE_EXTENSIONS`].
#[must_use]
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext))
}

/// Human readable byte count (`"1.5 KB"`).
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn sizeof_fmt(bytes: u64) -> String {
    let mut size = bytes as f64;
    for unit in ["", "K", "M", "G", "T", "P", "E", "Z"] {
        if size.abs() < 1024.0 {
            return format!("{size:3.1} {unit}B");
        }
        size /= 1024.0;
    }
    format!("{size:3.1} YB")
}

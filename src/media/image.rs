// SPDX-License-Identifier: MPL-2.0
//! Decoded raster images and their smooth-resampled variants.

use crate::error::{Error, Result};
use iced::widget::image;
use image_rs::imageops::FilterType;
use image_rs::{ColorType, GenericImageView, ImageError};
use std::fs;
use std::io;
use std::path::Path;
use std::sync::Arc;

/// Resampling filter used when a pane renders at a non-unity zoom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizeFilter {
    /// Pixel replication; fast, keeps hard edges.
    Nearest,
    /// Bicubic (Catmull-Rom).
    #[default]
    Smooth,
}

impl ResizeFilter {
    fn to_filter_type(self) -> FilterType {
        match self {
            ResizeFilter::Nearest => FilterType::Nearest,
            ResizeFilter::Smooth => FilterType::CatmullRom,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ImageData {
    pub handle: image::Handle,
    pub width: u32,
    pub height: u32,
    /// Decoder color layout, shown in the info panel (e.g. `Rgb8`).
    pub color_type: String,
    rgba_bytes: Arc<Vec<u8>>,
}

impl ImageData {
    /// Creates a new `ImageData` from RGBA pixels.
    #[must_use]
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self::with_color_type(width, height, pixels, "Rgba8".to_string())
    }

    fn with_color_type(width: u32, height: u32, pixels: Vec<u8>, color_type: String) -> Self {
        let rgba_bytes = Arc::new(pixels);
        let handle = image::Handle::from_rgba(width, height, rgba_bytes.to_vec());
        Self {
            handle,
            width,
            height,
            color_type,
            rgba_bytes,
        }
    }

    pub fn rgba_bytes(&self) -> &[u8] {
        &self.rgba_bytes
    }

    /// RGBA value at integer pixel coordinates, `None` outside the image.
    #[must_use]
    pub fn pixel_at(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = ((y as usize) * (self.width as usize) + x as usize) * 4;
        self.rgba_bytes
            .get(offset..offset + 4)
            .map(|px| [px[0], px[1], px[2], px[3]])
    }

    /// Returns a copy resampled to exactly `width` x `height`.
    ///
    /// Requesting the current size returns a cheap clone sharing the pixels.
    pub fn resized(&self, width: u32, height: u32, filter: ResizeFilter) -> Result<Self> {
        let width = width.max(1);
        let height = height.max(1);
        if width == self.width && height == self.height {
            return Ok(self.clone());
        }

        let source =
            image_rs::RgbaImage::from_raw(self.width, self.height, self.rgba_bytes.to_vec())
                .ok_or_else(|| Error::Io("pixel buffer does not match dimensions".into()))?;
        let resized =
            image_rs::imageops::resize(&source, width, height, filter.to_filter_type());

        Ok(Self::with_color_type(
            width,
            height,
            resized.into_vec(),
            self.color_type.clone(),
        ))
    }
}

/// Decodes the image at `path`.
///
/// # Errors
///
/// - [`Error::NotFound`] when the file no longer exists
/// - [`Error::UnsupportedFormat`] when the decoder has no codec for it
/// - [`Error::Decode`] when the content is corrupt
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<ImageData> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => Error::NotFound(path.to_path_buf()),
        _ => Error::Io(err.to_string()),
    })?;

    let img = image_rs::load_from_memory(&bytes).map_err(|err| match err {
        ImageError::Unsupported(_) => Error::UnsupportedFormat(path.to_path_buf()),
        ImageError::IoError(io) => Error::Io(io.to_string()),
        other => Error::Decode {
            path: path.to_path_buf(),
            message: other.to_string(),
        },
    })?;

    let (width, height) = img.dimensions();
    let color_type = color_type_label(img.color());
    let pixels = img.to_rgba8().into_vec();

    Ok(ImageData::with_color_type(width, height, pixels, color_type))
}

fn color_type_label(color: ColorType) -> String {
    format!("{color:?}")
}

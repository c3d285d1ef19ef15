// SPDX-License-Identifier: MPL-2.0
//! Zoom requests, zoom modes and the automatic zoom rules.
//!
//! - [`ZoomMode`]: how a pane renders a non-unity zoom
//! - [`ZoomRequest`]: one zoom gesture, applied to a current factor
//! - [`initial_zoom_for_width`]: integer upscale for small images
//! - [`TargetWidth`]: keep every image at the same on-screen width

use crate::domain::ui::{ZoomFactor, ZoomStep};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Rendering strategy for a pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ZoomMode {
    /// Scale the decoded original while drawing. Cursor coordinates ignore
    /// the zoom.
    #[default]
    Fast,
    /// Re-rasterize the original at the zoomed size with a smooth filter.
    /// Cursor coordinates count the zoom.
    Precise,
}

impl ZoomMode {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            ZoomMode::Fast => ZoomMode::Precise,
            ZoomMode::Precise => ZoomMode::Fast,
        }
    }
}

impl fmt::Display for ZoomMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZoomMode::Fast => f.write_str("fast"),
            ZoomMode::Precise => f.write_str("precise"),
        }
    }
}

/// A single zoom gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ZoomRequest {
    In(ZoomStep),
    Out(ZoomStep),
    Set(ZoomFactor),
}

impl ZoomRequest {
    /// Zoom factor after applying the request to `current`.
    #[must_use]
    pub fn apply(self, current: ZoomFactor) -> ZoomFactor {
        match self {
            ZoomRequest::In(step) => current.scaled(step.value()),
            ZoomRequest::Out(step) => current.scaled(1.0 / step.value()),
            ZoomRequest::Set(factor) => factor,
        }
    }

    /// Reset to 100%.
    #[must_use]
    pub fn reset() -> Self {
        ZoomRequest::Set(ZoomFactor::ONE)
    }
}

/// Zoom shown for a freshly opened image of `width` pixels: images narrower
/// than `threshold` are upscaled by `floor(threshold / width)`.
#[must_use]
pub fn initial_zoom_for_width(width: u32, threshold: u32) -> ZoomFactor {
    if width == 0 || width >= threshold {
        return ZoomFactor::ONE;
    }
    #[allow(clippy::cast_precision_loss)]
    ZoomFactor::new((threshold / width) as f32)
}

/// Remembered on-screen width (`W0 * z0`) that new images are zoomed to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetWidth(f32);

impl TargetWidth {
    /// Captures the current on-screen width; a zero width cancels.
    #[must_use]
    pub fn capture(image_width: u32, zoom: ZoomFactor) -> Option<Self> {
        #[allow(clippy::cast_precision_loss)]
        Self::from_screen_width(image_width as f32 * zoom.value())
    }

    /// Explicit target; zero, negative or non-finite widths cancel.
    #[must_use]
    pub fn from_screen_width(width: f32) -> Option<Self> {
        (width.is_finite() && width > 0.0).then_some(Self(width))
    }

    #[must_use]
    pub fn screen_width(self) -> f32 {
        self.0
    }

    /// Zoom that renders an image of `image_width` at the target width.
    #[must_use]
    pub fn zoom_for(self, image_width: u32) -> ZoomFactor {
        if image_width == 0 {
            return ZoomFactor::ONE;
        }
        #[allow(clippy::cast_precision_loss)]
        ZoomFactor::new(self.0 / image_width as f32)
    }
}

/// Zoom label shown above the main pane.
#[must_use]
pub fn zoom_label(zoom: ZoomFactor) -> String {
    format!("Zoom: {:.2}", zoom.value())
}

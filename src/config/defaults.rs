// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Zoom**: zoom factor bounds and keyboard/wheel step ratios
//! - **Browse**: fast browse stride, pan stride and history length
//! - **Compare**: pane count limits

// ==========================================================================
// Zoom Defaults
// ==========================================================================

/// Ratio applied by a single zoom in/out step.
pub const DEFAULT_ZOOM_STEP: f32 = 1.05;

/// Ratio applied by a zoom step with Shift held.
pub const DEFAULT_FAST_ZOOM_STEP: f32 = 1.2;

/// Smallest accepted zoom step ratio (must stay above 1).
pub const MIN_ZOOM_STEP: f32 = 1.001;

/// Largest accepted zoom step ratio.
pub const MAX_ZOOM_STEP: f32 = 4.0;

/// Smallest zoom factor a viewport accepts.
pub const MIN_ZOOM_FACTOR: f32 = 0.01;

/// Largest zoom factor a viewport accepts.
pub const MAX_ZOOM_FACTOR: f32 = 512.0;

/// Images narrower than this are enlarged by an integer factor on open.
pub const DEFAULT_AUTO_FIT_WIDTH: u32 = 500;

/// Precision used when deciding that a zoom factor is exactly 1.
pub const ZOOM_UNITY_DECIMALS: i32 = 3;

/// Largest re-rasterized buffer (in pixels) a precise-mode pane allocates.
/// Beyond it the pane draws the scaled original instead.
pub const MAX_PRECISE_PIXELS: u64 = 64 * 1024 * 1024;

// ==========================================================================
// Browse Defaults
// ==========================================================================

/// Number of images skipped by Shift+wheel / Shift+arrow.
pub const DEFAULT_FAST_BROWSE_STEP: i32 = 10;

/// Screen pixels moved by one Ctrl+arrow pan.
pub const DEFAULT_PAN_STEP: f32 = 40.0;

/// Maximum number of entries kept in the recent paths history.
pub const RECENT_HISTORY_CAP: usize = 5;

/// Decoded images kept in memory across navigation.
pub const DEFAULT_IMAGE_CACHE_CAPACITY: usize = 16;

// ==========================================================================
// Compare Defaults
// ==========================================================================

/// Maximum number of panes shown side by side.
pub const MAX_PANES: usize = 4;

/// Minimum number of columns in interval mode.
pub const MIN_INTERVAL_COLUMNS: usize = 2;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(MIN_ZOOM_FACTOR > 0.0);
    assert!(MAX_ZOOM_FACTOR > 1.0);
    assert!(MIN_ZOOM_FACTOR < 1.0);

    assert!(MIN_ZOOM_STEP > 1.0);
    assert!(MAX_ZOOM_STEP > MIN_ZOOM_STEP);
    assert!(DEFAULT_ZOOM_STEP >= MIN_ZOOM_STEP);
    assert!(DEFAULT_ZOOM_STEP <= MAX_ZOOM_STEP);
    assert!(DEFAULT_FAST_ZOOM_STEP > DEFAULT_ZOOM_STEP);
    assert!(DEFAULT_FAST_ZOOM_STEP <= MAX_ZOOM_STEP);

    assert!(DEFAULT_AUTO_FIT_WIDTH > 0);
    assert!(MAX_PRECISE_PIXELS > 0);
    assert!(DEFAULT_FAST_BROWSE_STEP > 1);
    assert!(DEFAULT_PAN_STEP > 0.0);
    assert!(RECENT_HISTORY_CAP > 0);
    assert!(DEFAULT_IMAGE_CACHE_CAPACITY > 0);

    assert!(MAX_PANES >= MIN_INTERVAL_COLUMNS);
    assert!(MIN_INTERVAL_COLUMNS >= 2);
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fast_step_is_coarser_than_regular_step() {
        assert!(DEFAULT_FAST_ZOOM_STEP > DEFAULT_ZOOM_STEP);
    }

    #[test]
    fn unity_zoom_lies_inside_bounds() {
        assert!((MIN_ZOOM_FACTOR..=MAX_ZOOM_FACTOR).contains(&1.0));
    }
}

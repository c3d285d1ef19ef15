// SPDX-License-Identifier: MPL-2.0
//! UI newtypes.
//!
//! Type-safe wrappers for viewport values, always within valid ranges.

use crate::config::defaults::{
    MAX_PANES, MAX_ZOOM_FACTOR, MAX_ZOOM_STEP, MIN_ZOOM_FACTOR, MIN_ZOOM_STEP,
};
use std::fmt;

// =============================================================================
// ZoomFactor
// =============================================================================

/// Scale from original image pixels to screen pixels (1.0 = 100%).
///
/// Always finite and within `[MIN_ZOOM_FACTOR, MAX_ZOOM_FACTOR]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct ZoomFactor(f32);

impl ZoomFactor {
    pub const ONE: Self = Self(1.0);

    /// Clamps `value` into range; non-finite input becomes 1.0.
    #[must_use]
    pub fn new(value: f32) -> Self {
        if value.is_finite() {
            Self(value.clamp(MIN_ZOOM_FACTOR, MAX_ZOOM_FACTOR))
        } else {
            Self::ONE
        }
    }

    /// Like [`ZoomFactor::new`] but rejects non-finite and non-positive values.
    #[must_use]
    pub fn try_new(value: f32) -> Option<Self> {
        (value.is_finite() && value > 0.0).then(|| Self::new(value))
    }

    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Multiplies by `ratio`, staying in range.
    #[must_use]
    pub fn scaled(self, ratio: f32) -> Self {
        Self::new(self.0 * ratio)
    }

    /// True when the factor rounds to exactly 1 at `decimals` places.
    #[must_use]
    pub fn is_unity(self, decimals: i32) -> bool {
        let scale = 10f32.powi(decimals);
        (self.0 * scale).round() == scale
    }

    #[must_use]
    pub fn is_min(self) -> bool {
        self.0 <= MIN_ZOOM_FACTOR
    }

    #[must_use]
    pub fn is_max(self) -> bool {
        self.0 >= MAX_ZOOM_FACTOR
    }
}

impl Default for ZoomFactor {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for ZoomFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}

// =============================================================================
// ZoomStep
// =============================================================================

/// Multiplicative zoom step; always greater than 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomStep(f32);

impl ZoomStep {
    #[must_use]
    pub fn new(ratio: f32) -> Self {
        if ratio.is_finite() {
            Self(ratio.clamp(MIN_ZOOM_STEP, MAX_ZOOM_STEP))
        } else {
            Self(MIN_ZOOM_STEP)
        }
    }

    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }
}

// =============================================================================
// Rotation
// =============================================================================

/// Counter-clockwise quarter turns, stored as negative degrees
/// (`0, -90, -180, -270`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Rotation {
    #[default]
    None,
    Ccw90,
    Ccw180,
    Ccw270,
}

impl Rotation {
    /// Signed angle in degrees.
    #[must_use]
    pub fn degrees(self) -> i32 {
        match self {
            Rotation::None => 0,
            Rotation::Ccw90 => -90,
            Rotation::Ccw180 => -180,
            Rotation::Ccw270 => -270,
        }
    }

    #[must_use]
    pub fn radians(self) -> f32 {
        (self.degrees() as f32).to_radians()
    }

    /// Next quarter turn counter-clockwise, wrapping back to 0.
    #[must_use]
    pub fn rotated_ccw(self) -> Self {
        match self {
            Rotation::None => Rotation::Ccw90,
            Rotation::Ccw90 => Rotation::Ccw180,
            Rotation::Ccw180 => Rotation::Ccw270,
            Rotation::Ccw270 => Rotation::None,
        }
    }

    /// True when width and height trade places on screen.
    #[must_use]
    pub fn swaps_axes(self) -> bool {
        matches!(self, Rotation::Ccw90 | Rotation::Ccw270)
    }
}

// =============================================================================
// PaneId
// =============================================================================

/// Index of a pane in the compare layout (0 is the leftmost / top-left).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct PaneId(usize);

impl PaneId {
    pub const FIRST: Self = Self(0);

    /// Returns `None` for indices beyond the maximum pane count.
    #[must_use]
    pub fn new(index: usize) -> Option<Self> {
        (index < MAX_PANES).then_some(Self(index))
    }

    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    #[test]
    fn zoom_factor_clamps_into_range() {
        assert_abs_diff_eq!(ZoomFactor::new(0.0).value(), MIN_ZOOM_FACTOR);
        assert_abs_diff_eq!(ZoomFactor::new(1e9).value(), MAX_ZOOM_FACTOR);
        assert!(ZoomFactor::new(0.0).is_min());
        assert!(ZoomFactor::new(1e9).is_max());
    }

    #[test]
    fn zoom_factor_rejects_invalid_input() {
        assert!(ZoomFactor::try_new(f32::NAN).is_none());
        assert!(ZoomFactor::try_new(f32::INFINITY).is_none());
        assert!(ZoomFactor::try_new(0.0).is_none());
        assert!(ZoomFactor::try_new(-2.0).is_none());
        assert_eq!(ZoomFactor::new(f32::NAN), ZoomFactor::ONE);
    }

    #[test]
    fn zoom_factor_unity_detection_uses_rounding() {
        assert!(ZoomFactor::new(1.0004).is_unity(3));
        assert!(ZoomFactor::new(0.9996).is_unity(3));
        assert!(!ZoomFactor::new(1.002).is_unity(3));
    }

    #[test]
    fn zoom_in_then_out_returns_close_to_start() {
        let z = ZoomFactor::new(2.0).scaled(1.05).scaled(1.0 / 1.05);
        assert_abs_diff_eq!(z.value(), 2.0, epsilon = 1e-5);
    }

    #[test]
    fn zoom_step_stays_above_one() {
        assert!(ZoomStep::new(0.5).value() > 1.0);
        assert!(ZoomStep::new(f32::NAN).value() > 1.0);
        assert_abs_diff_eq!(ZoomStep::new(1.2).value(), 1.2);
    }

    #[test]
    fn rotation_cycles_counter_clockwise() {
        let mut r = Rotation::default();
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(r.degrees());
            r = r.rotated_ccw();
        }
        assert_eq!(seen, vec![0, -90, -180, -270]);
        assert_eq!(r, Rotation::None);
    }

    #[test]
    fn quarter_turns_swap_axes() {
        assert!(!Rotation::None.swaps_axes());
        assert!(Rotation::Ccw90.swaps_axes());
        assert!(!Rotation::Ccw180.swaps_axes());
        assert!(Rotation::Ccw270.swaps_axes());
    }

    #[test]
    fn pane_id_rejects_out_of_range() {
        assert!(PaneId::new(MAX_PANES).is_none());
        assert_eq!(PaneId::new(3).map(PaneId::index), Some(3));
    }
}

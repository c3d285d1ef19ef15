// SPDX-License-Identifier: MPL-2.0
//! Side-by-side comparison panes.

pub mod coordinator;

pub use coordinator::{MultiViewCoordinator, PaneLayout, WheelOutcome, ZoomObserver};

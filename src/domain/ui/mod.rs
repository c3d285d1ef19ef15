// SPDX-License-Identifier: MPL-2.0
//! UI domain types.
//!
//! Viewport value objects that are independent of any presentation framework.

pub mod newtypes;

pub use newtypes::{PaneId, Rotation, ZoomFactor, ZoomStep};

// SPDX-License-Identifier: MPL-2.0
//! Per-pane view state, kept apart from the widgets that render it.

pub mod drag;
pub mod selection;
pub mod viewport;
pub mod zoom;

pub use drag::DragState;
pub use selection::{CropBounds, SelectionState};
pub use viewport::{CursorProbe, ViewportTransform};
pub use zoom::{initial_zoom_for_width, zoom_label, TargetWidth, ZoomMode, ZoomRequest};

// SPDX-License-Identifier: MPL-2.0
//! Viewer panes and the info panel.

pub mod info_panel;
pub mod pane;

pub use pane::{background_color, PaneCanvas};

use crate::domain::ui::PaneId;
use iced::mouse::ScrollDelta;
use iced::{Point, Size};

/// Raw input reported by a pane, in pane-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaneEvent {
    Pressed(Point),
    Moved(Point),
    Released,
    Left,
    Wheel { delta: ScrollDelta, position: Point },
    /// The pane was laid out at a new size.
    Resized(Size),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaneMessage {
    pub pane: PaneId,
    pub event: PaneEvent,
}

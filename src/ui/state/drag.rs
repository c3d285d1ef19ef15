// SPDX-License-Identifier: MPL-2.0
//! Grab-and-drag panning state.

use iced::{Point, Vector};

/// Tracks the pointer while the left button pans a pane.
#[derive(Debug, Clone, Default)]
pub struct DragState {
    /// Whether a drag operation is currently active
    pub is_dragging: bool,

    /// Pointer position at the previous move event
    pub last_position: Option<Point>,
}

impl DragState {
    pub fn start(&mut self, position: Point) {
        self.is_dragging = true;
        self.last_position = Some(position);
    }

    pub fn stop(&mut self) {
        self.is_dragging = false;
        self.last_position = None;
    }

    /// Pointer movement since the last call, `None` when not dragging.
    pub fn advance(&mut self, position: Point) -> Option<Vector> {
        if !self.is_dragging {
            return None;
        }
        let last = self.last_position.replace(position)?;
        Some(position - last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_drag_state_is_not_dragging() {
        let mut state = DragState::default();
        assert!(!state.is_dragging);
        assert!(state.advance(Point::new(5.0, 5.0)).is_none());
    }

    #[test]
    fn advance_reports_incremental_deltas() {
        let mut state = DragState::default();
        state.start(Point::new(200.0, 150.0));

        assert_eq!(
            state.advance(Point::new(180.0, 130.0)),
            Some(Vector::new(-20.0, -20.0))
        );
        assert_eq!(
            state.advance(Point::new(185.0, 130.0)),
            Some(Vector::new(5.0, 0.0))
        );
    }

    #[test]
    fn stop_drag_clears_state() {
        let mut state = DragState::default();
        state.start(Point::new(100.0, 50.0));
        state.stop();

        assert!(!state.is_dragging);
        assert!(state.last_position.is_none());
    }
}

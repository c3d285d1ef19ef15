// SPDX-License-Identifier: MPL-2.0
//! Rectangle selection in original-image coordinates.

use iced::{Point, Size};

/// Normalized selection, in whole original pixels (row first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CropBounds {
    pub start_h: i64,
    pub start_w: i64,
    pub len_h: i64,
    pub len_w: i64,
}

impl CropBounds {
    #[must_use]
    pub fn end_h(&self) -> i64 {
        self.start_h + self.len_h
    }

    #[must_use]
    pub fn end_w(&self) -> i64 {
        self.start_w + self.len_w
    }
}

/// Rubber-band selection shared by every pane.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    anchor: Option<Point>,
    current: Option<Point>,
    dragging: bool,
}

impl SelectionState {
    /// Starts a new selection at `point`, replacing any previous one.
    pub fn begin(&mut self, point: Point) {
        self.anchor = Some(point);
        self.current = Some(point);
        self.dragging = true;
    }

    /// Moves the free corner while a selection drag is active.
    pub fn update(&mut self, point: Point) -> bool {
        if !self.dragging {
            return false;
        }
        self.current = Some(point);
        true
    }

    /// Ends the drag; the rectangle stays visible.
    pub fn finish(&mut self) {
        self.dragging = false;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Both corners, unnormalized.
    #[must_use]
    pub fn corners(&self) -> Option<(Point, Point)> {
        Some((self.anchor?, self.current?))
    }

    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn bounds(&self) -> Option<CropBounds> {
        let (a, b) = self.corners()?;
        // Pixel indices, so negative coordinates round down as well.
        let (x0, x1) = (a.x.min(b.x).floor(), a.x.max(b.x).floor());
        let (y0, y1) = (a.y.min(b.y).floor(), a.y.max(b.y).floor());
        Some(CropBounds {
            start_h: y0 as i64,
            start_w: x0 as i64,
            len_h: (y1 - y0) as i64,
            len_w: (x1 - x0) as i64,
        })
    }

    /// True when both corners lie inside an image of `size`.
    #[must_use]
    pub fn in_bounds(&self, size: Size) -> bool {
        let inside = |p: Point| {
            (0.0..=size.width).contains(&p.x) && (0.0..=size.height).contains(&p.y)
        };
        self.corners().is_some_and(|(a, b)| inside(a) && inside(b))
    }

    /// Info panel text, `None` without a selection.
    #[must_use]
    pub fn label(&self) -> Option<String> {
        let b = self.bounds()?;
        Some(format!(
            "Rect Pos: (H, W)\n Start: {}, {}\n End  : {}, {}\n Len  : {}, {}",
            b.start_h,
            b.start_w,
            b.end_h(),
            b.end_w(),
            b.len_h,
            b.len_w
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_up_left_is_normalized() {
        let mut selection = SelectionState::default();
        selection.begin(Point::new(40.0, 30.0));
        selection.update(Point::new(10.0, 5.0));
        assert_eq!(
            selection.bounds(),
            Some(CropBounds {
                start_h: 5,
                start_w: 10,
                len_h: 25,
                len_w: 30,
            })
        );
    }

    #[test]
    fn selection_left_of_the_image_rounds_down() {
        let mut selection = SelectionState::default();
        selection.begin(Point::new(-0.5, -0.5));
        selection.update(Point::new(10.0, 10.0));
        let bounds = selection.bounds().expect("bounds");
        assert_eq!(bounds.start_h, -1);
        assert_eq!(bounds.start_w, -1);
        assert_eq!(bounds.len_h, 11);
        assert_eq!(bounds.end_h(), 10);
    }

    #[test]
    fn update_without_drag_is_ignored() {
        let mut selection = SelectionState::default();
        assert!(!selection.update(Point::new(1.0, 1.0)));
        assert!(selection.bounds().is_none());

        selection.begin(Point::new(0.0, 0.0));
        selection.finish();
        assert!(!selection.update(Point::new(9.0, 9.0)));
        assert_eq!(selection.bounds().map(|b| b.len_w), Some(0));
    }

    #[test]
    fn corners_outside_image_are_flagged() {
        let mut selection = SelectionState::default();
        selection.begin(Point::new(10.0, 10.0));
        selection.update(Point::new(90.0, 40.0));
        assert!(selection.in_bounds(Size::new(100.0, 50.0)));
        selection.update(Point::new(120.0, 40.0));
        assert!(!selection.in_bounds(Size::new(100.0, 50.0)));
    }

    #[test]
    fn label_lists_rows_before_columns() {
        let mut selection = SelectionState::default();
        selection.begin(Point::new(2.0, 3.0));
        selection.update(Point::new(12.0, 8.0));
        let label = selection.label().expect("label");
        assert!(label.contains("Start: 3, 2"));
        assert!(label.contains("End  : 8, 12"));
        assert!(label.contains("Len  : 5, 10"));
    }

    #[test]
    fn clear_drops_rectangle() {
        let mut selection = SelectionState::default();
        selection.begin(Point::new(1.0, 1.0));
        selection.clear();
        assert!(selection.corners().is_none());
        assert!(!selection.is_dragging());
    }
}

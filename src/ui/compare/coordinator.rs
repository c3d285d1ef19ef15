// SPDX-License-Identifier: MPL-2.0
//! Zoom linking across side-by-side panes.
//!
//! The coordinator owns one [`ViewportTransform`] per visible pane. A zoom
//! gesture on one pane can be broadcast: every sibling is then set to the
//! same absolute zoom, never scaled independently. Observers registered with
//! [`MultiViewCoordinator::subscribe`] hear about every zoom change.

use crate::config::defaults::MAX_PANES;
use crate::domain::ui::{PaneId, Rotation, ZoomFactor};
use crate::ui::input::{map_wheel, InputAction, InputBindings};
use crate::ui::state::{ViewportTransform, ZoomMode, ZoomRequest};
use iced::keyboard::Modifiers;
use iced::mouse::ScrollDelta;
use iced::{Point, Size};
use std::fmt;

/// Arrangement of the visible panes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaneLayout {
    #[default]
    Single,
    Row2,
    Row3,
    Grid,
}

impl PaneLayout {
    /// Layout for `count` panes; `None` outside `1..=4`.
    #[must_use]
    pub fn for_count(count: usize) -> Option<Self> {
        match count {
            1 => Some(PaneLayout::Single),
            2 => Some(PaneLayout::Row2),
            3 => Some(PaneLayout::Row3),
            4 => Some(PaneLayout::Grid),
            _ => None,
        }
    }

    #[must_use]
    pub fn pane_count(self) -> usize {
        match self {
            PaneLayout::Single => 1,
            PaneLayout::Row2 => 2,
            PaneLayout::Row3 => 3,
            PaneLayout::Grid => MAX_PANES,
        }
    }

    /// Panes per row.
    #[must_use]
    pub fn columns(self) -> usize {
        match self {
            PaneLayout::Grid => 2,
            other => other.pane_count(),
        }
    }
}

/// What a wheel gesture resolved to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WheelOutcome {
    /// Browse request for the caller; panes never browse on their own.
    Browse(i32),
    Zoomed(ZoomFactor),
    Ignored,
}

pub type ZoomObserver = Box<dyn FnMut(PaneId, ZoomFactor) + Send>;

pub struct MultiViewCoordinator {
    layout: PaneLayout,
    panes: Vec<ViewportTransform>,
    observers: Vec<ZoomObserver>,
}

impl fmt::Debug for MultiViewCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultiViewCoordinator")
            .field("layout", &self.layout)
            .field("panes", &self.panes)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Default for MultiViewCoordinator {
    fn default() -> Self {
        Self::new(PaneLayout::Single, ZoomMode::default())
    }
}

impl MultiViewCoordinator {
    #[must_use]
    pub fn new(layout: PaneLayout, mode: ZoomMode) -> Self {
        Self {
            layout,
            panes: (0..layout.pane_count())
                .map(|_| ViewportTransform::new(mode))
                .collect(),
            observers: Vec::new(),
        }
    }

    #[must_use]
    pub fn layout(&self) -> PaneLayout {
        self.layout
    }

    #[must_use]
    pub fn pane_count(&self) -> usize {
        self.panes.len()
    }

    pub fn pane_ids(&self) -> impl Iterator<Item = PaneId> {
        (0..self.panes.len()).filter_map(PaneId::new)
    }

    #[must_use]
    pub fn pane(&self, id: PaneId) -> Option<&ViewportTransform> {
        self.panes.get(id.index())
    }

    pub fn pane_mut(&mut self, id: PaneId) -> Option<&mut ViewportTransform> {
        self.panes.get_mut(id.index())
    }

    #[must_use]
    pub fn panes(&self) -> &[ViewportTransform] {
        &self.panes
    }

    /// Changes the pane arrangement. Kept panes keep their state; new panes
    /// start with the first pane's mode and zoom.
    pub fn set_layout(&mut self, layout: PaneLayout) {
        if layout == self.layout {
            return;
        }
        let (mode, zoom, size) = self.panes.first().map_or(
            (ZoomMode::default(), ZoomFactor::ONE, Size::ZERO),
            |p| (p.mode(), p.zoom(), p.viewport_size()),
        );
        self.panes.resize_with(layout.pane_count(), || {
            let mut pane = ViewportTransform::new(mode);
            pane.set_zoom(zoom);
            pane.set_viewport_size(size);
            pane
        });
        self.layout = layout;
        log::debug!("pane layout set to {layout:?}");
    }

    /// Registers a callback invoked with `(pane, zoom)` for every zoom change.
    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: FnMut(PaneId, ZoomFactor) + Send + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    fn emit(&mut self, pane: PaneId, zoom: ZoomFactor) {
        for observer in &mut self.observers {
            observer(pane, zoom);
        }
    }

    /// Zooms `id` around `anchor` and, with `broadcast`, sets every sibling
    /// to the resulting zoom. Returns `None` for an unknown pane.
    pub fn zoom_pane(
        &mut self,
        id: PaneId,
        request: ZoomRequest,
        anchor: Option<Point>,
        broadcast: bool,
    ) -> Option<ZoomFactor> {
        let zoom = self.pane_mut(id)?.apply_zoom(request, anchor);
        self.emit(id, zoom);
        if broadcast {
            self.notify_zoom(id, zoom);
        }
        Some(zoom)
    }

    /// Sets every pane except `source` to `zoom`.
    pub fn notify_zoom(&mut self, source: PaneId, zoom: ZoomFactor) {
        let siblings: Vec<PaneId> = self.pane_ids().filter(|id| *id != source).collect();
        for id in siblings {
            if let Some(pane) = self.pane_mut(id) {
                pane.set_zoom(zoom);
            }
            self.emit(id, zoom);
        }
    }

    /// Resolves a wheel gesture over `pane` from its explicit inputs.
    pub fn handle_wheel(
        &mut self,
        pane: PaneId,
        modifiers: Modifiers,
        delta: ScrollDelta,
        anchor: Option<Point>,
        bindings: &InputBindings,
    ) -> WheelOutcome {
        match map_wheel(modifiers, delta, bindings) {
            Some(InputAction::Browse(step)) => WheelOutcome::Browse(step),
            Some(InputAction::Zoom { request, broadcast }) => self
                .zoom_pane(pane, request, anchor, broadcast)
                .map_or(WheelOutcome::Ignored, WheelOutcome::Zoomed),
            _ => WheelOutcome::Ignored,
        }
    }

    /// Flips `id` between fast and precise rendering.
    pub fn toggle_mode(&mut self, id: PaneId) -> Option<ZoomMode> {
        self.pane_mut(id).map(ViewportTransform::toggle_mode)
    }

    pub fn set_mode_all(&mut self, mode: ZoomMode) {
        for pane in &mut self.panes {
            pane.set_mode(mode);
        }
    }

    /// Rotates every pane so comparisons stay aligned.
    pub fn rotate_all(&mut self) -> Rotation {
        let mut rotation = Rotation::None;
        for pane in &mut self.panes {
            rotation = pane.rotate_counterclockwise();
        }
        rotation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ui::ZoomStep;
    use crate::test_utils::{assert_abs_diff_eq, gradient_data};
    use std::sync::{Arc, Mutex};

    fn id(index: usize) -> PaneId {
        PaneId::new(index).expect("pane id")
    }

    fn two_panes() -> MultiViewCoordinator {
        let mut coordinator = MultiViewCoordinator::new(PaneLayout::Row2, ZoomMode::Fast);
        let image = Arc::new(gradient_data(64, 64));
        for pane in coordinator.pane_ids().collect::<Vec<_>>() {
            let view = coordinator.pane_mut(pane).expect("pane");
            view.set_viewport_size(Size::new(32.0, 32.0));
            view.set_image(Arc::clone(&image), None);
        }
        coordinator
    }

    #[test]
    fn layouts_match_pane_counts() {
        for count in 1..=4 {
            let layout = PaneLayout::for_count(count).expect("layout");
            assert_eq!(layout.pane_count(), count);
        }
        assert!(PaneLayout::for_count(0).is_none());
        assert!(PaneLayout::for_count(5).is_none());
        assert_eq!(PaneLayout::Grid.columns(), 2);
        assert_eq!(PaneLayout::Row3.columns(), 3);
    }

    #[test]
    fn broadcast_sets_sibling_to_same_zoom() {
        let mut coordinator = two_panes();
        let zoom = coordinator
            .zoom_pane(id(0), ZoomRequest::In(ZoomStep::new(1.05)), None, true)
            .expect("zoom");
        assert_abs_diff_eq!(zoom.value(), 1.05, epsilon = 1e-6);
        let sibling = coordinator.pane(id(1)).expect("pane").zoom();
        assert_eq!(sibling, zoom);
    }

    #[test]
    fn suppressed_broadcast_leaves_sibling_alone() {
        let mut coordinator = two_panes();
        coordinator.zoom_pane(id(0), ZoomRequest::In(ZoomStep::new(1.05)), None, false);
        assert_eq!(coordinator.pane(id(1)).expect("pane").zoom(), ZoomFactor::ONE);
    }

    #[test]
    fn broadcast_uses_absolute_value() {
        let mut coordinator = two_panes();
        coordinator.zoom_pane(id(1), ZoomRequest::Set(ZoomFactor::new(3.0)), None, false);
        coordinator.zoom_pane(id(0), ZoomRequest::In(ZoomStep::new(1.2)), None, true);
        let a = coordinator.pane(id(0)).expect("pane").zoom().value();
        let b = coordinator.pane(id(1)).expect("pane").zoom().value();
        assert_abs_diff_eq!(a, 1.2, epsilon = 1e-6);
        assert_abs_diff_eq!(b, 1.2, epsilon = 1e-6);
    }

    #[test]
    fn observers_hear_every_pane() {
        let mut coordinator = two_panes();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        coordinator.subscribe(move |pane, zoom| {
            sink.lock().unwrap().push((pane.index(), zoom));
        });

        coordinator.zoom_pane(id(0), ZoomRequest::Set(ZoomFactor::new(2.0)), None, true);
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0], (0, ZoomFactor::new(2.0)));
        assert_eq!(seen[1], (1, ZoomFactor::new(2.0)));
    }

    #[test]
    fn wheel_resolves_from_explicit_modifiers() {
        let mut coordinator = two_panes();
        let bindings = InputBindings::default();
        let up = ScrollDelta::Lines { x: 0.0, y: 1.0 };

        let outcome = coordinator.handle_wheel(id(1), Modifiers::empty(), up, None, &bindings);
        assert_eq!(outcome, WheelOutcome::Browse(-1));

        let outcome = coordinator.handle_wheel(
            id(1),
            Modifiers::COMMAND | Modifiers::SHIFT,
            up,
            None,
            &bindings,
        );
        assert!(matches!(outcome, WheelOutcome::Zoomed(_)));
        assert_eq!(coordinator.pane(id(0)).expect("pane").zoom(), ZoomFactor::ONE);

        let outcome = coordinator.handle_wheel(id(1), Modifiers::COMMAND, up, None, &bindings);
        let WheelOutcome::Zoomed(zoom) = outcome else {
            panic!("expected zoom, got {outcome:?}");
        };
        assert_eq!(coordinator.pane(id(0)).expect("pane").zoom(), zoom);
    }

    #[test]
    fn unknown_pane_is_ignored() {
        let mut coordinator = MultiViewCoordinator::default();
        assert!(coordinator
            .zoom_pane(id(3), ZoomRequest::reset(), None, true)
            .is_none());
    }

    #[test]
    fn growing_layout_inherits_zoom_and_mode() {
        let mut coordinator = MultiViewCoordinator::default();
        coordinator.zoom_pane(id(0), ZoomRequest::Set(ZoomFactor::new(2.0)), None, false);
        coordinator.toggle_mode(id(0));
        coordinator.set_layout(PaneLayout::Grid);
        assert_eq!(coordinator.pane_count(), 4);
        let last = coordinator.pane(id(3)).expect("pane");
        assert_eq!(last.zoom(), ZoomFactor::new(2.0));
        assert_eq!(last.mode(), ZoomMode::Precise);

        coordinator.set_layout(PaneLayout::Single);
        assert_eq!(coordinator.pane_count(), 1);
    }

    #[test]
    fn modes_toggle_per_pane() {
        let mut coordinator = two_panes();
        assert_eq!(coordinator.toggle_mode(id(1)), Some(ZoomMode::Precise));
        assert_eq!(coordinator.pane(id(0)).expect("pane").mode(), ZoomMode::Fast);
        coordinator.set_mode_all(ZoomMode::Precise);
        assert_eq!(coordinator.pane(id(0)).expect("pane").mode(), ZoomMode::Precise);
    }
}

// SPDX-License-Identifier: MPL-2.0
//! Per-pane mapping between image pixels and pane coordinates.
//!
//! Scene coordinates are pixels of the decoded original, origin top-left.
//! Screen coordinates are pane-local logical pixels. The transform is
//!
//! ```text
//! screen = viewport_center + R(scale * (scene - center))
//! ```
//!
//! where `center` is the scene point shown in the middle of the pane, `scale`
//! is displayed size over original size per axis and `R` is the pane
//! rotation. In fast mode the original is scaled while drawing. In precise
//! mode a resampled copy at `round(original * zoom)` is drawn 1:1, so the
//! per-axis scale is the rounded ratio.

use super::zoom::{ZoomMode, ZoomRequest};
use crate::config::defaults::{MAX_PRECISE_PIXELS, ZOOM_UNITY_DECIMALS};
use crate::domain::ui::{Rotation, ZoomFactor, ZoomStep};
use crate::media::{ImageData, ResizeFilter};
use iced::{Point, Rectangle, Size, Vector};
use std::sync::Arc;

/// Readout for the pixel under the cursor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorProbe {
    /// Position in the displayed buffer: the resampled buffer in precise
    /// mode, the original otherwise.
    pub scene: Point,
    /// Position in the original image.
    pub original: Point,
    /// False outside `[0, width] x [0, height]` of the original.
    pub in_bounds: bool,
    /// RGBA under the cursor, `None` outside the image.
    pub color: Option<[u8; 4]>,
    /// True when `scene` is measured in the resampled buffer.
    pub counts_zoom: bool,
}

impl CursorProbe {
    #[must_use]
    pub fn position_label(&self) -> String {
        let basis = if self.counts_zoom {
            "counting zoom"
        } else {
            "ignoring zoom"
        };
        format!(
            "Cursor position:\n ({basis})\n Height(y): {:.1}\n Width(x):  {:.1}",
            self.scene.y, self.scene.x
        )
    }

    #[must_use]
    pub fn color_label(&self) -> String {
        match self.color {
            Some([r, g, b, a]) => format!(" ({r:3}, {g:3}, {b:3}, {a:3})"),
            None => " (  -,   -,   -,   -)".to_string(),
        }
    }
}

/// Exact `(cos, sin)` for each quarter turn.
fn cos_sin(rotation: Rotation) -> (f32, f32) {
    match rotation {
        Rotation::None => (1.0, 0.0),
        Rotation::Ccw90 => (0.0, -1.0),
        Rotation::Ccw180 => (-1.0, 0.0),
        Rotation::Ccw270 => (0.0, 1.0),
    }
}

fn rotate(v: Vector, rotation: Rotation) -> Vector {
    let (c, s) = cos_sin(rotation);
    Vector::new(v.x * c - v.y * s, v.x * s + v.y * c)
}

fn unrotate(v: Vector, rotation: Rotation) -> Vector {
    let (c, s) = cos_sin(rotation);
    Vector::new(v.x * c + v.y * s, -v.x * s + v.y * c)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn precise_size(width: u32, height: u32, zoom: ZoomFactor) -> (u32, u32) {
    let scaled = |len: u32| ((len as f32 * zoom.value()).round() as u32).max(1);
    (scaled(width), scaled(height))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn pixel_under(image: &ImageData, point: Point) -> Option<[u8; 4]> {
    if point.x < 0.0 || point.y < 0.0 {
        return None;
    }
    image.pixel_at(point.x.floor() as u32, point.y.floor() as u32)
}

/// Zoom, pan, rotation and render mode of one pane.
#[derive(Debug, Clone)]
pub struct ViewportTransform {
    original: Option<Arc<ImageData>>,
    precise: Option<Arc<ImageData>>,
    zoom: ZoomFactor,
    rotation: Rotation,
    mode: ZoomMode,
    viewport: Size,
    center: Point,
}

impl Default for ViewportTransform {
    fn default() -> Self {
        Self::new(ZoomMode::default())
    }
}

impl ViewportTransform {
    #[must_use]
    pub fn new(mode: ZoomMode) -> Self {
        Self {
            original: None,
            precise: None,
            zoom: ZoomFactor::ONE,
            rotation: Rotation::None,
            mode,
            viewport: Size::ZERO,
            center: Point::ORIGIN,
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn zoom(&self) -> ZoomFactor {
        self.zoom
    }

    #[must_use]
    pub fn mode(&self) -> ZoomMode {
        self.mode
    }

    #[must_use]
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    #[must_use]
    pub fn viewport_size(&self) -> Size {
        self.viewport
    }

    /// Scene point shown in the middle of the pane.
    #[must_use]
    pub fn center(&self) -> Point {
        self.center
    }

    #[must_use]
    pub fn image(&self) -> Option<&Arc<ImageData>> {
        self.original.as_ref()
    }

    /// Buffer to draw: the resampled copy in precise mode, else the original.
    #[must_use]
    pub fn display_image(&self) -> Option<&Arc<ImageData>> {
        self.precise.as_ref().or(self.original.as_ref())
    }

    /// True when the pane draws a resampled buffer 1:1.
    #[must_use]
    pub fn counts_zoom(&self) -> bool {
        self.precise.is_some()
    }

    /// Displayed size before rotation.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn display_size(&self) -> Size {
        match (&self.precise, &self.original) {
            (Some(buffer), _) => Size::new(buffer.width as f32, buffer.height as f32),
            (None, Some(original)) => Size::new(
                original.width as f32 * self.zoom.value(),
                original.height as f32 * self.zoom.value(),
            ),
            (None, None) => Size::ZERO,
        }
    }

    /// Displayed size after rotation.
    #[must_use]
    pub fn screen_extent(&self) -> Size {
        let size = self.display_size();
        if self.rotation.swaps_axes() {
            Size::new(size.height, size.width)
        } else {
            size
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn original_size(&self) -> Size {
        self.original.as_ref().map_or(Size::ZERO, |image| {
            Size::new(image.width as f32, image.height as f32)
        })
    }

    /// Displayed pixels per original pixel, per axis.
    fn scale(&self) -> Vector {
        let original = self.original_size();
        if original.width <= 0.0 || original.height <= 0.0 {
            return Vector::new(1.0, 1.0);
        }
        let display = self.display_size();
        Vector::new(
            display.width / original.width,
            display.height / original.height,
        )
    }

    fn viewport_center(&self) -> Point {
        Point::new(self.viewport.width / 2.0, self.viewport.height / 2.0)
    }

    fn image_center(&self) -> Point {
        let size = self.original_size();
        Point::new(size.width / 2.0, size.height / 2.0)
    }

    // -------------------------------------------------------------------------
    // Image and viewport
    // -------------------------------------------------------------------------

    /// Shows `image`, centered, at `zoom` (or the current zoom).
    pub fn set_image(&mut self, image: Arc<ImageData>, zoom: Option<ZoomFactor>) {
        self.original = Some(image);
        if let Some(zoom) = zoom {
            self.zoom = zoom;
        }
        self.regenerate();
        self.center = self.image_center();
        self.clamp_center();
    }

    pub fn clear_image(&mut self) {
        self.original = None;
        self.precise = None;
        self.center = Point::ORIGIN;
    }

    /// Records the pane size; returns true when it changed.
    pub fn set_viewport_size(&mut self, size: Size) -> bool {
        if self.viewport == size {
            return false;
        }
        self.viewport = size;
        self.clamp_center();
        true
    }

    fn regenerate(&mut self) {
        self.precise = None;
        if self.mode != ZoomMode::Precise {
            return;
        }
        let Some(original) = &self.original else {
            return;
        };
        if self.zoom.is_unity(ZOOM_UNITY_DECIMALS) {
            self.precise = Some(Arc::clone(original));
            return;
        }

        let (width, height) = precise_size(original.width, original.height, self.zoom);
        if u64::from(width) * u64::from(height) > MAX_PRECISE_PIXELS {
            log::debug!("precise buffer {width}x{height} too large, drawing scaled original");
            return;
        }
        match original.resized(width, height, ResizeFilter::Smooth) {
            Ok(buffer) => self.precise = Some(Arc::new(buffer)),
            Err(err) => log::warn!("precise resample failed: {err}"),
        }
    }

    // -------------------------------------------------------------------------
    // Coordinate mapping
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn map_to_screen(&self, scene: Point) -> Point {
        let s = self.scale();
        let d = Vector::new(
            (scene.x - self.center.x) * s.x,
            (scene.y - self.center.y) * s.y,
        );
        self.viewport_center() + rotate(d, self.rotation)
    }

    /// Inverse of [`ViewportTransform::map_to_screen`], rotation included.
    #[must_use]
    pub fn map_to_scene(&self, screen: Point) -> Point {
        let s = self.scale();
        let d = unrotate(screen - self.viewport_center(), self.rotation);
        Point::new(self.center.x + d.x / s.x, self.center.y + d.y / s.y)
    }

    /// Readout for `screen`; `None` without an image.
    #[must_use]
    pub fn probe(&self, screen: Point) -> Option<CursorProbe> {
        let original = self.original.as_ref()?;
        let point = self.map_to_scene(screen);
        let size = self.original_size();
        let in_bounds = (0.0..=size.width).contains(&point.x)
            && (0.0..=size.height).contains(&point.y);

        let probe = match &self.precise {
            Some(buffer) => {
                let s = self.scale();
                let scene = Point::new(point.x * s.x, point.y * s.y);
                CursorProbe {
                    scene,
                    original: point,
                    in_bounds,
                    color: pixel_under(buffer, scene),
                    counts_zoom: true,
                }
            }
            None => CursorProbe {
                scene: point,
                original: point,
                in_bounds,
                color: pixel_under(original, point),
                counts_zoom: false,
            },
        };
        Some(probe)
    }

    /// Unrotated drawing rectangle of the image, centered where the rotated
    /// image lands on screen.
    #[must_use]
    pub fn image_bounds(&self) -> Option<Rectangle> {
        self.original.as_ref()?;
        let center = self.map_to_screen(self.image_center());
        let size = self.display_size();
        Some(Rectangle::new(
            Point::new(center.x - size.width / 2.0, center.y - size.height / 2.0),
            size,
        ))
    }

    /// Screen rectangle spanned by two scene corners.
    #[must_use]
    pub fn screen_rect(&self, a: Point, b: Point) -> Rectangle {
        let a = self.map_to_screen(a);
        let b = self.map_to_screen(b);
        let top_left = Point::new(a.x.min(b.x), a.y.min(b.y));
        Rectangle::new(
            top_left,
            Size::new((a.x - b.x).abs(), (a.y - b.y).abs()),
        )
    }

    // -------------------------------------------------------------------------
    // Zoom
    // -------------------------------------------------------------------------

    /// Applies `request`, keeping the scene point under `anchor` fixed
    /// (the pane center when `None`). Returns the new zoom.
    pub fn apply_zoom(&mut self, request: ZoomRequest, anchor: Option<Point>) -> ZoomFactor {
        let zoom = request.apply(self.zoom);
        self.zoom_to(zoom, anchor);
        zoom
    }

    pub fn zoom_in(&mut self, step: ZoomStep) -> ZoomFactor {
        self.apply_zoom(ZoomRequest::In(step), None)
    }

    pub fn zoom_out(&mut self, step: ZoomStep) -> ZoomFactor {
        self.apply_zoom(ZoomRequest::Out(step), None)
    }

    pub fn set_zoom(&mut self, zoom: ZoomFactor) {
        self.zoom_to(zoom, None);
    }

    /// Sets an absolute ratio; non-finite or non-positive ratios are
    /// rejected and leave the zoom unchanged.
    pub fn set_zoom_ratio(&mut self, ratio: f32) -> Option<ZoomFactor> {
        let zoom = ZoomFactor::try_new(ratio)?;
        self.set_zoom(zoom);
        Some(zoom)
    }

    fn zoom_to(&mut self, zoom: ZoomFactor, anchor: Option<Point>) {
        let anchor = anchor.unwrap_or_else(|| self.viewport_center());
        let pinned = self.map_to_scene(anchor);

        let previous = self.zoom;
        self.zoom = zoom;
        if self.mode == ZoomMode::Precise && previous != zoom {
            self.regenerate();
        }

        let s = self.scale();
        let d = unrotate(anchor - self.viewport_center(), self.rotation);
        self.center = Point::new(pinned.x - d.x / s.x, pinned.y - d.y / s.y);
        self.clamp_center();
    }

    // -------------------------------------------------------------------------
    // Mode and rotation
    // -------------------------------------------------------------------------

    /// Scene center as a fraction of the image extent.
    #[must_use]
    pub fn scroll_fractions(&self) -> Option<(f32, f32)> {
        let size = self.original_size();
        if size.width <= 0.0 || size.height <= 0.0 {
            return None;
        }
        Some((self.center.x / size.width, self.center.y / size.height))
    }

    pub fn set_scroll_fractions(&mut self, fractions: (f32, f32)) {
        let size = self.original_size();
        self.center_on(Point::new(
            fractions.0 * size.width,
            fractions.1 * size.height,
        ));
    }

    /// Switches the render mode, keeping the pixel under the pane center.
    pub fn set_mode(&mut self, mode: ZoomMode) {
        if self.mode == mode {
            return;
        }
        let fractions = self.scroll_fractions();
        self.mode = mode;
        self.regenerate();
        if let Some(fractions) = fractions {
            self.set_scroll_fractions(fractions);
        }
        log::debug!("zoom mode set to {mode}");
    }

    pub fn toggle_mode(&mut self) -> ZoomMode {
        self.set_mode(self.mode.toggled());
        self.mode
    }

    pub fn rotate_counterclockwise(&mut self) -> Rotation {
        self.rotation = self.rotation.rotated_ccw();
        self.clamp_center();
        self.rotation
    }

    // -------------------------------------------------------------------------
    // Panning
    // -------------------------------------------------------------------------

    pub fn center_on(&mut self, scene: Point) {
        self.center = scene;
        self.clamp_center();
    }

    /// Moves the view by `delta` screen pixels (content moves the other way).
    pub fn scroll_by(&mut self, delta: Vector) {
        let s = self.scale();
        let d = unrotate(delta, self.rotation);
        self.center = Point::new(self.center.x + d.x / s.x, self.center.y + d.y / s.y);
        self.clamp_center();
    }

    /// Moves the content by `delta` screen pixels, as a grab-and-drag does.
    pub fn pan_by(&mut self, delta: Vector) {
        self.scroll_by(Vector::new(-delta.x, -delta.y));
    }

    /// Keeps the image covering the pane where it can, and centered along
    /// axes where it is smaller than the pane.
    fn clamp_center(&mut self) {
        if self.original.is_none() {
            return;
        }
        let s = self.scale();
        let image_center = self.image_center();
        let offset = rotate(
            Vector::new(
                (image_center.x - self.center.x) * s.x,
                (image_center.y - self.center.y) * s.y,
            ),
            self.rotation,
        );

        let extent = self.screen_extent();
        let clamp_axis = |offset: f32, extent: f32, viewport: f32| {
            if extent <= viewport {
                0.0
            } else {
                let slack = (extent - viewport) / 2.0;
                offset.clamp(-slack, slack)
            }
        };
        let offset = Vector::new(
            clamp_axis(offset.x, extent.width, self.viewport.width),
            clamp_axis(offset.y, extent.height, self.viewport.height),
        );

        let d = unrotate(offset, self.rotation);
        self.center = Point::new(image_center.x - d.x / s.x, image_center.y - d.y / s.y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_abs_diff_eq, gradient_data};

    fn pane(width: u32, height: u32, viewport: f32) -> ViewportTransform {
        let mut pane = ViewportTransform::default();
        pane.set_viewport_size(Size::new(viewport, viewport));
        pane.set_image(Arc::new(gradient_data(width, height)), None);
        pane
    }

    fn assert_point_eq(a: Point, b: Point) {
        assert_abs_diff_eq!(a.x, b.x, epsilon = 1e-3);
        assert_abs_diff_eq!(a.y, b.y, epsilon = 1e-3);
    }

    #[test]
    fn new_image_is_centered() {
        let pane = pane(400, 200, 100.0);
        assert_point_eq(pane.center(), Point::new(200.0, 100.0));
        assert_point_eq(pane.map_to_scene(Point::new(50.0, 50.0)), Point::new(200.0, 100.0));
    }

    #[test]
    fn fast_mapping_divides_by_zoom() {
        let mut pane = pane(400, 400, 100.0);
        pane.set_zoom(ZoomFactor::new(2.0));
        let scene = pane.map_to_scene(Point::new(60.0, 50.0));
        assert_point_eq(scene, Point::new(205.0, 200.0));
    }

    #[test]
    fn mapping_round_trips_under_every_rotation() {
        let mut pane = pane(300, 200, 150.0);
        pane.set_zoom(ZoomFactor::new(1.7));
        for _ in 0..4 {
            let p = Point::new(123.0, 77.0);
            assert_point_eq(pane.map_to_scene(pane.map_to_screen(p)), p);
            pane.rotate_counterclockwise();
        }
    }

    #[test]
    fn quarter_turn_is_counter_clockwise() {
        let mut pane = pane(400, 400, 400.0);
        pane.rotate_counterclockwise();
        let screen = pane.map_to_screen(Point::new(300.0, 200.0));
        assert_point_eq(screen, Point::new(200.0, 100.0));
    }

    #[test]
    fn zoom_keeps_anchor_fixed() {
        let mut pane = pane(1000, 1000, 200.0);
        pane.set_zoom(ZoomFactor::new(2.0));
        let anchor = Point::new(30.0, 170.0);
        let before = pane.map_to_scene(anchor);
        pane.apply_zoom(ZoomRequest::In(ZoomStep::new(1.2)), Some(anchor));
        assert_point_eq(pane.map_to_scene(anchor), before);
    }

    #[test]
    fn invalid_ratios_are_rejected() {
        let mut pane = pane(10, 10, 10.0);
        pane.set_zoom(ZoomFactor::new(3.0));
        assert!(pane.set_zoom_ratio(f32::NAN).is_none());
        assert!(pane.set_zoom_ratio(0.0).is_none());
        assert!(pane.set_zoom_ratio(-1.0).is_none());
        assert_abs_diff_eq!(pane.zoom().value(), 3.0);
    }

    #[test]
    fn precise_mode_rasterizes_rounded_size() {
        let mut pane = pane(10, 20, 100.0);
        pane.set_mode(ZoomMode::Precise);
        pane.set_zoom(ZoomFactor::new(1.5));
        let buffer = pane.display_image().expect("buffer");
        assert_eq!((buffer.width, buffer.height), (15, 30));
        assert!(pane.counts_zoom());
    }

    #[test]
    fn unity_zoom_round_trip_keeps_original_dimensions() {
        let mut pane = pane(37, 23, 100.0);
        pane.set_zoom(ZoomFactor::new(1.0004));
        pane.set_mode(ZoomMode::Precise);
        let buffer = pane.display_image().expect("buffer");
        assert_eq!((buffer.width, buffer.height), (37, 23));

        pane.set_zoom(ZoomFactor::ONE);
        pane.set_mode(ZoomMode::Fast);
        assert_eq!(pane.display_size(), Size::new(37.0, 23.0));
        assert!(!pane.counts_zoom());
    }

    #[test]
    fn mode_switch_keeps_center_pixel() {
        let mut pane = pane(400, 400, 100.0);
        pane.set_zoom(ZoomFactor::new(2.3));
        pane.center_on(Point::new(150.0, 220.0));
        let before = pane.map_to_scene(Point::new(50.0, 50.0));

        pane.toggle_mode();
        assert_eq!(pane.mode(), ZoomMode::Precise);
        let after = pane.map_to_scene(Point::new(50.0, 50.0));
        assert_abs_diff_eq!(before.x, after.x, epsilon = 0.5);
        assert_abs_diff_eq!(before.y, after.y, epsilon = 0.5);
    }

    #[test]
    fn small_image_stays_centered_when_panned() {
        let mut pane = pane(50, 50, 200.0);
        pane.pan_by(Vector::new(80.0, -30.0));
        assert_point_eq(pane.center(), Point::new(25.0, 25.0));
    }

    #[test]
    fn panning_is_bounded_by_image_edges() {
        let mut pane = pane(400, 400, 100.0);
        pane.scroll_by(Vector::new(10_000.0, 0.0));
        assert_abs_diff_eq!(pane.center().x, 350.0, epsilon = 1e-3);
        pane.pan_by(Vector::new(20.0, 0.0));
        assert_abs_diff_eq!(pane.center().x, 330.0, epsilon = 1e-3);
    }

    #[test]
    fn probe_reports_color_and_bounds() {
        let mut pane = pane(100, 100, 100.0);
        let probe = pane.probe(Point::new(10.5, 20.5)).expect("probe");
        assert!(probe.in_bounds);
        assert_eq!(probe.color, Some([10, 20, 0, 255]));
        assert!(probe.position_label().contains("ignoring zoom"));
        assert_eq!(probe.color_label(), " ( 10,  20,   0, 255)");

        pane.set_viewport_size(Size::new(300.0, 300.0));
        let outside = pane.probe(Point::new(5.0, 5.0)).expect("probe");
        assert!(!outside.in_bounds);
        assert!(outside.color.is_none());
    }

    #[test]
    fn precise_probe_counts_zoom() {
        let mut pane = pane(100, 100, 100.0);
        pane.set_mode(ZoomMode::Precise);
        pane.set_zoom(ZoomFactor::new(2.0));
        let probe = pane.probe(Point::new(50.0, 50.0)).expect("probe");
        assert!(probe.counts_zoom);
        assert_point_eq(probe.original, Point::new(50.0, 50.0));
        assert_point_eq(probe.scene, Point::new(100.0, 100.0));
    }

    #[test]
    fn no_image_means_no_probe() {
        let pane = ViewportTransform::default();
        assert!(pane.probe(Point::ORIGIN).is_none());
        assert!(pane.image_bounds().is_none());
    }
}

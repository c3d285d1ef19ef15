// SPDX-License-Identifier: MPL-2.0
//! Viewer session: the browse model, the linked panes and everything the
//! info panel shows, without any widget code.
//!
//! Navigation is pessimistic. A `request_*` call computes the cursor a move
//! would produce and the images each pane would need. The request is
//! resolved (possibly on a worker thread) and only a successful result is
//! committed. A failed load leaves the cursor and the panes untouched.

use crate::application::port::{DirectoryLister, ImageLoader};
use crate::application::query::{parse_goto_input, BrowseCursor, BrowseState, ComparisonReport};
use crate::config::defaults::{MAX_PANES, MIN_INTERVAL_COLUMNS};
use crate::config::{BackgroundTheme, Config};
use crate::domain::ui::{PaneId, Rotation, ZoomFactor};
use crate::error::{Error, Result};
use crate::infrastructure::{FsImageLoader, FsLister};
use crate::media::{DecodedImageCache, ImageData};
use crate::ui::compare::{MultiViewCoordinator, PaneLayout, WheelOutcome};
use crate::ui::input::{InputAction, InputBindings};
use crate::ui::state::{
    initial_zoom_for_width, zoom_label, CursorProbe, DragState, SelectionState, TargetWidth,
    ZoomMode, ZoomRequest,
};
use iced::keyboard::Modifiers;
use iced::mouse::ScrollDelta;
use iced::{Point, Size, Vector};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// How the visible panes are fed from the browse model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// One pane showing the current image.
    #[default]
    Single,
    /// One folder, consecutive images side by side; browsing skips a page.
    Interval { columns: usize },
    /// One pane per folder at the same path index.
    Comparison,
}

#[derive(Debug, Clone)]
enum PaneSlot {
    Empty,
    Ready(PathBuf, Arc<ImageData>),
    Pending(PathBuf),
}

/// Images a navigation needs before it can be committed.
#[derive(Debug, Clone)]
pub struct NavigationRequest {
    generation: u64,
    cursor: BrowseCursor,
    fresh: bool,
    slots: Vec<PaneSlot>,
}

impl NavigationRequest {
    #[must_use]
    pub fn cursor(&self) -> BrowseCursor {
        self.cursor
    }

    /// True when every image is already decoded.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        !self.slots.iter().any(|s| matches!(s, PaneSlot::Pending(_)))
    }

    /// Decodes the missing images. Safe to run off the UI thread.
    ///
    /// # Errors
    ///
    /// The first load failure; nothing is committed then.
    pub fn resolve(self, loader: &dyn ImageLoader) -> Result<LoadedNavigation> {
        let images = self
            .slots
            .into_iter()
            .map(|slot| match slot {
                PaneSlot::Empty => Ok(None),
                PaneSlot::Ready(path, image) => Ok(Some((path, image, false))),
                PaneSlot::Pending(path) => {
                    let image = loader.load(&path)?;
                    Ok(Some((path, Arc::new(image), true)))
                }
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(LoadedNavigation {
            generation: self.generation,
            cursor: self.cursor,
            fresh: self.fresh,
            images,
        })
    }
}

/// A resolved [`NavigationRequest`], ready for [`Session::commit`].
#[derive(Debug, Clone)]
pub struct LoadedNavigation {
    generation: u64,
    cursor: BrowseCursor,
    fresh: bool,
    /// Per pane: path, image, and whether it was decoded for this request.
    images: Vec<Option<(PathBuf, Arc<ImageData>, bool)>>,
}

pub struct Session {
    browse: BrowseState,
    loader: Arc<dyn ImageLoader>,
    cache: DecodedImageCache,
    coordinator: MultiViewCoordinator,
    view_mode: ViewMode,
    bindings: InputBindings,
    auto_fit_width: u32,
    target_width: Option<TargetWidth>,
    background: BackgroundTheme,
    selection: SelectionState,
    drag: DragState,
    drag_pane: Option<PaneId>,
    probe: Option<(PaneId, CursorProbe)>,
    show_fingerprint: bool,
    fingerprint: Option<String>,
    generation: u64,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("browse", &self.browse)
            .field("coordinator", &self.coordinator)
            .field("view_mode", &self.view_mode)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

impl Session {
    #[must_use]
    pub fn new(
        config: &Config,
        lister: Arc<dyn DirectoryLister>,
        loader: Arc<dyn ImageLoader>,
    ) -> Self {
        Self {
            browse: BrowseState::new(lister),
            loader,
            cache: DecodedImageCache::default(),
            coordinator: MultiViewCoordinator::new(PaneLayout::Single, config.zoom_mode()),
            view_mode: ViewMode::Single,
            bindings: InputBindings::from_config(config),
            auto_fit_width: config.auto_fit_width(),
            target_width: None,
            background: config.background(),
            selection: SelectionState::default(),
            drag: DragState::default(),
            drag_pane: None,
            probe: None,
            show_fingerprint: false,
            fingerprint: None,
            generation: 0,
        }
    }

    /// Session reading images from the local filesystem.
    #[must_use]
    pub fn with_filesystem(config: &Config) -> Self {
        Self::new(config, Arc::new(FsLister), Arc::new(FsImageLoader))
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn browse(&self) -> &BrowseState {
        &self.browse
    }

    #[must_use]
    pub fn coordinator(&self) -> &MultiViewCoordinator {
        &self.coordinator
    }

    /// Shared loader, for resolving requests on a worker thread.
    #[must_use]
    pub fn loader(&self) -> Arc<dyn ImageLoader> {
        Arc::clone(&self.loader)
    }

    #[must_use]
    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    #[must_use]
    pub fn background(&self) -> BackgroundTheme {
        self.background
    }

    #[must_use]
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    #[must_use]
    pub fn target_width(&self) -> Option<TargetWidth> {
        self.target_width
    }

    #[must_use]
    pub fn current_path(&self) -> Option<&Path> {
        self.browse.current_path()
    }

    #[must_use]
    pub fn pane_count(&self) -> usize {
        match self.view_mode {
            ViewMode::Single => 1,
            ViewMode::Interval { columns } => columns,
            ViewMode::Comparison => self.browse.folder_count().clamp(1, MAX_PANES),
        }
    }

    // -------------------------------------------------------------------------
    // Navigation requests
    // -------------------------------------------------------------------------

    fn targets(&self, cursor: BrowseCursor) -> Vec<Option<PathBuf>> {
        match self.view_mode {
            ViewMode::Single => vec![self.browse.entry_at(cursor).map(|e| e.path.clone())],
            ViewMode::Interval { .. } | ViewMode::Comparison => {
                self.browse.pane_paths_for(cursor, self.pane_count())
            }
        }
    }

    fn request_for(&mut self, cursor: BrowseCursor, fresh: bool) -> NavigationRequest {
        let slots = self
            .targets(cursor)
            .into_iter()
            .map(|target| match target {
                None => PaneSlot::Empty,
                Some(path) => match self.cache.get(&path) {
                    Some(image) => PaneSlot::Ready(path, image),
                    None => PaneSlot::Pending(path),
                },
            })
            .collect();
        self.generation += 1;
        NavigationRequest {
            generation: self.generation,
            cursor,
            fresh,
            slots,
        }
    }

    /// Lists the folder of `path` and requests its images. The listing is
    /// applied immediately; the cursor moves once the images load.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] when the folder cannot be listed.
    pub fn request_open(&mut self, path: &Path) -> Result<NavigationRequest> {
        self.browse.open(path)?;
        self.cache.clear();
        self.selection.clear();
        if self.view_mode == ViewMode::Comparison {
            self.set_view_mode(ViewMode::Single);
        }
        let cursor = self.browse.cursor();
        Ok(self.request_for(cursor, true))
    }

    #[must_use]
    pub fn request_path_browse(&mut self, step: i32) -> NavigationRequest {
        let cursor = self.browse.peek_path_browse(step);
        self.request_for(cursor, false)
    }

    #[must_use]
    pub fn request_folder_browse(&mut self, step: i32) -> NavigationRequest {
        let cursor = self.browse.peek_folder_browse(step);
        self.request_for(cursor, false)
    }

    /// Goto from the index field; unparsable text yields `None`.
    pub fn request_goto(&mut self, text: &str) -> Option<NavigationRequest> {
        let index = parse_goto_input(text)?;
        let cursor = self.browse.peek_goto(index);
        Some(self.request_for(cursor, false))
    }

    /// Re-lists every folder, dropping cached images.
    pub fn request_refresh(&mut self) -> Result<NavigationRequest> {
        self.browse.refresh()?;
        self.cache.clear();
        let cursor = self.browse.cursor();
        Ok(self.request_for(cursor, false))
    }

    /// Images for the current cursor, after a layout or filter change.
    #[must_use]
    pub fn request_current(&mut self) -> NavigationRequest {
        let cursor = self.browse.cursor();
        self.request_for(cursor, false)
    }

    /// Installs a resolved request. Requests superseded by a newer one are
    /// dropped; returns whether anything changed.
    pub fn commit(&mut self, loaded: LoadedNavigation) -> bool {
        if loaded.generation != self.generation {
            log::debug!(
                "dropping stale navigation {} (latest {})",
                loaded.generation,
                self.generation
            );
            return false;
        }

        self.browse.commit(loaded.cursor);

        let first_width = loaded
            .images
            .iter()
            .flatten()
            .map(|(_, image, _)| image.width)
            .next();
        let fresh_zoom = match (loaded.fresh, self.target_width, first_width) {
            (true, None, Some(width)) => Some(initial_zoom_for_width(width, self.auto_fit_width)),
            _ => None,
        };

        let ids: Vec<PaneId> = self.coordinator.pane_ids().collect();
        for (id, slot) in ids.into_iter().zip(loaded.images) {
            let Some(pane) = self.coordinator.pane_mut(id) else {
                continue;
            };
            match slot {
                Some((path, image, decoded)) => {
                    let zoom = self
                        .target_width
                        .map(|target| target.zoom_for(image.width))
                        .or(fresh_zoom);
                    pane.set_image(Arc::clone(&image), zoom);
                    if decoded {
                        self.cache.insert(path, image);
                    }
                }
                None => pane.clear_image(),
            }
        }

        self.probe = None;
        self.refresh_fingerprint();
        log::info!("showing {}", self.browse.counter_label());
        true
    }

    /// Records a failed request. The cursor stays where it was; returns the
    /// message for the user.
    pub fn navigation_failed(&mut self, error: &Error) -> String {
        match error {
            Error::NotFound(path) => {
                log::warn!("{} disappeared, keeping current image", path.display())
            }
            other => log::warn!("navigation failed: {other}"),
        }
        error.to_string()
    }

    fn run(&mut self, request: NavigationRequest) -> Result<()> {
        match request.resolve(self.loader.as_ref()) {
            Ok(loaded) => {
                self.commit(loaded);
                Ok(())
            }
            Err(err) => {
                self.navigation_failed(&err);
                Err(err)
            }
        }
    }

    // -------------------------------------------------------------------------
    // Synchronous navigation
    // -------------------------------------------------------------------------

    /// Opens a file or folder and loads it on the calling thread.
    pub fn open(&mut self, path: &Path) -> Result<()> {
        let request = self.request_open(path)?;
        self.run(request)
    }

    pub fn path_browse(&mut self, step: i32) -> Result<()> {
        let request = self.request_path_browse(step);
        self.run(request)
    }

    pub fn folder_browse(&mut self, step: i32) -> Result<()> {
        let request = self.request_folder_browse(step);
        self.run(request)
    }

    /// Returns `Ok(false)` when `text` is not a valid index.
    pub fn goto(&mut self, text: &str) -> Result<bool> {
        match self.request_goto(text) {
            Some(request) => self.run(request).map(|()| true),
            None => Ok(false),
        }
    }

    pub fn refresh(&mut self) -> Result<()> {
        let request = self.request_refresh()?;
        self.run(request)
    }

    pub fn reload_current(&mut self) -> Result<()> {
        let request = self.request_current();
        self.run(request)
    }

    // -------------------------------------------------------------------------
    // Layout, comparison and filters
    // -------------------------------------------------------------------------

    fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
        let interval = match mode {
            ViewMode::Interval { columns } => columns - 1,
            _ => 0,
        };
        self.browse.set_step_interval(interval);
        let layout = PaneLayout::for_count(self.pane_count()).unwrap_or_default();
        self.coordinator.set_layout(layout);
        log::debug!("view mode {mode:?}, {} panes", self.pane_count());
    }

    /// Interval layout with `columns` panes (clamped to 2..=4), or back to a
    /// single pane with `None`. Refused while comparison folders are open.
    pub fn set_interval_columns(&mut self, columns: Option<usize>) -> bool {
        if self.browse.folder_count() > 1 {
            log::warn!("interval mode is unavailable while comparing folders");
            return false;
        }
        let mode = match columns {
            Some(columns) => ViewMode::Interval {
                columns: columns.clamp(MIN_INTERVAL_COLUMNS, MAX_PANES),
            },
            None => ViewMode::Single,
        };
        self.set_view_mode(mode);
        true
    }

    /// Adds a comparison folder and switches to one pane per folder.
    pub fn add_comparison_folder(&mut self, path: &Path) -> Result<ComparisonReport> {
        let report = self.browse.add_comparison_folder(path)?;
        self.set_view_mode(ViewMode::Comparison);
        Ok(report)
    }

    pub fn clear_comparisons(&mut self) {
        self.browse.clear_comparisons();
        self.set_view_mode(ViewMode::Single);
    }

    pub fn set_include_names(&mut self, names: Option<Vec<String>>) -> Result<()> {
        self.browse.set_include_names(names)
    }

    pub fn set_exclude_names(&mut self, names: Option<Vec<String>>) -> Result<()> {
        self.browse.set_exclude_names(names)
    }

    // -------------------------------------------------------------------------
    // Zoom and display
    // -------------------------------------------------------------------------

    pub fn zoom(
        &mut self,
        pane: PaneId,
        request: ZoomRequest,
        anchor: Option<Point>,
        broadcast: bool,
    ) -> Option<ZoomFactor> {
        self.coordinator.zoom_pane(pane, request, anchor, broadcast)
    }

    /// Toggles fast/precise rendering on every pane, following `pane`.
    pub fn toggle_zoom_mode(&mut self, pane: PaneId) -> Option<ZoomMode> {
        let mode = self.coordinator.pane(pane)?.mode().toggled();
        self.coordinator.set_mode_all(mode);
        log::info!("zoom mode: {mode}");
        Some(mode)
    }

    pub fn rotate(&mut self) -> Rotation {
        self.coordinator.rotate_all()
    }

    pub fn toggle_background(&mut self) -> BackgroundTheme {
        self.background = self.background.toggled();
        self.background
    }

    /// Remembers the main pane's on-screen width for subsequent images.
    pub fn capture_target_width(&mut self) -> Option<TargetWidth> {
        let pane = self.coordinator.pane(PaneId::FIRST)?;
        let image = pane.image()?;
        self.target_width = TargetWidth::capture(image.width, pane.zoom());
        self.target_width
    }

    /// Explicit target width in screen pixels; 0 cancels.
    pub fn set_target_width(&mut self, width: f32) {
        self.target_width = TargetWidth::from_screen_width(width);
        match self.target_width {
            Some(target) => log::info!("auto zoom to {:.0}px wide", target.screen_width()),
            None => log::info!("auto zoom cancelled"),
        }
    }

    pub fn resize_pane(&mut self, pane: PaneId, size: Size) -> bool {
        self.coordinator
            .pane_mut(pane)
            .is_some_and(|p| p.set_viewport_size(size))
    }

    pub fn scroll_pane(&mut self, pane: PaneId, delta: Vector) {
        if let Some(p) = self.coordinator.pane_mut(pane) {
            p.scroll_by(delta);
        }
    }

    // -------------------------------------------------------------------------
    // Input
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn bindings(&self) -> &InputBindings {
        &self.bindings
    }

    /// Wheel over `pane`; browse gestures come back as a request to load.
    pub fn handle_wheel(
        &mut self,
        pane: PaneId,
        modifiers: Modifiers,
        delta: ScrollDelta,
        anchor: Option<Point>,
    ) -> Option<NavigationRequest> {
        let bindings = self.bindings;
        match self
            .coordinator
            .handle_wheel(pane, modifiers, delta, anchor, &bindings)
        {
            WheelOutcome::Browse(step) => Some(self.request_path_browse(step)),
            WheelOutcome::Zoomed(_) | WheelOutcome::Ignored => None,
        }
    }

    /// Applies a key action to `pane`; navigation comes back as a request.
    pub fn apply_action(&mut self, pane: PaneId, action: InputAction) -> Option<NavigationRequest> {
        match action {
            InputAction::Browse(step) => return Some(self.request_path_browse(step)),
            InputAction::BrowseFolder(step) => return Some(self.request_folder_browse(step)),
            InputAction::Zoom { request, broadcast } => {
                self.zoom(pane, request, None, broadcast);
            }
            InputAction::Scroll(delta) => self.scroll_pane(pane, delta),
            InputAction::ToggleZoomMode => {
                self.toggle_zoom_mode(pane);
            }
            InputAction::RotateCounterclockwise => {
                self.rotate();
            }
            InputAction::ToggleBackground => {
                self.toggle_background();
            }
        }
        None
    }

    /// Shift starts a selection, a plain press starts panning.
    pub fn pointer_pressed(&mut self, pane: PaneId, position: Point, modifiers: Modifiers) {
        let Some(view) = self.coordinator.pane(pane) else {
            return;
        };
        if modifiers.shift() {
            self.selection.begin(view.map_to_scene(position));
        } else {
            self.drag.start(position);
            self.drag_pane = Some(pane);
        }
    }

    pub fn pointer_moved(&mut self, pane: PaneId, position: Point) {
        self.probe = self
            .coordinator
            .pane(pane)
            .and_then(|view| view.probe(position))
            .map(|probe| (pane, probe));

        if self.selection.is_dragging() {
            if let Some(view) = self.coordinator.pane(pane) {
                self.selection.update(view.map_to_scene(position));
            }
        }

        if self.drag_pane == Some(pane) {
            if let Some(delta) = self.drag.advance(position) {
                if let Some(view) = self.coordinator.pane_mut(pane) {
                    view.pan_by(delta);
                }
            }
        }
    }

    pub fn pointer_released(&mut self) {
        self.selection.finish();
        self.drag.stop();
        self.drag_pane = None;
    }

    pub fn pointer_left(&mut self, pane: PaneId) {
        if self.probe.is_some_and(|(p, _)| p == pane) {
            self.probe = None;
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // -------------------------------------------------------------------------
    // Info panel
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn zoom_label(&self) -> String {
        let zoom = self
            .coordinator
            .pane(PaneId::FIRST)
            .map_or(ZoomFactor::ONE, |p| p.zoom());
        zoom_label(zoom)
    }

    #[must_use]
    pub fn counter_label(&self) -> String {
        self.browse.counter_label()
    }

    /// Height, width, file size and color type of the current image.
    #[must_use]
    pub fn info_label(&self) -> Option<String> {
        let image = self.coordinator.pane(PaneId::FIRST)?.image()?;
        let size = self
            .browse
            .current_file_size()
            .unwrap_or_else(|| "-".to_string());
        Some(format!(
            "Info: \n Height: {}\n Width:  {}\n Size: {size}\n Type: {}",
            image.height, image.width, image.color_type
        ))
    }

    #[must_use]
    pub fn cursor_probe(&self) -> Option<&CursorProbe> {
        self.probe.as_ref().map(|(_, probe)| probe)
    }

    #[must_use]
    pub fn selection_label(&self) -> Option<String> {
        self.selection.label()
    }

    /// True when the selection lies inside the main image.
    #[must_use]
    pub fn selection_in_bounds(&self) -> bool {
        self.coordinator
            .pane(PaneId::FIRST)
            .and_then(|p| p.image())
            .is_some_and(|image| {
                #[allow(clippy::cast_precision_loss)]
                let size = Size::new(image.width as f32, image.height as f32);
                self.selection.in_bounds(size)
            })
    }

    /// Folder position and per-folder counts while comparing.
    #[must_use]
    pub fn comparison_label(&self) -> Option<String> {
        let count = self.browse.folder_count();
        if count < 2 {
            return None;
        }
        let counts: Vec<String> = self
            .browse
            .folder_counts()
            .iter()
            .map(ToString::to_string)
            .collect();
        Some(format!(
            "Folder {} / {count} ({} images)",
            self.browse.cursor().folder_index() + 1,
            counts.join(" / ")
        ))
    }

    pub fn set_show_fingerprint(&mut self, show: bool) {
        self.show_fingerprint = show;
        self.refresh_fingerprint();
    }

    #[must_use]
    pub fn fingerprint_label(&self) -> Option<&str> {
        self.fingerprint.as_deref()
    }

    fn refresh_fingerprint(&mut self) {
        if !self.show_fingerprint {
            self.fingerprint = None;
            return;
        }
        let cursor = self.browse.cursor();
        self.fingerprint = match self.browse.fingerprint(
            cursor.folder_index(),
            cursor.path_index(),
            self.loader.as_ref(),
        ) {
            Ok(fp) => Some(fp.to_string()),
            Err(err) => {
                log::debug!("no fingerprint: {err}");
                None
            }
        };
    }
}

// SPDX-License-Identifier: MPL-2.0
//! Folder x path browse model.
//!
//! [`BrowseState`] owns the main folder, any comparison folders, one filtered
//! and naturally-sorted image list per folder, and the [`BrowseCursor`] that
//! selects what is shown. It also derives which image each visible pane
//! should display in interval and folder-comparison layouts.
//!
//! Navigation is two-phase when the caller needs it: `peek_*` computes the
//! cursor a move would produce without committing it, and
//! [`BrowseState::commit`] installs a cursor once its images have loaded.

use super::cursor::BrowseCursor;
use crate::application::port::{DirectoryLister, ImageLoader};
use crate::directory_scanner::{list_images, ImageEntry, NameFilter};
use crate::error::{Error, Result};
use crate::media::{sizeof_fmt, ComparisonFingerprint, FingerprintCache};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Outcome of adding a comparison folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonReport {
    /// Image count per folder, main folder first.
    pub counts: Vec<usize>,
    pub is_same_length: bool,
}

impl ComparisonReport {
    /// User-facing notice when the folders have different image counts.
    #[must_use]
    pub fn warning(&self) -> Option<String> {
        if self.is_same_length {
            return None;
        }
        let counts: Vec<String> = self.counts.iter().map(ToString::to_string).collect();
        Some(format!(
            "Comparison folders have different lengths ({}); indices are clamped",
            counts.join(", ")
        ))
    }
}

/// Parses the goto field: empty selects the first image, a 1-based number
/// selects that image, anything else is ignored.
#[must_use]
pub fn parse_goto_input(text: &str) -> Option<usize> {
    let text = text.trim();
    if text.is_empty() {
        return Some(0);
    }
    if !text.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    text.parse::<usize>().ok().map(|n| n.saturating_sub(1))
}

pub struct BrowseState {
    lister: Arc<dyn DirectoryLister>,
    folders: Vec<PathBuf>,
    lists: Vec<Vec<ImageEntry>>,
    filter: NameFilter,
    cursor: BrowseCursor,
    is_same_length: bool,
    fingerprints: FingerprintCache,
}

impl fmt::Debug for BrowseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BrowseState")
            .field("folders", &self.folders)
            .field("counts", &self.folder_counts())
            .field("filter", &self.filter)
            .field("cursor", &self.cursor)
            .finish_non_exhaustive()
    }
}

impl BrowseState {
    /// Creates an empty model; nothing is shown until [`BrowseState::open`].
    #[must_use]
    pub fn new(lister: Arc<dyn DirectoryLister>) -> Self {
        Self {
            lister,
            folders: Vec::new(),
            lists: Vec::new(),
            filter: NameFilter::None,
            cursor: BrowseCursor::new(),
            is_same_length: true,
            fingerprints: FingerprintCache::new(),
        }
    }

    /// Absolute form of `path` and the folder to list for it.
    fn folder_of(&self, path: &Path) -> Result<(PathBuf, PathBuf)> {
        let path = std::path::absolute(path)?;
        if self.lister.is_dir(&path) {
            return Ok((path.clone(), path));
        }
        let folder = path
            .parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| Error::NotFound(path.clone()))?;
        Ok((path, folder))
    }

    /// Opens a file (cursor on that file) or a folder (cursor on its first
    /// image). Comparison folders are dropped; the filter and step interval
    /// are kept.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] when the folder cannot be listed. The previous
    /// state is kept in that case.
    pub fn open(&mut self, path: &Path) -> Result<()> {
        let (path, folder) = self.folder_of(path)?;
        let list = list_images(self.lister.as_ref(), &folder, &self.filter)?;
        let index = list.iter().position(|e| e.path == path).unwrap_or(0);
        let interval = self.cursor.step_interval();

        log::info!(
            "opened {} ({} images, index {index})",
            folder.display(),
            list.len()
        );

        self.cursor = BrowseCursor::at(index, list.len());
        self.cursor.set_step_interval(interval);
        self.folders = vec![folder];
        self.lists = vec![list];
        self.is_same_length = true;
        self.fingerprints.clear();
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn cursor(&self) -> BrowseCursor {
        self.cursor
    }

    #[must_use]
    pub fn folder_count(&self) -> usize {
        self.folders.len()
    }

    #[must_use]
    pub fn folders(&self) -> &[PathBuf] {
        &self.folders
    }

    /// Image count of `folder_index`, 0 for unknown folders.
    #[must_use]
    pub fn path_count(&self, folder_index: usize) -> usize {
        self.lists.get(folder_index).map_or(0, Vec::len)
    }

    #[must_use]
    pub fn folder_counts(&self) -> Vec<usize> {
        self.lists.iter().map(Vec::len).collect()
    }

    #[must_use]
    pub fn is_same_length(&self) -> bool {
        self.is_same_length
    }

    #[must_use]
    pub fn filter(&self) -> &NameFilter {
        &self.filter
    }

    #[must_use]
    pub fn include_names(&self) -> Option<&[String]> {
        self.filter.include_names()
    }

    #[must_use]
    pub fn exclude_names(&self) -> Option<&[String]> {
        self.filter.exclude_names()
    }

    #[must_use]
    pub fn entry(&self, folder_index: usize, path_index: usize) -> Option<&ImageEntry> {
        self.lists.get(folder_index)?.get(path_index)
    }

    #[must_use]
    pub fn entry_at(&self, cursor: BrowseCursor) -> Option<&ImageEntry> {
        self.entry(cursor.folder_index(), cursor.path_index())
    }

    #[must_use]
    pub fn current_entry(&self) -> Option<&ImageEntry> {
        self.entry_at(self.cursor)
    }

    #[must_use]
    pub fn current_path(&self) -> Option<&Path> {
        self.current_entry().map(|e| e.path.as_path())
    }

    #[must_use]
    pub fn current_folder(&self) -> Option<&Path> {
        self.folders
            .get(self.cursor.folder_index())
            .map(PathBuf::as_path)
    }

    /// `"[i / n] name"` for the current image, 1-based.
    #[must_use]
    pub fn counter_label(&self) -> String {
        let count = self.path_count(self.cursor.folder_index());
        match self.current_entry() {
            Some(entry) => format!(
                "[{} / {}] {}",
                self.cursor.path_index() + 1,
                count,
                entry.basename
            ),
            None => format!("[0 / {count}]"),
        }
    }

    /// Human readable size of the current file.
    #[must_use]
    pub fn current_file_size(&self) -> Option<String> {
        self.current_path()
            .and_then(|p| self.lister.file_size(p))
            .map(sizeof_fmt)
    }

    // -------------------------------------------------------------------------
    // Navigation
    // -------------------------------------------------------------------------

    /// Cursor that [`BrowseState::path_browse`] would produce.
    #[must_use]
    pub fn peek_path_browse(&self, step: i32) -> BrowseCursor {
        let mut next = self.cursor;
        next.step_path(step, self.path_count(next.folder_index()));
        next
    }

    /// Moves `step * (step_interval + 1)` images, wrapping at both ends.
    pub fn path_browse(&mut self, step: i32) {
        self.cursor = self.peek_path_browse(step);
    }

    /// Cursor that [`BrowseState::folder_browse`] would produce.
    #[must_use]
    pub fn peek_folder_browse(&self, step: i32) -> BrowseCursor {
        let mut next = self.cursor;
        next.step_folder(step, &self.folder_counts());
        next
    }

    /// Moves between main and comparison folders, wrapping; the path index
    /// is clamped when the target folder is shorter.
    pub fn folder_browse(&mut self, step: i32) {
        self.cursor = self.peek_folder_browse(step);
    }

    /// Cursor that [`BrowseState::goto`] would produce.
    #[must_use]
    pub fn peek_goto(&self, index: usize) -> BrowseCursor {
        let mut next = self.cursor;
        next.set_path_index(index, &self.folder_counts());
        next
    }

    /// Absolute jump inside the current folder, clamped.
    pub fn goto(&mut self, index: usize) {
        self.cursor = self.peek_goto(index);
    }

    /// Installs a cursor computed by one of the `peek_*` methods.
    ///
    /// The cursor is re-validated against the current lists, so a cursor
    /// made stale by an intervening refresh is still safe.
    pub fn commit(&mut self, mut cursor: BrowseCursor) {
        cursor.clamp_to(&self.folder_counts());
        self.cursor = cursor;
    }

    /// Sets how many extra images a browse step skips (interval layouts
    /// use `columns - 1`).
    pub fn set_step_interval(&mut self, interval: usize) {
        self.cursor.set_step_interval(interval);
    }

    // -------------------------------------------------------------------------
    // Pane targets
    // -------------------------------------------------------------------------

    /// Image shown by each of `pane_count` panes for the current cursor.
    #[must_use]
    pub fn pane_paths(&self, pane_count: usize) -> Vec<Option<PathBuf>> {
        self.pane_paths_for(self.cursor, pane_count)
    }

    /// Image shown by each of `pane_count` panes for `cursor`.
    ///
    /// With comparison folders, pane k shows folder `folder_index + k`
    /// (wrapping over the folder list) at the shared path index, clamped to
    /// that folder; pane 0 is always the current image. With a single
    /// folder, pane k shows image `path_index + k`, wrapping around the end
    /// of the list.
    #[must_use]
    pub fn pane_paths_for(&self, cursor: BrowseCursor, pane_count: usize) -> Vec<Option<PathBuf>> {
        let folder_count = self.lists.len();
        if folder_count > 1 {
            (0..pane_count)
                .map(|k| {
                    if k >= folder_count {
                        return None;
                    }
                    let list = self.lists.get((cursor.folder_index() + k) % folder_count)?;
                    let index = cursor.path_index().min(list.len().checked_sub(1)?);
                    list.get(index).map(|e| e.path.clone())
                })
                .collect()
        } else {
            let list = self.lists.first();
            (0..pane_count)
                .map(|k| {
                    let list = list?;
                    if list.is_empty() {
                        return None;
                    }
                    let index = (cursor.path_index() + k) % list.len();
                    list.get(index).map(|e| e.path.clone())
                })
                .collect()
        }
    }

    // -------------------------------------------------------------------------
    // Comparison folders
    // -------------------------------------------------------------------------

    /// Appends the folder of `path` as a comparison folder.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] when nothing is open yet or the folder cannot be
    /// listed; the folder list is unchanged then.
    pub fn add_comparison_folder(&mut self, path: &Path) -> Result<ComparisonReport> {
        if self.folders.is_empty() {
            return Err(Error::NotFound(path.to_path_buf()));
        }
        let (_, folder) = self.folder_of(path)?;
        let list = list_images(self.lister.as_ref(), &folder, &self.filter)?;

        self.folders.push(folder);
        self.lists.push(list);
        self.recompute_same_length();

        let report = ComparisonReport {
            counts: self.folder_counts(),
            is_same_length: self.is_same_length,
        };
        if let Some(warning) = report.warning() {
            log::warn!("{warning}");
        }
        Ok(report)
    }

    /// Drops every comparison folder and returns to the main folder.
    pub fn clear_comparisons(&mut self) {
        self.folders.truncate(1);
        self.lists.truncate(1);
        let mut cursor = self.cursor;
        cursor.set_folder_index(0, &self.folder_counts());
        self.cursor = cursor;
        self.recompute_same_length();
    }

    fn recompute_same_length(&mut self) {
        let first = self.lists.first().map_or(0, Vec::len);
        self.is_same_length = self.lists.iter().all(|l| l.len() == first);
    }

    // -------------------------------------------------------------------------
    // Filtering and refresh
    // -------------------------------------------------------------------------

    /// Replaces the active name filter and re-lists every folder.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyResult`] when the current folder would have no images
    /// left; the previous filter and lists stay active. Listing errors are
    /// propagated the same way.
    pub fn set_filter(&mut self, filter: NameFilter) -> Result<()> {
        let lists = self.relist(&filter)?;
        let current = self.cursor.folder_index();
        if lists.get(current).is_some_and(Vec::is_empty) {
            let folder = self.folders.get(current).cloned().unwrap_or_default();
            log::warn!("rejecting filter {filter}: no images left in {}", folder.display());
            return Err(Error::EmptyResult {
                filter: filter.to_string(),
                folder,
            });
        }

        log::info!("filter set to {filter}");
        self.filter = filter;
        self.install_lists(lists);
        Ok(())
    }

    /// Sets include substrings; clears any exclude filter.
    ///
    /// `None` removes an include filter and leaves other filters alone.
    pub fn set_include_names(&mut self, names: Option<Vec<String>>) -> Result<()> {
        let filter = match NameFilter::include(names) {
            NameFilter::None if self.filter.include_names().is_none() => self.filter.clone(),
            filter => filter,
        };
        self.set_filter(filter)
    }

    /// Sets exclude substrings; clears any include filter.
    ///
    /// `None` removes an exclude filter and leaves other filters alone.
    pub fn set_exclude_names(&mut self, names: Option<Vec<String>>) -> Result<()> {
        let filter = match NameFilter::exclude(names) {
            NameFilter::None if self.filter.exclude_names().is_none() => self.filter.clone(),
            filter => filter,
        };
        self.set_filter(filter)
    }

    /// Re-lists every folder with the current filter, keeping the current
    /// image selected when it still exists. Clears memoized fingerprints.
    pub fn refresh(&mut self) -> Result<()> {
        let lists = self.relist(&self.filter)?;
        self.install_lists(lists);
        log::debug!("refreshed {} folders", self.folders.len());
        Ok(())
    }

    fn relist(&self, filter: &NameFilter) -> Result<Vec<Vec<ImageEntry>>> {
        self.folders
            .iter()
            .map(|folder| list_images(self.lister.as_ref(), folder, filter))
            .collect()
    }

    fn install_lists(&mut self, lists: Vec<Vec<ImageEntry>>) {
        let current = self.current_path().map(Path::to_path_buf);
        self.lists = lists;

        let counts = self.folder_counts();
        let mut cursor = self.cursor;
        cursor.clamp_to(&counts);
        if let Some(current) = current {
            if let Some(index) = self
                .lists
                .get(cursor.folder_index())
                .and_then(|list| list.iter().position(|e| e.path == current))
            {
                cursor.set_path_index(index, &counts);
            }
        }
        self.cursor = cursor;
        self.recompute_same_length();
        self.fingerprints.clear();
    }

    // -------------------------------------------------------------------------
    // Fingerprints
    // -------------------------------------------------------------------------

    /// Fingerprint of the image at (`folder_index`, `path_index`),
    /// memoized until the next refresh.
    pub fn fingerprint(
        &mut self,
        folder_index: usize,
        path_index: usize,
        loader: &dyn ImageLoader,
    ) -> Result<ComparisonFingerprint> {
        let path = self
            .entry(folder_index, path_index)
            .map(|e| e.path.clone())
            .ok_or_else(|| Error::NotFound(PathBuf::from(format!("#{folder_index}/{path_index}"))))?;
        self.fingerprints.get_or_compute(&path, loader)
    }

    #[must_use]
    pub fn cached_fingerprint_count(&self) -> usize {
        self.fingerprints.len()
    }
}

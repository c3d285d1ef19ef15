// SPDX-License-Identifier: MPL-2.0
//! Folder x path cursor with validated mutators.
//!
//! Every mutator receives the lengths it must respect, so a cursor handed
//! back to a caller always satisfies `folder_index < folder_count` and
//! `path_index < path_count(folder_index)` (both 0 when a list is empty).

/// Position in the folder list and in the current folder's path list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BrowseCursor {
    folder_index: usize,
    path_index: usize,
    step_interval: usize,
}

/// Wraps `index + delta` into `0..len`: past the end goes to 0, before the
/// start goes to the last index. Lists of 0 or 1 elements never move.
fn wrap_step(index: usize, delta: i64, len: usize) -> usize {
    if len <= 1 {
        return index.min(len.saturating_sub(1));
    }
    let last = (len - 1) as i64;
    let next = index as i64 + delta;
    if next > last {
        0
    } else if next < 0 {
        last as usize
    } else {
        next as usize
    }
}

fn clamp_index(index: usize, len: usize) -> usize {
    index.min(len.saturating_sub(1))
}

impl BrowseCursor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cursor at `path_index` in the main folder, clamped to `path_count`.
    #[must_use]
    pub fn at(path_index: usize, path_count: usize) -> Self {
        Self {
            folder_index: 0,
            path_index: clamp_index(path_index, path_count),
            step_interval: 0,
        }
    }

    #[must_use]
    pub fn folder_index(&self) -> usize {
        self.folder_index
    }

    #[must_use]
    pub fn path_index(&self) -> usize {
        self.path_index
    }

    /// Extra images skipped per browse step (0 = plain single-step mode).
    #[must_use]
    pub fn step_interval(&self) -> usize {
        self.step_interval
    }

    /// Moves `step * (step_interval + 1)` images within a folder of
    /// `path_count` images, wrapping at both ends.
    pub fn step_path(&mut self, step: i32, path_count: usize) {
        let delta = i64::from(step) * (self.step_interval as i64 + 1);
        self.path_index = wrap_step(self.path_index, delta, path_count);
    }

    /// Moves `step` folders, wrapping at both ends, then clamps the path
    /// index to the new folder's length.
    pub fn step_folder(&mut self, step: i32, path_counts: &[usize]) {
        self.folder_index = wrap_step(self.folder_index, i64::from(step), path_counts.len());
        self.clamp_path(path_counts);
    }

    /// Absolute path index, clamped into the current folder.
    pub fn set_path_index(&mut self, index: usize, path_counts: &[usize]) {
        self.path_index = index;
        self.clamp_path(path_counts);
    }

    /// Absolute folder index, clamped; the path index follows.
    pub fn set_folder_index(&mut self, index: usize, path_counts: &[usize]) {
        self.folder_index = clamp_index(index, path_counts.len());
        self.clamp_path(path_counts);
    }

    pub fn set_step_interval(&mut self, interval: usize) {
        self.step_interval = interval;
    }

    /// Re-validates both indices after the underlying lists changed.
    pub fn clamp_to(&mut self, path_counts: &[usize]) {
        self.folder_index = clamp_index(self.folder_index, path_counts.len());
        self.clamp_path(path_counts);
    }

    fn clamp_path(&mut self, path_counts: &[usize]) {
        let len = path_counts.get(self.folder_index).copied().unwrap_or(0);
        self.path_index = clamp_index(self.path_index, len);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_backward_from_start_wraps_to_last() {
        let mut cursor = BrowseCursor::new();
        cursor.step_path(-1, 5);
        assert_eq!(cursor.path_index(), 4);
    }

    #[test]
    fn step_forward_past_end_wraps_to_first() {
        let mut cursor = BrowseCursor::at(4, 5);
        cursor.step_path(1, 5);
        assert_eq!(cursor.path_index(), 0);
    }

    #[test]
    fn overshooting_large_step_goes_to_first_not_modulo() {
        let mut cursor = BrowseCursor::at(7, 10);
        cursor.step_path(10, 10);
        assert_eq!(cursor.path_index(), 0);

        let mut cursor = BrowseCursor::at(2, 10);
        cursor.step_path(-10, 10);
        assert_eq!(cursor.path_index(), 9);
    }

    #[test]
    fn single_path_never_moves() {
        let mut cursor = BrowseCursor::new();
        cursor.step_path(3, 1);
        assert_eq!(cursor.path_index(), 0);
        cursor.step_path(-3, 0);
        assert_eq!(cursor.path_index(), 0);
    }

    #[test]
    fn interval_multiplies_the_step() {
        let mut cursor = BrowseCursor::new();
        cursor.set_step_interval(2);
        cursor.step_path(1, 10);
        assert_eq!(cursor.path_index(), 3);
        cursor.step_path(-1, 10);
        assert_eq!(cursor.path_index(), 0);
    }

    #[test]
    fn arbitrary_steps_stay_in_bounds() {
        let mut cursor = BrowseCursor::new();
        for step in [-100, 7, 3, -1, 0, 13, -13, i32::MAX, i32::MIN] {
            cursor.step_path(step, 5);
            assert!(cursor.path_index() < 5, "step {step} left cursor out of range");
        }
    }

    #[test]
    fn folder_step_clamps_path_to_short_folder() {
        let counts = [5, 3];
        let mut cursor = BrowseCursor::at(4, 5);
        cursor.step_folder(1, &counts);
        assert_eq!(cursor.folder_index(), 1);
        assert_eq!(cursor.path_index(), 2);
    }

    #[test]
    fn folder_step_wraps() {
        let counts = [2, 2, 2];
        let mut cursor = BrowseCursor::new();
        cursor.step_folder(-1, &counts);
        assert_eq!(cursor.folder_index(), 2);
        cursor.step_folder(1, &counts);
        assert_eq!(cursor.folder_index(), 0);
    }

    #[test]
    fn folder_step_is_noop_with_one_folder() {
        let mut cursor = BrowseCursor::at(1, 3);
        cursor.step_folder(1, &[3]);
        assert_eq!(cursor.folder_index(), 0);
        assert_eq!(cursor.path_index(), 1);
    }

    #[test]
    fn set_path_index_clamps() {
        let counts = [5, 3];
        let mut cursor = BrowseCursor::new();
        cursor.set_folder_index(1, &counts);
        cursor.set_path_index(4, &counts);
        assert_eq!(cursor.path_index(), 2);
    }

    #[test]
    fn clamp_to_shrunk_lists() {
        let mut cursor = BrowseCursor::new();
        cursor.set_folder_index(2, &[4, 4, 4]);
        cursor.set_path_index(3, &[4, 4, 4]);
        cursor.clamp_to(&[2]);
        assert_eq!(cursor, BrowseCursor::at(1, 2));
    }

    #[test]
    fn empty_lists_pin_cursor_to_zero() {
        let mut cursor = BrowseCursor::at(3, 10);
        cursor.clamp_to(&[]);
        assert_eq!((cursor.folder_index(), cursor.path_index()), (0, 0));
    }
}

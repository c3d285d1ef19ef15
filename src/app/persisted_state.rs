// SPDX-License-Identifier: MPL-2.0
//! Application state persistence using CBOR format.
//!
//! Holds transient state that should survive restarts but is not a user
//! preference: currently the list of recently opened paths. Preferences
//! live in `settings.toml` (see [`crate::config`]).

use super::paths;
use crate::config::RECENT_HISTORY_CAP;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

/// State file name within the app data directory.
const STATE_FILE: &str = "state.cbor";

/// Application state that persists across sessions.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppState {
    /// Recently opened images and folders, most recent first.
    #[serde(default)]
    pub recent_paths: Vec<PathBuf>,
}

impl AppState {
    /// Loads application state from the default location.
    ///
    /// Returns a tuple of (state, optional_warning). If loading fails, returns
    /// default state with a warning message explaining what went wrong.
    pub fn load() -> (Self, Option<String>) {
        Self::load_from(None)
    }

    /// Loads application state from a custom directory.
    pub fn load_from(base_dir: Option<PathBuf>) -> (Self, Option<String>) {
        let Some(path) = Self::state_file_path_with_override(base_dir) else {
            return (Self::default(), None);
        };

        if !path.exists() {
            return (Self::default(), None);
        }

        match fs::File::open(&path) {
            Ok(file) => {
                let reader = BufReader::new(file);
                match ciborium::from_reader::<Self, _>(reader) {
                    Ok(mut state) => {
                        state.recent_paths.truncate(RECENT_HISTORY_CAP);
                        (state, None)
                    }
                    Err(err) => (
                        Self::default(),
                        Some(format!("History file is corrupted ({err})")),
                    ),
                }
            }
            Err(err) => (
                Self::default(),
                Some(format!("History file could not be read ({err})")),
            ),
        }
    }

    /// Saves application state to the default location.
    ///
    /// Returns an optional warning message if save failed.
    pub fn save(&self) -> Option<String> {
        self.save_to(None)
    }

    /// Saves application state to a custom directory.
    pub fn save_to(&self, base_dir: Option<PathBuf>) -> Option<String> {
        let Some(path) = Self::state_file_path_with_override(base_dir) else {
            return Some("No data directory available for history".to_string());
        };

        if let Some(parent) = path.parent() {
            if let Err(err) = fs::create_dir_all(parent) {
                return Some(format!("History directory could not be created ({err})"));
            }
        }

        match fs::File::create(&path) {
            Ok(file) => {
                let writer = BufWriter::new(file);
                if let Err(err) = ciborium::into_writer(self, writer) {
                    return Some(format!("History could not be written ({err})"));
                }
                None
            }
            Err(err) => Some(format!("History file could not be created ({err})")),
        }
    }

    fn state_file_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
        paths::get_app_data_dir_with_override(base_dir).map(|mut path| {
            path.push(STATE_FILE);
            path
        })
    }

    /// Puts `path` at the front of the history.
    ///
    /// An existing entry is moved rather than duplicated, and the list is
    /// capped at [`RECENT_HISTORY_CAP`] entries.
    pub fn record_open(&mut self, path: &Path) {
        self.recent_paths.retain(|p| p != path);
        self.recent_paths.insert(0, path.to_path_buf());
        self.recent_paths.truncate(RECENT_HISTORY_CAP);
    }

    /// Most recent entry, used as the initial target when no path is given.
    #[must_use]
    pub fn last_opened(&self) -> Option<&Path> {
        self.recent_paths.first().map(PathBuf::as_path)
    }
}

// SPDX-License-Identifier: MPL-2.0
//! Preference and history persistence.
//!
//! Writes are skipped under `cfg(test)` so unit tests never touch the user's
//! settings or history files.

use super::persisted_state::AppState;
use crate::config::{self, BackgroundTheme, Config};
use std::path::Path;

/// Stores the background choice in `settings.toml`.
pub fn persist_background(config: &mut Config, background: BackgroundTheme) {
    config.display.background = Some(background);
    if cfg!(test) {
        return;
    }
    if let Err(error) = config::save(config) {
        log::warn!("failed to save settings: {error}");
    }
}

/// Moves `path` to the front of the recent history and saves it.
/// Relative paths are stored in absolute form.
pub fn record_recent(state: &mut AppState, path: &Path) {
    match std::path::absolute(path) {
        Ok(absolute) => state.record_open(&absolute),
        Err(error) => {
            log::warn!("cannot resolve {}: {error}", path.display());
            state.record_open(path);
        }
    }
    if cfg!(test) {
        return;
    }
    if let Some(warning) = state.save() {
        log::warn!("{warning}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn background_is_recorded_in_config() {
        let mut config = Config::default();
        persist_background(&mut config, BackgroundTheme::Gray);
        assert_eq!(config.display.background, Some(BackgroundTheme::Gray));
        assert_eq!(config.background(), BackgroundTheme::Gray);
    }

    #[test]
    fn recent_history_is_updated_in_memory() {
        let mut state = AppState::default();
        record_recent(&mut state, Path::new("/pics/a.png"));
        assert_eq!(state.last_opened(), Some(Path::new("/pics/a.png")));
    }

    #[test]
    fn relative_paths_are_recorded_absolute() {
        let mut state = AppState::default();
        record_recent(&mut state, Path::new("pics/a.png"));
        let recorded = state.last_opened().expect("recorded");
        assert!(recorded.is_absolute());
        assert!(recorded.ends_with("pics/a.png"));
    }
}

// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[display]` - Zoom strategy, zoom step ratios, auto-fit width, background
//! - `[browse]` - Fast browse stride and keyboard pan stride
//!
//! # Path Resolution
//!
//! The config file location can be customized for testing or portable deployments:
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Set `HANDY_LENS_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use handy_lens::config::{self, BackgroundTheme};
//!
//! let (mut config, _warning) = config::load();
//! config.display.background = Some(BackgroundTheme::Gray);
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::error::{Error, Result};
use crate::ui::state::zoom::ZoomMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

/// Viewer background behind the image.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum BackgroundTheme {
    #[default]
    White,
    Gray,
}

impl BackgroundTheme {
    /// Returns the other background; bound to F9.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            BackgroundTheme::White => BackgroundTheme::Gray,
            BackgroundTheme::Gray => BackgroundTheme::White,
        }
    }
}

/// Display and viewer settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisplayConfig {
    /// Zoom strategy applied to newly opened panes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom_mode: Option<ZoomMode>,

    /// Ratio for a single zoom step.
    #[serde(default = "default_zoom_step", skip_serializing_if = "Option::is_none")]
    pub zoom_step: Option<f32>,

    /// Ratio for a zoom step with Shift held.
    #[serde(
        default = "default_fast_zoom_step",
        skip_serializing_if = "Option::is_none"
    )]
    pub fast_zoom_step: Option<f32>,

    /// Width under which images are enlarged on open.
    #[serde(
        default = "default_auto_fit_width",
        skip_serializing_if = "Option::is_none"
    )]
    pub auto_fit_width: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<BackgroundTheme>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            zoom_mode: Some(ZoomMode::default()),
            zoom_step: default_zoom_step(),
            fast_zoom_step: default_fast_zoom_step(),
            auto_fit_width: default_auto_fit_width(),
            background: Some(BackgroundTheme::default()),
        }
    }
}

/// Browsing settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BrowseConfig {
    /// Images skipped by the Shift-modified browse gestures.
    #[serde(
        default = "default_fast_browse_step",
        skip_serializing_if = "Option::is_none"
    )]
    pub fast_browse_step: Option<i32>,

    /// Screen pixels moved by one keyboard pan.
    #[serde(default = "default_pan_step", skip_serializing_if = "Option::is_none")]
    pub pan_step: Option<f32>,
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            fast_browse_step: default_fast_browse_step(),
            pan_step: default_pan_step(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(default)]
    pub browse: BrowseConfig,
}

impl Config {
    /// Zoom step ratio, clamped into the accepted range.
    #[must_use]
    pub fn zoom_step(&self) -> f32 {
        self.display
            .zoom_step
            .unwrap_or(DEFAULT_ZOOM_STEP)
            .clamp(MIN_ZOOM_STEP, MAX_ZOOM_STEP)
    }

    /// Fast zoom step ratio, clamped into the accepted range.
    #[must_use]
    pub fn fast_zoom_step(&self) -> f32 {
        self.display
            .fast_zoom_step
            .unwrap_or(DEFAULT_FAST_ZOOM_STEP)
            .clamp(MIN_ZOOM_STEP, MAX_ZOOM_STEP)
    }

    #[must_use]
    pub fn auto_fit_width(&self) -> u32 {
        self.display
            .auto_fit_width
            .filter(|w| *w > 0)
            .unwrap_or(DEFAULT_AUTO_FIT_WIDTH)
    }

    #[must_use]
    pub fn zoom_mode(&self) -> ZoomMode {
        self.display.zoom_mode.unwrap_or_default()
    }

    #[must_use]
    pub fn background(&self) -> BackgroundTheme {
        self.display.background.unwrap_or_default()
    }

    #[must_use]
    pub fn fast_browse_step(&self) -> i32 {
        self.browse
            .fast_browse_step
            .filter(|s| *s > 0)
            .unwrap_or(DEFAULT_FAST_BROWSE_STEP)
    }

    #[must_use]
    pub fn pan_step(&self) -> f32 {
        self.browse
            .pan_step
            .filter(|s| s.is_finite() && *s > 0.0)
            .unwrap_or(DEFAULT_PAN_STEP)
    }
}

#[allow(clippy::unnecessary_wraps)]
fn default_zoom_step() -> Option<f32> {
    Some(DEFAULT_ZOOM_STEP)
}

#[allow(clippy::unnecessary_wraps)]
fn default_fast_zoom_step() -> Option<f32> {
    Some(DEFAULT_FAST_ZOOM_STEP)
}

#[allow(clippy::unnecessary_wraps)]
fn default_auto_fit_width() -> Option<u32> {
    Some(DEFAULT_AUTO_FIT_WIDTH)
}

#[allow(clippy::unnecessary_wraps)]
fn default_fast_browse_step() -> Option<i32> {
    Some(DEFAULT_FAST_BROWSE_STEP)
}

#[allow(clippy::unnecessary_wraps)]
fn default_pan_step() -> Option<f32> {
    Some(DEFAULT_PAN_STEP)
}

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning message explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    log::warn!("ignoring {}: {err}", path.display());
                    return (
                        Config::default(),
                        Some(format!("Settings could not be read, using defaults ({err})")),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::error::Error;
use crate::session::LoadedNavigation;
use crate::ui::viewer::PaneMessage;
use iced::keyboard;
use std::path::PathBuf;

/// Top-level messages consumed by `App::update`.
#[derive(Debug, Clone)]
pub enum Message {
    /// Pointer, wheel or resize event from one of the panes.
    Pane(PaneMessage),
    /// Keyboard event the focused widget did not capture.
    Keyboard(keyboard::Event),
    ModifiersChanged(keyboard::Modifiers),
    /// Images for a navigation request were decoded (or failed to).
    ImagesLoaded(Result<LoadedNavigation, Error>),
    /// A file or folder was dropped on the window.
    FileDropped(PathBuf),

    PathInputChanged(String),
    OpenPath,
    OpenRecent(PathBuf),
    AddComparisonFolder,
    ClearComparisons,

    GotoInputChanged(String),
    GotoSubmitted,

    IncludeInputChanged(String),
    ExcludeInputChanged(String),
    /// Applies the include names, replacing any exclude filter.
    ApplyInclude,
    ApplyExclude,
    Refresh,

    /// Interval column count, `None` for a single pane.
    SetInterval(Option<usize>),

    TargetWidthInputChanged(String),
    SetTargetWidth,
    CaptureTargetWidth,

    ToggleZoomMode,
    Rotate,
    ToggleBackground,
    ToggleFingerprint(bool),
    ClearSelection,
}

/// Runtime flags passed in from the CLI.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional image file or folder to open on startup.
    pub file_path: Option<String>,
    /// Optional data directory override (for state files).
    /// Takes precedence over `HANDY_LENS_DATA_DIR` environment variable.
    pub data_dir: Option<String>,
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over `HANDY_LENS_CONFIG_DIR` environment variable.
    pub config_dir: Option<String>,
}

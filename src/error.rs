// SPDX-License-Identifier: MPL-2.0
//! Crate-wide error type.
//!
//! Out-of-range navigation is not an error here: cursor arithmetic is
//! clamped or wrapped by [`BrowseCursor`](crate::application::query::BrowseCursor)
//! so an invalid index can never be observed.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum Error {
    /// A folder or file that should exist could not be found.
    #[error("Not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Applying a name filter would leave the current folder without images.
    /// The previous filter stays active.
    #[error("Filter {filter} leaves no images in {}", folder.display())]
    EmptyResult { filter: String, folder: PathBuf },

    /// The file extension is not one of the browsable image formats.
    #[error("Unsupported format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// The decoder rejected the file content.
    #[error("Decode Error ({}): {message}", path.display())]
    Decode { path: PathBuf, message: String },

    #[error("I/O Error: {0}")]
    Io(String),

    #[error("Config Error: {0}")]
    Config(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl Error {
    /// Returns true when the failure means the target vanished from disk,
    /// in which case the caller should keep its current position.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

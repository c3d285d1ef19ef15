// SPDX-License-Identifier: MPL-2.0
//! Application layer.
//!
//! - [`port`]: traits the filesystem adapters implement
//! - [`query`]: the browse model built on top of those ports
//!
//! The layer depends on [`crate::domain`] and [`crate::media`] only; the
//! concrete adapters live in [`crate::infrastructure`].
//!
//! ```ignore
//! use handy_lens::application::query::BrowseState;
//! use handy_lens::infrastructure::FsLister;
//!
//! let mut browse = BrowseState::new(std::sync::Arc::new(FsLister));
//! browse.open(std::path::Path::new("photos/"))?;
//! browse.path_browse(1);
//! ```

pub mod port;
pub mod query;

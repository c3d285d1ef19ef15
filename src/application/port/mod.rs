// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! # Available Ports
//!
//! - [`media`]: Image decoding and folder listing
//!
//! # Design Notes
//!
//! - Traits are `Send + Sync` so adapters can be moved into blocking tasks
//! - Methods return the crate [`Result`](crate::error::Result)
//! - No `async fn` - callers wrap blocking work in Iced `Task`s

pub mod media;

pub use media::{DirectoryLister, ImageLoader};

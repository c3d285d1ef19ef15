// SPDX-License-Identifier: MPL-2.0
//! `handy_lens` is an image browser for comparing folders side by side,
//! built with the Iced GUI framework.
//!
//! The browsing model ([`application::query::BrowseState`]), the per-pane
//! viewport math ([`ui::state::ViewportTransform`]) and the zoom fan-out
//! ([`ui::compare::MultiViewCoordinator`]) are plain Rust types; the
//! [`session::Session`] ties them together without a window, and [`app`]
//! wraps the session in an iced application.

pub mod app;
pub mod application;
pub mod config;
pub mod directory_scanner;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod media;
pub mod session;
pub mod ui;

#[cfg(test)]
pub(crate) mod test_utils;

// SPDX-License-Identifier: MPL-2.0
//! Read-side browse services.
//!
//! - [`cursor`]: folder x path cursor with wrap and clamp rules
//! - [`browse`]: folder lists, filters and pane targets (`BrowseState`)

pub mod browse;
pub mod cursor;

pub use browse::{parse_goto_input, BrowseState, ComparisonReport};
pub use cursor::BrowseCursor;

// SPDX-License-Identifier: MPL-2.0
//! Domain layer - value objects shared by the browse model and the viewports.
//!
//! # Modules
//!
//! - [`ui`]: viewport value objects ([`ZoomFactor`](ui::ZoomFactor),
//!   [`Rotation`](ui::Rotation), [`PaneId`](ui::PaneId))

pub mod ui;

// SPDX-License-Identifier: MPL-2.0
//! User interface state, input mapping and widgets.
//!
//! Follows the Elm-style "state down, messages up" pattern: the widgets in
//! [`viewer`] only draw and report input, all state lives in [`state`] and
//! [`compare`] and is driven through [`crate::session::Session`].
//!
//! - [`state`] - Per-pane zoom, pan, rotation, selection and drag state
//! - [`compare`] - Multi-pane layout and zoom propagation
//! - [`input`] - Key and wheel bindings
//! - [`viewer`] - Pane canvas and info panel

pub mod compare;
pub mod input;
pub mod state;
pub mod viewer;

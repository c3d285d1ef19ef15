// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! Concrete implementations of the port traits defined in `application::port`.
//!
//! - [`fs`]: decoding through the `image` crate and folder listing through `std::fs`

pub mod fs;

pub use fs::{FsImageLoader, FsLister};

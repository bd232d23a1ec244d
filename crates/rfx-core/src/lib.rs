//! # rfx-core
//!
//! Core raster types shared by the RFX crates.
//!
//! - [`RgbaImage`] - Straight-alpha RGBA raster with `f32` channels in `0..=1`
//! - [`TileMode`] - How coordinates outside the raster are resolved
//! - [`pattern`] - Procedural test patterns (checkerboard, gradient, solid)
//! - [`Error`], [`Result`] - Error handling for buffer operations
//!
//! ## Crate Structure
//!
//! ```text
//! rfx-core (this crate)
//!    ^
//!    |
//!    +-- rfx-graph (effect catalog, filter graphs)
//!    +-- rfx-ops (reference renderer)
//!    +-- rfx-cli
//! ```
//!
//! ## Coordinates
//!
//! Pixel `(x, y)` covers the square `[x, x + 1) x [y, y + 1)`. A continuous
//! coordinate is sampled by taking the pixel that contains it, so the pixel
//! center `(x + 0.5, y + 0.5)` always maps back to `(x, y)`.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod image;
pub mod pattern;
pub mod tile;

pub use error::{Error, Result};
pub use image::{Rgba, RgbaImage, TRANSPARENT};
pub use tile::TileMode;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::image::{Rgba, RgbaImage, TRANSPARENT};
    pub use crate::tile::TileMode;
}

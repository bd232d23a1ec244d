//! # rfx-ops
//!
//! CPU reference renderer for RFX filter graphs.
//!
//! [`Renderer`] walks a [`rfx_graph::FilterGraph`] and evaluates each node on
//! an [`rfx_core::RgbaImage`]. Output extent always equals input extent.
//!
//! # Modules
//!
//! - [`render`] - Graph evaluation, [`RenderConfig`]
//! - [`blur`] - Separable Gaussian blur
//! - [`color`] - Color matrices and constant-color blends
//! - [`offset`] - Translation
//! - [`kernel`] - Native counterparts of the built-in fragment programs
//! - [`shade`] - Per-pixel kernel execution
//!
//! # Example
//!
//! ```rust
//! use rfx_core::pattern::Pattern;
//! use rfx_graph::{resolve, EffectId};
//! use rfx_ops::Renderer;
//!
//! let src = Pattern::Gradient.render(32, 32).unwrap();
//! let out = Renderer::default().render(&resolve(EffectId::Invert), &src).unwrap();
//! assert_eq!(out.dimensions(), (32, 32));
//! ```
//!
//! When the `parallel` feature is enabled (default), rows are processed on
//! the rayon pool. Serial and parallel results are identical.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod exec;
pub mod blur;
pub mod color;
pub mod kernel;
pub mod offset;
pub mod render;
pub mod shade;

pub use error::{OpsError, OpsResult};
pub use kernel::{FragmentKernel, ImageSampler, ProbeSampler, Sampler};
pub use render::{RenderConfig, Renderer};

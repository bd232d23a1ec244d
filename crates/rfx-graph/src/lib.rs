//! # rfx-graph
//!
//! Effect catalog for image post-processing.
//!
//! The catalog is a pure mapping from an [`EffectId`] to a [`FilterGraph`]:
//! a tree of [`FilterNode`]s, each either a built-in primitive (blur, color
//! matrix, constant-color blend, spatial offset), a runtime fragment program
//! with named uniforms, or a [`FilterNode::Chain`] of two nodes.
//!
//! Graphs carry no GPU objects. A renderer (see `rfx-ops`) or a host
//! compositor translates them into whatever its backend needs.
//!
//! # Modules
//!
//! - [`catalog`] - `resolve`, `resolve_name`, capability gating, [`EffectCatalog`]
//! - [`effects`] - Validated constructors for every node the catalog uses
//! - [`node`] - [`FilterNode`], [`FilterGraph`], [`BlendMode`]
//! - [`color_matrix`] - 4x5 [`ColorMatrix`]
//! - [`shader`] - [`RuntimeShader`], [`ProgramKind`]
//! - [`programs`] - Fragment program sources
//! - [`uniform`] - Uniform values
//!
//! # Example
//!
//! ```rust
//! use rfx_graph::{resolve, EffectId, FilterNode};
//!
//! let graph = resolve(EffectId::Blur);
//! match graph.root() {
//!     Some(FilterNode::Blur { radius_x, .. }) => assert_eq!(*radius_x, 25.0),
//!     other => panic!("unexpected node {other:?}"),
//! }
//! assert!(resolve(EffectId::None).is_identity());
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod catalog;
pub mod color_matrix;
pub mod effect;
pub mod effects;
pub mod node;
pub mod programs;
pub mod shader;
pub mod uniform;

pub use catalog::{resolve, resolve_name, resolve_with, Capabilities, EffectCatalog};
pub use color_matrix::ColorMatrix;
pub use effect::EffectId;
pub use error::{GraphError, GraphResult};
pub use node::{BlendMode, FilterGraph, FilterNode};
pub use shader::{ProgramKind, RuntimeShader};
pub use uniform::{UniformValue, Uniforms};

//! Filter graph evaluation.
//!
//! [`Renderer`] walks the node tree recursively. A `Chain` evaluates its
//! `inner` node on the input and feeds the result to `outer`; leaves
//! dispatch to [`crate::blur`], [`crate::color`], [`crate::offset`] and
//! [`crate::shade`].

use crate::{blur, color, kernel, offset, shade, OpsResult};
use rfx_core::{RgbaImage, TileMode};
use rfx_graph::{FilterGraph, FilterNode};
use tracing::{debug, trace, warn};

/// Renderer settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    /// Edge mode for shader `content` reads and offset uncovered pixels.
    pub sample_mode: TileMode,
    /// When false, shader nodes pass their input through unchanged.
    pub runtime_shaders: bool,
    /// Row-parallel processing. Ignored without the `parallel` feature.
    pub parallel: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            sample_mode: TileMode::Clamp,
            runtime_shaders: true,
            parallel: true,
        }
    }
}

/// CPU renderer for filter graphs.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    /// Creates a renderer with `config`.
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Active settings.
    #[inline]
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Applies `graph` to `src`. The output has the same extent as `src`.
    ///
    /// # Errors
    ///
    /// Fails on invalid node parameters or a custom shader source.
    pub fn render(&self, graph: &FilterGraph, src: &RgbaImage) -> OpsResult<RgbaImage> {
        match graph.root() {
            None => {
                trace!("identity graph");
                Ok(src.clone())
            }
            Some(root) => {
                debug!(nodes = graph.node_count(), w = src.width, h = src.height, "render");
                self.evaluate(root, src)
            }
        }
    }

    /// Applies a single node (and its children) to `src`.
    pub fn evaluate(&self, node: &FilterNode, src: &RgbaImage) -> OpsResult<RgbaImage> {
        let cfg = &self.config;
        match node {
            FilterNode::Blur { radius_x, radius_y, edge_mode } => {
                blur::gaussian_blur(src, *radius_x, *radius_y, *edge_mode, cfg.parallel)
            }
            FilterNode::ColorMatrix(m) => Ok(color::apply_matrix(src, m, cfg.parallel)),
            FilterNode::BlendColor { color: tint, mode } => {
                Ok(color::blend_color(src, *tint, *mode, cfg.parallel))
            }
            FilterNode::Offset { dx, dy } => {
                offset::translate(src, *dx, *dy, cfg.sample_mode, cfg.parallel)
            }
            FilterNode::Shader(shader) => {
                if !cfg.runtime_shaders {
                    warn!(
                        program = shader.kind().name(),
                        "runtime shaders disabled, passing through"
                    );
                    return Ok(src.clone());
                }
                let k = kernel::compile(shader)?;
                shade::run_kernel(src, k.as_ref(), cfg.sample_mode, cfg.parallel)
            }
            FilterNode::Chain { outer, inner } => {
                let mid = self.evaluate(inner, src)?;
                self.evaluate(outer, &mid)
            }
        }
    }
}

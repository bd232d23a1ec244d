//! Filter nodes and graphs.
//!
//! A [`FilterNode`] is one stage of an image-processing graph. Stages are
//! composed with [`FilterNode::Chain`]: `inner` runs on the source image and
//! `outer` runs on the result, in the same coordinate space.
//!
//! ```text
//! Chain { outer: tint, inner: blur }
//!
//!   source --> blur --> tint --> output
//! ```

use crate::{ColorMatrix, RuntimeShader};
use rfx_core::{Rgba, TileMode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Porter-Duff mode for [`FilterNode::BlendColor`].
///
/// The constant color is the source, the image pixel is the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    /// Source over destination.
    #[default]
    SrcOver,
    /// Source where destination is opaque, destination elsewhere.
    SrcAtop,
    /// Source masked by destination alpha.
    SrcIn,
    /// Channel product.
    Multiply,
    /// Inverse product of inverses.
    Screen,
}

/// One stage of a filter graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FilterNode {
    /// Gaussian blur. Radii are in pixels.
    Blur {
        /// Horizontal radius.
        radius_x: f32,
        /// Vertical radius.
        radius_y: f32,
        /// How taps outside the image are resolved.
        edge_mode: TileMode,
    },
    /// 4x5 color matrix in 0..255 channel space.
    ColorMatrix(ColorMatrix),
    /// Constant color blended onto every pixel.
    BlendColor {
        /// Straight-alpha RGBA, channels in `0..=1`.
        color: Rgba,
        /// Blend mode.
        mode: BlendMode,
    },
    /// Translation: output at `p` shows input at `p - (dx, dy)`.
    Offset {
        /// Horizontal shift in pixels.
        dx: f32,
        /// Vertical shift in pixels.
        dy: f32,
    },
    /// Per-pixel fragment program.
    Shader(RuntimeShader),
    /// `inner` first, then `outer`.
    Chain {
        /// Applied second.
        outer: Arc<FilterNode>,
        /// Applied first.
        inner: Arc<FilterNode>,
    },
}

impl FilterNode {
    /// Composes two nodes: `inner` runs first.
    pub fn chain(outer: FilterNode, inner: FilterNode) -> FilterNode {
        FilterNode::Chain {
            outer: Arc::new(outer),
            inner: Arc::new(inner),
        }
    }

    /// Runs `self`, then `next`.
    ///
    /// ```rust
    /// use rfx_graph::{ColorMatrix, FilterNode};
    ///
    /// let blur = FilterNode::Offset { dx: 1.0, dy: 0.0 };
    /// let gray = FilterNode::ColorMatrix(ColorMatrix::saturation(0.0));
    /// let node = blur.clone().then(gray.clone());
    /// assert_eq!(node.stages(), vec![&blur, &gray]);
    /// ```
    pub fn then(self, next: FilterNode) -> FilterNode {
        FilterNode::chain(next, self)
    }

    /// Short lowercase label of the variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Blur { .. } => "blur",
            Self::ColorMatrix(_) => "color_matrix",
            Self::BlendColor { .. } => "blend_color",
            Self::Offset { .. } => "offset",
            Self::Shader(_) => "shader",
            Self::Chain { .. } => "chain",
        }
    }

    /// Leaf nodes in evaluation order.
    pub fn stages(&self) -> Vec<&FilterNode> {
        let mut out = Vec::new();
        self.collect_stages(&mut out);
        out
    }

    fn collect_stages<'a>(&'a self, out: &mut Vec<&'a FilterNode>) {
        match self {
            Self::Chain { outer, inner } => {
                inner.collect_stages(out);
                outer.collect_stages(out);
            }
            leaf => out.push(leaf),
        }
    }

    /// Total number of nodes, chains included.
    pub fn node_count(&self) -> usize {
        match self {
            Self::Chain { outer, inner } => 1 + outer.node_count() + inner.node_count(),
            _ => 1,
        }
    }

    /// Longest path from this node to a leaf, counting nodes.
    pub fn depth(&self) -> usize {
        match self {
            Self::Chain { outer, inner } => 1 + outer.depth().max(inner.depth()),
            _ => 1,
        }
    }

    /// True if any stage is a runtime shader.
    pub fn uses_runtime_shader(&self) -> bool {
        self.stages().iter().any(|n| matches!(n, Self::Shader(_)))
    }

    fn write_tree(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        let pad = "  ".repeat(indent);
        match self {
            Self::Blur {
                radius_x,
                radius_y,
                edge_mode,
            } => writeln!(f, "{pad}blur rx={radius_x} ry={radius_y} edge={edge_mode}"),
            Self::ColorMatrix(m) => {
                writeln!(f, "{pad}color_matrix")?;
                for r in 0..4 {
                    let row = m.row(r);
                    writeln!(
                        f,
                        "{pad}  [{:>7.3} {:>7.3} {:>7.3} {:>7.3} {:>7.1}]",
                        row[0], row[1], row[2], row[3], row[4]
                    )?;
                }
                Ok(())
            }
            Self::BlendColor { color, mode } => {
                writeln!(f, "{pad}blend_color mode={mode:?} color={color:?}")
            }
            Self::Offset { dx, dy } => writeln!(f, "{pad}offset dx={dx} dy={dy}"),
            Self::Shader(s) => {
                writeln!(f, "{pad}shader {} input={}", s.kind().name(), s.input())?;
                for (name, value) in s.uniforms().iter() {
                    writeln!(f, "{pad}  {name}: {:?}", value.as_slice())?;
                }
                Ok(())
            }
            Self::Chain { outer, inner } => {
                writeln!(f, "{pad}chain")?;
                writeln!(f, "{pad}  inner:")?;
                inner.write_tree(f, indent + 2)?;
                writeln!(f, "{pad}  outer:")?;
                outer.write_tree(f, indent + 2)
            }
        }
    }
}

impl fmt::Display for FilterNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_tree(f, 0)
    }
}

/// Root of a filter graph; empty means identity.
///
/// Cloning shares the node tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterGraph {
    root: Option<Arc<FilterNode>>,
}

impl FilterGraph {
    /// The no-op graph.
    pub const fn identity() -> Self {
        Self { root: None }
    }

    /// Wraps a root node.
    pub fn new(root: FilterNode) -> Self {
        Self {
            root: Some(Arc::new(root)),
        }
    }

    /// True for the no-op graph.
    #[inline]
    pub fn is_identity(&self) -> bool {
        self.root.is_none()
    }

    /// Root node, if any.
    #[inline]
    pub fn root(&self) -> Option<&FilterNode> {
        self.root.as_deref()
    }

    /// Leaf nodes in evaluation order; empty for identity.
    pub fn stages(&self) -> Vec<&FilterNode> {
        self.root().map(FilterNode::stages).unwrap_or_default()
    }

    /// Number of nodes; zero for identity.
    pub fn node_count(&self) -> usize {
        self.root().map_or(0, FilterNode::node_count)
    }

    /// True if any stage is a runtime shader.
    pub fn uses_runtime_shader(&self) -> bool {
        self.root().is_some_and(FilterNode::uses_runtime_shader)
    }
}

impl From<FilterNode> for FilterGraph {
    fn from(node: FilterNode) -> Self {
        Self::new(node)
    }
}

impl fmt::Display for FilterGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.root() {
            Some(node) => fmt::Display::fmt(node, f),
            None => writeln!(f, "identity"),
        }
    }
}

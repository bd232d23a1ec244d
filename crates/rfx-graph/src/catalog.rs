//! The effect catalog.
//!
//! [`resolve`] maps an [`EffectId`] to its [`FilterGraph`]. It never fails:
//! `None` is the identity graph, and a graph is either fully built or the
//! identity is returned in its place.
//!
//! | Effect | Graph |
//! |---|---|
//! | Blur | blur 25 x 25, clamp |
//! | Grayscale | saturation 0 |
//! | Invert | `-1` diagonal, `+255` bias on RGB |
//! | Sepia | sepia matrix |
//! | Offset | offset 40, 40 |
//! | Pixelate | shader, `pixelSize` 12 |
//! | Chromatic Aberration | shader, `offset` 5 |
//! | Wave Distortion | shader, amplitude 1, frequency 8, resolution 500 x 500 |
//! | Swirl Distortion | shader, center (125, 125), strength 1.5 |

use crate::{effects, BlendMode, EffectId, FilterGraph, FilterNode, GraphResult};
use crate::effect::normalize_name;
use glam::Vec2;
use rfx_core::TileMode;
use tracing::{debug, trace, warn};

/// Blur radius, both axes.
pub const BLUR_RADIUS: f32 = 25.0;
/// Offset distance, both axes.
pub const OFFSET_DISTANCE: f32 = 40.0;
/// Pixelate block size.
pub const PIXEL_SIZE: f32 = 12.0;
/// Chromatic aberration channel offset.
pub const ABERRATION_OFFSET: f32 = 5.0;
/// Wave amplitude.
pub const WAVE_AMPLITUDE: f32 = 1.0;
/// Wave frequency.
pub const WAVE_FREQUENCY: f32 = 8.0;
/// Wave normalization resolution.
pub const WAVE_RESOLUTION: Vec2 = Vec2::new(500.0, 500.0);
/// Swirl center.
pub const SWIRL_CENTER: Vec2 = Vec2::new(125.0, 125.0);
/// Swirl strength.
pub const SWIRL_STRENGTH: f32 = 1.5;

/// Name of the chained blur-and-tint preset accepted by [`resolve_name`].
pub const CHAIN_PRESET_NAME: &str = "Chain (Blur + Red Tint)";
/// Blur radius of the chained preset.
pub const CHAIN_BLUR_RADIUS: f32 = 20.0;
/// Tint color of the chained preset.
pub const CHAIN_TINT: [f32; 4] = [1.0, 0.0, 0.0, 1.0];

/// What the host renderer can execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// Host can run runtime fragment programs.
    pub runtime_shaders: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::FULL
    }
}

impl Capabilities {
    /// Everything supported.
    pub const FULL: Self = Self {
        runtime_shaders: true,
    };

    /// Built-in primitives only.
    pub const PRIMITIVES_ONLY: Self = Self {
        runtime_shaders: false,
    };
}

/// Graph for `id`; identity for [`EffectId::None`].
///
/// # Example
///
/// ```rust
/// use rfx_graph::{resolve, EffectId};
///
/// assert_eq!(resolve(EffectId::Sepia), resolve(EffectId::Sepia));
/// assert!(!resolve(EffectId::SwirlDistortion).is_identity());
/// ```
pub fn resolve(id: EffectId) -> FilterGraph {
    match build(id) {
        Ok(Some(node)) => {
            trace!(effect = %id, kind = node.kind(), "resolved effect");
            FilterGraph::new(node)
        }
        Ok(None) => FilterGraph::identity(),
        Err(err) => {
            warn!(effect = %id, %err, "effect construction failed, using identity");
            FilterGraph::identity()
        }
    }
}

/// Like [`resolve`], but shader-backed effects become identity when the
/// host lacks runtime shader support.
pub fn resolve_with(id: EffectId, caps: Capabilities) -> FilterGraph {
    if id.requires_runtime_shader() && !caps.runtime_shaders {
        debug!(effect = %id, "runtime shaders unavailable, using identity");
        return FilterGraph::identity();
    }
    resolve(id)
}

/// Graph for an effect name; identity for unrecognized names.
///
/// Accepts the display names of [`EffectId`] (case-insensitive) and
/// [`CHAIN_PRESET_NAME`].
pub fn resolve_name(name: &str) -> FilterGraph {
    if normalize_name(name.trim()) == normalize_name(CHAIN_PRESET_NAME) {
        return match blur_with_tint() {
            Ok(node) => FilterGraph::new(node),
            Err(err) => {
                warn!(%err, "preset construction failed, using identity");
                FilterGraph::identity()
            }
        };
    }
    match name.parse::<EffectId>() {
        Ok(id) => resolve(id),
        Err(_) => {
            debug!(effect = name, "unknown effect name, using identity");
            FilterGraph::identity()
        }
    }
}

/// Blur, then a red `SrcAtop` tint.
pub fn blur_with_tint() -> GraphResult<FilterNode> {
    let blur = effects::blur(CHAIN_BLUR_RADIUS, CHAIN_BLUR_RADIUS, TileMode::Clamp)?;
    let tint = effects::tint(CHAIN_TINT, BlendMode::SrcAtop)?;
    Ok(blur.then(tint))
}

fn build(id: EffectId) -> GraphResult<Option<FilterNode>> {
    let node = match id {
        EffectId::None => return Ok(None),
        EffectId::Blur => effects::blur(BLUR_RADIUS, BLUR_RADIUS, TileMode::Clamp)?,
        EffectId::Grayscale => effects::saturation(0.0)?,
        EffectId::Invert => effects::invert(),
        EffectId::Sepia => effects::sepia(),
        EffectId::Offset => effects::offset(OFFSET_DISTANCE, OFFSET_DISTANCE)?,
        EffectId::Pixelate => effects::pixelate(PIXEL_SIZE)?,
        EffectId::ChromaticAberration => effects::chromatic_aberration(ABERRATION_OFFSET)?,
        EffectId::WaveDistortion => {
            effects::wave(WAVE_AMPLITUDE, WAVE_FREQUENCY, WAVE_RESOLUTION)?
        }
        EffectId::SwirlDistortion => effects::swirl(SWIRL_CENTER, SWIRL_STRENGTH)?,
    };
    Ok(Some(node))
}

/// Every catalog graph, built once.
///
/// # Example
///
/// ```rust
/// use rfx_graph::{resolve, EffectCatalog, EffectId};
///
/// let catalog = EffectCatalog::new();
/// assert_eq!(catalog.get(EffectId::Invert), &resolve(EffectId::Invert));
/// ```
#[derive(Debug, Clone)]
pub struct EffectCatalog {
    graphs: Vec<FilterGraph>,
    caps: Capabilities,
}

impl Default for EffectCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl EffectCatalog {
    /// Catalog with full capabilities.
    pub fn new() -> Self {
        Self::with_capabilities(Capabilities::FULL)
    }

    /// Catalog gated by `caps`.
    pub fn with_capabilities(caps: Capabilities) -> Self {
        let graphs = EffectId::ALL
            .iter()
            .map(|&id| resolve_with(id, caps))
            .collect();
        debug!(?caps, "built effect catalog");
        Self { graphs, caps }
    }

    /// Cached graph for `id`.
    #[inline]
    pub fn get(&self, id: EffectId) -> &FilterGraph {
        &self.graphs[id.index()]
    }

    /// Cached graph for a name; identity if unrecognized.
    pub fn get_by_name(&self, name: &str) -> FilterGraph {
        match name.parse::<EffectId>() {
            Ok(id) => self.get(id).clone(),
            Err(_) => resolve_name(name),
        }
    }

    /// Capabilities the catalog was built with.
    pub fn capabilities(&self) -> Capabilities {
        self.caps
    }

    /// `(id, graph)` pairs in presentation order.
    pub fn iter(&self) -> impl Iterator<Item = (EffectId, &FilterGraph)> {
        EffectId::ALL.into_iter().zip(self.graphs.iter())
    }
}

//! CLI command implementations

pub mod list;
pub mod preview;
pub mod probe;
pub mod show;

use rfx_graph::{resolve_name, EffectId, FilterGraph};
use tracing::warn;

/// Resolves a user-supplied effect name, warning when it falls back to identity.
pub fn lookup(name: &str) -> FilterGraph {
    let graph = resolve_name(name);
    if graph.is_identity() && name.parse::<EffectId>() != Ok(EffectId::None) {
        warn!(effect = name, "unknown effect, using identity");
    }
    graph
}

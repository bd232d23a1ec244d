//! List command
//!
//! One line per catalog entry.

use anyhow::Result;
use rfx_graph::EffectCatalog;
use tracing::trace;

pub fn run(verbose: u8) -> Result<()> {
    trace!("list::run");
    let catalog = EffectCatalog::new();

    println!("{:<22} {:<10} {:<14} {}", "EFFECT", "LABEL", "NODE", "SHADER");
    for (id, graph) in catalog.iter() {
        let kind = graph.root().map_or("identity", |n| n.kind());
        let shader = if id.requires_runtime_shader() { "yes" } else { "no" };
        println!("{:<22} {:<10} {:<14} {}", id.name(), id.short_label(), kind, shader);
        if verbose > 0 && !graph.is_identity() {
            println!("    {} node(s)", graph.node_count());
        }
    }
    println!(
        "{:<22} {:<10} {:<14} {}",
        rfx_graph::catalog::CHAIN_PRESET_NAME,
        "Chain",
        "chain",
        "no"
    );
    Ok(())
}

//! Show command
//!
//! Prints a resolved graph as a tree, YAML or JSON.

use crate::{GraphFormat, ShowArgs};
use anyhow::{Context, Result};
use tracing::trace;

pub fn run(args: ShowArgs, verbose: u8) -> Result<()> {
    trace!(effect = %args.effect, format = ?args.format, "show::run");
    let graph = super::lookup(&args.effect);

    if verbose > 0 {
        eprintln!(
            "{}: {} node(s), runtime shader: {}",
            args.effect,
            graph.node_count(),
            graph.uses_runtime_shader()
        );
    }

    match args.format {
        GraphFormat::Tree => print!("{graph}"),
        GraphFormat::Yaml => {
            let text = serde_yaml::to_string(&graph).context("Failed to encode YAML")?;
            print!("{text}");
        }
        GraphFormat::Json => {
            let text = serde_json::to_string_pretty(&graph).context("Failed to encode JSON")?;
            println!("{text}");
        }
    }
    Ok(())
}

//! Probe command
//!
//! Runs each shader stage of a graph against a recording sampler and prints
//! the coordinates it reads for one destination coordinate.

use crate::ProbeArgs;
use anyhow::{Context, Result};
use glam::Vec2;
use rfx_graph::FilterNode;
use rfx_ops::kernel::compile;
use rfx_ops::ProbeSampler;
use tracing::{debug, trace};

/// Color every probe tap answers with.
const PROBE_COLOR: [f32; 4] = [0.5, 0.5, 0.5, 1.0];

pub fn run(args: ProbeArgs, verbose: u8) -> Result<()> {
    trace!(effect = %args.effect, x = args.x, y = args.y, "probe::run");
    let graph = super::lookup(&args.effect);
    let coord = Vec2::new(args.x, args.y);

    let mut found = false;
    for stage in graph.stages() {
        let FilterNode::Shader(shader) = stage else {
            debug!(kind = stage.kind(), "skipping non-shader stage");
            continue;
        };
        found = true;

        let kernel = compile(shader)
            .with_context(|| format!("Failed to compile {} program", shader.kind().name()))?;
        let probe = ProbeSampler::new(PROBE_COLOR);
        let out = kernel.shade(coord, &probe);

        println!("{} at ({}, {}):", kernel.name(), args.x, args.y);
        for tap in probe.taps() {
            println!("  content.eval({}, {})", tap.x, tap.y);
        }
        if verbose > 0 {
            for (name, value) in shader.uniforms().iter() {
                println!("  uniform {name} = {:?}", value.as_slice());
            }
            println!("  -> {out:?}");
        }
    }

    if !found {
        println!("{} has no runtime shader stage", args.effect);
    }
    Ok(())
}

//! Preview command
//!
//! Renders a procedural pattern through an effect and prints per-channel
//! statistics of the result.

use crate::{PatternArg, PreviewArgs};
use anyhow::{Context, Result};
use rfx_core::pattern::Pattern;
use rfx_core::RgbaImage;
use rfx_ops::{RenderConfig, Renderer};
use std::time::Instant;
use tracing::{info, trace};

const CHANNEL_NAMES: [&str; 4] = ["R", "G", "B", "A"];

pub fn run(args: PreviewArgs, verbose: u8) -> Result<()> {
    trace!(effect = %args.effect, w = args.width, h = args.height, "preview::run");

    let pattern = match args.pattern {
        PatternArg::Checker => Pattern::CHECKER,
        PatternArg::Gradient => Pattern::Gradient,
        PatternArg::Solid => Pattern::Solid([0.5, 0.5, 0.5, 1.0]),
    };
    let src = pattern
        .render(args.width, args.height)
        .context("Failed to build input pattern")?;

    let graph = super::lookup(&args.effect);
    let renderer = Renderer::new(RenderConfig {
        runtime_shaders: !args.no_shaders,
        ..Default::default()
    });

    info!(effect = %args.effect, nodes = graph.node_count(), "Rendering preview");
    if verbose > 0 {
        print!("{graph}");
    }

    let start = Instant::now();
    let out = renderer
        .render(&graph, &src)
        .with_context(|| format!("Failed to render {}", args.effect))?;
    let elapsed = start.elapsed();

    println!("{} on {:?} {}x{}", args.effect, args.pattern, out.width, out.height);
    for (c, s) in channel_stats(&out).iter().enumerate() {
        println!(
            "  {}: min {:.4}  mean {:.4}  max {:.4}",
            CHANNEL_NAMES[c], s.min, s.mean, s.max
        );
    }
    if let Some(diff) = out.max_abs_diff(&src) {
        println!("  max change vs input: {diff:.4}");
    }
    println!("  elapsed: {:.2} ms", elapsed.as_secs_f64() * 1000.0);
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ChannelStats {
    min: f32,
    mean: f32,
    max: f32,
}

fn channel_stats(img: &RgbaImage) -> [ChannelStats; 4] {
    let mut min = [f32::INFINITY; 4];
    let mut max = [f32::NEG_INFINITY; 4];
    let mut sum = [0.0f64; 4];
    for px in img.pixels() {
        for c in 0..4 {
            min[c] = min[c].min(px[c]);
            max[c] = max[c].max(px[c]);
            sum[c] += px[c] as f64;
        }
    }
    let n = img.pixel_count().max(1) as f64;
    std::array::from_fn(|c| ChannelStats {
        min: min[c],
        mean: (sum[c] / n) as f32,
        max: max[c],
    })
}

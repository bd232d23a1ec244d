//! rfx - inspect and preview effect graphs
//!
//! Lists the effect catalog, prints resolved graphs, probes shader sample
//! coordinates and renders procedural test images through the CPU renderer.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};

mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "rfx")]
#[command(author, version, about = "Inspect and preview RFX effect graphs")]
#[command(long_about = "
Resolves named effects to filter graphs and evaluates them on the CPU.

Examples:
  rfx list                              # All effects
  rfx show blur                         # Graph as a tree
  rfx show \"Chain (Blur + Red Tint)\" --format yaml
  rfx probe pixelate 17 5               # Where content is sampled
  rfx preview swirl -W 256 -H 256 --pattern checker
  RFX_LOG=debug rfx preview blur        # Renderer logs
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// List every effect in the catalog
    #[command(visible_alias = "ls")]
    List,

    /// Print the filter graph an effect resolves to
    Show(ShowArgs),

    /// Print where a shader effect samples its input
    Probe(ProbeArgs),

    /// Render a test pattern and report channel statistics
    #[command(visible_alias = "p")]
    Preview(PreviewArgs),
}

/// Output format for `show`.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum GraphFormat {
    /// Indented node tree
    #[default]
    Tree,
    /// YAML
    Yaml,
    /// JSON
    Json,
}

/// Procedural input for `preview`.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum PatternArg {
    /// 8px black/white checkerboard
    #[default]
    Checker,
    /// Red along x, green along y
    Gradient,
    /// Uniform mid grey
    Solid,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Effect name or id (e.g. "blur", "Chromatic Aberration")
    effect: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = GraphFormat::Tree)]
    format: GraphFormat,
}

#[derive(Args)]
pub struct ProbeArgs {
    /// Effect name or id
    effect: String,

    /// Destination x in pixels
    #[arg(allow_negative_numbers = true)]
    x: f32,

    /// Destination y in pixels
    #[arg(allow_negative_numbers = true)]
    y: f32,
}

#[derive(Args)]
pub struct PreviewArgs {
    /// Effect name or id
    effect: String,

    /// Image width
    #[arg(short = 'W', long, default_value = "256")]
    width: u32,

    /// Image height
    #[arg(short = 'H', long, default_value = "256")]
    height: u32,

    /// Input pattern
    #[arg(short, long, value_enum, default_value_t = PatternArg::Checker)]
    pattern: PatternArg,

    /// Pass runtime shader nodes through unchanged
    #[arg(long)]
    no_shaders: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose).context("Failed to initialize logging")?;

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::List => commands::list::run(cli.verbose),
        Commands::Show(args) => commands::show::run(args, cli.verbose),
        Commands::Probe(args) => commands::probe::run(args, cli.verbose),
        Commands::Preview(args) => commands::preview::run(args, cli.verbose),
    }
}

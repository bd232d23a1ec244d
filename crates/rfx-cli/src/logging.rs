//! Log subscriber setup.
//!
//! `RFX_LOG` (then `RUST_LOG`) sets the filter, falling back to a level
//! derived from `-v`. `RFX_LOG_FORMAT=json` switches to JSON lines. Logs go
//! to stderr so command output stays pipeable.

use anyhow::Result;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

fn default_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Installs the global subscriber.
pub fn init(verbose: u8) -> Result<()> {
    let env_filter = EnvFilter::try_from_env("RFX_LOG")
        .or_else(|_| EnvFilter::try_from_env("RUST_LOG"))
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbose)));

    let use_json = std::env::var("RFX_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(env_filter);
    if use_json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?;
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init()?;
    }
    Ok(())
}

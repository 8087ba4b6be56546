//! Tracing setup for the `scribe` binary.
//!
//! `scribe-core` and `scribe-adapters` emit events for each pipeline stage
//! (extract, scaffold pass, materialize). This module decides which of them
//! reach stderr:
//!
//! | Flag(s)   | Level | Typical output                          |
//! |-----------|-------|-----------------------------------------|
//! | `--quiet` | error | configuration and internal errors       |
//! | (none)    | warn  | unknown scaffold fallback, skipped dirs |
//! | `-v`      | info  | one summary line per run                |
//! | `-vv`     | debug | every stage, written and skipped path   |
//! | `-vvv`    | trace | debug plus any trace events             |
//!
//! A set `RUST_LOG` replaces the table entirely.

use std::io::IsTerminal as _;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::GlobalArgs;

const CRATES: [&str; 3] = ["scribe", "scribe_core", "scribe_adapters"];

/// Install the stderr subscriber. Call once, before the first command runs.
pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directives(level_for(args))));

    // stdout carries manifests and listings; logs stay on stderr.
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_ansi(!args.no_color && std::io::stderr().is_terminal())
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialise tracing: {e}"))
}

fn level_for(args: &GlobalArgs) -> &'static str {
    match (args.quiet, args.verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    }
}

/// One `crate=level` directive per workspace crate.
fn directives(level: &str) -> String {
    CRATES
        .iter()
        .map(|krate| format!("{krate}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

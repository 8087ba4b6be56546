//! Flags accepted before or after any subcommand.
//!
//! Marked `global = true`, so `scribe generate -vv` and `scribe -vv generate`
//! mean the same thing.

use std::path::PathBuf;

use clap::Args;
use clap::builder::FalseyValueParser;

#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// Log pipeline stages to stderr.
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Show pipeline logs (-v, -vv, -vvv)",
        long_help = "Show pipeline logs on stderr:
    (none)  - Warnings, e.g. an unknown scaffold name
    -v      - One summary line per run
    -vv     - Every stage, every written or skipped file
    -vvv    - Trace level"
    )]
    pub verbose: u8,

    /// Only errors reach the terminal. JSON results are still printed.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Print errors and machine output only"
    )]
    pub quiet: bool,

    /// Any non-falsey `NO_COLOR` (e.g. `1`) turns this on; `0`, `false` and
    /// an empty value leave colour alone.
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        value_parser = FalseyValueParser::new(),
        help = "Disable colored output"
    )]
    pub no_color: bool,

    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        help = "Read settings from FILE instead of the global and local files"
    )]
    pub config: Option<PathBuf>,

    #[arg(
        long = "output-format",
        global = true,
        value_enum,
        default_value = "auto",
        help = "How results are printed"
    )]
    pub output_format: OutputFormat,
}

/// Result rendering on stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// `human` on a terminal, `plain` when piped.
    #[default]
    Auto,
    /// Colored, with symbols.
    Human,
    /// No color, no symbols.
    Plain,
    /// Manifests and listings as JSON.
    Json,
}

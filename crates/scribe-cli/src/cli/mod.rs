//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums. No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use scribe_core::domain::WritePolicy;

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name     = "scribe",
    bin_name = "scribe",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Turn model responses into project trees",
    long_about = "Scribe extracts fenced code blocks from a model response and \
                  writes them as files under a fresh project directory, \
                  optionally on top of a starter scaffold.",
    after_help = "EXAMPLES:\n\
        \x20 scribe generate --input response.md --scaffold flask --var project_name=shop\n\
        \x20 cat response.md | scribe extract --format json\n\
        \x20 scribe scaffold fastapi ./api --policy skip\n\
        \x20 scribe list --presets",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Write the files described by a recorded model response.
    #[command(
        visible_alias = "gen",
        about = "Generate a project from a model response",
        after_help = "EXAMPLES:\n\
            \x20 scribe generate --input response.md\n\
            \x20 scribe generate -i response.md -o ./out --scaffold python\n\
            \x20 scribe generate -i response.md --preset rest-api --output-format json"
    )]
    Generate(GenerateArgs),

    /// Show which files a response would produce, without writing anything.
    #[command(
        about = "Preview the files in a model response",
        after_help = "EXAMPLES:\n\
            \x20 scribe extract --input response.md\n\
            \x20 cat response.md | scribe extract --format list"
    )]
    Extract(ExtractArgs),

    /// Materialize a single scaffold.
    #[command(
        about = "Write a starter scaffold into a directory",
        after_help = "EXAMPLES:\n\
            \x20 scribe scaffold flask ./shop --name shop\n\
            \x20 scribe scaffold python . --policy skip"
    )]
    Scaffold(ScaffoldArgs),

    /// List scaffolds, prompt presets or known models.
    #[command(
        visible_alias = "ls",
        about = "List scaffolds, presets or models",
        after_help = "EXAMPLES:\n\
            \x20 scribe list\n\
            \x20 scribe list --presets\n\
            \x20 scribe list --format json"
    )]
    List(ListArgs),

    /// Print the prompt that would be sent to a model.
    #[command(
        about = "Show the composed system and user prompt",
        after_help = "EXAMPLES:\n\
            \x20 scribe prompt \"a todo api\" --scaffold fastapi\n\
            \x20 scribe prompt --preset auth-system"
    )]
    Prompt(PromptArgs),

    /// Initialise a Scribe configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 scribe init           # global config\n\
            \x20 scribe init --local   # .scribe.toml in the current directory"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 scribe completions bash > ~/.local/share/bash-completion/completions/scribe\n\
            \x20 scribe completions zsh  > ~/.zfunc/_scribe"
    )]
    Completions(CompletionsArgs),

    /// Manage the Scribe configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 scribe config get generation.model\n\
            \x20 scribe config set defaults.scaffold flask\n\
            \x20 scribe config list"
    )]
    Config(ConfigCommands),
}

// ── shared ────────────────────────────────────────────────────────────────────

/// Template variables, shared by the commands that render scaffolds.
#[derive(Debug, Clone, Default, Args)]
pub struct ContextArgs {
    /// Project name; also derives `project_slug` and `package_name`.
    #[arg(short = 'n', long = "name", value_name = "NAME")]
    pub project_name: Option<String>,

    /// Extra template variable, repeatable.
    #[arg(long = "var", value_name = "KEY=VALUE")]
    pub vars: Vec<String>,
}

// ── generate ──────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Recorded model response. Reads stdin when absent or `-`.
    #[arg(short = 'i', long = "input", value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Output directory. Defaults to a fresh `project_<timestamp>_<id>`
    /// directory under the configured output root.
    #[arg(short = 'o', long = "output", value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Scaffold to lay down before the generated files.
    #[arg(short = 's', long = "scaffold", value_name = "NAME")]
    pub scaffold: Option<String>,

    #[command(flatten)]
    pub context: ContextArgs,

    /// Prompt text recorded with the request.
    #[arg(short = 'p', long = "prompt", value_name = "TEXT", conflicts_with = "preset")]
    pub prompt: Option<String>,

    /// Use a prompt preset instead of `--prompt`.
    #[arg(long = "preset", value_name = "ID")]
    pub preset: Option<String>,

    #[arg(long = "model", value_name = "MODEL", help = "Model identifier")]
    pub model: Option<String>,

    #[arg(long = "temperature", value_name = "T", help = "Sampling temperature (0.1-1.0)")]
    pub temperature: Option<f32>,

    #[arg(long = "max-tokens", value_name = "N", help = "Maximum tokens (100-8000)")]
    pub max_tokens: Option<u32>,
}

// ── extract ───────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ExtractArgs {
    /// Model response to scan. Reads stdin when absent or `-`.
    #[arg(short = 'i', long = "input", value_name = "FILE")]
    pub input: Option<PathBuf>,

    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

// ── scaffold ──────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ScaffoldArgs {
    /// Scaffold name, e.g. `python` or `flask`.
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Directory to write into; created if missing.
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,

    #[command(flatten)]
    pub context: ContextArgs,

    /// What to do when a file already exists.
    #[arg(long = "policy", value_enum, default_value = "fail")]
    pub policy: PolicyArg,
}

/// CLI spelling of [`WritePolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    /// Replace existing files.
    Overwrite,
    /// Keep existing files untouched.
    Skip,
    /// Stop at the first existing file.
    Fail,
}

impl From<PolicyArg> for WritePolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Overwrite => WritePolicy::Overwrite,
            PolicyArg::Skip => WritePolicy::SkipExisting,
            PolicyArg::Fail => WritePolicy::FailIfExists,
        }
    }
}

// ── list ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ListArgs {
    /// List prompt presets instead of scaffolds.
    #[arg(long = "presets", conflicts_with = "models")]
    pub presets: bool,

    /// List known model identifiers instead of scaffolds.
    #[arg(long = "models")]
    pub models: bool,

    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` and `extract` commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One name per line.
    List,
    /// JSON array.
    Json,
    /// CSV rows.
    Csv,
}

// ── prompt ────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct PromptArgs {
    /// What to ask for.
    #[arg(value_name = "TEXT", required_unless_present = "preset")]
    pub text: Option<String>,

    #[arg(long = "preset", value_name = "ID", conflicts_with = "text")]
    pub preset: Option<String>,

    #[arg(short = 's', long = "scaffold", value_name = "NAME")]
    pub scaffold: Option<String>,

    #[command(flatten)]
    pub context: ContextArgs,
}

// ── init ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to `.scribe.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: clap_complete::Shell,
}

// ── config subcommands ────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `generation.model`.
        key: String,
    },
    /// Set a configuration key in the active configuration file.
    Set {
        /// Dotted key path.
        key: String,
        /// New value.
        value: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

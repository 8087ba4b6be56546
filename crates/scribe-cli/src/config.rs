//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. `SCRIBE_*` environment variables, `__` between nested keys
//!    (`SCRIBE_GENERATION__MODEL=google/gemini-pro`)
//! 3. Config file: `--config FILE`, or else `.scribe.toml` in the current
//!    directory layered over the platform config file
//! 4. Built-in defaults

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use scribe_core::domain::GenerationParameters;

/// File name used by `scribe init --local`.
pub const LOCAL_CONFIG_FILE: &str = ".scribe.toml";

const ENV_PREFIX: &str = "SCRIBE";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub defaults: Defaults,
    /// Sampling parameters; clamped before they reach a provider.
    pub generation: GenerationParameters,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    /// Scaffold used by `generate` when `--scaffold` is absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scaffold: Option<String>,
    /// Base directory for fresh `project_*` directories.
    pub output_root: PathBuf,
    /// Extra on-disk scaffolds layered over the built-in ones.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scaffolds_dir: Option<PathBuf>,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            scaffold: None,
            output_root: PathBuf::from("generated_projects"),
            scaffolds_dir: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    /// `auto`, `human`, `plain` or `json`; `--output-format` wins.
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

impl AppConfig {
    /// Load configuration, starting from defaults.
    ///
    /// An explicit `config_file` must exist; the implicit locations are
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let defaults =
            Config::try_from(&Self::default()).context("Failed to seed default configuration")?;

        let mut builder = Config::builder().add_source(defaults);

        match config_file {
            Some(path) => {
                builder = builder.add_source(
                    File::from(path.as_path())
                        .format(FileFormat::Toml)
                        .required(true),
                );
            }
            None => {
                for path in [Self::config_path(), PathBuf::from(LOCAL_CONFIG_FILE)] {
                    builder = builder
                        .add_source(File::from(path).format(FileFormat::Toml).required(false));
                }
            }
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        builder
            .build()
            .context("Failed to load configuration")?
            .try_deserialize()
            .context("Configuration has invalid values")
    }

    /// Path to the global configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.scribe.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "scribe", "scribe")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }

    /// The file `config set` edits and `config path` reports.
    pub fn active_path(explicit: Option<&PathBuf>) -> PathBuf {
        if let Some(path) = explicit {
            return path.clone();
        }
        let local = Path::new(LOCAL_CONFIG_FILE);
        if local.is_file() {
            local.to_path_buf()
        } else {
            Self::config_path()
        }
    }
}

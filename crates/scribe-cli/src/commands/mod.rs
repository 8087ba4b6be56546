//! Command handlers plus the wiring they share.

use std::io::{self, Read as _};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, warn};

use scribe_adapters::BuiltinCatalog;
use scribe_core::domain::{GenerationContext, ScaffoldName};

use crate::{
    cli::ContextArgs,
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
};

pub mod completions;
pub mod config;
pub mod extract;
pub mod generate;
pub mod init;
pub mod list;
pub mod prompt;
pub mod scaffold;

/// Built-in scaffolds, plus the configured on-disk ones.
pub(crate) fn build_catalog(config: &AppConfig) -> CliResult<Arc<BuiltinCatalog>> {
    let catalog = BuiltinCatalog::new();
    let catalog = match &config.defaults.scaffolds_dir {
        Some(dir) => catalog
            .extend_from_dir(dir)
            .map_err(|e| CliError::ConfigError {
                message: format!("cannot load scaffolds from '{}'", dir.display()),
                source: Some(Box::new(e)),
            })?,
        None => catalog,
    };
    Ok(Arc::new(catalog))
}

/// Resolve a scaffold name the way the catalog does: unknown names fall
/// back to `default`, which has no tree.
pub(crate) fn resolve_scaffold(name: &str) -> ScaffoldName {
    match name.parse::<ScaffoldName>() {
        Ok(known) => known,
        Err(_) => {
            warn!(scaffold = name, "Unknown scaffold, using the empty default");
            ScaffoldName::Default
        }
    }
}

/// `--name` first, then every `--var` on top of it.
pub(crate) fn build_context(args: &ContextArgs) -> CliResult<GenerationContext> {
    let base = args
        .project_name
        .as_deref()
        .map(GenerationContext::for_project)
        .unwrap_or_default();
    let vars = GenerationContext::from_assignments(&args.vars)
        .map_err(scribe_core::error::ScribeError::from)?;
    Ok(base.merged(&vars))
}

/// Read a whole response from `path`, or stdin when `path` is absent or `-`.
pub(crate) fn read_input(path: Option<&Path>) -> CliResult<String> {
    match path {
        Some(p) if p != Path::new("-") => {
            debug!(input = %p.display(), "Reading response file");
            std::fs::read_to_string(p)
                .with_cli_context(|| format!("cannot read '{}'", p.display()))
        }
        _ => {
            debug!("Reading response from stdin");
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .with_cli_context(|| "cannot read stdin")?;
            Ok(buf)
        }
    }
}

/// Turn an optional `--input` into a concrete file path, if any.
pub(crate) fn input_file(path: Option<&PathBuf>) -> Option<&Path> {
    path.map(PathBuf::as_path).filter(|p| *p != Path::new("-"))
}

//! `scribe scaffold`: materialize one scaffold on its own.

use tracing::{info, instrument};

use scribe_adapters::LocalFilesystem;
use scribe_core::{
    application::GenerationService,
    domain::{ScaffoldName, WritePolicy},
};

use super::{build_catalog, build_context};
use crate::{
    cli::ScaffoldArgs,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all, fields(scaffold = %args.name, dir = %args.dir.display()))]
pub fn execute(args: ScaffoldArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    // Strict here; `generate` falls back to `default` instead.
    let name: ScaffoldName = args
        .name
        .parse()
        .map_err(|_| CliError::UnknownScaffold {
            name: args.name.clone(),
        })?;
    let context = build_context(&args.context)?;
    let policy = WritePolicy::from(args.policy);

    let service = GenerationService::new(build_catalog(&config)?, Box::new(LocalFilesystem::new()));
    let written = service.scaffold(name, &args.dir, &context, policy)?;
    info!(files = written.len(), %policy, "Scaffold written");

    if output.is_json() {
        output.json(&written)?;
        return Ok(());
    }

    if written.is_empty() {
        output.warning(&format!(
            "Scaffold '{name}' wrote no files (unseeded, or every file already existed)"
        ))?;
        return Ok(());
    }

    output.success(&format!(
        "Scaffold '{name}' wrote {} file(s) to {}",
        written.len(),
        args.dir.display()
    ))?;
    for path in &written {
        output.detail(&format!("  {}", path.display()))?;
    }
    Ok(())
}

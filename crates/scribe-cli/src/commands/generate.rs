//! Implementation of the `scribe generate` command.
//!
//! Translates CLI arguments into a [`PromptRequest`], runs it against a
//! replay provider, and renders the manifest. No business logic lives here.

use std::path::Path;

use tracing::{debug, info, instrument};

use scribe_adapters::{LocalFilesystem, ReplayProvider};
use scribe_core::{
    application::{GenerationService, PromptRequest, fresh_project_dir},
    domain::{GenerationManifest, GenerationParameters, find_preset},
};

use super::{build_catalog, build_context, input_file, read_input, resolve_scaffold};
use crate::{
    cli::GenerateArgs,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute `scribe generate`.
///
/// 1. Resolve scaffold, context, prompt and parameters (flags over config)
/// 2. Pick the output root, a fresh `project_*` directory unless `--output`
/// 3. Run the pipeline through [`GenerationService::generate_from_prompt`]
/// 4. Render the manifest; a failed manifest becomes exit code 1
#[instrument(skip_all)]
pub fn execute(args: GenerateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let catalog = build_catalog(&config)?;
    let service = GenerationService::new(catalog, Box::new(LocalFilesystem::new()));

    let scaffold = args
        .scaffold
        .as_deref()
        .or(config.defaults.scaffold.as_deref())
        .map(resolve_scaffold);
    let context = build_context(&args.context)?;
    let prompt = resolve_prompt(args.prompt, args.preset.as_deref())?;
    let parameters = override_parameters(
        config.generation.clone(),
        args.model,
        args.temperature,
        args.max_tokens,
    );

    let root = args
        .output
        .unwrap_or_else(|| fresh_project_dir(&config.defaults.output_root));

    let provider = match input_file(args.input.as_ref()) {
        Some(path) => ReplayProvider::from_file(path),
        None => ReplayProvider::from_text(read_input(None)?),
    };

    debug!(
        root = %root.display(),
        scaffold = scaffold.map(|s| s.as_str()).unwrap_or("none"),
        vars = context.len(),
        "Request resolved"
    );

    let request = PromptRequest::new(prompt, root.clone())
        .with_scaffold(scaffold)
        .with_context(context)
        .with_parameters(parameters);
    let manifest = service.generate_from_prompt(&provider, &request);

    render(&manifest, &root, &output)?;

    if manifest.success {
        info!(files = manifest.file_count, "Generate finished");
        Ok(())
    } else {
        Err(CliError::GenerationFailed {
            message: manifest.error_message.unwrap_or_default(),
            root,
        })
    }
}

/// `--prompt` text, a preset's prompt, or nothing at all.
fn resolve_prompt(prompt: Option<String>, preset: Option<&str>) -> CliResult<String> {
    match (prompt, preset) {
        (Some(text), _) => Ok(text),
        (None, Some(id)) => find_preset(id)
            .map(|p| p.prompt.to_string())
            .ok_or_else(|| CliError::UnknownPreset { id: id.to_string() }),
        (None, None) => Ok(String::new()),
    }
}

/// Apply flag overrides, then clamp.
fn override_parameters(
    mut parameters: GenerationParameters,
    model: Option<String>,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
) -> GenerationParameters {
    if let Some(model) = model {
        parameters.model = model;
    }
    if let Some(temperature) = temperature {
        parameters.temperature = temperature;
    }
    if let Some(max_tokens) = max_tokens {
        parameters.max_tokens = max_tokens;
    }
    parameters.clamped()
}

fn render(manifest: &GenerationManifest, root: &Path, output: &OutputManager) -> CliResult<()> {
    if output.is_json() {
        output.json(manifest)?;
        return Ok(());
    }
    if !manifest.success {
        // The error itself is reported by main.
        return Ok(());
    }

    if manifest.file_count == 0 {
        output.warning("The response contained no fenced code blocks; nothing was written")?;
        return Ok(());
    }

    output.success(&format!(
        "Generated {} file{} in {}",
        manifest.file_count,
        if manifest.file_count == 1 { "" } else { "s" },
        root.display(),
    ))?;
    for path in &manifest.written_paths {
        output.detail(&format!("  {}", path.display()))?;
    }
    if let Some(first) = manifest.preview_path() {
        output.info(&format!("Open {} to start", first.display()))?;
    }
    Ok(())
}

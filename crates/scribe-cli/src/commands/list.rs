//! Implementation of the `scribe list` command.

use scribe_core::{
    application::{CatalogService, ScaffoldInfo},
    domain::{DEFAULT_MODEL, KNOWN_MODELS, PROMPT_PRESETS},
};

use super::build_catalog;
use crate::{
    cli::{ListArgs, ListFormat},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

pub fn execute(args: ListArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let format = if output.is_json() {
        ListFormat::Json
    } else {
        args.format
    };

    if args.presets {
        return list_presets(format, &output);
    }
    if args.models {
        return list_models(format, &output);
    }

    let service = CatalogService::new(build_catalog(&config)?);
    list_scaffolds(&service.available_scaffolds(), format, &output)
}

fn list_scaffolds(
    scaffolds: &[ScaffoldInfo],
    format: ListFormat,
    output: &OutputManager,
) -> CliResult<()> {
    match format {
        ListFormat::Table => {
            output.header("Available Scaffolds:")?;
            for s in scaffolds {
                let files = if s.seeded {
                    format!("{} file(s)", s.file_count)
                } else {
                    "empty".to_string()
                };
                output.print(&format!(
                    "  {:<13} {:<10} {}",
                    s.name.as_str(),
                    files,
                    s.description
                ))?;
            }
        }
        ListFormat::List => {
            for s in scaffolds {
                output.raw(s.name.as_str())?;
            }
        }
        ListFormat::Json => output.json(scaffolds)?,
        ListFormat::Csv => {
            output.raw("name,seeded,file_count,description")?;
            for s in scaffolds {
                output.raw(&format!(
                    "{},{},{},\"{}\"",
                    s.name.as_str(),
                    s.seeded,
                    s.file_count,
                    s.description
                ))?;
            }
        }
    }
    Ok(())
}

fn list_presets(format: ListFormat, output: &OutputManager) -> CliResult<()> {
    match format {
        ListFormat::Table => {
            output.header("Prompt Presets:")?;
            for p in PROMPT_PRESETS {
                output.print(&format!("  {:<15} {}", p.id, p.name))?;
                output.detail(&format!("  {:<15} {}", "", p.description))?;
            }
        }
        ListFormat::List => {
            for p in PROMPT_PRESETS {
                output.raw(p.id)?;
            }
        }
        ListFormat::Json => output.json(PROMPT_PRESETS)?,
        ListFormat::Csv => {
            output.raw("id,name,description")?;
            for p in PROMPT_PRESETS {
                output.raw(&format!("{},{},\"{}\"", p.id, p.name, p.description))?;
            }
        }
    }
    Ok(())
}

fn list_models(format: ListFormat, output: &OutputManager) -> CliResult<()> {
    match format {
        ListFormat::Table => {
            output.header("Known Models:")?;
            for m in KNOWN_MODELS {
                let marker = if m.id == DEFAULT_MODEL { " (default)" } else { "" };
                output.print(&format!("  {:<34} {}{marker}", m.id, m.label))?;
            }
        }
        ListFormat::List => {
            for m in KNOWN_MODELS {
                output.raw(m.id)?;
            }
        }
        ListFormat::Json => output.json(KNOWN_MODELS)?,
        ListFormat::Csv => {
            output.raw("id,label")?;
            for m in KNOWN_MODELS {
                output.raw(&format!("{},\"{}\"", m.id, m.label))?;
            }
        }
    }
    Ok(())
}

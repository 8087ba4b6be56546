//! `scribe prompt`: show exactly what a model would be asked.

use serde::Serialize;

use scribe_core::domain::{SYSTEM_PROMPT, compose_user_prompt, find_preset};

use super::{build_context, resolve_scaffold};
use crate::{
    cli::PromptArgs,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[derive(Debug, Serialize)]
struct ComposedPrompt<'a> {
    system: &'a str,
    user: String,
}

pub fn execute(args: PromptArgs, output: OutputManager) -> CliResult<()> {
    let text = match (&args.text, &args.preset) {
        (Some(text), _) => text.clone(),
        (None, Some(id)) => find_preset(id)
            .map(|p| p.prompt.to_string())
            .ok_or_else(|| CliError::UnknownPreset { id: id.clone() })?,
        (None, None) => {
            return Err(CliError::InvalidInput {
                message: "give prompt text or --preset".into(),
            });
        }
    };

    let scaffold = args.scaffold.as_deref().map(resolve_scaffold);
    let context = build_context(&args.context)?;
    let composed = ComposedPrompt {
        system: SYSTEM_PROMPT,
        user: compose_user_prompt(&text, scaffold, &context),
    };

    if output.is_json() {
        output.json(&composed)?;
        return Ok(());
    }

    output.header("System prompt:")?;
    output.raw(composed.system)?;
    output.header("User prompt:")?;
    output.raw(&composed.user)?;
    Ok(())
}

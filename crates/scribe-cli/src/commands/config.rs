//! `scribe config`: read and write configuration values.
//!
//! Keys are dotted paths into the TOML layout of [`AppConfig`], e.g.
//! `generation.model` or `output.no_color`.

use std::path::Path;

use toml::{Table, Value};

use crate::{
    cli::{ConfigCommands, GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Keys that exist but are omitted from the TOML when unset.
const OPTIONAL_KEYS: &[&str] = &["defaults.scaffold", "defaults.scaffolds_dir"];

/// Dispatch to the correct config subcommand.
pub fn execute(
    cmd: ConfigCommands,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let tree = to_table(&config)?;
            let value = get_value(&tree, &key)?;
            output.raw(&value.map(render).unwrap_or_default())?;
        }

        ConfigCommands::Set { key, value } => {
            let path = AppConfig::active_path(global.config.as_ref());
            let mut tree = read_table(&path)?;
            set_value(&mut tree, &key, &value)?;

            // Refuse to write a file the loader would reject.
            let text = toml::to_string_pretty(&tree).map_err(config_error)?;
            toml::from_str::<AppConfig>(&text).map_err(|e| CliError::InvalidInput {
                message: format!("'{value}' is not valid for {key}: {e}"),
            })?;

            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).with_cli_context(|| {
                    format!("Failed to create config directory '{}'", parent.display())
                })?;
            }
            std::fs::write(&path, text)
                .with_cli_context(|| format!("Failed to write '{}'", path.display()))?;
            output.success(&format!("Set {key} = {value} in {}", path.display()))?;
        }

        ConfigCommands::List => {
            if output.is_json() {
                output.json(&config)?;
            } else {
                output.header("Current Configuration:")?;
                let text = toml::to_string_pretty(&config).map_err(config_error)?;
                output.print(&text)?;
            }
        }

        ConfigCommands::Path => {
            output.raw(&AppConfig::active_path(global.config.as_ref()).display().to_string())?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn config_error<E: std::error::Error + Send + Sync + 'static>(e: E) -> CliError {
    CliError::ConfigError {
        message: e.to_string(),
        source: Some(Box::new(e)),
    }
}

fn to_table(config: &AppConfig) -> CliResult<Table> {
    let text = toml::to_string(config).map_err(config_error)?;
    toml::from_str(&text).map_err(config_error)
}

/// The file as written so far, or the defaults when there is none yet.
fn read_table(path: &Path) -> CliResult<Table> {
    if !path.is_file() {
        return to_table(&AppConfig::default());
    }
    let text = std::fs::read_to_string(path)
        .with_cli_context(|| format!("Failed to read '{}'", path.display()))?;
    toml::from_str(&text).map_err(|e| CliError::ConfigError {
        message: format!("'{}' is not valid TOML", path.display()),
        source: Some(Box::new(e)),
    })
}

fn unknown_key(key: &str) -> CliError {
    CliError::ConfigError {
        message: format!("Unknown config key: '{key}'"),
        source: None,
    }
}

fn get_value<'a>(tree: &'a Table, key: &str) -> CliResult<Option<&'a Value>> {
    let mut segments = key.split('.');
    let first = segments.next().unwrap_or_default();
    let mut current = tree.get(first);
    for segment in segments {
        current = current.and_then(Value::as_table).and_then(|t| t.get(segment));
    }

    match current {
        Some(Value::Table(_)) => Err(unknown_key(key)),
        Some(value) => Ok(Some(value)),
        None if OPTIONAL_KEYS.contains(&key) => Ok(None),
        None => Err(unknown_key(key)),
    }
}

/// Set `key` in `tree`, typed after the default value for that key.
fn set_value(tree: &mut Table, key: &str, raw: &str) -> CliResult<()> {
    let template = to_table(&AppConfig::default())?;
    let existing = get_value(&template, key)?.cloned();
    let value = parse_like(existing.as_ref(), raw).ok_or_else(|| CliError::InvalidInput {
        message: format!("'{raw}' is not valid for {key}"),
    })?;

    let (parents, leaf) = key.rsplit_once('.').ok_or_else(|| unknown_key(key))?;
    let mut table = tree;
    for segment in parents.split('.') {
        table = table
            .entry(segment)
            .or_insert_with(|| Value::Table(Table::new()))
            .as_table_mut()
            .ok_or_else(|| unknown_key(key))?;
    }
    table.insert(leaf.to_string(), value);
    Ok(())
}

/// Parse `raw` into the same TOML type as the current value.
fn parse_like(existing: Option<&Value>, raw: &str) -> Option<Value> {
    match existing {
        Some(Value::Boolean(_)) => raw.parse().ok().map(Value::Boolean),
        Some(Value::Integer(_)) => raw.parse().ok().map(Value::Integer),
        Some(Value::Float(_)) => raw.parse().ok().map(Value::Float),
        Some(Value::Array(_)) => Some(Value::Array(
            raw.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| Value::String(s.to_string()))
                .collect(),
        )),
        _ => Some(Value::String(raw.to_string())),
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> Table {
        to_table(&AppConfig::default()).unwrap()
    }

    #[test]
    fn get_known_key() {
        let tree = defaults();
        let value = get_value(&tree, "generation.model").unwrap().unwrap();
        assert_eq!(render(value), "openai/gpt-4");
        assert_eq!(render(get_value(&tree, "output.no_color").unwrap().unwrap()), "false");
    }

    #[test]
    fn unset_optional_key_is_empty() {
        assert!(get_value(&defaults(), "defaults.scaffold").unwrap().is_none());
    }

    #[test]
    fn get_unknown_key_is_error() {
        assert!(matches!(
            get_value(&defaults(), "does.not.exist"),
            Err(CliError::ConfigError { .. })
        ));
        // A section is not a value.
        assert!(get_value(&defaults(), "generation").is_err());
    }

    #[test]
    fn set_keeps_value_types() {
        let mut tree = defaults();
        set_value(&mut tree, "generation.max_tokens", "4000").unwrap();
        set_value(&mut tree, "output.no_color", "true").unwrap();
        set_value(&mut tree, "defaults.scaffold", "flask").unwrap();

        let text = toml::to_string(&tree).unwrap();
        let cfg: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(cfg.generation.max_tokens, 4000);
        assert!(cfg.output.no_color);
        assert_eq!(cfg.defaults.scaffold.as_deref(), Some("flask"));
    }

    #[test]
    fn set_into_empty_file_creates_sections() {
        let mut tree = Table::new();
        set_value(&mut tree, "generation.temperature", "0.2").unwrap();
        let text = toml::to_string(&tree).unwrap();
        assert!(text.contains("[generation]"));
        let cfg: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(cfg.generation.temperature, 0.2);
        assert_eq!(cfg.generation.model, "openai/gpt-4");
    }

    #[test]
    fn set_unknown_key_is_error() {
        let mut tree = Table::new();
        assert!(set_value(&mut tree, "generation.colour", "red").is_err());
    }

    #[test]
    fn set_rejects_wrong_type() {
        let mut tree = defaults();
        assert!(matches!(
            set_value(&mut tree, "generation.max_tokens", "lots"),
            Err(CliError::InvalidInput { .. })
        ));
    }

    #[test]
    fn set_splits_lists() {
        let mut tree = defaults();
        set_value(&mut tree, "generation.stop_sequences", "END, STOP").unwrap();
        let text = toml::to_string(&tree).unwrap();
        let cfg: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(cfg.generation.stop_sequences, vec!["END", "STOP"]);
    }
}

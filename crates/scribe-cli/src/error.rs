//! Error handling for the Scribe CLI.
//!
//! Every command returns [`CliResult`]. `main` turns the error into a
//! message on stderr (coloured on a terminal) and an exit code.

use std::error::Error as _;
use std::path::PathBuf;

use owo_colors::OwoColorize;
use thiserror::Error;

use scribe_core::domain::{PROMPT_PRESETS, ScaffoldName};
use scribe_core::error::{ErrorCategory as CoreCategory, ScribeError};

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid user input that clap could not catch.
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Unknown prompt preset '{id}'")]
    UnknownPreset { id: String },

    #[error("Unknown scaffold '{name}'")]
    UnknownScaffold { name: String },

    /// A configuration file could not be read, parsed, or written.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An error propagated from `scribe-core`.
    #[error("{0}")]
    Core(#[from] ScribeError),

    /// The pipeline ran but its manifest reports failure.
    #[error("Generation failed: {message}")]
    GenerationFailed { message: String, root: PathBuf },

    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl CliError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidInput { message } => vec![
                format!("Check your input: {message}"),
                "Use --help for usage information".into(),
            ],

            Self::UnknownPreset { id } => {
                let mut out = vec![
                    format!("'{id}' is not a known preset"),
                    "Available presets:".into(),
                ];
                out.extend(
                    PROMPT_PRESETS
                        .iter()
                        .map(|p| format!("  • {:<15} - {}", p.id, p.name)),
                );
                out
            }

            Self::UnknownScaffold { name } => {
                let mut out = vec![
                    format!("'{name}' is not a known scaffold"),
                    "Known scaffolds:".into(),
                ];
                out.extend(
                    ScaffoldName::ALL
                        .iter()
                        .map(|n| format!("  • {:<13} - {}", n.as_str(), n.description())),
                );
                out
            }

            Self::ConfigError { message, .. } => vec![
                format!("Configuration issue: {message}"),
                "Show the active file with: scribe config path".into(),
                "Create a default config with: scribe init".into(),
            ],

            Self::Core(core) => core.suggestions(),

            Self::GenerationFailed { root, .. } => vec![
                format!(
                    "Files from the scaffold pass may remain in {}",
                    root.display()
                ),
                "Retry against a new output directory".into(),
                "Preview the response first with: scribe extract".into(),
            ],

            Self::IoError { message, .. } => vec![
                format!("I/O operation failed: {message}"),
                "Check file permissions".into(),
                "Ensure the input file exists".into(),
            ],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. } => ErrorCategory::UserError,
            Self::UnknownPreset { .. } | Self::UnknownScaffold { .. } => ErrorCategory::NotFound,
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::Core(core) => match core.category() {
                CoreCategory::Validation | CoreCategory::Safety | CoreCategory::Conflict => {
                    ErrorCategory::UserError
                }
                CoreCategory::NotFound => ErrorCategory::NotFound,
                CoreCategory::Configuration => ErrorCategory::Configuration,
                CoreCategory::Upstream | CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::GenerationFailed { .. } => ErrorCategory::Internal,
            Self::IoError { .. } => ErrorCategory::Internal,
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// | Category      | Code |
    /// |---------------|------|
    /// | User error    |  2   |
    /// | Not found     |  3   |
    /// | Configuration |  4   |
    /// | Internal      |  1   |
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::UserError => 2,
            ErrorCategory::NotFound => 3,
            ErrorCategory::Configuration => 4,
            ErrorCategory::Internal => 1,
        }
    }

    /// Format the error for display with colors and suggestions.
    pub fn format_colored(&self, verbose: bool) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "\n{} {}\n\n",
            "✗".red().bold(),
            "Error:".red().bold()
        ));
        output.push_str(&format!("  {}\n", self.to_string().red()));

        if verbose {
            let mut source = self.source();
            while let Some(err) = source {
                output.push_str(&format!(
                    "\n  {} {}\n",
                    "→".dimmed(),
                    err.to_string().dimmed()
                ));
                source = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            output.push_str(&format!("\n{}\n", "Suggestions:".yellow().bold()));
            for suggestion in suggestions {
                output.push_str(&format!("  {suggestion}\n"));
            }
        }

        if !verbose {
            output.push('\n');
            output.push_str(&format!(
                "{} {}\n",
                "\u{2139}".blue(),
                "Use -v / --verbose for more details.".dimmed(),
            ));
        }

        output
    }

    /// Plain-text version of [`Self::format_colored`], no ANSI codes.
    pub fn format_plain(&self, verbose: bool) -> String {
        let mut out = format!("\nError: {self}\n");

        if verbose {
            let mut src = self.source();
            while let Some(err) = src {
                out.push_str(&format!("  Caused by: {err}\n"));
                src = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str("\nSuggestions:\n");
            for s in &suggestions {
                out.push_str(&format!("  {s}\n"));
            }
        }

        if !verbose {
            out.push_str("\nUse -v / --verbose for more details.\n");
        }

        out
    }

    /// Log the error using tracing.
    pub fn log(&self) {
        match self.category() {
            ErrorCategory::UserError => tracing::warn!("User error: {}", self),
            ErrorCategory::NotFound => tracing::warn!("Not found: {}", self),
            ErrorCategory::Configuration => tracing::error!("Configuration error: {}", self),
            ErrorCategory::Internal => tracing::error!("Internal error: {}", self),
        }

        if let Some(source) = self.source() {
            tracing::debug!("Caused by: {}", source);
        }
    }
}

/// Error categories for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    UserError,
    NotFound,
    Configuration,
    Internal,
}

/// Attach a context message to an I/O failure.
pub trait IntoCli<T> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IntoCli<T> for Result<T, std::io::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::IoError {
            message: f().into(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use scribe_core::application::ApplicationError;
    use scribe_core::domain::DomainError;

    use super::*;

    #[test]
    fn unknown_preset_lists_presets() {
        let err = CliError::UnknownPreset { id: "crud".into() };
        let suggestions = err.suggestions();
        assert!(suggestions.iter().any(|s| s.contains("rest-api")));
        assert!(suggestions.iter().any(|s| s.contains("websocket-chat")));
    }

    #[test]
    fn collision_is_a_user_error_suggesting_policy() {
        let err = CliError::from(ScribeError::from(ApplicationError::WriteCollision {
            path: PathBuf::from("/out/app.py"),
        }));
        assert_eq!(err.exit_code(), 2);
        assert!(err.suggestions().iter().any(|s| s.contains("--policy")));
    }

    #[test]
    fn path_safety_violation_is_a_user_error() {
        let err = CliError::from(ScribeError::from(DomainError::PathSafetyViolation {
            path: "../x".into(),
            reason: "parent traversal".into(),
        }));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn provider_failure_is_internal() {
        let err = CliError::from(ScribeError::from(ApplicationError::ProviderError {
            reason: "timeout".into(),
        }));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn exit_codes_by_category() {
        assert_eq!(
            CliError::InvalidInput {
                message: "x".into()
            }
            .exit_code(),
            2
        );
        assert_eq!(
            CliError::UnknownScaffold {
                name: "cobol".into()
            }
            .exit_code(),
            3
        );
        assert_eq!(
            CliError::ConfigError {
                message: "x".into(),
                source: None
            }
            .exit_code(),
            4
        );
        assert_eq!(
            CliError::GenerationFailed {
                message: "x".into(),
                root: PathBuf::from("/tmp/p"),
            }
            .exit_code(),
            1
        );
    }

    #[test]
    fn format_plain_contains_header_and_suggestions() {
        let err = CliError::UnknownScaffold {
            name: "cobol".into(),
        };
        let s = err.format_plain(false);
        assert!(s.contains("Error: Unknown scaffold 'cobol'"));
        assert!(s.contains("Suggestions:"));
        assert!(s.contains("fastapi"));
        assert!(s.contains("--verbose"));
    }

    #[test]
    fn format_plain_verbose_shows_cause() {
        let err = CliError::IoError {
            message: "reading response".into(),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };
        let s = err.format_plain(true);
        assert!(s.contains("Caused by: no such file"));
        assert!(!s.contains("--verbose"));
    }

    #[test]
    fn into_cli_io_error() {
        let result: Result<(), io::Error> = Err(io::Error::new(io::ErrorKind::NotFound, "missing"));
        let cli: CliResult<()> = result.with_cli_context(|| "reading response");
        assert!(matches!(cli, Err(CliError::IoError { .. })));
    }
}

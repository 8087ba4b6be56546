//! Unified error handling for Scribe Core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Scribe Core operations.
#[derive(Debug, Error, Clone)]
pub enum ScribeError {
    /// Errors from the domain layer (path safety, malformed scaffolds).
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (collisions, I/O, provider).
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl ScribeError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Check your setup and try again".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in Scribe".into(),
                "Please report this issue at: https://github.com/scribe-rs/scribe/issues".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Safety => ErrorCategory::Safety,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Check if this error is retryable.
    ///
    /// The pipeline never retries on its own. Only a provider failure is worth
    /// a fresh `generate` call, and that call must target a new directory.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Application(ApplicationError::ProviderError { .. })
        )
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Safety,
    Conflict,
    NotFound,
    Upstream,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type ScribeResult<T> = Result<T, ScribeError>;

/// Extension trait for adding context to errors.
pub trait Context<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> ScribeResult<T>;
}

impl<T, E> Context<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, msg: impl Into<String>) -> ScribeResult<T> {
        self.map_err(|e| ScribeError::Internal {
            message: format!("{}: {}", msg.into(), e),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn collision_is_a_conflict() {
        let err: ScribeError = ApplicationError::WriteCollision {
            path: PathBuf::from("/tmp/out/a.txt"),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Conflict);
        assert!(!err.is_retryable());
        assert!(err.to_string().contains("a.txt"));
    }

    #[test]
    fn path_safety_is_a_safety_error() {
        let err: ScribeError = DomainError::PathSafetyViolation {
            path: "../../etc/passwd".into(),
            reason: "parent directory traversal".into(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Safety);
        assert!(!err.suggestions().is_empty());
    }

    #[test]
    fn provider_errors_are_retryable() {
        let err: ScribeError = ApplicationError::ProviderError {
            reason: "rate limited".into(),
        }
        .into();
        assert!(err.is_retryable());
        assert_eq!(err.category(), ErrorCategory::Upstream);
    }

    #[test]
    fn context_wraps_foreign_errors_as_internal() {
        let res: Result<(), std::fmt::Error> = Err(std::fmt::Error);
        let err = res.context("formatting manifest").unwrap_err();
        assert!(matches!(err, ScribeError::Internal { .. }));
        assert!(err.to_string().contains("formatting manifest"));
    }
}

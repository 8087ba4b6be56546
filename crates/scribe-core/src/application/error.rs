//! Application layer errors.
//!
//! These errors represent failures in orchestration and I/O, not in the pure
//! parsing or tree logic. Those are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Target file exists and the write policy forbids touching it.
    #[error("Refusing to overwrite existing file {path}")]
    WriteCollision { path: PathBuf },

    /// Filesystem operation failed (disk full, permission denied, ...).
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// The text provider could not produce a response.
    #[error("Provider error: {reason}")]
    ProviderError { reason: String },

    /// A scaffold catalog could not be built or read.
    #[error("Scaffold catalog error: {reason}")]
    CatalogError { reason: String },

    /// Validation failed (application-level, not domain).
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::WriteCollision { path } => vec![
                format!("File already exists: {}", path.display()),
                "Use --policy overwrite to replace it (destructive)".into(),
                "Or --policy skip to keep existing files".into(),
                "Or write into a fresh directory".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Check that the disk is not full".into(),
            ],
            Self::ProviderError { .. } => vec![
                "The model provider did not return a response".into(),
                "Retry the whole generation into a new output directory".into(),
            ],
            Self::CatalogError { reason } => vec![
                format!("Details: {}", reason),
                "Check the scaffolds directory layout".into(),
            ],
            Self::ValidationFailed(_) => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::WriteCollision { .. } => ErrorCategory::Conflict,
            Self::FilesystemError { .. } => ErrorCategory::Internal,
            Self::ProviderError { .. } => ErrorCategory::Upstream,
            Self::CatalogError { .. } => ErrorCategory::Configuration,
            Self::ValidationFailed(_) => ErrorCategory::Validation,
        }
    }
}

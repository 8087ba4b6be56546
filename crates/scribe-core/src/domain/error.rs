// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (manifests and logs both keep a copy)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Safety Errors
    // ========================================================================
    /// A declared path would resolve outside the output root.
    #[error("Path safety violation for '{path}': {reason}")]
    PathSafetyViolation { path: String, reason: String },

    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid scaffold: {0}")]
    InvalidScaffold(String),

    #[error("Duplicate path in scaffold: {path}")]
    DuplicatePath { path: String },

    #[error("Invalid generation parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("Invalid context variable: {0}")]
    InvalidVariable(String),
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::PathSafetyViolation { path, .. } => vec![
                format!("Refusing to write '{}'", path),
                "Generated files must stay inside the output directory".into(),
                "Ask the model for relative paths without '..' or a leading '/'".into(),
            ],
            Self::InvalidScaffold(msg) => vec![
                format!("Details: {}", msg),
                "Try: scribe list to see available scaffolds".into(),
            ],
            Self::InvalidVariable(msg) => vec![
                format!("Details: {}", msg),
                "Variables are passed as --var KEY=VALUE".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::PathSafetyViolation { .. } => ErrorCategory::Safety,
            Self::InvalidScaffold(_)
            | Self::DuplicatePath { .. }
            | Self::InvalidParameter { .. }
            | Self::InvalidVariable(_) => ErrorCategory::Validation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Safety,
    Internal,
}

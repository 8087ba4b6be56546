//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `scribe-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use crate::domain::{GenerationParameters, ScaffoldName, ScaffoldNode};
use crate::error::ScribeResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `scribe_adapters::filesystem::LocalFilesystem` (production)
/// - `scribe_adapters::filesystem::MemoryFilesystem` (testing)
///
/// Paths handed to these methods are already resolved under an output root;
/// the port does no safety checks of its own.
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> ScribeResult<()>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &str) -> ScribeResult<()>;

    /// Read a file as UTF-8.
    fn read_file(&self, path: &Path) -> ScribeResult<String>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Absolute form of `path`, without requiring it to exist.
    fn absolutize(&self, path: &Path) -> ScribeResult<PathBuf>;
}

/// Port for read-only scaffold lookup.
///
/// Implemented by:
/// - `scribe_adapters::catalog::BuiltinCatalog` (compiled-in seeds, optionally
///   extended from a scaffolds directory at startup)
#[cfg_attr(test, mockall::automock)]
pub trait ScaffoldCatalog: Send + Sync {
    /// Tree for a scaffold; empty when the name has no seeded tree.
    fn lookup(&self, name: ScaffoldName) -> Vec<ScaffoldNode>;

    /// Names that have a non-empty tree, in catalog order.
    fn seeded(&self) -> Vec<ScaffoldName>;
}

/// One text-generation request.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub prompt: String,
    pub system_prompt: Option<String>,
    pub parameters: GenerationParameters,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            system_prompt: None,
            parameters: GenerationParameters::default(),
        }
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(system_prompt.into());
        self
    }

    /// Set parameters, clamped into their accepted ranges.
    pub fn with_parameters(mut self, parameters: GenerationParameters) -> Self {
        self.parameters = parameters.clamped();
        self
    }
}

/// Port for the model provider.
///
/// Implemented by:
/// - `scribe_adapters::provider::ReplayProvider` (recorded responses)
///
/// Any failure is reported as `ApplicationError::ProviderError`; callers never
/// retry on their own.
#[cfg_attr(test, mockall::automock)]
pub trait TextProvider: Send + Sync {
    fn produce_text(&self, request: &CompletionRequest) -> ScribeResult<String>;
}

//! Application layer for Scribe.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (GenerationService, CatalogService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer sequences the domain layer and performs I/O through
//! ports. Parsing and tree rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    CatalogService, GenerationService, PromptRequest,
    ScaffoldInfo, // DTO for scaffold listings
    TreeMaterializer, fresh_project_dir,
};

// Re-export port traits (for adapter implementation)
pub use ports::{CompletionRequest, Filesystem, ScaffoldCatalog, TextProvider};

pub use error::ApplicationError;

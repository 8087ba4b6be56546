//! Scribe Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for Scribe, which
//! turns a model response (markdown-like text with fenced code blocks) into a
//! conflict-safe file tree, optionally seeded from a named scaffold.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           scribe-cli (CLI)              │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (GenerationService, TreeMaterializer)  │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Driven: Filesystem, Catalog, Provider) │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     scribe-adapters (Infrastructure)    │
//! │ (LocalFilesystem, BuiltinCatalog, etc)  │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (extract, ScaffoldNode, WritePolicy)    │
//! │         No I/O, no logging              │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use scribe_core::prelude::*;
//!
//! // Adapters come from scribe-adapters (or your own port implementations).
//! let service = GenerationService::new(catalog, filesystem);
//!
//! let manifest = service.generate(
//!     raw_response,
//!     Path::new("./out/project_1"),
//!     Some(ScaffoldName::resolve("python")),
//!     &GenerationContext::for_project("demo"),
//! );
//! assert!(manifest.success);
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        CatalogService, GenerationService, PromptRequest, ScaffoldInfo, TreeMaterializer, fresh_project_dir,
        ports::{CompletionRequest, Filesystem, ScaffoldCatalog, TextProvider},
    };
    pub use crate::domain::{
        ExtractedFileSet, GenerationContext, GenerationManifest, GenerationParameters,
        RelativePath, ScaffoldName, ScaffoldNode, WritePolicy, extract,
    };
    pub use crate::error::{ScribeError, ScribeResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

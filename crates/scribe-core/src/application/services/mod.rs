//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "generate from a response" or "list scaffolds".

pub mod catalog_service;
pub mod generation_service;
pub mod materializer;

pub use catalog_service::{CatalogService, ScaffoldInfo};
pub use generation_service::{GenerationService, PromptRequest, fresh_project_dir};
pub use materializer::TreeMaterializer;

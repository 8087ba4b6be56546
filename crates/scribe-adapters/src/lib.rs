//! Infrastructure adapters for Scribe.
//!
//! This crate implements the ports defined in `scribe-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod catalog;
pub mod filesystem;
pub mod provider;

// Re-export commonly used adapters
pub use catalog::{BuiltinCatalog, load_scaffold_dir};
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use provider::ReplayProvider;

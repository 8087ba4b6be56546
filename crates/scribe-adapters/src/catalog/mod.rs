//! Scaffold catalog adapters.

mod builtin;
mod loader;

pub use builtin::BuiltinCatalog;
pub use loader::{ScaffoldManifest, ScaffoldSection, load_scaffold_dir};

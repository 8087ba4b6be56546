pub mod common;
pub mod context;
pub mod file_set;
pub mod manifest;
pub mod scaffold;

pub use common::RelativePath;
pub use context::GenerationContext;
pub use file_set::ExtractedFileSet;
pub use manifest::GenerationManifest;
pub use scaffold::{DirectorySpec, FileSpec, ScaffoldName, ScaffoldNode, TemplateSource, WalkEntry};

// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Scribe.
//!
//! Pure logic only. Extraction, scaffold trees, placeholder substitution and
//! prompt composition all live here; anything that touches the disk or a
//! model goes through the ports in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **No logging**: Tracing belongs to the application layer
//! - **Immutable entities**: Scaffold trees never change after construction
//!
pub mod entities;
pub mod error;
pub mod extraction;
pub mod prompt;
pub mod value_objects;

pub use entities::{
    DirectorySpec, ExtractedFileSet, FileSpec, GenerationContext, GenerationManifest,
    RelativePath, ScaffoldName, ScaffoldNode, TemplateSource, WalkEntry,
    scaffold::{file_count, validate_tree, walk},
};

pub use error::{DomainError, ErrorCategory};
pub use extraction::extract;
pub use prompt::{PROMPT_PRESETS, PromptPreset, SYSTEM_PROMPT, compose_user_prompt, find_preset};
pub use value_objects::{
    DEFAULT_MODEL, GenerationParameters, KNOWN_MODELS, MAX_STOP_SEQUENCES, ModelInfo, WritePolicy,
};

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Cross-module behaviour
    // ========================================================================

    #[test]
    fn extracted_paths_are_checked_by_relative_path() {
        let files = extract(
            "```\nok/file.py:\nx\n```\n```\n../../etc/passwd:\ny\n```\n```\n/abs.txt:\nz\n```",
        );
        let verdicts: Vec<bool> = files
            .paths()
            .map(|p| RelativePath::try_new(p).is_ok())
            .collect();
        assert_eq!(verdicts, vec![true, false, false]);
    }

    #[test]
    fn scaffold_content_renders_with_project_context() {
        let tree = vec![ScaffoldNode::dir(
            "app",
            vec![ScaffoldNode::file("README.md", "# {{ project_name }}\n")],
        )];
        let ctx = GenerationContext::for_project("Demo");

        let rendered: Vec<(String, String)> = walk(&tree)
            .into_iter()
            .filter(|(_, e)| !e.node.is_directory())
            .map(|(p, e)| (p.to_slash_string(), ctx.render(e.node.content())))
            .collect();

        assert_eq!(rendered, vec![("app/README.md".into(), "# Demo\n".into())]);
    }

    #[test]
    fn end_to_end_blocks_extract_as_expected() {
        let files = extract("```\nmodels.py:\nclass Task: pass\n```\n```\nprint('ok')\n```");
        assert_eq!(files.len(), 2);
        assert_eq!(files.get("models.py"), Some("class Task: pass"));
        assert_eq!(files.get("file_2.py"), Some("print('ok')"));
    }
}

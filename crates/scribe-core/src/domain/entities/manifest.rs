use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::entities::scaffold::ScaffoldName;

/// Result of one generation run.
///
/// Built once by the orchestrator and never mutated afterwards. A failed run
/// always carries an empty `written_paths`, even when the scaffold pass left
/// files behind on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationManifest {
    pub success: bool,
    /// Absolute paths written by the generated-files pass, in write order.
    pub written_paths: Vec<PathBuf>,
    pub file_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    pub raw_response: String,
    /// Scaffold requested for this run, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scaffold: Option<ScaffoldName>,
}

impl GenerationManifest {
    pub fn success(
        written_paths: Vec<PathBuf>,
        raw_response: impl Into<String>,
        scaffold: Option<ScaffoldName>,
    ) -> Self {
        Self {
            success: true,
            file_count: written_paths.len(),
            written_paths,
            error_message: None,
            raw_response: raw_response.into(),
            scaffold,
        }
    }

    pub fn failure(
        error_message: impl Into<String>,
        raw_response: impl Into<String>,
        scaffold: Option<ScaffoldName>,
    ) -> Self {
        Self {
            success: false,
            written_paths: Vec::new(),
            file_count: 0,
            error_message: Some(error_message.into()),
            raw_response: raw_response.into(),
            scaffold,
        }
    }

    /// First written file, the natural candidate for a content preview.
    pub fn preview_path(&self) -> Option<&Path> {
        self.written_paths.first().map(PathBuf::as_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_counts_written_paths() {
        let m = GenerationManifest::success(
            vec![PathBuf::from("/out/a.py"), PathBuf::from("/out/b.py")],
            "raw",
            None,
        );
        assert!(m.success);
        assert_eq!(m.file_count, 2);
        assert_eq!(m.preview_path(), Some(Path::new("/out/a.py")));
    }

    #[test]
    fn failure_has_no_paths() {
        let m = GenerationManifest::failure("boom", "raw", Some(ScaffoldName::Python));
        assert!(!m.success);
        assert_eq!(m.file_count, 0);
        assert!(m.preview_path().is_none());
        assert_eq!(m.error_message.as_deref(), Some("boom"));
    }

    #[test]
    fn json_omits_empty_optionals() {
        let m = GenerationManifest::success(vec![], "", None);
        let json = serde_json::to_value(&m).unwrap();
        assert!(json.get("error_message").is_none());
        assert!(json.get("scaffold").is_none());
        assert_eq!(json["file_count"], 0);
    }
}

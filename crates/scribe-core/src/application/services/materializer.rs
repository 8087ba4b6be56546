//! Tree Materializer - turns in-memory file descriptions into files on disk.
//!
//! Two entry points share one write path:
//! - [`TreeMaterializer::materialize_tree`] for scaffold trees (with
//!   placeholder substitution)
//! - [`TreeMaterializer::materialize_files`] for flat extracted sets
//!
//! Every target is resolved under the root through [`RelativePath`], so a
//! path that would escape the root is rejected before anything is written for
//! that entry. Earlier writes in the same call are never undone.

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::{
    application::{ApplicationError, ports::Filesystem},
    domain::{ExtractedFileSet, GenerationContext, RelativePath, ScaffoldNode, WritePolicy, walk},
    error::ScribeResult,
};

/// Writes scaffold trees and extracted file sets under a root directory.
pub struct TreeMaterializer<'a> {
    filesystem: &'a dyn Filesystem,
}

impl<'a> TreeMaterializer<'a> {
    pub fn new(filesystem: &'a dyn Filesystem) -> Self {
        Self { filesystem }
    }

    /// Write a scaffold tree, substituting `{{ key }}` placeholders in files.
    ///
    /// Directories are created without being reported. Returns the absolute
    /// paths of files actually written, in tree order.
    #[instrument(skip_all, fields(root = %root.display(), policy = %policy))]
    pub fn materialize_tree(
        &self,
        nodes: &[ScaffoldNode],
        root: &Path,
        context: &GenerationContext,
        policy: WritePolicy,
    ) -> ScribeResult<Vec<PathBuf>> {
        let root = self.prepare_root(root)?;
        let mut written = Vec::new();

        for (relative, entry) in walk(nodes) {
            let target = root.join(relative.as_path());
            if entry.node.is_directory() {
                self.filesystem.create_dir_all(&target)?;
                continue;
            }

            let content = context.render(entry.node.content());
            if self.write_one(&target, &content, policy)? {
                written.push(target);
            }
        }

        debug!(written = written.len(), "Scaffold tree materialized");
        Ok(written)
    }

    /// Write a flat path -> content mapping, creating parents as needed.
    ///
    /// Returns the absolute paths of files actually written, in set order.
    #[instrument(skip_all, fields(root = %root.display(), policy = %policy, files = files.len()))]
    pub fn materialize_files(
        &self,
        files: &ExtractedFileSet,
        root: &Path,
        policy: WritePolicy,
    ) -> ScribeResult<Vec<PathBuf>> {
        let root = self.prepare_root(root)?;
        let mut written = Vec::new();

        for (declared, content) in files.iter() {
            let relative = RelativePath::try_new(declared)?;
            let target = root.join(relative.as_path());
            if self.write_one(&target, content, policy)? {
                written.push(target);
            }
        }

        debug!(written = written.len(), "File set materialized");
        Ok(written)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    /// Absolute root, created if missing.
    fn prepare_root(&self, root: &Path) -> ScribeResult<PathBuf> {
        let root = self.filesystem.absolutize(root)?;
        self.filesystem.create_dir_all(&root)?;
        Ok(root)
    }

    /// Apply the policy to one file. `Ok(false)` means skipped.
    fn write_one(&self, target: &Path, content: &str, policy: WritePolicy) -> ScribeResult<bool> {
        if self.filesystem.exists(target) {
            match policy {
                WritePolicy::Overwrite => {}
                WritePolicy::SkipExisting => {
                    debug!(path = %target.display(), "Skipping existing file");
                    return Ok(false);
                }
                WritePolicy::FailIfExists => {
                    return Err(ApplicationError::WriteCollision {
                        path: target.to_path_buf(),
                    }
                    .into());
                }
            }
        }

        if let Some(parent) = target.parent() {
            self.filesystem.create_dir_all(parent)?;
        }
        self.filesystem.write_file(target, content)?;
        debug!(path = %target.display(), bytes = content.len(), "Wrote file");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::*;

    use super::*;
    use crate::application::ports::MockFilesystem;
    use crate::domain::DomainError;
    use crate::error::ScribeError;

    fn fs_rooted_at(root: &'static str) -> MockFilesystem {
        let mut fs = MockFilesystem::new();
        fs.expect_absolutize()
            .returning(move |p| Ok(Path::new(root).join(p)));
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs
    }

    #[test]
    fn unsafe_path_is_rejected_before_any_write() {
        let mut fs = fs_rooted_at("/out");
        fs.expect_exists().never();
        fs.expect_write_file().never();

        let files: ExtractedFileSet = [("../../etc/passwd", "x")].into_iter().collect();
        let err = TreeMaterializer::new(&fs)
            .materialize_files(&files, Path::new("run"), WritePolicy::Overwrite)
            .unwrap_err();

        assert!(matches!(
            err,
            ScribeError::Domain(DomainError::PathSafetyViolation { .. })
        ));
    }

    #[test]
    fn fail_if_exists_stops_without_writing() {
        let mut fs = fs_rooted_at("/out");
        fs.expect_exists()
            .with(eq(Path::new("/out/a.txt")))
            .return_const(true);
        fs.expect_write_file().never();

        let files: ExtractedFileSet = [("a.txt", "new")].into_iter().collect();
        let err = TreeMaterializer::new(&fs)
            .materialize_files(&files, Path::new(""), WritePolicy::FailIfExists)
            .unwrap_err();

        assert!(matches!(
            err,
            ScribeError::Application(ApplicationError::WriteCollision { .. })
        ));
    }

    #[test]
    fn skip_existing_does_not_report_or_write() {
        let mut fs = fs_rooted_at("/out");
        fs.expect_exists()
            .returning(|p| p == Path::new("/out/keep.txt"));
        fs.expect_write_file()
            .with(eq(Path::new("/out/new.txt")), eq("n"))
            .times(1)
            .returning(|_, _| Ok(()));

        let files: ExtractedFileSet = [("keep.txt", "k"), ("new.txt", "n")].into_iter().collect();
        let written = TreeMaterializer::new(&fs)
            .materialize_files(&files, Path::new(""), WritePolicy::SkipExisting)
            .unwrap();

        assert_eq!(written, vec![PathBuf::from("/out/new.txt")]);
    }

    #[test]
    fn tree_renders_placeholders_and_creates_directories() {
        let mut fs = fs_rooted_at("/out");
        fs.expect_exists().return_const(false);
        fs.expect_write_file()
            .with(eq(Path::new("/out/src/app.py")), eq("# demo"))
            .times(1)
            .returning(|_, _| Ok(()));

        let tree = vec![ScaffoldNode::dir(
            "src",
            vec![ScaffoldNode::file("app.py", "# {{ project_name }}")],
        )];
        let ctx = GenerationContext::new().with_variable("project_name", "demo");
        let written = TreeMaterializer::new(&fs)
            .materialize_tree(&tree, Path::new(""), &ctx, WritePolicy::Overwrite)
            .unwrap();

        assert_eq!(written, vec![PathBuf::from("/out/src/app.py")]);
    }

    #[test]
    fn root_creation_failure_propagates() {
        let mut fs = MockFilesystem::new();
        fs.expect_absolutize().returning(|p| Ok(p.to_path_buf()));
        fs.expect_create_dir_all().returning(|p| {
            Err(ApplicationError::FilesystemError {
                path: p.to_path_buf(),
                reason: "permission denied".into(),
            }
            .into())
        });
        fs.expect_write_file().never();

        let files: ExtractedFileSet = [("a.txt", "x")].into_iter().collect();
        let result = TreeMaterializer::new(&fs).materialize_files(
            &files,
            Path::new("/ro"),
            WritePolicy::Overwrite,
        );
        assert!(result.is_err());
    }
}

use std::fmt;
use std::path::{Component, Path, PathBuf};

use crate::domain::error::DomainError;

/// A filesystem path guaranteed to stay **inside** whatever root it is joined to.
///
/// Invariants, enforced at construction:
/// - never absolute, never carries a drive or UNC prefix
/// - no `..` segments
/// - at least one normal segment
///
/// Backslashes are treated as separators and `.` segments are dropped, so
/// `./src\\app.py` and `src/app.py` are the same path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelativePath(PathBuf);

impl RelativePath {
    /// Create a new relative path.
    ///
    /// # Panics
    /// Panics if the path is unsafe (use `try_new` for fallible).
    pub fn new(path: impl AsRef<str>) -> Self {
        let path = path.as_ref();
        match Self::try_new(path) {
            Ok(p) => p,
            Err(e) => panic!("invalid RelativePath {path:?}: {e}"),
        }
    }

    /// Fallible constructor.
    pub fn try_new(path: impl AsRef<str>) -> Result<Self, DomainError> {
        let raw = path.as_ref();
        let violation = |reason: &str| DomainError::PathSafetyViolation {
            path: raw.to_string(),
            reason: reason.to_string(),
        };

        let normalized = raw.trim().replace('\\', "/");
        if normalized.starts_with('/') {
            return Err(violation("absolute paths are not allowed"));
        }

        let mut clean = PathBuf::new();
        for component in Path::new(&normalized).components() {
            match component {
                Component::Normal(segment) => clean.push(segment),
                Component::CurDir => {}
                Component::ParentDir => return Err(violation("parent directory traversal")),
                Component::RootDir | Component::Prefix(_) => {
                    return Err(violation("absolute paths are not allowed"));
                }
            }
        }

        // `C:foo` is a plain segment on unix but a drive prefix on windows.
        if clean
            .components()
            .next()
            .and_then(|c| c.as_os_str().to_str())
            .is_some_and(|first| first.len() >= 2 && first.as_bytes()[1] == b':')
        {
            return Err(violation("drive prefixes are not allowed"));
        }

        if clean.as_os_str().is_empty() {
            return Err(violation("path is empty"));
        }

        Ok(Self(clean))
    }

    /// Join a segment, maintaining the invariant.
    pub fn join(&self, segment: &RelativePath) -> Self {
        Self(self.0.join(&segment.0))
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Forward-slash rendering, stable across platforms.
    pub fn to_slash_string(&self) -> String {
        self.0
            .components()
            .filter_map(|c| c.as_os_str().to_str())
            .collect::<Vec<_>>()
            .join("/")
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

impl AsRef<Path> for RelativePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl TryFrom<&str> for RelativePath {
    type Error = DomainError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::try_new(s)
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_slash_string())
    }
}

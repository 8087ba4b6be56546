//! Scaffold domain model.
//!
//! A scaffold is a named, static tree of starter files and directories that
//! can seed an output directory before generated content is written.
//!
//! ```text
//! ScaffoldName (closed enum, case-insensitive resolve)
//!   └── Vec<ScaffoldNode>
//!        ├── File(FileSpec)            path + content
//!        └── Directory(DirectorySpec)  path + children
//! ```
//!
//! Trees own their children exclusively and never change after construction.
//! Walking a tree is pure ([`walk`]); writing it is the materializer's job.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::{entities::common::RelativePath, error::DomainError};

// ============================================================================
// ScaffoldName
// ============================================================================

/// Every scaffold name the catalog knows about.
///
/// Not every name has a seeded tree; looking up an unseeded name yields an
/// empty tree, the same as "no scaffold".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaffoldName {
    Python,
    Web,
    DataScience,
    Flask,
    Django,
    FastApi,
    React,
    Vue,
    Default,
}

impl ScaffoldName {
    pub const ALL: [ScaffoldName; 9] = [
        Self::Python,
        Self::Web,
        Self::DataScience,
        Self::Flask,
        Self::Django,
        Self::FastApi,
        Self::React,
        Self::Vue,
        Self::Default,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Python => "python",
            Self::Web => "web",
            Self::DataScience => "data_science",
            Self::Flask => "flask",
            Self::Django => "django",
            Self::FastApi => "fastapi",
            Self::React => "react",
            Self::Vue => "vue",
            Self::Default => "default",
        }
    }

    pub const fn description(&self) -> &'static str {
        match self {
            Self::Python => "Python package with a src/ entry point",
            Self::Web => "Static HTML, CSS and JavaScript page",
            Self::DataScience => "Data science project",
            Self::Flask => "Flask web application",
            Self::Django => "Django web application",
            Self::FastApi => "FastAPI service",
            Self::React => "React front-end",
            Self::Vue => "Vue front-end",
            Self::Default => "No starter files",
        }
    }

    /// Resolve a user-supplied name, case-insensitively.
    ///
    /// Unknown names degrade to [`ScaffoldName::Default`] instead of failing.
    pub fn resolve(name: &str) -> Self {
        name.parse().unwrap_or(Self::Default)
    }
}

impl fmt::Display for ScaffoldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScaffoldName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|n| n.as_str() == lowered)
            .ok_or_else(|| DomainError::InvalidScaffold(format!("unknown scaffold: {s}")))
    }
}

// ============================================================================
// Tree nodes
// ============================================================================

/// A single node in a scaffold tree: either a file or a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScaffoldNode {
    File(FileSpec),
    Directory(DirectorySpec),
}

impl ScaffoldNode {
    /// File node from static content.
    ///
    /// # Panics
    /// Panics on an unsafe path. Meant for compiled-in seeds; use
    /// [`ScaffoldNode::try_file`] for anything loaded at runtime.
    pub fn file(path: &str, content: &'static str) -> Self {
        Self::File(FileSpec {
            path: RelativePath::new(path),
            content: TemplateSource::Static(content),
        })
    }

    /// Directory node from static children.
    ///
    /// # Panics
    /// Panics on an unsafe path.
    pub fn dir(path: &str, children: Vec<ScaffoldNode>) -> Self {
        Self::Directory(DirectorySpec {
            path: RelativePath::new(path),
            children,
        })
    }

    pub fn try_file(path: &str, content: String) -> Result<Self, DomainError> {
        Ok(Self::File(FileSpec {
            path: RelativePath::try_new(path)?,
            content: TemplateSource::Owned(content),
        }))
    }

    pub fn try_dir(path: &str, children: Vec<ScaffoldNode>) -> Result<Self, DomainError> {
        Ok(Self::Directory(DirectorySpec {
            path: RelativePath::try_new(path)?,
            children,
        }))
    }

    /// Path relative to the parent node (or the output root at top level).
    pub fn path(&self) -> &RelativePath {
        match self {
            Self::File(f) => &f.path,
            Self::Directory(d) => &d.path,
        }
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, Self::Directory(_))
    }

    /// File content; empty for directories.
    pub fn content(&self) -> &str {
        match self {
            Self::File(f) => f.content.as_str(),
            Self::Directory(_) => "",
        }
    }

    /// Child nodes; empty for files.
    pub fn children(&self) -> &[ScaffoldNode] {
        match self {
            Self::File(_) => &[],
            Self::Directory(d) => &d.children,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSpec {
    pub path: RelativePath,
    pub content: TemplateSource,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectorySpec {
    pub path: RelativePath,
    pub children: Vec<ScaffoldNode>,
}

/// Source of file content: compiled into the binary or loaded at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    Static(&'static str),
    Owned(String),
}

impl TemplateSource {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Static(s) => s,
            Self::Owned(s) => s,
        }
    }

    /// Quick check for `{{ ... }}` placeholders.
    pub fn contains_placeholder(&self) -> bool {
        self.as_str().contains("{{ ") && self.as_str().contains(" }}")
    }
}

// ============================================================================
// Traversal
// ============================================================================

/// One step of a depth-first walk: the node and its path from the root.
#[derive(Debug, Clone, Copy)]
pub struct WalkEntry<'a> {
    pub node: &'a ScaffoldNode,
    pub depth: usize,
}

/// Depth-first, pre-order walk yielding each node with its full path.
///
/// A directory always comes before its children, so callers can create it
/// before writing anything inside.
pub fn walk(nodes: &[ScaffoldNode]) -> Vec<(RelativePath, WalkEntry<'_>)> {
    let mut out = Vec::new();
    let mut stack: Vec<(Option<RelativePath>, &ScaffoldNode, usize)> =
        nodes.iter().rev().map(|n| (None, n, 0)).collect();

    while let Some((parent, node, depth)) = stack.pop() {
        let full = match &parent {
            Some(p) => p.join(node.path()),
            None => node.path().clone(),
        };
        for child in node.children().iter().rev() {
            stack.push((Some(full.clone()), child, depth + 1));
        }
        out.push((full, WalkEntry { node, depth }));
    }

    out
}

/// Count file nodes in a tree (directories excluded).
pub fn file_count(nodes: &[ScaffoldNode]) -> usize {
    walk(nodes)
        .iter()
        .filter(|(_, e)| !e.node.is_directory())
        .count()
}

/// Check that no two nodes resolve to the same full path.
pub fn validate_tree(nodes: &[ScaffoldNode]) -> Result<(), DomainError> {
    let mut seen = HashSet::new();
    for (path, _) in walk(nodes) {
        let key = path.to_slash_string();
        if !seen.insert(key.clone()) {
            return Err(DomainError::DuplicatePath { path: key });
        }
    }
    Ok(())
}

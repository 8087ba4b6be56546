//! Filesystem-based scaffold loader.
//!
//! Turns a directory of starter trees into scaffold nodes once, at startup.
//!
//! # Directory layout expected
//!
//! ```text
//! scaffolds/
//! ├── python/                 ← directory name is the scaffold name
//! │   ├── README.md
//! │   └── src/
//! │       └── main.py
//! └── my-flask/
//!     ├── scaffold.toml       ← optional manifest
//!     └── app.py
//! ```
//!
//! # `scaffold.toml` format
//!
//! ```toml
//! [scaffold]
//! name    = "flask"                         # optional; defaults to the directory name
//! exclude = ["__pycache__", ".DS_Store"]    # optional; entry names skipped while walking
//! ```
//!
//! Directories whose name is not a known scaffold, or whose content cannot be
//! read, are skipped with a `WARN` log rather than failing the whole load.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use scribe_core::domain::{DomainError, ScaffoldName, ScaffoldNode};

const MANIFEST_FILE: &str = "scaffold.toml";

// ── Manifest types ────────────────────────────────────────────────────────────

/// Deserialised representation of a `scaffold.toml` file.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ScaffoldManifest {
    #[serde(default)]
    pub scaffold: ScaffoldSection,
}

/// `[scaffold]` section.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ScaffoldSection {
    /// Scaffold this directory provides, e.g. `"flask"`.
    pub name: Option<String>,
    /// File or directory names to leave out, matched exactly at any depth.
    #[serde(default)]
    pub exclude: Vec<String>,
}

// ── Loader ────────────────────────────────────────────────────────────────────

/// Load every scaffold found in the immediate sub-directories of `dir`.
///
/// Results are sorted by directory name, so when two directories claim the
/// same scaffold the later one wins deterministically.
///
/// # Errors
///
/// Returns [`DomainError::InvalidScaffold`] if `dir` is missing or cannot be
/// listed.
#[instrument(skip_all, fields(dir = %dir.display()))]
pub fn load_scaffold_dir(dir: &Path) -> Result<Vec<(ScaffoldName, Vec<ScaffoldNode>)>, DomainError> {
    if !dir.is_dir() {
        return Err(DomainError::InvalidScaffold(format!(
            "scaffolds directory not found: {}",
            dir.display()
        )));
    }

    let read_dir = fs::read_dir(dir).map_err(|e| {
        DomainError::InvalidScaffold(format!(
            "failed to read scaffolds directory '{}': {e}",
            dir.display()
        ))
    })?;

    let mut candidates: Vec<PathBuf> = Vec::new();
    for entry in read_dir {
        let entry = entry.map_err(|e| {
            DomainError::InvalidScaffold(format!("failed to read directory entry: {e}"))
        })?;
        if entry.path().is_dir() {
            candidates.push(entry.path());
        }
    }
    candidates.sort();

    let mut loaded = Vec::new();
    for path in candidates {
        match load_one(&path) {
            Ok((name, nodes)) => {
                debug!(scaffold = %name, dir = %path.display(), "loaded scaffold");
                loaded.push((name, nodes));
            }
            Err(e) => {
                // One bad scaffold must not block the others.
                warn!(dir = %path.display(), error = %e, "skipping scaffold directory");
            }
        }
    }

    Ok(loaded)
}

fn load_one(dir: &Path) -> Result<(ScaffoldName, Vec<ScaffoldNode>), DomainError> {
    let manifest = read_manifest(dir)?;

    let dir_name = dir
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    let declared = manifest.scaffold.name.as_deref().unwrap_or(dir_name);
    let name: ScaffoldName = declared.parse()?;

    let nodes = build_tree(dir, &manifest.scaffold.exclude)?;
    Ok((name, nodes))
}

fn read_manifest(dir: &Path) -> Result<ScaffoldManifest, DomainError> {
    let path = dir.join(MANIFEST_FILE);
    if !path.is_file() {
        return Ok(ScaffoldManifest::default());
    }

    let raw = fs::read_to_string(&path).map_err(|e| {
        DomainError::InvalidScaffold(format!("failed to read '{}': {e}", path.display()))
    })?;
    toml::from_str(&raw).map_err(|e| {
        DomainError::InvalidScaffold(format!("failed to parse '{}': {e}", path.display()))
    })
}

/// A directory still collecting children while the walk is inside it.
struct OpenDir {
    depth: usize,
    name: String,
    children: Vec<ScaffoldNode>,
}

/// Walk `dir` in name order and rebuild the nested node tree.
///
/// `WalkDir` yields entries pre-order, so a directory stays open until an
/// entry at its own depth or shallower shows up.
fn build_tree(dir: &Path, exclude: &[String]) -> Result<Vec<ScaffoldNode>, DomainError> {
    let mut top: Vec<ScaffoldNode> = Vec::new();
    let mut open: Vec<OpenDir> = Vec::new();

    let walker = WalkDir::new(dir)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            let name = e.file_name().to_string_lossy();
            let is_manifest = e.depth() == 1 && name == MANIFEST_FILE;
            !is_manifest && !exclude.iter().any(|x| *x == name)
        });

    for entry in walker {
        let entry =
            entry.map_err(|e| DomainError::InvalidScaffold(format!("directory walk error: {e}")))?;
        close_dirs(&mut open, &mut top, entry.depth())?;

        let name = entry.file_name().to_string_lossy().into_owned();
        if entry.file_type().is_dir() {
            open.push(OpenDir {
                depth: entry.depth(),
                name,
                children: Vec::new(),
            });
        } else if entry.file_type().is_file() {
            let content = fs::read_to_string(entry.path()).map_err(|e| {
                DomainError::InvalidScaffold(format!(
                    "failed to read file '{}': {e}",
                    entry.path().display()
                ))
            })?;
            let node = ScaffoldNode::try_file(&name, content)?;
            match open.last_mut() {
                Some(parent) => parent.children.push(node),
                None => top.push(node),
            }
        }
        // Symlinks and special files are skipped.
    }

    close_dirs(&mut open, &mut top, 0)?;
    Ok(top)
}

/// Close every open directory at `depth` or deeper, attaching it to its parent.
fn close_dirs(
    open: &mut Vec<OpenDir>,
    top: &mut Vec<ScaffoldNode>,
    depth: usize,
) -> Result<(), DomainError> {
    while open.last().is_some_and(|d| d.depth >= depth) {
        let Some(done) = open.pop() else { break };
        let node = ScaffoldNode::try_dir(&done.name, done.children)?;
        match open.last_mut() {
            Some(parent) => parent.children.push(node),
            None => top.push(node),
        }
    }
    Ok(())
}

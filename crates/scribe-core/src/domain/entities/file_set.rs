use indexmap::IndexMap;
use serde::Serialize;

/// Ordered mapping from declared relative path to file content.
///
/// Order is first appearance in the source text. Re-inserting a path replaces
/// its content but keeps its original position, so the "first file" stays
/// stable for previews.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ExtractedFileSet {
    files: IndexMap<String, String>,
}

impl ExtractedFileSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace. Returns the previous content when the path was
    /// already present.
    pub fn insert(&mut self, path: impl Into<String>, content: impl Into<String>) -> Option<String> {
        self.files.insert(path.into(), content.into())
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.files.iter().map(|(p, c)| (p.as_str(), c.as_str()))
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    /// First file in source order.
    pub fn first(&self) -> Option<(&str, &str)> {
        self.files.first().map(|(p, c)| (p.as_str(), c.as_str()))
    }
}

impl<P: Into<String>, C: Into<String>> FromIterator<(P, C)> for ExtractedFileSet {
    fn from_iter<I: IntoIterator<Item = (P, C)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (p, c) in iter {
            set.insert(p, c);
        }
        set
    }
}

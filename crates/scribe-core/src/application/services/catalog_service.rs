//! Catalog Service - scaffold queries for listing and previews.
//!
//! Separated from GenerationService: nothing here writes to disk.

use std::sync::Arc;

use serde::Serialize;

use crate::{
    application::ports::ScaffoldCatalog,
    domain::{ScaffoldName, ScaffoldNode, file_count},
};

/// Information about a scaffold for display purposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScaffoldInfo {
    pub name: ScaffoldName,
    pub description: String,
    /// Whether the catalog holds a tree for this name.
    pub seeded: bool,
    pub file_count: usize,
}

/// Service for scaffold queries.
pub struct CatalogService {
    catalog: Arc<dyn ScaffoldCatalog>,
}

impl CatalogService {
    pub fn new(catalog: Arc<dyn ScaffoldCatalog>) -> Self {
        Self { catalog }
    }

    /// Every known scaffold name, seeded or not, in declaration order.
    pub fn available_scaffolds(&self) -> Vec<ScaffoldInfo> {
        ScaffoldName::ALL
            .into_iter()
            .map(|name| {
                let tree = self.catalog.lookup(name);
                ScaffoldInfo {
                    name,
                    description: name.description().to_string(),
                    seeded: !tree.is_empty(),
                    file_count: file_count(&tree),
                }
            })
            .collect()
    }

    /// The tree behind a name; empty when unseeded.
    pub fn tree(&self, name: ScaffoldName) -> Vec<ScaffoldNode> {
        self.catalog.lookup(name)
    }
}

//! Compiled-in scaffold catalog.
//!
//! Seeded once at construction with the scaffolds that ship with Scribe.
//! Extra trees can be layered on at startup from a scaffolds directory
//! ([`BuiltinCatalog::extend_from_dir`]); after that the catalog is only
//! read.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::{debug, info, instrument};

use scribe_core::{
    application::ports::ScaffoldCatalog,
    domain::{DomainError, ScaffoldName, ScaffoldNode, validate_tree},
};

use crate::catalog::loader::load_scaffold_dir;

/// Read-only scaffold registry.
#[derive(Debug, Clone)]
pub struct BuiltinCatalog {
    entries: BTreeMap<ScaffoldName, Vec<ScaffoldNode>>,
}

impl BuiltinCatalog {
    /// Catalog with every built-in seed.
    pub fn new() -> Self {
        let entries = BTreeMap::from([
            (ScaffoldName::Python, seeds::python()),
            (ScaffoldName::Web, seeds::web()),
            (ScaffoldName::Flask, seeds::flask()),
            (ScaffoldName::FastApi, seeds::fastapi()),
        ]);
        Self { entries }
    }

    /// Catalog with no trees at all.
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Add or replace one tree. Startup only.
    pub fn with_scaffold(
        mut self,
        name: ScaffoldName,
        nodes: Vec<ScaffoldNode>,
    ) -> Result<Self, DomainError> {
        validate_tree(&nodes)?;
        self.entries.insert(name, nodes);
        Ok(self)
    }

    /// Layer every scaffold found under `dir` over the current entries.
    ///
    /// A tree loaded from disk replaces a built-in tree of the same name.
    #[instrument(skip_all, fields(dir = %dir.display()))]
    pub fn extend_from_dir(mut self, dir: &Path) -> Result<Self, DomainError> {
        let loaded = load_scaffold_dir(dir)?;
        info!(count = loaded.len(), "Loaded scaffolds from disk");

        for (name, nodes) in loaded {
            debug!(scaffold = %name, "Registering scaffold from disk");
            self = self.with_scaffold(name, nodes)?;
        }
        Ok(self)
    }
}

impl Default for BuiltinCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl ScaffoldCatalog for BuiltinCatalog {
    fn lookup(&self, name: ScaffoldName) -> Vec<ScaffoldNode> {
        self.entries.get(&name).cloned().unwrap_or_default()
    }

    fn seeded(&self) -> Vec<ScaffoldName> {
        self.entries
            .iter()
            .filter(|(_, nodes)| !nodes.is_empty())
            .map(|(name, _)| *name)
            .collect()
    }
}

mod seeds {
    use scribe_core::domain::ScaffoldNode as N;

    pub fn python() -> Vec<N> {
        vec![
            N::file("requirements.txt", "# Python dependencies\n"),
            N::file("README.md", "# Python Project\n\nA new Python project."),
            N::dir(
                "src",
                vec![
                    N::file("__init__.py", ""),
                    N::file(
                        "main.py",
                        "def main():\n    print(\"Hello, World!\")\n\nif __name__ == \"__main__\":\n    main()",
                    ),
                ],
            ),
        ]
    }

    pub fn web() -> Vec<N> {
        vec![
            N::file(
                "index.html",
                "<!DOCTYPE html>\n<html>\n<head>\n    <title>Web Project</title>\n    \
                 <link rel=\"stylesheet\" href=\"styles.css\">\n</head>\n<body>\n    \
                 <h1>Welcome to My Web Project</h1>\n    <script src=\"app.js\"></script>\n\
                 </body>\n</html>",
            ),
            N::file(
                "styles.css",
                "body { font-family: Arial, sans-serif; margin: 0; padding: 20px; }",
            ),
            N::file(
                "app.js",
                "// Your JavaScript code here\nconsole.log('Hello, Web!');",
            ),
        ]
    }

    pub fn flask() -> Vec<N> {
        vec![
            N::file("requirements.txt", "flask>=3.0\n"),
            N::file("README.md", "# {{ project_name }}\n\nA Flask application.\n"),
            N::file(
                "app.py",
                "from flask import Flask\n\napp = Flask(__name__)\n\n\n@app.route(\"/\")\n\
                 def index():\n    return {\"name\": \"{{ project_name }}\"}\n\n\n\
                 if __name__ == \"__main__\":\n    app.run(debug=True)\n",
            ),
            N::dir("templates", vec![]),
            N::dir("static", vec![]),
        ]
    }

    pub fn fastapi() -> Vec<N> {
        vec![
            N::file("requirements.txt", "fastapi>=0.110\nuvicorn[standard]>=0.29\n"),
            N::file("README.md", "# {{ project_name }}\n\nA FastAPI service.\n"),
            N::dir(
                "app",
                vec![
                    N::file("__init__.py", ""),
                    N::file(
                        "main.py",
                        "from fastapi import FastAPI\n\napp = FastAPI(title=\"{{ project_name }}\")\n\n\n\
                         @app.get(\"/health\")\ndef health():\n    return {\"status\": \"ok\"}\n",
                    ),
                ],
            ),
        ]
    }
}

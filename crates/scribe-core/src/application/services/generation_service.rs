//! Generation Service - main application orchestrator.
//!
//! This service coordinates one generation run:
//! 1. Seed the output directory from a scaffold (best effort, never clobbers)
//! 2. Extract fenced blocks from the raw response
//! 3. Write the extracted files (always overwrite)
//! 4. Report the outcome as a [`GenerationManifest`]
//!
//! Failures never escape as `Err`: every run ends in a manifest, successful
//! or not.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Local;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use crate::{
    application::{
        services::materializer::TreeMaterializer,
        ports::{CompletionRequest, Filesystem, ScaffoldCatalog, TextProvider},
    },
    domain::{
        GenerationContext, GenerationManifest, GenerationParameters, SYSTEM_PROMPT, ScaffoldName,
        WritePolicy, compose_user_prompt, extract,
    },
    error::ScribeResult,
};

/// Stages a single run passes through. Each call starts at `Start` and ends
/// in `Done` or `Failed`; nothing carries over between calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Start,
    ScaffoldPass,
    ExtractPass,
    WritePass,
    Done,
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Start => "start",
            Self::ScaffoldPass => "scaffold-pass",
            Self::ExtractPass => "extract-pass",
            Self::WritePass => "write-pass",
            Self::Done => "done",
            Self::Failed => "failed",
        })
    }
}

/// Everything needed for a prompt-driven run.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptRequest {
    pub prompt: String,
    pub output_root: PathBuf,
    pub scaffold: Option<ScaffoldName>,
    pub context: GenerationContext,
    pub parameters: GenerationParameters,
}

impl PromptRequest {
    pub fn new(prompt: impl Into<String>, output_root: impl Into<PathBuf>) -> Self {
        Self {
            prompt: prompt.into(),
            output_root: output_root.into(),
            scaffold: None,
            context: GenerationContext::new(),
            parameters: GenerationParameters::default(),
        }
    }

    pub fn with_scaffold(mut self, scaffold: Option<ScaffoldName>) -> Self {
        self.scaffold = scaffold;
        self
    }

    pub fn with_context(mut self, context: GenerationContext) -> Self {
        self.context = context;
        self
    }

    pub fn with_parameters(mut self, parameters: GenerationParameters) -> Self {
        self.parameters = parameters;
        self
    }

    /// The provider request this run will send.
    pub fn completion_request(&self) -> CompletionRequest {
        CompletionRequest::new(compose_user_prompt(&self.prompt, self.scaffold, &self.context))
            .with_system_prompt(SYSTEM_PROMPT)
            .with_parameters(self.parameters.clone())
    }
}

/// Main generation service.
///
/// Holds the scaffold catalog (shared, read-only) and the filesystem port.
/// Stateless between calls; callers pick a fresh output root per run, see
/// [`fresh_project_dir`].
pub struct GenerationService {
    catalog: Arc<dyn ScaffoldCatalog>,
    filesystem: Box<dyn Filesystem>,
}

impl GenerationService {
    pub fn new(catalog: Arc<dyn ScaffoldCatalog>, filesystem: Box<dyn Filesystem>) -> Self {
        Self {
            catalog,
            filesystem,
        }
    }

    pub fn materializer(&self) -> TreeMaterializer<'_> {
        TreeMaterializer::new(self.filesystem.as_ref())
    }

    /// Run the full pipeline on a raw model response.
    #[instrument(
        skip_all,
        fields(
            root = %root.display(),
            scaffold = scaffold.map(|s| s.as_str()).unwrap_or("none"),
        )
    )]
    pub fn generate(
        &self,
        raw_text: &str,
        root: &Path,
        scaffold: Option<ScaffoldName>,
        context: &GenerationContext,
    ) -> GenerationManifest {
        debug!(stage = %Stage::Start, bytes = raw_text.len(), "Generation started");

        if let Some(name) = scaffold {
            debug!(stage = %Stage::ScaffoldPass, "Seeding from scaffold");
            match self.scaffold(name, root, context, WritePolicy::SkipExisting) {
                Ok(seeded) => debug!(files = seeded.len(), "Scaffold pass finished"),
                Err(e) => warn!(error = %e, "Scaffold pass failed, continuing without it"),
            }
        }

        debug!(stage = %Stage::ExtractPass, "Extracting fenced blocks");
        let files = extract(raw_text);
        if files.is_empty() {
            info!("Response contained no fenced blocks");
        }

        debug!(stage = %Stage::WritePass, files = files.len(), "Writing generated files");
        match self
            .materializer()
            .materialize_files(&files, root, WritePolicy::Overwrite)
        {
            Ok(written) => {
                debug!(stage = %Stage::Done, "Generation finished");
                info!(files = written.len(), "Generated files written");
                GenerationManifest::success(written, raw_text, scaffold)
            }
            Err(e) => {
                error!(stage = %Stage::Failed, error = %e, "Write pass failed");
                GenerationManifest::failure(e.to_string(), raw_text, scaffold)
            }
        }
    }

    /// Compose a prompt, ask the provider once, and run [`generate`] on the
    /// answer.
    ///
    /// A provider failure ends the run before anything touches the disk.
    ///
    /// [`generate`]: GenerationService::generate
    #[instrument(skip_all, fields(root = %request.output_root.display(), model = %request.parameters.model))]
    pub fn generate_from_prompt(
        &self,
        provider: &dyn TextProvider,
        request: &PromptRequest,
    ) -> GenerationManifest {
        let completion = request.completion_request();
        debug!(prompt_bytes = completion.prompt.len(), "Requesting completion");

        match provider.produce_text(&completion) {
            Ok(raw) => self.generate(&raw, &request.output_root, request.scaffold, &request.context),
            Err(e) => {
                error!(stage = %Stage::Failed, error = %e, "Provider failed");
                GenerationManifest::failure(e.to_string(), "", request.scaffold)
            }
        }
    }

    /// Materialize one scaffold on its own.
    ///
    /// An unseeded name writes nothing but still creates the root.
    #[instrument(skip_all, fields(scaffold = %name, root = %root.display()))]
    pub fn scaffold(
        &self,
        name: ScaffoldName,
        root: &Path,
        context: &GenerationContext,
        policy: WritePolicy,
    ) -> ScribeResult<Vec<PathBuf>> {
        let tree = self.catalog.lookup(name);
        if tree.is_empty() {
            debug!("Scaffold has no seeded tree");
        }
        self.materializer()
            .materialize_tree(&tree, root, context, policy)
    }
}

/// A unique directory under `base` for one run:
/// `base/project_<YYYYmmdd_HHMMSS>_<8 hex>`.
///
/// The timestamp keeps runs sortable; the random suffix keeps two runs in the
/// same second apart.
pub fn fresh_project_dir(base: &Path) -> PathBuf {
    let stamp = Local::now().format("%Y%m%d_%H%M%S");
    let id = Uuid::new_v4().simple().to_string();
    base.join(format!("project_{stamp}_{}", &id[..8]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ApplicationError;
    use crate::application::ports::{MockFilesystem, MockScaffoldCatalog, MockTextProvider};
    use crate::domain::ScaffoldNode;

    fn accepting_fs() -> MockFilesystem {
        let mut fs = MockFilesystem::new();
        fs.expect_absolutize()
            .returning(|p| Ok(Path::new("/abs").join(p)));
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_exists().return_const(false);
        fs.expect_write_file().returning(|_, _| Ok(()));
        fs
    }

    fn empty_catalog() -> Arc<dyn ScaffoldCatalog> {
        let mut catalog = MockScaffoldCatalog::new();
        catalog.expect_lookup().returning(|_| Vec::new());
        catalog.expect_seeded().returning(Vec::new);
        Arc::new(catalog)
    }

    #[test]
    fn provider_failure_writes_nothing() {
        let mut fs = MockFilesystem::new();
        fs.expect_absolutize().never();
        fs.expect_create_dir_all().never();
        fs.expect_write_file().never();

        let mut provider = MockTextProvider::new();
        provider.expect_produce_text().times(1).returning(|_| {
            Err(ApplicationError::ProviderError {
                reason: "rate limited".into(),
            }
            .into())
        });

        let service = GenerationService::new(empty_catalog(), Box::new(fs));
        let manifest = service.generate_from_prompt(&provider, &PromptRequest::new("x", "out"));

        assert!(!manifest.success);
        assert!(manifest.written_paths.is_empty());
        assert_eq!(manifest.raw_response, "");
        assert!(manifest.error_message.unwrap().contains("rate limited"));
    }

    #[test]
    fn provider_receives_composed_prompt() {
        let mut provider = MockTextProvider::new();
        provider
            .expect_produce_text()
            .withf(|req| {
                req.system_prompt.as_deref() == Some(SYSTEM_PROMPT)
                    && req.prompt.contains("Use the web template")
                    && req.prompt.ends_with("landing page")
                    && req.parameters.max_tokens == 8000
            })
            .times(1)
            .returning(|_| Ok("```\nindex.html:\n<p>hi</p>\n```".into()));

        let mut catalog = MockScaffoldCatalog::new();
        catalog.expect_lookup().returning(|_| Vec::new());

        let request = PromptRequest::new("landing page", "out")
            .with_scaffold(Some(ScaffoldName::Web))
            .with_parameters(GenerationParameters {
                max_tokens: 50_000,
                ..Default::default()
            });
        let service = GenerationService::new(Arc::new(catalog), Box::new(accepting_fs()));
        let manifest = service.generate_from_prompt(&provider, &request);

        assert!(manifest.success);
        assert_eq!(manifest.file_count, 1);
        assert_eq!(manifest.scaffold, Some(ScaffoldName::Web));
    }

    #[test]
    fn scaffold_failure_is_not_fatal() {
        let mut catalog = MockScaffoldCatalog::new();
        catalog
            .expect_lookup()
            .returning(|_| vec![ScaffoldNode::file("README.md", "# seed")]);

        let mut fs = MockFilesystem::new();
        fs.expect_absolutize()
            .returning(|p| Ok(Path::new("/abs").join(p)));
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_exists().return_const(false);
        fs.expect_write_file().returning(|path, _| {
            if path.ends_with("README.md") {
                Err(ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "disk full".into(),
                }
                .into())
            } else {
                Ok(())
            }
        });

        let service = GenerationService::new(Arc::new(catalog), Box::new(fs));
        let manifest = service.generate(
            "```\nmain.py:\nprint(1)\n```",
            Path::new("run"),
            Some(ScaffoldName::Python),
            &GenerationContext::new(),
        );

        assert!(manifest.success);
        assert_eq!(manifest.written_paths, vec![PathBuf::from("/abs/run/main.py")]);
    }

    #[test]
    fn unsafe_path_fails_the_run_with_empty_paths() {
        let service = GenerationService::new(empty_catalog(), Box::new(accepting_fs()));
        let manifest = service.generate(
            "```\nok.py:\n1\n```\n```\n../../etc/passwd:\nroot\n```",
            Path::new("run"),
            None,
            &GenerationContext::new(),
        );

        assert!(!manifest.success);
        assert_eq!(manifest.file_count, 0);
        assert!(manifest.written_paths.is_empty());
        assert!(manifest.error_message.unwrap().contains("etc/passwd"));
        assert!(manifest.raw_response.contains("passwd"));
    }

    #[test]
    fn no_scaffold_means_no_catalog_lookup() {
        let mut catalog = MockScaffoldCatalog::new();
        catalog.expect_lookup().never();

        let service = GenerationService::new(Arc::new(catalog), Box::new(accepting_fs()));
        let manifest = service.generate("no fences", Path::new("run"), None, &GenerationContext::new());

        assert!(manifest.success);
        assert_eq!(manifest.file_count, 0);
    }

    #[test]
    fn fresh_dirs_are_unique_and_prefixed() {
        let base = Path::new("/tmp/out");
        let a = fresh_project_dir(base);
        let b = fresh_project_dir(base);

        assert_ne!(a, b);
        assert_eq!(a.parent(), Some(base));
        let name = a.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("project_"));
        assert_eq!(name.len(), "project_".len() + 15 + 1 + 8);
    }
}

//! Replay provider: answers every request with a recorded response.
//!
//! Stands in for a network-backed model client. The response comes from a
//! string held in memory or from a file read at call time.

use std::fs;
use std::path::PathBuf;

use tracing::{debug, instrument};

use scribe_core::{
    application::{
        ApplicationError,
        ports::{CompletionRequest, TextProvider},
    },
    error::ScribeResult,
};

#[derive(Debug, Clone, PartialEq, Eq)]
enum ReplaySource {
    Text(String),
    File(PathBuf),
}

/// [`TextProvider`] that ignores the prompt and returns a fixed response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayProvider {
    source: ReplaySource,
}

impl ReplayProvider {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            source: ReplaySource::Text(text.into()),
        }
    }

    /// Read the response from `path` on every call.
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            source: ReplaySource::File(path.into()),
        }
    }
}

impl TextProvider for ReplayProvider {
    #[instrument(skip_all, fields(model = %request.parameters.model))]
    fn produce_text(&self, request: &CompletionRequest) -> ScribeResult<String> {
        debug!(prompt_bytes = request.prompt.len(), "Replaying recorded response");

        match &self.source {
            ReplaySource::Text(text) => Ok(text.clone()),
            ReplaySource::File(path) => fs::read_to_string(path).map_err(|e| {
                ApplicationError::ProviderError {
                    reason: format!("cannot read recorded response {}: {e}", path.display()),
                }
                .into()
            }),
        }
    }
}

//! Domain value objects: WritePolicy, GenerationParameters, known models.
//!
//! Pure value types with string forms and `FromStr` parsers. No I/O.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

// ── WritePolicy ──────────────────────────────────────────────────────────────

/// What to do when a target file already exists.
///
/// A missing target is always written, whatever the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WritePolicy {
    /// Replace the existing file.
    #[default]
    Overwrite,
    /// Leave the existing file alone and do not report it as written.
    SkipExisting,
    /// Abort the whole materialization with a collision error.
    FailIfExists,
}

impl WritePolicy {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Overwrite => "overwrite",
            Self::SkipExisting => "skip",
            Self::FailIfExists => "fail",
        }
    }
}

impl fmt::Display for WritePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WritePolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "overwrite" | "force" => Ok(Self::Overwrite),
            "skip" | "skip-existing" | "skip_existing" => Ok(Self::SkipExisting),
            "fail" | "fail-if-exists" | "fail_if_exists" => Ok(Self::FailIfExists),
            other => Err(DomainError::InvalidParameter {
                name: "policy",
                reason: format!("unknown write policy: {other}"),
            }),
        }
    }
}

// ── GenerationParameters ─────────────────────────────────────────────────────

pub const DEFAULT_MODEL: &str = "openai/gpt-4";
pub const MAX_STOP_SEQUENCES: usize = 4;

/// Sampling parameters forwarded to the text provider.
///
/// Values outside the accepted ranges are clamped, never rejected; see
/// [`GenerationParameters::clamped`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationParameters {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
    pub stop_sequences: Vec<String>,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.7,
            max_tokens: 2048,
            top_p: 1.0,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
            stop_sequences: Vec::new(),
        }
    }
}

impl GenerationParameters {
    /// Bring every field into its accepted range.
    ///
    /// | Field | Range |
    /// |-------|-------|
    /// | temperature | 0.1 ..= 1.0 |
    /// | max_tokens | 100 ..= 8000 |
    /// | top_p | 0.1 ..= 1.0 |
    /// | penalties | -2.0 ..= 2.0 |
    /// | stop_sequences | first 4 |
    ///
    /// NaN falls back to the default for that field. A blank model name
    /// becomes [`DEFAULT_MODEL`].
    pub fn clamped(mut self) -> Self {
        let defaults = Self::default();

        self.temperature = clamp_f32(self.temperature, 0.1, 1.0, defaults.temperature);
        self.max_tokens = self.max_tokens.clamp(100, 8000);
        self.top_p = clamp_f32(self.top_p, 0.1, 1.0, defaults.top_p);
        self.frequency_penalty = clamp_f32(self.frequency_penalty, -2.0, 2.0, 0.0);
        self.presence_penalty = clamp_f32(self.presence_penalty, -2.0, 2.0, 0.0);
        self.stop_sequences.truncate(MAX_STOP_SEQUENCES);

        if self.model.trim().is_empty() {
            self.model = defaults.model;
        }

        self
    }
}

fn clamp_f32(value: f32, min: f32, max: f32, fallback: f32) -> f32 {
    if value.is_nan() {
        fallback
    } else {
        value.clamp(min, max)
    }
}

// ── Known models ─────────────────────────────────────────────────────────────

/// A model identifier with a display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModelInfo {
    pub id: &'static str,
    pub label: &'static str,
}

/// Models offered for selection. Display only; any id is accepted.
pub const KNOWN_MODELS: &[ModelInfo] = &[
    ModelInfo {
        id: "openai/gpt-4",
        label: "GPT-4 (Most Capable)",
    },
    ModelInfo {
        id: "mistralai/mixtral-8x7b-instruct",
        label: "Mixtral (Fast & Free)",
    },
    ModelInfo {
        id: "google/gemini-pro",
        label: "Gemini Pro (Good Balance)",
    },
    ModelInfo {
        id: "anthropic/claude-2",
        label: "Claude 2 (Helpful & Detailed)",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_parses_short_and_long_forms() {
        assert_eq!("skip".parse::<WritePolicy>().unwrap(), WritePolicy::SkipExisting);
        assert_eq!(
            "FAIL_IF_EXISTS".parse::<WritePolicy>().unwrap(),
            WritePolicy::FailIfExists
        );
        assert_eq!("overwrite".parse::<WritePolicy>().unwrap(), WritePolicy::Overwrite);
        assert!("merge".parse::<WritePolicy>().is_err());
    }

    #[test]
    fn policy_display_round_trips() {
        for p in [
            WritePolicy::Overwrite,
            WritePolicy::SkipExisting,
            WritePolicy::FailIfExists,
        ] {
            assert_eq!(p.to_string().parse::<WritePolicy>().unwrap(), p);
        }
    }

    #[test]
    fn defaults_are_already_in_range() {
        let d = GenerationParameters::default();
        assert_eq!(d.clone().clamped(), d);
    }

    #[test]
    fn clamps_out_of_range_values() {
        let p = GenerationParameters {
            model: "  ".into(),
            temperature: 3.0,
            max_tokens: 10,
            top_p: 0.0,
            frequency_penalty: -9.0,
            presence_penalty: f32::NAN,
            stop_sequences: (0..6).map(|i| i.to_string()).collect(),
        }
        .clamped();

        assert_eq!(p.model, DEFAULT_MODEL);
        assert_eq!(p.temperature, 1.0);
        assert_eq!(p.max_tokens, 100);
        assert_eq!(p.top_p, 0.1);
        assert_eq!(p.frequency_penalty, -2.0);
        assert_eq!(p.presence_penalty, 0.0);
        assert_eq!(p.stop_sequences.len(), MAX_STOP_SEQUENCES);
    }

    #[test]
    fn max_tokens_upper_bound() {
        let p = GenerationParameters {
            max_tokens: 100_000,
            ..Default::default()
        }
        .clamped();
        assert_eq!(p.max_tokens, 8000);
    }

    #[test]
    fn known_models_include_the_default() {
        assert!(KNOWN_MODELS.iter().any(|m| m.id == DEFAULT_MODEL));
    }
}

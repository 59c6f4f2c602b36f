//! Routing classifier adapters

pub mod local;
pub mod stub;

pub use local::{LocalClassifier, LocalClassifierOptions};
pub use stub::StubClassifier;

use serde::{Deserialize, Serialize};

/// Output token budget used when none is configured
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

/// Request timeout used when none is configured
pub const DEFAULT_TIMEOUT_SECS: u64 = 45;

/// Inference parameters as supplied by the caller
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InferenceConfig {
    /// Maximum output tokens
    #[serde(default)]
    pub max_tokens: Option<u32>,
    /// Sampling temperature
    #[serde(default)]
    pub temperature: Option<f64>,
    /// Nucleus sampling probability
    #[serde(default)]
    pub top_p: Option<f64>,
    /// Sequences that end generation
    #[serde(default)]
    pub stop_sequences: Option<Vec<String>>,
}

/// Inference parameters after defaults are applied.
///
/// Unset optional values are left for the inference server to decide.
#[derive(Debug, Clone, PartialEq)]
pub struct InferenceParams {
    pub max_tokens: u32,
    pub temperature: Option<f64>,
    pub top_p: Option<f64>,
    pub stop_sequences: Option<Vec<String>>,
}

impl InferenceParams {
    pub fn from_config(config: Option<&InferenceConfig>) -> Self {
        let config = config.cloned().unwrap_or_default();

        Self {
            max_tokens: config.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            temperature: config.temperature,
            top_p: config.top_p,
            stop_sequences: config.stop_sequences,
        }
    }
}

impl Default for InferenceParams {
    fn default() -> Self {
        Self::from_config(None)
    }
}

//! LLM backend abstraction.
//!
//! A backend performs exactly one network attempt; timeouts, retries and
//! admission control live in [`ModelClient`](crate::client::ModelClient).

use crate::error::LlmError;
use crate::prompt::GenerationPrompt;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Sampling temperature sent with every generation request.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Output token cap sent with every generation request.
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 1200;

/// A request to an LLM.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmRequest {
    /// The user prompt.
    pub prompt: String,
    /// System prompt.
    pub system: String,
    /// Temperature for sampling (0.0 - 1.0).
    pub temperature: f32,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
}

impl LlmRequest {
    /// Creates a request with the default generation parameters.
    #[must_use]
    pub fn new(system: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            system: system.into(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }
}

impl From<&GenerationPrompt> for LlmRequest {
    fn from(prompt: &GenerationPrompt) -> Self {
        Self::new(prompt.system.clone(), prompt.user.clone())
    }
}

/// Response envelope of a `generateContent` call.
///
/// Every level is optional on the wire; missing pieces decode as empty so
/// the extractor can report them instead of the decoder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// One generated alternative.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

/// Content of a candidate, split into parts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// A single piece of generated content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: Option<String>,
}

impl GenerateContentResponse {
    /// Builds a single-candidate response whose only part is `text`.
    #[must_use]
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            candidates: vec![Candidate {
                content: Some(Content {
                    parts: vec![Part {
                        text: Some(text.into()),
                    }],
                }),
            }],
        }
    }
}

/// Trait for LLM backends.
#[async_trait]
pub trait LlmBackend: Send + Sync {
    /// Performs a single generation attempt.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport fails, the endpoint answers with a
    /// non-2xx status, or the envelope cannot be decoded.
    async fn generate(&self, request: &LlmRequest) -> Result<GenerateContentResponse, LlmError>;

    /// Returns true if a credential is available.
    fn is_configured(&self) -> bool;

    /// Returns the model name.
    fn model(&self) -> &str;
}

//! Gemini `generateContent` backend.

use crate::backend::{GenerateContentResponse, LlmBackend, LlmRequest};
use crate::error::LlmError;
use async_trait::async_trait;
use reqwest::Url;
use serde::Serialize;
use tracing::{debug, instrument};

/// Default `generateContent` endpoint.
pub const DEFAULT_GEMINI_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent";

/// Configuration for the Gemini backend.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// Full `generateContent` URL.
    pub endpoint: String,
    /// API key, passed as the `key` query parameter.
    pub api_key: Option<String>,
}

impl GeminiConfig {
    /// Creates a configuration for the default endpoint.
    #[must_use]
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            endpoint: DEFAULT_GEMINI_ENDPOINT.to_string(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
        }
    }

    /// Overrides the endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentBody<'a> {
    contents: [WireContent<'a>; 2],
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct WireContent<'a> {
    role: &'static str,
    parts: [WirePart<'a>; 1],
}

#[derive(Debug, Serialize)]
struct WirePart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

impl<'a> GenerateContentBody<'a> {
    fn from_request(request: &'a LlmRequest) -> Self {
        Self {
            contents: [
                WireContent {
                    role: "system",
                    parts: [WirePart {
                        text: &request.system,
                    }],
                },
                WireContent {
                    role: "user",
                    parts: [WirePart {
                        text: &request.prompt,
                    }],
                },
            ],
            generation_config: GenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_tokens,
            },
        }
    }
}

/// Gemini backend over HTTP.
#[derive(Debug, Clone)]
pub struct GeminiBackend {
    http: reqwest::Client,
    endpoint: Url,
    model: String,
    api_key: Option<String>,
}

impl GeminiBackend {
    /// Creates a backend with a fresh HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::InvalidConfig`] if the endpoint is not an absolute
    /// HTTP(S) URL.
    pub fn new(config: GeminiConfig) -> Result<Self, LlmError> {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Creates a backend sharing an existing HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::InvalidConfig`] if the endpoint is not an absolute
    /// HTTP(S) URL.
    pub fn with_client(http: reqwest::Client, config: GeminiConfig) -> Result<Self, LlmError> {
        let invalid = |reason: String| LlmError::InvalidConfig {
            reason: format!("invalid endpoint '{}': {reason}", config.endpoint),
        };
        let endpoint = Url::parse(&config.endpoint).map_err(|e| invalid(e.to_string()))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme '{}'", endpoint.scheme())));
        }

        let model = endpoint
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .and_then(|last| last.split(':').next())
            .filter(|name| !name.is_empty())
            .unwrap_or("unknown")
            .to_string();

        Ok(Self {
            http,
            endpoint,
            model,
            api_key: config.api_key,
        })
    }
}

#[async_trait]
impl LlmBackend for GeminiBackend {
    #[instrument(skip(self, request), fields(model = %self.model))]
    async fn generate(&self, request: &LlmRequest) -> Result<GenerateContentResponse, LlmError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(LlmError::Unconfigured);
        };

        let response = self
            .http
            .post(self.endpoint.clone())
            .query(&[("key", api_key)])
            .json(&GenerateContentBody::from_request(request))
            .send()
            .await
            .map_err(|e| LlmError::RequestFailed {
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LlmError::UnexpectedStatus {
                status: status.as_u16(),
            });
        }

        let envelope = response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| LlmError::ResponseParseFailed {
                reason: e.to_string(),
            })?;

        debug!(
            candidates = envelope.candidates.len(),
            "received generation response"
        );
        Ok(envelope)
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    fn model(&self) -> &str {
        &self.model
    }
}

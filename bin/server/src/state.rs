//! Shared application state.

use crate::config::ServerConfig;
use std::sync::Arc;
use study_assistant_ai::{GeminiBackend, LlmError, ModelClient, RateLimiter, StudyContentGenerator};
use study_assistant_encyclopedia::{EncyclopediaClient, SummarySource};

/// State shared by every request handler.
pub struct AppState {
    /// Encyclopedia summaries.
    pub summaries: Arc<dyn SummarySource>,
    /// Study content generation.
    pub generator: StudyContentGenerator,
}

impl AppState {
    /// Creates a new application state.
    #[must_use]
    pub fn new(summaries: Arc<dyn SummarySource>, generator: StudyContentGenerator) -> Self {
        Self {
            summaries,
            generator,
        }
    }

    /// Wires the production components from configuration.
    ///
    /// Both clients share one HTTP connection pool.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::InvalidConfig`] if the model endpoint is not a
    /// usable URL.
    pub fn from_config(config: &ServerConfig) -> Result<Self, LlmError> {
        let http = reqwest::Client::new();

        let backend = GeminiBackend::with_client(http.clone(), config.gemini())?;
        let client = ModelClient::with_policy(
            Arc::new(backend),
            RateLimiter::new(config.rate_limit()),
            config.call_policy(),
        );
        let summaries = EncyclopediaClient::with_client(http, config.encyclopedia());

        Ok(Self::new(Arc::new(summaries), StudyContentGenerator::new(client)))
    }
}

//! Study content generation with offline fallback.

use crate::client::ModelClient;
use crate::error::LlmError;
use crate::extract::extract_text;
use crate::fallback::build_fallback;
use crate::prompt::build_prompt;
use crate::schema::validate;
use serde_json::Value as JsonValue;
use study_assistant_core::{GenerationId, StudyContent, StudyRequest};
use tracing::{info, instrument, warn};

/// Produces study material for a request, from the model when possible.
#[derive(Clone)]
pub struct StudyContentGenerator {
    client: ModelClient,
}

impl StudyContentGenerator {
    /// Creates a generator on top of a model client.
    #[must_use]
    pub fn new(client: ModelClient) -> Self {
        Self { client }
    }

    /// Generates study content for the request.
    ///
    /// Rate limiting, a missing credential, upstream failures, empty or
    /// malformed output and schema violations all produce fallback content
    /// built from the request's source text.
    ///
    /// # Errors
    ///
    /// Returns the underlying error only when it is not recoverable, which
    /// means the model backend itself is misconfigured.
    #[instrument(
        skip_all,
        fields(
            generation_id = %GenerationId::new(),
            topic = %request.topic,
            mode = %request.mode,
        )
    )]
    pub async fn generate_study_content(
        &self,
        request: &StudyRequest,
    ) -> Result<StudyContent, LlmError> {
        match self.ask_model(request).await {
            Ok(content) => {
                info!("generated study content from model");
                Ok(content)
            }
            Err(error) if error.is_recoverable() => {
                warn!(kind = %error.kind(), reason = %error, "using fallback study content");
                Ok(build_fallback(
                    &request.topic,
                    &request.source_text,
                    request.mode,
                ))
            }
            Err(error) => Err(error),
        }
    }

    async fn ask_model(&self, request: &StudyRequest) -> Result<StudyContent, LlmError> {
        let prompt = build_prompt(request.mode, &request.topic, &request.source_text);
        let response = self.client.call(&prompt).await?;
        let text = extract_text(&response)?;

        let value: JsonValue =
            serde_json::from_str(&text).map_err(|e| LlmError::MalformedJson {
                reason: e.to_string(),
            })?;

        Ok(validate(request.mode, &value)?)
    }
}

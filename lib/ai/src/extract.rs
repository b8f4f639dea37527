//! Pulls the generated text out of a response envelope.

use crate::backend::GenerateContentResponse;
use crate::error::LlmError;

/// Returns the concatenated, trimmed text of the first candidate.
///
/// # Errors
///
/// Returns [`LlmError::EmptyResponse`] if there is no candidate or the
/// candidate's text is empty after trimming.
pub fn extract_text(response: &GenerateContentResponse) -> Result<String, LlmError> {
    let Some(candidate) = response.candidates.first() else {
        return Err(LlmError::EmptyResponse {
            reason: "no candidates".to_string(),
        });
    };

    let text: String = candidate
        .content
        .iter()
        .flat_map(|content| &content.parts)
        .filter_map(|part| part.text.as_deref())
        .collect();

    let text = text.trim();
    if text.is_empty() {
        return Err(LlmError::EmptyResponse {
            reason: "empty content".to_string(),
        });
    }

    Ok(text.to_string())
}

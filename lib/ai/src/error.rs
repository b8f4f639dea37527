//! Error types for the AI crate.
//!
//! - `LlmError`: everything that can go wrong between building a prompt and
//!   holding a validated payload
//! - `SchemaViolation`: the first structural mismatch found in model output
//!
//! Each error classifies itself into an [`ErrorKind`]; the generator uses the
//! kind to decide between falling back and propagating.

use std::fmt;
use std::time::Duration;
use study_assistant_core::ErrorKind;

/// Errors from the model call path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LlmError {
    /// The admission window is full.
    RateLimited { retry_after: Duration },
    /// No credential is configured for the model endpoint.
    Unconfigured,
    /// Transport-level failure.
    RequestFailed { reason: String },
    /// The call did not complete within the timeout.
    Timeout { after: Duration },
    /// The endpoint answered with a non-2xx status.
    UnexpectedStatus { status: u16 },
    /// The response envelope could not be decoded.
    ResponseParseFailed { reason: String },
    /// Every permitted attempt failed.
    UpstreamFailure { attempts: u32, cause: String },
    /// The response carried no usable text.
    EmptyResponse { reason: String },
    /// The extracted text is not valid JSON.
    MalformedJson { reason: String },
    /// The JSON does not match the payload schema.
    SchemaViolation(SchemaViolation),
    /// The backend cannot be used as configured.
    InvalidConfig { reason: String },
}

impl LlmError {
    /// Classifies this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::RateLimited { .. } => ErrorKind::RateLimited,
            Self::Unconfigured => ErrorKind::Unconfigured,
            Self::RequestFailed { .. }
            | Self::Timeout { .. }
            | Self::UnexpectedStatus { .. }
            | Self::ResponseParseFailed { .. }
            | Self::UpstreamFailure { .. }
            | Self::MalformedJson { .. }
            | Self::SchemaViolation(_) => ErrorKind::UpstreamFailure,
            Self::EmptyResponse { .. } => ErrorKind::EmptyResponse,
            Self::InvalidConfig { .. } => ErrorKind::Internal,
        }
    }

    /// Returns true if a single attempt failed in a way worth retrying.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::RequestFailed { .. }
                | Self::Timeout { .. }
                | Self::UnexpectedStatus { .. }
                | Self::ResponseParseFailed { .. }
        )
    }

    /// Returns true if the generator should answer with fallback content.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::RateLimited
                | ErrorKind::Unconfigured
                | ErrorKind::UpstreamFailure
                | ErrorKind::EmptyResponse
        )
    }
}

impl fmt::Display for LlmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RateLimited { retry_after } => {
                write!(
                    f,
                    "AI rate limit exceeded, retry after {}ms",
                    retry_after.as_millis()
                )
            }
            Self::Unconfigured => write!(f, "AI_API_KEY is not configured"),
            Self::RequestFailed { reason } => write!(f, "AI request failed: {reason}"),
            Self::Timeout { after } => {
                write!(f, "AI request timed out after {}ms", after.as_millis())
            }
            Self::UnexpectedStatus { status } => {
                write!(f, "AI endpoint returned status {status}")
            }
            Self::ResponseParseFailed { reason } => {
                write!(f, "failed to decode AI response: {reason}")
            }
            Self::UpstreamFailure { attempts, cause } => {
                write!(
                    f,
                    "failed to generate study content after {attempts} attempts: {cause}"
                )
            }
            Self::EmptyResponse { reason } => write!(f, "AI generation returned {reason}"),
            Self::MalformedJson { reason } => write!(f, "AI response is not valid JSON: {reason}"),
            Self::SchemaViolation(violation) => write!(f, "{violation}"),
            Self::InvalidConfig { reason } => write!(f, "invalid AI configuration: {reason}"),
        }
    }
}

impl std::error::Error for LlmError {}

impl From<SchemaViolation> for LlmError {
    fn from(violation: SchemaViolation) -> Self {
        Self::SchemaViolation(violation)
    }
}

/// A structural mismatch between model output and the payload schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    /// Path of the offending field, e.g. `quiz[1].choices`.
    pub field: String,
    /// What was expected there.
    pub expected: &'static str,
}

impl SchemaViolation {
    pub(crate) fn new(field: impl Into<String>, expected: &'static str) -> Self {
        Self {
            field: field.into(),
            expected,
        }
    }
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AI response schema violation at '{}': expected {}",
            self.field, self.expected
        )
    }
}

impl std::error::Error for SchemaViolation {}

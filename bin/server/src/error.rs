//! API error responses.
//!
//! Every failure leaves the server as `{"status":"error","message":…}` with
//! an optional `details` field carrying the upstream cause. The status code
//! comes from the error's [`ErrorKind`].

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use rootcause::prelude::Report;
use serde::Serialize;
use std::fmt;
use study_assistant_ai::LlmError;
use study_assistant_core::ErrorKind;
use study_assistant_encyclopedia::EncyclopediaError;

const INTERNAL_MESSAGE: &str = "Internal Server Error";

/// An error returned to API clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// Failure class; decides the status code.
    pub kind: ErrorKind,
    /// User-facing message.
    pub message: String,
    /// Upstream cause, when one exists.
    pub details: Option<String>,
}

impl ApiError {
    /// Creates an error without details.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: None,
        }
    }

    /// Attaches an upstream cause.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Rejection of caller input.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidRequest, message)
    }

    /// Missing resource.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Response for a path no route handles.
    #[must_use]
    pub fn unknown_route() -> Self {
        Self::not_found("Not Found")
    }

    /// HTTP status for this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.kind.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)?;
        if let Some(details) = &self.details {
            write!(f, " ({details})")?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

impl From<Report<EncyclopediaError>> for ApiError {
    fn from(report: Report<EncyclopediaError>) -> Self {
        let error = report.current_context();
        let kind = error.kind();
        if kind == ErrorKind::Internal {
            tracing::error!(error = %error, "encyclopedia lookup misconfigured");
            return Self::new(kind, INTERNAL_MESSAGE);
        }

        let api_error = Self::new(kind, error.to_string());
        match error.details() {
            Some(cause) => api_error.with_details(cause),
            None => api_error,
        }
    }
}

impl From<LlmError> for ApiError {
    fn from(error: LlmError) -> Self {
        let kind = error.kind();
        if kind == ErrorKind::Internal {
            tracing::error!(error = %error, "study content generation misconfigured");
            return Self::new(kind, INTERNAL_MESSAGE);
        }
        Self::new(kind, error.to_string())
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    status: &'static str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a str>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!(status = status.as_u16(), error = %self, "request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "request rejected");
        }

        let body = ErrorBody {
            status: "error",
            message: &self.message,
            details: self.details.as_deref(),
        };
        (status, Json(body)).into_response()
    }
}

//! Error handling foundation for the study assistant.
//!
//! This module provides the `Result` type alias using rootcause and the
//! [`ErrorKind`] taxonomy. Each crate defines its own domain-specific error
//! types and classifies them into an `ErrorKind`; the routing layer turns the
//! kind into a status code.

use rootcause::Report;
use std::fmt;

/// A Result type alias using rootcause's Report for error handling.
///
/// Each layer adds its own context via `.context()` as errors propagate.
pub type Result<T, C = ()> = std::result::Result<T, Report<C>>;

/// Failure classes understood by every layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad topic or mode supplied by the caller.
    InvalidRequest,
    /// No source text exists for the topic.
    NotFound,
    /// The model endpoint's admission window is full.
    RateLimited,
    /// No model credential is configured.
    Unconfigured,
    /// Transport failure, non-2xx, timeout, or malformed model output.
    UpstreamFailure,
    /// The model answered without any usable content.
    EmptyResponse,
    /// Anything unanticipated.
    Internal,
}

impl ErrorKind {
    /// Returns the HTTP status class for this kind.
    #[must_use]
    pub const fn status_code(self) -> u16 {
        match self {
            Self::InvalidRequest => 400,
            Self::NotFound => 404,
            Self::RateLimited => 429,
            Self::Unconfigured | Self::Internal => 500,
            Self::UpstreamFailure | Self::EmptyResponse => 502,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::InvalidRequest => "invalid_request",
            Self::NotFound => "not_found",
            Self::RateLimited => "rate_limited",
            Self::Unconfigured => "unconfigured",
            Self::UpstreamFailure => "upstream_failure",
            Self::EmptyResponse => "empty_response",
            Self::Internal => "internal",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_type_works() {
        let ok: Result<i32> = Ok(42);
        assert_eq!(ok.expect("should be ok"), 42);
    }

    #[test]
    fn status_codes_follow_failure_class() {
        assert_eq!(ErrorKind::InvalidRequest.status_code(), 400);
        assert_eq!(ErrorKind::NotFound.status_code(), 404);
        assert_eq!(ErrorKind::RateLimited.status_code(), 429);
        assert_eq!(ErrorKind::Unconfigured.status_code(), 500);
        assert_eq!(ErrorKind::UpstreamFailure.status_code(), 502);
        assert_eq!(ErrorKind::EmptyResponse.status_code(), 502);
        assert_eq!(ErrorKind::Internal.status_code(), 500);
    }

    #[test]
    fn kind_display_is_snake_case() {
        assert_eq!(ErrorKind::UpstreamFailure.to_string(), "upstream_failure");
    }
}

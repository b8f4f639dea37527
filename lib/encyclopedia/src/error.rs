//! Error types for the encyclopedia crate.
//!
//! Display strings are user-facing: the server returns them verbatim as the
//! error message. Upstream detail is kept separately in [`details`].
//!
//! [`details`]: EncyclopediaError::details

use std::fmt;
use study_assistant_core::ErrorKind;

/// Errors from summary lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncyclopediaError {
    /// The encyclopedia has no page for the topic.
    NotFound { topic: String },
    /// The page exists but carries neither an extract nor a description.
    NoContent { topic: String },
    /// Transport failure, timeout or a non-404 error status.
    RequestFailed { cause: String },
    /// The configured endpoint cannot be used as a base URL.
    InvalidEndpoint { endpoint: String },
}

impl EncyclopediaError {
    /// Classifies this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } | Self::NoContent { .. } => ErrorKind::NotFound,
            Self::RequestFailed { .. } => ErrorKind::UpstreamFailure,
            Self::InvalidEndpoint { .. } => ErrorKind::Internal,
        }
    }

    /// Returns the upstream cause, if any.
    #[must_use]
    pub fn details(&self) -> Option<&str> {
        match self {
            Self::RequestFailed { cause } => Some(cause),
            _ => None,
        }
    }
}

impl fmt::Display for EncyclopediaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { topic } => write!(f, "No summary found for topic: {topic}"),
            Self::NoContent { topic } => {
                write!(f, "No sufficient content found for topic: {topic}")
            }
            Self::RequestFailed { .. } => {
                write!(f, "Failed to fetch topic data from encyclopedia")
            }
            Self::InvalidEndpoint { endpoint } => {
                write!(f, "invalid encyclopedia endpoint '{endpoint}'")
            }
        }
    }
}

impl std::error::Error for EncyclopediaError {}

//! Core domain types and utilities for the study assistant.
//!
//! This crate provides the study request and payload types, the error
//! taxonomy shared by every layer, and strongly-typed identifiers used for
//! log correlation.

pub mod error;
pub mod id;
pub mod study;

pub use error::{ErrorKind, Result};
pub use id::{GenerationId, RequestId};
pub use study::{
    DefaultPayload, MathPayload, MathQuestion, ParseModeError, QuizItem, StudyContent, StudyMode,
    StudyRequest,
};

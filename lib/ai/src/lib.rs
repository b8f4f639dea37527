//! Study material generation for the study assistant.
//!
//! The pipeline turns encyclopedia text into study material with an
//! external generative model, and never leaves the caller empty-handed:
//!
//! - **Rate limiter**: sliding-window admission in front of the model endpoint
//! - **Prompt builder**: pure mapping from a study request to prompts
//! - **Model client**: timeout-bounded calls with a single retry
//! - **Extractor / validator**: strict parsing of the model's JSON
//! - **Fallback**: deterministic content synthesized from the source text
//!
//! [`StudyContentGenerator`] composes these and is the only entry point the
//! server uses.

pub mod backend;
pub mod client;
pub mod error;
pub mod extract;
pub mod fallback;
pub mod gemini;
pub mod generate;
pub mod prompt;
pub mod rate_limit;
pub mod schema;

pub use backend::{GenerateContentResponse, LlmBackend, LlmRequest};
pub use client::{CallPolicy, ModelClient};
pub use error::{LlmError, SchemaViolation};
pub use gemini::{GeminiBackend, GeminiConfig};
pub use generate::StudyContentGenerator;
pub use prompt::{GenerationPrompt, build_prompt};
pub use rate_limit::{RateLimitConfig, RateLimitResult, RateLimiter};

//! Encyclopedia summaries for the study assistant.
//!
//! Looks up the lead summary of a topic from a REST summary endpoint,
//! shortens it to a prompt-friendly length and keeps it in a TTL cache.
//! [`SummarySource`] is the seam the server depends on.

pub mod cache;
pub mod client;
pub mod error;
pub mod trim;

pub use cache::SummaryCache;
pub use client::{EncyclopediaClient, EncyclopediaConfig, SummarySource};
pub use error::EncyclopediaError;
pub use trim::trim_content;

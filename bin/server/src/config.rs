//! Centralized server configuration.
//!
//! Loaded via the `config` crate from environment variables. Nested keys use
//! `__` as the separator, so `GENERATION__TIMEOUT_MS` sets
//! `generation.timeout_ms`.

use serde::Deserialize;
use std::time::Duration;
use study_assistant_ai::gemini::DEFAULT_GEMINI_ENDPOINT;
use study_assistant_ai::{CallPolicy, GeminiConfig, RateLimitConfig};
use study_assistant_encyclopedia::EncyclopediaConfig;
use study_assistant_encyclopedia::client::DEFAULT_ENDPOINT as DEFAULT_WIKI_ENDPOINT;

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Model API key. Without one every request is answered from fallback content.
    #[serde(default)]
    pub ai_api_key: Option<String>,

    /// Model `generateContent` endpoint.
    #[serde(default = "default_ai_endpoint")]
    pub ai_endpoint: String,

    /// Encyclopedia summary endpoint.
    #[serde(default = "default_wiki_endpoint")]
    pub wiki_endpoint: String,

    /// Model call limits.
    #[serde(default)]
    pub generation: GenerationSettings,

    /// Encyclopedia lookup settings.
    #[serde(default)]
    pub encyclopedia: EncyclopediaSettings,
}

/// Limits applied to model calls.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationSettings {
    /// Calls admitted per window.
    #[serde(default = "default_max_calls_per_window")]
    pub max_calls_per_window: u32,

    /// Sliding window length in seconds.
    #[serde(default = "default_window_seconds")]
    pub window_seconds: u64,

    /// Per-attempt timeout in milliseconds.
    #[serde(default = "default_generation_timeout_ms")]
    pub timeout_ms: u64,

    /// Pause before the retry, in milliseconds.
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// Attempts per call, including the first.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

/// Encyclopedia lookup settings.
#[derive(Debug, Clone, Deserialize)]
pub struct EncyclopediaSettings {
    /// Lookup timeout in milliseconds.
    #[serde(default = "default_encyclopedia_timeout_ms")]
    pub timeout_ms: u64,

    /// Summary cache lifetime in seconds.
    #[serde(default = "default_cache_ttl_seconds")]
    pub cache_ttl_seconds: u64,
}

fn default_port() -> u16 {
    3000
}

fn default_ai_endpoint() -> String {
    DEFAULT_GEMINI_ENDPOINT.to_string()
}

fn default_wiki_endpoint() -> String {
    DEFAULT_WIKI_ENDPOINT.to_string()
}

fn default_max_calls_per_window() -> u32 {
    30
}

fn default_window_seconds() -> u64 {
    60
}

fn default_generation_timeout_ms() -> u64 {
    6000
}

fn default_retry_delay_ms() -> u64 {
    400
}

fn default_max_attempts() -> u32 {
    2
}

fn default_encyclopedia_timeout_ms() -> u64 {
    4000
}

fn default_cache_ttl_seconds() -> u64 {
    3600
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            max_calls_per_window: default_max_calls_per_window(),
            window_seconds: default_window_seconds(),
            timeout_ms: default_generation_timeout_ms(),
            retry_delay_ms: default_retry_delay_ms(),
            max_attempts: default_max_attempts(),
        }
    }
}

impl Default for EncyclopediaSettings {
    fn default() -> Self {
        Self {
            timeout_ms: default_encyclopedia_timeout_ms(),
            cache_ttl_seconds: default_cache_ttl_seconds(),
        }
    }
}

impl ServerConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable cannot be parsed into its field.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::from_environment(config::Environment::default())
    }

    fn from_environment(environment: config::Environment) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(environment.separator("__").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Model backend settings.
    #[must_use]
    pub fn gemini(&self) -> GeminiConfig {
        GeminiConfig::new(self.ai_api_key.clone()).with_endpoint(self.ai_endpoint.clone())
    }

    /// Admission window for model calls.
    #[must_use]
    pub fn rate_limit(&self) -> RateLimitConfig {
        RateLimitConfig::new(
            self.generation.max_calls_per_window,
            Duration::from_secs(self.generation.window_seconds),
        )
    }

    /// Timeout and retry policy for model calls.
    #[must_use]
    pub fn call_policy(&self) -> CallPolicy {
        CallPolicy {
            timeout: Duration::from_millis(self.generation.timeout_ms),
            max_attempts: self.generation.max_attempts,
            retry_delay: Duration::from_millis(self.generation.retry_delay_ms),
        }
    }

    /// Encyclopedia client settings.
    #[must_use]
    pub fn encyclopedia(&self) -> EncyclopediaConfig {
        EncyclopediaConfig {
            endpoint: self.wiki_endpoint.clone(),
            timeout: Duration::from_millis(self.encyclopedia.timeout_ms),
            cache_ttl: Duration::from_secs(self.encyclopedia.cache_ttl_seconds),
        }
    }
}

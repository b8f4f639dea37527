//! HTTP client for the encyclopedia summary endpoint.

use crate::cache::{DEFAULT_TTL, SummaryCache};
use crate::error::EncyclopediaError;
use crate::trim::trim_content;
use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use std::time::Duration;
use study_assistant_core::Result;
use tracing::{debug, instrument};

/// Default REST summary endpoint. The topic is appended as a path segment.
pub const DEFAULT_ENDPOINT: &str = "https://en.wikipedia.org/api/rest_v1/page/summary/";

const USER_AGENT_VALUE: &str = "SmartStudyAssistant/1.0";

/// Source of topic summaries.
#[async_trait]
pub trait SummarySource: Send + Sync {
    /// Returns a prompt-sized summary for the topic.
    async fn fetch_summary(&self, topic: &str) -> Result<String, EncyclopediaError>;
}

/// Configuration for [`EncyclopediaClient`].
#[derive(Debug, Clone)]
pub struct EncyclopediaConfig {
    /// Base summary URL; the topic becomes its last path segment.
    pub endpoint: String,
    /// Upper bound on a single lookup.
    pub timeout: Duration,
    /// Lifetime of cached summaries.
    pub cache_ttl: Duration,
}

impl Default for EncyclopediaConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(4),
            cache_ttl: DEFAULT_TTL,
        }
    }
}

#[derive(Debug, Deserialize)]
struct PageSummary {
    #[serde(default)]
    extract: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

impl PageSummary {
    fn into_content(self) -> Option<String> {
        let non_empty = |text: &String| !text.is_empty();
        self.extract
            .filter(non_empty)
            .or_else(|| self.description.filter(non_empty))
    }
}

/// Cached encyclopedia client.
#[derive(Debug, Clone)]
pub struct EncyclopediaClient {
    http: reqwest::Client,
    config: EncyclopediaConfig,
    cache: SummaryCache,
}

impl EncyclopediaClient {
    /// Creates a client with a fresh HTTP client.
    #[must_use]
    pub fn new(config: EncyclopediaConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Creates a client sharing an existing HTTP client.
    #[must_use]
    pub fn with_client(http: reqwest::Client, config: EncyclopediaConfig) -> Self {
        let cache = SummaryCache::new(config.cache_ttl);
        Self {
            http,
            config,
            cache,
        }
    }

    /// Returns the summary cache.
    #[must_use]
    pub fn cache(&self) -> &SummaryCache {
        &self.cache
    }

    fn summary_url(&self, topic: &str) -> Result<Url, EncyclopediaError> {
        let invalid = || EncyclopediaError::InvalidEndpoint {
            endpoint: self.config.endpoint.clone(),
        };

        let mut url = Url::parse(&self.config.endpoint).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|()| invalid())?
            .pop_if_empty()
            .push(topic);
        Ok(url)
    }
}

#[async_trait]
impl SummarySource for EncyclopediaClient {
    #[instrument(skip(self))]
    async fn fetch_summary(&self, topic: &str) -> Result<String, EncyclopediaError> {
        let topic = topic.trim();
        if let Some(summary) = self.cache.get(topic) {
            debug!("summary cache hit");
            return Ok(summary);
        }

        let url = self.summary_url(topic)?;
        let response = self
            .http
            .get(url)
            .header(USER_AGENT, USER_AGENT_VALUE)
            .timeout(self.config.timeout)
            .send()
            .await
            .map_err(|e| EncyclopediaError::RequestFailed {
                cause: e.to_string(),
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(EncyclopediaError::NotFound {
                topic: topic.to_string(),
            }
            .into());
        }
        if !status.is_success() {
            return Err(EncyclopediaError::RequestFailed {
                cause: format!("encyclopedia returned status {status}"),
            }
            .into());
        }

        let page = response
            .json::<PageSummary>()
            .await
            .map_err(|e| EncyclopediaError::RequestFailed {
                cause: e.to_string(),
            })?;

        let content = page
            .into_content()
            .ok_or_else(|| EncyclopediaError::NoContent {
                topic: topic.to_string(),
            })?;

        let summary = trim_content(&content);
        debug!(chars = summary.chars().count(), "fetched summary");
        self.cache.insert(topic, summary.clone());
        Ok(summary)
    }
}

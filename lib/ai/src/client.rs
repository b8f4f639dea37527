//! Model client with admission control, timeout and bounded retry.

use crate::backend::{GenerateContentResponse, LlmBackend, LlmRequest};
use crate::error::LlmError;
use crate::prompt::GenerationPrompt;
use crate::rate_limit::{RateLimitResult, RateLimiter};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Timeout and retry settings for model calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallPolicy {
    /// Upper bound on a single attempt.
    pub timeout: Duration,
    /// Total attempts per call, including the first.
    pub max_attempts: u32,
    /// Fixed pause between attempts.
    pub retry_delay: Duration,
}

impl Default for CallPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(6),
            max_attempts: 2,
            retry_delay: Duration::from_millis(400),
        }
    }
}

/// Calls the model through the rate limiter.
#[derive(Clone)]
pub struct ModelClient {
    backend: Arc<dyn LlmBackend>,
    limiter: RateLimiter,
    policy: CallPolicy,
}

impl ModelClient {
    /// Creates a client with the default call policy.
    #[must_use]
    pub fn new(backend: Arc<dyn LlmBackend>, limiter: RateLimiter) -> Self {
        Self::with_policy(backend, limiter, CallPolicy::default())
    }

    /// Creates a client with an explicit call policy.
    #[must_use]
    pub fn with_policy(backend: Arc<dyn LlmBackend>, limiter: RateLimiter, policy: CallPolicy) -> Self {
        Self {
            backend,
            limiter,
            policy,
        }
    }

    /// Sends the prompt to the model.
    ///
    /// Every attempt must first be admitted by the rate limiter. Transient
    /// failures are retried after a fixed delay until `max_attempts` is
    /// reached.
    ///
    /// # Errors
    ///
    /// - [`LlmError::RateLimited`] if an attempt is not admitted
    /// - [`LlmError::Unconfigured`] if no credential is configured
    /// - [`LlmError::UpstreamFailure`] once every attempt has failed
    /// - any non-transient backend error, unchanged
    #[instrument(skip_all, fields(model = self.backend.model()))]
    pub async fn call(&self, prompt: &GenerationPrompt) -> Result<GenerateContentResponse, LlmError> {
        let request = LlmRequest::from(prompt);
        let max_attempts = self.policy.max_attempts.max(1);
        let mut attempt = 0;

        loop {
            attempt += 1;

            if let RateLimitResult::Exceeded { retry_after } = self.limiter.try_admit() {
                return Err(LlmError::RateLimited { retry_after });
            }

            if !self.backend.is_configured() {
                return Err(LlmError::Unconfigured);
            }

            let error = match self.attempt(&request).await {
                Ok(response) => {
                    debug!(attempt, "model call succeeded");
                    return Ok(response);
                }
                Err(error) if !error.is_transient() => return Err(error),
                Err(error) => error,
            };

            if attempt >= max_attempts {
                return Err(LlmError::UpstreamFailure {
                    attempts: attempt,
                    cause: error.to_string(),
                });
            }

            warn!(attempt, error = %error, "model call failed, retrying");
            tokio::time::sleep(self.policy.retry_delay).await;
        }
    }

    async fn attempt(&self, request: &LlmRequest) -> Result<GenerateContentResponse, LlmError> {
        match tokio::time::timeout(self.policy.timeout, self.backend.generate(request)).await {
            Ok(result) => result,
            Err(_) => Err(LlmError::Timeout {
                after: self.policy.timeout,
            }),
        }
    }
}

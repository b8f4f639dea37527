//! Rate limiting for model calls.
//!
//! A sliding window of admission timestamps protects the external model
//! endpoint. Rejection is immediate; callers treat it as a cue to fall back.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::time::Instant;

/// Rate limit configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Maximum admitted calls within the window.
    pub max_calls: u32,
    /// Length of the trailing window.
    pub window: Duration,
}

impl RateLimitConfig {
    /// Creates a new rate limit configuration.
    #[must_use]
    pub const fn new(max_calls: u32, window: Duration) -> Self {
        Self { max_calls, window }
    }

    /// `max_calls` per trailing minute.
    #[must_use]
    pub const fn per_minute(max_calls: u32) -> Self {
        Self::new(max_calls, Duration::from_secs(60))
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self::per_minute(30)
    }
}

/// Result of an admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitResult {
    /// The call was admitted and recorded.
    Allowed { remaining: u32 },
    /// The window is full; nothing was recorded.
    Exceeded { retry_after: Duration },
}

impl RateLimitResult {
    /// Returns true if the call was admitted.
    #[must_use]
    pub const fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed { .. })
    }
}

/// Sliding-window admission gate.
///
/// Clones share the same window, so one limiter constructed at startup can
/// be handed to every component that calls the model.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    config: RateLimitConfig,
    admitted: Arc<Mutex<VecDeque<Instant>>>,
}

impl RateLimiter {
    /// Creates a new rate limiter with the given configuration.
    #[must_use]
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            admitted: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    /// Purges expired entries, then admits the call if the window has room.
    pub fn try_admit(&self) -> RateLimitResult {
        let now = Instant::now();
        let mut admitted = self.admitted.lock().unwrap_or_else(PoisonError::into_inner);

        while let Some(oldest) = admitted.front() {
            if now.saturating_duration_since(*oldest) > self.config.window {
                admitted.pop_front();
            } else {
                break;
            }
        }

        if admitted.len() >= self.config.max_calls as usize {
            let retry_after = admitted.front().map_or(Duration::ZERO, |oldest| {
                self.config
                    .window
                    .saturating_sub(now.saturating_duration_since(*oldest))
            });
            return RateLimitResult::Exceeded { retry_after };
        }

        admitted.push_back(now);
        let remaining = self.config.max_calls as usize - admitted.len();
        RateLimitResult::Allowed {
            remaining: u32::try_from(remaining).unwrap_or(u32::MAX),
        }
    }

    /// Number of calls currently recorded in the window.
    #[must_use]
    pub fn in_window(&self) -> usize {
        self.admitted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(RateLimitConfig::default())
    }
}

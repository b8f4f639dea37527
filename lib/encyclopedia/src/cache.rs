//! In-process TTL cache for summaries.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;
use tokio::time::Instant;

/// Default lifetime of a cached summary.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

#[derive(Debug, Clone)]
struct Entry {
    summary: String,
    stored_at: Instant,
}

/// Summary cache keyed by normalized topic.
///
/// Cloning shares the underlying map. Expired entries are dropped lazily,
/// on lookup and on insertion.
#[derive(Debug, Clone)]
pub struct SummaryCache {
    ttl: Duration,
    entries: Arc<RwLock<HashMap<String, Entry>>>,
}

impl SummaryCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Normalizes a topic into its cache key.
    #[must_use]
    pub fn key(topic: &str) -> String {
        topic.trim().to_lowercase()
    }

    /// Returns the cached summary for a topic if it has not expired.
    #[must_use]
    pub fn get(&self, topic: &str) -> Option<String> {
        let key = Self::key(topic);
        {
            let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
            match entries.get(&key) {
                None => return None,
                Some(entry) if !self.is_expired(entry) => return Some(entry.summary.clone()),
                Some(_) => {}
            }
        }

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if entries.get(&key).is_some_and(|entry| self.is_expired(entry)) {
            entries.remove(&key);
        }
        None
    }

    /// Stores a summary, purging expired entries first.
    pub fn insert(&self, topic: &str, summary: impl Into<String>) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.retain(|_, entry| !self.is_expired(entry));
        entries.insert(
            Self::key(topic),
            Entry {
                summary: summary.into(),
                stored_at: Instant::now(),
            },
        );
    }

    /// Number of stored entries, expired or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn is_expired(&self, entry: &Entry) -> bool {
        entry.stored_at.elapsed() >= self.ttl
    }
}

impl Default for SummaryCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_trimmed_and_lowercased() {
        assert_eq!(SummaryCache::key("  Black Hole "), "black hole");
    }

    #[tokio::test(start_paused = true)]
    async fn lookups_ignore_case_and_whitespace() {
        let cache = SummaryCache::default();
        cache.insert("Photosynthesis", "Plants make sugar.");

        assert_eq!(cache.get(" photosynthesis").as_deref(), Some("Plants make sugar."));
        assert_eq!(cache.get("PHOTOSYNTHESIS").as_deref(), Some("Plants make sugar."));
        assert_eq!(cache.get("Respiration"), None);
    }

    #[tokio::test(start_paused = true)]
    async fn entries_expire_after_ttl() {
        let cache = SummaryCache::new(Duration::from_secs(60));
        cache.insert("Topic", "text");

        tokio::time::advance(Duration::from_secs(59)).await;
        assert!(cache.get("topic").is_some());

        tokio::time::advance(Duration::from_secs(1)).await;
        assert_eq!(cache.get("topic"), None);
        assert!(cache.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn insertion_purges_expired_entries() {
        let cache = SummaryCache::new(Duration::from_secs(60));
        cache.insert("old", "a");
        tokio::time::advance(Duration::from_secs(61)).await;

        cache.insert("new", "b");
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("new").as_deref(), Some("b"));
    }

    #[tokio::test(start_paused = true)]
    async fn clones_share_entries() {
        let cache = SummaryCache::default();
        let other = cache.clone();
        cache.insert("Topic", "shared");
        assert_eq!(other.get("topic").as_deref(), Some("shared"));
    }
}

use dashmap::DashMap;
use std::time::{Duration, Instant};

use crate::metrics::CACHE_SIZE;

// Cache entry with timestamp
#[derive(Clone)]
pub struct CacheEntry {
    pub image_url: String,
    pub created_at: Instant,
}

impl CacheEntry {
    fn is_fresh(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() < ttl
    }
}

/// Prompt -> generated image reference, valid for a fixed TTL.
///
/// Keys are the exact prompt text: `"Cat"` and `"cat"` are different entries.
/// There is no capacity bound and no background sweep; an expired entry is
/// removed by the first `get` that sees it. Concurrent `set`s on the same key
/// are last-write-wins.
pub struct PromptCache {
    entries: DashMap<String, CacheEntry>,
    ttl: Duration,
}

impl PromptCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        if let Some(entry) = self.entries.get(key) {
            if entry.is_fresh(self.ttl) {
                return Some(entry.image_url.clone());
            }
        } else {
            return None;
        }

        // the shard guard is released above; only drop the entry if it is still
        // the expired one, a concurrent set may have replaced it meanwhile
        let ttl = self.ttl;
        if self
            .entries
            .remove_if(key, |_, entry| !entry.is_fresh(ttl))
            .is_some()
        {
            CACHE_SIZE.set(self.entries.len() as f64);
        }
        None
    }

    pub fn set(&self, key: &str, image_url: &str) {
        self.entries.insert(
            key.to_string(),
            CacheEntry {
                image_url: image_url.to_string(),
                created_at: Instant::now(),
            },
        );
        CACHE_SIZE.set(self.entries.len() as f64);
    }

    /// Stored entries, including expired ones no lookup has visited yet.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

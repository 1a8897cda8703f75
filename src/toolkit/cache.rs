//! TTL result cache for toolkit operations
//!
//! Entries are never expired proactively; a stale entry is dropped on the
//! next lookup of its key.

use super::ToolResult;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

struct CacheEntry {
    stored_at: Instant,
    result: ToolResult,
}

/// Mutex-guarded cache of successful tool results, keyed by operation
/// (optionally parameterized by argument).
pub struct ToolCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl ToolCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Return the cached result if still fresh, dropping it if stale.
    pub fn get(&self, key: &str) -> Option<ToolResult> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(entry) = entries.get(key) {
            if entry.stored_at.elapsed() < self.ttl {
                return Some(entry.result.clone());
            }
            entries.remove(key);
        }

        None
    }

    pub fn put(&self, key: String, result: ToolResult) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(
            key,
            CacheEntry {
                stored_at: Instant::now(),
                result,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample(tool: &str) -> ToolResult {
        ToolResult::ok(tool, json!({"v": 1}), 5.0)
    }

    #[test]
    fn fresh_entry_is_returned() {
        let cache = ToolCache::new(Duration::from_secs(60));
        cache.put("tps".into(), sample("tps"));

        let hit = cache.get("tps").unwrap();
        assert!(hit.success);
        assert_eq!(hit.tool, "tps");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn stale_entry_is_dropped_on_lookup() {
        let cache = ToolCache::new(Duration::ZERO);
        cache.put("tps".into(), sample("tps"));
        assert_eq!(cache.len(), 1);

        assert!(cache.get("tps").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn keys_are_independent() {
        let cache = ToolCache::new(Duration::from_secs(60));
        cache.put("price:sol".into(), sample("price"));

        assert!(cache.get("price:bonk").is_none());
        assert!(cache.get("price:sol").is_some());
    }
}

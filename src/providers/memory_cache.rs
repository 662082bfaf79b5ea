use crate::capabilities::CacheProvider;
use anyhow::Result;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

struct CacheEntry {
    value: Value,
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

/// Process-local cache with optional per-entry TTL.
///
/// Expired entries are dropped lazily on access.
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live (unexpired) entries
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .filter(|entry| !entry.is_expired(now))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CacheProvider for MemoryCache {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        match entries.get(key) {
            Some(entry) if entry.is_expired(Instant::now()) => {
                entries.remove(key);
                Ok(None)
            }
            Some(entry) => Ok(Some(entry.value.clone())),
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: Value, ttl: Option<Duration>) -> Result<()> {
        let expires_at = ttl.map(|ttl| Instant::now() + ttl);
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), CacheEntry { value, expires_at });
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<bool> {
        let removed = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(removed.is_some_and(|entry| !entry.is_expired(Instant::now())))
    }

    fn clear(&self) -> Result<()> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_set_get_overwrite() {
        let cache = MemoryCache::new();
        cache.set("a", json!(1), None).unwrap();
        cache.set("a", json!(2), None).unwrap();
        assert_eq!(cache.get("a").unwrap(), Some(json!(2)));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_ttl_expiry() {
        let cache = MemoryCache::new();
        cache.set("short", json!("x"), Some(Duration::from_millis(20))).unwrap();
        cache.set("forever", json!("y"), None).unwrap();

        std::thread::sleep(Duration::from_millis(40));

        assert_eq!(cache.get("short").unwrap(), None);
        assert_eq!(cache.get("forever").unwrap(), Some(json!("y")));
        assert!(!cache.delete("short").unwrap());
    }

    #[test]
    fn test_delete_and_clear() {
        let cache = MemoryCache::new();
        cache.set("a", json!(1), None).unwrap();
        cache.set("b", json!(2), None).unwrap();

        assert!(cache.delete("a").unwrap());
        assert!(!cache.delete("a").unwrap());

        cache.clear().unwrap();
        assert!(cache.is_empty());
    }
}

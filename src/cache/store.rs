//! Cache storage: a TTL-bounded LRU of serialized read results plus a
//! tag → keys registry for coarse invalidation.

use std::collections::{HashMap, HashSet};
use std::num::NonZeroUsize;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use lru::LruCache;
use metrics::counter;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use tracing::warn;

use super::keys::{CacheKey, CacheTag};
use super::lock::{rw_read, rw_write};

const SOURCE: &str = "cache::store";

const DEFAULT_CAPACITY: usize = 1024;
const DEFAULT_TTL_SECONDS: u64 = 3600;

#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub enabled: bool,
    /// Maximum number of cached reads before LRU eviction.
    pub capacity: usize,
    /// Safety-net expiry applied regardless of tag invalidation.
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            capacity: DEFAULT_CAPACITY,
            ttl: Duration::from_secs(DEFAULT_TTL_SECONDS),
        }
    }
}

impl CacheConfig {
    fn capacity_non_zero(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.capacity).unwrap_or(NonZeroUsize::MIN)
    }
}

struct CacheEntry {
    value: JsonValue,
    stored_at: Instant,
    tags: Vec<CacheTag>,
}

enum Lookup {
    Hit(JsonValue),
    Stale(Vec<CacheTag>),
    Miss,
}

/// Shared read cache. Values are stored as JSON so every view model with a
/// serde implementation can pass through one store.
pub struct ContentCache {
    config: CacheConfig,
    entries: RwLock<LruCache<CacheKey, CacheEntry>>,
    tags: RwLock<HashMap<CacheTag, HashSet<CacheKey>>>,
}

impl ContentCache {
    pub fn new(config: CacheConfig) -> Self {
        let capacity = config.capacity_non_zero();
        Self {
            config,
            entries: RwLock::new(LruCache::new(capacity)),
            tags: RwLock::new(HashMap::new()),
        }
    }

    /// A cache that never stores anything; used where caching is disabled.
    pub fn disabled() -> Self {
        Self::new(CacheConfig {
            enabled: false,
            ..CacheConfig::default()
        })
    }

    pub fn get<T: DeserializeOwned>(&self, key: &CacheKey) -> Option<T> {
        if !self.config.enabled {
            return None;
        }

        let lookup = {
            let mut entries = rw_write(&self.entries, SOURCE, "get");
            let fresh = entries
                .get(key)
                .map(|entry| entry.stored_at.elapsed() < self.config.ttl);
            match fresh {
                Some(true) => {
                    let entry = entries.get(key).expect("entry observed under the same lock");
                    Lookup::Hit(entry.value.clone())
                }
                Some(false) => {
                    let entry = entries.pop(key).expect("entry observed under the same lock");
                    Lookup::Stale(entry.tags)
                }
                None => Lookup::Miss,
            }
        };

        match lookup {
            Lookup::Hit(value) => {
                counter!("akademi_cache_hit_total").increment(1);
                serde_json::from_value(value).ok()
            }
            Lookup::Stale(tags) => {
                self.unregister(key, &tags);
                counter!("akademi_cache_expired_total").increment(1);
                counter!("akademi_cache_miss_total").increment(1);
                None
            }
            Lookup::Miss => {
                counter!("akademi_cache_miss_total").increment(1);
                None
            }
        }
    }

    pub fn put<T: Serialize>(&self, key: CacheKey, tags: Vec<CacheTag>, value: &T) {
        if !self.config.enabled {
            return;
        }

        let value = match serde_json::to_value(value) {
            Ok(value) => value,
            Err(error) => {
                warn!(error = %error, "failed to serialize cache entry; skipping");
                return;
            }
        };

        let entry = CacheEntry {
            value,
            stored_at: Instant::now(),
            tags: tags.clone(),
        };

        let evicted = {
            let mut entries = rw_write(&self.entries, SOURCE, "put");
            entries.push(key.clone(), entry)
        };

        if let Some((evicted_key, evicted_entry)) = evicted {
            if evicted_key != key {
                self.unregister(&evicted_key, &evicted_entry.tags);
                counter!("akademi_cache_evict_total").increment(1);
            }
        }

        let mut registry = rw_write(&self.tags, SOURCE, "put.register");
        for tag in tags {
            registry.entry(tag).or_default().insert(key.clone());
        }
    }

    /// Drop every entry carrying the tag. Returns the number of entries removed.
    pub fn invalidate(&self, tag: &CacheTag) -> usize {
        if !self.config.enabled {
            return 0;
        }

        let keys = {
            let mut registry = rw_write(&self.tags, SOURCE, "invalidate");
            registry.remove(tag).unwrap_or_default()
        };

        let mut removed = 0;
        for key in keys {
            let popped = {
                let mut entries = rw_write(&self.entries, SOURCE, "invalidate.pop");
                entries.pop(&key)
            };
            if let Some(entry) = popped {
                removed += 1;
                self.unregister(&key, &entry.tags);
            }
        }

        counter!("akademi_cache_invalidated_total").increment(removed as u64);
        removed
    }

    pub fn clear(&self) {
        rw_write(&self.entries, SOURCE, "clear").clear();
        rw_write(&self.tags, SOURCE, "clear.tags").clear();
    }

    pub fn len(&self) -> usize {
        rw_read(&self.entries, SOURCE, "len").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn unregister(&self, key: &CacheKey, tags: &[CacheTag]) {
        let mut registry = rw_write(&self.tags, SOURCE, "unregister");
        for tag in tags {
            if let Some(keys) = registry.get_mut(tag) {
                keys.remove(key);
                if keys.is_empty() {
                    registry.remove(tag);
                }
            }
        }
    }
}

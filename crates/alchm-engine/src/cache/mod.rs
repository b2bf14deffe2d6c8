//! Two-tier result cache.
//!
//! A hot in-process tier sits in front of a shared tier:
//!
//! - The hot tier is sharded; reads take a shard read lock and writes a
//!   shard write lock, so writes serialize per shard rather than globally.
//!   Eviction is least-recently-used with a fixed entry cap.
//! - The shared tier holds serialized entries behind the [`SharedStore`]
//!   trait; a hot miss falls through to it and a shared hit repopulates
//!   the hot tier.
//!
//! Entries carry an explicit expiry timestamp checked lazily on read; no
//! background sweep is required for correctness. An entry that fails to
//! deserialize is dropped and treated as a miss — corruption never
//! surfaces to callers.

mod entry;
mod shared;

use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

pub use entry::CacheEntry;
pub use shared::{MemorySharedStore, SharedStore};

const SHARD_COUNT: usize = 16;

struct HotEntry {
    entry: CacheEntry,
    /// Recency tick; bumped atomically on read so hits stay read-locked.
    last_access: AtomicU64,
}

/// Hit/miss counters, cumulative since construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub hot_hits: u64,
    pub shared_hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

/// Two-tier cache keyed by computation identity.
pub struct ResultCache {
    shards: Vec<RwLock<HashMap<String, HotEntry>>>,
    per_shard_capacity: usize,
    shared: Option<Arc<dyn SharedStore>>,
    tick: AtomicU64,
    hot_hits: AtomicU64,
    shared_hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

impl std::fmt::Debug for ResultCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResultCache")
            .field("per_shard_capacity", &self.per_shard_capacity)
            .field("has_shared_tier", &self.shared.is_some())
            .field("stats", &self.stats())
            .finish()
    }
}

impl ResultCache {
    /// Hot-tier-only cache with the given total entry cap.
    pub fn new(hot_capacity: usize) -> Self {
        Self::with_shared_opt(hot_capacity, None)
    }

    /// Cache backed by a shared tier.
    pub fn with_shared(hot_capacity: usize, shared: Arc<dyn SharedStore>) -> Self {
        Self::with_shared_opt(hot_capacity, Some(shared))
    }

    fn with_shared_opt(hot_capacity: usize, shared: Option<Arc<dyn SharedStore>>) -> Self {
        let shards = (0..SHARD_COUNT).map(|_| RwLock::new(HashMap::new())).collect();
        Self {
            shards,
            per_shard_capacity: (hot_capacity / SHARD_COUNT).max(1),
            shared,
            tick: AtomicU64::new(0),
            hot_hits: AtomicU64::new(0),
            shared_hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }

    fn shard_for(&self, key: &str) -> &RwLock<HashMap<String, HotEntry>> {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        &self.shards[(hasher.finish() as usize) % SHARD_COUNT]
    }

    /// Typed read through both tiers.
    ///
    /// Returns `None` on miss, expiry, or corruption; the caller recomputes
    /// in every case.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let now = Utc::now();

        let shard = self.shard_for(key);
        let mut expired_in_hot = false;
        {
            let entries = shard.read();
            if let Some(hot) = entries.get(key) {
                if hot.entry.is_expired(now) {
                    expired_in_hot = true;
                } else {
                    hot.last_access
                        .store(self.tick.fetch_add(1, Ordering::Relaxed), Ordering::Relaxed);
                    match serde_json::from_str(&hot.entry.value) {
                        Ok(value) => {
                            self.hot_hits.fetch_add(1, Ordering::Relaxed);
                            return Some(value);
                        }
                        Err(err) => {
                            // Corrupt hot entry: fall through to removal and
                            // recomputation.
                            warn!(key, error = %err, "corrupt hot cache entry, treating as miss");
                            expired_in_hot = true;
                        }
                    }
                }
            }
        }
        if expired_in_hot {
            shard.write().remove(key);
        }

        if let Some(shared) = &self.shared {
            if let Some(entry) = shared.get(key) {
                if entry.is_expired(now) {
                    shared.remove(key);
                } else {
                    match serde_json::from_str::<T>(&entry.value) {
                        Ok(value) => {
                            self.shared_hits.fetch_add(1, Ordering::Relaxed);
                            debug!(key, "shared cache hit, promoting to hot tier");
                            self.insert_hot(entry);
                            return Some(value);
                        }
                        Err(err) => {
                            warn!(key, error = %err, "corrupt shared cache entry, treating as miss");
                            shared.remove(key);
                        }
                    }
                }
            }
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        None
    }

    /// Serialize and store a value in both tiers.
    pub fn put<T: Serialize>(&self, key: &str, value: &T, ttl: Duration) {
        let serialized =
            serde_json::to_string(value).expect("cached values serialize infallibly");
        let entry = CacheEntry::new(key, serialized, ttl);
        if let Some(shared) = &self.shared {
            shared.put(entry.clone());
        }
        self.insert_hot(entry);
    }

    /// Drop a key from both tiers.
    pub fn invalidate(&self, key: &str) {
        self.shard_for(key).write().remove(key);
        if let Some(shared) = &self.shared {
            shared.remove(key);
        }
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hot_hits: self.hot_hits.load(Ordering::Relaxed),
            shared_hits: self.shared_hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
        }
    }

    fn insert_hot(&self, entry: CacheEntry) {
        let key = entry.key.clone();
        let shard = self.shard_for(&key);
        let mut entries = shard.write();
        if !entries.contains_key(&key) && entries.len() >= self.per_shard_capacity {
            let lru = entries
                .iter()
                .min_by_key(|(_, hot)| hot.last_access.load(Ordering::Relaxed))
                .map(|(k, _)| k.clone());
            if let Some(lru) = lru {
                entries.remove(&lru);
                self.evictions.fetch_add(1, Ordering::Relaxed);
            }
        }
        entries.insert(
            key,
            HotEntry {
                entry,
                last_access: AtomicU64::new(self.tick.fetch_add(1, Ordering::Relaxed)),
            },
        );
    }
}

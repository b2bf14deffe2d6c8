//! Shared cache tier.

use std::collections::HashMap;

use parking_lot::RwLock;

use super::entry::CacheEntry;

/// Backend for the shared cache tier.
///
/// Implementations hold serialized entries; a process-external store (for
/// deployments that share cache across instances) is an integration
/// concern and lives outside this crate. The in-memory implementation
/// below is the default backend and the reference semantics.
pub trait SharedStore: Send + Sync {
    fn get(&self, key: &str) -> Option<CacheEntry>;
    fn put(&self, entry: CacheEntry);
    fn remove(&self, key: &str);
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory shared tier with a fixed entry cap.
///
/// Eviction drops the oldest entry by computation time when the cap is
/// reached; expiry itself stays lazy on the read path.
#[derive(Debug)]
pub struct MemorySharedStore {
    entries: RwLock<HashMap<String, CacheEntry>>,
    capacity: usize,
}

impl MemorySharedStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            capacity: capacity.max(1),
        }
    }
}

impl SharedStore for MemorySharedStore {
    fn get(&self, key: &str) -> Option<CacheEntry> {
        self.entries.read().get(key).cloned()
    }

    fn put(&self, entry: CacheEntry) {
        let mut entries = self.entries.write();
        if !entries.contains_key(&entry.key) && entries.len() >= self.capacity {
            let oldest = entries
                .values()
                .min_by_key(|e| e.computed_at)
                .map(|e| e.key.clone());
            if let Some(oldest) = oldest {
                entries.remove(&oldest);
            }
        }
        entries.insert(entry.key.clone(), entry);
    }

    fn remove(&self, key: &str) {
        self.entries.write().remove(key);
    }

    fn len(&self) -> usize {
        self.entries.read().len()
    }
}

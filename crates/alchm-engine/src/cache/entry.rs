//! Cache entry shape shared by both tiers.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One cached computation result.
///
/// The value is carried serialized so the shared tier can hold it without
/// knowing its concrete type; typed access deserializes on read, and a
/// value that fails to deserialize is treated as a miss, never as a
/// failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub key: String,
    /// Serialized JSON of the cached value.
    pub value: String,
    pub computed_at: DateTime<Utc>,
    pub ttl: Duration,
}

impl CacheEntry {
    pub fn new(key: impl Into<String>, value: String, ttl: Duration) -> Self {
        Self {
            key: key.into(),
            value,
            computed_at: Utc::now(),
            ttl,
        }
    }

    /// Expiry is lazy: checked on every read against the explicit
    /// timestamp; no background sweep is required for correctness.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        let Ok(ttl) = chrono::Duration::from_std(self.ttl) else {
            return false;
        };
        now >= self.computed_at + ttl
    }
}

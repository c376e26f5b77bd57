//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with freshness
//! checking against a proxy-wide TTL.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

// == Cache Entry ==
/// Represents a single cache entry: a payload plus the instant it was
/// stored.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored payload
    pub value: V,
    /// Storage timestamp (Unix milliseconds)
    pub stored_at: u64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry stamped with the current time.
    pub fn new(value: V) -> Self {
        Self {
            value,
            stored_at: current_timestamp_ms(),
        }
    }

    // == Is Fresh ==
    /// Checks whether the entry is still fresh under the given TTL.
    ///
    /// Boundary condition: freshness uses strict `<`, so an entry whose
    /// age exactly equals the TTL is already expired. Freshness is
    /// favored over hit rate. A zero TTL makes every entry expired on
    /// arrival.
    ///
    /// # Returns
    /// - `true` if `now - stored_at < ttl`
    /// - `false` otherwise
    pub fn is_fresh(&self, ttl: Duration) -> bool {
        let age = current_timestamp_ms().saturating_sub(self.stored_at);
        (age as u128) < ttl.as_millis()
    }

    /// Inverse of `is_fresh`.
    pub fn is_expired(&self, ttl: Duration) -> bool {
        !self.is_fresh(ttl)
    }

    // == Age ==
    /// Returns the entry's age in milliseconds.
    ///
    /// Useful for debugging and statistics purposes.
    pub fn age_ms(&self) -> u64 {
        current_timestamp_ms().saturating_sub(self.stored_at)
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64
}

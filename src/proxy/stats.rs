//! Proxy Statistics Module
//!
//! Tracks cache performance metrics including hits, misses, and
//! invalidations.

use serde::Serialize;

// == Proxy Stats ==
/// Tracks cache performance metrics for one proxy instance.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProxyStats {
    /// Number of reads served from cache without contacting the remote service
    pub hits: u64,
    /// Number of reads that had to delegate (key absent or entry expired)
    pub misses: u64,
    /// Number of entries removed by invalidation (explicit or write-through)
    pub invalidations: u64,
    /// Current number of entries in the cache table
    pub total_entries: usize,
}

impl ProxyStats {
    // == Constructor ==
    /// Creates a new ProxyStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no reads have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Record Hit ==
    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Record Invalidation ==
    /// Increments the invalidation counter.
    pub fn record_invalidation(&mut self) {
        self.invalidations += 1;
    }

    // == Update Entry Count ==
    /// Updates the total entries count.
    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = ProxyStats::new();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.invalidations, 0);
        assert_eq!(stats.total_entries, 0);
    }

    #[test]
    fn test_hit_rate_no_reads() {
        let stats = ProxyStats::new();
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_all_hits() {
        let mut stats = ProxyStats::new();
        stats.record_hit();
        stats.record_hit();
        assert_eq!(stats.hit_rate(), 1.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let mut stats = ProxyStats::new();
        stats.record_hit();
        stats.record_miss();
        assert_eq!(stats.hit_rate(), 0.5);
    }

    #[test]
    fn test_record_invalidation() {
        let mut stats = ProxyStats::new();
        stats.record_invalidation();
        stats.record_invalidation();
        assert_eq!(stats.invalidations, 2);
    }

    #[test]
    fn test_serialize_snapshot() {
        let mut stats = ProxyStats::new();
        stats.record_hit();
        stats.set_total_entries(3);

        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("\"hits\":1"));
        assert!(json.contains("\"total_entries\":3"));
    }
}

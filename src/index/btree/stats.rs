//! Ordered index statistics tracking.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Statistics tracked by the ordered index.
///
/// All fields are atomic so `search`, which only takes `&self`, can still
/// record hits and misses, including under a shared lock in
/// [`SharedIndex`](crate::SharedIndex).
///
/// # Memory Ordering
/// `Ordering::Relaxed` everywhere: counters are independent and only need
/// atomicity, not cross-counter synchronization.
///
/// # Example
/// ```
/// use interchangedb_index::IndexStats;
/// use std::sync::atomic::Ordering;
///
/// let stats = IndexStats::new();
/// stats.search_hits.fetch_add(1, Ordering::Relaxed);
/// assert_eq!(stats.search_hits.load(Ordering::Relaxed), 1);
/// ```
#[derive(Debug)]
pub struct IndexStats {
    /// Number of `search` calls.
    pub searches: AtomicU64,

    /// Searches that found their key.
    pub search_hits: AtomicU64,

    /// Searches that reported not-found.
    pub search_misses: AtomicU64,

    /// Inserts that added a new key.
    pub inserts: AtomicU64,

    /// Inserts that replaced the value of an existing key.
    pub overwrites: AtomicU64,

    /// Node splits of any kind, root splits included.
    pub splits: AtomicU64,

    /// Root splits. Each one grows the tree by one level.
    pub root_splits: AtomicU64,
}

impl IndexStats {
    /// Create a new stats tracker with all counters at zero.
    pub fn new() -> Self {
        Self {
            searches: AtomicU64::new(0),
            search_hits: AtomicU64::new(0),
            search_misses: AtomicU64::new(0),
            inserts: AtomicU64::new(0),
            overwrites: AtomicU64::new(0),
            splits: AtomicU64::new(0),
            root_splits: AtomicU64::new(0),
        }
    }

    /// Fraction of searches that found their key (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        self.snapshot().hit_rate()
    }

    /// Get a snapshot of current statistics.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            searches: self.searches.load(Ordering::Relaxed),
            search_hits: self.search_hits.load(Ordering::Relaxed),
            search_misses: self.search_misses.load(Ordering::Relaxed),
            inserts: self.inserts.load(Ordering::Relaxed),
            overwrites: self.overwrites.load(Ordering::Relaxed),
            splits: self.splits.load(Ordering::Relaxed),
            root_splits: self.root_splits.load(Ordering::Relaxed),
        }
    }

    /// Reset all counters to zero.
    pub fn reset(&self) {
        self.searches.store(0, Ordering::Relaxed);
        self.search_hits.store(0, Ordering::Relaxed);
        self.search_misses.store(0, Ordering::Relaxed);
        self.inserts.store(0, Ordering::Relaxed);
        self.overwrites.store(0, Ordering::Relaxed);
        self.splits.store(0, Ordering::Relaxed);
        self.root_splits.store(0, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_search(&self, hit: bool) {
        self.searches.fetch_add(1, Ordering::Relaxed);
        if hit {
            self.search_hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.search_misses.fetch_add(1, Ordering::Relaxed);
        }
    }
}

impl Default for IndexStats {
    fn default() -> Self {
        Self::new()
    }
}

/// A point-in-time snapshot of index statistics.
///
/// Unlike `IndexStats`, this is a plain value that can be compared,
/// copied and printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatsSnapshot {
    pub searches: u64,
    pub search_hits: u64,
    pub search_misses: u64,
    pub inserts: u64,
    pub overwrites: u64,
    pub splits: u64,
    pub root_splits: u64,
}

impl StatsSnapshot {
    /// Fraction of searches that found their key (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        if self.searches == 0 {
            0.0
        } else {
            self.search_hits as f64 / self.searches as f64
        }
    }
}

impl fmt::Display for StatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stats {{ searches: {}, hit_rate: {:.2}%, inserts: {}, overwrites: {}, splits: {}, root_splits: {} }}",
            self.searches,
            self.hit_rate() * 100.0,
            self.inserts,
            self.overwrites,
            self.splits,
            self.root_splits
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = IndexStats::new();
        assert_eq!(stats.searches.load(Ordering::Relaxed), 0);
        assert_eq!(stats.splits.load(Ordering::Relaxed), 0);
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_record_search() {
        let stats = IndexStats::new();

        for _ in 0..7 {
            stats.record_search(true);
        }
        for _ in 0..3 {
            stats.record_search(false);
        }

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.searches, 10);
        assert_eq!(snapshot.search_hits, 7);
        assert_eq!(snapshot.search_misses, 3);
        assert_eq!(snapshot.hit_rate(), 0.7);
    }

    #[test]
    fn test_stats_reset() {
        let stats = IndexStats::new();
        stats.inserts.fetch_add(100, Ordering::Relaxed);
        stats.root_splits.fetch_add(2, Ordering::Relaxed);

        stats.reset();

        assert_eq!(stats.snapshot(), StatsSnapshot::default());
    }

    #[test]
    fn test_stats_display() {
        let stats = IndexStats::new();
        for _ in 0..4 {
            stats.record_search(true);
        }
        stats.record_search(false);
        stats.inserts.fetch_add(12, Ordering::Relaxed);
        stats.splits.fetch_add(3, Ordering::Relaxed);

        let display = format!("{}", stats.snapshot());

        assert!(display.contains("searches: 5"));
        assert!(display.contains("80.00%"));
        assert!(display.contains("inserts: 12"));
        assert!(display.contains("splits: 3"));
    }
}

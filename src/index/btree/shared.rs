//! Thread-safe handle around an [`OrderedIndex`].
//!
//! [`SharedIndex`] puts the whole tree behind one `parking_lot::RwLock`:
//! - `search` / `contains_key`: shared lock, many readers at once
//! - `insert`: exclusive lock, so no reader ever sees a half-finished split

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::common::{IndexConfig, Result};
use crate::index::btree::{OrderedIndex, StatsSnapshot};

/// A cloneable, lock-protected ordered index.
///
/// Clones share the same underlying tree.
///
/// # Example
/// ```
/// use interchangedb_index::SharedIndex;
/// use std::thread;
///
/// let index = SharedIndex::new(3).unwrap();
/// index.insert(1, "one".to_string());
///
/// let reader = index.clone();
/// let handle = thread::spawn(move || reader.search(&1));
///
/// assert_eq!(handle.join().unwrap(), Some("one".to_string()));
/// ```
pub struct SharedIndex<K, V> {
    inner: Arc<RwLock<OrderedIndex<K, V>>>,
}

impl<K: Ord, V> SharedIndex<K, V> {
    /// Create an empty shared index with minimum degree `degree`.
    ///
    /// # Errors
    /// - `Error::InvalidDegree` if `degree < MIN_DEGREE`
    /// - `Error::DegreeTooLarge` if `degree > MAX_DEGREE`
    pub fn new(degree: usize) -> Result<Self> {
        Ok(Self::from(OrderedIndex::new(degree)?))
    }

    /// Create an empty shared index from a config.
    ///
    /// # Errors
    /// - `Error::InvalidDegree` if the config's degree is below `MIN_DEGREE`
    /// - `Error::DegreeTooLarge` if the config's degree is above `MAX_DEGREE`
    pub fn with_config(config: IndexConfig) -> Result<Self> {
        Ok(Self::from(OrderedIndex::with_config(config)?))
    }

    /// Check whether `key` is present. Takes the shared lock.
    ///
    /// Not counted in the search statistics.
    pub fn contains_key(&self, key: &K) -> bool {
        self.inner.read().contains_key(key)
    }

    /// Insert a key/value pair. Takes the exclusive lock.
    ///
    /// Returns the previous value if the key was already present.
    pub fn insert(&self, key: K, value: V) -> Option<V> {
        self.inner.write().insert(key, value)
    }

    /// Number of key/value pairs stored.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Whether the index holds no keys.
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Snapshot of the underlying index's counters.
    pub fn stats(&self) -> StatsSnapshot {
        self.inner.read().stats().snapshot()
    }

    /// Hold the shared lock across several reads.
    pub fn read(&self) -> RwLockReadGuard<'_, OrderedIndex<K, V>> {
        self.inner.read()
    }

    /// Hold the exclusive lock across several writes.
    pub fn write(&self) -> RwLockWriteGuard<'_, OrderedIndex<K, V>> {
        self.inner.write()
    }
}

impl<K: Ord, V: Clone> SharedIndex<K, V> {
    /// Look up `key`, cloning the value out so the lock is released on return.
    pub fn search(&self, key: &K) -> Option<V> {
        self.inner.read().search(key).cloned()
    }
}

impl<K, V> Clone for SharedIndex<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> From<OrderedIndex<K, V>> for SharedIndex<K, V> {
    fn from(index: OrderedIndex<K, V>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(index)),
        }
    }
}

impl<K: Ord, V> Default for SharedIndex<K, V> {
    fn default() -> Self {
        Self::from(OrderedIndex::default())
    }
}

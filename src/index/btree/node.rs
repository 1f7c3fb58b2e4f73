//! Node - a single B-tree node stored in the index arena.
//!
//! A [`Node`] holds parallel `keys`/`values` vectors plus, for internal
//! nodes, one more child id than it has keys.

use crate::common::NodeId;

/// Upper bound on the capacity reserved up front for a new node.
///
/// Nodes grow on demand past this, so very large degrees never allocate
/// a full node's worth of slots before any key arrives.
const CAPACITY_HINT: usize = 64;

/// Result of searching for a key within one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SearchResult {
    /// Key was found at the given index.
    Found(usize),
    /// Key was not found; index is the first key greater than it, which is
    /// both the insertion point and the child to descend into.
    GoDown(usize),
}

/// A node in the B-tree.
///
/// # Layout
/// ```text
///            keys:      [ k0 | k1 | k2 ]
///            values:    [ v0 | v1 | v2 ]
///            children: [c0 | c1 | c2 | c3]
///
///   c0 < k0 < c1 < k1 < c2 < k2 < c3
/// ```
/// Leaves have an empty `children` vector.
#[derive(Debug, Clone)]
pub(crate) struct Node<K, V> {
    pub(crate) keys: Vec<K>,
    pub(crate) values: Vec<V>,
    pub(crate) children: Vec<NodeId>,
}

impl<K, V> Node<K, V> {
    /// Create an empty leaf sized for a node of `max_keys` keys.
    pub(crate) fn new_leaf(max_keys: usize) -> Self {
        let capacity = max_keys.min(CAPACITY_HINT);
        Self {
            keys: Vec::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
            children: Vec::new(),
        }
    }

    /// Create an empty internal node whose only child is `child`.
    ///
    /// Used when the root splits: the old root becomes child 0 of the new
    /// root, which then receives the promoted median.
    pub(crate) fn new_root_above(child: NodeId, max_keys: usize) -> Self {
        let capacity = max_keys.min(CAPACITY_HINT);
        let mut children = Vec::with_capacity(capacity + 1);
        children.push(child);
        Self {
            keys: Vec::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
            children,
        }
    }

    #[inline]
    pub(crate) fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    #[inline]
    pub(crate) fn key_count(&self) -> usize {
        self.keys.len()
    }

    /// A full node holds exactly `max_keys` (`2t - 1`) keys.
    #[inline]
    pub(crate) fn is_full(&self, max_keys: usize) -> bool {
        self.keys.len() >= max_keys
    }

    /// Shift-insert a key/value pair at `index`.
    pub(crate) fn insert_entry(&mut self, index: usize, key: K, value: V) {
        self.keys.insert(index, key);
        self.values.insert(index, value);
    }

    /// Split a full node around its median at index `degree - 1`.
    ///
    /// After the call `self` keeps keys `[0, t-1)` and, if internal,
    /// children `[0, t)`. The returned sibling owns keys `(t-1, 2t-1)` and
    /// children `[t, 2t)`. The median pair is returned separately and
    /// belongs to neither half.
    pub(crate) fn split(&mut self, degree: usize) -> (K, V, Node<K, V>) {
        debug_assert_eq!(self.keys.len(), 2 * degree - 1, "split of a non-full node");
        let mid = degree - 1;

        // Take [mid, 2t-1), then peel the median off the front.
        let mut upper_keys = self.keys.split_off(mid);
        let mut upper_values = self.values.split_off(mid);
        let median_key = upper_keys.remove(0);
        let median_value = upper_values.remove(0);

        let upper_children = if self.is_leaf() {
            Vec::new()
        } else {
            self.children.split_off(mid + 1)
        };

        let sibling = Node {
            keys: upper_keys,
            values: upper_values,
            children: upper_children,
        };

        (median_key, median_value, sibling)
    }
}

impl<K: Ord, V> Node<K, V> {
    /// Binary search for `key` among this node's keys.
    pub(crate) fn search(&self, key: &K) -> SearchResult {
        match self.keys.binary_search(key) {
            Ok(idx) => SearchResult::Found(idx),
            Err(idx) => SearchResult::GoDown(idx),
        }
    }
}

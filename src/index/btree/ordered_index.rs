//! OrderedIndex - the B-tree.
//!
//! The [`OrderedIndex`] provides:
//! - Point lookup (`search`)
//! - Point insertion with pre-emptive splitting (`insert`)
//! - Overwrite-in-place for keys that are already present
//! - Read-only introspection for tests and debugging

use std::collections::VecDeque;
use std::mem;
use std::sync::atomic::Ordering as AtomicOrdering;

use tracing::{debug, trace};

use crate::common::{IndexConfig, NodeId, Result};
use crate::index::btree::node::{Node, SearchResult};
use crate::index::btree::IndexStats;

/// An in-memory B-tree mapping ordered keys to opaque values.
///
/// # Architecture
/// ```text
/// ┌──────────────────────────────────────────────────────────┐
/// │                      OrderedIndex                        │
/// │  ┌──────────┐   ┌─────────────────────────────────────┐  │
/// │  │   root   │──▶│     nodes: Vec<Node<K, V>>          │  │
/// │  │  NodeId  │   │  [Node0] [Node1] [Node2] ...        │  │
/// │  └──────────┘   └─────────────────────────────────────┘  │
/// │  ┌──────────┐   ┌──────────┐   ┌──────────────────────┐  │
/// │  │  config  │   │ len,     │   │ stats: IndexStats    │  │
/// │  │ degree t │   │ height   │   │ (atomic counters)    │  │
/// │  └──────────┘   └──────────┘   └──────────────────────┘  │
/// └──────────────────────────────────────────────────────────┘
/// ```
///
/// Nodes live in an append-only arena and refer to their children by
/// [`NodeId`]. A node is created only by construction (the first root) or
/// by a split, and is never freed.
///
/// # Capacity
/// For degree `t`, every node holds at most `2t - 1` keys and every
/// non-root node at least `t - 1`. All leaves sit at the same depth.
///
/// # Duplicate Keys
/// Inserting a key that is already present replaces its value and returns
/// the old one, like [`std::collections::BTreeMap::insert`].
///
/// # Example
/// ```
/// use interchangedb_index::OrderedIndex;
///
/// let mut index = OrderedIndex::new(3).unwrap();
/// index.insert(10, "Record 10");
/// index.insert(15, "Record 15");
///
/// assert_eq!(index.search(&10), Some(&"Record 10"));
/// assert_eq!(index.search(&99), None);
/// ```
#[derive(Debug)]
pub struct OrderedIndex<K, V> {
    /// Node arena. `nodes[id.0]` is the node with id `id`.
    nodes: Vec<Node<K, V>>,

    /// Current root. Changes only when the root splits.
    root: NodeId,

    /// Branching configuration, validated at construction.
    config: IndexConfig,

    /// Number of key/value pairs stored.
    len: usize,

    /// Number of node levels; 1 for a lone root leaf.
    height: usize,

    /// Operation counters.
    stats: IndexStats,
}

impl<K: Ord, V> OrderedIndex<K, V> {
    /// Create an empty index with minimum degree `degree`.
    ///
    /// # Errors
    /// - `Error::InvalidDegree` if `degree < MIN_DEGREE`
    /// - `Error::DegreeTooLarge` if `degree > MAX_DEGREE`
    pub fn new(degree: usize) -> Result<Self> {
        Self::with_config(IndexConfig::new(degree))
    }

    /// Create an empty index from a config.
    ///
    /// # Errors
    /// - `Error::InvalidDegree` if the config's degree is below `MIN_DEGREE`
    /// - `Error::DegreeTooLarge` if the config's degree is above `MAX_DEGREE`
    pub fn with_config(config: IndexConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    /// Build the single empty leaf root. `config` must already be valid.
    fn from_valid_config(config: IndexConfig) -> Self {
        debug!(degree = config.degree, "creating ordered index");
        Self {
            nodes: vec![Node::new_leaf(config.max_keys())],
            root: NodeId::FIRST,
            config,
            len: 0,
            height: 1,
            stats: IndexStats::new(),
        }
    }

    // ========================================================================
    // Public API: Lookup
    // ========================================================================

    /// Look up the value stored under `key`.
    ///
    /// Returns `None` if the key was never inserted. Visits one node per
    /// level and binary-searches each.
    pub fn search(&self, key: &K) -> Option<&V> {
        let found = self.locate(key);
        self.stats.record_search(found.is_some());
        found.map(|(node_id, idx)| &self.nodes[node_id.0].values[idx])
    }

    /// Check whether `key` is present.
    ///
    /// Not counted in the search statistics.
    pub fn contains_key(&self, key: &K) -> bool {
        self.locate(key).is_some()
    }

    /// Mutable access to the value stored under `key`.
    ///
    /// Only the payload can change; the tree structure is untouched.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let (node_id, idx) = self.locate(key)?;
        Some(&mut self.nodes[node_id.0].values[idx])
    }

    // ========================================================================
    // Public API: Insert
    // ========================================================================

    /// Insert a key/value pair.
    ///
    /// Returns `None` if the key is new. If the key already exists its value
    /// is replaced and the previous value is returned; `len` is unchanged.
    ///
    /// Full nodes on the path are split on the way down, so the leaf that
    /// finally receives the key always has room. The root is split first
    /// when full, which is the only way the tree grows taller.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let max_keys = self.config.max_keys();

        if self.nodes[self.root.0].is_full(max_keys) {
            self.grow_root();
        }

        let old = self.insert_non_full(self.root, key, value);

        if old.is_some() {
            self.stats.overwrites.fetch_add(1, AtomicOrdering::Relaxed);
            trace!("overwrote existing key");
        } else {
            self.len += 1;
            self.stats.inserts.fetch_add(1, AtomicOrdering::Relaxed);
            trace!(len = self.len, "inserted new key");
        }

        old
    }

    // ========================================================================
    // Public API: Introspection
    // ========================================================================

    /// Number of key/value pairs stored.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the index holds no keys.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Minimum degree `t`.
    #[inline]
    pub fn degree(&self) -> usize {
        self.config.degree
    }

    /// The configuration this index was built with.
    #[inline]
    pub fn config(&self) -> IndexConfig {
        self.config
    }

    /// Keys held by a full node (`2t - 1`).
    #[inline]
    pub fn max_keys(&self) -> usize {
        self.config.max_keys()
    }

    /// Fewest keys a non-root node may hold (`t - 1`).
    #[inline]
    pub fn min_keys(&self) -> usize {
        self.config.min_keys()
    }

    /// Number of node levels. A fresh index has height 1.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of nodes allocated. Nodes are never freed.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of keys held directly by the root.
    pub fn root_key_count(&self) -> usize {
        self.nodes[self.root.0].key_count()
    }

    /// Whether the root is still a single leaf (no split has happened).
    pub fn is_root_leaf(&self) -> bool {
        self.nodes[self.root.0].is_leaf()
    }

    /// Id of the current root node.
    #[inline]
    pub fn root_id(&self) -> NodeId {
        self.root
    }

    /// Operation counters.
    #[inline]
    pub fn stats(&self) -> &IndexStats {
        &self.stats
    }

    // ========================================================================
    // Public API: Traversal (testing and debugging)
    // ========================================================================

    /// All key/value pairs in ascending key order.
    pub fn in_order(&self) -> Vec<(&K, &V)> {
        let mut out = Vec::with_capacity(self.len);
        self.walk(self.root, &mut out);
        out
    }

    /// All keys in ascending order.
    pub fn keys(&self) -> Vec<&K> {
        self.in_order().into_iter().map(|(k, _)| k).collect()
    }

    /// Keys of every node, grouped by level from the root down.
    ///
    /// `levels()[d][n]` is the key list of the `n`-th node (left to right)
    /// at depth `d`.
    pub fn levels(&self) -> Vec<Vec<Vec<&K>>> {
        let mut levels: Vec<Vec<Vec<&K>>> = Vec::with_capacity(self.height);
        let mut queue = VecDeque::new();
        queue.push_back((self.root, 0usize));

        while let Some((node_id, depth)) = queue.pop_front() {
            let node = &self.nodes[node_id.0];
            if levels.len() <= depth {
                levels.push(Vec::new());
            }
            levels[depth].push(node.keys.iter().collect());
            for &child in &node.children {
                queue.push_back((child, depth + 1));
            }
        }

        levels
    }

    // ========================================================================
    // Internal: accessors for validation
    // ========================================================================

    #[inline]
    pub(crate) fn node(&self, node_id: NodeId) -> &Node<K, V> {
        &self.nodes[node_id.0]
    }

    // ========================================================================
    // Internal: Descent
    // ========================================================================

    /// Find the node and slot holding `key`.
    fn locate(&self, key: &K) -> Option<(NodeId, usize)> {
        let mut node_id = self.root;
        loop {
            let node = &self.nodes[node_id.0];
            match node.search(key) {
                SearchResult::Found(idx) => return Some((node_id, idx)),
                SearchResult::GoDown(_) if node.is_leaf() => return None,
                SearchResult::GoDown(idx) => node_id = node.children[idx],
            }
        }
    }

    /// Insert into the subtree rooted at `node_id`, which must not be full.
    fn insert_non_full(&mut self, mut node_id: NodeId, key: K, value: V) -> Option<V> {
        let max_keys = self.config.max_keys();

        loop {
            let node = &mut self.nodes[node_id.0];
            let mut idx = match node.search(&key) {
                SearchResult::Found(idx) => {
                    return Some(mem::replace(&mut node.values[idx], value));
                }
                SearchResult::GoDown(idx) => idx,
            };

            if node.is_leaf() {
                node.insert_entry(idx, key, value);
                return None;
            }

            let child_id = node.children[idx];
            if self.nodes[child_id.0].is_full(max_keys) {
                self.split_child(node_id, idx);

                // The median now sits at `idx`; pick the half the key belongs to.
                let parent = &mut self.nodes[node_id.0];
                match key.cmp(&parent.keys[idx]) {
                    std::cmp::Ordering::Equal => {
                        return Some(mem::replace(&mut parent.values[idx], value));
                    }
                    std::cmp::Ordering::Greater => idx += 1,
                    std::cmp::Ordering::Less => {}
                }
            }

            node_id = self.nodes[node_id.0].children[idx];
        }
    }

    // ========================================================================
    // Internal: Splitting
    // ========================================================================

    /// Put a fresh root above the full old root and split the old root.
    fn grow_root(&mut self) {
        let old_root = self.root;
        let new_root = self.alloc(Node::new_root_above(old_root, self.config.max_keys()));

        self.root = new_root;
        self.split_child(new_root, 0);
        self.height += 1;

        self.stats.root_splits.fetch_add(1, AtomicOrdering::Relaxed);
        debug!(
            old_root = %old_root,
            new_root = %new_root,
            height = self.height,
            "root split"
        );
    }

    /// Split the full child at `parent.children[index]`.
    ///
    /// The child's median moves into `parent` at `index` and the new sibling
    /// is linked at `index + 1`. `parent` must not be full.
    fn split_child(&mut self, parent: NodeId, index: usize) {
        let degree = self.config.degree;
        let child = self.nodes[parent.0].children[index];

        let (median_key, median_value, sibling) = self.nodes[child.0].split(degree);
        let sibling_id = self.alloc(sibling);

        let parent_node = &mut self.nodes[parent.0];
        parent_node.insert_entry(index, median_key, median_value);
        parent_node.children.insert(index + 1, sibling_id);

        self.stats.splits.fetch_add(1, AtomicOrdering::Relaxed);
        trace!(
            parent = %parent,
            child = %child,
            sibling = %sibling_id,
            index,
            "split child"
        );
    }

    /// Append a node to the arena.
    fn alloc(&mut self, node: Node<K, V>) -> NodeId {
        let id = NodeId::next_after(self.nodes.len());
        self.nodes.push(node);
        id
    }

    fn walk<'a>(&'a self, node_id: NodeId, out: &mut Vec<(&'a K, &'a V)>) {
        let node = &self.nodes[node_id.0];
        for i in 0..node.key_count() {
            if !node.is_leaf() {
                self.walk(node.children[i], out);
            }
            out.push((&node.keys[i], &node.values[i]));
        }
        if let Some(&last) = node.children.last() {
            self.walk(last, out);
        }
    }
}

impl<K: Ord, V> Default for OrderedIndex<K, V> {
    fn default() -> Self {
        Self::from_valid_config(IndexConfig::default())
    }
}

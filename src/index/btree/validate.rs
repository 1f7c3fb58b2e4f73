//! Structural invariant checking for [`OrderedIndex`].
//!
//! `validate()` walks every node once and reports the first violation it
//! finds. Normal operations never call it; tests call it after every
//! mutation.

use crate::common::{Error, NodeId, Result};
use crate::index::btree::OrderedIndex;

/// Per-walk state threaded through the recursion.
struct Walk {
    /// Depth of the first leaf reached; every other leaf must match.
    leaf_depth: Option<usize>,
    /// Key/value pairs seen.
    entries: usize,
    /// Nodes seen.
    nodes: usize,
}

fn violation(node: NodeId, reason: impl Into<String>) -> Error {
    Error::InvariantViolation {
        node,
        reason: reason.into(),
    }
}

impl<K: Ord, V> OrderedIndex<K, V> {
    /// Check every structural invariant of the tree.
    ///
    /// Verified:
    /// - keys strictly ascending within each node
    /// - `values.len() == keys.len()`
    /// - non-root nodes hold between `t - 1` and `2t - 1` keys; the root at
    ///   most `2t - 1`
    /// - internal nodes have exactly `keys + 1` children
    /// - every key in a subtree lies strictly between its parent's
    ///   separating keys
    /// - all leaves at the same depth, equal to `height()`
    /// - every allocated node reachable exactly once, and `len()` matching
    ///   the number of stored pairs
    ///
    /// # Errors
    /// - `Error::InvariantViolation` naming the first offending node
    pub fn validate(&self) -> Result<()> {
        let mut walk = Walk {
            leaf_depth: None,
            entries: 0,
            nodes: 0,
        };

        self.validate_node(self.root_id(), None, None, 1, &mut walk)?;

        if walk.leaf_depth != Some(self.height()) {
            return Err(violation(
                self.root_id(),
                format!(
                    "leaf depth {:?} does not match height {}",
                    walk.leaf_depth,
                    self.height()
                ),
            ));
        }
        if walk.entries != self.len() {
            return Err(violation(
                self.root_id(),
                format!("found {} entries but len is {}", walk.entries, self.len()),
            ));
        }
        if walk.nodes != self.node_count() {
            return Err(violation(
                self.root_id(),
                format!(
                    "reached {} nodes but {} are allocated",
                    walk.nodes,
                    self.node_count()
                ),
            ));
        }

        Ok(())
    }

    fn validate_node(
        &self,
        node_id: NodeId,
        lower: Option<&K>,
        upper: Option<&K>,
        depth: usize,
        walk: &mut Walk,
    ) -> Result<()> {
        let node = self.node(node_id);
        let is_root = node_id == self.root_id();
        let count = node.key_count();

        walk.nodes += 1;
        walk.entries += count;

        if node.values.len() != count {
            return Err(violation(
                node_id,
                format!("{} keys but {} values", count, node.values.len()),
            ));
        }

        if count > self.max_keys() {
            return Err(violation(
                node_id,
                format!("{} keys exceeds maximum {}", count, self.max_keys()),
            ));
        }
        if !is_root && count < self.min_keys() {
            return Err(violation(
                node_id,
                format!("{} keys below minimum {}", count, self.min_keys()),
            ));
        }

        if node.keys.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(violation(node_id, "keys not strictly ascending"));
        }

        if let (Some(first), Some(lower)) = (node.keys.first(), lower) {
            if first <= lower {
                return Err(violation(node_id, "key not above parent's lower bound"));
            }
        }
        if let (Some(last), Some(upper)) = (node.keys.last(), upper) {
            if last >= upper {
                return Err(violation(node_id, "key not below parent's upper bound"));
            }
        }

        if node.is_leaf() {
            match walk.leaf_depth {
                None => walk.leaf_depth = Some(depth),
                Some(expected) if expected != depth => {
                    return Err(violation(
                        node_id,
                        format!("leaf at depth {} but expected {}", depth, expected),
                    ));
                }
                Some(_) => {}
            }
            return Ok(());
        }

        if node.children.len() != count + 1 {
            return Err(violation(
                node_id,
                format!("{} keys but {} children", count, node.children.len()),
            ));
        }
        if walk.nodes > self.node_count() {
            return Err(violation(node_id, "node reachable more than once"));
        }

        for (i, &child) in node.children.iter().enumerate() {
            let child_lower = if i == 0 { lower } else { Some(&node.keys[i - 1]) };
            let child_upper = if i == count { upper } else { Some(&node.keys[i]) };
            self.validate_node(child, child_lower, child_upper, depth + 1, walk)?;
        }

        Ok(())
    }
}

//! Node identifier type.

use std::fmt;

/// Position of a node in the index's node arena.
///
/// The arena is append-only: a split pushes the new sibling (and, for a
/// root split, the new root) onto the end, and nothing is ever removed.
/// So an id is assigned once, stays valid for the life of the tree, and
/// ids order nodes by creation time. Ids are never reused.
///
/// # Example
/// ```
/// use interchangedb_index::{NodeId, OrderedIndex};
///
/// let mut index = OrderedIndex::new(2).unwrap();
/// assert_eq!(index.root_id(), NodeId::FIRST);
///
/// for key in 0..4 {
///     index.insert(key, ());
/// }
/// // The fourth insert grew a new root (Node(1)) above the full first root,
/// // then split it, pushing the sibling as Node(2).
/// assert_eq!(index.root_id(), NodeId::new(1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The initial root leaf every index starts with.
    pub const FIRST: NodeId = NodeId(0);

    /// Wrap an arena slot.
    #[inline]
    pub fn new(slot: usize) -> Self {
        NodeId(slot)
    }

    /// Id of the node that will be pushed onto an arena currently holding
    /// `len` nodes.
    #[inline]
    pub(crate) fn next_after(len: usize) -> Self {
        NodeId(len)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({})", self.0)
    }
}

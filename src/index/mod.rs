//! Index structures.
//!
//! Currently implements:
//! - [`btree`] - In-memory B-tree ([`OrderedIndex`])

pub mod btree;

pub use btree::{IndexStats, OrderedIndex, SharedIndex, StatsSnapshot};

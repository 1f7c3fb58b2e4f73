//! B-tree index implementation.
//!
//! # Components
//! - [`OrderedIndex`] - The B-tree: point lookup and insertion
//! - [`SharedIndex`] - `RwLock`-guarded handle for concurrent callers
//! - [`IndexStats`] / [`StatsSnapshot`] - Operation counters
//!
//! Deletion, range scans and persistence are not supported.

mod node;
mod ordered_index;
mod shared;
mod stats;
mod validate;

pub use ordered_index::OrderedIndex;
pub use shared::SharedIndex;
pub use stats::{IndexStats, StatsSnapshot};

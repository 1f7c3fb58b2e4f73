//! InterchangeDB Index - an in-memory, order-preserving B-tree index.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     interchangedb-index                         │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │        SharedIndex (index/btree/shared.rs)               │   │
//! │  │     RwLock: shared search ←─OR─→ exclusive insert        │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │        OrderedIndex (index/btree/ordered_index.rs)       │   │
//! │  │   search · insert · split · validate · in-order walk     │   │
//! │  │   ┌─────────────────────────────────────────────────┐   │   │
//! │  │   │   Node arena: Vec<Node>, addressed by NodeId     │   │   │
//! │  │   └─────────────────────────────────────────────────┘   │   │
//! │  │              IndexStats (atomic counters)                │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │           Common (common/)                               │   │
//! │  │        IndexConfig + Error + NodeId                      │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (NodeId, Error, config)
//! - [`index`] - Index structures (B-tree)
//!
//! # Quick Start
//! ```
//! use interchangedb_index::OrderedIndex;
//!
//! // Degree 3: at most 5 keys per node
//! let mut index = OrderedIndex::new(3).unwrap();
//!
//! for key in [1, 3, 7, 10, 11, 13, 14, 15, 18, 16, 19, 24] {
//!     index.insert(key, format!("Record {}", key));
//! }
//!
//! assert_eq!(index.search(&10).map(String::as_str), Some("Record 10"));
//! assert!(index.search(&99).is_none());
//! assert!(index.validate().is_ok());
//! ```
//!
//! # Logging
//! The crate emits `tracing` events (`debug!` on root splits, `trace!` on
//! node splits and inserts) and never installs a subscriber itself.

pub mod common;
pub mod index;

// Re-export commonly used items at crate root for convenience
pub use common::config::{IndexConfig, DEFAULT_DEGREE, MAX_DEGREE, MIN_DEGREE};
pub use common::{Error, NodeId, Result};

pub use index::btree::{IndexStats, OrderedIndex, SharedIndex, StatsSnapshot};

//! Common types and utilities shared across the index.
//!
//! This module contains fundamental primitives used throughout the codebase:
//! - Configuration constants and [`IndexConfig`]
//! - Error types
//! - Identifiers ([`NodeId`])

pub mod config;
pub mod error;
mod node_id;

pub use config::{IndexConfig, DEFAULT_DEGREE, MAX_DEGREE, MIN_DEGREE};
pub use error::{Error, Result};
pub use node_id::NodeId;

//! Error types for the ordered index.

use thiserror::Error;

use crate::common::NodeId;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors raised by the index.
///
/// A missing key is not an error: `search` returns `None`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The configured degree cannot satisfy the split invariant.
    ///
    /// Raised once, at construction.
    #[error("Invalid degree {degree}: must be at least {min}")]
    InvalidDegree { degree: usize, min: usize },

    /// The configured degree is so large that node capacity `2t`
    /// overflows `usize`.
    #[error("Invalid degree {degree}: must be at most {max}")]
    DegreeTooLarge { degree: usize, max: usize },

    /// A structural invariant does not hold.
    ///
    /// Only reported by `validate()`. Seeing this indicates a bug.
    #[error("Invariant violated at {node}: {reason}")]
    InvariantViolation { node: NodeId, reason: String },
}

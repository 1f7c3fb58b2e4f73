//! Configuration for the ordered index.

use crate::common::{Error, Result};

/// Smallest usable minimum degree.
///
/// With `t = 1` a full node would hold a single key, and splitting it
/// leaves two empty halves. `t = 2` is the classic 2-3-4 tree.
pub const MIN_DEGREE: usize = 2;

/// Largest usable minimum degree.
///
/// An internal node carries up to `2t` children, so `2t` must fit in a
/// `usize`.
pub const MAX_DEGREE: usize = usize::MAX / 2;

/// Degree used by [`IndexConfig::default`].
///
/// # Node Capacity
/// With `t = 3`:
/// - Max keys per node: `2t - 1 = 5`
/// - Min keys per non-root node: `t - 1 = 2`
/// - Max children per internal node: `2t = 6`
pub const DEFAULT_DEGREE: usize = 3;

/// Runtime configuration for an [`OrderedIndex`](crate::OrderedIndex).
///
/// # Example
/// ```
/// use interchangedb_index::IndexConfig;
///
/// let config = IndexConfig::default().with_degree(4);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.max_keys(), 7);
/// assert_eq!(config.min_keys(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexConfig {
    /// Minimum branching factor `t`.
    pub degree: usize,
}

impl IndexConfig {
    /// Create a config with the given degree. Not validated until use.
    pub fn new(degree: usize) -> Self {
        Self { degree }
    }

    /// Replace the degree.
    pub fn with_degree(mut self, degree: usize) -> Self {
        self.degree = degree;
        self
    }

    /// Check that the degree can satisfy the split invariant and that the
    /// node capacity `2t` is representable.
    ///
    /// # Errors
    /// - `Error::InvalidDegree` if `degree < MIN_DEGREE`
    /// - `Error::DegreeTooLarge` if `2 * degree` overflows `usize`
    pub fn validate(&self) -> Result<()> {
        if self.degree < MIN_DEGREE {
            return Err(Error::InvalidDegree {
                degree: self.degree,
                min: MIN_DEGREE,
            });
        }
        if self.degree.checked_mul(2).is_none() {
            return Err(Error::DegreeTooLarge {
                degree: self.degree,
                max: MAX_DEGREE,
            });
        }
        Ok(())
    }

    /// Keys held by a full node (`2t - 1`).
    #[inline]
    pub fn max_keys(&self) -> usize {
        2 * self.degree - 1
    }

    /// Fewest keys a non-root node may hold (`t - 1`).
    #[inline]
    pub fn min_keys(&self) -> usize {
        self.degree - 1
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DEGREE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = IndexConfig::default();
        assert_eq!(config.degree, DEFAULT_DEGREE);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_capacity_bounds() {
        let config = IndexConfig::new(3);
        assert_eq!(config.max_keys(), 5);
        assert_eq!(config.min_keys(), 2);

        let config = IndexConfig::new(MIN_DEGREE);
        assert_eq!(config.max_keys(), 3);
        assert_eq!(config.min_keys(), 1);
    }

    #[test]
    fn test_degree_below_minimum_rejected() {
        for degree in 0..MIN_DEGREE {
            match IndexConfig::new(degree).validate() {
                Err(Error::InvalidDegree { degree: d, min }) => {
                    assert_eq!(d, degree);
                    assert_eq!(min, MIN_DEGREE);
                }
                other => panic!("Expected InvalidDegree, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_degree_above_maximum_rejected() {
        assert!(IndexConfig::new(MAX_DEGREE).validate().is_ok());
        assert_eq!(IndexConfig::new(MAX_DEGREE).max_keys(), usize::MAX - 2);

        for degree in [MAX_DEGREE + 1, usize::MAX] {
            assert_eq!(
                IndexConfig::new(degree).validate(),
                Err(Error::DegreeTooLarge {
                    degree,
                    max: MAX_DEGREE
                })
            );
        }
    }

    #[test]
    fn test_with_degree() {
        let config = IndexConfig::default().with_degree(8);
        assert_eq!(config.degree, 8);
        assert_eq!(config.max_keys(), 15);
    }
}

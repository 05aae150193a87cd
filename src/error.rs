//! Error types for the Particle Swarm optimizer.
//!
//! Configuration problems are surfaced through [`PsoError`] before any
//! objective evaluation is dispatched; once a run has started the only
//! recoverable failure mode is a bad evaluation, which is handled inside
//! the engine by the reserved fitness ceiling rather than an error.

use thiserror::Error;

/// Errors that can occur while configuring a Particle Swarm run.
#[derive(Debug, Error)]
pub enum PsoError {
    /// Lower and upper bounds have different lengths.
    #[error("bounds mismatch: lower has {lower_len} elements, upper has {upper_len}")]
    BoundsMismatch {
        /// Length of the lower bounds array
        lower_len: usize,
        /// Length of the upper bounds array
        upper_len: usize,
    },

    /// A lower bound exceeds its corresponding upper bound.
    #[error("invalid bounds at index {index}: lower ({lower}) > upper ({upper})")]
    InvalidBounds {
        /// Index of the invalid bound pair
        index: usize,
        /// The lower bound value
        lower: f64,
        /// The upper bound value
        upper: f64,
    },

    /// The search space has zero dimensions.
    #[error("bounds must cover at least one dimension")]
    EmptyBounds,

    /// Population size is too small (must be >= 1).
    #[error("population size ({pop_size}) must be >= 1")]
    PopulationTooSmall {
        /// The invalid population size
        pop_size: usize,
    },

    /// Seed vector for particle 0 has the wrong dimension.
    #[error("seed vector dimension mismatch: expected {expected}, got {got}")]
    SeedDimensionMismatch {
        /// Expected dimension (number of bound pairs)
        expected: usize,
        /// Actual dimension provided
        got: usize,
    },
}

/// A specialized `Result` type for PSO operations.
pub type Result<T> = std::result::Result<T, PsoError>;

impl PsoError {
    /// Returns `true` if this is a bounds-related error.
    ///
    /// This includes `BoundsMismatch`, `InvalidBounds` and `EmptyBounds`.
    pub fn is_bounds_error(&self) -> bool {
        matches!(
            self,
            PsoError::BoundsMismatch { .. } | PsoError::InvalidBounds { .. } | PsoError::EmptyBounds
        )
    }

    /// Returns `true` if this is a configuration-related error.
    pub fn is_config_error(&self) -> bool {
        matches!(self, PsoError::PopulationTooSmall { .. })
    }

    /// Returns `true` if this is a dimension mismatch error.
    pub fn is_dimension_error(&self) -> bool {
        matches!(self, PsoError::SeedDimensionMismatch { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PsoError::BoundsMismatch {
            lower_len: 3,
            upper_len: 5,
        };
        assert_eq!(
            err.to_string(),
            "bounds mismatch: lower has 3 elements, upper has 5"
        );
    }

    #[test]
    fn test_is_bounds_error() {
        let bounds_err = PsoError::InvalidBounds {
            index: 2,
            lower: 4.0,
            upper: 1.0,
        };
        let config_err = PsoError::PopulationTooSmall { pop_size: 0 };

        assert!(bounds_err.is_bounds_error());
        assert!(!config_err.is_bounds_error());
    }

    #[test]
    fn test_is_config_error() {
        let config_err = PsoError::PopulationTooSmall { pop_size: 0 };
        let dim_err = PsoError::SeedDimensionMismatch {
            expected: 5,
            got: 3,
        };

        assert!(config_err.is_config_error());
        assert!(!dim_err.is_config_error());
    }

    #[test]
    fn test_is_dimension_error() {
        let dim_err = PsoError::SeedDimensionMismatch {
            expected: 5,
            got: 3,
        };
        let bounds_err = PsoError::EmptyBounds;

        assert!(dim_err.is_dimension_error());
        assert!(!bounds_err.is_dimension_error());
    }
}

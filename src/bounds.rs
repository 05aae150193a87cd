//! Per-dimension search box with a saturating clamp policy.

use ndarray::{Array1, Zip};
use rand::Rng;

use crate::error::{PsoError, Result};

/// Immutable `[min, max]` box constraining the search space.
///
/// Every candidate position is clamped into the box before it is handed
/// to the objective; out-of-range components saturate to the nearest
/// boundary value and are never rejected or wrapped.
#[derive(Debug, Clone)]
pub struct Bounds {
    lower: Array1<f64>,
    upper: Array1<f64>,
}

impl Bounds {
    /// Creates bounds from lower and upper arrays.
    ///
    /// # Errors
    ///
    /// Returns `PsoError::BoundsMismatch` if the arrays differ in length,
    /// `PsoError::EmptyBounds` if they are empty, and
    /// `PsoError::InvalidBounds` if any lower bound exceeds its upper bound.
    pub fn new(lower: Array1<f64>, upper: Array1<f64>) -> Result<Self> {
        if lower.len() != upper.len() {
            return Err(PsoError::BoundsMismatch {
                lower_len: lower.len(),
                upper_len: upper.len(),
            });
        }
        if lower.is_empty() {
            return Err(PsoError::EmptyBounds);
        }
        for i in 0..lower.len() {
            if lower[i] > upper[i] {
                return Err(PsoError::InvalidBounds {
                    index: i,
                    lower: lower[i],
                    upper: upper[i],
                });
            }
        }
        Ok(Self { lower, upper })
    }

    /// Creates bounds from `(min, max)` pairs, one per dimension.
    ///
    /// # Errors
    ///
    /// Same validation as [`Bounds::new`].
    pub fn from_pairs(pairs: &[(f64, f64)]) -> Result<Self> {
        let n = pairs.len();
        let mut lower = Array1::<f64>::zeros(n);
        let mut upper = Array1::<f64>::zeros(n);
        for (i, (lo, hi)) in pairs.iter().enumerate() {
            lower[i] = *lo;
            upper[i] = *hi;
        }
        Self::new(lower, upper)
    }

    /// Number of dimensions.
    pub fn len(&self) -> usize {
        self.lower.len()
    }

    /// Returns `true` if the box has no dimensions (never true for a
    /// successfully constructed value).
    pub fn is_empty(&self) -> bool {
        self.lower.is_empty()
    }

    /// Lower bound per dimension.
    pub fn lower(&self) -> &Array1<f64> {
        &self.lower
    }

    /// Upper bound per dimension.
    pub fn upper(&self) -> &Array1<f64> {
        &self.upper
    }

    /// Saturates each component of `x` into its dimension's interval.
    pub fn clamp(&self, x: &mut Array1<f64>) {
        Zip::from(x)
            .and(&self.lower)
            .and(&self.upper)
            .for_each(|xi, lo, hi| *xi = xi.clamp(*lo, *hi));
    }

    /// Samples a position uniformly inside the box, one independent draw
    /// per dimension.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Array1<f64> {
        let n = self.len();
        let mut x = Array1::<f64>::zeros(n);
        for j in 0..n {
            let u: f64 = rng.random::<f64>();
            x[j] = self.lower[j] + u * (self.upper[j] - self.lower[j]);
        }
        x
    }

    /// Returns `true` if every component of `x` lies inside the box.
    pub fn contains(&self, x: &Array1<f64>) -> bool {
        x.len() == self.len()
            && x.iter()
                .zip(self.lower.iter().zip(self.upper.iter()))
                .all(|(xi, (lo, hi))| *xi >= *lo && *xi <= *hi)
    }
}

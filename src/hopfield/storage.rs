//! Outer-product (Hebbian) storage rule
//!
//! Builds the weight matrix of a classical Hopfield network in one shot:
//!
//! W = Σ_μ ξ^μ (ξ^μ)^T, with W_ii = 0
//!
//! There is no normalization by the number of patterns or units, so the
//! entries grow linearly with the size of the pattern set.

use ndarray::{Array2, ArrayView1, Axis};
use serde::{Deserialize, Serialize};

use super::pattern::Pattern;
use crate::error::{HopfieldError, PatternError, Result};

/// Fraction of the unit count below which stored patterns are expected to be
/// recalled without error
pub const CAPACITY_RATIO: f64 = 0.15;

/// Symmetric, zero-diagonal connection weights
///
/// Deserialized matrices are checked to be square, symmetric and zero on
/// the diagonal before they can be used for recall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawWeightMatrix")]
pub struct WeightMatrix {
    weights: Array2<f64>,
    /// Number of patterns summed into `weights`
    pattern_count: usize,
}

/// Unchecked serialized form of [`WeightMatrix`]
#[derive(Deserialize)]
struct RawWeightMatrix {
    weights: Array2<f64>,
    pattern_count: usize,
}

impl TryFrom<RawWeightMatrix> for WeightMatrix {
    type Error = HopfieldError;

    fn try_from(raw: RawWeightMatrix) -> Result<Self> {
        let (rows, cols) = raw.weights.dim();
        if rows != cols {
            return Err(HopfieldError::DimensionMismatch {
                expected: rows,
                actual: cols,
            });
        }
        if rows == 0 {
            return Err(HopfieldError::InvalidConfig(
                "weight matrix has no units".to_string(),
            ));
        }

        let matrix = Self {
            weights: raw.weights,
            pattern_count: raw.pattern_count,
        };
        if !matrix.is_symmetric_zero_diagonal() {
            return Err(HopfieldError::InvalidConfig(
                "weight matrix must be symmetric with a zero diagonal".to_string(),
            ));
        }
        Ok(matrix)
    }
}

impl WeightMatrix {
    /// Store a set of patterns using the outer-product rule
    ///
    /// Every pattern must have the same length. The order of the patterns
    /// does not affect the result.
    ///
    /// # Errors
    ///
    /// Returns `HopfieldError::InvalidPattern` if the set is empty or the
    /// patterns disagree on length. No partial matrix is produced.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hopfield_cam::{Pattern, WeightMatrix};
    ///
    /// let p = Pattern::new(vec![1, -1, 1, -1]).unwrap();
    /// let w = WeightMatrix::store(&[p]).unwrap();
    /// assert_eq!(w.dimension(), 4);
    /// assert_eq!(w.get(0, 0), 0.0);
    /// assert_eq!(w.get(0, 1), -1.0);
    /// ```
    pub fn store(patterns: &[Pattern]) -> Result<Self> {
        let first = patterns.first().ok_or(PatternError::EmptySet)?;
        let n = first.len();

        for (index, pattern) in patterns.iter().enumerate() {
            if pattern.len() != n {
                return Err(PatternError::LengthMismatch {
                    index,
                    expected: n,
                    actual: pattern.len(),
                }
                .into());
            }
        }

        let mut weights = Array2::<f64>::zeros((n, n));
        for pattern in patterns {
            let xi = pattern.to_array();
            let column = xi.view().insert_axis(Axis(1));
            weights += &column.dot(&column.t());
        }
        weights.diag_mut().fill(0.0);

        let matrix = Self {
            weights,
            pattern_count: patterns.len(),
        };

        if matrix.is_over_capacity() {
            log::warn!(
                "Storing {} patterns in {} units exceeds the reliable capacity of {:.1}; expect spurious attractors",
                matrix.pattern_count,
                n,
                matrix.capacity()
            );
        } else {
            log::debug!("Stored {} patterns in {} units", matrix.pattern_count, n);
        }

        Ok(matrix)
    }

    /// Number of units N
    pub fn dimension(&self) -> usize {
        self.weights.nrows()
    }

    /// Number of patterns the matrix was built from
    pub fn pattern_count(&self) -> usize {
        self.pattern_count
    }

    /// Weight between units `i` and `j`
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.weights[[i, j]]
    }

    /// Row `i` of the matrix: the incoming weights of unit `i`
    pub fn row(&self, i: usize) -> ArrayView1<'_, f64> {
        self.weights.row(i)
    }

    /// Read-only view of the full matrix
    pub fn as_array(&self) -> &Array2<f64> {
        &self.weights
    }

    /// Number of patterns that can be stored with reliable recall (0.15 * N)
    pub fn capacity(&self) -> f64 {
        CAPACITY_RATIO * self.dimension() as f64
    }

    /// Whether more patterns are stored than the network reliably recalls
    pub fn is_over_capacity(&self) -> bool {
        self.pattern_count as f64 > self.capacity()
    }

    /// Check W = W^T and diag(W) = 0
    pub fn is_symmetric_zero_diagonal(&self) -> bool {
        let n = self.dimension();
        (0..n).all(|i| {
            self.weights[[i, i]] == 0.0
                && (i + 1..n).all(|j| self.weights[[i, j]] == self.weights[[j, i]])
        })
    }
}

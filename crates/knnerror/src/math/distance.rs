//! Distance measures and the norm-expansion kernels.
//!
//! ## Purpose
//!
//! This module provides the supported distance measures and the row-level
//! kernels that turn a cross-product (Gram) matrix into a distance matrix.
//!
//! ## Design notes
//!
//! * **Norm expansion**: ||a - b||^2 = ||a||^2 - 2 a.b + ||b||^2, so a full
//!   distance matrix costs one Gram pass plus two norm vectors instead of an
//!   explicit subtraction over every pair.
//! * **Row kernels**: Expansion works one output row at a time so that the
//!   parallel executor can split rows across threads.
//! * **Consistent sums**: Squared norms are computed with the same [`dot`] as
//!   the Gram entries, so a row's distance to an identical row is exactly zero.
//!
//! ## Key concepts
//!
//! * **SquaredL2**: Squared Euclidean distance, the default.
//! * **Cosine**: 1 - a.b / (||a|| ||b||), defined for non-zero rows only.
//!
//! ## Invariants
//!
//! * Squared L2 outputs are clamped at zero (rounding can produce tiny negatives).
//! * Cosine outputs are clamped to [0, 2].
//!
//! ## Non-goals
//!
//! * This module does not validate shapes (handled by `validator`).
//! * This module does not mask the diagonal for leave-one-out (handled by `executor`).

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::{string::ToString, vec::Vec};

// External dependencies
use core::fmt::{Display, Formatter, Result as FmtResult};
use core::str::FromStr;
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::KnnError;
use crate::primitives::matrix::FeatureMatrix;

// ============================================================================
// Distance Measure
// ============================================================================

/// Distance measure used to compare embeddings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistanceMeasure {
    /// Squared Euclidean distance.
    #[default]
    SquaredL2,

    /// Cosine distance (1 - cosine similarity).
    Cosine,
}

impl DistanceMeasure {
    /// Canonical string name of the measure.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SquaredL2 => "squared_l2",
            Self::Cosine => "cosine",
        }
    }

    /// Whether the measure is implemented for paired (test x train) matrices.
    pub fn supports_paired(&self) -> bool {
        matches!(self, Self::SquaredL2)
    }
}

impl Display for DistanceMeasure {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.name())
    }
}

impl FromStr for DistanceMeasure {
    type Err = KnnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "squared_l2" => Ok(Self::SquaredL2),
            "cosine" => Ok(Self::Cosine),
            other => Err(KnnError::UnsupportedMeasure(other.to_string())),
        }
    }
}

// ============================================================================
// Vector Kernels
// ============================================================================

/// Inner product of two equally long slices.
#[inline]
pub fn dot<T: Float>(a: &[T], b: &[T]) -> T {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b.iter())
        .fold(T::zero(), |acc, (&x, &y)| acc + x * y)
}

/// Squared Euclidean norm of every row.
pub fn row_squared_norms<T: Float>(x: &FeatureMatrix<T>) -> Vec<T> {
    x.rows().map(|r| dot(r, r)).collect()
}

/// Fill one row of the Gram matrix: `out[j] = a_row . b_j`.
#[inline]
pub fn gram_row<T: Float>(a_row: &[T], b: &FeatureMatrix<T>, out: &mut [T]) {
    for (o, b_row) in out.iter_mut().zip(b.rows()) {
        *o = dot(a_row, b_row);
    }
}

/// Sequential Gram pass: `out[i * b.nrows() + j] = a_i . b_j`.
pub fn gram_pass<T: Float>(a: &FeatureMatrix<T>, b: &FeatureMatrix<T>, out: &mut [T]) {
    let ncols = b.nrows();
    if ncols == 0 {
        return;
    }
    for (a_row, out_row) in a.rows().zip(out.chunks_exact_mut(ncols)) {
        gram_row(a_row, b, out_row);
    }
}

// ============================================================================
// Norm Expansion
// ============================================================================

/// Turn one Gram row into squared L2 distances in place.
///
/// `row_norm` is ||a_i||^2 and `col_norms[j]` is ||b_j||^2.
#[inline]
pub fn expand_squared_l2_row<T: Float>(row: &mut [T], row_norm: T, col_norms: &[T]) {
    let minus_two = -(T::one() + T::one());
    for (d, &cn) in row.iter_mut().zip(col_norms.iter()) {
        let v = *d * minus_two + row_norm + cn;
        // NaN must survive so the evaluators can reject it
        *d = if v < T::zero() { T::zero() } else { v };
    }
}

/// Turn one Gram row into cosine distances in place.
///
/// `row_len` is ||a_i|| and `col_lens[j]` is ||b_j||; both must be non-zero.
#[inline]
pub fn expand_cosine_row<T: Float>(row: &mut [T], row_len: T, col_lens: &[T]) {
    let two = T::one() + T::one();
    for (d, &cl) in row.iter_mut().zip(col_lens.iter()) {
        let v = T::one() - *d / (row_len * cl);
        *d = if v < T::zero() {
            T::zero()
        } else if v > two {
            two
        } else {
            v
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_parse() {
        assert_eq!(
            "squared_l2".parse::<DistanceMeasure>(),
            Ok(DistanceMeasure::SquaredL2)
        );
        assert_eq!("cosine".parse::<DistanceMeasure>(), Ok(DistanceMeasure::Cosine));
        assert!(matches!(
            "manhattan".parse::<DistanceMeasure>(),
            Err(KnnError::UnsupportedMeasure(ref m)) if m == "manhattan"
        ));
    }

    #[test]
    fn test_dot_basic() {
        assert_eq!(dot(&[1.0_f64, 2.0, 3.0], &[4.0, 5.0, 6.0]), 32.0);
        assert_eq!(dot::<f32>(&[], &[]), 0.0);
    }

    #[test]
    fn test_expand_squared_l2_clamps() {
        // a.b slightly larger than the norms would allow
        let mut row = [1.000_001_f64];
        expand_squared_l2_row(&mut row, 1.0, &[1.0]);
        assert_eq!(row[0], 0.0);
    }

    #[test]
    fn test_expand_keeps_nan() {
        let mut row = [f64::NAN];
        expand_squared_l2_row(&mut row, f64::INFINITY, &[f64::INFINITY]);
        assert!(row[0].is_nan());

        let mut row = [f64::NAN, 0.5];
        expand_cosine_row(&mut row, 1.0, &[1.0, 1.0]);
        assert!(row[0].is_nan());
        assert_eq!(row[1], 0.5);
    }

    #[test]
    fn test_expand_cosine_range() {
        let mut row = [1.0_f64, -1.0, 0.0];
        expand_cosine_row(&mut row, 1.0, &[1.0, 1.0, 1.0]);
        assert_eq!(row, [0.0, 2.0, 1.0]);
    }
}

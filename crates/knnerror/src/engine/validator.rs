//! Input validation for KNN configuration and data.
//!
//! ## Purpose
//!
//! This module provides the validation functions run before any distance or
//! neighbor computation. It checks shapes, label alignment, finiteness and
//! parameter bounds.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Validation stops at the first error encountered.
//! * **Efficiency**: Checks are ordered from cheap to expensive.
//! * **Generics**: Validation is generic over `Float` types.
//!
//! ## Key concepts
//!
//! * **Shape checks**: Paired feature matrices share their dimension; label
//!   vectors match the matrix axis they describe.
//! * **Neighbor bounds**: k lies in `[1, N]` for both layouts.
//! * **Finite Checks**: Features must be finite; distances must not be NaN.
//!
//! ## Invariants
//!
//! * All validated inputs satisfy their respective mathematical constraints.
//! * Validation logic is deterministic and side-effect free.
//!
//! ## Non-goals
//!
//! * This module does not transform or filter input data.
//! * This module does not provide automatic correction of invalid inputs.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::{format, string::ToString};

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::math::distance::DistanceMeasure;
use crate::primitives::errors::KnnError;
use crate::primitives::matrix::{DistanceMatrix, FeatureMatrix};

// ============================================================================
// Validator
// ============================================================================

/// Validation utility for KNN configuration and input data.
///
/// All methods return `Result<(), KnnError>` and fail fast upon
/// identifying the first violation.
pub struct Validator;

impl Validator {
    // ========================================================================
    // Feature Validation
    // ========================================================================

    /// Validate a feature matrix: non-empty with finite entries.
    pub fn validate_features<T: Float>(x: &FeatureMatrix<T>, name: &str) -> Result<(), KnnError> {
        if x.is_empty() {
            return Err(KnnError::EmptyInput);
        }

        let ncols = x.ncols();
        for (idx, v) in x.as_slice().iter().enumerate() {
            if !v.is_finite() {
                return Err(KnnError::InvalidNumericValue(format!(
                    "{}[{}][{}]={}",
                    name,
                    idx / ncols,
                    idx % ncols,
                    v.to_f64().unwrap_or(f64::NAN)
                )));
            }
        }

        Ok(())
    }

    /// Validate a train/test pair of feature matrices.
    pub fn validate_paired_features<T: Float>(
        train: &FeatureMatrix<T>,
        test: &FeatureMatrix<T>,
    ) -> Result<(), KnnError> {
        if train.is_empty() || test.is_empty() {
            return Err(KnnError::EmptyInput);
        }

        if train.ncols() != test.ncols() {
            return Err(KnnError::ShapeMismatch {
                what: "feature dimension",
                expected: train.ncols(),
                got: test.ncols(),
            });
        }

        Self::validate_features(train, "train")?;
        Self::validate_features(test, "test")
    }

    // ========================================================================
    // Distance Validation
    // ========================================================================

    /// Validate a distance matrix: non-empty and free of NaN.
    ///
    /// Infinite entries are allowed (the leave-one-out diagonal).
    pub fn validate_distances<T: Float>(d: &DistanceMatrix<T>) -> Result<(), KnnError> {
        if d.nrows() == 0 || d.ncols() == 0 {
            return Err(KnnError::EmptyInput);
        }

        let ncols = d.ncols();
        if let Some(idx) = d.as_slice().iter().position(|v| v.is_nan()) {
            return Err(KnnError::InvalidNumericValue(format!(
                "d[{}][{}]=NaN",
                idx / ncols,
                idx % ncols
            )));
        }

        Ok(())
    }

    /// Validate that a leave-one-out distance matrix is square.
    pub fn validate_square<T>(d: &DistanceMatrix<T>) -> Result<(), KnnError> {
        if d.nrows() != d.ncols() {
            return Err(KnnError::ShapeMismatch {
                what: "leave-one-out matrix columns",
                expected: d.nrows(),
                got: d.ncols(),
            });
        }
        Ok(())
    }

    /// Validate that a label vector has the expected length.
    pub fn validate_labels(
        what: &'static str,
        expected: usize,
        got: usize,
    ) -> Result<(), KnnError> {
        if expected != got {
            return Err(KnnError::ShapeMismatch {
                what,
                expected,
                got,
            });
        }
        Ok(())
    }

    /// Validate that squared row norms leave room for the norm expansion.
    ///
    /// ||a||^2 - 2 a.b + ||b||^2 is bounded by 4 max(||a||^2, ||b||^2), so norms
    /// above a quarter of the largest finite value could overflow to NaN.
    pub fn validate_norm_range<T: Float>(norms: &[T]) -> Result<(), KnnError> {
        let four = T::one() + T::one() + T::one() + T::one();
        let limit = T::max_value() / four;
        match norms.iter().position(|n| *n > limit) {
            Some(row) => Err(KnnError::InvalidNumericValue(format!(
                "squared norm of row {row} overflows"
            ))),
            None => Ok(()),
        }
    }

    /// Validate that no row has zero norm (cosine distance requirement).
    pub fn validate_nonzero_norms<T: Float>(norms: &[T]) -> Result<(), KnnError> {
        match norms.iter().position(|n| *n <= T::zero()) {
            Some(row) => Err(KnnError::DegenerateVector { row }),
            None => Ok(()),
        }
    }

    // ========================================================================
    // Parameter Validation
    // ========================================================================

    /// Validate the neighbor count against the number of candidate columns.
    pub fn validate_k(k: usize, max: usize) -> Result<(), KnnError> {
        if k < 1 || k > max {
            return Err(KnnError::InvalidK { k, max });
        }
        Ok(())
    }

    /// Validate a neighbor count before the data size is known.
    pub fn validate_neighbors(k: usize) -> Result<(), KnnError> {
        Self::validate_k(k, usize::MAX)
    }

    /// Validate every neighbor count of a sweep.
    pub fn validate_sweep(ks: &[usize], max: usize) -> Result<(), KnnError> {
        if ks.is_empty() {
            return Err(KnnError::InvalidInput("k sweep is empty".to_string()));
        }
        for &k in ks {
            Self::validate_k(k, max)?;
        }
        Ok(())
    }

    /// Validate that a measure is implemented for paired matrices.
    pub fn validate_paired_measure(measure: DistanceMeasure) -> Result<(), KnnError> {
        if !measure.supports_paired() {
            return Err(KnnError::UnsupportedMeasure(measure.name().to_string()));
        }
        Ok(())
    }

    /// Validate that no parameters were set multiple times in the builder.
    pub fn validate_no_duplicates(
        duplicate_param: Option<&'static str>,
    ) -> Result<(), KnnError> {
        if let Some(param) = duplicate_param {
            return Err(KnnError::DuplicateParameter { parameter: param });
        }
        Ok(())
    }
}

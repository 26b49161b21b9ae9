//! Execution engine for distance computation and KNN evaluation.
//!
//! ## Purpose
//!
//! This module provides the executor that orchestrates a KNN evaluation: it
//! builds the distance matrix, selects neighbors and scores the majority vote
//! against the true labels. It is the single place where the validator, the
//! math kernels and the evaluation layer meet.
//!
//! ## Design notes
//!
//! * **Pluggable passes**: The Gram pass and the neighbor pass can be replaced
//!   by extension crates (e.g. a row-parallel implementation) through plain
//!   function pointers. Defaults are sequential.
//! * **Validate first**: Every entry point validates before allocating.
//! * **One selection pass**: Neighbor counts of a sweep share one table.
//! * Generic over `Float` types to support f32 and f64.
//!
//! ## Invariants
//!
//! * Paired matrices have shape (test rows, train rows); the diagonal is untouched.
//! * Leave-one-out matrices are square with a +infinity diagonal.
//! * Reported error rates lie in [0, 1].
//!
//! ## Non-goals
//!
//! * This module does not provide public-facing result formatting.
//! * This module does not handle parallel execution directly (injected by extensions).

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::algorithms::selection::neighbor_pass;
use crate::engine::validator::Validator;
use crate::evaluation::error_rate::{ErrorRate, NeighborTable, predict, sweep};
use crate::math::distance::{
    DistanceMeasure, expand_cosine_row, expand_squared_l2_row, gram_pass, row_squared_norms,
};
use crate::primitives::errors::KnnError;
use crate::primitives::matrix::{DistanceLayout, DistanceMatrix, FeatureMatrix};

// ============================================================================
// Type Definitions
// ============================================================================

/// Signature for custom Gram pass function
#[doc(hidden)]
pub type GramPassFn<T> = fn(
    &FeatureMatrix<T>, // row set (output rows)
    &FeatureMatrix<T>, // column set (output columns)
    &mut [T],          // output, row-major (rows x columns)
);

/// Signature for custom neighbor pass function
#[doc(hidden)]
pub type NeighborPassFn<T> = fn(
    &DistanceMatrix<T>, // distances
    usize,              // neighbors per row
    &mut [usize],       // output table, row-major (rows x k), nearest first
);

/// Output from KNN execution.
#[derive(Debug, Clone)]
pub struct ExecutorOutput<'a, L> {
    /// Misclassification count and rows evaluated.
    pub errors: ErrorRate,

    /// Majority-vote label of every row (references into the training labels).
    pub predictions: Vec<&'a L>,

    /// Error rate for each neighbor count of the sweep, if one was configured.
    pub sweep_scores: Option<Vec<(usize, f64)>>,
}

// ============================================================================
// Configuration
// ============================================================================

/// Configuration for KNN execution.
#[derive(Debug, Clone)]
pub struct KnnConfig<T> {
    /// Distance measure.
    pub measure: DistanceMeasure,

    /// Neighbor count used for the headline error rate.
    pub neighbors: usize,

    /// Additional neighbor counts evaluated from the same distances.
    pub sweep: Option<Vec<usize>>,

    // ++++++++++++++++++++++++++++++++++++++
    // +               DEV                  +
    // ++++++++++++++++++++++++++++++++++++++
    /// Custom Gram pass function (enables parallel execution).
    #[doc(hidden)]
    pub custom_gram_pass: Option<GramPassFn<T>>,

    /// Custom neighbor pass function (enables parallel execution).
    #[doc(hidden)]
    pub custom_neighbor_pass: Option<NeighborPassFn<T>>,

    /// Whether to use parallel execution
    #[doc(hidden)]
    pub parallel: bool,
}

impl<T: Float> Default for KnnConfig<T> {
    fn default() -> Self {
        Self {
            measure: DistanceMeasure::default(),
            neighbors: 1,
            sweep: None,
            custom_gram_pass: None,
            custom_neighbor_pass: None,
            parallel: false,
        }
    }
}

// ============================================================================
// Executor
// ============================================================================

/// Unified executor for distance computation and KNN evaluation.
#[derive(Debug, Clone)]
pub struct KnnExecutor<T: Float> {
    /// Distance measure.
    pub measure: DistanceMeasure,

    /// Neighbor count.
    pub neighbors: usize,

    /// Optional neighbor-count sweep.
    pub sweep: Option<Vec<usize>>,

    /// Gram pass in use.
    gram_pass: GramPassFn<T>,

    /// Neighbor pass in use.
    neighbor_pass: NeighborPassFn<T>,
}

impl<T: Float> Default for KnnExecutor<T> {
    fn default() -> Self {
        Self::from_config(&KnnConfig::default())
    }
}

impl<T: Float> KnnExecutor<T> {
    /// Build an executor from a configuration.
    ///
    /// Custom passes are only honored when `parallel` is set; otherwise the
    /// sequential defaults run.
    pub fn from_config(config: &KnnConfig<T>) -> Self {
        let (gram, neighbors) = if config.parallel {
            (
                config.custom_gram_pass.unwrap_or(gram_pass::<T>),
                config.custom_neighbor_pass.unwrap_or(neighbor_pass::<T>),
            )
        } else {
            (gram_pass::<T> as GramPassFn<T>, neighbor_pass::<T> as NeighborPassFn<T>)
        };

        Self {
            measure: config.measure,
            neighbors: config.neighbors,
            sweep: config.sweep.clone(),
            gram_pass: gram,
            neighbor_pass: neighbors,
        }
    }

    /// Executor with the given measure and neighbor count and sequential passes.
    pub fn new(measure: DistanceMeasure, neighbors: usize) -> Self {
        Self {
            measure,
            neighbors,
            ..Self::default()
        }
    }

    // ========================================================================
    // Distance Matrices
    // ========================================================================

    /// Distances from every test row to every training row, shape (M, N).
    pub fn paired_distances(
        &self,
        train: &FeatureMatrix<T>,
        test: &FeatureMatrix<T>,
    ) -> Result<DistanceMatrix<T>, KnnError> {
        Validator::validate_paired_measure(self.measure)?;
        Validator::validate_paired_features(train, test)?;

        let (m, n) = (test.nrows(), train.nrows());
        let train_norms = row_squared_norms(train);
        let test_norms = row_squared_norms(test);
        Validator::validate_norm_range(&train_norms)?;
        Validator::validate_norm_range(&test_norms)?;

        let mut data = vec![T::zero(); m * n];
        (self.gram_pass)(test, train, &mut data);
        for (row, &rn) in data.chunks_exact_mut(n).zip(test_norms.iter()) {
            expand_squared_l2_row(row, rn, &train_norms);
        }

        tracing::debug!(
            rows = m,
            cols = n,
            measure = self.measure.name(),
            "computed paired distance matrix"
        );

        DistanceMatrix::from_flat(data, m, n, DistanceLayout::Paired)
    }

    /// Distances between all rows of `x`, shape (N, N), diagonal +infinity.
    pub fn loo_distances(&self, x: &FeatureMatrix<T>) -> Result<DistanceMatrix<T>, KnnError> {
        Validator::validate_features(x, "x")?;

        let n = x.nrows();
        let norms = row_squared_norms(x);
        Validator::validate_norm_range(&norms)?;

        let lengths = match self.measure {
            DistanceMeasure::SquaredL2 => None,
            DistanceMeasure::Cosine => {
                Validator::validate_nonzero_norms(&norms)?;
                Some(norms.iter().map(|v| v.sqrt()).collect::<Vec<T>>())
            }
        };

        let mut data = vec![T::zero(); n * n];
        (self.gram_pass)(x, x, &mut data);

        for (i, row) in data.chunks_exact_mut(n).enumerate() {
            match &lengths {
                None => expand_squared_l2_row(row, norms[i], &norms),
                Some(lens) => expand_cosine_row(row, lens[i], lens),
            }
            row[i] = T::infinity();
        }

        tracing::debug!(
            rows = n,
            cols = n,
            measure = self.measure.name(),
            "computed leave-one-out distance matrix"
        );

        DistanceMatrix::from_flat(data, n, n, DistanceLayout::LeaveOneOut)
    }

    // ========================================================================
    // Neighbor Evaluation
    // ========================================================================

    /// Nearest `k` columns of every row of `d`.
    pub fn neighbor_table(&self, d: &DistanceMatrix<T>, k: usize) -> NeighborTable {
        let mut indices = vec![0usize; d.nrows() * k];
        (self.neighbor_pass)(d, k, &mut indices);
        NeighborTable::new(indices, d.nrows(), k)
    }

    /// Majority-vote label of every row of a paired matrix.
    pub fn predictions<'a, L: Ord>(
        &self,
        d: &DistanceMatrix<T>,
        y_train: &'a [L],
    ) -> Result<Vec<&'a L>, KnnError> {
        Validator::validate_distances(d)?;
        Validator::validate_labels("training labels", d.ncols(), y_train.len())?;
        Validator::validate_k(self.neighbors, d.ncols())?;

        let table = self.neighbor_table(d, self.neighbors);
        predict(&table, self.neighbors, y_train).ok_or(KnnError::EmptyInput)
    }

    /// Score the majority vote of each row of `d` against `y_test`.
    ///
    /// With `DistanceLayout::LeaveOneOut` the matrix must be square. Its
    /// +infinity diagonal ranks each sample last among its own neighbors, so
    /// k = N is admissible and only then does the sample vote for itself.
    pub fn run<'a, L: Ord>(
        &self,
        d: &DistanceMatrix<T>,
        y_train: &'a [L],
        y_test: &[L],
        layout: DistanceLayout,
    ) -> Result<ExecutorOutput<'a, L>, KnnError> {
        Validator::validate_distances(d)?;
        if layout == DistanceLayout::LeaveOneOut {
            Validator::validate_square(d)?;
        }
        let max_k = d.ncols();
        Validator::validate_labels("training labels", d.ncols(), y_train.len())?;
        Validator::validate_labels("test labels", d.nrows(), y_test.len())?;
        Validator::validate_k(self.neighbors, max_k)?;
        if let Some(ks) = &self.sweep {
            Validator::validate_sweep(ks, max_k)?;
        }

        let stride = self
            .sweep
            .iter()
            .flatten()
            .copied()
            .fold(self.neighbors, usize::max);
        let table = self.neighbor_table(d, stride);

        let predictions = predict(&table, self.neighbors, y_train).ok_or(KnnError::EmptyInput)?;
        let errors = ErrorRate::from_predictions(&predictions, y_test);

        let sweep_scores = match &self.sweep {
            Some(ks) => Some(sweep(&table, ks, y_train, y_test).ok_or(KnnError::EmptyInput)?),
            None => None,
        };

        tracing::debug!(
            k = self.neighbors,
            rows = errors.total,
            misclassified = errors.misclassified,
            error_rate = errors.rate(),
            "knn evaluation finished"
        );

        Ok(ExecutorOutput {
            errors,
            predictions,
            sweep_scores,
        })
    }
}

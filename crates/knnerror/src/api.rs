//! High-level API for KNN error-rate evaluation.
//!
//! ## Purpose
//!
//! This module provides the primary user-facing entry point. It implements a
//! fluent builder pattern for configuring the neighbor count, the distance
//! measure and the optional outputs, and for choosing an execution adapter
//! (Paired or LeaveOneOut). It also exposes the four core operations as free
//! functions for callers that already hold matrices.
//!
//! ## Design notes
//!
//! * **Ergonomic**: Fluent builder with sensible defaults for all parameters.
//! * **Polymorphic**: Uses marker types to transition to specialized adapter builders.
//! * **Validated**: Parameters are validated when `.build()` is called on the adapter.
//! * **Type-Safe**: Generic over `Float` types for flexible precision.
//!
//! ## Key concepts
//!
//! * **Execution Adapters**: Paired (train/test) and LeaveOneOut modes.
//! * **Configuration Flow**: Builder pattern ending in `.adapter(Adapter::Type)`.
//!
//! ### Configuration Flow
//!
//! 1. Create a [`KnnBuilder`] via `Knn::new()`.
//! 2. Chain configuration methods (`.neighbors()`, `.measure()`, etc.).
//! 3. Select an adapter via `.adapter(Adapter::LeaveOneOut)` to get an execution builder.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::adapters::loo::LeaveOneOutKnnBuilder;
use crate::adapters::paired::PairedKnnBuilder;
use crate::engine::executor::{GramPassFn, KnnExecutor, NeighborPassFn};
use crate::primitives::matrix::DistanceLayout;

// Publicly re-exported types
pub use crate::adapters::source::{
    Embedder, InMemorySource, LabeledSamples, SampleSource, embed_samples,
};
pub use crate::engine::output::KnnResult;
pub use crate::math::distance::DistanceMeasure;
pub use crate::primitives::errors::KnnError;
pub use crate::primitives::matrix::{DistanceMatrix, FeatureMatrix};

/// Marker types for selecting execution adapters.
#[allow(non_snake_case)]
pub mod Adapter {
    pub use super::{LeaveOneOut, Paired};
}

// ============================================================================
// Builder
// ============================================================================

/// Fluent builder for configuring KNN evaluation and execution modes.
#[derive(Debug, Clone)]
pub struct KnnBuilder<T> {
    /// Neighbor count k (default 1).
    pub neighbors: Option<usize>,

    /// Distance measure (default squared L2).
    pub measure: Option<DistanceMeasure>,

    /// Additional neighbor counts scored from the same distances.
    pub sweep: Option<Vec<usize>>,

    /// Return the majority-vote label of every sample.
    pub return_predictions: Option<bool>,

    /// Return the distance matrix.
    pub return_distances: Option<bool>,

    // ======================================
    // DEV
    // ======================================
    /// Custom Gram pass function.
    #[doc(hidden)]
    pub custom_gram_pass: Option<GramPassFn<T>>,

    /// Custom neighbor pass function.
    #[doc(hidden)]
    pub custom_neighbor_pass: Option<NeighborPassFn<T>>,

    /// Parallel execution hint.
    #[doc(hidden)]
    pub parallel: Option<bool>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl<T: Float> Default for KnnBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> KnnBuilder<T> {
    /// Select an execution adapter to transition to an execution builder.
    pub fn adapter<A>(self, _adapter: A) -> A::Output
    where
        A: KnnAdapter<T>,
    {
        A::convert(self)
    }

    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            neighbors: None,
            measure: None,
            sweep: None,
            return_predictions: None,
            return_distances: None,
            custom_gram_pass: None,
            custom_neighbor_pass: None,
            parallel: None,
            duplicate_param: None,
        }
    }

    /// Set the number of neighbors that vote.
    pub fn neighbors(mut self, k: usize) -> Self {
        if self.neighbors.is_some() {
            self.duplicate_param = Some("neighbors");
        }
        self.neighbors = Some(k);
        self
    }

    /// Set the distance measure.
    pub fn measure(mut self, measure: DistanceMeasure) -> Self {
        if self.measure.is_some() {
            self.duplicate_param = Some("measure");
        }
        self.measure = Some(measure);
        self
    }

    /// Also score each of `ks` from the same distance matrix.
    pub fn sweep(mut self, ks: &[usize]) -> Self {
        if self.sweep.is_some() {
            self.duplicate_param = Some("sweep");
        }
        self.sweep = Some(ks.to_vec());
        self
    }

    /// Include per-sample predicted labels in output.
    pub fn return_predictions(mut self) -> Self {
        self.return_predictions = Some(true);
        self
    }

    /// Include the distance matrix in output.
    pub fn return_distances(mut self) -> Self {
        self.return_distances = Some(true);
        self
    }

    // ==========================
    // Development Options
    // ==========================

    /// Set a custom Gram pass function for execution (only for dev)
    #[doc(hidden)]
    pub fn custom_gram_pass(mut self, pass: GramPassFn<T>) -> Self {
        self.custom_gram_pass = Some(pass);
        self
    }

    /// Set a custom neighbor pass function for execution (only for dev)
    #[doc(hidden)]
    pub fn custom_neighbor_pass(mut self, pass: NeighborPassFn<T>) -> Self {
        self.custom_neighbor_pass = Some(pass);
        self
    }

    /// Set parallel execution hint (only for dev)
    #[doc(hidden)]
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = Some(parallel);
        self
    }
}

// ============================================================================
// Adapters
// ============================================================================

/// Trait for transitioning from a generic builder to an execution builder.
pub trait KnnAdapter<T: Float> {
    /// The output execution builder.
    type Output;

    /// Convert a generic [`KnnBuilder`] into a specialized execution builder.
    fn convert(builder: KnnBuilder<T>) -> Self::Output;
}

/// Marker for train/test evaluation.
#[derive(Debug, Clone, Copy)]
pub struct Paired;

impl<T: Float> KnnAdapter<T> for Paired {
    type Output = PairedKnnBuilder<T>;

    fn convert(builder: KnnBuilder<T>) -> Self::Output {
        let mut result = PairedKnnBuilder::default();

        if let Some(k) = builder.neighbors {
            result.neighbors = k;
        }
        if let Some(m) = builder.measure {
            result.measure = m;
        }
        if let Some(ks) = builder.sweep {
            result.sweep = Some(ks);
        }
        if let Some(rp) = builder.return_predictions {
            result.return_predictions = rp;
        }
        if let Some(rd) = builder.return_distances {
            result.return_distances = rd;
        }

        // ======================================
        // DEV
        // ======================================
        if let Some(gp) = builder.custom_gram_pass {
            result.custom_gram_pass = Some(gp);
        }
        if let Some(np) = builder.custom_neighbor_pass {
            result.custom_neighbor_pass = Some(np);
        }
        if let Some(p) = builder.parallel {
            result.parallel = Some(p);
        }

        result.duplicate_param = builder.duplicate_param;

        result
    }
}

/// Marker for leave-one-out evaluation on a single sample set.
#[derive(Debug, Clone, Copy)]
pub struct LeaveOneOut;

impl<T: Float> KnnAdapter<T> for LeaveOneOut {
    type Output = LeaveOneOutKnnBuilder<T>;

    fn convert(builder: KnnBuilder<T>) -> Self::Output {
        let mut result = LeaveOneOutKnnBuilder::default();

        if let Some(k) = builder.neighbors {
            result.neighbors = k;
        }
        if let Some(m) = builder.measure {
            result.measure = m;
        }
        if let Some(ks) = builder.sweep {
            result.sweep = Some(ks);
        }
        if let Some(rp) = builder.return_predictions {
            result.return_predictions = rp;
        }
        if let Some(rd) = builder.return_distances {
            result.return_distances = rd;
        }

        // ======================================
        // DEV
        // ======================================
        if let Some(gp) = builder.custom_gram_pass {
            result.custom_gram_pass = Some(gp);
        }
        if let Some(np) = builder.custom_neighbor_pass {
            result.custom_neighbor_pass = Some(np);
        }
        if let Some(p) = builder.parallel {
            result.parallel = Some(p);
        }

        result.duplicate_param = builder.duplicate_param;

        result
    }
}

// ============================================================================
// Free Functions
// ============================================================================

/// Squared Euclidean distances from every test row to every training row.
///
/// Returns an (M, N) matrix for `train` of shape (N, D) and `test` of shape
/// (M, D). Only [`DistanceMeasure::SquaredL2`] is implemented for paired
/// matrices; any other measure fails with [`KnnError::UnsupportedMeasure`].
///
/// The diagonal is not masked, even when `train` and `test` hold the same
/// rows.
pub fn compute_distance_matrix<T: Float>(
    train: &FeatureMatrix<T>,
    test: &FeatureMatrix<T>,
    measure: DistanceMeasure,
) -> Result<DistanceMatrix<T>, KnnError> {
    KnnExecutor::new(measure, 1).paired_distances(train, test)
}

/// Distances between all rows of `x`, with a +infinity diagonal.
///
/// Supports squared L2 and cosine distance. Cosine fails with
/// [`KnnError::DegenerateVector`] when a row has zero norm.
pub fn compute_distance_matrix_loo<T: Float>(
    x: &FeatureMatrix<T>,
    measure: DistanceMeasure,
) -> Result<DistanceMatrix<T>, KnnError> {
    KnnExecutor::new(measure, 1).loo_distances(x)
}

/// Fraction of test rows whose k-nearest-neighbor majority label is wrong.
///
/// `d` has shape (M, N), `y_train` length N and `y_test` length M.
/// Requires `1 <= k <= N`.
pub fn knn_errorrate<T: Float, L: Ord>(
    d: &DistanceMatrix<T>,
    y_train: &[L],
    y_test: &[L],
    k: usize,
) -> Result<f64, KnnError> {
    let output = KnnExecutor::new(DistanceMeasure::default(), k).run(
        d,
        y_train,
        y_test,
        DistanceLayout::Paired,
    )?;
    Ok(output.errors.rate())
}

/// Leave-one-out error rate of a square distance matrix.
///
/// The diagonal of `d` is expected to be +infinity (as produced by
/// [`compute_distance_matrix_loo`]). Requires `1 <= k <= N`; with k = N
/// every sample also counts its own label, ranked last.
pub fn knn_errorrate_loo<T: Float, L: Ord>(
    d: &DistanceMatrix<T>,
    y: &[L],
    k: usize,
) -> Result<f64, KnnError> {
    let output = KnnExecutor::new(DistanceMeasure::default(), k).run(
        d,
        y,
        y,
        DistanceLayout::LeaveOneOut,
    )?;
    Ok(output.errors.rate())
}

/// Majority-vote label among the `k` nearest columns of every row of `d`.
pub fn predict_labels<T: Float, L: Ord + Clone>(
    d: &DistanceMatrix<T>,
    y_train: &[L],
    k: usize,
) -> Result<Vec<L>, KnnError> {
    let predictions = KnnExecutor::new(DistanceMeasure::default(), k).predictions(d, y_train)?;
    Ok(predictions.into_iter().cloned().collect())
}

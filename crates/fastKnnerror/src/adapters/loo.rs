//! Leave-one-out adapter for KNN evaluation with parallel support.
//!
//! ## Purpose
//!
//! This module provides the leave-one-out execution adapter for
//! `fastKnnerror`. The (N, N) distance matrix and its neighbor table are the
//! expensive parts of a leave-one-out run; both are computed row-parallel.
//!
//! ## Design notes
//!
//! * **Delegation**: Diagonal masking, validation and scoring stay in `knnerror`.
//! * **Parallelism**: Adds parallel execution via `rayon` (fastKnnerror extension).
//! * **Measures**: Both squared L2 and cosine are supported.
//!
//! ## Invariants
//!
//! * Labels align with the feature rows.
//! * 1 <= k <= N; the sample itself is ranked last.

// Feature-gated imports
#[cfg(feature = "cpu")]
use crate::engine::executor::{gram_pass_parallel, neighbor_pass_parallel};

// External dependencies
use num_traits::Float;
use std::result::Result;

// Export dependencies from knnerror crate
use knnerror::internals::adapters::loo::LeaveOneOutKnnBuilder;
use knnerror::internals::engine::output::KnnResult;
use knnerror::internals::math::distance::DistanceMeasure;
use knnerror::internals::primitives::errors::KnnError;
use knnerror::internals::primitives::matrix::DistanceMatrix;

// Internal dependencies
use crate::input::{FeatureInput, LabelInput};

// ============================================================================
// Extended Leave-One-Out KNN Builder
// ============================================================================

/// Builder for the leave-one-out KNN evaluator with parallel support.
#[derive(Debug, Clone)]
pub struct ParallelLeaveOneOutKnnBuilder<T: Float> {
    /// Base builder from the knnerror crate
    pub base: LeaveOneOutKnnBuilder<T>,
}

impl<T: Float> Default for ParallelLeaveOneOutKnnBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> ParallelLeaveOneOutKnnBuilder<T> {
    /// Create a new leave-one-out builder with default parameters.
    ///
    /// # Defaults
    ///
    /// * All base parameters from knnerror LeaveOneOutKnnBuilder
    /// * parallel: true (fastKnnerror extension)
    fn new() -> Self {
        let base = LeaveOneOutKnnBuilder::default().parallel(true);
        Self { base }
    }

    /// Set parallel execution mode.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.base = self.base.parallel(parallel);
        self
    }

    // ========================================================================
    // Shared Setters
    // ========================================================================

    /// Set the neighbor count.
    pub fn neighbors(mut self, k: usize) -> Self {
        self.base = self.base.neighbors(k);
        self
    }

    /// Set the distance measure.
    pub fn measure(mut self, measure: DistanceMeasure) -> Self {
        self.base = self.base.measure(measure);
        self
    }

    /// Score several neighbor counts from the same distances.
    pub fn sweep(mut self, ks: &[usize]) -> Self {
        self.base = self.base.sweep(ks);
        self
    }

    /// Enable returning per-sample predictions.
    pub fn return_predictions(mut self) -> Self {
        self.base = self.base.return_predictions();
        self
    }

    /// Enable returning the distance matrix.
    pub fn return_distances(mut self) -> Self {
        self.base = self.base.return_distances();
        self
    }

    // ========================================================================
    // Build Method
    // ========================================================================

    /// Build the leave-one-out evaluator.
    pub fn build(self) -> Result<ParallelLeaveOneOutKnn<T>, KnnError> {
        // Validate by attempting to build the base evaluator
        let _ = self.base.clone().build()?;

        Ok(ParallelLeaveOneOutKnn { config: self })
    }
}

// ============================================================================
// Extended Leave-One-Out KNN Evaluator
// ============================================================================

/// Leave-one-out KNN evaluator with parallel support.
#[derive(Debug, Clone)]
pub struct ParallelLeaveOneOutKnn<T: Float> {
    config: ParallelLeaveOneOutKnnBuilder<T>,
}

impl<T: Float + Send + Sync + 'static> ParallelLeaveOneOutKnn<T> {
    fn base(&self) -> LeaveOneOutKnnBuilder<T> {
        #[allow(unused_mut)]
        let mut builder = self.config.base.clone();

        #[cfg(feature = "cpu")]
        {
            if builder.parallel.unwrap_or(true) {
                builder = builder
                    .custom_gram_pass(gram_pass_parallel)
                    .custom_neighbor_pass(neighbor_pass_parallel);
            } else {
                builder.custom_gram_pass = None;
                builder.custom_neighbor_pass = None;
            }
        }
        #[cfg(not(feature = "cpu"))]
        {
            // Fallback to sequential if cpu feature is disabled
            builder.custom_gram_pass = None;
            builder.custom_neighbor_pass = None;
        }

        builder
    }

    /// Classify every sample against all other samples and report the error rate.
    pub fn evaluate<I, Y, L>(&self, x: &I, y: &Y) -> Result<KnnResult<T, L>, KnnError>
    where
        I: FeatureInput<T> + ?Sized,
        Y: LabelInput<L> + ?Sized,
        L: Ord + Clone,
    {
        let x = x.as_feature_matrix()?;

        // Delegate execution to the base implementation
        let evaluator = self.base().build()?;
        evaluator.evaluate(&x, y.as_label_slice()?)
    }

    /// Score a precomputed square distance matrix (diagonal expected to be +infinity).
    pub fn evaluate_distances<Y, L>(
        &self,
        d: DistanceMatrix<T>,
        y: &Y,
    ) -> Result<KnnResult<T, L>, KnnError>
    where
        Y: LabelInput<L> + ?Sized,
        L: Ord + Clone,
    {
        let evaluator = self.base().build()?;
        evaluator.evaluate_distances(d, y.as_label_slice()?)
    }
}

//! Paired adapter for train/test KNN evaluation with parallel support.
//!
//! ## Purpose
//!
//! This module provides the paired execution adapter for `fastKnnerror`. It
//! wraps the core paired builder, accepts ndarray and nested-vector inputs,
//! and injects the row-parallel passes before delegating to the core engine.
//!
//! ## Design notes
//!
//! * **Delegation**: All validation and scoring is done by `knnerror`.
//! * **Parallelism**: Adds parallel execution via `rayon` (fastKnnerror extension).
//! * **Generics**: Generic over `Float` types and any `Ord` label type.
//!
//! ## Invariants
//!
//! * Train and test features share their dimension.
//! * Label vectors align with their feature matrices.
//! * Parallel and sequential runs produce identical results.
//!
//! ## Non-goals
//!
//! * This adapter does not exclude self-matches (use the leave-one-out adapter).

// Feature-gated imports
#[cfg(feature = "cpu")]
use crate::engine::executor::{gram_pass_parallel, neighbor_pass_parallel};

// External dependencies
use num_traits::Float;
use std::result::Result;

// Export dependencies from knnerror crate
use knnerror::internals::adapters::paired::PairedKnnBuilder;
use knnerror::internals::engine::output::KnnResult;
use knnerror::internals::math::distance::DistanceMeasure;
use knnerror::internals::primitives::errors::KnnError;
use knnerror::internals::primitives::matrix::DistanceMatrix;

// Internal dependencies
use crate::input::{FeatureInput, LabelInput};

// ============================================================================
// Extended Paired KNN Builder
// ============================================================================

/// Builder for the paired KNN evaluator with parallel support.
#[derive(Debug, Clone)]
pub struct ParallelPairedKnnBuilder<T: Float> {
    /// Base builder from the knnerror crate
    pub base: PairedKnnBuilder<T>,
}

impl<T: Float> Default for ParallelPairedKnnBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> ParallelPairedKnnBuilder<T> {
    /// Create a new paired builder with default parameters.
    ///
    /// # Defaults
    ///
    /// * All base parameters from knnerror PairedKnnBuilder
    /// * parallel: true (fastKnnerror extension)
    fn new() -> Self {
        let base = PairedKnnBuilder::default().parallel(true);
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

    /// Build the paired evaluator.
    pub fn build(self) -> Result<ParallelPairedKnn<T>, KnnError> {
        // Validate by attempting to build the base evaluator
        let _ = self.base.clone().build()?;

        Ok(ParallelPairedKnn { config: self })
    }
}

// ============================================================================
// Extended Paired KNN Evaluator
// ============================================================================

/// Paired KNN evaluator with parallel support.
#[derive(Debug, Clone)]
pub struct ParallelPairedKnn<T: Float> {
    config: ParallelPairedKnnBuilder<T>,
}

impl<T: Float + Send + Sync + 'static> ParallelPairedKnn<T> {
    fn base(&self) -> PairedKnnBuilder<T> {
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

    /// Classify every test sample against the training set and report the error rate.
    pub fn evaluate<I1, I2, Y1, Y2, L>(
        &self,
        train: &I1,
        y_train: &Y1,
        test: &I2,
        y_test: &Y2,
    ) -> Result<KnnResult<T, L>, KnnError>
    where
        I1: FeatureInput<T> + ?Sized,
        I2: FeatureInput<T> + ?Sized,
        Y1: LabelInput<L> + ?Sized,
        Y2: LabelInput<L> + ?Sized,
        L: Ord + Clone,
    {
        let train = train.as_feature_matrix()?;
        let test = test.as_feature_matrix()?;

        // Delegate execution to the base implementation
        let evaluator = self.base().build()?;
        evaluator.evaluate(
            &train,
            y_train.as_label_slice()?,
            &test,
            y_test.as_label_slice()?,
        )
    }

    /// Score a precomputed (test x train) distance matrix.
    pub fn evaluate_distances<Y1, Y2, L>(
        &self,
        d: DistanceMatrix<T>,
        y_train: &Y1,
        y_test: &Y2,
    ) -> Result<KnnResult<T, L>, KnnError>
    where
        Y1: LabelInput<L> + ?Sized,
        Y2: LabelInput<L> + ?Sized,
        L: Ord + Clone,
    {
        let evaluator = self.base().build()?;
        evaluator.evaluate_distances(d, y_train.as_label_slice()?, y_test.as_label_slice()?)
    }
}

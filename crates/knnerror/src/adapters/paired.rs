//! Paired adapter for train/test KNN evaluation.
//!
//! ## Purpose
//!
//! This module provides the paired execution adapter: every test sample is
//! classified by majority vote among its k nearest training samples, and the
//! fraction of wrong votes is reported.
//!
//! ## Design notes
//!
//! * **Processing**: Distances are computed once, then scored for k and any sweep.
//! * **Delegation**: Delegates computation to the execution engine.
//! * **Generics**: Generic over `Float` types and any `Ord` label type.
//!
//! ## Key concepts
//!
//! * **Builder Pattern**: Fluent API for configuration with sensible defaults.
//! * **Precomputed distances**: `evaluate_distances` scores an existing matrix.
//!
//! ## Invariants
//!
//! * Train and test features share their dimension.
//! * Label vectors align with their feature matrices.
//! * 1 <= k <= number of training samples.
//!
//! ## Non-goals
//!
//! * This adapter does not exclude self-matches when train and test are the
//!   same set (use the leave-one-out adapter).

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::engine::executor::{GramPassFn, KnnConfig, KnnExecutor, NeighborPassFn};
use crate::engine::output::KnnResult;
use crate::engine::validator::Validator;
use crate::math::distance::DistanceMeasure;
use crate::primitives::errors::KnnError;
use crate::primitives::matrix::{DistanceLayout, DistanceMatrix, FeatureMatrix};

// ============================================================================
// Paired KNN Builder
// ============================================================================

/// Builder for the paired (train/test) KNN evaluator.
#[derive(Debug, Clone)]
pub struct PairedKnnBuilder<T: Float> {
    /// Neighbor count
    pub neighbors: usize,

    /// Distance measure
    pub measure: DistanceMeasure,

    /// Additional neighbor counts to score
    pub sweep: Option<Vec<usize>>,

    /// Whether to return per-sample predictions
    pub return_predictions: bool,

    /// Whether to return the distance matrix
    pub return_distances: bool,


    // ++++++++++++++++++++++++++++++++++++++
    // +               DEV                  +
    // ++++++++++++++++++++++++++++++++++++++
    /// Custom Gram pass function.
    #[doc(hidden)]
    pub custom_gram_pass: Option<GramPassFn<T>>,

    /// Custom neighbor pass function.
    #[doc(hidden)]
    pub custom_neighbor_pass: Option<NeighborPassFn<T>>,

    /// Parallel execution hint.
    #[doc(hidden)]
    pub parallel: Option<bool>,

    /// Tracks if any parameter was set multiple times (for validation)
    #[doc(hidden)]
    pub(crate) duplicate_param: Option<&'static str>,
}

impl<T: Float> Default for PairedKnnBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> PairedKnnBuilder<T> {
    /// Create a new paired builder with default parameters.
    fn new() -> Self {
        Self {
            neighbors: 1,
            measure: DistanceMeasure::SquaredL2,
            sweep: None,
            return_predictions: false,
            return_distances: false,
            custom_gram_pass: None,
            custom_neighbor_pass: None,
            parallel: None,
            duplicate_param: None,
        }
    }

    // ========================================================================
    // Setters
    // ========================================================================

    /// Set the neighbor count.
    pub fn neighbors(mut self, k: usize) -> Self {
        self.neighbors = k;
        self
    }

    /// Set the distance measure.
    pub fn measure(mut self, measure: DistanceMeasure) -> Self {
        self.measure = measure;
        self
    }

    /// Score several neighbor counts from the same distances.
    pub fn sweep(mut self, ks: &[usize]) -> Self {
        self.sweep = Some(ks.to_vec());
        self
    }

    /// Enable returning per-sample predictions.
    pub fn return_predictions(mut self) -> Self {
        self.return_predictions = true;
        self
    }

    /// Enable returning the distance matrix.
    pub fn return_distances(mut self) -> Self {
        self.return_distances = true;
        self
    }

    // ++++++++++++++++++++++++++++++++++++++
    // +               DEV                  +
    // ++++++++++++++++++++++++++++++++++++++

    /// Set parallel execution hint.
    #[doc(hidden)]
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = Some(parallel);
        self
    }

    /// Set a custom Gram pass function.
    #[doc(hidden)]
    pub fn custom_gram_pass(mut self, pass: GramPassFn<T>) -> Self {
        self.custom_gram_pass = Some(pass);
        self
    }

    /// Set a custom neighbor pass function.
    #[doc(hidden)]
    pub fn custom_neighbor_pass(mut self, pass: NeighborPassFn<T>) -> Self {
        self.custom_neighbor_pass = Some(pass);
        self
    }

    // ========================================================================
    // Build Method
    // ========================================================================

    /// Build the paired evaluator.
    pub fn build(self) -> Result<PairedKnn<T>, KnnError> {
        // Check for duplicate parameter configuration
        Validator::validate_no_duplicates(self.duplicate_param)?;

        // Paired matrices are squared L2 only
        Validator::validate_paired_measure(self.measure)?;

        // k against the data size is checked at evaluation time
        Validator::validate_neighbors(self.neighbors)?;
        if let Some(ref ks) = self.sweep {
            Validator::validate_sweep(ks, usize::MAX)?;
        }

        Ok(PairedKnn { config: self })
    }
}

// ============================================================================
// Paired KNN Evaluator
// ============================================================================

/// Paired (train/test) KNN evaluator.
#[derive(Debug, Clone)]
pub struct PairedKnn<T: Float> {
    config: PairedKnnBuilder<T>,
}

impl<T: Float> PairedKnn<T> {
    fn executor(&self) -> KnnExecutor<T> {
        KnnExecutor::from_config(&KnnConfig {
            measure: self.config.measure,
            neighbors: self.config.neighbors,
            sweep: self.config.sweep.clone(),
            // ++++++++++++++++++++++++++++++++++++++
            // +               DEV                  +
            // ++++++++++++++++++++++++++++++++++++++
            custom_gram_pass: self.config.custom_gram_pass,
            custom_neighbor_pass: self.config.custom_neighbor_pass,
            parallel: self.config.parallel.unwrap_or(false),
        })
    }

    /// Classify every test sample against the training set and report the error rate.
    pub fn evaluate<L: Ord + Clone>(
        &self,
        train: &FeatureMatrix<T>,
        y_train: &[L],
        test: &FeatureMatrix<T>,
        y_test: &[L],
    ) -> Result<KnnResult<T, L>, KnnError> {
        Validator::validate_labels("training labels", train.nrows(), y_train.len())?;
        Validator::validate_labels("test labels", test.nrows(), y_test.len())?;

        let d = self.executor().paired_distances(train, test)?;
        self.score(d, y_train, y_test)
    }

    /// Score a precomputed (test x train) distance matrix.
    pub fn evaluate_distances<L: Ord + Clone>(
        &self,
        d: DistanceMatrix<T>,
        y_train: &[L],
        y_test: &[L],
    ) -> Result<KnnResult<T, L>, KnnError> {
        self.score(d, y_train, y_test)
    }

    fn score<L: Ord + Clone>(
        &self,
        d: DistanceMatrix<T>,
        y_train: &[L],
        y_test: &[L],
    ) -> Result<KnnResult<T, L>, KnnError> {
        let output = self
            .executor()
            .run(&d, y_train, y_test, DistanceLayout::Paired)?;

        let predictions = self
            .config
            .return_predictions
            .then(|| output.predictions.iter().map(|&l| l.clone()).collect());

        Ok(KnnResult {
            layout: DistanceLayout::Paired,
            measure: self.config.measure,
            neighbors: self.config.neighbors,
            samples: d.nrows(),
            references: d.ncols(),
            misclassified: output.errors.misclassified,
            error_rate: output.errors.rate(),
            predictions,
            distances: self.config.return_distances.then_some(d),
            sweep_scores: output.sweep_scores,
        })
    }
}

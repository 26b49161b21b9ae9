//! High-level API for KNN evaluation with parallel execution support.
//!
//! ## Purpose
//!
//! This module provides the primary user-facing entry point for KNN error
//! estimation with parallel execution. It extends the `knnerror` API with
//! adapters that utilize all available CPU cores, and with matrix-level
//! functions that accept ndarray inputs.
//!
//! ## Design notes
//!
//! * **Fluent Integration**: Re-uses the base `knnerror` builder pattern.
//! * **Parallel-First**: Defaults to parallel execution.
//! * **Transparent**: Marker types (Paired, LeaveOneOut) select the parallel builders.
//!
//! ## Key concepts
//!
//! * **Parallel Support**: Uses `rayon` for row-parallel distance and neighbor passes.
//! * **Extended Adapters**: Wraps core adapters with parallel implementation logic.
//! * **Feature-Gated**: Parallelism is configurable via the `cpu` crate feature.
//!
//! ### Configuration Flow
//!
//! 1. Create a [`KnnBuilder`] via `Knn::new()`.
//! 2. Chain configuration methods (`.neighbors()`, `.measure()`, etc.).
//! 3. Select an adapter via `.adapter(LeaveOneOut)` to get a parallel execution builder.

// External dependencies
use num_traits::Float;

// Import base marker types for delegation
use knnerror::internals::api::LeaveOneOut as BaseLeaveOneOut;
use knnerror::internals::api::Paired as BasePaired;
use knnerror::internals::primitives::matrix::DistanceLayout;

// Internal dependencies
use crate::adapters::loo::ParallelLeaveOneOutKnnBuilder;
use crate::adapters::paired::ParallelPairedKnnBuilder;
use crate::engine::executor::build_executor;
use crate::input::{FeatureInput, LabelInput};

// Publicly re-exported types
pub use crate::input::IntoArray2;
pub use knnerror::internals::api::{
    DistanceMatrix, DistanceMeasure, Embedder, FeatureMatrix, InMemorySource, KnnAdapter,
    KnnBuilder, KnnError, KnnResult, LabeledSamples, SampleSource, embed_samples,
};

// ============================================================================
// Adapter Module
// ============================================================================

/// Adapter selection namespace.
#[allow(non_snake_case)]
pub mod Adapter {
    pub use super::{LeaveOneOut, Paired};
}

// ============================================================================
// Adapter Marker Types
// ============================================================================

/// Marker for parallel train/test evaluation.
#[derive(Debug, Clone, Copy)]
pub struct Paired;

impl<T: Float> KnnAdapter<T> for Paired {
    type Output = ParallelPairedKnnBuilder<T>;

    fn convert(builder: KnnBuilder<T>) -> Self::Output {
        // Determine parallel mode: user choice OR default to true for fastKnnerror
        let parallel = builder.parallel.unwrap_or(true);

        // Delegate to base implementation to create base builder
        let mut base = <BasePaired as KnnAdapter<T>>::convert(builder);
        base = base.parallel(parallel);

        // Wrap with extension fields
        ParallelPairedKnnBuilder { base }
    }
}

/// Marker for parallel leave-one-out evaluation.
#[derive(Debug, Clone, Copy)]
pub struct LeaveOneOut;

impl<T: Float> KnnAdapter<T> for LeaveOneOut {
    type Output = ParallelLeaveOneOutKnnBuilder<T>;

    fn convert(builder: KnnBuilder<T>) -> Self::Output {
        // Determine parallel mode: user choice OR default to true for fastKnnerror
        let parallel = builder.parallel.unwrap_or(true);

        // Delegate to base implementation to create base builder
        let mut base = <BaseLeaveOneOut as KnnAdapter<T>>::convert(builder);
        base = base.parallel(parallel);

        // Wrap with extension fields
        ParallelLeaveOneOutKnnBuilder { base }
    }
}

// ============================================================================
// Parallel Free Functions
// ============================================================================

/// Squared Euclidean distances from every test row to every training row.
///
/// Parallel counterpart of `knnerror`'s function of the same name, accepting
/// any [`FeatureInput`] (core matrices, nested vectors, ndarray arrays).
pub fn compute_distance_matrix<T, I1, I2>(
    train: &I1,
    test: &I2,
    measure: DistanceMeasure,
) -> Result<DistanceMatrix<T>, KnnError>
where
    T: Float + Send + Sync,
    I1: FeatureInput<T> + ?Sized,
    I2: FeatureInput<T> + ?Sized,
{
    let train = train.as_feature_matrix()?;
    let test = test.as_feature_matrix()?;
    build_executor(measure, 1, true).paired_distances(&train, &test)
}

/// Distances between all rows of `x`, with a +infinity diagonal.
pub fn compute_distance_matrix_loo<T, I>(
    x: &I,
    measure: DistanceMeasure,
) -> Result<DistanceMatrix<T>, KnnError>
where
    T: Float + Send + Sync,
    I: FeatureInput<T> + ?Sized,
{
    let x = x.as_feature_matrix()?;
    build_executor(measure, 1, true).loo_distances(&x)
}

/// Fraction of test rows whose k-nearest-neighbor majority label is wrong.
pub fn knn_errorrate<T, Y1, Y2, L>(
    d: &DistanceMatrix<T>,
    y_train: &Y1,
    y_test: &Y2,
    k: usize,
) -> Result<f64, KnnError>
where
    T: Float + Send + Sync,
    Y1: LabelInput<L> + ?Sized,
    Y2: LabelInput<L> + ?Sized,
    L: Ord,
{
    let output = build_executor(DistanceMeasure::default(), k, true).run(
        d,
        y_train.as_label_slice()?,
        y_test.as_label_slice()?,
        DistanceLayout::Paired,
    )?;
    Ok(output.errors.rate())
}

/// Leave-one-out error rate of a square distance matrix.
pub fn knn_errorrate_loo<T, Y, L>(d: &DistanceMatrix<T>, y: &Y, k: usize) -> Result<f64, KnnError>
where
    T: Float + Send + Sync,
    Y: LabelInput<L> + ?Sized,
    L: Ord,
{
    let y = y.as_label_slice()?;
    let output =
        build_executor(DistanceMeasure::default(), k, true).run(d, y, y, DistanceLayout::LeaveOneOut)?;
    Ok(output.errors.rate())
}

/// Majority-vote label among the `k` nearest columns of every row of `d`.
pub fn predict_labels<T, Y, L>(d: &DistanceMatrix<T>, y_train: &Y, k: usize) -> Result<Vec<L>, KnnError>
where
    T: Float + Send + Sync,
    Y: LabelInput<L> + ?Sized,
    L: Ord + Clone,
{
    let predictions =
        build_executor(DistanceMeasure::default(), k, true).predictions(d, y_train.as_label_slice()?)?;
    Ok(predictions.into_iter().cloned().collect())
}

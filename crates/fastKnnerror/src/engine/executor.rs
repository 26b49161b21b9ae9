//! Parallel execution passes for KNN evaluation.
//!
//! ## Purpose
//!
//! This module provides the row-parallel Gram and neighbor-selection passes
//! that are injected into the `knnerror` crate's execution engine. Both
//! passes are embarrassingly parallel over output rows, so large evaluations
//! use all available CPU cores.
//!
//! ## Design notes
//!
//! * **Implementation**: Drop-in replacements for the sequential passes.
//! * **Parallelism**: Uses `rayon` for data-parallel execution across CPU cores.
//! * **Optimization**: Reuses candidate buffers per thread to minimize allocations.
//! * **Determinism**: Each output row is computed by the same kernel and in
//!   the same summation order as the sequential path, so results are identical.
//!
//! ## Key concepts
//!
//! * **Row Chunks**: Output rows are disjoint `par_chunks_mut` slices.
//! * **Buffer Reuse**: Thread-local scratch buffers via `for_each_init`.
//! * **Integration**: Plugs into the `knnerror` executor via the `GramPassFn`
//!   and `NeighborPassFn` hooks.
//!
//! ## Invariants
//!
//! * The output buffers have exactly rows x columns (or rows x k) entries.
//! * 1 <= k <= number of columns.
//!
//! ## Non-goals
//!
//! * This module does not validate input data (handled by the core validator).
//! * This module does not expand Gram entries into distances (handled by the core).

// Feature-gated imports
#[cfg(feature = "cpu")]
use rayon::prelude::*;

// External dependencies
use num_traits::Float;

// Export dependencies from knnerror crate
#[cfg(feature = "cpu")]
use knnerror::internals::algorithms::selection::{argmin, k_smallest};
use knnerror::internals::engine::executor::{KnnConfig, KnnExecutor};
use knnerror::internals::math::distance::DistanceMeasure;
#[cfg(feature = "cpu")]
use knnerror::internals::math::distance::gram_row;
#[cfg(feature = "cpu")]
use knnerror::internals::primitives::buffer::NeighborBuffer;
#[cfg(feature = "cpu")]
use knnerror::internals::primitives::matrix::{DistanceMatrix, FeatureMatrix};

// ============================================================================
// Parallel Passes
// ============================================================================

/// Compute `out[i * b.nrows() + j] = a_i . b_j` with one task per output row.
#[cfg(feature = "cpu")]
pub fn gram_pass_parallel<T>(a: &FeatureMatrix<T>, b: &FeatureMatrix<T>, out: &mut [T])
where
    T: Float + Send + Sync,
{
    let ncols = b.nrows();
    if ncols == 0 {
        return;
    }

    out.par_chunks_mut(ncols)
        .enumerate()
        .for_each(|(i, row)| gram_row(a.row(i), b, row));
}

/// Select the `k` nearest columns of every row with one task per row.
#[cfg(feature = "cpu")]
pub fn neighbor_pass_parallel<T>(d: &DistanceMatrix<T>, k: usize, out: &mut [usize])
where
    T: Float + Send + Sync,
{
    if k == 0 {
        return;
    }

    // Arg-min needs no scratch space
    if k == 1 {
        out.par_iter_mut()
            .enumerate()
            .for_each(|(i, o)| *o = argmin(d.row(i)));
        return;
    }

    let ncols = d.ncols();
    out.par_chunks_mut(k).enumerate().for_each_init(
        || NeighborBuffer::with_capacity(ncols),
        |buffer, (i, chunk)| k_smallest(d.row(i), k, buffer, chunk),
    );
}

// ============================================================================
// Executor Construction
// ============================================================================

/// Build a core executor, injecting the parallel passes when requested.
pub fn build_executor<T>(measure: DistanceMeasure, neighbors: usize, parallel: bool) -> KnnExecutor<T>
where
    T: Float + Send + Sync,
{
    #[allow(unused_mut)]
    let mut config = KnnConfig {
        measure,
        neighbors,
        ..KnnConfig::default()
    };

    #[cfg(feature = "cpu")]
    {
        if parallel {
            config.custom_gram_pass = Some(gram_pass_parallel::<T>);
            config.custom_neighbor_pass = Some(neighbor_pass_parallel::<T>);
            config.parallel = true;
        }
    }
    #[cfg(not(feature = "cpu"))]
    {
        // Fallback to sequential if cpu feature is disabled
        let _ = parallel;
    }

    KnnExecutor::from_config(&config)
}

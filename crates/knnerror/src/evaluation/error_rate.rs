//! KNN error-rate estimation from neighbor tables.
//!
//! ## Purpose
//!
//! This module converts a neighbor table (the nearest columns of every
//! distance row) into majority-vote predictions and a misclassification
//! rate. It also evaluates several neighbor counts from one table.
//!
//! ## Design notes
//!
//! * **Prefix reuse**: Table rows are ordered nearest first, so the k nearest
//!   neighbors of a row are a prefix of its k_max nearest. A sweep over
//!   neighbor counts therefore needs a single selection pass.
//! * **Borrowed predictions**: Predictions reference training labels; cloning
//!   happens only at the public boundary.
//!
//! ## Key concepts
//!
//! * **Paired**: Rows are test samples, labels come from `y_test`.
//! * **Leave-one-out**: Rows and columns are the same samples; `y_test == y_train`.
//!
//! ## Invariants
//!
//! * The error rate lies in [0, 1].
//! * A k = 1 prediction equals the label of the row's arg-min column.
//!
//! ## Non-goals
//!
//! * This module does not select neighbors (see `algorithms::selection`).
//! * This module does not validate k or shapes (handled by `validator`).

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

// Internal dependencies
use crate::algorithms::vote::vote_neighbors;

// ============================================================================
// Neighbor Table
// ============================================================================

/// Nearest columns of every row, nearest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeighborTable {
    indices: Vec<usize>,
    rows: usize,
    stride: usize,
}

impl NeighborTable {
    /// Wrap a flat table of `rows * stride` column indices.
    pub fn new(indices: Vec<usize>, rows: usize, stride: usize) -> Self {
        debug_assert_eq!(indices.len(), rows * stride);
        Self {
            indices,
            rows,
            stride,
        }
    }

    /// Number of query rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Neighbors stored per row.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// The `k` nearest columns of row `i`.
    #[inline]
    pub fn nearest(&self, i: usize, k: usize) -> &[usize] {
        let start = i * self.stride;
        &self.indices[start..start + k.min(self.stride)]
    }
}

// ============================================================================
// Error Rate
// ============================================================================

/// Misclassification count over a set of query rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ErrorRate {
    /// Rows whose predicted label differs from the true label.
    pub misclassified: usize,

    /// Rows evaluated.
    pub total: usize,
}

impl ErrorRate {
    /// Count mismatches between predictions and true labels.
    pub fn from_predictions<L: PartialEq>(predicted: &[&L], truth: &[L]) -> Self {
        let misclassified = predicted
            .iter()
            .zip(truth.iter())
            .filter(|(p, t)| **p != *t)
            .count();

        Self {
            misclassified,
            total: predicted.len(),
        }
    }

    /// Fraction of misclassified rows (1 - accuracy).
    pub fn rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.misclassified as f64 / self.total as f64
    }
}

// ============================================================================
// Prediction
// ============================================================================

/// Majority-vote label of every row using its `k` nearest neighbors.
///
/// Returns `None` only if a row has no neighbors.
pub fn predict<'a, L: Ord>(table: &NeighborTable, k: usize, y_train: &'a [L]) -> Option<Vec<&'a L>> {
    let mut scratch = Vec::with_capacity(k);
    (0..table.rows())
        .map(|i| vote_neighbors(y_train, table.nearest(i, k), &mut scratch))
        .collect()
}

/// Error rate for each neighbor count in `ks`, from one shared table.
pub fn sweep<L: Ord>(
    table: &NeighborTable,
    ks: &[usize],
    y_train: &[L],
    y_test: &[L],
) -> Option<Vec<(usize, f64)>> {
    ks.iter()
        .map(|&k| {
            let predicted = predict(table, k, y_train)?;
            let rate = ErrorRate::from_predictions(&predicted, y_test).rate();
            tracing::trace!(k, rate, "sweep entry");
            Some((k, rate))
        })
        .collect()
}

//! Output types and result structures for KNN evaluation.
//!
//! ## Purpose
//!
//! This module defines the `KnnResult` struct which encapsulates all outputs
//! of an evaluation: the error rate, optional predictions, the distance
//! matrix and neighbor-count sweep scores.
//!
//! ## Design notes
//!
//! * **Memory Efficiency**: Optional outputs use `Option<...>` and are only
//!   populated on request.
//! * **Ergonomics**: Implements `Display` for human-readable output.
//!
//! ## Invariants
//!
//! * `error_rate == misclassified / samples`.
//! * `predictions`, when present, has one entry per evaluated row.
//!
//! ## Non-goals
//!
//! * This module does not perform calculations; it only stores results.
//! * This module does not provide serialization/deserialization logic.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

// External dependencies
use core::cmp::Ordering;
use core::fmt::{Display, Formatter, Result};

// Internal dependencies
use crate::math::distance::DistanceMeasure;
use crate::primitives::matrix::{DistanceLayout, DistanceMatrix};

// ============================================================================
// Result Structure
// ============================================================================

/// KNN evaluation output.
#[derive(Debug, Clone, PartialEq)]
pub struct KnnResult<T, L> {
    /// Paired (train/test) or leave-one-out evaluation.
    pub layout: DistanceLayout,

    /// Distance measure used.
    pub measure: DistanceMeasure,

    /// Neighbor count of the headline error rate.
    pub neighbors: usize,

    /// Rows evaluated (test samples, or all samples for leave-one-out).
    pub samples: usize,

    /// Candidate neighbors per row (training samples, or all samples).
    pub references: usize,

    /// Rows whose majority label differs from the true label.
    pub misclassified: usize,

    /// Fraction of misclassified rows (1 - accuracy), in [0, 1].
    pub error_rate: f64,

    /// Majority-vote label of every evaluated row.
    pub predictions: Option<Vec<L>>,

    /// Distance matrix the evaluation was computed from.
    pub distances: Option<DistanceMatrix<T>>,

    /// Error rate for each neighbor count of the sweep.
    pub sweep_scores: Option<Vec<(usize, f64)>>,
}

impl<T, L> KnnResult<T, L> {
    // ========================================================================
    // Query Methods
    // ========================================================================

    /// Fraction of correctly classified rows.
    pub fn accuracy(&self) -> f64 {
        1.0 - self.error_rate
    }

    /// Check if a neighbor-count sweep was performed.
    pub fn has_sweep_scores(&self) -> bool {
        self.sweep_scores.is_some()
    }

    /// Neighbor count with the lowest sweep error (the smallest k on ties).
    pub fn best_sweep(&self) -> Option<(usize, f64)> {
        self.sweep_scores.as_ref().and_then(|scores| {
            scores.iter().copied().min_by(|a, b| {
                a.1.partial_cmp(&b.1)
                    .unwrap_or(Ordering::Equal)
                    .then(a.0.cmp(&b.0))
            })
        })
    }
}

// ============================================================================
// Display Implementation
// ============================================================================

impl<T, L> Display for KnnResult<T, L> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let mode = match self.layout {
            DistanceLayout::Paired => "paired",
            DistanceLayout::LeaveOneOut => "leave-one-out",
        };

        writeln!(f, "Summary:")?;
        writeln!(f, "  Mode:          {}", mode)?;
        writeln!(f, "  Measure:       {}", self.measure)?;
        writeln!(f, "  Neighbors (k): {}", self.neighbors)?;
        writeln!(f, "  Samples:       {}", self.samples)?;
        writeln!(f, "  References:    {}", self.references)?;
        writeln!(f, "  Misclassified: {}", self.misclassified)?;
        writeln!(f, "  Error rate:    {:.6}", self.error_rate)?;

        if let Some(scores) = &self.sweep_scores {
            writeln!(f)?;
            writeln!(f, "Neighbor Sweep:")?;
            writeln!(f, "  {:>6} {:>12}", "k", "Error rate")?;
            writeln!(f, "  -------------------")?;
            for (k, rate) in scores {
                writeln!(f, "  {:>6} {:>12.6}", k, rate)?;
            }
        }

        Ok(())
    }
}

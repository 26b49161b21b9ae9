//! Neighbor selection over distance rows.
//!
//! ## Purpose
//!
//! This module finds, for each row of a distance matrix, the column indices
//! with the smallest distances. It is the expensive half of KNN evaluation;
//! the vote over the selected labels is cheap by comparison.
//!
//! ## Design notes
//!
//! * **Fast path**: k = 1 uses a single linear arg-min scan.
//! * **Partial selection**: k > 1 uses `select_nth_unstable_by`, O(N) per row,
//!   then orders only the selected prefix.
//! * **Deterministic ties**: Candidates are ordered by (distance, column), so
//!   equal distances resolve towards the lower column index on both paths.
//!
//! ## Key concepts
//!
//! * **Neighbor table**: A flat `rows * k` buffer; row `i` owns
//!   `out[i * k..(i + 1) * k]`, nearest first.
//!
//! ## Invariants
//!
//! * Arg-min and the general path agree exactly for k = 1.
//! * Selected indices within a row are distinct.
//!
//! ## Non-goals
//!
//! * This module does not validate k or reject NaN distances (handled by `validator`).

// External dependencies
use core::cmp::Ordering;
use num_traits::Float;

// Internal dependencies
use crate::primitives::buffer::NeighborBuffer;
use crate::primitives::matrix::DistanceMatrix;

// ============================================================================
// Ordering
// ============================================================================

/// Total order on (distance, column) candidates.
#[inline]
fn candidate_order<T: Float>(a: &(T, usize), b: &(T, usize)) -> Ordering {
    a.0.partial_cmp(&b.0)
        .unwrap_or(Ordering::Equal)
        .then(a.1.cmp(&b.1))
}

// ============================================================================
// Row Selection
// ============================================================================

/// Index of the smallest entry; the first one wins among equal minima.
#[inline]
pub fn argmin<T: Float>(row: &[T]) -> usize {
    let mut best = 0;
    for (j, &v) in row.iter().enumerate().skip(1) {
        if v < row[best] {
            best = j;
        }
    }
    best
}

/// Write the indices of the `k` smallest entries of `row` into `out`, nearest first.
///
/// `out.len()` must equal `k` and `1 <= k <= row.len()`.
pub fn k_smallest<T: Float>(row: &[T], k: usize, buffer: &mut NeighborBuffer<T>, out: &mut [usize]) {
    debug_assert!(k >= 1 && k <= row.len());
    debug_assert_eq!(out.len(), k);

    let candidates = &mut buffer.candidates;
    candidates.clear();
    candidates.extend(row.iter().copied().zip(0..row.len()));

    if k < candidates.len() {
        candidates.select_nth_unstable_by(k - 1, candidate_order);
    }
    let selected = &mut candidates[..k];
    selected.sort_unstable_by(candidate_order);

    for (o, &(_, j)) in out.iter_mut().zip(selected.iter()) {
        *o = j;
    }
}

// ============================================================================
// Matrix Pass
// ============================================================================

/// Sequential neighbor pass over every row of `d`.
///
/// Fills `out` (length `d.nrows() * k`) with the neighbor table.
pub fn neighbor_pass<T: Float>(d: &DistanceMatrix<T>, k: usize, out: &mut [usize]) {
    if k == 0 {
        return;
    }
    if k == 1 {
        for (i, o) in out.iter_mut().enumerate() {
            *o = argmin(d.row(i));
        }
        return;
    }

    let mut buffer = NeighborBuffer::with_capacity(d.ncols());
    for (i, chunk) in out.chunks_exact_mut(k).enumerate() {
        k_smallest(d.row(i), k, &mut buffer, chunk);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argmin_first_of_ties() {
        assert_eq!(argmin(&[3.0_f64, 1.0, 1.0, 2.0]), 1);
        assert_eq!(argmin(&[f64::INFINITY, 5.0]), 1);
    }

    #[test]
    fn test_k_smallest_orders_by_distance_then_index() {
        let row = [4.0_f64, 1.0, 3.0, 1.0, 0.5];
        let mut buffer = NeighborBuffer::default();
        let mut out = [0usize; 3];
        k_smallest(&row, 3, &mut buffer, &mut out);
        assert_eq!(out, [4, 1, 3]);
    }

    #[test]
    fn test_k_smallest_full_row() {
        let row = [2.0_f64, 0.0, 1.0];
        let mut buffer = NeighborBuffer::default();
        let mut out = [0usize; 3];
        k_smallest(&row, 3, &mut buffer, &mut out);
        assert_eq!(out, [1, 2, 0]);
    }
}

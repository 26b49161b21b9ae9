#![cfg(feature = "dev")]
//! Tests for KNN error-rate estimation.
//!
//! These tests verify the neighbor selection, voting and scoring used by both
//! evaluation modes:
//! - Paired (train/test) error rates from an (M, N) distance matrix
//! - Leave-one-out error rates from a square matrix with an infinite diagonal
//! - Deterministic tie-breaking for equal distances and equal vote counts
//! - Validation of k, label lengths and matrix contents
//!
//! ## Test Organization
//!
//! 1. **Concrete Scenarios** - Hand-computed paired and leave-one-out examples
//! 2. **Neighbor Selection** - Arg-min and k-smallest agreement, tie order
//! 3. **Voting** - Majority and tie rules
//! 4. **Neighbor Sweeps** - Several k from one neighbor table
//! 5. **Error Conditions** - Invalid k, shapes, NaN distances

use approx::assert_relative_eq;

use knnerror::internals::algorithms::selection::{argmin, k_smallest, neighbor_pass};
use knnerror::internals::algorithms::vote::majority_vote;
use knnerror::internals::api::{
    compute_distance_matrix, compute_distance_matrix_loo, knn_errorrate, knn_errorrate_loo,
    predict_labels,
};
use knnerror::internals::engine::executor::KnnExecutor;
use knnerror::internals::evaluation::error_rate::{ErrorRate, NeighborTable, predict, sweep};
use knnerror::internals::math::distance::DistanceMeasure;
use knnerror::internals::primitives::buffer::NeighborBuffer;
use knnerror::internals::primitives::errors::KnnError;
use knnerror::internals::primitives::matrix::{DistanceLayout, DistanceMatrix, FeatureMatrix};

/// Two well-separated clusters of three points each.
fn two_clusters() -> (FeatureMatrix<f64>, Vec<u32>) {
    let x = FeatureMatrix::from_rows(&[
        [0.0_f64, 0.0],
        [0.0, 1.0],
        [1.0, 0.0],
        [10.0, 10.0],
        [10.0, 11.0],
        [11.0, 10.0],
    ])
    .unwrap();
    (x, vec![0, 0, 0, 1, 1, 1])
}

// ============================================================================
// Concrete Scenario Tests
// ============================================================================

/// Test the paired scenario end to end: distances, neighbors, error rate.
#[test]
fn test_paired_scenario() {
    let train = FeatureMatrix::from_rows(&[[0.0_f64, 0.0], [10.0, 10.0]]).unwrap();
    let test = FeatureMatrix::from_rows(&[[0.0_f64, 1.0], [9.0, 9.0]]).unwrap();
    let (y_train, y_test) = ([0, 1], [0, 1]);

    let d = compute_distance_matrix(&train, &test, DistanceMeasure::SquaredL2).unwrap();

    let mut nearest = vec![0; 2];
    neighbor_pass(&d, 1, &mut nearest);
    assert_eq!(nearest, vec![0, 1]);

    assert_eq!(predict_labels(&d, &y_train, 1).unwrap(), vec![0, 1]);
    assert_relative_eq!(knn_errorrate(&d, &y_train, &y_test, 1).unwrap(), 0.0);
}

/// Test the leave-one-out scenario: the isolated sample is misclassified.
#[test]
fn test_loo_scenario() {
    let x = FeatureMatrix::from_rows(&[[0.0_f64, 0.0], [0.0, 1.0], [5.0, 5.0]]).unwrap();
    let y = [0, 0, 1];

    let d = compute_distance_matrix_loo(&x, DistanceMeasure::SquaredL2).unwrap();
    for i in 0..3 {
        assert!(d.get(i, i).is_infinite());
    }

    let rate = knn_errorrate_loo(&d, &y, 1).unwrap();
    assert_relative_eq!(rate, 1.0 / 3.0, epsilon = 1e-12);
}

/// Test the same scenario in single precision.
#[test]
fn test_loo_scenario_f32() {
    let x = FeatureMatrix::from_rows(&[[0.0_f64, 0.0], [0.0, 1.0], [5.0, 5.0]])
        .unwrap()
        .cast::<f32>()
        .unwrap();

    let d = compute_distance_matrix_loo(&x, DistanceMeasure::SquaredL2).unwrap();
    let rate = knn_errorrate_loo(&d, &[0, 0, 1], 1).unwrap();
    assert_relative_eq!(rate, 1.0 / 3.0, epsilon = 1e-12);
}

/// Test that classifying a set against itself with k = 1 is error free.
///
/// Paired matrices keep the zero self-distance, so every sample finds itself.
#[test]
fn test_paired_self_evaluation_k1() {
    let (x, y) = two_clusters();
    let y_flipped: Vec<u32> = vec![1, 0, 1, 0, 1, 0];

    let d = compute_distance_matrix(&x, &x, DistanceMeasure::SquaredL2).unwrap();

    assert_relative_eq!(knn_errorrate(&d, &y, &y, 1).unwrap(), 0.0);
    // Even arbitrary labels are reproduced through self-matches
    assert_relative_eq!(knn_errorrate(&d, &y_flipped, &y_flipped, 1).unwrap(), 0.0);
}

/// Test cosine leave-one-out on directional clusters.
#[test]
fn test_loo_cosine_error_rate() {
    let x = FeatureMatrix::from_rows(&[
        [1.0_f64, 0.1],
        [5.0, 0.4],
        [2.0, 0.1],
        [0.1, 1.0],
        [0.3, 4.0],
        [0.2, 2.5],
    ])
    .unwrap();
    let y = ["east", "east", "east", "north", "north", "north"];

    let d = compute_distance_matrix_loo(&x, DistanceMeasure::Cosine).unwrap();
    assert_relative_eq!(knn_errorrate_loo(&d, &y, 1).unwrap(), 0.0);
    assert_relative_eq!(knn_errorrate_loo(&d, &y, 2).unwrap(), 0.0);
}

/// Test that error rates stay in [0, 1].
#[test]
fn test_error_rate_bounds() {
    let (x, y) = two_clusters();
    let d = compute_distance_matrix_loo(&x, DistanceMeasure::SquaredL2).unwrap();

    for k in 1..=5 {
        let rate = knn_errorrate_loo(&d, &y, k).unwrap();
        assert!((0.0..=1.0).contains(&rate), "k={k} rate={rate}");
    }
}

// ============================================================================
// Neighbor Selection Tests
// ============================================================================

/// Test that the arg-min and k-smallest paths agree for k = 1.
#[test]
fn test_argmin_matches_general_path() {
    let rows: [&[f64]; 4] = [
        &[3.0, 1.0, 1.0, 2.0],
        &[0.5, 0.5, 0.5, 0.5],
        &[f64::INFINITY, 2.0, 7.0, 2.0],
        &[9.0, 8.0, 7.0, 6.0],
    ];

    let mut buffer = NeighborBuffer::with_capacity(4);
    for row in rows {
        let mut out = [usize::MAX];
        k_smallest(row, 1, &mut buffer, &mut out);
        assert_eq!(out[0], argmin(row), "row {row:?}");
    }
}

/// Test that equal distances resolve towards the lower column index.
#[test]
fn test_k_smallest_tie_order() {
    let row = [2.0, 1.0, 2.0, 1.0, 0.5];
    let mut buffer = NeighborBuffer::with_capacity(row.len());

    let mut out = [0; 3];
    k_smallest(&row, 3, &mut buffer, &mut out);
    assert_eq!(out, [4, 1, 3]);

    let mut out = [0; 5];
    k_smallest(&row, 5, &mut buffer, &mut out);
    assert_eq!(out, [4, 1, 3, 0, 2]);
}

/// Test that the leave-one-out diagonal is never selected.
#[test]
fn test_neighbor_pass_skips_diagonal() {
    let (x, _) = two_clusters();
    let d = compute_distance_matrix_loo(&x, DistanceMeasure::SquaredL2).unwrap();

    let k = 5;
    let mut table = vec![0; 6 * k];
    neighbor_pass(&d, k, &mut table);

    for (i, row) in table.chunks_exact(k).enumerate() {
        assert!(!row.contains(&i), "row {i} selected itself: {row:?}");
    }
}

/// Test that a wider table answers smaller k through its prefix.
#[test]
fn test_neighbor_table_prefix() {
    let (x, _) = two_clusters();
    let d = compute_distance_matrix_loo(&x, DistanceMeasure::SquaredL2).unwrap();

    let executor = KnnExecutor::new(DistanceMeasure::SquaredL2, 1);
    let wide = executor.neighbor_table(&d, 4);
    let narrow = executor.neighbor_table(&d, 2);

    assert_eq!(wide.stride(), 4);
    for i in 0..wide.rows() {
        assert_eq!(wide.nearest(i, 2), narrow.nearest(i, 2));
        assert_eq!(wide.nearest(i, 1)[0], argmin(d.row(i)));
    }
}

// ============================================================================
// Voting Tests
// ============================================================================

/// Test that the most frequent label wins.
#[test]
fn test_majority_vote() {
    let labels = [3, 1, 3, 2, 3];
    let mut votes: Vec<&i32> = labels.iter().collect();
    assert_eq!(majority_vote(&mut votes), Some(&3));

    let mut empty: Vec<&i32> = Vec::new();
    assert_eq!(majority_vote(&mut empty), None);
}

/// Test that the smallest label wins among tied counts.
#[test]
fn test_vote_tie_smallest_label() {
    let labels = [2, 1, 2, 1];
    let mut votes: Vec<&i32> = labels.iter().collect();
    assert_eq!(majority_vote(&mut votes), Some(&1));

    // Same rule through the full prediction path
    let d = DistanceMatrix::from_rows(&[[1.0_f64, 2.0, 3.0, 4.0]], DistanceLayout::Paired).unwrap();
    assert_eq!(predict_labels(&d, &[2, 1, 2, 1], 4).unwrap(), vec![1]);
    assert_eq!(predict_labels(&d, &[2, 1, 2, 1], 3).unwrap(), vec![2]);
}

/// Test the tie rule over a leave-one-out sweep of two clusters.
///
/// With k = 4 every sample sees two labels of each class, so class 0 wins
/// everywhere and half the samples are wrong.
#[test]
fn test_loo_tie_rule_on_clusters() {
    let (x, y) = two_clusters();
    let d = compute_distance_matrix_loo(&x, DistanceMeasure::SquaredL2).unwrap();

    assert_relative_eq!(knn_errorrate_loo(&d, &y, 1).unwrap(), 0.0);
    assert_relative_eq!(knn_errorrate_loo(&d, &y, 3).unwrap(), 0.0);
    assert_relative_eq!(knn_errorrate_loo(&d, &y, 4).unwrap(), 0.5);
    assert_relative_eq!(knn_errorrate_loo(&d, &y, 5).unwrap(), 1.0);
}

/// Test string labels.
#[test]
fn test_string_labels() {
    let d = DistanceMatrix::from_rows(&[[0.1_f64, 0.2, 0.3], [0.9, 0.1, 0.2]], DistanceLayout::Paired)
        .unwrap();
    let y_train = vec!["cat".to_string(), "dog".to_string(), "dog".to_string()];
    let y_test = vec!["cat".to_string(), "cat".to_string()];

    assert_eq!(
        predict_labels(&d, &y_train, 1).unwrap(),
        vec!["cat".to_string(), "dog".to_string()]
    );
    assert_relative_eq!(knn_errorrate(&d, &y_train, &y_test, 1).unwrap(), 0.5);
}

// ============================================================================
// Neighbor Sweep Tests
// ============================================================================

/// Test that sweep scores match individual evaluations.
#[test]
fn test_sweep_matches_individual_rates() {
    let (x, y) = two_clusters();
    let d = compute_distance_matrix_loo(&x, DistanceMeasure::SquaredL2).unwrap();

    let ks = [1, 2, 3, 4, 5];
    let executor = KnnExecutor::new(DistanceMeasure::SquaredL2, 1);
    let table = executor.neighbor_table(&d, 5);
    let scores = sweep(&table, &ks, &y, &y).unwrap();

    for (k, rate) in scores {
        assert_relative_eq!(rate, knn_errorrate_loo(&d, &y, k).unwrap());
    }
}

/// Test prediction and scoring from a hand-built neighbor table.
#[test]
fn test_predict_from_table() {
    let table = NeighborTable::new(vec![1, 0, 2, 2, 1, 0], 2, 3);
    let y_train = ["a", "b", "b"];

    let predicted = predict(&table, 3, &y_train).unwrap();
    assert_eq!(predicted, vec![&"b", &"b"]);

    let errors = ErrorRate::from_predictions(&predicted, &["a", "b"]);
    assert_eq!(errors.misclassified, 1);
    assert_eq!(errors.total, 2);
    assert_relative_eq!(errors.rate(), 0.5);
    assert_relative_eq!(ErrorRate::default().rate(), 0.0);
}

// ============================================================================
// Error Condition Tests
// ============================================================================

/// Test that k outside [1, N] is rejected for paired matrices.
#[test]
fn test_paired_invalid_k() {
    let d = DistanceMatrix::from_rows(&[[1.0_f64, 2.0], [3.0, 4.0]], DistanceLayout::Paired).unwrap();
    let y = [0, 1];

    assert_eq!(
        knn_errorrate(&d, &y, &y, 0).unwrap_err(),
        KnnError::InvalidK { k: 0, max: 2 }
    );
    assert_eq!(
        knn_errorrate(&d, &y, &y, 3).unwrap_err(),
        KnnError::InvalidK { k: 3, max: 2 }
    );
    assert!(knn_errorrate(&d, &y, &y, 2).is_ok());
}

/// Test that k outside [1, N] is rejected for leave-one-out matrices.
#[test]
fn test_loo_invalid_k() {
    let (x, y) = two_clusters();
    let d = compute_distance_matrix_loo(&x, DistanceMeasure::SquaredL2).unwrap();

    assert_eq!(
        knn_errorrate_loo(&d, &y, 7).unwrap_err(),
        KnnError::InvalidK { k: 7, max: 6 }
    );
    assert_eq!(
        knn_errorrate_loo(&d, &y, 0).unwrap_err(),
        KnnError::InvalidK { k: 0, max: 6 }
    );
}

/// Test that k = N is admissible for leave-one-out, with the sample ranked last.
#[test]
fn test_loo_k_equals_n() {
    let x = FeatureMatrix::from_rows(&[[0.0_f64, 0.0], [0.0, 1.0], [5.0, 5.0]]).unwrap();
    let d = compute_distance_matrix_loo(&x, DistanceMeasure::SquaredL2).unwrap();

    // Every row sees both other samples and then itself
    let rate = knn_errorrate_loo(&d, &[0, 0, 1], 3).unwrap();
    assert_relative_eq!(rate, 1.0 / 3.0, epsilon = 1e-12);

    let executor = KnnExecutor::<f64>::new(DistanceMeasure::SquaredL2, 3);
    let table = executor.neighbor_table(&d, 3);
    assert_eq!(table.nearest(2, 3), &[1, 0, 2]);

    // Three against three, the smaller label wins every vote
    let (x, y) = two_clusters();
    let d = compute_distance_matrix_loo(&x, DistanceMeasure::SquaredL2).unwrap();
    assert_relative_eq!(knn_errorrate_loo(&d, &y, 6).unwrap(), 0.5);
}

/// Test that label lengths must match the matrix.
#[test]
fn test_label_length_mismatch() {
    let d = DistanceMatrix::from_rows(&[[1.0_f64, 2.0], [3.0, 4.0]], DistanceLayout::Paired).unwrap();

    assert_eq!(
        knn_errorrate(&d, &[0, 1, 1], &[0, 1], 1).unwrap_err(),
        KnnError::ShapeMismatch {
            what: "training labels",
            expected: 2,
            got: 3
        }
    );
    assert_eq!(
        knn_errorrate(&d, &[0, 1], &[0], 1).unwrap_err(),
        KnnError::ShapeMismatch {
            what: "test labels",
            expected: 2,
            got: 1
        }
    );
}

/// Test that leave-one-out scoring requires a square matrix.
#[test]
fn test_loo_requires_square_matrix() {
    let d = DistanceMatrix::from_rows(&[[1.0_f64, 2.0, 3.0], [4.0, 5.0, 6.0]], DistanceLayout::Paired)
        .unwrap();

    assert_eq!(
        knn_errorrate_loo(&d, &[0, 1], 1).unwrap_err(),
        KnnError::ShapeMismatch {
            what: "leave-one-out matrix columns",
            expected: 2,
            got: 3
        }
    );
    assert!(
        DistanceMatrix::from_rows(&[[1.0_f64, 2.0, 3.0]], DistanceLayout::LeaveOneOut).is_err()
    );
}

/// Test that NaN distances are rejected.
#[test]
fn test_nan_distances() {
    let d = DistanceMatrix::from_rows(&[[1.0_f64, f64::NAN]], DistanceLayout::Paired).unwrap();
    assert!(matches!(
        knn_errorrate(&d, &[0, 1], &[0], 1),
        Err(KnnError::InvalidNumericValue(_))
    ));
}

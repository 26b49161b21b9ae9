#![cfg(feature = "dev")]
//! Tests for parallel/sequential agreement.
//!
//! The parallel passes compute every output row with the same kernels as the
//! sequential passes, so distance matrices, neighbor tables and error rates
//! must agree exactly.

use approx::assert_relative_eq;
use fastKnnerror::prelude::*;

use fastKnnerror::internals::engine::executor::build_executor;

/// Deterministic pseudo-random embeddings in three loose clusters.
fn clustered(n: usize, dim: usize) -> (Vec<Vec<f64>>, Vec<u8>) {
    let mut state: u64 = 0x2545_f491_4f6c_dd1d;
    let mut next = || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        (state % 10_000) as f64 / 10_000.0 - 0.5
    };

    let mut x = Vec::with_capacity(n);
    let mut y = Vec::with_capacity(n);
    for i in 0..n {
        let label = (i % 3) as u8;
        let row = (0..dim)
            .map(|j| if j % 3 == label as usize { 2.0 } else { 0.0 } + next())
            .collect();
        x.push(row);
        y.push(label);
    }
    (x, y)
}

#[test]
fn test_paired_distances_match() {
    let (train, _) = clustered(120, 16);
    let (test, _) = clustered(40, 16);
    let train = FeatureMatrix::from_rows(train.as_slice()).unwrap();
    let test = FeatureMatrix::from_rows(test.as_slice()).unwrap();

    let seq = build_executor::<f64>(SquaredL2, 1, false)
        .paired_distances(&train, &test)
        .unwrap();
    let par = build_executor::<f64>(SquaredL2, 1, true)
        .paired_distances(&train, &test)
        .unwrap();

    assert_eq!(seq, par);
}

#[test]
fn test_loo_distances_match() {
    let (x, _) = clustered(150, 12);
    let x = FeatureMatrix::from_rows(x.as_slice()).unwrap();

    for measure in [SquaredL2, Cosine] {
        let seq = build_executor::<f64>(measure, 1, false)
            .loo_distances(&x)
            .unwrap();
        let par = build_executor::<f64>(measure, 1, true)
            .loo_distances(&x)
            .unwrap();
        assert_eq!(seq, par, "measure={measure}");
    }
}

#[test]
fn test_neighbor_tables_match() {
    let (x, _) = clustered(90, 8);
    let d = compute_distance_matrix_loo(&x, SquaredL2).unwrap();

    for k in [1, 3, 10, 89] {
        let seq = build_executor::<f64>(SquaredL2, 1, false).neighbor_table(&d, k);
        let par = build_executor::<f64>(SquaredL2, 1, true).neighbor_table(&d, k);
        assert_eq!(seq, par, "k={k}");
    }
}

#[test]
fn test_loo_evaluation_matches() {
    let (x, y) = clustered(200, 9);

    for measure in [SquaredL2, Cosine] {
        let par = Knn::new()
            .neighbors(5)
            .measure(measure)
            .sweep(&[1, 3, 7, 15])
            .return_predictions()
            .adapter(LeaveOneOut)
            .build()
            .unwrap()
            .evaluate(&x, &y)
            .unwrap();

        let seq = Knn::new()
            .neighbors(5)
            .measure(measure)
            .sweep(&[1, 3, 7, 15])
            .return_predictions()
            .adapter(LeaveOneOut)
            .parallel(false)
            .build()
            .unwrap()
            .evaluate(&x, &y)
            .unwrap();

        assert_eq!(par.misclassified, seq.misclassified);
        assert_eq!(par.predictions, seq.predictions);
        assert_eq!(par.sweep_scores, seq.sweep_scores);
        assert_relative_eq!(par.error_rate, seq.error_rate);
    }
}

#[test]
fn test_paired_evaluation_matches() {
    let (train, y_train) = clustered(90, 6);
    let (test, y_test) = clustered(30, 6);

    let evaluate = |parallel: bool| {
        Knn::new()
            .neighbors(3)
            .adapter(Paired)
            .parallel(parallel)
            .build()
            .unwrap()
            .evaluate(&train, &y_train, &test, &y_test)
            .unwrap()
    };

    let (par, seq) = (evaluate(true), evaluate(false));
    assert_eq!(par.misclassified, seq.misclassified);
    assert_relative_eq!(par.error_rate, seq.error_rate);
}

#[test]
fn test_free_functions_match_core() {
    let (x, y) = clustered(60, 5);
    let fx = FeatureMatrix::from_rows(x.as_slice()).unwrap();

    let d_par = compute_distance_matrix_loo(&x, SquaredL2).unwrap();
    let d_seq = knnerror::prelude::compute_distance_matrix_loo(&fx, SquaredL2).unwrap();
    assert_eq!(d_par, d_seq);

    for k in [1, 4, 9] {
        assert_relative_eq!(
            knn_errorrate_loo(&d_par, &y, k).unwrap(),
            knnerror::prelude::knn_errorrate_loo(&d_seq, &y, k).unwrap()
        );
    }
}

#![cfg(feature = "dev")]
//! Tests for the prelude module.
//!
//! These tests verify that the prelude exports all necessary types and
//! functions for convenient usage of the KNN evaluation API. The prelude
//! should provide a one-stop import for common functionality.
//!
//! ## Test Organization
//!
//! 1. **Import Verification** - All prelude exports are accessible
//! 2. **Type Usage** - Types can be used without qualification
//! 3. **Builder Pattern** - Complete workflows work with prelude imports

use knnerror::prelude::*;

// ============================================================================
// Import Verification Tests
// ============================================================================

/// Test that all prelude imports work correctly.
///
/// Verifies that the builder and both adapters are usable.
#[test]
fn test_prelude_imports() {
    let x = FeatureMatrix::from_rows(&[[0.0_f64, 0.0], [0.0, 1.0], [5.0, 5.0]]).unwrap();
    let y = [0, 0, 1];

    let loo = Knn::new().adapter(LeaveOneOut).build().unwrap().evaluate(&x, &y);
    assert!(loo.is_ok(), "Leave-one-out should work with prelude imports");

    let paired = Knn::new()
        .adapter(Paired)
        .build()
        .unwrap()
        .evaluate(&x, &y, &x, &y);
    assert!(paired.is_ok(), "Paired should work with prelude imports");
}

/// Test DistanceMeasure variants are available.
#[test]
fn test_prelude_measures() {
    let _ = Knn::<f64>::new().measure(SquaredL2);
    let _ = Knn::<f64>::new().measure(Cosine);
    assert_eq!(DistanceMeasure::default(), SquaredL2);
}

/// Test free functions are available.
#[test]
fn test_prelude_free_functions() {
    let x = FeatureMatrix::from_rows(&[[0.0_f64, 0.0], [0.0, 1.0], [5.0, 5.0]]).unwrap();
    let y = [0, 0, 1];

    let d = compute_distance_matrix(&x, &x, SquaredL2).unwrap();
    assert_eq!(d.layout(), DistanceLayout::Paired);
    assert!(knn_errorrate(&d, &y, &y, 1).is_ok());
    assert_eq!(predict_labels(&d, &y, 1).unwrap(), vec![0, 0, 1]);

    let d = compute_distance_matrix_loo(&x, SquaredL2).unwrap();
    assert!(knn_errorrate_loo(&d, &y, 1).is_ok());
}

// ============================================================================
// Type Usage Tests
// ============================================================================

/// Test result and error types are nameable.
#[test]
fn test_prelude_result_types() {
    let x = FeatureMatrix::from_rows(&[[1.0_f64, 0.0], [0.0, 1.0]]).unwrap();

    let result: Result<KnnResult<f64, u8>, KnnError> = Knn::new()
        .adapter(LeaveOneOut)
        .build()
        .unwrap()
        .evaluate(&x, &[0, 1]);

    let result = result.unwrap();
    assert_eq!(result.layout, DistanceLayout::LeaveOneOut);
    assert_eq!(result.error_rate, 1.0);
}

/// Test source types are available.
#[test]
fn test_prelude_source_types() {
    let data = LabeledSamples::new(vec![0.0_f64, 1.0, 9.0], vec![0, 0, 1]).unwrap();
    let source = InMemorySource::new().with_split("toy", "test", data);

    let loaded = source.load("toy", "test", None).unwrap();
    let embed = |batch: &[f64]| -> Result<FeatureMatrix<f64>, KnnError> {
        let rows: Vec<[f64; 1]> = batch.iter().map(|&v| [v]).collect();
        FeatureMatrix::from_rows(&rows)
    };
    let (x, y) = embed_samples(loaded, &embed).unwrap();

    assert_eq!(x.nrows(), y.len());
}

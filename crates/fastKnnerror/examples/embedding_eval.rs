//! Embedding Quality Evaluation Example
//!
//! This example walks through a small end-to-end evaluation:
//! - Loading labeled samples from an in-memory source
//! - Embedding them with a closure
//! - Leave-one-out error rates for both distance measures
//! - A neighbor-count sweep from a single distance matrix
//! - Train/test evaluation with ndarray inputs
//!
//! Run with `RUST_LOG=debug` to see the engine's tracing events.

use fastKnnerror::prelude::*;
use ndarray::Array2;
use tracing_subscriber::EnvFilter;

/// Three "topics", each a band of scalar inputs.
fn topic_data(n_per_topic: usize, offset: f64) -> LabeledSamples<f64, &'static str> {
    let topics = ["sports", "finance", "science"];
    let mut samples = Vec::new();
    let mut labels = Vec::new();
    for (t, &name) in topics.iter().enumerate() {
        for i in 0..n_per_topic {
            samples.push(t as f64 * 3.0 + (i as f64 + offset) / n_per_topic as f64);
            labels.push(name);
        }
    }
    // Lengths match by construction
    LabeledSamples { samples, labels }
}

/// A toy embedding model: a fixed nonlinear feature map.
fn embed(batch: &[f64]) -> Result<FeatureMatrix<f64>, KnnError> {
    let rows: Vec<[f64; 4]> = batch
        .iter()
        .map(|&v| [v.cos(), v.sin(), (0.5 * v).cos(), 1.0 + 0.1 * v])
        .collect();
    FeatureMatrix::from_rows(&rows)
}

fn main() -> Result<(), KnnError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("{}", "=".repeat(80));
    println!("KNN Error Rate - Embedding Evaluation");
    println!("{}", "=".repeat(80));
    println!();

    let source = InMemorySource::new()
        .with_split("topics", "train", topic_data(40, 0.0))
        .with_split("topics", "test", topic_data(15, 0.5));

    example_1_leave_one_out(&source)?;
    example_2_sweep(&source)?;
    example_3_paired_ndarray(&source)?;

    Ok(())
}

/// Example 1: Leave-one-out error rate for both measures
fn example_1_leave_one_out(source: &InMemorySource<f64, &'static str>) -> Result<(), KnnError> {
    println!("Example 1: Leave-One-Out");
    println!("{}", "-".repeat(80));

    let (x, y) = embed_samples(source.load("topics", "train", None)?, &embed)?;

    for measure in [SquaredL2, Cosine] {
        let result = Knn::new()
            .neighbors(5)
            .measure(measure)
            .adapter(LeaveOneOut)
            .build()?
            .evaluate(&x, &y)?;
        println!("{}", result);
    }

    Ok(())
}

/// Example 2: Scoring several neighbor counts from one distance matrix
fn example_2_sweep(source: &InMemorySource<f64, &'static str>) -> Result<(), KnnError> {
    println!("Example 2: Neighbor Sweep");
    println!("{}", "-".repeat(80));

    // Only the first 60 samples
    let (x, y) = embed_samples(source.load("topics", "train", Some(60))?, &embed)?;

    let result = Knn::new()
        .neighbors(1)
        .sweep(&[1, 3, 5, 9, 15])
        .adapter(LeaveOneOut)
        .build()?
        .evaluate(&x, &y)?;

    for (k, rate) in result.sweep_scores.iter().flatten() {
        println!("k = {:>2}  error rate = {:.4}", k, rate);
    }
    if let Some((k, rate)) = result.best_sweep() {
        println!("Best: k = {} ({:.4})", k, rate);
    }
    println!();

    Ok(())
}

/// Example 3: Train/test evaluation with ndarray embeddings
fn example_3_paired_ndarray(source: &InMemorySource<f64, &'static str>) -> Result<(), KnnError> {
    println!("Example 3: Paired Train/Test (ndarray)");
    println!("{}", "-".repeat(80));

    let (train, y_train) = embed_samples(source.load("topics", "train", None)?, &embed)?;
    let (test, y_test) = embed_samples(source.load("topics", "test", None)?, &embed)?;

    let train = Array2::from_shape_vec((train.nrows(), train.ncols()), train.as_slice().to_vec())
        .map_err(|e| KnnError::InvalidInput(e.to_string()))?;
    let test = Array2::from_shape_vec((test.nrows(), test.ncols()), test.as_slice().to_vec())
        .map_err(|e| KnnError::InvalidInput(e.to_string()))?;

    let d = compute_distance_matrix(&train, &test, SquaredL2)?;
    for k in [1, 3, 7] {
        let rate = knn_errorrate(&d, &y_train, &y_test, k)?;
        println!("k = {}  error rate = {:.4}", k, rate);
    }

    let predicted = predict_labels(&d, &y_train, 3)?;
    println!("First test predictions: {:?}", &predicted[..5]);
    println!();

    Ok(())
}

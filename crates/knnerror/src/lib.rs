//! # knnerror — KNN error-rate evaluation of embeddings for Rust
//!
//! Measures how well an embedding separates classes by the error of a
//! k-nearest-neighbor classifier built on top of it. Two modes are provided:
//! paired (train/test) evaluation and leave-one-out evaluation on a single
//! sample set.
//!
//! ## What is the KNN error rate?
//!
//! Every evaluated sample is assigned the majority label among its k closest
//! reference samples. The error rate is the fraction of samples whose
//! majority label differs from their true label. Distances are squared
//! Euclidean (or cosine, in leave-one-out mode) and are computed with one
//! matrix product plus two vectors of squared norms:
//!
//! ```text
//! d(i, j) = ||a_i||^2 - 2 * a_i . b_j + ||b_j||^2
//! ```
//!
//! ## Quick Start
//!
//! ### Typical Use
//!
//! ```rust
//! use knnerror::prelude::*;
//!
//! let train = FeatureMatrix::from_rows(&[[0.0_f64, 0.0], [10.0, 10.0]])?;
//! let test = FeatureMatrix::from_rows(&[[0.0_f64, 1.0], [9.0, 9.0]])?;
//!
//! // Build the evaluator
//! let model = Knn::new()
//!     .neighbors(1)       // nearest neighbor
//!     .adapter(Paired)
//!     .build()?;
//!
//! // Classify the test set against the training set
//! let result = model.evaluate(&train, &[0, 1], &test, &[0, 1])?;
//!
//! assert_eq!(result.error_rate, 0.0);
//! println!("{}", result);
//! # Result::<(), KnnError>::Ok(())
//! ```
//!
//! ```text
//! Summary:
//!   Mode:          paired
//!   Measure:       squared_l2
//!   Neighbors (k): 1
//!   Samples:       2
//!   References:    2
//!   Misclassified: 0
//!   Error rate:    0.000000
//! ```
//!
//! ### Full Features
//!
//! ```rust
//! use knnerror::prelude::*;
//!
//! let x = FeatureMatrix::from_rows(&[
//!     [1.0_f64, 0.1],
//!     [0.9, 0.2],
//!     [0.1, 1.0],
//!     [0.2, 0.8],
//!     [0.7, 0.7],
//! ])?;
//! let y = ["a", "a", "b", "b", "b"];
//!
//! let model = Knn::new()
//!     .neighbors(3)            // majority of the 3 nearest other samples
//!     .measure(Cosine)         // cosine distance
//!     .sweep(&[1, 2, 3, 4])    // score several k from one distance matrix
//!     .return_predictions()    // include predicted labels
//!     .return_distances()      // include the distance matrix
//!     .adapter(LeaveOneOut)
//!     .build()?;
//!
//! let result = model.evaluate(&x, &y)?;
//! println!("{}", result);
//! # Result::<(), KnnError>::Ok(())
//! ```
//!
//! ### Matrix-Level Functions
//!
//! The four core operations are also available as free functions:
//!
//! ```rust
//! use knnerror::prelude::*;
//!
//! let x = FeatureMatrix::from_rows(&[[0.0_f64, 0.0], [0.0, 1.0], [5.0, 5.0]])?;
//! let d = compute_distance_matrix_loo(&x, SquaredL2)?;
//!
//! assert!(d.get(0, 0).is_infinite());
//! let rate = knn_errorrate_loo(&d, &[0, 0, 1], 1)?;
//! assert!((rate - 1.0 / 3.0).abs() < 1e-12);
//! # Result::<(), KnnError>::Ok(())
//! ```
//!
//! ### Result and Error Handling
//!
//! Every entry point returns `Result<_, KnnError>`. Unsupported measures,
//! out-of-range neighbor counts, zero-norm rows under cosine distance and
//! shape mismatches are all reported before any computation starts:
//!
//! ```rust
//! use knnerror::prelude::*;
//!
//! let err = "manhattan".parse::<DistanceMeasure>().unwrap_err();
//! assert_eq!(err, KnnError::UnsupportedMeasure("manhattan".into()));
//!
//! let x = FeatureMatrix::from_rows(&[[0.0_f64, 0.0], [1.0, 1.0]])?;
//! let d = compute_distance_matrix_loo(&x, SquaredL2)?;
//! assert!(matches!(
//!     knn_errorrate_loo(&d, &[0, 1], 3),
//!     Err(KnnError::InvalidK { k: 3, max: 2 })
//! ));
//! # Result::<(), KnnError>::Ok(())
//! ```
//!
//! ## Precision
//!
//! Evaluation is generic over `f32` and `f64`. To reproduce a
//! single-precision pipeline, cast the embeddings first:
//!
//! ```rust
//! use knnerror::prelude::*;
//!
//! let x64 = FeatureMatrix::from_rows(&[[0.5_f64, 1.5], [2.5, 3.5]])?;
//! let x32: FeatureMatrix<f32> = x64.cast()?;
//! assert_eq!(x32.row(1), &[2.5_f32, 3.5]);
//! # Result::<(), KnnError>::Ok(())
//! ```
//!
//! ## Minimal Usage (no_std / Embedded)
//!
//! The crate supports `no_std` environments with an allocator. Disable
//! default features to remove the standard library dependency:
//!
//! ```toml
//! [dependencies]
//! knnerror = { version = "0.3", default-features = false }
//! ```
//!
//! ## Logging
//!
//! Distance computation and evaluation emit `tracing` events at debug level
//! (sweep entries at trace level). No subscriber is installed by this crate.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
#[macro_use]
extern crate alloc;

// Layer 1: Primitives - data structures and basic utilities.
mod primitives;

// Layer 2: Math - distance measures and kernels.
mod math;

// Layer 3: Algorithms - neighbor selection and voting.
mod algorithms;

// Layer 4: Evaluation - error-rate estimation.
mod evaluation;

// Layer 5: Engine - orchestration and execution control.
mod engine;

// Layer 6: Adapters - execution mode adapters and data sources.
mod adapters;

// High-level fluent API for KNN evaluation.
mod api;

// Standard KNN evaluation prelude.
pub mod prelude {
    pub use crate::api::{
        Adapter::{LeaveOneOut, Paired},
        DistanceMatrix,
        DistanceMeasure,
        DistanceMeasure::Cosine,
        DistanceMeasure::SquaredL2,
        Embedder, FeatureMatrix, InMemorySource, KnnBuilder as Knn, KnnError, KnnResult,
        LabeledSamples, SampleSource, compute_distance_matrix, compute_distance_matrix_loo,
        embed_samples, knn_errorrate, knn_errorrate_loo, predict_labels,
    };
    pub use crate::primitives::matrix::DistanceLayout;
}

// Internal modules for development and testing.
//
// This module re-exports internal modules for development and testing purposes.
// It is only available with the `dev` feature enabled.
#[cfg(feature = "dev")]
pub mod internals {
    pub mod primitives {
        pub use crate::primitives::*;
    }
    pub mod math {
        pub use crate::math::*;
    }
    pub mod algorithms {
        pub use crate::algorithms::*;
    }
    pub mod engine {
        pub use crate::engine::*;
    }
    pub mod evaluation {
        pub use crate::evaluation::*;
    }
    pub mod adapters {
        pub use crate::adapters::*;
    }
    pub mod api {
        pub use crate::api::*;
    }
}

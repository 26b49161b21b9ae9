//! # fastKnnerror — parallel KNN error-rate evaluation of embeddings
//!
//! A parallel extension of the [`knnerror`] crate. It keeps the same fluent
//! builder, the same validation and the same results, and adds:
//!
//! - **Parallel execution** of the distance (Gram) pass and of the
//!   neighbor-selection pass with `rayon` (feature `cpu`, on by default).
//! - **ndarray integration**: embeddings as `Array2`, labels as `Array1`,
//!   distance matrices back as `Array2`.
//!
//! ## Quick Start
//!
//! ### Typical Use
//!
//! ```rust
//! use fastKnnerror::prelude::*;
//!
//! let x = vec![
//!     vec![0.0, 0.0],
//!     vec![0.0, 1.0],
//!     vec![5.0, 5.0],
//! ];
//! let y = vec![0, 0, 1];
//!
//! // Build the evaluator (parallel by default)
//! let model = Knn::new()
//!     .neighbors(1)
//!     .adapter(LeaveOneOut)
//!     .build()?;
//!
//! let result = model.evaluate(&x, &y)?;
//!
//! assert_eq!(result.misclassified, 1);
//! println!("{}", result);
//! # Result::<(), KnnError>::Ok(())
//! ```
//!
//! ### Sequential Fallback
//!
//! Parallel execution can be disabled per evaluator; results are identical:
//!
//! ```rust
//! use fastKnnerror::prelude::*;
//! # let x = vec![vec![0.0, 0.0], vec![0.0, 1.0], vec![5.0, 5.0]];
//! # let y = vec![0, 0, 1];
//!
//! let sequential = Knn::new()
//!     .adapter(LeaveOneOut)
//!     .parallel(false)
//!     .build()?
//!     .evaluate(&x, &y)?;
//!
//! let parallel = Knn::new()
//!     .adapter(LeaveOneOut)
//!     .build()?
//!     .evaluate(&x, &y)?;
//!
//! assert_eq!(sequential.error_rate, parallel.error_rate);
//! # Result::<(), KnnError>::Ok(())
//! ```
//!
//! ### ndarray Integration
//!
//! ```rust
//! use fastKnnerror::prelude::*;
//! use ndarray::{Array1, array};
//!
//! let train = array![[0.0_f64, 0.0], [10.0, 10.0]];
//! let test = array![[0.0, 1.0], [9.0, 9.0]];
//! let y_train = Array1::from_vec(vec![0, 1]);
//! let y_test = Array1::from_vec(vec![0, 1]);
//!
//! let model = Knn::new().adapter(Paired).build()?;
//! let result = model.evaluate(&train, &y_train, &test, &y_test)?;
//! assert_eq!(result.error_rate, 0.0);
//!
//! // Distance matrices convert back to Array2
//! let d = compute_distance_matrix(&train, &test, SquaredL2)?.into_array2()?;
//! assert_eq!(d[[0, 1]], 181.0);
//! # Result::<(), KnnError>::Ok(())
//! ```
//!
//! ## Logging
//!
//! Events are emitted through `tracing` by the core crate. Install any
//! subscriber (for example `tracing-subscriber`'s fmt layer) to see them.

#![allow(non_snake_case)]

// Layer 5: Engine - parallel execution passes.
mod engine;

// Layer 6: Adapters - execution mode adapters.
mod adapters;

// High-level fluent API for parallel KNN evaluation.
mod api;

// Input data handling.
mod input;

// Standard fastKnnerror prelude.
pub mod prelude {
    pub use crate::api::{
        Adapter::{LeaveOneOut, Paired},
        DistanceMatrix,
        DistanceMeasure,
        DistanceMeasure::{Cosine, SquaredL2},
        Embedder, FeatureMatrix, InMemorySource, IntoArray2, KnnBuilder as Knn, KnnError,
        KnnResult, LabeledSamples, SampleSource, compute_distance_matrix,
        compute_distance_matrix_loo, embed_samples, knn_errorrate, knn_errorrate_loo,
        predict_labels,
    };
}

// Internal modules for development and testing.
//
// This module re-exports internal modules for development and testing purposes.
// It is only available with the `dev` feature enabled.
#[cfg(feature = "dev")]
pub mod internals {
    pub mod engine {
        pub use crate::engine::*;
    }
    pub mod adapters {
        pub use crate::adapters::*;
    }
    pub mod api {
        pub use crate::api::*;
    }
    pub mod input {
        pub use crate::input::*;
    }
}

//! Layer 6: Adapters
//!
//! This layer provides user-facing APIs that adapt the engine layer for the
//! two evaluation modes:
//!
//! - **Paired**: Test samples classified against a training set
//! - **LeaveOneOut**: Each sample classified against all other samples

// Paired (train/test) KNN evaluation.
pub mod paired;

// Leave-one-out KNN evaluation.
pub mod loo;

//! Layer 2: Math
//!
//! # Purpose
//!
//! This layer provides pure mathematical functions used throughout the crate:
//! - Distance measures
//! - Dot products, squared norms and the Gram pass
//! - Norm expansion of Gram rows into distances
//!
//! These are reusable mathematical building blocks with no KNN-specific logic.
//!
//! # Architecture
//!
//! ```text
//! Layer 7: API
//!   ↓
//! Layer 6: Adapters
//!   ↓
//! Layer 5: Engine
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// Distance measures and norm-expansion kernels.
pub mod distance;

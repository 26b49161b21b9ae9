//! Layer 5: Engine
//!
//! # Purpose
//!
//! This layer orchestrates an evaluation by coordinating between primitives
//! (matrices, errors), math (distance kernels), algorithms (selection, vote)
//! and evaluation (error rates). It owns validation and the result type.
//!
//! # Architecture
//!
//! ```text
//! Layer 7: API
//!   ↓
//! Layer 6: Adapters
//!   ↓
//! Layer 5: Engine ← You are here
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Unified execution engine for distance computation and KNN evaluation.
pub mod executor;

/// Validation utilities.
pub mod validator;

/// Output types for KNN evaluation.
pub mod output;

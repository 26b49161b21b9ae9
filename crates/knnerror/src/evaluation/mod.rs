//! Layer 4: Evaluation
//!
//! # Purpose
//!
//! This layer turns neighbor tables into predictions and misclassification
//! rates:
//! - Majority-vote predictions per query row
//! - Error rate against the true labels
//! - Neighbor-count sweeps sharing a single neighbor table
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
//! Layer 4: Evaluation ← You are here
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// KNN error-rate estimation from neighbor tables.
pub mod error_rate;

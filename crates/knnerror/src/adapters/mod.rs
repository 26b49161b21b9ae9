//! Layer 6: Adapters
//!
//! # Purpose
//!
//! This layer provides user-facing APIs that adapt the engine layer for the
//! two evaluation modes, plus the boundary to external data:
//!
//! - **Paired**: Test samples classified against a separate training set
//! - **LeaveOneOut**: Each sample classified against all other samples
//! - **Source**: Sample-source and embedder interfaces
//!
//! # Architecture
//!
//! ```text
//! Layer 7: API
//!   ↓
//! Layer 6: Adapters ← You are here
//!   ↓
//! Layer 5: Engine
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Paired (train/test) evaluation.
pub mod paired;

/// Leave-one-out evaluation.
pub mod loo;

/// Sample sources and embedders.
pub mod source;

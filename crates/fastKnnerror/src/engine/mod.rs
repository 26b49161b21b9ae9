//! Layer 5: Engine
//!
//! This layer provides the parallel execution passes for KNN evaluation.
//! It handles the distribution of distance and neighbor work across CPU cores.

// Parallel execution passes using CPU threads
pub mod executor;

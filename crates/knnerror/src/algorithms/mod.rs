//! Layer 3: Algorithms
//!
//! This layer implements the core logic of nearest-neighbor classification:
//! picking the closest columns of each distance row and voting on their
//! labels. It is orchestrated by the evaluation and engine layers.

// Arg-min and k-smallest selection over distance rows.
pub mod selection;

// Majority vote over neighbor labels.
pub mod vote;

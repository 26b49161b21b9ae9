//! Error types for KNN evaluation.
//!
//! ## Purpose
//!
//! This module defines the error conditions that can occur while building
//! distance matrices and estimating KNN error rates, including input
//! validation, unsupported measures and builder misconfiguration.
//!
//! ## Design notes
//!
//! * **Contextual**: Errors carry the offending values (e.g. expected vs. actual shapes).
//! * **Deferred**: Builder errors are stored and surfaced by `build()`.
//! * **No-std**: Supports `no_std` environments by using `alloc` for dynamic messages.
//! * **Trait Implementation**: Implements `Display` and `std::error::Error` (when `std` is enabled).
//!
//! ## Key concepts
//!
//! 1. **Input validation**: Empty matrices, ragged rows, label/row misalignment, non-finite values.
//! 2. **Parameter validation**: Neighbor count outside `[1, N]`, unknown distance measures.
//! 3. **Numeric guards**: Zero-norm rows under the cosine measure.
//!
//! ## Invariants
//!
//! * All variants provide sufficient context for diagnosis.
//! * Nothing is retried; every error reaches the caller unchanged.
//!
//! ## Non-goals
//!
//! * This module does not perform the validation logic itself.
//! * This module does not provide error recovery or fallback strategies.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::string::String;
#[cfg(feature = "std")]
use std::error::Error;
#[cfg(feature = "std")]
use std::string::String;

// External dependencies
use core::fmt::{Display, Formatter, Result};

// ============================================================================
// Error Type
// ============================================================================

/// Error type for KNN evaluation operations.
#[derive(Debug, Clone, PartialEq)]
pub enum KnnError {
    /// A feature matrix, label vector or distance matrix has no rows.
    EmptyInput,

    /// Generic invalid input error with a descriptive message.
    InvalidInput(String),

    /// The requested distance measure is not implemented for this operation.
    UnsupportedMeasure(String),

    /// Neighbor count must lie in `[1, max]`.
    ///
    /// `max == usize::MAX` when the bound is not known yet (builder time).
    InvalidK {
        /// The neighbor count provided.
        k: usize,
        /// Largest admissible neighbor count for the input.
        max: usize,
    },

    /// A row has zero norm, so its cosine distance is undefined.
    DegenerateVector {
        /// Index of the zero-norm row.
        row: usize,
    },

    /// Dimensions of paired inputs do not line up.
    ShapeMismatch {
        /// Which quantity disagrees (e.g. "feature dimension", "test labels").
        what: &'static str,
        /// Expected size.
        expected: usize,
        /// Size that was provided.
        got: usize,
    },

    /// Input data contains NaN or infinite values.
    InvalidNumericValue(String),

    /// Parameter was set multiple times in the builder.
    DuplicateParameter {
        /// Name of the parameter that was set multiple times.
        parameter: &'static str,
    },
}

// ============================================================================
// Display Implementation
// ============================================================================

impl Display for KnnError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::EmptyInput => write!(f, "Input is empty"),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Self::UnsupportedMeasure(name) => {
                write!(f, "Method '{name}' is not implemented")
            }
            Self::InvalidK { k, max } if *max == usize::MAX => {
                write!(f, "Invalid k: {k} (must be at least 1)")
            }
            Self::InvalidK { k, max } => {
                write!(f, "Invalid k: {k} (must be between 1 and {max})")
            }
            Self::DegenerateVector { row } => {
                write!(
                    f,
                    "Row {row} has zero norm; cosine distance is undefined"
                )
            }
            Self::ShapeMismatch {
                what,
                expected,
                got,
            } => {
                write!(f, "Shape mismatch in {what}: expected {expected}, got {got}")
            }
            Self::InvalidNumericValue(s) => write!(f, "Invalid numeric value: {s}"),
            Self::DuplicateParameter { parameter } => {
                write!(
                    f,
                    "Parameter '{parameter}' was set multiple times. Each parameter can only be configured once."
                )
            }
        }
    }
}

// ============================================================================
// Standard Error Trait
// ============================================================================

#[cfg(feature = "std")]
impl Error for KnnError {}

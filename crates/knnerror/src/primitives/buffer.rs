//! Scratch buffers for neighbor selection.
//!
//! ## Purpose
//!
//! This module provides reusable workspaces that avoid a fresh allocation
//! for every row of a distance matrix during neighbor selection.
//!
//! ## Design notes
//!
//! * **Explicit ownership**: Buffers are passed in by the caller so that a
//!   parallel executor can keep exactly one buffer per worker thread.
//! * **Lazy Expansion**: Buffers grow on demand but never shrink.
//!
//! ## Key concepts
//!
//! * **Slot**: A reusable vector wrapper with automatic capacity management.
//! * **NeighborBuffer**: (distance, column) candidates for one row.
//!
//! ## Invariants
//!
//! * Buffers are only logically cleared (`clear()`), never deallocated, between rows.
//!
//! ## Non-goals
//!
//! * Thread-local automatic caching.
//! * Dynamic shrinking or memory reclamation.

// Feature-gated dependencies
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::ops::{Deref, DerefMut};

// ============================================================================
// Slot - Unified Vector Abstraction
// ============================================================================

/// A reusable vector slot with automatic capacity management.
#[derive(Debug, Clone)]
pub struct Slot<T>(Vec<T>);

impl<T> Slot<T> {
    /// Create a new slot with the given initial capacity.
    #[inline]
    pub fn new(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    /// Clear the slot (sets length to 0, preserves capacity).
    #[inline]
    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T> Deref for Slot<T> {
    type Target = Vec<T>;
    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> DerefMut for Slot<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

// ============================================================================
// Neighbor Buffers
// ============================================================================

/// Working memory for selecting the k nearest columns of one row.
#[derive(Debug, Clone)]
pub struct NeighborBuffer<T> {
    /// (distance, column index) pairs for the current row.
    pub candidates: Slot<(T, usize)>,
}

impl<T> NeighborBuffer<T> {
    /// Create a buffer sized for rows of `ncols` entries.
    pub fn with_capacity(ncols: usize) -> Self {
        Self {
            candidates: Slot::new(ncols),
        }
    }
}

impl<T> Default for NeighborBuffer<T> {
    fn default() -> Self {
        Self {
            candidates: Slot::default(),
        }
    }
}

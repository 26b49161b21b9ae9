//! Dense row-major matrices for features and distances.
//!
//! ## Purpose
//!
//! This module provides the two array types that flow through the crate:
//! [`FeatureMatrix`] holds one embedding per row, and [`DistanceMatrix`]
//! holds pairwise distances between two row sets.
//!
//! ## Design notes
//!
//! * **Row-major**: `data[i * ncols + j]` is row `i`, column `j`.
//! * **Checked construction**: Ragged rows and wrongly sized buffers are rejected.
//! * **Generics**: Both types are generic over `Float`.
//!
//! ## Key concepts
//!
//! * **Layout tag**: A distance matrix records whether it is a paired
//!   (test x train) matrix or a leave-one-out (self x self) matrix.
//! * **Precision cast**: `FeatureMatrix::cast` converts between float types so
//!   callers can reproduce a single-precision pipeline from `f64` data.
//!
//! ## Invariants
//!
//! * `data.len() == nrows * ncols` at all times.
//! * Matrices are never mutated after construction through the public API.
//!
//! ## Non-goals
//!
//! * This module does not implement linear algebra (see `math::distance`).
//! * This module does not validate numeric finiteness (see `engine::validator`).

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::{format, vec::Vec};

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::KnnError;

// ============================================================================
// Feature Matrix
// ============================================================================

/// An (N, D) matrix of embeddings, one sample per row.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix<T> {
    data: Vec<T>,
    nrows: usize,
    ncols: usize,
}

impl<T: Float> FeatureMatrix<T> {
    /// Build a matrix from a slice of rows.
    ///
    /// Every row must have the length of the first one.
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> Result<Self, KnnError> {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, |r| r.as_ref().len());

        let mut data = Vec::with_capacity(nrows * ncols);
        for row in rows {
            let row = row.as_ref();
            if row.len() != ncols {
                return Err(KnnError::ShapeMismatch {
                    what: "feature dimension",
                    expected: ncols,
                    got: row.len(),
                });
            }
            data.extend_from_slice(row);
        }

        Ok(Self { data, nrows, ncols })
    }

    /// Build a matrix from a flat row-major buffer.
    pub fn from_flat(data: Vec<T>, nrows: usize, ncols: usize) -> Result<Self, KnnError> {
        check_flat_len(data.len(), nrows, ncols)?;
        Ok(Self { data, nrows, ncols })
    }

    /// Convert every element to another float type.
    pub fn cast<U: Float>(&self) -> Result<FeatureMatrix<U>, KnnError> {
        let data = self
            .data
            .iter()
            .enumerate()
            .map(|(idx, &v)| {
                U::from(v).ok_or_else(|| {
                    KnnError::InvalidNumericValue(format!(
                        "x[{}][{}] is not representable in the target precision",
                        idx / self.ncols.max(1),
                        idx % self.ncols.max(1)
                    ))
                })
            })
            .collect::<Result<Vec<U>, KnnError>>()?;

        Ok(FeatureMatrix {
            data,
            nrows: self.nrows,
            ncols: self.ncols,
        })
    }
}

impl<T> FeatureMatrix<T> {
    /// Number of samples.
    #[inline]
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Embedding dimension.
    #[inline]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Whether the matrix has no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nrows == 0
    }

    /// Borrow row `i`.
    #[inline]
    pub fn row(&self, i: usize) -> &[T] {
        let start = i * self.ncols;
        &self.data[start..start + self.ncols]
    }

    /// Iterate over rows in order.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        (0..self.nrows).map(move |i| self.row(i))
    }

    /// Flat row-major view of the data.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}

// ============================================================================
// Distance Matrix
// ============================================================================

/// How the rows and columns of a [`DistanceMatrix`] relate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistanceLayout {
    /// Rows are test samples, columns are training samples.
    #[default]
    Paired,

    /// Rows and columns are the same samples; the diagonal is +infinity.
    LeaveOneOut,
}

/// A dense (rows, cols) matrix of non-negative distances.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix<T> {
    data: Vec<T>,
    nrows: usize,
    ncols: usize,
    layout: DistanceLayout,
}

/// A flat buffer must hold exactly `nrows * ncols` elements.
fn check_flat_len(len: usize, nrows: usize, ncols: usize) -> Result<(), KnnError> {
    let Some(expected) = nrows.checked_mul(ncols) else {
        return Err(KnnError::ShapeMismatch {
            what: "flat buffer length (shape overflows usize)",
            expected: usize::MAX,
            got: len,
        });
    };
    if len != expected {
        return Err(KnnError::ShapeMismatch {
            what: "flat buffer length",
            expected,
            got: len,
        });
    }
    Ok(())
}

impl<T: Float> DistanceMatrix<T> {
    /// Wrap a flat row-major buffer.
    pub fn from_flat(
        data: Vec<T>,
        nrows: usize,
        ncols: usize,
        layout: DistanceLayout,
    ) -> Result<Self, KnnError> {
        check_flat_len(data.len(), nrows, ncols)?;
        if layout == DistanceLayout::LeaveOneOut && nrows != ncols {
            return Err(KnnError::ShapeMismatch {
                what: "leave-one-out matrix columns",
                expected: nrows,
                got: ncols,
            });
        }
        Ok(Self {
            data,
            nrows,
            ncols,
            layout,
        })
    }

    /// Build a matrix from a slice of rows.
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R], layout: DistanceLayout) -> Result<Self, KnnError> {
        let features = FeatureMatrix::from_rows(rows)?;
        Self::from_flat(features.data, features.nrows, features.ncols, layout)
    }
}

impl<T: Copy> DistanceMatrix<T> {
    /// Entry (i, j).
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> T {
        self.data[i * self.ncols + j]
    }
}

impl<T> DistanceMatrix<T> {
    /// Number of rows (query samples).
    #[inline]
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Number of columns (reference samples).
    #[inline]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Row/column relationship of this matrix.
    #[inline]
    pub fn layout(&self) -> DistanceLayout {
        self.layout
    }

    /// Borrow row `i`.
    #[inline]
    pub fn row(&self, i: usize) -> &[T] {
        let start = i * self.ncols;
        &self.data[start..start + self.ncols]
    }

    /// Flat row-major view of the data.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Consume the matrix and return the flat buffer.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

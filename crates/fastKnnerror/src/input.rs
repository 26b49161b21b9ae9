//! Input and output bridges between ndarray and the core matrix types.
//!
//! ## Purpose
//!
//! This module lets the parallel evaluators accept embeddings and labels in
//! several containers (core matrices, nested vectors, ndarray arrays) through
//! a single interface, and turns distance matrices back into ndarray arrays.
//!
//! ## Design notes
//!
//! * **Zero-copy where possible**: Core matrices and label slices are borrowed.
//! * **Interoperability**: Bridges standard Rust collections with `ndarray`.
//! * **Fail-fast validation**: Non-contiguous arrays are rejected before processing.
//!
//! ## Key concepts
//!
//! * **FeatureInput Trait**: Anything that can be viewed as an (N, D) feature matrix.
//! * **LabelInput Trait**: Anything that can be viewed as a contiguous label slice.
//! * **Memory Continuity**: ndarray inputs must be in standard (row-major) layout.
//!
//! ## Invariants
//!
//! * Converted matrices keep the row order of the input.
//! * Non-contiguous inputs return an error rather than a silent copy.
//!
//! ## Non-goals
//!
//! * This module does not perform data cleaning or normalization.

// External dependencies
use ndarray::{Array2, ArrayBase, Data, Ix1, Ix2};
use num_traits::Float;
use std::borrow::Cow;

// Export dependencies from knnerror crate
use knnerror::internals::primitives::errors::KnnError;
use knnerror::internals::primitives::matrix::{DistanceMatrix, FeatureMatrix};

// ============================================================================
// Feature Input
// ============================================================================

/// Trait for types that can be used as an embedding matrix.
pub trait FeatureInput<T: Float> {
    /// View the input as a row-major feature matrix.
    fn as_feature_matrix(&self) -> Result<Cow<'_, FeatureMatrix<T>>, KnnError>;
}

impl<T: Float> FeatureInput<T> for FeatureMatrix<T> {
    fn as_feature_matrix(&self) -> Result<Cow<'_, FeatureMatrix<T>>, KnnError> {
        Ok(Cow::Borrowed(self))
    }
}

impl<T: Float> FeatureInput<T> for [Vec<T>] {
    fn as_feature_matrix(&self) -> Result<Cow<'_, FeatureMatrix<T>>, KnnError> {
        FeatureMatrix::from_rows(self).map(Cow::Owned)
    }
}

impl<T: Float> FeatureInput<T> for Vec<Vec<T>> {
    fn as_feature_matrix(&self) -> Result<Cow<'_, FeatureMatrix<T>>, KnnError> {
        self.as_slice().as_feature_matrix()
    }
}

impl<T: Float, S> FeatureInput<T> for ArrayBase<S, Ix2>
where
    S: Data<Elem = T>,
{
    fn as_feature_matrix(&self) -> Result<Cow<'_, FeatureMatrix<T>>, KnnError> {
        let data = self.as_slice().ok_or_else(|| {
            KnnError::InvalidInput("ndarray input must be contiguous in memory".to_string())
        })?;
        FeatureMatrix::from_flat(data.to_vec(), self.nrows(), self.ncols()).map(Cow::Owned)
    }
}

// ============================================================================
// Label Input
// ============================================================================

/// Trait for types that can be used as a label vector.
pub trait LabelInput<L> {
    /// Convert the input to a contiguous slice.
    fn as_label_slice(&self) -> Result<&[L], KnnError>;
}

impl<L> LabelInput<L> for [L] {
    fn as_label_slice(&self) -> Result<&[L], KnnError> {
        Ok(self)
    }
}

impl<L> LabelInput<L> for Vec<L> {
    fn as_label_slice(&self) -> Result<&[L], KnnError> {
        Ok(self.as_slice())
    }
}

impl<L, const N: usize> LabelInput<L> for [L; N] {
    fn as_label_slice(&self) -> Result<&[L], KnnError> {
        Ok(self.as_slice())
    }
}

impl<L, S> LabelInput<L> for ArrayBase<S, Ix1>
where
    S: Data<Elem = L>,
{
    fn as_label_slice(&self) -> Result<&[L], KnnError> {
        self.as_slice().ok_or_else(|| {
            KnnError::InvalidInput("ndarray labels must be contiguous in memory".to_string())
        })
    }
}

// ============================================================================
// Array Output
// ============================================================================

/// Conversion of a core matrix into an owned ndarray array.
pub trait IntoArray2<T> {
    /// Move the data into an `Array2` of the same shape.
    fn into_array2(self) -> Result<Array2<T>, KnnError>;
}

impl<T: Float> IntoArray2<T> for DistanceMatrix<T> {
    fn into_array2(self) -> Result<Array2<T>, KnnError> {
        let shape = (self.nrows(), self.ncols());
        Array2::from_shape_vec(shape, self.into_vec())
            .map_err(|e| KnnError::InvalidInput(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array1, array};

    #[test]
    fn test_array2_input() {
        let a = array![[1.0_f64, 2.0], [3.0, 4.0], [5.0, 6.0]];
        let x = a.as_feature_matrix().unwrap();
        assert_eq!((x.nrows(), x.ncols()), (3, 2));
        assert_eq!(x.row(2), &[5.0, 6.0]);
    }

    #[test]
    fn test_non_contiguous_rejected() {
        let a = array![[1.0_f64, 2.0], [3.0, 4.0], [5.0, 6.0]];
        let t = a.t();
        assert!(matches!(
            t.as_feature_matrix(),
            Err(KnnError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_nested_vec_input() {
        let rows = vec![vec![1.0_f32, 0.0], vec![0.0, 1.0]];
        let x = rows.as_feature_matrix().unwrap();
        assert_eq!(x.as_slice(), &[1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_label_inputs() {
        let labels = Array1::from_vec(vec![3_u8, 1, 2]);
        assert_eq!(labels.as_label_slice().unwrap(), &[3, 1, 2]);
        assert_eq!(vec!['a', 'b'].as_label_slice().unwrap(), &['a', 'b']);
    }
}

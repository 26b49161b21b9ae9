//! Sample-source and embedder interfaces.
//!
//! ## Purpose
//!
//! This module defines the boundary to the external collaborators that feed
//! an evaluation: a source of labeled samples for a named dataset split, and
//! an embedding function that turns a batch of raw samples into a
//! [`FeatureMatrix`].
//!
//! ## Design notes
//!
//! * **Narrow contract**: The crate only relies on shapes and label alignment,
//!   not on how samples are stored or models are run.
//! * **Closures as embedders**: Any `Fn(&[S]) -> Result<FeatureMatrix<T>, KnnError>`
//!   is an [`Embedder`].
//! * **Reference source**: [`InMemorySource`] serves splits from memory in
//!   insertion order, for tests and small pipelines.
//!
//! ## Invariants
//!
//! * Loaded samples and labels have the same length.
//! * Order is deterministic (no shuffling); truncation keeps the prefix.
//! * An embedded matrix has one row per sample.
//!
//! ## Non-goals
//!
//! * Downloading datasets or loading model weights.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::{
    collections::BTreeMap,
    format,
    string::{String, ToString},
    vec::Vec,
};
#[cfg(feature = "std")]
use std::collections::BTreeMap;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::engine::validator::Validator;
use crate::primitives::errors::KnnError;
use crate::primitives::matrix::FeatureMatrix;

// ============================================================================
// Labeled Samples
// ============================================================================

/// Raw samples with their aligned labels.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledSamples<S, L> {
    /// Raw samples, in source order.
    pub samples: Vec<S>,

    /// One label per sample.
    pub labels: Vec<L>,
}

impl<S, L> LabeledSamples<S, L> {
    /// Pair samples with labels; both must have the same length.
    pub fn new(samples: Vec<S>, labels: Vec<L>) -> Result<Self, KnnError> {
        Validator::validate_labels("labels", samples.len(), labels.len())?;
        Ok(Self { samples, labels })
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether there are no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Keep only the first `n` samples.
    pub fn truncate(&mut self, n: usize) {
        self.samples.truncate(n);
        self.labels.truncate(n);
    }
}

// ============================================================================
// Interfaces
// ============================================================================

/// A provider of labeled samples for named dataset splits.
pub trait SampleSource<S, L> {
    /// Load `split` of `dataset`, keeping the first `num_examples` samples.
    ///
    /// `None` and `Some(0)` both load the whole split.
    fn load(
        &self,
        dataset: &str,
        split: &str,
        num_examples: Option<usize>,
    ) -> Result<LabeledSamples<S, L>, KnnError>;
}

/// A function from a batch of raw samples to their embeddings.
pub trait Embedder<S, T> {
    /// Embed `batch`, one output row per sample.
    fn embed(&self, batch: &[S]) -> Result<FeatureMatrix<T>, KnnError>;
}

impl<S, T, F> Embedder<S, T> for F
where
    F: Fn(&[S]) -> Result<FeatureMatrix<T>, KnnError>,
{
    fn embed(&self, batch: &[S]) -> Result<FeatureMatrix<T>, KnnError> {
        self(batch)
    }
}

/// Embed loaded samples, returning the feature matrix and the labels.
pub fn embed_samples<S, L, T, E>(
    data: LabeledSamples<S, L>,
    embedder: &E,
) -> Result<(FeatureMatrix<T>, Vec<L>), KnnError>
where
    T: Float,
    E: Embedder<S, T> + ?Sized,
{
    let features = embedder.embed(&data.samples)?;
    Validator::validate_labels("embedded rows", data.samples.len(), features.nrows())?;

    tracing::debug!(
        rows = features.nrows(),
        dim = features.ncols(),
        "embedded samples"
    );

    Ok((features, data.labels))
}

// ============================================================================
// In-Memory Source
// ============================================================================

/// Serves dataset splits held in memory.
#[derive(Debug, Clone)]
pub struct InMemorySource<S, L> {
    splits: BTreeMap<(String, String), LabeledSamples<S, L>>,
}

impl<S, L> Default for InMemorySource<S, L> {
    fn default() -> Self {
        Self {
            splits: BTreeMap::new(),
        }
    }
}

impl<S, L> InMemorySource<S, L> {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a split.
    pub fn with_split(mut self, dataset: &str, split: &str, data: LabeledSamples<S, L>) -> Self {
        self.splits
            .insert((dataset.to_string(), split.to_string()), data);
        self
    }
}

impl<S: Clone, L: Clone> SampleSource<S, L> for InMemorySource<S, L> {
    fn load(
        &self,
        dataset: &str,
        split: &str,
        num_examples: Option<usize>,
    ) -> Result<LabeledSamples<S, L>, KnnError> {
        let stored = self
            .splits
            .get(&(dataset.to_string(), split.to_string()))
            .ok_or_else(|| {
                KnnError::InvalidInput(format!("unknown dataset split '{dataset}/{split}'"))
            })?;

        let mut data = stored.clone();
        if let Some(n) = num_examples.filter(|&n| n > 0) {
            data.truncate(n);
        }
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> InMemorySource<f64, u8> {
        let data = LabeledSamples::new(vec![0.0, 1.0, 2.0, 3.0], vec![0, 0, 1, 1]).unwrap();
        InMemorySource::new().with_split("toy", "train", data)
    }

    #[test]
    fn test_load_truncates_prefix() {
        let data = source().load("toy", "train", Some(3)).unwrap();
        assert_eq!(data.samples, vec![0.0, 1.0, 2.0]);
        assert_eq!(data.labels, vec![0, 0, 1]);
    }

    #[test]
    fn test_load_zero_means_all() {
        assert_eq!(source().load("toy", "train", Some(0)).unwrap().len(), 4);
        assert_eq!(source().load("toy", "train", None).unwrap().len(), 4);
    }

    #[test]
    fn test_unknown_split() {
        assert!(matches!(
            source().load("toy", "test", None),
            Err(KnnError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_embed_closure() {
        let data = source().load("toy", "train", None).unwrap();
        let embed = |batch: &[f64]| -> Result<FeatureMatrix<f32>, KnnError> {
            let rows: Vec<[f32; 2]> = batch.iter().map(|&v| [v as f32, 1.0]).collect();
            FeatureMatrix::from_rows(&rows)
        };
        let (x, y) = embed_samples(data, &embed).unwrap();
        assert_eq!((x.nrows(), x.ncols()), (4, 2));
        assert_eq!(y, vec![0, 0, 1, 1]);
    }

    #[test]
    fn test_embed_row_count_mismatch() {
        let data = source().load("toy", "train", None).unwrap();
        let embed = |_: &[f64]| FeatureMatrix::<f32>::from_rows(&[[1.0_f32]]);
        assert!(matches!(
            embed_samples(data, &embed),
            Err(KnnError::ShapeMismatch {
                what: "embedded rows",
                expected: 4,
                got: 1
            })
        ));
    }
}

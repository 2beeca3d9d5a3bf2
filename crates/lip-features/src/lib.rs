//! Lip Feature Extraction
//!
//! Turns face-mesh lip landmarks into the 5-dimensional geometric feature
//! vector consumed by the smile classifier.

mod features;
mod landmark;
mod statistics;

pub use features::{FeatureExtractor, FeatureVector, FEATURE_DIMENSION, FEATURE_NAMES, WIDTH_EPSILON};
pub use landmark::{BoundingBox, Landmark, MouthContour, LIPS_INDICES, MAX_COORDINATE};
pub use statistics::StatisticalFeatures;

use thiserror::Error;

/// Errors during feature extraction
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeatureError {
    /// Landmarks unusable for this frame (empty, non-finite, or missing mesh indices)
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

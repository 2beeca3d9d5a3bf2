//! SVM Inference Engine
//!
//! Loads a pre-trained binary RBF-kernel SVM (scaler statistics, support
//! vectors and dual coefficients) and evaluates its decision function.

mod classifier;
mod model;

pub use model::{ClassLabel, SvmModel, SvmModelBundle};

use thiserror::Error;

/// Errors while loading or evaluating an SVM model
#[derive(Debug, Error)]
pub enum SvmError {
    #[error("Failed to read model bundle: {0}")]
    ModelRead(#[from] std::io::Error),

    #[error("Malformed model bundle: {0}")]
    ModelParse(#[from] serde_json::Error),

    #[error("Inconsistent model parameters: {0}")]
    FatalConfig(String),

    #[error("Invalid feature vector length: expected {expected}, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },
}

impl SvmError {
    /// True for every load-time failure. These abort startup and are never retried.
    pub fn is_fatal_config(&self) -> bool {
        !matches!(self, SvmError::ShapeMismatch { .. })
    }
}

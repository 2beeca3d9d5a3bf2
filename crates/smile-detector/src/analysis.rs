//! Per-frame smile analysis results

use lip_features::{BoundingBox, FeatureVector};
use onset_trigger::SmileOnset;
use serde::{Deserialize, Serialize};

/// Classifier verdict for one feature vector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// Raw SVM decision value
    pub score: f64,
    /// Threshold the score was compared against
    pub threshold: f64,
    /// `score >= threshold`
    pub smiling: bool,
    /// Model class label for the raw score (threshold ignored)
    pub label: String,
}

/// Full result for an analyzed frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmileAnalysis {
    pub features: FeatureVector,

    pub classification: Classification,

    /// Mouth bounding box, for anchoring reaction effects
    pub mouth_box: BoundingBox,

    /// Set when this frame fired an onset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub onset: Option<SmileOnset>,
}

impl SmileAnalysis {
    pub fn smiling(&self) -> bool {
        self.classification.smiling
    }

    pub fn score(&self) -> f64 {
        self.classification.score
    }

    pub fn fired(&self) -> bool {
        self.onset.is_some()
    }
}

/// What happened to one incoming frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FrameOutcome {
    /// Dropped by the frame sampler
    NotSampled,
    /// Landmark provider reported no face
    NoFace,
    /// Landmarks unusable; the frame was skipped without touching state
    Skipped { reason: String },
    /// Frame went through the full pipeline
    Analyzed(SmileAnalysis),
}

impl FrameOutcome {
    pub fn analysis(&self) -> Option<&SmileAnalysis> {
        match self {
            FrameOutcome::Analyzed(a) => Some(a),
            _ => None,
        }
    }

    /// Onset fired by this frame, if any
    pub fn onset(&self) -> Option<SmileOnset> {
        self.analysis().and_then(|a| a.onset)
    }

    /// Smiling flag, `None` when the frame was not analyzed
    pub fn smiling(&self) -> Option<bool> {
        self.analysis().map(|a| a.smiling())
    }
}

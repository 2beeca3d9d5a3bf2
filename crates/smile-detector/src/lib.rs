//! Smile Detector
//!
//! Per-frame smile detection for reaction effects:
//! - Lip landmark feature extraction
//! - RBF kernel SVM scoring against a pre-trained model
//! - Runtime-adjustable threshold gate
//! - Cooldown-debounced onset events

pub mod analysis;
pub mod config;
pub mod state;

pub use crate::analysis::{Classification, FrameOutcome, SmileAnalysis};
pub use crate::config::SmileConfig;
pub use crate::state::{DetectorStats, FrameSampler};

pub use lip_features::{FeatureVector, Landmark, MouthContour, FEATURE_DIMENSION, LIPS_INDICES};
pub use onset_trigger::{SmileOnset, ThresholdHandle, TriggerConfig};
pub use svm_engine::SvmModel;

use lip_features::{FeatureError, FeatureExtractor};
use onset_trigger::{ThresholdGate, TransitionTracker};
use std::sync::Arc;
use std::time::Instant;
use svm_engine::SvmError;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Smile detector error types
#[derive(Error, Debug)]
pub enum SmileError {
    #[error("Feature extraction failed: {0}")]
    Feature(#[from] FeatureError),

    #[error("Classifier error: {0}")]
    Svm(#[from] SvmError),

    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
}

impl SmileError {
    /// Only bad landmarks are recoverable; everything else means a broken deployment
    pub fn is_recoverable(&self) -> bool {
        matches!(self, SmileError::Feature(_))
    }
}

/// Smile detection pipeline for one camera session.
///
/// Processes one frame at a time. The model is shared read-only and the
/// threshold is read from its handle on every analyzed frame.
pub struct SmileDetector {
    model: Arc<SvmModel>,
    extractor: FeatureExtractor,
    gate: ThresholdGate,
    tracker: TransitionTracker,
    sampler: FrameSampler,
    stats: DetectorStats,
}

impl SmileDetector {
    /// Create a detector around an already loaded model.
    ///
    /// Fails with a shape mismatch when the model was not trained on the
    /// lip feature vector.
    pub fn new(
        model: Arc<SvmModel>,
        threshold: ThresholdHandle,
        config: &SmileConfig,
    ) -> Result<Self, SmileError> {
        if model.n_features() != FEATURE_DIMENSION {
            return Err(SvmError::ShapeMismatch {
                expected: model.n_features(),
                actual: FEATURE_DIMENSION,
            }
            .into());
        }

        info!(
            "Creating smile detector: SVs={}, threshold={:.2}, cooldown={}ms, every {} frame(s)",
            model.n_support_vectors(),
            threshold.get(),
            config.trigger.cooldown_ms,
            config.analyze_every_n_frames.max(1)
        );

        Ok(Self {
            model,
            extractor: FeatureExtractor::new(),
            gate: ThresholdGate::new(threshold),
            tracker: TransitionTracker::new(&config.trigger),
            sampler: FrameSampler::new(config.analyze_every_n_frames),
            stats: DetectorStats::default(),
        })
    }

    /// Load the model named in `config` and create a detector with a fresh
    /// threshold handle set to `config.initial_threshold`
    pub fn from_config(config: &SmileConfig) -> Result<Self, SmileError> {
        let model = Arc::new(SvmModel::load(&config.model_path)?);
        Self::new(model, ThresholdHandle::new(config.initial_threshold), config)
    }

    /// Score a feature vector against the current threshold. Does not touch
    /// the onset tracker.
    pub fn classify(&self, features: &FeatureVector) -> Result<Classification, SmileError> {
        let score = self.model.decision_score(features.as_slice())?;
        let (smiling, threshold) = self.gate.evaluate(score);
        Ok(Classification {
            score,
            threshold,
            smiling,
            label: self.model.label_for_score(score).to_string(),
        })
    }

    /// Process one frame given the 40 lip landmarks, or `None` when no face was found
    pub fn process(&mut self, lips: Option<&[Landmark]>, now: Instant) -> Result<FrameOutcome, SmileError> {
        self.run(lips, now, |points| MouthContour::new(points.to_vec()))
    }

    /// Process one frame given the full face mesh, or `None` when no face was found
    pub fn process_face_mesh(
        &mut self,
        mesh: Option<&[Landmark]>,
        now: Instant,
    ) -> Result<FrameOutcome, SmileError> {
        self.run(mesh, now, MouthContour::from_face_mesh)
    }

    fn run<F>(&mut self, input: Option<&[Landmark]>, now: Instant, to_contour: F) -> Result<FrameOutcome, SmileError>
    where
        F: FnOnce(&[Landmark]) -> Result<MouthContour, FeatureError>,
    {
        self.stats.frames_seen += 1;

        if !self.sampler.tick() {
            self.stats.frames_not_sampled += 1;
            return Ok(FrameOutcome::NotSampled);
        }

        let Some(points) = input else {
            self.stats.no_face_frames += 1;
            return Ok(FrameOutcome::NoFace);
        };

        let contour = match to_contour(points) {
            Ok(c) => c,
            Err(e) => {
                warn!("Skipping frame: {}", e);
                self.stats.skipped_frames += 1;
                return Ok(FrameOutcome::Skipped { reason: e.to_string() });
            }
        };

        let features = self.extractor.extract(&contour);
        let classification = self.classify(&features)?;
        let onset = self.tracker.update(classification.smiling, now);

        self.stats.frames_analyzed += 1;
        if classification.smiling {
            self.stats.smiling_frames += 1;
        }

        debug!(
            "Frame analyzed: {} score={:.4}, threshold={:.2}, smiling={}, onset={}",
            features,
            classification.score,
            classification.threshold,
            classification.smiling,
            onset.is_some()
        );

        Ok(FrameOutcome::Analyzed(SmileAnalysis {
            features,
            classification,
            mouth_box: contour.bounding_box(),
            onset,
        }))
    }

    /// Handle shared with the settings side
    pub fn threshold(&self) -> &ThresholdHandle {
        self.gate.threshold()
    }

    pub fn model(&self) -> &Arc<SvmModel> {
        &self.model
    }

    /// Whether the tracker is currently in a smile that already fired
    pub fn is_active(&self) -> bool {
        self.tracker.is_active()
    }

    pub fn onset_count(&self) -> u64 {
        self.tracker.onset_count()
    }

    pub fn stats(&self) -> &DetectorStats {
        &self.stats
    }

    /// Reset tracking state (new session, camera switch)
    pub fn reset_state(&mut self) {
        self.tracker.reset();
        self.sampler.reset();
        self.stats.reset();
    }
}

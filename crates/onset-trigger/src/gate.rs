//! Score-to-boolean threshold gate

use crate::threshold::ThresholdHandle;

/// A frame counts as smiling when its score reaches the threshold (inclusive)
#[inline]
pub fn is_smiling(score: f64, threshold: f64) -> bool {
    score >= threshold
}

/// Gate bound to a shared threshold; the threshold is re-read on every call
#[derive(Debug, Clone, Default)]
pub struct ThresholdGate {
    threshold: ThresholdHandle,
}

impl ThresholdGate {
    pub fn new(threshold: ThresholdHandle) -> Self {
        Self { threshold }
    }

    /// Evaluate a score against the current threshold.
    /// Returns the threshold used alongside the decision.
    pub fn evaluate(&self, score: f64) -> (bool, f64) {
        let threshold = self.threshold.get();
        (is_smiling(score, threshold), threshold)
    }

    pub fn is_smiling(&self, score: f64) -> bool {
        self.evaluate(score).0
    }

    pub fn threshold(&self) -> &ThresholdHandle {
        &self.threshold
    }
}

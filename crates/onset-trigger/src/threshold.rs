//! Shared, runtime-adjustable decision threshold

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

pub const MIN_THRESHOLD: f64 = -2.0;
pub const MAX_THRESHOLD: f64 = 2.0;
/// Reproduces the raw SVM decision boundary
pub const DEFAULT_THRESHOLD: f64 = 0.0;
/// Increment of the stepped settings control
pub const THRESHOLD_STEP: f64 = 0.04;

/// Handle to the threshold owned by the settings side.
///
/// Clones share one value. Stored as `f64` bits in an atomic, so a reader
/// never observes a torn write.
#[derive(Debug, Clone)]
pub struct ThresholdHandle {
    bits: Arc<AtomicU64>,
}

impl ThresholdHandle {
    /// Create a handle holding `initial`, clamped to the valid range
    pub fn new(initial: f64) -> Self {
        let value = if initial.is_finite() {
            initial.clamp(MIN_THRESHOLD, MAX_THRESHOLD)
        } else {
            DEFAULT_THRESHOLD
        };
        Self {
            bits: Arc::new(AtomicU64::new(value.to_bits())),
        }
    }

    pub fn get(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Relaxed))
    }

    /// Store a new threshold, clamped to `[MIN_THRESHOLD, MAX_THRESHOLD]`.
    /// Non-finite values are ignored. Returns the stored value.
    pub fn set(&self, value: f64) -> f64 {
        if !value.is_finite() {
            debug!("Ignoring non-finite threshold {}", value);
            return self.get();
        }
        let clamped = value.clamp(MIN_THRESHOLD, MAX_THRESHOLD);
        self.bits.store(clamped.to_bits(), Ordering::Relaxed);
        debug!("Smile threshold set to {:.2}", clamped);
        clamped
    }

    pub fn reset(&self) -> f64 {
        self.set(DEFAULT_THRESHOLD)
    }

    /// Raise by one step, landing on the `MIN_THRESHOLD + k * THRESHOLD_STEP` grid
    pub fn step_up(&self) -> f64 {
        self.set(grid_value(grid_index(self.get()) + 1.0))
    }

    /// Lower by one step, landing on the grid
    pub fn step_down(&self) -> f64 {
        self.set(grid_value(grid_index(self.get()) - 1.0))
    }
}

/// Nearest slider position for a threshold value
fn grid_index(value: f64) -> f64 {
    ((value - MIN_THRESHOLD) / THRESHOLD_STEP).round()
}

fn grid_value(index: f64) -> f64 {
    MIN_THRESHOLD + index * THRESHOLD_STEP
}

impl Default for ThresholdHandle {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

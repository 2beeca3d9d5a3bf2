//! Frame sampling and pipeline counters

use serde::{Deserialize, Serialize};

/// Picks one frame out of every `n`
#[derive(Debug, Clone)]
pub struct FrameSampler {
    every_n: u32,
    counter: u32,
}

impl FrameSampler {
    /// `every_n` of 0 is treated as 1
    pub fn new(every_n: u32) -> Self {
        Self {
            every_n: every_n.max(1),
            counter: 0,
        }
    }

    /// Advance by one frame; true when this frame should be analyzed
    pub fn tick(&mut self) -> bool {
        self.counter = (self.counter + 1) % self.every_n;
        self.counter == 0
    }

    pub fn every_n(&self) -> u32 {
        self.every_n
    }

    pub fn reset(&mut self) {
        self.counter = 0;
    }
}

/// Per-session frame counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectorStats {
    /// Every frame handed to the detector
    pub frames_seen: u64,
    /// Frames dropped by the sampler
    pub frames_not_sampled: u64,
    /// Sampled frames without a face
    pub no_face_frames: u64,
    /// Sampled frames whose landmarks were unusable
    pub skipped_frames: u64,
    /// Frames that went through the full pipeline
    pub frames_analyzed: u64,
    /// Frames classified as smiling
    pub smiling_frames: u64,
}

impl DetectorStats {
    /// Share of analyzed frames that were smiling
    pub fn smiling_ratio(&self) -> f64 {
        if self.frames_analyzed == 0 {
            return 0.0;
        }
        self.smiling_frames as f64 / self.frames_analyzed as f64
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

//! Smile onset transition tracker

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Trigger configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriggerConfig {
    /// Minimum gap between two fired onsets (milliseconds)
    pub cooldown_ms: u64,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self { cooldown_ms: 2800 }
    }
}

impl TriggerConfig {
    /// Short cooldown for quick back-to-back reactions
    pub fn responsive() -> Self {
        Self { cooldown_ms: 1200 }
    }

    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }
}

/// Zero-payload "fire now" signal for the effects side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmileOnset;

/// Tracker state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SmileState {
    /// ACTIVE (true) or IDLE (false)
    pub active: bool,
    /// When the last onset fired, if any
    pub last_trigger: Option<Instant>,
}

/// Debounces the per-frame smiling flag into onset events.
///
/// IDLE → ACTIVE fires one onset when the frame smiles and the cooldown since
/// the last fired onset has elapsed. ACTIVE → IDLE happens silently on the
/// first non-smiling frame. Staying ACTIVE never fires again.
#[derive(Debug, Clone)]
pub struct TransitionTracker {
    cooldown: Duration,
    state: SmileState,
    onset_count: u64,
}

impl TransitionTracker {
    pub fn new(config: &TriggerConfig) -> Self {
        info!("Creating smile transition tracker: cooldown={}ms", config.cooldown_ms);
        Self::with_cooldown(config.cooldown())
    }

    pub fn with_cooldown(cooldown: Duration) -> Self {
        Self {
            cooldown,
            state: SmileState::default(),
            onset_count: 0,
        }
    }

    fn cooldown_elapsed(&self, now: Instant) -> bool {
        match self.state.last_trigger {
            None => true,
            // A clock that went backwards counts as still cooling down
            Some(last) => now
                .checked_duration_since(last)
                .map_or(false, |elapsed| elapsed >= self.cooldown),
        }
    }

    /// Feed one analyzed frame. Returns an onset when one fires.
    pub fn update(&mut self, smiling: bool, now: Instant) -> Option<SmileOnset> {
        if !smiling {
            if self.state.active {
                debug!("Smile ended");
            }
            self.state.active = false;
            return None;
        }

        if self.state.active {
            return None;
        }

        if !self.cooldown_elapsed(now) {
            debug!("Smile onset suppressed: in cooldown period");
            return None;
        }

        self.state.active = true;
        self.state.last_trigger = Some(now);
        self.onset_count += 1;
        info!("Smile onset fired (count: {})", self.onset_count);
        Some(SmileOnset)
    }

    pub fn state(&self) -> SmileState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state.active
    }

    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    /// Number of onsets fired since creation or the last reset
    pub fn onset_count(&self) -> u64 {
        self.onset_count
    }

    /// Return to IDLE with no trigger history
    pub fn reset(&mut self) {
        self.state = SmileState::default();
        self.onset_count = 0;
    }
}

impl Default for TransitionTracker {
    fn default() -> Self {
        Self::new(&TriggerConfig::default())
    }
}

//! Smile Onset Triggering
//!
//! Converts per-frame decision scores into a debounced stream of onset
//! events: a threshold gate turns scores into booleans, and a transition
//! tracker fires at most once per smile and never inside the cooldown.

mod gate;
mod threshold;
mod tracker;

pub use gate::{is_smiling, ThresholdGate};
pub use threshold::{ThresholdHandle, DEFAULT_THRESHOLD, MAX_THRESHOLD, MIN_THRESHOLD, THRESHOLD_STEP};
pub use tracker::{SmileOnset, SmileState, TransitionTracker, TriggerConfig};

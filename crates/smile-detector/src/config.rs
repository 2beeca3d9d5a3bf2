//! Smile detector configuration

use ::config::{Config, ConfigError, Environment, File};
use onset_trigger::{TriggerConfig, DEFAULT_THRESHOLD};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Smile detector configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmileConfig {
    /// Path to the JSON SVM model bundle
    pub model_path: String,

    /// Decision threshold at startup, before any settings change
    pub initial_threshold: f64,

    /// Analyze one frame out of every N (1 = every frame)
    pub analyze_every_n_frames: u32,

    /// Onset debouncing
    pub trigger: TriggerConfig,
}

impl Default for SmileConfig {
    fn default() -> Self {
        Self {
            model_path: "svm_smile_model.json".to_string(),
            initial_threshold: DEFAULT_THRESHOLD,
            analyze_every_n_frames: 1,
            trigger: TriggerConfig::default(),
        }
    }
}

impl SmileConfig {
    /// Short cooldown, every frame analyzed
    pub fn responsive() -> Self {
        Self {
            trigger: TriggerConfig::responsive(),
            ..Default::default()
        }
    }

    /// Analyze every fifth frame to save CPU on slower devices
    pub fn low_power() -> Self {
        Self {
            analyze_every_n_frames: 5,
            ..Default::default()
        }
    }

    /// Load configuration: defaults, then the optional file at `path`,
    /// then `SMILE__*` environment variables (`SMILE__TRIGGER__COOLDOWN_MS=1200`).
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Self::load_from(
            path.as_ref(),
            Environment::with_prefix("SMILE").separator("__").try_parsing(true),
        )
    }

    fn load_from(path: &Path, environment: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(environment)
            .build()?
            .try_deserialize()
    }
}

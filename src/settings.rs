//! Lock tuning configuration
//!
//! Every timing and geometry value the simulation reads lives here. Values are
//! validated once when a [`LockPuzzle`](crate::LockPuzzle) is built.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Run-length bounds seen across revisions of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RunLengthPreset {
    /// 1-9 clicks per run
    #[default]
    Classic,
    /// 3-6 clicks per run
    Tightened,
    /// 6-9 clicks per run
    Long,
}

impl RunLengthPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunLengthPreset::Classic => "Classic",
            RunLengthPreset::Tightened => "Tightened",
            RunLengthPreset::Long => "Long",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(RunLengthPreset::Classic),
            "tightened" | "tight" => Some(RunLengthPreset::Tightened),
            "long" => Some(RunLengthPreset::Long),
            _ => None,
        }
    }

    /// Inclusive (min, max) run length
    pub fn bounds(&self) -> (u32, u32) {
        match self {
            RunLengthPreset::Classic => (1, 9),
            RunLengthPreset::Tightened => (3, 6),
            RunLengthPreset::Long => (6, 9),
        }
    }
}

/// Lock configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LockConfig {
    // === Pattern ===
    /// Shortest run in a secret pattern
    pub min_run: u32,
    /// Longest run in a secret pattern
    pub max_run: u32,
    /// Runs per pattern (must be 3)
    pub run_count: u32,

    // === Dial ===
    /// Angle consumed per click (radians)
    pub unit_angle: f32,
    /// Dial speed while rotating (radians/sec)
    pub rotation_speed: f32,
    /// Detents before the dial stop engages
    pub detent_limit: u32,
    /// Absolute angle at the dial stop (radians)
    pub max_angle: f32,
    /// Idle decay multiplier per reference frame
    pub damping: f32,
    /// Reference frame length the damping is expressed against (seconds)
    pub reference_frame: f32,

    // === Phases ===
    /// Reset spin length (seconds)
    pub reset_spin_duration: f32,
    /// Reset spin speed (radians/sec)
    pub reset_spin_speed: f32,
    /// Time the door stays open before relocking (seconds)
    pub unlock_duration: f32,
    /// Blink oscillation rate (radians/sec)
    pub blink_rate: f32,
}

impl Default for LockConfig {
    fn default() -> Self {
        let (min_run, max_run) = RunLengthPreset::default().bounds();
        Self {
            min_run,
            max_run,
            run_count: RUN_COUNT,

            unit_angle: UNIT_ANGLE,
            rotation_speed: ROTATION_SPEED,
            detent_limit: DETENT_LIMIT,
            max_angle: MAX_ANGLE,
            damping: DAMPING,
            reference_frame: REFERENCE_FRAME,

            reset_spin_duration: RESET_SPIN_DURATION,
            reset_spin_speed: RESET_SPIN_SPEED,
            unlock_duration: UNLOCK_DURATION,
            blink_rate: BLINK_RATE,
        }
    }
}

impl LockConfig {
    /// Create a config using a run-length preset
    pub fn from_preset(preset: RunLengthPreset) -> Self {
        let mut config = Self::default();
        config.apply_preset(preset);
        config
    }

    /// Apply a run-length preset
    pub fn apply_preset(&mut self, preset: RunLengthPreset) {
        let (min_run, max_run) = preset.bounds();
        self.min_run = min_run;
        self.max_run = max_run;
    }

    /// Parse a JSON document (missing fields take defaults) and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject nonsensical values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_run < 1 {
            return Err(ConfigError::ZeroRunLength);
        }
        if self.min_run > self.max_run {
            return Err(ConfigError::RunBounds {
                min: self.min_run,
                max: self.max_run,
            });
        }
        if self.run_count != RUN_COUNT {
            return Err(ConfigError::RunCount(self.run_count));
        }

        let positive = [
            ("unit_angle", self.unit_angle),
            ("rotation_speed", self.rotation_speed),
            ("max_angle", self.max_angle),
            ("reference_frame", self.reference_frame),
            ("reset_spin_duration", self.reset_spin_duration),
            ("reset_spin_speed", self.reset_spin_speed),
            ("unlock_duration", self.unlock_duration),
            ("blink_rate", self.blink_rate),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        if self.detent_limit == 0 {
            return Err(ConfigError::ZeroDetentLimit);
        }

        if !(0.0..1.0).contains(&self.damping) {
            return Err(ConfigError::DampingOutOfRange(self.damping));
        }

        // Small slack: 9 * (PI / 3) and 3 * PI differ in the last bit
        let last_detent = self.detent_limit as f32 * self.unit_angle;
        if self.max_angle + 1e-4 < last_detent {
            return Err(ConfigError::MaxAngleTooSmall {
                max_angle: self.max_angle,
                detents: self.detent_limit,
                unit_angle: self.unit_angle,
            });
        }

        Ok(())
    }
}

//! Vault Lock - A dial-combination safe puzzle
//!
//! Core modules:
//! - `sim`: Deterministic lock simulation (pattern, dial, matching, phases)
//! - `platform`: Collaborator seams (input source, side-effect sink)
//! - `audio`: Mute-gated sound cue queue
//! - `hud`: Read-only view for the renderer
//! - `diagnostics`: Optional structured observers
//! - `settings`: Validated tuning configuration

pub mod audio;
pub mod diagnostics;
pub mod error;
pub mod hud;
pub mod platform;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use settings::{LockConfig, RunLengthPreset};
pub use sim::{LockPhase, LockPuzzle};

/// Reference tuning constants
///
/// Tuned against a 60 Hz display frame; these are the same values expressed
/// in seconds.
pub mod consts {
    use std::f32::consts::PI;

    /// Duration of one reference frame (seconds)
    pub const REFERENCE_FRAME: f32 = 1.0 / 60.0;
    /// Fixed host timestep used by the demo driver
    pub const SIM_DT: f32 = REFERENCE_FRAME;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Angle consumed by one click
    pub const UNIT_ANGLE: f32 = PI / 3.0;
    /// Dial speed while a rotate action is held (0.03 rad/frame)
    pub const ROTATION_SPEED: f32 = 1.8;
    /// Detents completed before the dial hits its stop
    pub const DETENT_LIMIT: u32 = 9;
    /// Absolute angle the dial is pinned to at its stop
    pub const MAX_ANGLE: f32 = 3.0 * PI;
    /// Idle decay multiplier per reference frame
    pub const DAMPING: f32 = 0.9;

    /// Runs per secret pattern
    pub const RUN_COUNT: u32 = 3;

    /// Reset spin duration (180 frames)
    pub const RESET_SPIN_DURATION: f32 = 3.0;
    /// Reset spin speed (0.3 rad/frame)
    pub const RESET_SPIN_SPEED: f32 = 18.0;
    /// Time the door stays open (300 frames)
    pub const UNLOCK_DURATION: f32 = 5.0;
    /// Blink phase rate (0.1/frame)
    pub const BLINK_RATE: f32 = 6.0;
}

/// Frame-rate independent exponential decay.
///
/// `per_frame` is the multiplier applied once per `frame` seconds; the result is
/// the multiplier for an arbitrary `dt`.
#[inline]
pub fn decay_factor(per_frame: f32, dt: f32, frame: f32) -> f32 {
    per_frame.powf(dt / frame)
}

/// Sign of a float as -1, 0 or 1
#[inline]
pub fn sign(value: f32) -> f32 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

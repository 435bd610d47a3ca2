//! Configuration errors
//!
//! The simulation itself has no failure modes; only a nonsensical
//! [`LockConfig`](crate::LockConfig) is rejected, once, at construction.

/// Reason a lock configuration was rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Run-length range is inverted.
    #[error("run length bounds inverted: min {min} > max {max}")]
    RunBounds {
        /// Configured minimum run length.
        min: u32,
        /// Configured maximum run length.
        max: u32,
    },

    /// A run of length zero would merge its neighbours.
    #[error("minimum run length must be at least 1")]
    ZeroRunLength,

    /// Patterns are always built from exactly three runs.
    #[error("run count must be 3, got {0}")]
    RunCount(u32),

    /// A duration, speed or angle that must be strictly positive is not.
    #[error("{field} must be positive and finite, got {value}")]
    NonPositive {
        /// Offending field name.
        field: &'static str,
        /// Offending value.
        value: f32,
    },

    /// Damping must shrink the angle without flipping it.
    #[error("damping must be in [0, 1), got {0}")]
    DampingOutOfRange(f32),

    /// With no detents before the stop the dial can never click.
    #[error("detent limit must be at least 1")]
    ZeroDetentLimit,

    /// The dial stop must lie at or beyond the last detent.
    #[error("max angle {max_angle} is below detent limit {detents} x unit angle {unit_angle}")]
    MaxAngleTooSmall {
        /// Configured stop angle.
        max_angle: f32,
        /// Configured detent count.
        detents: u32,
        /// Configured unit angle.
        unit_angle: f32,
    },

    /// The config document could not be parsed.
    #[error("invalid config document: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

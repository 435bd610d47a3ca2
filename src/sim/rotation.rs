//! Dial rotation tracking
//!
//! Turns continuous rotate input into discrete clicks. The dial angle is what
//! the renderer draws; the accumulated magnitude is what produces clicks.

use serde::{Deserialize, Serialize};

use super::pattern::Direction;
use crate::settings::LockConfig;
use crate::{decay_factor, sign};

/// Float slack for travel clipped at the dial stop
///
/// The final detent must complete despite rounding in `detents * unit_angle`.
/// Unclipped travel is quantized exactly.
pub const CLICK_EPSILON: f32 = 1e-4;

/// Rotate action held this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DialInput {
    /// Rotate counter-clockwise
    Left,
    /// Rotate clockwise
    Right,
    /// Nothing held; the dial drifts back toward zero
    #[default]
    Idle,
}

impl DialInput {
    pub fn direction(self) -> Option<Direction> {
        match self {
            DialInput::Left => Some(Direction::CounterClockwise),
            DialInput::Right => Some(Direction::Clockwise),
            DialInput::Idle => None,
        }
    }
}

/// One discrete detent of rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickEvent {
    pub direction: Direction,
}

/// Dial position and progress toward the next click
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RotationState {
    /// Visual dial angle (radians, signed)
    pub angle: f32,
    /// Unsigned travel since the last click
    pub accumulated: f32,
    /// Direction of the most recent rotate input
    pub last_direction: Option<Direction>,
}

/// Converts rotate input into click events
#[derive(Debug, Clone)]
pub struct RotationTracker {
    state: RotationState,
    unit_angle: f32,
    speed: f32,
    /// |angle| at which the stop engages (detent limit * unit angle)
    stop_angle: f32,
    max_angle: f32,
    damping: f32,
    reference_frame: f32,
}

impl RotationTracker {
    pub fn from_config(config: &LockConfig) -> Self {
        Self {
            state: RotationState::default(),
            unit_angle: config.unit_angle,
            speed: config.rotation_speed,
            stop_angle: config.detent_limit as f32 * config.unit_angle,
            max_angle: config.max_angle,
            damping: config.damping,
            reference_frame: config.reference_frame,
        }
    }

    pub fn state(&self) -> &RotationState {
        &self.state
    }

    pub fn angle(&self) -> f32 {
        self.state.angle
    }

    pub fn unit_angle(&self) -> f32 {
        self.unit_angle
    }

    /// Apply one tick of input, returning clicks in emission order
    pub fn apply_input(&mut self, input: DialInput, dt: f32) -> Vec<ClickEvent> {
        let Some(direction) = input.direction() else {
            self.decay(dt);
            return Vec::new();
        };

        self.state.last_direction = Some(direction);
        let slack = if self.rotate(direction.unit() * self.speed * dt) {
            CLICK_EPSILON
        } else {
            0.0
        };
        self.drain_clicks(slack)
    }

    /// Passive drift toward zero; partial click progress is kept
    pub fn decay(&mut self, dt: f32) {
        self.state.angle *= decay_factor(self.damping, dt, self.reference_frame);
    }

    /// Move the dial, honouring the stop for outward travel
    ///
    /// Returns true when the travel was clipped at the stop.
    fn rotate(&mut self, amount: f32) -> bool {
        let dir = sign(amount);
        let angle = self.state.angle;

        // Pinned at the stop and pushing further out: no movement, no progress
        if sign(angle) == dir && angle.abs() >= self.stop_angle.min(self.max_angle) {
            self.state.angle = dir * self.max_angle;
            return false;
        }

        let target = angle + amount;
        if sign(target) == dir && target.abs() > self.stop_angle {
            // Only the travel up to the stop counts
            self.state.accumulated += self.stop_angle - dir * angle;
            self.state.angle = dir * self.max_angle;
            return true;
        }

        self.state.angle = target;
        self.state.accumulated += amount.abs();
        false
    }

    fn drain_clicks(&mut self, slack: f32) -> Vec<ClickEvent> {
        let mut clicks = Vec::new();
        let Some(direction) = self.state.last_direction else {
            return clicks;
        };
        while self.state.accumulated + slack >= self.unit_angle {
            self.state.accumulated = (self.state.accumulated - self.unit_angle).max(0.0);
            clicks.push(ClickEvent { direction });
        }
        clicks
    }

    /// Drive the dial directly (reset spin), bypassing the stop and clicks
    pub fn spin(&mut self, amount: f32) {
        self.state.angle += amount;
    }

    /// Forget click progress for a new round
    pub fn reset_progress(&mut self) {
        self.state.accumulated = 0.0;
        self.state.last_direction = None;
    }

    /// Snap the dial home and forget click progress
    pub fn reset_dial(&mut self) {
        self.state.angle = 0.0;
        self.reset_progress();
    }
}

//! Read-only view of the lock for the renderer
//!
//! Built fresh every frame; the renderer never writes back.

use crate::sim::{LockPhase, LockPuzzle};

/// Everything a frame needs to draw
#[derive(Debug, Clone, PartialEq)]
pub struct HudView {
    pub phase: LockPhase,
    /// Dial rotation (radians)
    pub dial_angle: f32,
    /// Blink overlay alpha, only while the door is open
    pub blink_alpha: Option<f32>,
    /// Round time in seconds
    pub elapsed: f32,
    /// Round time formatted for display
    pub timer_text: String,
    pub timer_visible: bool,
    pub door_open: bool,
}

impl HudView {
    pub fn from_puzzle(puzzle: &LockPuzzle) -> Self {
        let elapsed = puzzle.elapsed();
        Self {
            phase: puzzle.phase(),
            dial_angle: puzzle.angle(),
            blink_alpha: puzzle.blink_alpha(),
            elapsed,
            timer_text: format_timer(elapsed),
            timer_visible: !puzzle.hide_timer(),
            door_open: puzzle.phase() == LockPhase::Unlocked,
        }
    }
}

/// Two decimals, zero-padded to at least five characters ("03.25")
pub fn format_timer(secs: f32) -> String {
    format!("{:05.2}", secs.max(0.0))
}

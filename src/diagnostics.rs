//! Diagnostics observers
//!
//! Optional collaborators that receive structured lock data on every notable
//! event. Nothing in the simulation depends on one being attached.

use serde::{Deserialize, Serialize};

use crate::sim::{Direction, LockPhase};

/// Notable things that happened inside the lock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LockEvent {
    /// A fresh secret was drawn
    RoundStarted,
    /// A click was appended to the history
    Click(Direction),
    /// The dial started a reset spin
    ResetStarted,
    /// The pattern was matched
    Unlocked,
    /// The door closed again
    Relocked,
}

/// Debug overlay data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LockSnapshot {
    pub round: u32,
    pub phase: LockPhase,
    /// Run-length encoded secret, e.g. `3R, 2L, 5R`
    pub pattern: String,
    /// Secret as signed tokens
    pub pattern_tokens: Vec<i8>,
    /// Click history as signed tokens
    pub history: Vec<i8>,
    pub angle: f32,
    pub elapsed: f32,
    pub unlock_time_left: Option<f32>,
}

impl LockSnapshot {
    /// Arrow rendering of a token list (↻ clockwise, ↺ counter-clockwise)
    pub fn arrows(tokens: &[i8]) -> String {
        tokens
            .iter()
            .map(|&t| if t > 0 { '↻' } else { '↺' })
            .collect()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Receives lock events with the state right after them
pub trait LockObserver {
    fn on_event(&mut self, event: LockEvent, snapshot: &LockSnapshot);
}

/// Observer that writes each event to the `log` facade
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl LockObserver for LogObserver {
    fn on_event(&mut self, event: LockEvent, snapshot: &LockSnapshot) {
        match snapshot.to_json() {
            Ok(json) => log::debug!("{:?}: {}", event, json),
            Err(err) => log::warn!("Snapshot serialization failed: {}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::EffectLog;
    use crate::settings::LockConfig;
    use crate::sim::{ClickEvent, LockPuzzle};

    #[test]
    fn test_snapshot_reflects_history() {
        let mut puzzle = LockPuzzle::new(LockConfig::default(), 21).unwrap();
        let first = puzzle.pattern().tokens()[0];
        puzzle.on_click(ClickEvent { direction: first }, &mut EffectLog::default());

        let snapshot = puzzle.snapshot();
        assert_eq!(snapshot.round, 1);
        assert_eq!(snapshot.phase, LockPhase::Active);
        assert_eq!(snapshot.history, vec![first.sign()]);
        assert_eq!(snapshot.pattern, puzzle.pattern().encode());
        assert_eq!(snapshot.pattern_tokens.len(), puzzle.pattern().len());
        assert_eq!(snapshot.unlock_time_left, None);
    }

    #[test]
    fn test_snapshot_json() {
        let puzzle = LockPuzzle::new(LockConfig::default(), 21).unwrap();
        let json = puzzle.snapshot().to_json().unwrap();
        let back: LockSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.pattern, puzzle.pattern().encode());
        assert_eq!(back.phase, LockPhase::Active);
    }

    #[test]
    fn test_arrows() {
        assert_eq!(LockSnapshot::arrows(&[1, -1, 1]), "↻↺↻");
        assert_eq!(LockSnapshot::arrows(&[]), "");
    }

    #[test]
    fn test_log_observer_attached() {
        let mut puzzle = LockPuzzle::new(LockConfig::default(), 8).unwrap();
        puzzle.set_observer(Box::new(LogObserver));
        let first = puzzle.pattern().tokens()[0];
        assert!(
            puzzle
                .on_click(ClickEvent { direction: first }, &mut EffectLog::default())
                .is_some()
        );
    }
}

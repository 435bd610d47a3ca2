//! Lock state and core simulation types
//!
//! Everything the renderer and UI read lives here as plain data; nothing is
//! ever read back from the presentation layer.

use std::fmt;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::matcher::{ClickHistory, MatchEvaluator, MatchOutcome};
use super::pattern::{Direction, PatternGenerator, SecretPattern};
use super::rotation::{ClickEvent, RotationState, RotationTracker};
use crate::diagnostics::{LockEvent, LockObserver, LockSnapshot};
use crate::error::ConfigError;
use crate::platform::Effects;
use crate::settings::LockConfig;

/// Current operating mode of the lock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LockPhase {
    /// Player is dialing
    Active,
    /// Dial spins on its own before a fresh pattern is drawn
    Resetting,
    /// Door is open, counting down to relock
    Unlocked,
}

/// Phase plus the timers that only exist in that phase
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PhaseState {
    Active,
    Resetting {
        /// Seconds of spin left
        remaining: f32,
        /// Spin direction chosen on entry
        spin: Direction,
    },
    Unlocked {
        /// Seconds until the door closes
        remaining: f32,
        /// Blink oscillator phase (radians)
        blink_phase: f32,
    },
}

impl PhaseState {
    pub fn phase(&self) -> LockPhase {
        match self {
            PhaseState::Active => LockPhase::Active,
            PhaseState::Resetting { .. } => LockPhase::Resetting,
            PhaseState::Unlocked { .. } => LockPhase::Unlocked,
        }
    }
}

/// Pausable elapsed-time counter for the current round
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RoundTimer {
    elapsed: f32,
    running: bool,
}

impl RoundTimer {
    /// Restart from zero
    pub fn start(&mut self) {
        self.elapsed = 0.0;
        self.running = true;
    }

    /// Freeze at the current value
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn advance(&mut self, dt: f32) {
        if self.running {
            self.elapsed += dt;
        }
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

/// The vault lock puzzle
pub struct LockPuzzle {
    /// Seed for reproducibility
    pub(crate) seed: u64,
    pub(crate) rng: Pcg32,
    pub(crate) config: LockConfig,
    pub(crate) generator: PatternGenerator,
    pub(crate) evaluator: MatchEvaluator,
    /// Current secret
    pub(crate) pattern: SecretPattern,
    /// Clicks entered this round
    pub(crate) history: ClickHistory,
    pub(crate) dial: RotationTracker,
    pub(crate) phase: PhaseState,
    pub(crate) timer: RoundTimer,
    /// Rounds started so far (1-based once constructed)
    pub(crate) round: u32,
    /// Successful unlocks so far
    pub(crate) unlocks: u32,
    observer: Option<Box<dyn LockObserver>>,
}

impl fmt::Debug for LockPuzzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LockPuzzle")
            .field("seed", &self.seed)
            .field("round", &self.round)
            .field("phase", &self.phase)
            .field("pattern", &self.pattern.encode())
            .field("history_len", &self.history.len())
            .field("dial", self.dial.state())
            .field("timer", &self.timer)
            .finish_non_exhaustive()
    }
}

impl LockPuzzle {
    /// Validate the config and start the first round
    pub fn new(config: LockConfig, seed: u64) -> Result<Self, ConfigError> {
        if let Err(err) = config.validate() {
            log::warn!("Rejected lock config: {}", err);
            return Err(err);
        }

        let mut rng = Pcg32::seed_from_u64(seed);
        let generator = PatternGenerator::from_config(&config);
        let pattern = generator.generate(&mut rng);

        let mut puzzle = Self {
            seed,
            rng,
            dial: RotationTracker::from_config(&config),
            config,
            generator,
            evaluator: MatchEvaluator,
            pattern,
            history: ClickHistory::new(),
            phase: PhaseState::Active,
            timer: RoundTimer::default(),
            round: 0,
            unlocks: 0,
            observer: None,
        };
        puzzle.begin_round(false);
        Ok(puzzle)
    }

    /// Attach a diagnostics observer (replaces any previous one)
    pub fn set_observer(&mut self, observer: Box<dyn LockObserver>) {
        self.observer = Some(observer);
    }

    /// Detach the diagnostics observer
    pub fn take_observer(&mut self) -> Option<Box<dyn LockObserver>> {
        self.observer.take()
    }

    // === Read-only observers ===

    pub fn phase(&self) -> LockPhase {
        self.phase.phase()
    }

    pub fn phase_state(&self) -> &PhaseState {
        &self.phase
    }

    /// Dial angle for rendering (radians)
    pub fn angle(&self) -> f32 {
        self.dial.angle()
    }

    pub fn rotation(&self) -> &RotationState {
        self.dial.state()
    }

    /// Blink overlay alpha while the door is open
    pub fn blink_alpha(&self) -> Option<f32> {
        match self.phase {
            PhaseState::Unlocked { blink_phase, .. } => Some(blink_phase.sin().abs() * 0.5 + 0.5),
            _ => None,
        }
    }

    /// Elapsed time of the current round (seconds)
    pub fn elapsed(&self) -> f32 {
        self.timer.elapsed()
    }

    pub fn timer(&self) -> &RoundTimer {
        &self.timer
    }

    /// Timer UI is hidden while the dial resets
    pub fn hide_timer(&self) -> bool {
        self.phase() == LockPhase::Resetting
    }

    /// Seconds until the door closes, while unlocked
    pub fn unlock_time_left(&self) -> Option<f32> {
        match self.phase {
            PhaseState::Unlocked { remaining, .. } => Some(remaining.max(0.0)),
            _ => None,
        }
    }

    pub fn pattern(&self) -> &SecretPattern {
        &self.pattern
    }

    pub fn history(&self) -> &ClickHistory {
        &self.history
    }

    pub fn config(&self) -> &LockConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn unlocks(&self) -> u32 {
        self.unlocks
    }

    /// Structured view for diagnostics
    pub fn snapshot(&self) -> LockSnapshot {
        LockSnapshot {
            round: self.round,
            phase: self.phase(),
            pattern: self.pattern.encode(),
            pattern_tokens: self.pattern.tokens().iter().map(|d| d.sign()).collect(),
            history: self.history.tokens().iter().map(|d| d.sign()).collect(),
            angle: self.dial.angle(),
            elapsed: self.timer.elapsed(),
            unlock_time_left: self.unlock_time_left(),
        }
    }

    // === Transitions (driven by `tick`) ===

    /// Feed one click through the matcher and apply the resulting transition
    ///
    /// A mismatch starts the reset spin and a full match opens the door.
    /// Returns `None` without touching the history when the lock is not
    /// accepting input.
    pub fn on_click(&mut self, event: ClickEvent, effects: &mut dyn Effects) -> Option<MatchOutcome> {
        if self.phase() != LockPhase::Active {
            return None;
        }

        effects.request_click_sound();
        let outcome = self.evaluator.on_click(&mut self.history, &self.pattern, event);
        log::debug!(
            "Click {} ({} entered): {:?}",
            event.direction.letter(),
            self.history.len(),
            outcome
        );
        self.notify(LockEvent::Click(event.direction));

        match outcome {
            MatchOutcome::Mismatch => self.begin_reset(),
            MatchOutcome::FullMatch => self.unlock(effects),
            MatchOutcome::Continue => {}
        }
        Some(outcome)
    }

    /// Start a reset spin in a random direction, pausing the round timer
    pub(crate) fn begin_reset(&mut self) {
        let spin = if self.rng.random_bool(0.5) {
            Direction::Clockwise
        } else {
            Direction::CounterClockwise
        };
        self.timer.stop();
        self.phase = PhaseState::Resetting {
            remaining: self.config.reset_spin_duration,
            spin,
        };
        log::info!("Resetting lock (spin {})", spin.letter());
        self.notify(LockEvent::ResetStarted);
    }

    /// Spin finished: home the dial and draw a new secret
    pub(crate) fn finish_reset(&mut self) {
        self.dial.reset_dial();
        self.phase = PhaseState::Active;
        self.begin_round(true);
    }

    /// Door opens; the timer freezes at the solve time
    pub(crate) fn unlock(&mut self, effects: &mut dyn Effects) {
        self.timer.stop();
        self.unlocks += 1;
        self.phase = PhaseState::Unlocked {
            remaining: self.config.unlock_duration,
            blink_phase: 0.0,
        };
        effects.request_visual_state(true);
        effects.request_door_sound();
        log::info!(
            "Vault unlocked in {:.2}s (round {})",
            self.timer.elapsed(),
            self.round
        );
        self.notify(LockEvent::Unlocked);
    }

    /// Door closes and the lock spins back to a fresh round
    pub(crate) fn relock(&mut self, effects: &mut dyn Effects) {
        effects.request_visual_state(false);
        log::info!("Door closing");
        self.notify(LockEvent::Relocked);
        self.begin_reset();
    }

    fn begin_round(&mut self, regenerate: bool) {
        if regenerate {
            self.pattern = self.generator.generate(&mut self.rng);
        }
        self.history.clear();
        self.dial.reset_progress();
        self.timer.start();
        self.round += 1;
        log::info!("Round {} secret pattern: {}", self.round, self.pattern.encode());
        self.notify(LockEvent::RoundStarted);
    }

    fn notify(&mut self, event: LockEvent) {
        if self.observer.is_none() {
            return;
        }
        let snapshot = self.snapshot();
        if let Some(observer) = self.observer.as_mut() {
            observer.on_event(event, &snapshot);
        }
    }
}

//! Simulation tick
//!
//! Advances the lock by one host frame: dial input, click matching, and the
//! Active / Resetting / Unlocked phase transitions.

use super::matcher::MatchOutcome;
use super::rotation::DialInput;
use super::state::{LockPuzzle, PhaseState};
use crate::platform::{Action, Effects, InputSource};

/// Input for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Rotate action held this tick
    pub dial: DialInput,
}

impl TickInput {
    pub fn left() -> Self {
        Self {
            dial: DialInput::Left,
        }
    }

    pub fn right() -> Self {
        Self {
            dial: DialInput::Right,
        }
    }

    /// Sample an input source; left wins when both are held
    pub fn from_source(source: &dyn InputSource) -> Self {
        let dial = if source.is_action_active(Action::RotateLeft) {
            DialInput::Left
        } else if source.is_action_active(Action::RotateRight) {
            DialInput::Right
        } else {
            DialInput::Idle
        };
        Self { dial }
    }
}

impl LockPuzzle {
    /// Advance one host frame, sampling the injected input source
    pub fn update(&mut self, dt: f32, input: &dyn InputSource, effects: &mut dyn Effects) {
        let input = TickInput::from_source(input);
        tick(self, &input, dt, effects);
    }
}

/// Advance the lock by `dt` seconds
pub fn tick(puzzle: &mut LockPuzzle, input: &TickInput, dt: f32, effects: &mut dyn Effects) {
    let mut dt = dt.max(0.0);

    loop {
        match puzzle.phase {
            PhaseState::Active => {
                tick_active(puzzle, input, dt, effects);
                return;
            }
            PhaseState::Resetting { .. } => {
                tick_resetting(puzzle, dt);
                return;
            }
            PhaseState::Unlocked { .. } => match tick_unlocked(puzzle, dt, effects) {
                // Door closed mid-frame: the rest of the frame spins the dial
                Some(leftover) if leftover > 0.0 => dt = leftover,
                _ => return,
            },
        }
    }
}

fn tick_active(puzzle: &mut LockPuzzle, input: &TickInput, dt: f32, effects: &mut dyn Effects) {
    puzzle.timer.advance(dt);

    let clicks = puzzle.dial.apply_input(input.dial, dt);
    for click in clicks {
        // A mismatch or unlock ends the round; the rest of the frame is dropped
        if puzzle.on_click(click, effects) != Some(MatchOutcome::Continue) {
            return;
        }
    }
}

fn tick_resetting(puzzle: &mut LockPuzzle, dt: f32) {
    let speed = puzzle.config.reset_spin_speed;
    let PhaseState::Resetting { remaining, spin } = &mut puzzle.phase else {
        return;
    };

    *remaining -= dt;
    puzzle.dial.spin(spin.unit() * speed * dt);

    if *remaining <= 0.0 {
        puzzle.finish_reset();
    }
}

/// Returns the unused part of `dt` if the door closed this tick
fn tick_unlocked(puzzle: &mut LockPuzzle, dt: f32, effects: &mut dyn Effects) -> Option<f32> {
    let blink_rate = puzzle.config.blink_rate;
    let PhaseState::Unlocked {
        remaining,
        blink_phase,
    } = &mut puzzle.phase
    else {
        return None;
    };

    *remaining -= dt;
    *blink_phase += blink_rate * dt;

    if *remaining > 0.0 {
        return None;
    }

    let leftover = -*remaining;
    puzzle.relock(effects);
    Some(leftover)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::platform::{EffectLog, EffectRequest, KeyboardState};
    use crate::settings::LockConfig;
    use crate::sim::pattern::{Direction, SecretPattern};
    use crate::sim::state::LockPhase;

    use Direction::{Clockwise as R, CounterClockwise as L};

    /// Frame length that yields exactly one click per tick
    fn click_dt() -> f32 {
        UNIT_ANGLE / ROTATION_SPEED
    }

    fn puzzle_with(tokens: &[Direction]) -> LockPuzzle {
        let mut puzzle = LockPuzzle::new(LockConfig::default(), 12345).unwrap();
        puzzle.pattern = SecretPattern::from_tokens(tokens.to_vec()).unwrap();
        puzzle
    }

    fn dial(puzzle: &mut LockPuzzle, tokens: &[Direction], effects: &mut EffectLog) {
        for &direction in tokens {
            let input = match direction {
                R => TickInput::right(),
                L => TickInput::left(),
            };
            tick(puzzle, &input, click_dt() * 1.001, effects);
        }
    }

    /// Idle until the phase changes or the budget runs out
    fn run_until_phase_change(puzzle: &mut LockPuzzle, effects: &mut EffectLog, secs: f32) {
        let start = puzzle.phase();
        let mut t = 0.0;
        while puzzle.phase() == start && t < secs {
            tick(puzzle, &TickInput::default(), SIM_DT, effects);
            t += SIM_DT;
        }
    }

    #[test]
    fn test_idle_tick_stays_active() {
        let mut puzzle = puzzle_with(&[R, R, L]);
        let mut effects = EffectLog::default();
        for _ in 0..120 {
            tick(&mut puzzle, &TickInput::default(), SIM_DT, &mut effects);
        }
        assert_eq!(puzzle.phase(), LockPhase::Active);
        assert!(puzzle.history().is_empty());
        assert!(effects.requests.is_empty());
        assert!((puzzle.elapsed() - 2.0).abs() < 1e-3);
    }

    #[test]
    fn test_mismatch_enters_resetting() {
        let mut puzzle = puzzle_with(&[R, R, L]);
        let mut effects = EffectLog::default();

        dial(&mut puzzle, &[R], &mut effects);
        assert_eq!(puzzle.phase(), LockPhase::Active);
        dial(&mut puzzle, &[L], &mut effects);
        assert_eq!(puzzle.phase(), LockPhase::Resetting);
        assert!(puzzle.hide_timer());
        assert!(!puzzle.timer().is_running());
        assert_eq!(
            effects.requests,
            vec![EffectRequest::ClickSound, EffectRequest::ClickSound]
        );
    }

    #[test]
    fn test_reset_round_trip() {
        let mut puzzle = puzzle_with(&[R, R, L]);
        let mut effects = EffectLog::default();
        dial(&mut puzzle, &[R, L], &mut effects);
        assert_eq!(puzzle.phase(), LockPhase::Resetting);
        let frozen = puzzle.elapsed();

        // Input during the spin is ignored
        for _ in 0..30 {
            tick(&mut puzzle, &TickInput::right(), SIM_DT, &mut effects);
            assert_eq!(puzzle.history().len(), 2);
            assert_eq!(puzzle.elapsed(), frozen);
        }
        assert!(puzzle.angle().abs() > 0.0);

        run_until_phase_change(&mut puzzle, &mut effects, RESET_SPIN_DURATION + 1.0);
        assert_eq!(puzzle.phase(), LockPhase::Active);
        assert!(puzzle.history().is_empty());
        assert_eq!(puzzle.angle(), 0.0);
        assert_eq!(puzzle.rotation().accumulated, 0.0);
        assert_eq!(puzzle.round(), 2);
        assert!(puzzle.timer().is_running());
        assert!(puzzle.elapsed() < 0.1);

        // Freshly generated pattern honours the invariant
        assert_eq!(puzzle.pattern().runs().len(), 3);
    }

    #[test]
    fn test_full_match_unlocks() {
        let secret = [R, R, L, L, L];
        let mut puzzle = puzzle_with(&secret);
        let mut effects = EffectLog::default();

        dial(&mut puzzle, &secret[..4], &mut effects);
        assert_eq!(puzzle.phase(), LockPhase::Active);
        dial(&mut puzzle, &secret[4..], &mut effects);
        assert_eq!(puzzle.phase(), LockPhase::Unlocked);
        assert_eq!(puzzle.unlocks(), 1);

        let tail = &effects.requests[effects.requests.len() - 2..];
        assert_eq!(
            tail,
            &[EffectRequest::VisualState { door_open: true }, EffectRequest::DoorSound]
        );
        assert!(!puzzle.timer().is_running());
        assert!(puzzle.blink_alpha().is_some());
    }

    #[test]
    fn test_unlock_round_trip() {
        let secret = [L, R, R];
        let mut puzzle = puzzle_with(&secret);
        let mut effects = EffectLog::default();
        dial(&mut puzzle, &secret, &mut effects);
        assert_eq!(puzzle.phase(), LockPhase::Unlocked);
        let solve_time = puzzle.elapsed();

        // Timer stays frozen at the solve time while the door is open
        for _ in 0..60 {
            tick(&mut puzzle, &TickInput::left(), SIM_DT, &mut effects);
        }
        assert_eq!(puzzle.elapsed(), solve_time);
        assert_eq!(puzzle.history().len(), 3);

        run_until_phase_change(&mut puzzle, &mut effects, UNLOCK_DURATION + 1.0);
        assert_eq!(puzzle.phase(), LockPhase::Resetting);
        assert_eq!(
            effects.requests.last(),
            Some(&EffectRequest::VisualState { door_open: false })
        );
        assert!(!puzzle.timer().is_running());

        run_until_phase_change(&mut puzzle, &mut effects, RESET_SPIN_DURATION + 1.0);
        assert_eq!(puzzle.phase(), LockPhase::Active);
        assert!(puzzle.timer().is_running());
        assert!(puzzle.history().is_empty());
    }

    #[test]
    fn test_unlock_leftover_time_carries_into_reset() {
        let secret = [R];
        let mut puzzle = puzzle_with(&secret);
        let mut effects = EffectLog::default();
        dial(&mut puzzle, &secret, &mut effects);
        assert_eq!(puzzle.phase(), LockPhase::Unlocked);

        tick(&mut puzzle, &TickInput::default(), UNLOCK_DURATION + 1.0, &mut effects);
        match puzzle.phase_state() {
            PhaseState::Resetting { remaining, .. } => {
                assert!((remaining - (RESET_SPIN_DURATION - 1.0)).abs() < 1e-3);
            }
            other => panic!("expected Resetting, got {:?}", other),
        }
    }

    #[test]
    fn test_large_frame_emits_all_clicks() {
        let secret = [R, R, R, L];
        let mut puzzle = puzzle_with(&secret);
        let mut effects = EffectLog::default();

        // One oversized frame covering three clicks
        tick(&mut puzzle, &TickInput::right(), click_dt() * 3.5, &mut effects);
        assert_eq!(puzzle.phase(), LockPhase::Active);
        assert_eq!(puzzle.history().tokens(), &[R, R, R]);
    }

    #[test]
    fn test_mismatch_discards_rest_of_frame() {
        let mut puzzle = puzzle_with(&[L, L, L, R]);
        let mut effects = EffectLog::default();

        // Frame worth four clockwise clicks: the second one mismatches
        tick(&mut puzzle, &TickInput::right(), click_dt() * 4.5, &mut effects);
        assert_eq!(puzzle.phase(), LockPhase::Resetting);
        assert_eq!(puzzle.history().len(), 2);
    }

    #[test]
    fn test_update_reads_keyboard() {
        let mut puzzle = puzzle_with(&[R, R, L]);
        let mut effects = EffectLog::default();
        let mut keyboard = KeyboardState::default();

        keyboard.key_down("KeyD");
        puzzle.update(click_dt() * 1.001, &keyboard, &mut effects);
        assert_eq!(puzzle.history().tokens(), &[R]);

        keyboard.key_up("KeyD");
        puzzle.update(SIM_DT, &keyboard, &mut effects);
        assert_eq!(puzzle.history().len(), 1);
    }

    #[test]
    fn test_determinism() {
        let mut a = LockPuzzle::new(LockConfig::default(), 777).unwrap();
        let mut b = LockPuzzle::new(LockConfig::default(), 777).unwrap();
        let mut effects = EffectLog::default();
        let inputs = [TickInput::right(), TickInput::left(), TickInput::default()];

        for i in 0..2000 {
            let input = inputs[(i / 40) % inputs.len()];
            tick(&mut a, &input, SIM_DT, &mut effects);
            tick(&mut b, &input, SIM_DT, &mut effects);
        }

        assert_eq!(a.phase(), b.phase());
        assert_eq!(a.pattern(), b.pattern());
        assert_eq!(a.history(), b.history());
        assert_eq!(a.round(), b.round());
        assert!((a.angle() - b.angle()).abs() < 1e-6);
    }

    #[test]
    fn test_frame_rate_independence() {
        let mut slow = puzzle_with(&[R, R, R, R, R, R, L]);
        let mut fast = puzzle_with(&[R, R, R, R, R, R, L]);
        let mut effects = EffectLog::default();

        for _ in 0..60 {
            tick(&mut fast, &TickInput::right(), SIM_DT, &mut effects);
        }
        for _ in 0..30 {
            tick(&mut slow, &TickInput::right(), SIM_DT * 2.0, &mut effects);
        }
        assert_eq!(fast.history().len(), slow.history().len());
        assert!((fast.angle() - slow.angle()).abs() < 1e-3);
        assert!((fast.elapsed() - slow.elapsed()).abs() < 1e-3);
    }
}

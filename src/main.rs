//! Vault Lock headless demo
//!
//! Drives the lock with an autopilot that peeks at the secret (occasionally
//! fumbling a click) and runs the host loop with a fixed-step accumulator.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use vault_lock::audio::{AudioCues, SoundEffect};
use vault_lock::consts::*;
use vault_lock::diagnostics::{LockSnapshot, LogObserver};
use vault_lock::hud::HudView;
use vault_lock::platform::{Action, Effects, InputSource};
use vault_lock::sim::{Direction, LockPhase, LockPuzzle};
use vault_lock::LockConfig;

/// Host-side collaborator: queues sounds, tracks the door sprite
struct DemoHost {
    audio: AudioCues,
    door_open: bool,
}

impl Effects for DemoHost {
    fn request_click_sound(&mut self) {
        self.audio.play(SoundEffect::Click);
    }

    fn request_door_sound(&mut self) {
        self.audio.play(SoundEffect::DoorOpen);
    }

    fn request_visual_state(&mut self, door_open: bool) {
        self.door_open = door_open;
        log::info!("Door sprite: {}", if door_open { "open" } else { "closed" });
    }
}

/// Plays the lock by reading the secret
struct Autopilot {
    rng: Pcg32,
    /// Chance of dialing the wrong way on each new click
    fumble_chance: f64,
    /// History length the plan was made for, and the action chosen
    plan: Option<(usize, Action)>,
    held: Option<Action>,
}

impl Autopilot {
    fn new(seed: u64, fumble_chance: f64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed ^ 0x5eed),
            fumble_chance,
            plan: None,
            held: None,
        }
    }

    fn steer(&mut self, puzzle: &LockPuzzle) {
        if puzzle.phase() != LockPhase::Active {
            self.plan = None;
            self.held = None;
            return;
        }

        let entered = puzzle.history().len();
        let action = match self.plan {
            Some((planned_for, action)) if planned_for == entered => action,
            _ => {
                let tokens = puzzle.pattern().tokens();
                let wanted = tokens.get(entered).copied().unwrap_or(Direction::Clockwise);
                let direction = if self.rng.random_bool(self.fumble_chance) {
                    wanted.opposite()
                } else {
                    wanted
                };
                let action = match direction {
                    Direction::Clockwise => Action::RotateRight,
                    Direction::CounterClockwise => Action::RotateLeft,
                };
                self.plan = Some((entered, action));
                action
            }
        };

        // Against the stop: let go for a tick so the dial drifts back; click
        // progress is kept
        let angle = puzzle.angle();
        let pushing_out = match action {
            Action::RotateRight => angle > 0.0,
            Action::RotateLeft => angle < 0.0,
        };
        let pinned = pushing_out && angle.abs() >= puzzle.config().max_angle - 1e-3;
        self.held = if pinned { None } else { Some(action) };
    }
}

impl InputSource for Autopilot {
    fn is_action_active(&self, action: Action) -> bool {
        self.held == Some(action)
    }
}

fn parse_arg<T: std::str::FromStr>(index: usize, default: T) -> T {
    std::env::args()
        .nth(index)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(default)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let seed: u64 = parse_arg(1, 2024);
    let target_unlocks: u32 = parse_arg(2, 3);
    log::info!("Vault Lock (native) starting with seed {}", seed);

    let mut puzzle = match LockPuzzle::new(LockConfig::default(), seed) {
        Ok(puzzle) => puzzle,
        Err(err) => {
            log::error!("Cannot start: {}", err);
            std::process::exit(1);
        }
    };
    puzzle.set_observer(Box::new(LogObserver));

    let mut host = DemoHost {
        audio: AudioCues::new(),
        door_open: false,
    };
    let mut pilot = Autopilot::new(seed, 0.05);
    let mut jitter = Pcg32::seed_from_u64(seed.wrapping_add(1));

    let mut accumulator = 0.0_f32;
    let mut clock = 0.0_f32;
    let mut last_phase = puzzle.phase();
    let time_limit = 600.0;

    while puzzle.unlocks() < target_unlocks && clock < time_limit {
        // Uneven host frames, 40-90 fps
        let frame_dt = jitter.random_range(1.0 / 90.0..1.0 / 40.0_f32).min(0.1);
        clock += frame_dt;
        accumulator += frame_dt;

        let mut substeps = 0;
        while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            pilot.steer(&puzzle);
            puzzle.update(SIM_DT, &pilot, &mut host);
            accumulator -= SIM_DT;
            substeps += 1;
        }

        let played = host.audio.drain();
        if played.iter().any(|cue| cue.effect == SoundEffect::DoorOpen) {
            log::info!("♪ {}", SoundEffect::DoorOpen.asset());
        }

        if puzzle.phase() != last_phase {
            let hud = HudView::from_puzzle(&puzzle);
            let snapshot = puzzle.snapshot();
            log::info!(
                "{:?} -> {:?} | timer {} | history {}",
                last_phase,
                hud.phase,
                hud.timer_text,
                LockSnapshot::arrows(&snapshot.history)
            );
            last_phase = hud.phase;
        }
    }

    log::info!(
        "Done: {} unlock(s) over {} round(s) in {:.1}s simulated (door {})",
        puzzle.unlocks(),
        puzzle.round(),
        clock,
        if host.door_open { "open" } else { "closed" }
    );
}

//! Deterministic lock simulation
//!
//! All puzzle logic lives here. This module must stay pure and deterministic:
//! - Seeded RNG only
//! - Delta-scaled continuous math, discrete click emission
//! - No rendering or platform dependencies (collaborators are traits)

pub mod matcher;
pub mod pattern;
pub mod rotation;
pub mod state;
pub mod tick;

pub use matcher::{ClickHistory, MatchEvaluator, MatchOutcome};
pub use pattern::{Direction, PatternGenerator, Run, SecretPattern};
pub use rotation::{ClickEvent, DialInput, RotationState, RotationTracker};
pub use state::{LockPhase, LockPuzzle, PhaseState, RoundTimer};
pub use tick::{TickInput, tick};

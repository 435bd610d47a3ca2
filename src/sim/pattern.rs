//! Secret pattern generation
//!
//! A pattern is three runs of alternating rotation direction, e.g. 3 right,
//! 2 left, 5 right. Run lengths come from the configured range.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::settings::LockConfig;

/// Rotation direction of a single click
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Right / +1
    Clockwise,
    /// Left / -1
    CounterClockwise,
}

impl Direction {
    /// Signed token value (+1 / -1)
    #[inline]
    pub fn sign(self) -> i8 {
        match self {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => -1,
        }
    }

    /// Signed unit as a float, for angle math
    #[inline]
    pub fn unit(self) -> f32 {
        f32::from(self.sign())
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }

    /// Letter used in the human-readable encoding
    pub fn letter(self) -> char {
        match self {
            Direction::Clockwise => 'R',
            Direction::CounterClockwise => 'L',
        }
    }
}

/// A maximal block of same-direction clicks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    pub direction: Direction,
    pub length: u32,
}

/// The combination the player must dial
///
/// Never empty. Immutable once built; a new round gets a new pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretPattern {
    tokens: Vec<Direction>,
}

impl SecretPattern {
    /// Build a pattern from explicit tokens (None if empty)
    pub fn from_tokens(tokens: Vec<Direction>) -> Option<Self> {
        if tokens.is_empty() {
            None
        } else {
            Some(Self { tokens })
        }
    }

    pub fn tokens(&self) -> &[Direction] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Collapse into maximal runs
    pub fn runs(&self) -> Vec<Run> {
        let mut runs: Vec<Run> = Vec::new();
        for &direction in &self.tokens {
            match runs.last_mut() {
                Some(run) if run.direction == direction => run.length += 1,
                _ => runs.push(Run {
                    direction,
                    length: 1,
                }),
            }
        }
        runs
    }

    /// Run-length encoding such as `3R, 2L, 5R`
    pub fn encode(&self) -> String {
        self.runs()
            .iter()
            .map(|run| format!("{}{}", run.length, run.direction.letter()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Produces secret patterns from the configured run-length range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternGenerator {
    min_run: u32,
    max_run: u32,
    run_count: u32,
}

impl PatternGenerator {
    /// Create a generator from a config that passed [`LockConfig::validate`]
    pub fn from_config(config: &LockConfig) -> Self {
        Self {
            min_run: config.min_run,
            max_run: config.max_run,
            run_count: config.run_count,
        }
    }

    /// Draw a fresh pattern: random starting direction, then alternating runs
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> SecretPattern {
        let mut direction = if rng.random_bool(0.5) {
            Direction::Clockwise
        } else {
            Direction::CounterClockwise
        };

        let mut tokens = Vec::new();
        for _ in 0..self.run_count {
            let length = rng.random_range(self.min_run..=self.max_run);
            tokens.extend(std::iter::repeat_n(direction, length as usize));
            direction = direction.opposite();
        }
        SecretPattern { tokens }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::RunLengthPreset;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    use Direction::{Clockwise as R, CounterClockwise as L};

    #[test]
    fn test_encode_matches_runs() {
        let pattern = SecretPattern::from_tokens(vec![R, R, R, L, L, R]).unwrap();
        assert_eq!(pattern.encode(), "3R, 2L, 1R");
        assert_eq!(pattern.runs().len(), 3);
    }

    #[test]
    fn test_empty_pattern_rejected() {
        assert!(SecretPattern::from_tokens(Vec::new()).is_none());
    }

    #[test]
    fn test_same_seed_same_pattern() {
        let generator = PatternGenerator::from_config(&LockConfig::default());
        let a = generator.generate(&mut Pcg32::seed_from_u64(7));
        let b = generator.generate(&mut Pcg32::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn test_fixed_length_range() {
        let mut config = LockConfig::default();
        config.min_run = 4;
        config.max_run = 4;
        let generator = PatternGenerator::from_config(&config);
        let pattern = generator.generate(&mut Pcg32::seed_from_u64(1));
        assert_eq!(pattern.len(), 12);
        assert!(pattern.runs().iter().all(|run| run.length == 4));
    }

    #[test]
    fn test_both_starting_directions_occur() {
        let generator = PatternGenerator::from_config(&LockConfig::default());
        let mut rng = Pcg32::seed_from_u64(99);
        let firsts: Vec<Direction> = (0..64)
            .map(|_| generator.generate(&mut rng).tokens()[0])
            .collect();
        assert!(firsts.contains(&R));
        assert!(firsts.contains(&L));
    }

    proptest! {
        #[test]
        fn prop_three_alternating_runs_in_range(
            seed in any::<u64>(),
            preset in prop_oneof![
                Just(RunLengthPreset::Classic),
                Just(RunLengthPreset::Tightened),
                Just(RunLengthPreset::Long),
            ],
        ) {
            let config = LockConfig::from_preset(preset);
            let generator = PatternGenerator::from_config(&config);
            let pattern = generator.generate(&mut Pcg32::seed_from_u64(seed));

            prop_assert!(!pattern.is_empty());
            let runs = pattern.runs();
            prop_assert_eq!(runs.len(), 3);
            for pair in runs.windows(2) {
                prop_assert_eq!(pair[0].direction.opposite(), pair[1].direction);
            }
            for run in &runs {
                prop_assert!(run.length >= config.min_run && run.length <= config.max_run);
            }
        }
    }
}

//! Click history and pattern matching

use serde::{Deserialize, Serialize};

use super::pattern::{Direction, SecretPattern};
use super::rotation::ClickEvent;

/// Clicks entered this round, oldest first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickHistory {
    clicks: Vec<Direction>,
}

impl ClickHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, direction: Direction) {
        self.clicks.push(direction);
    }

    pub fn clear(&mut self) {
        self.clicks.clear();
    }

    pub fn len(&self) -> usize {
        self.clicks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clicks.is_empty()
    }

    pub fn tokens(&self) -> &[Direction] {
        &self.clicks
    }

    /// The most recent `n` clicks (fewer if the history is shorter)
    pub fn suffix(&self, n: usize) -> &[Direction] {
        let start = self.clicks.len().saturating_sub(n);
        &self.clicks[start..]
    }
}

/// Verdict after a click
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    /// Still consistent with the pattern, not complete
    Continue,
    /// Recent clicks diverge from the start of the pattern
    Mismatch,
    /// The most recent clicks spell the whole pattern
    FullMatch,
}

/// Compares the click history against the secret
///
/// The history is an unbounded trailing stream, so only its latest window is
/// compared, always against the pattern from its first token.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchEvaluator;

impl MatchEvaluator {
    /// History length below which mismatches are not reported.
    ///
    /// A lone leading click is tolerated before checking starts.
    pub const MISMATCH_GRACE: usize = 2;

    /// Append a click and judge the resulting history
    pub fn on_click(
        &self,
        history: &mut ClickHistory,
        pattern: &SecretPattern,
        event: ClickEvent,
    ) -> MatchOutcome {
        history.push(event.direction);
        self.evaluate(history, pattern)
    }

    /// Judge a history without modifying it
    pub fn evaluate(&self, history: &ClickHistory, pattern: &SecretPattern) -> MatchOutcome {
        if self.is_mismatch(history, pattern) {
            MatchOutcome::Mismatch
        } else if self.is_full_match(history, pattern) {
            MatchOutcome::FullMatch
        } else {
            MatchOutcome::Continue
        }
    }

    /// Last k clicks vs first k pattern tokens, k = min(history, pattern)
    pub fn is_mismatch(&self, history: &ClickHistory, pattern: &SecretPattern) -> bool {
        if history.len() < Self::MISMATCH_GRACE {
            return false;
        }
        let k = history.len().min(pattern.len());
        history.suffix(k) != &pattern.tokens()[..k]
    }

    pub fn is_full_match(&self, history: &ClickHistory, pattern: &SecretPattern) -> bool {
        history.len() >= pattern.len() && history.suffix(pattern.len()) == pattern.tokens()
    }
}

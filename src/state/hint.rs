//! Extra guidance shown alongside feedback.
//!
//! None of this affects scoring or termination.

use serde::{Deserialize, Serialize};

use super::evaluator::Comparison;

/// Inclusive interval the numeric secret must lie in, given the guesses so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintRange {
    pub low: u32,
    pub high: u32,
}

impl HintRange {
    pub fn new(low: u32, high: u32) -> Self {
        Self { low, high }
    }

    /// Narrow the interval after a guess scored `comparison`.
    pub fn narrow(self, guess: u32, comparison: Comparison) -> Self {
        match comparison {
            Comparison::Lower => Self {
                low: self.low.max(guess.saturating_add(1)),
                ..self
            },
            Comparison::Higher => Self {
                high: self.high.min(guess.saturating_sub(1)),
                ..self
            },
            Comparison::Equal => Self::new(guess, guess),
        }
    }

    pub fn contains(&self, value: u32) -> bool {
        (self.low..=self.high).contains(&value)
    }

    /// Number of candidates still possible.
    pub fn width(&self) -> u32 {
        if self.high < self.low {
            0
        } else {
            self.high - self.low + 1
        }
    }
}

/// Nudge shown when the attempt budget is nearly spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttemptWarning {
    /// Exactly this many attempts remain.
    LowAttempts(u32),
    /// One attempt left.
    LastChance,
}

impl AttemptWarning {
    /// Threshold at which [`AttemptWarning::LowAttempts`] fires.
    pub const LOW_THRESHOLD: u32 = 2;

    pub fn for_remaining(remaining: u32) -> Option<Self> {
        match remaining {
            1 => Some(Self::LastChance),
            Self::LOW_THRESHOLD => Some(Self::LowAttempts(remaining)),
            _ => None,
        }
    }
}

/// How well a won game went.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WinRating {
    FirstTry,
    Quick,
    Eventually,
}

impl WinRating {
    pub fn for_attempts(attempts: u32) -> Self {
        match attempts {
            0 | 1 => Self::FirstTry,
            2..=3 => Self::Quick,
            _ => Self::Eventually,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FirstTry => "first_try",
            Self::Quick => "quick",
            Self::Eventually => "eventually",
        }
    }
}

//! Guess evaluation.
//!
//! Two scoring policies:
//!
//! - [`compare`] - higher/lower/equal for a numeric secret.
//! - [`match_digits`] - per-position marks for a digit code, Mastermind style.
//!
//! Both are pure. [`evaluate`] picks the right one for a guess/secret pair.

use serde::{Deserialize, Serialize};

use super::guess::{Guess, InvalidGuess};
use super::secret::Secret;

/// How a numeric guess relates to the secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    /// Guess is below the secret.
    Lower,
    /// Guess is above the secret.
    Higher,
    /// Exact match.
    Equal,
}

impl Comparison {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lower => "lower",
            Self::Higher => "higher",
            Self::Equal => "equal",
        }
    }
}

/// Compare a numeric guess to the secret.
pub fn compare(guess: u32, secret: u32) -> Comparison {
    match guess.cmp(&secret) {
        std::cmp::Ordering::Less => Comparison::Lower,
        std::cmp::Ordering::Greater => Comparison::Higher,
        std::cmp::Ordering::Equal => Comparison::Equal,
    }
}

/// Mark for a single digit of a code guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mark {
    /// Right digit, right position.
    Correct,
    /// Digit occurs elsewhere in the secret.
    Present,
    /// Digit not in the secret (or every occurrence already claimed).
    Absent,
}

impl Mark {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Correct => "correct",
            Self::Present => "present",
            Self::Absent => "absent",
        }
    }
}

/// Score a digit code against the secret.
///
/// Exact matches are taken first. Remaining guess positions are then scored
/// left to right against the unclaimed secret digits, each secret occurrence
/// satisfying at most one guess position. With secret `1123` and guess `1111`
/// this gives `Correct, Correct, Absent, Absent`.
pub fn match_digits(guess: &[u8], secret: &[u8]) -> Result<Vec<Mark>, InvalidGuess> {
    if guess.len() != secret.len() {
        return Err(InvalidGuess::WrongLength {
            expected: secret.len(),
            actual: guess.len(),
        });
    }

    let mut marks = vec![Mark::Absent; guess.len()];
    // Unclaimed secret digits, by value.
    let mut pool = [0usize; 10];

    for (i, (&g, &s)) in guess.iter().zip(secret).enumerate() {
        if g > 9 || s > 9 {
            return Err(InvalidGuess::DigitOutOfRange { value: g.max(s) });
        }
        if g == s {
            marks[i] = Mark::Correct;
        } else {
            pool[s as usize] += 1;
        }
    }

    for (mark, &g) in marks.iter_mut().zip(guess) {
        if *mark == Mark::Correct {
            continue;
        }
        let slot = &mut pool[g as usize];
        if *slot > 0 {
            *slot -= 1;
            *mark = Mark::Present;
        }
    }

    Ok(marks)
}

/// Structured result of scoring one guess.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Feedback {
    Comparison(Comparison),
    Marks(Vec<Mark>),
}

impl Feedback {
    /// Whether the guess hit the secret exactly.
    pub fn is_exact(&self) -> bool {
        match self {
            Self::Comparison(c) => *c == Comparison::Equal,
            Self::Marks(marks) => marks.iter().all(|m| *m == Mark::Correct),
        }
    }

    pub fn as_comparison(&self) -> Option<Comparison> {
        match self {
            Self::Comparison(c) => Some(*c),
            Self::Marks(_) => None,
        }
    }

    pub fn as_marks(&self) -> Option<&[Mark]> {
        match self {
            Self::Comparison(_) => None,
            Self::Marks(marks) => Some(marks),
        }
    }

    /// `(correct, present, absent)` totals for code feedback.
    pub fn mark_counts(&self) -> Option<(usize, usize, usize)> {
        let marks = self.as_marks()?;
        let count = |kind: Mark| marks.iter().filter(|m| **m == kind).count();
        Some((
            count(Mark::Correct),
            count(Mark::Present),
            count(Mark::Absent),
        ))
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Comparison(c) => serde_json::json!(c.as_str()),
            Self::Marks(marks) => {
                serde_json::json!(marks.iter().map(|m| m.as_str()).collect::<Vec<_>>())
            }
        }
    }
}

/// Score `guess` against `secret` with the matching policy.
pub fn evaluate(guess: &Guess, secret: &Secret) -> Result<Feedback, InvalidGuess> {
    match (guess, secret) {
        (Guess::Number(g), Secret::Number(s)) => Ok(Feedback::Comparison(compare(*g, *s))),
        (Guess::Code(g), Secret::Code(s)) => match_digits(g, s).map(Feedback::Marks),
        _ => Err(InvalidGuess::WrongKind),
    }
}

//! Guess values and raw-input validation.
//!
//! The view layer hands over whatever the player typed. Everything here turns
//! that text into a typed [`Guess`] or rejects it with an [`InvalidGuess`].
//! A rejected guess never costs an attempt.

use std::fmt;
use std::num::IntErrorKind;

use serde::{Deserialize, Serialize};

use super::status::GameStatus;

/// A validated guess.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Guess {
    /// A single integer, already range-checked.
    Number(u32),
    /// A fixed-length sequence of decimal digits, each in `0..=9`.
    Code(Vec<u8>),
}

impl Guess {
    pub fn as_number(&self) -> Option<u32> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Code(_) => None,
        }
    }

    pub fn as_digits(&self) -> Option<&[u8]> {
        match self {
            Self::Number(_) => None,
            Self::Code(digits) => Some(digits),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Number(n) => serde_json::json!(n),
            Self::Code(_) => serde_json::json!(self.to_string()),
        }
    }
}

impl fmt::Display for Guess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Code(digits) => {
                for d in digits {
                    write!(f, "{}", d)?;
                }
                Ok(())
            }
        }
    }
}

/// Why a guess was rejected.
///
/// This is the only error a player can trigger. It is always recoverable:
/// the caller re-prompts and the game is left untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidGuess {
    /// The game already ended.
    GameOver { status: GameStatus },
    /// Input did not parse as an integer.
    NotANumber { input: String },
    /// Integer outside the allowed inclusive range.
    OutOfRange { value: i64, min: u32, max: u32 },
    /// Code input contained something other than a decimal digit.
    NotADigit { found: char },
    /// A typed code held a value above 9.
    DigitOutOfRange { value: u8 },
    /// Code input had the wrong number of digits.
    WrongLength { expected: usize, actual: usize },
    /// A numeric guess was sent to a code game, or the other way round.
    WrongKind,
}

impl fmt::Display for InvalidGuess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GameOver { status } => write!(f, "Game is over ({})", status),
            Self::NotANumber { input } => write!(f, "Not a number: {:?}", input),
            Self::OutOfRange { value, min, max } => {
                write!(f, "{} is outside {}-{}", value, min, max)
            }
            Self::NotADigit { found } => write!(f, "Not a digit: {:?}", found),
            Self::DigitOutOfRange { value } => write!(f, "{} is not a single digit", value),
            Self::WrongLength { expected, actual } => {
                write!(f, "Expected {} digits, got {}", expected, actual)
            }
            Self::WrongKind => write!(f, "Guess does not match the game type"),
        }
    }
}

impl std::error::Error for InvalidGuess {}

/// Parse a numeric guess within `min..=max`.
///
/// Surrounding whitespace is ignored. Values too large for `i64` are
/// reported as out of range rather than as non-numeric.
pub fn parse_number(raw: &str, min: u32, max: u32) -> Result<Guess, InvalidGuess> {
    let trimmed = raw.trim();

    let value = match trimmed.parse::<i64>() {
        Ok(v) => v,
        Err(e) => {
            return Err(match e.kind() {
                IntErrorKind::PosOverflow => InvalidGuess::OutOfRange {
                    value: i64::MAX,
                    min,
                    max,
                },
                IntErrorKind::NegOverflow => InvalidGuess::OutOfRange {
                    value: i64::MIN,
                    min,
                    max,
                },
                _ => InvalidGuess::NotANumber {
                    input: trimmed.to_string(),
                },
            });
        }
    };

    if value < i64::from(min) || value > i64::from(max) {
        return Err(InvalidGuess::OutOfRange { value, min, max });
    }

    // In range of two u32 bounds, so the cast is lossless.
    Ok(Guess::Number(value as u32))
}

/// Parse a digit code of exactly `length` digits.
///
/// Whitespace between digits is skipped, so `"1 2 3 4"` reads the same as
/// `"1234"`. Input is rejected at the first digit past `length`, so for
/// overlong input `actual` is `length + 1`.
pub fn parse_code(raw: &str, length: usize) -> Result<Guess, InvalidGuess> {
    let mut digits = Vec::with_capacity(length);

    for ch in raw.chars().filter(|c| !c.is_whitespace()) {
        match ch.to_digit(10) {
            Some(d) => digits.push(d as u8),
            None => return Err(InvalidGuess::NotADigit { found: ch }),
        }
        if digits.len() > length {
            return Err(InvalidGuess::WrongLength {
                expected: length,
                actual: digits.len(),
            });
        }
    }

    if digits.len() != length {
        return Err(InvalidGuess::WrongLength {
            expected: length,
            actual: digits.len(),
        });
    }

    Ok(Guess::Code(digits))
}

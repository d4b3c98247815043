//! Secrets and how they are generated.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::game::ConfigError;
use super::guess::{self, Guess, InvalidGuess};

/// Longest digit code a game may use.
pub const MAX_CODE_LENGTH: usize = 10;

/// Describes what kind of secret a game hides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SecretSpec {
    /// An integer in `min..=max`.
    Number { min: u32, max: u32 },
    /// `length` decimal digits, duplicates allowed.
    Code { length: usize },
}

impl SecretSpec {
    pub fn number(min: u32, max: u32) -> Self {
        Self::Number { min, max }
    }

    pub fn code(length: usize) -> Self {
        Self::Code { length }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Number { .. } => "number",
            Self::Code { .. } => "code",
        }
    }

    /// Check this describes a playable secret.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            Self::Number { min, max } if min > max => Err(ConfigError::EmptyRange { min, max }),
            Self::Code { length } if length == 0 || length > MAX_CODE_LENGTH => {
                Err(ConfigError::BadCodeLength { length })
            }
            _ => Ok(()),
        }
    }

    /// Draw a fresh secret. Call [`SecretSpec::validate`] first.
    pub fn generate<R: Rng>(&self, rng: &mut R) -> Secret {
        match *self {
            Self::Number { min, max } => Secret::Number(rng.gen_range(min..=max)),
            Self::Code { length } => {
                Secret::Code((0..length).map(|_| rng.gen_range(0..=9u8)).collect())
            }
        }
    }

    /// Turn raw player input into a guess for this kind of secret.
    pub fn parse_guess(&self, raw: &str) -> Result<Guess, InvalidGuess> {
        match *self {
            Self::Number { min, max } => guess::parse_number(raw, min, max),
            Self::Code { length } => guess::parse_code(raw, length),
        }
    }

    /// Check an already-typed guess against this spec.
    pub fn check_guess(&self, guess: &Guess) -> Result<(), InvalidGuess> {
        match (*self, guess) {
            (Self::Number { min, max }, Guess::Number(n)) => {
                if *n < min || *n > max {
                    Err(InvalidGuess::OutOfRange {
                        value: i64::from(*n),
                        min,
                        max,
                    })
                } else {
                    Ok(())
                }
            }
            (Self::Code { length }, Guess::Code(digits)) => {
                if let Some(&value) = digits.iter().find(|d| **d > 9) {
                    return Err(InvalidGuess::DigitOutOfRange { value });
                }
                if digits.len() != length {
                    return Err(InvalidGuess::WrongLength {
                        expected: length,
                        actual: digits.len(),
                    });
                }
                Ok(())
            }
            _ => Err(InvalidGuess::WrongKind),
        }
    }

    /// Whether `secret` could have been produced by this spec.
    pub fn fits(&self, secret: &Secret) -> bool {
        match (*self, secret) {
            (Self::Number { min, max }, Secret::Number(n)) => (min..=max).contains(n),
            (Self::Code { length }, Secret::Code(digits)) => {
                digits.len() == length && digits.iter().all(|d| *d <= 9)
            }
            _ => false,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Number { min, max } => serde_json::json!({
                "kind": self.as_str(),
                "min": min,
                "max": max
            }),
            Self::Code { length } => serde_json::json!({
                "kind": self.as_str(),
                "length": length
            }),
        }
    }
}

/// The hidden target. Never changes during a game.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Secret {
    Number(u32),
    Code(Vec<u8>),
}

impl Secret {
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Number(n) => serde_json::json!(n),
            Self::Code(_) => serde_json::json!(self.to_string()),
        }
    }
}

impl fmt::Display for Secret {
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

//! Game status state machine.
//!
//! # State Diagram
//!
//! ```text
//!                 guess (miss, attempts left)
//!                  ┌──────┐
//!                  │      ▼
//!             ┌────┴─────────┐
//!   reset ───▶│    Active    │
//!             └──┬────────┬──┘
//!     guess (hit)│        │ guess (miss, budget spent)
//!                ▼        ▼
//!         ┌─────────┐  ┌─────────┐
//!         │   Won   │  │  Lost   │
//!         └────┬────┘  └────┬────┘
//!              │   reset    │
//!              └─────▶──────┴──────▶ Active (new secret)
//! ```
//!
//! `Won` and `Lost` are terminal for a game instance. Only a reset, which
//! starts a new game with a new secret, leaves them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Where a game is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    /// Accepting guesses.
    #[default]
    Active,
    /// Secret found.
    Won,
    /// Attempt budget spent without finding the secret.
    Lost,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Won => "won",
            Self::Lost => "lost",
        }
    }

    /// Check if the game accepts guesses.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// Check if the game has ended.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }

    /// Apply an event, returning the next status or an error.
    pub fn apply(self, event: StatusEvent) -> Result<Self, InvalidTransition> {
        use GameStatus::*;
        use StatusEvent::*;

        let invalid = |reason: &'static str| InvalidTransition {
            from: self,
            event,
            reason,
        };

        match (self, event) {
            (Active, Guessed { exact: true, .. }) => Ok(Won),
            (Active, Guessed { exhausted: true, .. }) => Ok(Lost),
            (Active, Guessed { .. }) => Ok(Active),
            (Won, Guessed { .. }) => Err(invalid("Secret already found")),
            (Lost, Guessed { .. }) => Err(invalid("No attempts left")),

            (_, Reset) => Ok(Active),
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "Active"),
            Self::Won => write!(f, "Won"),
            Self::Lost => write!(f, "Lost"),
        }
    }
}

/// Status transition events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusEvent {
    /// A valid guess was scored.
    Guessed {
        /// Guess matched the secret.
        exact: bool,
        /// This guess used the last attempt.
        exhausted: bool,
    },
    /// Throw the game away and start over.
    Reset,
}

/// Error when a status transition is invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidTransition {
    pub from: GameStatus,
    pub event: StatusEvent,
    pub reason: &'static str,
}

impl fmt::Display for InvalidTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid transition from {} via {:?}: {}",
            self.from, self.event, self.reason
        )
    }
}

impl std::error::Error for InvalidTransition {}
